//! Session module - the game loop controller
//!
//! A session wraps a [`Board`] with the timing state that drives it: gravity,
//! soft drop, the horizontal repeat delay, level progression and pause.
//! Frontends call [`Session::tick`] once per frame with the elapsed wall-clock
//! time and [`Session::apply`] for each player intent. Once the board reports
//! game over both become no-ops and [`Session::is_running`] turns false.

use crate::board::{Board, Direction, LockEvent};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::*;

/// Timing knobs for a session, all in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub base_gravity_secs: f64,
    pub min_gravity_secs: f64,
    pub speed_up_step_secs: f64,
    pub level_length_secs: f64,
    pub soft_drop_gravity_secs: f64,
    pub move_first_repeat_secs: f64,
    pub move_repeat_secs: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_gravity_secs: BASE_GRAVITY_SECS,
            min_gravity_secs: MIN_GRAVITY_SECS,
            speed_up_step_secs: SPEED_UP_STEP_SECS,
            level_length_secs: LEVEL_LENGTH_SECS,
            soft_drop_gravity_secs: SOFT_DROP_GRAVITY_SECS,
            move_first_repeat_secs: MOVE_FIRST_REPEAT_SECS,
            move_repeat_secs: MOVE_REPEAT_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Gravity moved the piece down one row
    pub moved: bool,
    /// Gravity locked the piece
    pub lock: Option<LockEvent>,
    pub leveled_up: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    config: SessionConfig,
    state: RunState,
    gravity_timer: f64,
    gravity_interval: f64,
    base_interval: f64,
    level_timer: f64,
    level: u32,
    move_delay: f64,
    move_count: u32,
    soft_dropping: bool,
    /// Set on resume so the time spent paused never reaches the timers
    discard_next_delta: bool,
    last_lock: Option<LockEvent>,
}

impl Session {
    /// Start a new game with the default timing
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, SessionConfig::default())
    }

    pub fn with_config(seed: u32, config: SessionConfig) -> Self {
        Self::from_board(Board::new(seed), config)
    }

    /// Run a session on a prepared board (scripted setups, tools)
    ///
    /// Spawns the next piece if nothing is falling yet.
    pub fn from_board(mut board: Board, config: SessionConfig) -> Self {
        if board.active().is_none() && !board.is_game_over() {
            board.add_piece();
        }

        Self {
            board,
            config,
            state: RunState::Running,
            gravity_timer: 0.0,
            gravity_interval: config.base_gravity_secs,
            base_interval: config.base_gravity_secs,
            level_timer: config.level_length_secs,
            level: 0,
            move_delay: 0.0,
            move_count: 0,
            soft_dropping: false,
            discard_next_delta: false,
            last_lock: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// False once the game is over; the frontend loop should exit
    pub fn is_running(&self) -> bool {
        !self.board.is_game_over()
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    /// Number of speed-ups so far
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn gravity_interval(&self) -> f64 {
        self.gravity_interval
    }

    pub fn base_interval(&self) -> f64 {
        self.base_interval
    }

    pub fn gravity_timer(&self) -> f64 {
        self.gravity_timer
    }

    pub fn level_timer(&self) -> f64 {
        self.level_timer
    }

    pub fn move_delay(&self) -> f64 {
        self.move_delay
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    /// Take and clear the last lock event (from gravity or a hard drop).
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    /// Advance the timers by `delta_secs` and apply gravity when due
    pub fn tick(&mut self, delta_secs: f64) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.board.is_game_over() {
            outcome.game_over = true;
            return outcome;
        }
        if self.state == RunState::Paused {
            return outcome;
        }

        let dt = if self.discard_next_delta {
            self.discard_next_delta = false;
            0.0
        } else {
            delta_secs.max(0.0)
        };

        self.gravity_timer += dt;
        self.level_timer -= dt;

        // Subtract rather than reset so frame-time overrun carries over
        if self.gravity_timer > self.gravity_interval {
            self.gravity_timer -= self.gravity_interval;
            if self.board.apply_gravity() {
                self.board.add_score(LOCK_SCORE);
                let event = self.board.take_last_event();
                outcome.lock = event;
                self.last_lock = event;
            } else {
                outcome.moved = true;
                if self.board.is_touching_floor() {
                    // Extra settle time on the floor
                    self.gravity_timer -= self.gravity_interval;
                }
            }
        }

        if self.move_delay > 0.0 {
            self.move_delay = (self.move_delay - dt).max(0.0);
        }

        if self.level_timer <= 0.0 {
            self.level_up();
            outcome.leveled_up = true;
        }

        outcome.game_over = self.board.is_game_over();
        if outcome.game_over {
            log::info!("game over, final score {}", self.board.score());
        }
        outcome
    }

    fn level_up(&mut self) {
        if self.base_interval > self.config.min_gravity_secs {
            self.base_interval = (self.base_interval - self.config.speed_up_step_secs)
                .max(self.config.min_gravity_secs);
        }
        self.level += 1;
        self.gravity_interval = self.base_interval;
        self.level_timer = self.config.level_length_secs;
        log::info!(
            "level {} reached, gravity every {:.2}s",
            self.level,
            self.base_interval
        );
    }

    /// Apply a player intent. Returns whether it changed anything.
    pub fn apply(&mut self, intent: Intent) -> bool {
        if self.board.is_game_over() {
            return false;
        }

        if intent == Intent::TogglePause {
            self.toggle_pause();
            return true;
        }
        if self.state == RunState::Paused {
            return false;
        }

        match intent {
            Intent::MoveLeft => self.try_move(Direction::Left),
            Intent::MoveRight => self.try_move(Direction::Right),
            Intent::ReleaseHorizontal => {
                self.move_count = 0;
                self.move_delay = 0.0;
                true
            }
            Intent::RotateCw => {
                let rotated = self.board.rotate_piece();
                if self.board.is_touching_floor() {
                    // Fresh window after turning on the floor
                    self.gravity_timer = 0.0;
                }
                rotated
            }
            Intent::SoftDropStart => {
                self.soft_dropping = true;
                self.gravity_interval = self.config.soft_drop_gravity_secs;
                if self.gravity_timer > self.gravity_interval {
                    self.gravity_timer = self.gravity_interval;
                }
                true
            }
            Intent::SoftDropEnd => {
                self.soft_dropping = false;
                self.gravity_interval = self.base_interval;
                true
            }
            Intent::HardDrop => {
                self.board.instafall();
                self.board.add_score(HARD_DROP_SCORE);
                self.last_lock = self.board.take_last_event();
                true
            }
            Intent::TogglePause => unreachable!("handled above"),
        }
    }

    /// Horizontal move, gated by the repeat delay
    ///
    /// The first move of a hold waits `move_first_repeat_secs` before the
    /// next one is accepted, later moves wait `move_repeat_secs`. The delay
    /// applies even when the move is blocked.
    fn try_move(&mut self, dir: Direction) -> bool {
        if self.move_delay > 0.0 {
            return false;
        }

        let moved = self.board.move_piece(dir);
        self.move_delay = if self.move_count > 0 {
            self.config.move_repeat_secs
        } else {
            self.config.move_first_repeat_secs
        };
        self.move_count += 1;
        moved
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => {
                self.discard_next_delta = true;
                RunState::Running
            }
        };
        log::info!("{:?}", self.state);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.cells_into(&mut out.cells);
        out.active = self.board.active().map(ActiveSnapshot::from);
        out.ghost = self.board.ghost_shape().map(|s| *s.points());
        out.next = self.board.next_kind();
        out.score = self.board.score();
        out.level = self.level;
        out.paused = self.paused();
        out.game_over = self.board.is_game_over();
        out.seed = self.board.seed();
        out.timers = TimersSnapshot {
            gravity_secs: self.gravity_timer,
            gravity_interval_secs: self.gravity_interval,
            level_secs: self.level_timer,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
