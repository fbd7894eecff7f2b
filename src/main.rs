//! Terminal Tetris runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout). The loop runs at a fixed frame rate and
//! feeds the measured wall-clock delta to the session.

use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tetris::core::{GameSnapshot, Session};
use tetris::input::{is_pause_click, should_quit, HorizontalDirection, InputHandler};
use tetris::term::{BlockSheet, FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetris::types::Intent;

/// Play Tetris in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece randomizer (defaults to the current time).
    #[arg(short, long)]
    seed: Option<u32>,

    /// Frames per second.
    #[arg(short, long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Write logs to this file (filter with RUST_LOG, default `info`).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let sheet = BlockSheet::embedded().context("failed to load block tile sheet")?;
    let seed = args.seed.unwrap_or_else(seed_from_clock);
    log::info!("starting game with seed {seed}");

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, sheet, seed, args.fps));

    // Always try to restore terminal state.
    let _ = term.exit();

    let score = result?;
    println!("Final score: {score}");
    Ok(())
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    // stderr would draw over the alternate screen, so only log to a file.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

/// Run until quit or game over. Returns the final score.
fn run(term: &mut TerminalRenderer, sheet: BlockSheet, seed: u32, fps: u32) -> Result<u32> {
    let mut session = Session::new(seed);
    let view = GameView::new(sheet);

    let mut input_handler = InputHandler::new();
    if term.key_release_events() {
        // Real release events arrive, no need to guess.
        input_handler = input_handler.with_key_release_timeout_ms(u32::MAX);
    }

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_secs(1) / fps;
    let mut last_frame = Instant::now();

    loop {
        // Input until the next frame is due.
        let deadline = last_frame + frame;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            log::info!("quit requested, score {}", session.score());
                            return Ok(session.score());
                        }
                        if let Some(intent) = input_handler.handle_key_press(key.code) {
                            apply_intent(&mut session, &mut input_handler, intent);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(intent) = input_handler.handle_key_release(key.code) {
                            apply_intent(&mut session, &mut input_handler, intent);
                        }
                    }
                },
                Event::Mouse(mouse) if is_pause_click(mouse) => {
                    apply_intent(&mut session, &mut input_handler, Intent::TogglePause);
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        let delta = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        for intent in input_handler.update() {
            session.apply(intent);
        }
        let outcome = session.tick(delta);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if outcome.game_over || session.game_over() {
            log::info!("game over, final score {}", session.score());
            return Ok(session.score());
        }
    }
}

fn apply_intent(session: &mut Session, input_handler: &mut InputHandler, intent: Intent) {
    if intent == Intent::TogglePause {
        // Keys held across a pause would otherwise fire on resume.
        if input_handler.horizontal() != HorizontalDirection::None {
            session.apply(Intent::ReleaseHorizontal);
        }
        if input_handler.down_held() {
            session.apply(Intent::SoftDropEnd);
        }
        input_handler.reset();
    }
    session.apply(intent);
}
