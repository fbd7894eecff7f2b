//! Scoring module - row clear points
//!
//! Every cleared row is worth a flat [`ROW_CLEAR_SCORE`]. When one lock
//! clears more than one row, each row past the first earns the same amount
//! again as a combo bonus. There is no level multiplier.
//!
//! Lock and hard-drop bonuses are flat and awarded by the session.

use crate::types::ROW_CLEAR_SCORE;

/// Points from a single lock event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearScore {
    /// `ROW_CLEAR_SCORE` per row
    pub row_score: u32,
    /// `ROW_CLEAR_SCORE` per row beyond the first
    pub combo_bonus: u32,
    pub total: u32,
}

/// Score for clearing `rows` rows with one lock
///
/// ```
/// use tetris_core::scoring::calculate_clear_score;
///
/// assert_eq!(calculate_clear_score(0).total, 0);
/// assert_eq!(calculate_clear_score(1).total, 200);
/// assert_eq!(calculate_clear_score(3).total, 1000);
/// ```
pub fn calculate_clear_score(rows: u32) -> ClearScore {
    let row_score = rows.saturating_mul(ROW_CLEAR_SCORE);
    let combo_bonus = rows.saturating_sub(1).saturating_mul(ROW_CLEAR_SCORE);
    ClearScore {
        row_score,
        combo_bonus,
        total: row_score.saturating_add(combo_bonus),
    }
}
