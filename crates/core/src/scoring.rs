//! Scoring module - line clear points, drop points, level and gravity curve
//!
//! - Line clears pay `LINE_SCORES[lines] * level`, with the level in force
//!   when the piece locked.
//! - Soft drop pays per manual step, hard drop per row travelled.
//! - Level is `lines / 10 + 1`; gravity speeds up by a fixed step per level
//!   down to a floor.

use crate::types::{
    HARD_DROP_POINTS, INITIAL_FALL_MS, LEVEL_SPEED_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
    MIN_FALL_MS, SOFT_DROP_POINTS,
};

/// Calculate line clear score
/// lines: number of lines cleared in one lock
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Calculate drop score (soft drop or hard drop)
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell)
}

/// Level reached after `total_lines` cleared lines
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval (milliseconds per row) at a level
pub fn fall_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(LEVEL_SPEED_STEP_MS);
    INITIAL_FALL_MS.saturating_sub(reduction).max(MIN_FALL_MS)
}
