//! Score engine: points, levels, combo and back-to-back tracking.
//!
//! A stateful accumulator fed once per lock event. Two policies:
//!
//! - **Classic**: `(level + 1) * table[lines] + soft_drop + hard_drop`.
//! - **Modern**: a packed clear-type index selects base points from the
//!   t-spin-aware table; back-to-back multiplies the base by 3/2 when two
//!   consecutive clearing locks were "difficult"; a combo bonus scales with
//!   level and the length of the clearing streak.
//!
//! Banner-worthy outcomes (Tetris, t-spin, back-to-back, combo) are returned
//! in the [`ClearSummary`] for the presentation layer; nothing here renders.

use crate::config::{GameConfig, ScorePolicy};
use crate::types::{
    TSpinKind, B2B_DENOMINATOR, B2B_NUMERATOR, CLASSIC_LINE_POINTS, COMBO_BONUS,
    MODERN_LINE_POINTS,
};

/// What one lock event did to the score state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearSummary {
    pub lines_cleared: u32,
    pub tspin: TSpinKind,
    /// Whether the back-to-back multiplier applied to this clear.
    pub back_to_back: bool,
    /// Combo counter after this lock; -1 means no active combo.
    pub combo: i32,
    pub is_tetris: bool,
    pub leveled_up: bool,
    pub points_awarded: u32,
}

#[derive(Debug, Clone)]
pub struct Score {
    policy: ScorePolicy,
    score: u32,
    level: u32,
    /// Lines cleared since the last level-up, mod 10.
    level_progress: u32,
    line_total: u32,
    /// Clear counts by size (singles, doubles, triples, tetrises).
    lines_by_clear: [u32; 4],
    tspin_total: u32,
    mini_tspin_total: u32,
    /// Whether the previous clearing lock was a difficult clear.
    difficult_previous_clear: bool,
    /// Consecutive clearing locks; -1 means no active combo.
    combo: i32,
}

impl Score {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            policy: config.score_policy,
            score: 0,
            level: config.start_level,
            level_progress: 0,
            line_total: 0,
            lines_by_clear: [0; 4],
            tspin_total: 0,
            mini_tspin_total: 0,
            difficult_previous_clear: false,
            combo: -1,
        }
    }

    /// Consume one lock event.
    ///
    /// `lines_cleared` is 0..=4; `soft_drop` and `hard_drop` are cell counts
    /// travelled under each drop mode for this piece.
    pub fn on_lock(
        &mut self,
        lines_cleared: u32,
        soft_drop: u32,
        hard_drop: u32,
        tspin: TSpinKind,
    ) -> ClearSummary {
        debug_assert!(lines_cleared <= 4);

        if lines_cleared > 0 {
            self.line_total += lines_cleared;
            self.lines_by_clear[lines_cleared as usize - 1] += 1;
        }
        match tspin {
            TSpinKind::Mini => self.mini_tspin_total += 1,
            TSpinKind::Full => self.tspin_total += 1,
            TSpinKind::None => {}
        }

        let clear_type = modern_clear_type(lines_cleared, tspin);
        let back_to_back = self.check_back_to_back(clear_type, lines_cleared);

        self.combo = if lines_cleared > 0 { self.combo + 1 } else { -1 };

        let before = self.score;
        match self.policy {
            ScorePolicy::Classic => {
                self.score += (self.level + 1) * CLASSIC_LINE_POINTS[lines_cleared as usize]
                    + soft_drop
                    + hard_drop;
            }
            ScorePolicy::Modern => {
                let base = MODERN_LINE_POINTS[clear_type as usize];
                let points = if back_to_back {
                    base * B2B_NUMERATOR / B2B_DENOMINATOR
                } else {
                    base
                };
                let combo_points = COMBO_BONUS * (self.level + 1) * self.combo.max(0) as u32;
                self.score +=
                    (self.level + 1) * points + soft_drop + 2 * hard_drop + combo_points;
            }
        }

        let leveled_up = self.advance_level(lines_cleared);

        ClearSummary {
            lines_cleared,
            tspin,
            back_to_back,
            combo: self.combo,
            is_tetris: lines_cleared == 4,
            leveled_up,
            points_awarded: self.score - before,
        }
    }

    /// Back-to-back check for this clear, updating the "previous clear was
    /// difficult" flag.
    ///
    /// Non-clearing locks leave the flag untouched: a chain survives any
    /// number of locks that clear nothing and only breaks on an easy clear.
    fn check_back_to_back(&mut self, clear_type: u32, lines_cleared: u32) -> bool {
        let difficult = difficult_clear(clear_type);
        if difficult && self.difficult_previous_clear {
            return true;
        }
        if lines_cleared != 0 {
            self.difficult_previous_clear = difficult;
        }
        false
    }

    fn advance_level(&mut self, lines_cleared: u32) -> bool {
        self.level_progress += lines_cleared;
        if self.level_progress >= 10 {
            self.level_progress %= 10;
            self.level += 1;
            return true;
        }
        false
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn level_progress(&self) -> u32 {
        self.level_progress
    }

    pub fn line_total(&self) -> u32 {
        self.line_total
    }

    /// Clear counts by size: `[singles, doubles, triples, tetrises]`.
    pub fn lines_by_clear(&self) -> [u32; 4] {
        self.lines_by_clear
    }

    pub fn tspin_total(&self) -> u32 {
        self.tspin_total
    }

    pub fn mini_tspin_total(&self) -> u32 {
        self.mini_tspin_total
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    /// Whether the next difficult clear would earn the back-to-back bonus.
    pub fn back_to_back_armed(&self) -> bool {
        self.difficult_previous_clear
    }
}

/// Pack (t-spin, lines) into the modern table index: [0,4] no t-spin,
/// [5,7] mini, [8,11] full.
fn modern_clear_type(lines_cleared: u32, tspin: TSpinKind) -> u32 {
    let factor = if tspin == TSpinKind::Full { 4 } else { 5 };
    factor * tspin.index() + lines_cleared
}

/// A clear is difficult unless it is a plain sub-tetris clear or a zero-line
/// t-spin of either kind.
fn difficult_clear(clear_type: u32) -> bool {
    !(clear_type < 4 || clear_type == 5 || clear_type == 8)
}

/// Gravity delay for a level, in milliseconds.
///
/// NES-style frames-per-cell curve evaluated at 60 frames per second.
pub fn fall_interval_ms(level: u32) -> u32 {
    let frames_per_cell = match level {
        0..=8 => 48 - 5 * level,
        9 => 6,
        10..=12 => 5,
        13..=15 => 4,
        16..=18 => 3,
        19..=28 => 2,
        _ => 1,
    };
    frames_per_cell * 1000 / 60
}
