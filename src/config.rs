//! Game configuration.
//!
//! The caller owns a [`GameConfig`] and hands it to the core at construction;
//! the core never mutates it. The `classic()` and `modern()` constructors
//! mirror the two preset rule sets, `Default` is the custom-mode baseline
//! (identical to modern).

use serde::{Deserialize, Serialize};

/// Piece generation policy.
///
/// `Reroll` draws uniformly and redraws duplicates a bounded number of times;
/// `RandomBag` deals one copy of each of the 7 shapes before reshuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationPolicy {
    Reroll,
    RandomBag,
}

/// Scoring policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScorePolicy {
    Classic,
    Modern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Whether blocked rotations may try wall-kick translations.
    pub kick: bool,
    /// Grace period between landing and locking, in milliseconds.
    pub lock_delay_ms: u32,
    /// How many successful movements may reset the lock timer per piece.
    /// [`GameConfig::UNLIMITED_LOCK_RESETS`] disables the cap.
    pub lock_reset_cap: u32,
    /// Number of preview slots (capped at [`GameConfig::MAX_PREVIEWS`]).
    /// Zero means pieces are generated on demand with no queue.
    pub num_previews: usize,
    /// Maximum redraws under the reroll generation policy.
    pub max_reroll: u32,
    pub generation_policy: GenerationPolicy,
    /// Whether the hold slot is available at all.
    pub hold_enabled: bool,
    /// Whether a held piece keeps its rotation or resets to spawn state.
    pub preserve_rotation: bool,
    pub score_policy: ScorePolicy,
    pub start_level: u32,
    /// Auto-repeat delay: how long a direction must be held before it
    /// repeats, in milliseconds.
    pub repeat_delay_ms: u32,
    /// Auto-repeat rate: interval between repeated movements while held.
    pub repeat_rate_ms: u32,
    /// Nominal duration of the line-clear animation the presentation layer
    /// plays; the core withholds spawning until it elapses.
    pub clear_time_ms: u32,
    /// Delay between the clear animation and the stack falling.
    pub post_clear_fall_delay_ms: u32,
    /// Delay between the stack falling and the next spawn.
    pub post_fall_spawn_delay_ms: u32,
}

impl GameConfig {
    /// Visible preview slots are capped at five.
    pub const MAX_PREVIEWS: usize = 5;

    /// Sentinel for an uncapped lock-reset budget.
    pub const UNLIMITED_LOCK_RESETS: u32 = u32::MAX;

    /// Modern preset: wall kicks, 7-bag, hold, five previews, modern scoring.
    pub fn modern() -> Self {
        Self {
            kick: true,
            lock_delay_ms: 500,
            lock_reset_cap: 15,
            num_previews: 5,
            max_reroll: 1,
            generation_policy: GenerationPolicy::RandomBag,
            hold_enabled: true,
            preserve_rotation: false,
            score_policy: ScorePolicy::Modern,
            start_level: 0,
            repeat_delay_ms: 170,
            repeat_rate_ms: 80,
            clear_time_ms: 250,
            post_clear_fall_delay_ms: 500,
            post_fall_spawn_delay_ms: 250,
        }
    }

    /// Classic preset: no kicks, no hold, reroll generation, a single
    /// preview, zero lock delay and classic scoring.
    pub fn classic() -> Self {
        Self {
            kick: false,
            lock_delay_ms: 0,
            lock_reset_cap: Self::UNLIMITED_LOCK_RESETS,
            num_previews: 1,
            generation_policy: GenerationPolicy::Reroll,
            hold_enabled: false,
            score_policy: ScorePolicy::Classic,
            ..Self::modern()
        }
    }

    /// Effective preview count after clamping to the visible slots.
    pub fn previews(&self) -> usize {
        self.num_previews.min(Self::MAX_PREVIEWS)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::modern()
    }
}
