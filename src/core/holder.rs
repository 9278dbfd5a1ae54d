//! Hold slot: a single-piece reserve with one swap per locked piece.

use crate::config::GameConfig;
use crate::core::pieces::Tetromino;
use crate::types::PieceKind;

#[derive(Debug, Clone)]
pub struct Holder {
    held: Option<Tetromino>,
    /// Set when a swap happens; cleared only when a piece locks.
    swap_used: bool,
    enabled: bool,
    preserve_rotation: bool,
}

impl Holder {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            held: None,
            swap_used: false,
            enabled: config.hold_enabled,
            preserve_rotation: config.preserve_rotation,
        }
    }

    /// Whether a swap would be accepted right now.
    pub fn can_swap(&self) -> bool {
        self.enabled && !self.swap_used
    }

    /// Store `incoming` and return whatever was in reserve.
    ///
    /// If holding is disabled, a swap already happened since the last lock,
    /// or there is nothing to store, the incoming piece is handed back
    /// untouched and no state changes.
    pub fn swap(&mut self, incoming: Option<Tetromino>) -> Option<Tetromino> {
        let Some(mut piece) = incoming else {
            return None;
        };
        if !self.can_swap() {
            return Some(piece);
        }
        self.swap_used = true;
        if !self.preserve_rotation {
            piece.reset_rotation();
        }
        let released = self.held.take();
        self.held = Some(piece);
        released
    }

    /// Re-arm the slot after a lock event.
    pub fn reset(&mut self) {
        self.swap_used = false;
    }

    pub fn held_kind(&self) -> Option<PieceKind> {
        self.held.map(|piece| piece.kind)
    }
}
