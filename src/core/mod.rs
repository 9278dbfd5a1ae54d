//! Core rules: pure game logic with no I/O.
//!
//! Everything here is deterministic (a seed fully determines the piece
//! sequence) and driven one fixed tick at a time by whoever owns the
//! scheduler loop.
//!
//! - [`board`]: the play-field grid, collision tests and line compaction
//! - [`pieces`]: shape tables, rotation states and wall-kick data
//! - [`spawner`]: generation policies and the preview queue
//! - [`holder`]: the hold slot
//! - [`scoring`]: points, levels, combo and back-to-back tracking
//! - [`game`]: the state machine tying it all together
//! - [`events`] / [`snapshot`]: what the core reports outward

pub mod board;
pub mod events;
pub mod game;
pub mod holder;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod spawner;

pub use board::{Board, LineScan, RowFill};
pub use events::{EventQueue, GameEvent};
pub use game::{Game, Phase};
pub use holder::Holder;
pub use pieces::Tetromino;
pub use scoring::Score;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use spawner::Spawner;
