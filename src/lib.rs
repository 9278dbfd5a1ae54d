//! quadris — the rules engine of a falling-block puzzle game.
//!
//! This crate is the authoritative model of the play-field, piece
//! kinematics, locking, line clearing, generation, hold and scoring. It
//! renders nothing and reads no input devices: a presentation layer drives
//! it with one intent per tick and mirrors the returned events.
//!
//! ```
//! use quadris::config::GameConfig;
//! use quadris::core::Game;
//! use quadris::types::PlayerInput;
//!
//! let mut game = Game::new(GameConfig::modern(), 12345);
//! // One 16 ms frame with no input: the first piece spawns and starts
//! // falling.
//! let events = game.tick(PlayerInput::None, false, 16);
//! assert!(events.is_empty());
//! assert!(game.active().is_some());
//! ```

pub mod config;
pub mod core;
pub mod types;
