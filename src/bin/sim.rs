//! Headless simulation driver.
//!
//! Runs the rules engine under a scripted input pattern for a fixed number
//! of ticks and prints what happened. Useful for eyeballing determinism and
//! scoring without any frontend:
//!
//! ```text
//! quadris-sim [seed] [ticks] [classic|modern]
//! ```

use anyhow::{bail, Context, Result};

use quadris::config::GameConfig;
use quadris::core::{Game, GameEvent, Phase};
use quadris::types::PlayerInput;

const TICK_MS: u32 = 16;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);

    let seed: u32 = match args.next() {
        Some(raw) => raw.parse().context("seed must be an integer")?,
        None => 1,
    };
    let ticks: u32 = match args.next() {
        Some(raw) => raw.parse().context("tick count must be an integer")?,
        None => 20_000,
    };
    let config = match args.next().as_deref() {
        Some("classic") => GameConfig::classic(),
        Some("modern") | None => GameConfig::modern(),
        Some(other) => bail!("unknown rule set {other:?}, expected classic or modern"),
    };

    let mut game = Game::new(config, seed);
    for t in 0..ticks {
        let events = game.tick(scripted_input(t), t % 13 == 0, TICK_MS);
        for event in &events {
            report(t, event);
        }
        if game.game_over() {
            break;
        }
    }

    let score = game.score();
    println!(
        "seed {seed}: score {} level {} lines {} ({})",
        score.score(),
        score.level(),
        score.line_total(),
        if game.phase() == Phase::GameOver {
            "topped out"
        } else {
            "still running"
        }
    );
    Ok(())
}

/// A fixed input loop: shuffle sideways, rotate, then slam the piece down.
fn scripted_input(t: u32) -> PlayerInput {
    match t % 23 {
        0 | 2 | 4 => PlayerInput::Left,
        7 => PlayerInput::RotateLeft,
        10 | 12 => PlayerInput::Right,
        15 => PlayerInput::RotateRight,
        21 => PlayerInput::HardDrop,
        _ => PlayerInput::None,
    }
}

fn report(t: u32, event: &GameEvent) {
    match event {
        GameEvent::PieceLocked { kind, .. } => {
            println!("[{t:>6}] locked {}", kind.as_str());
        }
        GameEvent::LinesCleared {
            rows,
            tspin,
            combo,
            back_to_back,
            is_tetris,
        } => {
            println!(
                "[{t:>6}] cleared {:?} (tspin {tspin:?}, combo {combo}, b2b {back_to_back}, tetris {is_tetris})",
                rows.as_slice()
            );
        }
        GameEvent::LeveledUp { level } => println!("[{t:>6}] level {level}"),
        GameEvent::GameOver => println!("[{t:>6}] game over"),
    }
}
