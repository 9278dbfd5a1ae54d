//! Piece generation and the upcoming-piece queue.
//!
//! Two policies: `RandomBag` deals one copy of each shape before refilling,
//! `Reroll` draws uniformly and redraws duplicates up to a configured cap.
//! The preview queue is a FIFO sized to the configured preview count; with
//! zero previews generation happens on demand and no queue exists.

use arrayvec::ArrayVec;

use crate::config::{GameConfig, GenerationPolicy};
use crate::core::rng::GameRng;
use crate::types::PieceKind;

#[derive(Debug, Clone)]
pub struct Spawner {
    queue: ArrayVec<PieceKind, { GameConfig::MAX_PREVIEWS }>,
    queue_size: usize,
    policy: GenerationPolicy,
    max_reroll: u32,
    previous: Option<PieceKind>,
    bag: ArrayVec<PieceKind, 7>,
    rng: GameRng,
}

impl Spawner {
    pub fn new(config: &GameConfig, seed: u32) -> Self {
        let mut spawner = Self {
            queue: ArrayVec::new(),
            queue_size: config.previews(),
            policy: config.generation_policy,
            max_reroll: config.max_reroll,
            previous: None,
            bag: ArrayVec::new(),
            rng: GameRng::new(seed),
        };
        for _ in 0..spawner.queue_size {
            let kind = spawner.generate();
            spawner.queue.push(kind);
        }
        spawner
    }

    /// Dequeue the next piece to play, generating its replacement.
    pub fn next_piece(&mut self) -> PieceKind {
        if self.queue_size == 0 {
            return self.generate();
        }
        // Generate first so the reroll duplicate check sees the full queue,
        // including the piece about to leave it.
        let fresh = self.generate();
        let next = self.queue.remove(0);
        self.queue.push(fresh);
        next
    }

    /// Upcoming pieces, soonest first.
    pub fn preview(&self) -> &[PieceKind] {
        &self.queue
    }

    /// RNG state, usable as a seed to reproduce the remaining sequence.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    fn generate(&mut self) -> PieceKind {
        match self.policy {
            GenerationPolicy::Reroll => {
                let mut kind = self.random_kind();
                let mut reroll = 0;
                while reroll < self.max_reroll
                    && (Some(kind) == self.previous || self.queue.contains(&kind))
                {
                    kind = self.random_kind();
                    reroll += 1;
                }
                self.previous = Some(kind);
                kind
            }
            GenerationPolicy::RandomBag => {
                if self.bag.is_empty() {
                    self.bag = ArrayVec::from(PieceKind::ALL);
                }
                let idx = self.rng.pick_index(self.bag.len());
                self.bag.remove(idx)
            }
        }
    }

    fn random_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.pick_index(PieceKind::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(policy: GenerationPolicy, previews: usize, max_reroll: u32) -> GameConfig {
        GameConfig {
            generation_policy: policy,
            num_previews: previews,
            max_reroll,
            ..GameConfig::modern()
        }
    }

    #[test]
    fn bag_deals_each_shape_once_per_seven() {
        let config = config_with(GenerationPolicy::RandomBag, 0, 1);
        let mut spawner = Spawner::new(&config, 1234);
        for round in 0..4 {
            let mut seen = [false; 7];
            for _ in 0..7 {
                seen[spawner.next_piece().index()] = true;
            }
            assert!(seen.iter().all(|&s| s), "round {round} missed a shape");
        }
    }

    #[test]
    fn queue_holds_configured_preview_count() {
        for previews in 0..=5 {
            let config = config_with(GenerationPolicy::RandomBag, previews, 1);
            let spawner = Spawner::new(&config, 7);
            assert_eq!(spawner.preview().len(), previews);
        }
    }

    #[test]
    fn preview_count_is_capped() {
        let config = config_with(GenerationPolicy::RandomBag, 8, 1);
        let spawner = Spawner::new(&config, 7);
        assert_eq!(spawner.preview().len(), GameConfig::MAX_PREVIEWS);
    }

    #[test]
    fn queue_head_is_the_next_piece() {
        let config = config_with(GenerationPolicy::RandomBag, 5, 1);
        let mut spawner = Spawner::new(&config, 99);
        for _ in 0..20 {
            let head = spawner.preview()[0];
            assert_eq!(spawner.next_piece(), head);
            assert_eq!(spawner.preview().len(), 5);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let config = config_with(GenerationPolicy::RandomBag, 3, 1);
        let mut a = Spawner::new(&config, 555);
        let mut b = Spawner::new(&config, 555);
        for _ in 0..30 {
            assert_eq!(a.next_piece(), b.next_piece());
        }
    }

    #[test]
    fn reroll_avoids_previous_and_queued_when_budget_allows() {
        // With a huge reroll budget every draw must dodge both the previous
        // draw and everything pending in the preview queue.
        let config = config_with(GenerationPolicy::Reroll, 5, 100);
        let mut spawner = Spawner::new(&config, 42);
        let mut previous: Option<PieceKind> = None;
        for _ in 0..200 {
            let pending: Vec<PieceKind> = spawner.preview().to_vec();
            let next = spawner.next_piece();
            assert_eq!(next, pending[0]);
            if let Some(prev) = previous {
                assert_ne!(next, prev);
            }
            previous = Some(next);
        }
    }

    #[test]
    fn reroll_cap_zero_accepts_first_draw() {
        // With no reroll budget duplicates must slip through eventually.
        let config = config_with(GenerationPolicy::Reroll, 0, 0);
        let mut spawner = Spawner::new(&config, 13);
        let mut saw_duplicate = false;
        let mut previous = spawner.next_piece();
        for _ in 0..200 {
            let next = spawner.next_piece();
            if next == previous {
                saw_duplicate = true;
                break;
            }
            previous = next;
        }
        assert!(saw_duplicate, "uniform draws should repeat within 200 tries");
    }
}
