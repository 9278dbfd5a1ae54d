//! Game loop / state machine.
//!
//! Owns the board, spawner, holder and score engine, and advances them one
//! fixed tick at a time via [`Game::tick`]. The caller owns the scheduler
//! loop and the input mapping; the core consumes one discrete intent per
//! tick plus the held soft-drop modifier, and reports what happened through
//! [`GameEvent`]s.
//!
//! Phases: `Spawning -> Falling <-> Locking -> Clearing -> Spawning`, with
//! `Spawning -> GameOver` terminal. Pausing freezes every timer without
//! touching any other state; the multi-tick waits (lock delay, clear
//! animation) are plain timer comparisons, so resuming picks up exactly
//! where the game left off.

use crate::config::GameConfig;
use crate::core::board::{Board, LineScan};
use crate::core::events::{EventQueue, GameEvent};
use crate::core::holder::Holder;
use crate::core::pieces::{kick_options, Tetromino, SPAWN_POSITION};
use crate::core::scoring::{fall_interval_ms, Score};
use crate::core::spawner::Spawner;
use crate::types::{PieceKind, PlayerInput, TOTAL_HEIGHT, TSpinKind};

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting to bring the next piece into play.
    Spawning,
    /// The active piece has room to fall.
    Falling,
    /// The active piece is landed and the lock timer is running.
    Locking,
    /// Waiting out the line-clear animation windows.
    Clearing,
    /// Terminal.
    GameOver,
}

/// Timer that tracks elapsed wall-clock time: it advances on every unpaused
/// tick, whatever the phase.
#[derive(Debug, Clone, Copy, Default)]
struct ContinuousTimer {
    elapsed_ms: u32,
}

impl ContinuousTimer {
    fn advance(&mut self, dt_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
    }

    fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    fn time(&self) -> u32 {
        self.elapsed_ms
    }
}

/// Timer that accumulates only when explicitly updated.
#[derive(Debug, Clone, Copy, Default)]
struct DiscreteTimer {
    elapsed_ms: u32,
}

impl DiscreteTimer {
    fn update(&mut self, dt_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
    }

    fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    fn time(&self) -> u32 {
        self.elapsed_ms
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    spawner: Spawner,
    holder: Holder,
    score: Score,
    active: Option<Tetromino>,
    phase: Phase,
    paused: bool,

    /// Current gravity delay; recomputed on level-up.
    fall_delay_ms: u32,
    fall_timer: ContinuousTimer,
    soft_dropping: bool,

    /// Auto-repeat: `move_repeat_timer` gates how long a direction must be
    /// held before repeating, `move_timer` paces the repeats.
    move_timer: ContinuousTimer,
    move_repeat_timer: DiscreteTimer,
    last_successful_move: PlayerInput,

    lock_timer: DiscreteTimer,
    lock_reset_count: u32,

    clear_timer: DiscreteTimer,
    pending_clear: Option<LineScan>,
    compacted: bool,

    /// Cells travelled under soft/hard drop for the current piece.
    soft_drop_cells: u32,
    hard_drop_cells: u32,
}

impl Game {
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let spawner = Spawner::new(&config, seed);
        let holder = Holder::new(&config);
        let score = Score::new(&config);
        let fall_delay_ms = fall_interval_ms(config.start_level);
        Self {
            config,
            board: Board::new(),
            spawner,
            holder,
            score,
            active: None,
            phase: Phase::Spawning,
            paused: false,
            fall_delay_ms,
            fall_timer: ContinuousTimer::default(),
            soft_dropping: false,
            move_timer: ContinuousTimer::default(),
            move_repeat_timer: DiscreteTimer::default(),
            last_successful_move: PlayerInput::None,
            lock_timer: DiscreteTimer::default(),
            lock_reset_count: 0,
            clear_timer: DiscreteTimer::default(),
            pending_clear: None,
            compacted: false,
            soft_drop_cells: 0,
            hard_drop_cells: 0,
        }
    }

    /// Advance the game by one tick.
    ///
    /// `input` is the single intent for this tick (held movement keys are
    /// delivered every tick; the core does its own auto-repeat gating),
    /// `soft_drop` is the held soft-drop modifier, `dt_ms` the elapsed time
    /// since the previous tick.
    pub fn tick(&mut self, input: PlayerInput, soft_drop: bool, dt_ms: u32) -> EventQueue {
        let mut events = EventQueue::new();

        if input == PlayerInput::Pause {
            self.paused = !self.paused;
            return events;
        }
        if self.paused || self.phase == Phase::GameOver {
            return events;
        }

        self.soft_dropping = soft_drop;
        self.fall_timer.advance(dt_ms);
        self.move_timer.advance(dt_ms);

        if self.phase == Phase::Clearing {
            self.tick_clearing(dt_ms);
            return events;
        }
        if self.phase == Phase::Spawning {
            self.tick_spawning(&mut events);
        }
        if matches!(self.phase, Phase::Falling | Phase::Locking) {
            self.tick_active(input, dt_ms, &mut events);
        }
        events
    }

    // ---- queries -----------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access: a setup hook for scripted scenarios. Gameplay
    /// itself only mutates the board through lock and compaction.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn held_piece(&self) -> Option<PieceKind> {
        self.holder.held_kind()
    }

    pub fn can_swap(&self) -> bool {
        self.holder.can_swap()
    }

    /// Upcoming pieces, soonest first.
    pub fn preview(&self) -> &[PieceKind] {
        self.spawner.preview()
    }

    /// Anchor position where the active piece would rest, for ghost
    /// rendering.
    pub fn ghost_position(&self) -> Option<(i8, i8)> {
        self.active
            .map(|piece| (piece.x, ghost_y_for(&self.board, &piece)))
    }

    /// Current gravity delay in milliseconds.
    pub fn fall_delay_ms(&self) -> u32 {
        self.fall_delay_ms
    }

    // ---- spawning ----------------------------------------------------------

    fn tick_spawning(&mut self, events: &mut EventQueue) {
        // With a zero-ish lock delay (classic rules) the next piece waits
        // for the gravity cadence instead of appearing instantly.
        if self.config.lock_delay_ms <= 100 && self.fall_timer.time() < self.fall_delay_ms {
            return;
        }

        if self.board.is_topped_out() {
            self.phase = Phase::GameOver;
            events.push(GameEvent::GameOver);
            return;
        }

        let kind = self.spawner.next_piece();
        self.activate(Tetromino::spawn(kind));
    }

    /// Install `piece` as the active piece, resetting all per-piece state.
    fn activate(&mut self, mut piece: Tetromino) {
        self.soft_drop_cells = 0;
        self.hard_drop_cells = 0;
        self.fall_timer.reset();
        self.lock_timer.reset();
        self.lock_reset_count = 0;
        self.last_successful_move = PlayerInput::None;

        // A tall stack pushes the spawn upward into the hidden rows. The
        // topped-out check has already passed, so this terminates.
        let cells = piece.cells();
        let mut nudges = 0u8;
        while !self.board.is_valid_placement(&cells, piece.x, piece.y) {
            piece.y += 1;
            nudges += 1;
            assert!(nudges <= TOTAL_HEIGHT, "spawn nudge escaped the grid");
        }

        self.active = Some(piece);
        self.phase = Phase::Falling;
    }

    // ---- the falling / locking tick ---------------------------------------

    fn tick_active(&mut self, input: PlayerInput, dt_ms: u32, events: &mut EventQueue) {
        let mut successful_movement = false;
        let mut hard_dropped = false;

        match input {
            PlayerInput::None | PlayerInput::Pause => self.move_repeat_timer.reset(),
            PlayerInput::HardDrop => {
                if let Some(mut piece) = self.active {
                    let ghost_y = ghost_y_for(&self.board, &piece);
                    self.hard_drop_cells = (piece.y - ghost_y) as u32;
                    piece.y = ghost_y;
                    self.active = Some(piece);
                    self.last_successful_move = PlayerInput::HardDrop;
                    hard_dropped = true;
                }
                self.move_repeat_timer.reset();
            }
            PlayerInput::Swap => {
                self.move_repeat_timer.reset();
                if self.holder.can_swap() {
                    let outgoing = self.active.take();
                    match self.holder.swap(outgoing) {
                        Some(mut released) => {
                            released.x = SPAWN_POSITION.0;
                            released.y = SPAWN_POSITION.1;
                            self.activate(released);
                        }
                        None => {
                            // Nothing was in reserve; spawn fresh next tick.
                            self.phase = Phase::Spawning;
                            return;
                        }
                    }
                }
            }
            PlayerInput::Left
            | PlayerInput::Right
            | PlayerInput::RotateLeft
            | PlayerInput::RotateRight => {
                // First press acts immediately. A held direction then waits
                // out the repeat delay before repeating at the repeat rate.
                if self.move_repeat_timer.time() == 0 {
                    successful_movement = self.handle_movement(input);
                    if successful_movement {
                        self.last_successful_move = input;
                        self.move_timer.reset();
                    }
                    self.move_repeat_timer.update(dt_ms);
                } else if self.move_repeat_timer.time() >= self.config.repeat_delay_ms {
                    if self.move_timer.time() > self.config.repeat_rate_ms {
                        successful_movement = self.handle_movement(input);
                        if successful_movement {
                            self.last_successful_move = input;
                            self.move_timer.reset();
                        }
                    }
                } else {
                    self.move_repeat_timer.update(dt_ms);
                }
            }
        }

        if self.active.is_none() {
            return;
        }

        if !self.piece_landed() {
            self.phase = Phase::Falling;
            let gravity_delay_ms = if self.soft_dropping {
                // Held soft drop falls at a quarter of the repeat rate.
                self.config.repeat_rate_ms / 4
            } else {
                self.fall_delay_ms
            };
            if self.fall_timer.time() > gravity_delay_ms {
                if let Some(mut piece) = self.active {
                    piece.y -= 1;
                    self.active = Some(piece);
                }
                self.last_successful_move = PlayerInput::None;
                self.fall_timer.reset();
                self.soft_drop_cells = if self.soft_dropping {
                    self.soft_drop_cells + 1
                } else {
                    0
                };
            } else if !self.soft_dropping {
                self.soft_drop_cells = 0;
            }
        } else {
            self.phase = Phase::Locking;
            if successful_movement && self.lock_reset_count < self.config.lock_reset_cap {
                self.lock_timer.reset();
                self.lock_reset_count += 1;
            } else {
                self.lock_timer.update(dt_ms);
            }
        }

        if hard_dropped
            || (self.piece_landed() && self.lock_timer.time() > self.config.lock_delay_ms)
        {
            self.lock_active_piece(events);
        }
    }

    fn handle_movement(&mut self, input: PlayerInput) -> bool {
        match input {
            PlayerInput::Right => self.translate_active(1),
            PlayerInput::Left => self.translate_active(-1),
            PlayerInput::RotateRight => self.rotate_active(-1),
            PlayerInput::RotateLeft => self.rotate_active(1),
            _ => false,
        }
    }

    /// Try to shift the active piece horizontally. A collision rejects the
    /// move and leaves the piece untouched.
    fn translate_active(&mut self, dir: i8) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };
        piece.x += dir;
        if !self.board.is_valid_placement(&piece.cells(), piece.x, piece.y) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Try to rotate the active piece, consulting the kick table when the
    /// bare rotation collides. On failure nothing persists.
    fn rotate_active(&mut self, delta: i8) -> bool {
        let Some(original) = self.active else {
            return false;
        };
        let mut piece = original;
        piece.rotate(delta);

        if self.board.is_valid_placement(&piece.cells(), piece.x, piece.y) {
            self.active = Some(piece);
            return true;
        }

        if self.config.kick {
            for &(dx, dy) in kick_options(piece.kind, piece.previous_rotation, piece.rotation) {
                let (kx, ky) = (original.x + dx, original.y + dy);
                if self.board.is_valid_placement(&piece.cells(), kx, ky) {
                    piece.x = kx;
                    piece.y = ky;
                    self.active = Some(piece);
                    return true;
                }
            }
        }

        false
    }

    // ---- landing, locking, clearing ---------------------------------------

    /// Landed means zero rows of fall remain. A piece below its own ghost is
    /// a driving bug, not a game state.
    fn piece_landed(&self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let diff = piece.y - ghost_y_for(&self.board, &piece);
        if diff < 0 {
            panic!("piece has fallen below its ghost position");
        }
        diff == 0
    }

    fn lock_active_piece(&mut self, events: &mut EventQueue) {
        let Some(piece) = self.active.take() else {
            return;
        };

        // Classify before the piece's own cells reach the board.
        let tspin = self.classify_tspin(&piece);

        self.board
            .lock_piece(&piece.cells(), piece.x, piece.y, piece.kind);
        events.push(GameEvent::PieceLocked {
            cells: piece.world_cells(),
            kind: piece.kind,
        });

        // The hold slot re-arms on every lock.
        self.holder.reset();

        let scan = self.board.scan_full_rows();
        let lines_cleared = scan.full_rows.len() as u32;
        let summary =
            self.score
                .on_lock(lines_cleared, self.soft_drop_cells, self.hard_drop_cells, tspin);

        if lines_cleared > 0 {
            events.push(GameEvent::LinesCleared {
                rows: scan.full_rows.clone(),
                tspin,
                combo: summary.combo,
                back_to_back: summary.back_to_back,
                is_tetris: summary.is_tetris,
            });
            self.pending_clear = Some(scan);
            self.compacted = false;
            self.clear_timer.reset();
            self.phase = Phase::Clearing;
        } else {
            self.phase = Phase::Spawning;
        }

        if summary.leveled_up {
            self.fall_delay_ms = fall_interval_ms(self.score.level());
            events.push(GameEvent::LeveledUp {
                level: self.score.level(),
            });
        }
    }

    /// T-spin check: only a T whose last successful move was a rotation
    /// qualifies. Corners count as occupied when out of bounds.
    fn classify_tspin(&self, piece: &Tetromino) -> TSpinKind {
        if piece.kind != PieceKind::T {
            return TSpinKind::None;
        }
        if !matches!(
            self.last_successful_move,
            PlayerInput::RotateLeft | PlayerInput::RotateRight
        ) {
            return TSpinKind::None;
        }

        let occupied = |cells: [(i8, i8); 2]| {
            cells
                .iter()
                .filter(|&&(x, y)| !self.board.is_empty(x, y))
                .count()
        };
        let major = occupied(piece.t_spin_major_cells());
        let minor = occupied(piece.t_spin_minor_cells());

        if major + minor >= 3 {
            match major {
                2 => TSpinKind::Full,
                1 => TSpinKind::Mini,
                _ => TSpinKind::None,
            }
        } else {
            TSpinKind::None
        }
    }

    /// Wait out the clear animation windows: rows vanish after the clear
    /// time plus the post-clear delay, spawning resumes after the post-fall
    /// delay. Board mutation happens once, at the phase boundary.
    fn tick_clearing(&mut self, dt_ms: u32) {
        self.clear_timer.update(dt_ms);

        let compact_at = self.config.clear_time_ms + self.config.post_clear_fall_delay_ms;
        let done_at = compact_at + self.config.post_fall_spawn_delay_ms;

        if !self.compacted && self.clear_timer.time() >= compact_at {
            if let Some(scan) = self.pending_clear.take() {
                self.board.clear_and_compact(&scan);
            }
            self.compacted = true;
        }
        if self.clear_timer.time() >= done_at {
            self.phase = Phase::Spawning;
        }
    }
}

/// Lowest anchor row the piece can reach by vertical translation alone.
fn ghost_y_for(board: &Board, piece: &Tetromino) -> i8 {
    let cells = piece.cells();
    let mut y = piece.y;
    while board.is_valid_placement(&cells, piece.x, y - 1) {
        y -= 1;
    }
    y
}
