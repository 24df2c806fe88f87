//! Puzzle session
//!
//! One player working one level at a time:
//! - Loads levels from a catalog and navigates with wraparound
//! - Moves pieces between hand and board through a single held piece
//! - Fires and clears the beam, evaluating the win on each activation
//!
//! All state changes go through methods here. Rejected moves return a
//! [`MoveError`] and leave the session untouched.

use std::collections::VecDeque;
use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::beam::{BeamPattern, TraceStats, trace_beam};
use super::board::{Board, CellPos, Hand};
use super::piece::{Piece, Rotation};
use super::win::is_solved;
use crate::consts::{HAND_SLOTS, MAX_PENDING_EVENTS};
use crate::levels::{BuiltinLevels, Level, LevelCatalog};
use crate::settings::Settings;

/// Interaction phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Pieces may be moved and rotated
    #[default]
    Idle,
    /// Beam is showing; the board is frozen until it is cleared
    BeamActive,
}

/// A board cell or hand slot as addressed by the player.
///
/// Indices are unchecked; the session rejects anything out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Board { row: usize, col: usize },
    Hand(usize),
}

impl Slot {
    pub fn cell(row: usize, col: usize) -> Slot {
        Slot::Board { row, col }
    }

    pub fn hand(index: usize) -> Slot {
        Slot::Hand(index)
    }
}

impl From<CellPos> for Slot {
    fn from(pos: CellPos) -> Self {
        Slot::cell(pos.row, pos.col)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Board { row, col } => write!(f, "cell ({row}, {col})"),
            Slot::Hand(i) => write!(f, "hand slot {i}"),
        }
    }
}

/// Why a request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("{0} is out of bounds")]
    OutOfBounds(Slot),

    #[error("{0} holds a locked piece")]
    Locked(Slot),

    #[error("{0} is empty")]
    EmptySource(Slot),

    #[error("{0} is already occupied")]
    Occupied(Slot),

    #[error("no piece is held")]
    NothingHeld,

    #[error("a piece is already held")]
    AlreadyHolding,

    #[error("the beam is active; clear it first")]
    BeamActive,

    #[error("the beam is not active")]
    BeamInactive,

    #[error("put the held piece down first")]
    HoldingPiece,

    #[error("level {0} does not exist")]
    NoSuchLevel(usize),
}

/// Something the presentation may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LevelLoaded { number: usize },
    PiecePicked { from: Slot, piece: Piece },
    PieceRotated { at: Option<Slot>, piece: Piece },
    /// `returned` is set when the piece went back where it came from
    PieceDropped {
        at: Slot,
        piece: Piece,
        returned: bool,
    },
    BeamFired { solved: bool },
    BeamCleared,
}

/// A single player request, for driving the session from input handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    NextLevel,
    PreviousLevel,
    GoToLevel(usize),
    Restart,
    PickUp(Slot),
    Rotate(Slot, Rotation),
    RotateHeld(Rotation),
    Drop(Slot),
    /// Let go of the held piece, over `Slot` or over nothing
    Release(Option<Slot>),
    FireBeam,
    ClearBeam,
}

/// The piece in the player's grip and where it was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldPiece {
    pub piece: Piece,
    pub origin: Slot,
}

/// A validated slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Place {
    Cell(CellPos),
    Hand(usize),
}

impl Place {
    fn resolve(slot: Slot) -> Result<Place, MoveError> {
        match slot {
            Slot::Board { row, col } => CellPos::new(row, col)
                .map(Place::Cell)
                .ok_or(MoveError::OutOfBounds(slot)),
            Slot::Hand(i) if i < HAND_SLOTS => Ok(Place::Hand(i)),
            Slot::Hand(_) => Err(MoveError::OutOfBounds(slot)),
        }
    }

    fn slot(self) -> Slot {
        match self {
            Place::Cell(pos) => pos.into(),
            Place::Hand(i) => Slot::Hand(i),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Held {
    piece: Piece,
    origin: Place,
}

fn reject<T>(err: MoveError) -> Result<T, MoveError> {
    log::debug!("Move rejected: {err}");
    Err(err)
}

/// Complete state of a play session
#[derive(Debug, Clone)]
pub struct Session<C: LevelCatalog = BuiltinLevels> {
    catalog: C,
    level_number: usize,
    level: Level,
    board: Board,
    hand: Hand,
    held: Option<Held>,
    pattern: BeamPattern,
    phase: SessionPhase,
    /// Verdict of the current activation
    solved: Option<bool>,
    /// Set once the current level has been solved; reset on navigation
    cleared: bool,
    last_trace: Option<TraceStats>,
    seed: u64,
    rng: Pcg32,
    passes: u32,
    max_steps: u32,
    /// Pending until drained; only the newest `MAX_PENDING_EVENTS` are kept
    events: VecDeque<SessionEvent>,
}

impl Session<BuiltinLevels> {
    /// Start a session on the built-in levels
    pub fn new(settings: &Settings) -> Result<Self, MoveError> {
        Self::with_catalog(BuiltinLevels, settings)
    }
}

impl<C: LevelCatalog> Session<C> {
    /// Start a session on `catalog` at `settings.start_level`
    pub fn with_catalog(catalog: C, settings: &Settings) -> Result<Self, MoveError> {
        let number = settings.start_level;
        let Some(level) = catalog.level(number) else {
            return reject(MoveError::NoSuchLevel(number));
        };
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Session seed {seed}");

        let mut session = Self {
            catalog,
            level_number: number,
            level,
            board: Board::from_puzzle(&level.puzzle),
            hand: level.hand,
            held: None,
            pattern: BeamPattern::new(),
            phase: SessionPhase::Idle,
            solved: None,
            cleared: false,
            last_trace: None,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            passes: settings.passes_per_activation.max(1),
            max_steps: settings.max_steps_per_pass.max(1),
            events: VecDeque::new(),
        };
        session.install(number, level);
        Ok(session)
    }

    // === Accessors ===

    pub fn level_number(&self) -> usize {
        self.level_number
    }

    pub fn level_count(&self) -> usize {
        self.catalog.level_count()
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn held(&self) -> Option<HeldPiece> {
        self.held.map(|h| HeldPiece {
            piece: h.piece,
            origin: h.origin.slot(),
        })
    }

    /// Beam flags from the last activation; clear while idle
    pub fn pattern(&self) -> &BeamPattern {
        &self.pattern
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Win verdict while the beam is active, `None` otherwise
    pub fn solved(&self) -> Option<bool> {
        self.solved
    }

    /// Whether this level has been solved since it was loaded
    pub fn cleared(&self) -> bool {
        self.cleared
    }

    pub fn last_trace(&self) -> Option<TraceStats> {
        self.last_trace
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Take all events raised since the last drain.
    ///
    /// Callers that want every event must drain after each action; when more
    /// than `MAX_PENDING_EVENTS` pile up the oldest are discarded.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    fn emit(&mut self, event: SessionEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// The level's solution as a board, for a "show answer" view
    pub fn reveal_solution(&self) -> Board {
        Board::from_layout(&self.level.solution)
    }

    // === Navigation ===

    /// Load level `number`, discarding all progress on the current one
    pub fn go_to_level(&mut self, number: usize) -> Result<(), MoveError> {
        match self.catalog.level(number) {
            Some(level) => {
                self.install(number, level);
                Ok(())
            }
            None => reject(MoveError::NoSuchLevel(number)),
        }
    }

    pub fn next_level(&mut self) -> Result<(), MoveError> {
        self.go_to_level(self.catalog.next_number(self.level_number))
    }

    pub fn previous_level(&mut self) -> Result<(), MoveError> {
        self.go_to_level(self.catalog.previous_number(self.level_number))
    }

    /// Reload the current level from scratch
    pub fn restart_level(&mut self) -> Result<(), MoveError> {
        self.go_to_level(self.level_number)
    }

    fn install(&mut self, number: usize, level: Level) {
        if let Some(held) = self.held.take() {
            log::debug!("Discarding held {:?} on level change", held.piece);
        }
        self.level_number = number;
        self.level = level;
        self.board = Board::from_puzzle(&level.puzzle);
        self.hand = level.hand;
        self.pattern.clear();
        self.phase = SessionPhase::Idle;
        self.solved = None;
        self.cleared = false;
        self.last_trace = None;
        log::info!("Loaded level {number}/{}", self.catalog.level_count());
        self.emit(SessionEvent::LevelLoaded { number });
    }

    // === Piece handling ===

    fn ensure_editing(&self) -> Result<(), MoveError> {
        match self.phase {
            SessionPhase::Idle => Ok(()),
            SessionPhase::BeamActive => reject(MoveError::BeamActive),
        }
    }

    fn piece_in(&self, place: Place) -> Piece {
        match place {
            Place::Cell(pos) => self.board.piece(pos),
            Place::Hand(i) => self.hand[i],
        }
    }

    fn put(&mut self, place: Place, piece: Piece) {
        match place {
            Place::Cell(pos) => self.board.set_piece(pos, piece),
            Place::Hand(i) => self.hand[i] = piece,
        }
    }

    fn is_locked(&self, place: Place) -> bool {
        match place {
            Place::Cell(pos) => self.board.cell(pos).locked,
            Place::Hand(_) => false,
        }
    }

    /// Lift the piece at `slot` into the player's grip
    pub fn pick_up(&mut self, slot: Slot) -> Result<Piece, MoveError> {
        self.ensure_editing()?;
        if self.held.is_some() {
            return reject(MoveError::AlreadyHolding);
        }
        let place = Place::resolve(slot).or_else(reject)?;
        if self.is_locked(place) {
            return reject(MoveError::Locked(slot));
        }
        let piece = self.piece_in(place);
        if piece.is_empty() {
            return reject(MoveError::EmptySource(slot));
        }

        self.put(place, Piece::Empty);
        self.held = Some(Held {
            piece,
            origin: place,
        });
        self.emit(SessionEvent::PiecePicked { from: slot, piece });
        Ok(piece)
    }

    /// Rotate the piece resting at `slot`.
    ///
    /// An empty slot is accepted and left as it is, with no event raised.
    pub fn rotate_at(&mut self, slot: Slot, rotation: Rotation) -> Result<Piece, MoveError> {
        self.ensure_editing()?;
        if self.held.is_some() {
            return reject(MoveError::AlreadyHolding);
        }
        let place = Place::resolve(slot).or_else(reject)?;
        if self.is_locked(place) {
            return reject(MoveError::Locked(slot));
        }
        let current = self.piece_in(place);
        if current.is_empty() {
            return Ok(current);
        }
        let piece = current.rotated(rotation);
        self.put(place, piece);
        self.emit(SessionEvent::PieceRotated {
            at: Some(slot),
            piece,
        });
        Ok(piece)
    }

    /// Rotate the piece in the player's grip
    pub fn rotate_held(&mut self, rotation: Rotation) -> Result<Piece, MoveError> {
        self.ensure_editing()?;
        let Some(held) = self.held.as_mut() else {
            return reject(MoveError::NothingHeld);
        };
        held.piece = held.piece.rotated(rotation);
        let piece = held.piece;
        self.emit(SessionEvent::PieceRotated { at: None, piece });
        Ok(piece)
    }

    /// Put the held piece into the empty `slot`. On refusal the piece stays held.
    pub fn drop_at(&mut self, slot: Slot) -> Result<(), MoveError> {
        self.ensure_editing()?;
        let Some(held) = self.held else {
            return reject(MoveError::NothingHeld);
        };
        let place = Place::resolve(slot).or_else(reject)?;
        if !self.piece_in(place).is_empty() {
            return reject(MoveError::Occupied(slot));
        }
        self.place_held(held, place);
        Ok(())
    }

    /// Let go of the held piece over `target`.
    ///
    /// Lands on `target` when it is a valid empty slot, otherwise goes back
    /// to where it was picked up. Returns the slot it ended in.
    pub fn release(&mut self, target: Option<Slot>) -> Result<Slot, MoveError> {
        self.ensure_editing()?;
        let Some(held) = self.held else {
            return reject(MoveError::NothingHeld);
        };
        let landing = target
            .and_then(|slot| Place::resolve(slot).ok())
            .filter(|&place| self.piece_in(place).is_empty())
            .unwrap_or_else(|| {
                log::debug!("No valid drop target; returning {:?} to origin", held.piece);
                held.origin
            });
        self.place_held(held, landing);
        Ok(landing.slot())
    }

    fn place_held(&mut self, held: Held, place: Place) {
        self.put(place, held.piece);
        self.held = None;
        self.emit(SessionEvent::PieceDropped {
            at: place.slot(),
            piece: held.piece,
            returned: place == held.origin,
        });
    }

    // === Beam ===

    /// Trace the beam and judge the board. Returns the win verdict.
    pub fn fire_beam(&mut self) -> Result<bool, MoveError> {
        self.ensure_editing()?;
        if self.held.is_some() {
            return reject(MoveError::HoldingPiece);
        }

        let stats = trace_beam(
            &self.board,
            &mut self.pattern,
            &mut self.rng,
            self.passes,
            self.max_steps,
        );
        let solved = is_solved(&self.board, &self.level.solution);
        self.phase = SessionPhase::BeamActive;
        self.solved = Some(solved);
        self.last_trace = Some(stats);
        if solved {
            self.cleared = true;
        }
        log::info!(
            "Beam fired on level {}: {} targets hit over {} passes, solved={}",
            self.level_number,
            stats.targets_hit,
            stats.passes,
            solved
        );
        self.emit(SessionEvent::BeamFired { solved });
        Ok(solved)
    }

    /// Turn the beam off and return to editing
    pub fn clear_beam(&mut self) -> Result<(), MoveError> {
        if self.phase != SessionPhase::BeamActive {
            return reject(MoveError::BeamInactive);
        }
        self.pattern.clear();
        self.phase = SessionPhase::Idle;
        self.solved = None;
        self.emit(SessionEvent::BeamCleared);
        Ok(())
    }

    /// Dispatch one player action
    pub fn apply(&mut self, action: Action) -> Result<(), MoveError> {
        match action {
            Action::NextLevel => self.next_level(),
            Action::PreviousLevel => self.previous_level(),
            Action::GoToLevel(n) => self.go_to_level(n),
            Action::Restart => self.restart_level(),
            Action::PickUp(slot) => self.pick_up(slot).map(drop),
            Action::Rotate(slot, rotation) => self.rotate_at(slot, rotation).map(drop),
            Action::RotateHeld(rotation) => self.rotate_held(rotation).map(drop),
            Action::Drop(slot) => self.drop_at(slot),
            Action::Release(target) => self.release(target).map(drop),
            Action::FireBeam => self.fire_beam().map(drop),
            Action::ClearBeam => self.clear_beam(),
        }
    }
}
