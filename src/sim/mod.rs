//! Puzzle simulation
//!
//! All gameplay logic lives here. Nothing in this module draws or reads
//! input:
//! - Beam tracing is driven by a seeded RNG only
//! - Board iteration is row-major
//! - The session is the single owner of mutable puzzle state

pub mod beam;
pub mod board;
pub mod lighting;
pub mod piece;
pub mod session;
pub mod win;

pub use beam::{BeamFlags, BeamPattern, PassEnd, TraceStats, simulate, trace_beam, transition};
pub use board::{Board, Cell, CellPos, Hand, Layout};
pub use lighting::{Glow, cell_glow, gap_below_lit, gap_right_lit, glow};
pub use piece::{Mirror, Piece, PieceKind, Rotation, Side, Splitter};
pub use session::{Action, HeldPiece, MoveError, Session, SessionEvent, SessionPhase, Slot};
pub use win::{is_solved, mismatches};
