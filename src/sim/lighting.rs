//! Deriving what glows from a traced beam
//!
//! The beam pattern records raw entry/exit flags. Presentation needs a
//! coarser answer per cell: is the piece lit, and how. Gaps between
//! neighbouring cells are lit separately.

use super::beam::{BeamFlags, BeamPattern};
use super::board::{Board, CellPos};
use super::piece::{Piece, Side};
use crate::consts::BOARD_SIZE;

/// Lit state of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glow {
    Dark,
    /// Empty cell crossed left-right
    Horizontal,
    /// Empty cell crossed top-bottom
    Vertical,
    /// Empty cell crossed both ways
    Cross,
    /// Target hit through its face
    Target,
    /// Mirror reflected the beam
    Mirror,
    /// Splitter sent both branches out from a single entry side
    Split(Side),
    /// Splitter split the beam from more than one entry side
    SplitMixed,
}

impl Glow {
    pub fn is_lit(self) -> bool {
        self != Glow::Dark
    }
}

fn crossed(flags: BeamFlags, entry: Side, exit: Side) -> bool {
    flags.has_entry(entry) && flags.has_exit(exit)
}

/// Glow for `piece` given its recorded flags
pub fn glow(piece: Piece, flags: BeamFlags) -> Glow {
    match piece {
        Piece::Empty => {
            let h = crossed(flags, Side::Left, Side::Right)
                || crossed(flags, Side::Right, Side::Left);
            let v = crossed(flags, Side::Top, Side::Bottom)
                || crossed(flags, Side::Bottom, Side::Top);
            match (h, v) {
                (true, true) => Glow::Cross,
                (true, false) => Glow::Horizontal,
                (false, true) => Glow::Vertical,
                (false, false) => Glow::Dark,
            }
        }
        Piece::Blocker => Glow::Dark,
        Piece::Target(face) => {
            if flags.has_entry(face) {
                Glow::Target
            } else {
                Glow::Dark
            }
        }
        Piece::Mirror(mirror) => {
            let (a, b) = mirror.joins();
            if crossed(flags, a, b) || crossed(flags, b, a) {
                Glow::Mirror
            } else {
                Glow::Dark
            }
        }
        Piece::Splitter(splitter) => {
            // Only counts as split once both branches from an entry were seen
            let mut split_from = Side::ALL.into_iter().filter(|&entry| {
                flags.has_entry(entry)
                    && flags.has_exit(entry.opposite())
                    && flags.has_exit(splitter.deflect(entry))
            });
            match (split_from.next(), split_from.next()) {
                (Some(entry), None) => Glow::Split(entry),
                (Some(_), Some(_)) => Glow::SplitMixed,
                _ => Glow::Dark,
            }
        }
    }
}

/// Glow of the cell at `pos`
pub fn cell_glow(board: &Board, pattern: &BeamPattern, pos: CellPos) -> Glow {
    glow(board.piece(pos), pattern.get(pos))
}

/// Whether the beam crossed the gap between `pos` and its right-hand neighbour
pub fn gap_right_lit(pattern: &BeamPattern, pos: CellPos) -> bool {
    if pos.col + 1 >= BOARD_SIZE {
        return false;
    }
    let right = CellPos {
        row: pos.row,
        col: pos.col + 1,
    };
    pattern.get(pos).has_exit(Side::Right) || pattern.get(right).has_exit(Side::Left)
}

/// Whether the beam crossed the gap between `pos` and the cell below it
pub fn gap_below_lit(pattern: &BeamPattern, pos: CellPos) -> bool {
    if pos.row + 1 >= BOARD_SIZE {
        return false;
    }
    let below = CellPos {
        row: pos.row + 1,
        col: pos.col,
    };
    pattern.get(pos).has_exit(Side::Bottom) || pattern.get(below).has_exit(Side::Top)
}
