//! Board and hand state
//!
//! The board is a fixed 5x5 array of cells. Each cell carries a piece and a
//! lock flag marking pieces that belong to the level's fixed layout.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use crate::consts::{BOARD_SIZE, HAND_SLOTS};

/// A full 5x5 arrangement of pieces, row-major
pub type Layout = [[Piece; BOARD_SIZE]; BOARD_SIZE];

/// The player's reserve of unplaced pieces
pub type Hand = [Piece; HAND_SLOTS];

/// A validated board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    /// Returns `None` when either coordinate is off the board
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Convert a grid vector (x = column, y = row), if it is on the board
    pub fn from_grid(pos: IVec2) -> Option<Self> {
        if crate::on_board(pos) {
            Some(Self {
                row: pos.y as usize,
                col: pos.x as usize,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn to_grid(self) -> IVec2 {
        IVec2::new(self.col as i32, self.row as i32)
    }

    /// All 25 positions in row-major order
    pub fn all() -> impl Iterator<Item = CellPos> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| CellPos { row, col }))
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub piece: Piece,
    /// Part of the level's fixed layout; the player can't move or rotate it
    pub locked: bool,
}

/// The 5x5 playing field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// An all-empty, fully unlocked board
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a board from a level's puzzle layout. Every non-empty piece is locked.
    pub fn from_puzzle(layout: &Layout) -> Self {
        let mut board = Self::empty();
        for pos in CellPos::all() {
            let piece = layout[pos.row][pos.col];
            board.cells[pos.row][pos.col] = Cell {
                piece,
                locked: !piece.is_empty(),
            };
        }
        board
    }

    /// Build an unlocked board holding exactly `layout`
    pub fn from_layout(layout: &Layout) -> Self {
        let mut board = Self::empty();
        for pos in CellPos::all() {
            board.cells[pos.row][pos.col].piece = layout[pos.row][pos.col];
        }
        board
    }

    #[inline]
    pub fn cell(&self, pos: CellPos) -> Cell {
        self.cells[pos.row][pos.col]
    }

    #[inline]
    pub fn piece(&self, pos: CellPos) -> Piece {
        self.cells[pos.row][pos.col].piece
    }

    /// Replace the piece at `pos`, keeping its lock flag
    #[inline]
    pub fn set_piece(&mut self, pos: CellPos, piece: Piece) {
        self.cells[pos.row][pos.col].piece = piece;
    }

    /// Piece at a grid vector, `None` when off the board
    pub fn piece_at(&self, pos: IVec2) -> Option<Piece> {
        CellPos::from_grid(pos).map(|p| self.piece(p))
    }

    /// Pieces only, dropping lock flags
    pub fn layout(&self) -> Layout {
        let mut layout = [[Piece::Empty; BOARD_SIZE]; BOARD_SIZE];
        for pos in CellPos::all() {
            layout[pos.row][pos.col] = self.piece(pos);
        }
        layout
    }

    /// Iterate cells with their positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, Cell)> + '_ {
        CellPos::all().map(move |pos| (pos, self.cell(pos)))
    }
}
