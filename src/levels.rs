//! Level catalog
//!
//! Levels are fixed data compiled into the binary. Each one pairs the
//! locked starting layout with the layout the player must reach, plus the
//! pieces dealt into the hand. Level numbers are 1-based.

use serde::{Deserialize, Serialize};

use crate::sim::board::{Hand, Layout};
use crate::sim::piece::{Mirror, Piece, Side, Splitter};

/// One puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Starting pieces; every non-empty cell is locked
    pub puzzle: Layout,
    /// Exact placement that solves the level
    pub solution: Layout,
    /// Pieces the player starts with
    pub hand: Hand,
}

/// Read-only source of levels
pub trait LevelCatalog {
    /// Level `number` (1-based), or `None` outside the catalog
    fn level(&self, number: usize) -> Option<Level>;
    fn level_count(&self) -> usize;

    /// Level after `number`, wrapping to the first
    fn next_number(&self, number: usize) -> usize {
        if number >= self.level_count() {
            1
        } else {
            number + 1
        }
    }

    /// Level before `number`, wrapping to the last
    fn previous_number(&self, number: usize) -> usize {
        if number <= 1 {
            self.level_count()
        } else {
            number - 1
        }
    }
}

/// The levels that ship with the game
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLevels;

impl LevelCatalog for BuiltinLevels {
    fn level(&self, number: usize) -> Option<Level> {
        number.checked_sub(1).and_then(|i| LEVELS.get(i)).copied()
    }

    fn level_count(&self) -> usize {
        LEVELS.len()
    }
}

/// A catalog built from caller-supplied levels
#[derive(Debug, Clone, Default)]
pub struct CustomLevels {
    levels: Vec<Level>,
}

impl CustomLevels {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }
}

impl LevelCatalog for CustomLevels {
    fn level(&self, number: usize) -> Option<Level> {
        number.checked_sub(1).and_then(|i| self.levels.get(i)).copied()
    }

    fn level_count(&self) -> usize {
        self.levels.len()
    }
}

const EMP: Piece = Piece::Empty;
const BLK: Piece = Piece::Blocker;
const TGT: Piece = Piece::Target(Side::Top);
const TGR: Piece = Piece::Target(Side::Right);
const TGB: Piece = Piece::Target(Side::Bottom);
const TGL: Piece = Piece::Target(Side::Left);
const MBL: Piece = Piece::Mirror(Mirror::BottomLeft);
const MTL: Piece = Piece::Mirror(Mirror::TopLeft);
const MTR: Piece = Piece::Mirror(Mirror::TopRight);
const MBR: Piece = Piece::Mirror(Mirror::BottomRight);
const SPB: Piece = Piece::Splitter(Splitter::Backslash);
const SPS: Piece = Piece::Splitter(Splitter::Slash);

#[rustfmt::skip]
const LEVELS: [Level; 40] = [
    // 1
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, TGT, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, MBL, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, TGT, EMP, EMP],
        ],
        hand: [MTL, EMP, EMP, EMP, EMP],
    },
    // 2
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, TGL],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, TGT, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, SPB, EMP, TGL],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, TGT, EMP, EMP],
        ],
        hand: [SPS, EMP, EMP, EMP, EMP],
    },
    // 3
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, TGR, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, TGR, MTL],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, EMP, EMP, EMP],
    },
    // 4
    Level {
        puzzle: [
            [EMP, TGR, EMP, BLK, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, TGR, MBL, BLK, EMP],
            [EMP, EMP, MTL, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, EMP, EMP, EMP],
    },
    // 5
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, BLK, TGB, EMP, EMP],
            [EMP, EMP, EMP, BLK, EMP],
            [BLK, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [MBL, BLK, TGB, EMP, EMP],
            [MTR, EMP, MTL, BLK, EMP],
            [BLK, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, MTL, EMP, EMP],
    },
    // 6
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, BLK, EMP, EMP, EMP],
            [EMP, EMP, BLK, EMP, EMP],
            [EMP, EMP, EMP, EMP, TGT],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [MBR, EMP, EMP, EMP, MBL],
            [MTL, BLK, EMP, EMP, EMP],
            [EMP, EMP, BLK, EMP, EMP],
            [EMP, EMP, EMP, EMP, TGT],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, MTL, EMP, EMP],
    },
    // 7
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, SPB, EMP, EMP, TGL],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, TGT, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, MBL, EMP, EMP, EMP],
            [EMP, SPB, EMP, EMP, TGL],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, TGT, EMP, EMP, EMP],
        ],
        hand: [MTL, EMP, EMP, EMP, EMP],
    },
    // 8
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, MBL, EMP, EMP, EMP],
            [BLK, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [TGT, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, MBL, EMP, EMP, EMP],
            [BLK, EMP, EMP, EMP, EMP],
            [MBR, MTL, EMP, EMP, EMP],
            [TGT, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, EMP, EMP, EMP],
    },
    // 9
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, TGL],
            [EMP, EMP, EMP, TGT, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, MBL, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, SPB, TGL],
            [EMP, EMP, EMP, TGT, EMP],
        ],
        hand: [SPS, MTL, EMP, EMP, EMP],
    },
    // 10
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, TGB, EMP],
            [EMP, EMP, BLK, EMP, EMP],
            [EMP, EMP, EMP, BLK, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [EMP, EMP, EMP, TGB, EMP],
            [EMP, EMP, BLK, MTR, MTL],
            [EMP, EMP, EMP, BLK, EMP],
        ],
        hand: [MTL, MTL, MTL, EMP, EMP],
    },
    // 11
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, TGB],
            [EMP, EMP, EMP, MBL, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, BLK],
            [EMP, EMP, EMP, TGT, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, TGB],
            [EMP, EMP, EMP, MBL, EMP],
            [EMP, EMP, EMP, SPB, MTL],
            [EMP, EMP, EMP, EMP, BLK],
            [EMP, EMP, EMP, TGT, EMP],
        ],
        hand: [SPS, MTL, EMP, EMP, EMP],
    },
    // 12
    Level {
        puzzle: [
            [EMP, EMP, TGR, EMP, EMP],
            [EMP, EMP, EMP, MBL, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, MTL],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, TGR, EMP, MBL],
            [EMP, EMP, EMP, MBL, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, MTR, MTL],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, EMP, EMP, EMP],
    },
    // 13
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, BLK, EMP, EMP, EMP],
            [EMP, EMP, TGL, EMP, EMP],
            [BLK, EMP, TGL, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [MBL, EMP, EMP, EMP, EMP],
            [EMP, BLK, EMP, EMP, EMP],
            [MTR, SPB, TGL, EMP, EMP],
            [BLK, MTR, TGL, EMP, EMP],
        ],
        hand: [SPS, MTL, MTL, MTL, EMP],
    },
    // 14
    Level {
        puzzle: [
            [TGR, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, MTL],
            [EMP, EMP, BLK, EMP, TGB],
            [EMP, BLK, EMP, BLK, EMP],
            [EMP, EMP, EMP, EMP, MTL],
        ],
        solution: [
            [TGR, EMP, EMP, EMP, MBL],
            [SPB, EMP, EMP, EMP, MTL],
            [EMP, EMP, BLK, EMP, TGB],
            [EMP, BLK, EMP, BLK, EMP],
            [MTR, EMP, EMP, EMP, MTL],
        ],
        hand: [SPS, MTL, MTL, EMP, EMP],
    },
    // 15
    Level {
        puzzle: [
            [EMP, EMP, EMP, TGB, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, TGT, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, TGB, EMP],
            [EMP, SPB, EMP, MTL, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, TGT, EMP, EMP, EMP],
        ],
        hand: [SPS, MTL, EMP, EMP, EMP],
    },
    // 16
    Level {
        puzzle: [
            [EMP, EMP, EMP, TGR, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, TGT, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, TGR, MBL],
            [EMP, SPB, EMP, EMP, MTL],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, TGT, EMP, EMP, EMP],
        ],
        hand: [SPS, MTL, MTL, EMP, EMP],
    },
    // 17
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [SPB, MBL, EMP, EMP, EMP],
            [EMP, EMP, MBL, EMP, EMP],
            [BLK, EMP, EMP, TGL, EMP],
            [EMP, EMP, TGT, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [SPB, MBL, EMP, EMP, EMP],
            [MTR, EMP, MBL, EMP, EMP],
            [BLK, MTR, EMP, TGL, EMP],
            [EMP, EMP, TGT, EMP, EMP],
        ],
        hand: [MTL, MTL, EMP, EMP, EMP],
    },
    // 18
    Level {
        puzzle: [
            [BLK, EMP, EMP, EMP, MBL],
            [EMP, BLK, TGT, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, BLK],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [BLK, EMP, MBR, EMP, MBL],
            [MBL, BLK, TGT, EMP, EMP],
            [MTR, EMP, EMP, EMP, MTL],
            [EMP, EMP, EMP, EMP, BLK],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, MTL, MTL, EMP],
    },
    // 19
    Level {
        puzzle: [
            [EMP, TGB, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, BLK, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, TGB, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [EMP, MTR, EMP, EMP, MTL],
            [EMP, BLK, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, EMP, EMP, EMP],
    },
    // 20
    Level {
        puzzle: [
            [EMP, EMP, EMP, TGB, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [TGR, EMP, EMP, SPB, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, TGB, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [TGR, EMP, EMP, SPB, MTL],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, EMP, EMP, EMP],
    },
    // 21
    Level {
        puzzle: [
            [EMP, EMP, MBR, EMP, EMP],
            [EMP, EMP, EMP, EMP, MTL],
            [TGB, EMP, EMP, EMP, EMP],
            [EMP, BLK, EMP, EMP, TGL],
            [EMP, EMP, MTL, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, MBR, EMP, MBL],
            [EMP, EMP, EMP, EMP, MTL],
            [TGB, EMP, EMP, EMP, EMP],
            [EMP, BLK, SPB, EMP, TGL],
            [MTR, EMP, MTL, EMP, EMP],
        ],
        hand: [SPS, MTL, MTL, EMP, EMP],
    },
    // 22
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, BLK],
            [EMP, MTR, EMP, EMP, EMP],
            [TGR, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, TGT],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, MBL, EMP, EMP, BLK],
            [EMP, MTR, EMP, EMP, MBL],
            [TGR, EMP, EMP, EMP, SPS],
            [EMP, EMP, EMP, EMP, TGT],
        ],
        hand: [SPS, MTL, MTL, EMP, EMP],
    },
    // 23
    Level {
        puzzle: [
            [EMP, MBL, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [TGT, EMP, EMP, EMP, EMP],
            [EMP, TGR, EMP, EMP, MTL],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [MBR, MBL, EMP, EMP, EMP],
            [EMP, SPS, EMP, EMP, MBL],
            [TGT, EMP, EMP, EMP, EMP],
            [EMP, TGR, EMP, EMP, MTL],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [SPS, MTL, EMP, EMP, EMP],
    },
    // 24
    Level {
        puzzle: [
            [EMP, EMP, EMP, TGB, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, BLK, EMP, EMP],
            [EMP, EMP, EMP, TGT, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, EMP, EMP, TGB, EMP],
            [EMP, EMP, EMP, SPS, MBL],
            [EMP, EMP, BLK, MBR, MTL],
            [EMP, EMP, EMP, TGT, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [SPS, MTL, MTL, MTL, EMP],
    },
    // 25
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, BLK, EMP, EMP],
            [TGR, EMP, EMP, EMP, EMP],
            [EMP, BLK, EMP, EMP, TGL],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, MBL, EMP],
            [EMP, EMP, BLK, EMP, EMP],
            [TGR, EMP, EMP, SPS, EMP],
            [EMP, BLK, EMP, MTR, TGL],
        ],
        hand: [SPS, MTL, MTL, EMP, EMP],
    },
    // 26
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [BLK, EMP, SPB, EMP, EMP],
            [EMP, EMP, EMP, TGL, TGT],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, MBL, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [BLK, MTR, SPB, EMP, MBL],
            [EMP, EMP, MTR, TGL, TGT],
        ],
        hand: [MTL, MTL, MTL, MTL, EMP],
    },
    // 27
    Level {
        puzzle: [
            [TGB, EMP, MBR, EMP, BLK],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, BLK, EMP, TGT],
            [MTR, EMP, EMP, MTL, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [TGB, EMP, MBR, MBL, BLK],
            [EMP, EMP, SPS, EMP, MBL],
            [EMP, EMP, BLK, EMP, TGT],
            [MTR, EMP, EMP, MTL, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [SPS, MTL, MTL, EMP, EMP],
    },
    // 28
    Level {
        puzzle: [
            [MBR, EMP, EMP, BLK, EMP],
            [EMP, EMP, BLK, EMP, EMP],
            [BLK, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, SPB, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [MBR, MBL, EMP, BLK, EMP],
            [MTL, EMP, BLK, EMP, EMP],
            [BLK, EMP, EMP, EMP, EMP],
            [EMP, MTR, EMP, SPB, TGL],
            [EMP, EMP, EMP, TGT, EMP],
        ],
        hand: [TGL, TGL, MTL, MTL, MTL],
    },
    // 29
    Level {
        puzzle: [
            [TGR, EMP, EMP, MBL, EMP],
            [EMP, EMP, TGR, EMP, EMP],
            [EMP, EMP, EMP, BLK, EMP],
            [EMP, MTR, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [TGR, EMP, EMP, MBL, EMP],
            [EMP, MBL, TGR, SPB, MBL],
            [EMP, EMP, EMP, BLK, EMP],
            [EMP, MTR, EMP, EMP, MTL],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [SPS, MTL, MTL, MTL, EMP],
    },
    // 30
    Level {
        puzzle: [
            [BLK, EMP, EMP, EMP, EMP],
            [EMP, EMP, TGR, EMP, EMP],
            [EMP, BLK, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, BLK],
            [EMP, EMP, TGR, EMP, EMP],
        ],
        solution: [
            [BLK, MBR, EMP, MBL, EMP],
            [EMP, MTL, TGR, SPS, EMP],
            [EMP, BLK, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, BLK],
            [EMP, EMP, TGR, MTL, EMP],
        ],
        hand: [SPS, MTL, MTL, MTL, MTL],
    },
    // 31
    Level {
        puzzle: [
            [MBR, EMP, EMP, BLK, EMP],
            [EMP, EMP, BLK, EMP, EMP],
            [EMP, BLK, EMP, EMP, EMP],
            [EMP, EMP, EMP, SPB, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [MBR, MBL, EMP, BLK, EMP],
            [EMP, MTL, BLK, EMP, EMP],
            [EMP, BLK, EMP, EMP, EMP],
            [MTR, EMP, EMP, SPB, TGL],
            [EMP, EMP, EMP, TGT, EMP],
        ],
        hand: [TGL, TGL, MTL, MTL, MTL],
    },
    // 32
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [TGB, TGR, EMP, BLK, EMP],
            [EMP, EMP, EMP, BLK, EMP],
            [EMP, BLK, EMP, EMP, MTL],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [TGB, TGR, MBL, BLK, EMP],
            [MTR, EMP, SPB, BLK, EMP],
            [EMP, BLK, MTR, EMP, MTL],
        ],
        hand: [SPS, MTL, MTL, MTL, MTL],
    },
    // 33
    Level {
        puzzle: [
            [EMP, TGB, TGB, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, SPB, EMP, BLK],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, TGB, TGB, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [EMP, EMP, EMP, MBR, MTL],
            [EMP, MTR, SPB, MTL, BLK],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, MTL, MTL, EMP],
    },
    // 34
    Level {
        puzzle: [
            [EMP, EMP, MBL, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, TGL],
            [TGR, EMP, BLK, EMP, EMP],
        ],
        solution: [
            [EMP, MBR, MBL, EMP, EMP],
            [EMP, EMP, MTL, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, SPB, EMP, EMP, TGL],
            [TGR, MTL, BLK, EMP, EMP],
        ],
        hand: [SPS, MTL, MTL, MTL, EMP],
    },
    // 35
    Level {
        puzzle: [
            [EMP, TGB, TGB, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, SPS, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, TGB, TGB, EMP, EMP],
            [MBL, MTR, EMP, EMP, MBL],
            [EMP, EMP, EMP, EMP, EMP],
            [MTR, EMP, SPS, EMP, MTL],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, MTL, MTL, EMP],
    },
    // 36
    Level {
        puzzle: [
            [EMP, TGR, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [EMP, EMP, EMP, BLK, EMP],
            [EMP, TGR, EMP, EMP, MTL],
            [EMP, EMP, MTR, EMP, EMP],
        ],
        solution: [
            [EMP, TGR, MBL, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [EMP, EMP, EMP, BLK, EMP],
            [EMP, TGR, EMP, SPS, MTL],
            [EMP, EMP, MTR, MTL, EMP],
        ],
        hand: [SPS, MTL, MTL, EMP, EMP],
    },
    // 37
    Level {
        puzzle: [
            [EMP, TGB, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [TGR, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, SPB, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, TGB, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, MBL],
            [TGR, EMP, EMP, MBL, EMP],
            [EMP, MTR, EMP, SPB, MTL],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [MTL, MTL, MTL, MTL, EMP],
    },
    // 38
    Level {
        puzzle: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, BLK, EMP],
            [TGB, TGR, EMP, EMP, EMP],
            [EMP, EMP, EMP, BLK, EMP],
            [EMP, BLK, EMP, EMP, MTL],
        ],
        solution: [
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, MBL, BLK, EMP],
            [TGB, TGR, EMP, EMP, MBL],
            [MTR, EMP, SPS, BLK, EMP],
            [EMP, BLK, MTR, EMP, MTL],
        ],
        hand: [SPS, MTL, MTL, MTL, MTL],
    },
    // 39
    Level {
        puzzle: [
            [MBR, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, EMP, TGR, EMP],
            [EMP, EMP, EMP, EMP, EMP],
            [EMP, EMP, MTL, EMP, TGT],
        ],
        solution: [
            [MBR, EMP, EMP, EMP, MBL],
            [EMP, EMP, MBL, EMP, EMP],
            [EMP, EMP, EMP, TGR, SPS],
            [EMP, EMP, EMP, EMP, EMP],
            [MTR, EMP, MTL, EMP, TGT],
        ],
        hand: [SPS, MTL, MTL, MTL, EMP],
    },
    // 40
    Level {
        puzzle: [
            [EMP, TGR, EMP, EMP, EMP],
            [EMP, EMP, EMP, BLK, EMP],
            [EMP, TGR, EMP, EMP, EMP],
            [EMP, EMP, MTR, EMP, EMP],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        solution: [
            [EMP, TGR, EMP, EMP, MBL],
            [EMP, EMP, MBL, BLK, EMP],
            [EMP, TGR, EMP, MBL, EMP],
            [EMP, EMP, MTR, SPS, MTL],
            [EMP, EMP, EMP, EMP, EMP],
        ],
        hand: [SPS, MTL, MTL, MTL, MTL],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_STEPS_PER_PASS, PASSES_PER_ACTIVATION};
    use crate::sim::beam::{BeamPattern, trace_beam};
    use crate::sim::board::{Board, CellPos};
    use crate::sim::piece::PieceKind;
    use crate::sim::win::is_solved;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn kinds(pieces: impl Iterator<Item = Piece>) -> Vec<PieceKind> {
        let mut kinds: Vec<PieceKind> = pieces.filter(|p| !p.is_empty()).map(Piece::kind).collect();
        kinds.sort();
        kinds
    }

    #[test]
    fn test_numbering_is_one_based() {
        let catalog = BuiltinLevels;
        assert_eq!(catalog.level_count(), 40);
        assert!(catalog.level(0).is_none());
        assert!(catalog.level(41).is_none());
        assert_eq!(catalog.level(1).map(|l| l.hand[0]), Some(MTL));
    }

    #[test]
    fn test_navigation_wraps() {
        let catalog = BuiltinLevels;
        assert_eq!(catalog.next_number(40), 1);
        assert_eq!(catalog.next_number(7), 8);
        assert_eq!(catalog.previous_number(1), 40);
        assert_eq!(catalog.previous_number(8), 7);
    }

    #[test]
    fn test_solutions_keep_every_fixed_piece() {
        let catalog = BuiltinLevels;
        for n in 1..=catalog.level_count() {
            let level = catalog.level(n).unwrap();
            for pos in CellPos::all() {
                let fixed = level.puzzle[pos.row][pos.col];
                if !fixed.is_empty() {
                    assert_eq!(level.solution[pos.row][pos.col], fixed, "level {n} at {pos}");
                }
            }
        }
    }

    #[test]
    fn test_hand_supplies_exactly_the_missing_pieces() {
        let catalog = BuiltinLevels;
        for n in 1..=catalog.level_count() {
            let level = catalog.level(n).unwrap();
            let added = CellPos::all()
                .filter(|pos| level.puzzle[pos.row][pos.col].is_empty())
                .map(|pos| level.solution[pos.row][pos.col]);
            // Orientation may differ; the player rotates hand pieces into place
            assert_eq!(kinds(added), kinds(level.hand.into_iter()), "level {n}");
        }
    }

    #[test]
    fn test_no_level_starts_solved() {
        let catalog = BuiltinLevels;
        for n in 1..=catalog.level_count() {
            let level = catalog.level(n).unwrap();
            assert!(!is_solved(&Board::from_puzzle(&level.puzzle), &level.solution), "level {n}");
        }
    }

    #[test]
    fn test_every_solution_lights_every_target() {
        let catalog = BuiltinLevels;
        let mut rng = Pcg32::seed_from_u64(0x1A5E);
        for n in 1..=catalog.level_count() {
            let level = catalog.level(n).unwrap();
            let board = Board::from_layout(&level.solution);
            let mut pattern = BeamPattern::new();
            trace_beam(
                &board,
                &mut pattern,
                &mut rng,
                PASSES_PER_ACTIVATION,
                MAX_STEPS_PER_PASS,
            );
            let targets = board
                .iter()
                .filter(|(_, c)| c.piece.kind() == PieceKind::Target)
                .count();
            assert!(targets > 0, "level {n} has no target");
            assert_eq!(pattern.lit_targets(&board).count(), targets, "level {n}");
        }
    }

    #[test]
    fn test_custom_catalog() {
        let level = BuiltinLevels.level(3).unwrap();
        let catalog = CustomLevels::new(vec![level]);
        assert_eq!(catalog.level_count(), 1);
        assert_eq!(catalog.level(1), Some(level));
        assert_eq!(catalog.next_number(1), 1);
        assert_eq!(catalog.previous_number(1), 1);
    }
}
