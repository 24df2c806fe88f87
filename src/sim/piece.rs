//! Piece catalog and rotation tables
//!
//! Twelve piece identities: empty, blocker, four targets, four mirrors and
//! two splitters. Orientation is part of identity, so rotating a piece
//! yields a different `Piece` value.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One side of a cell. Beam flags, target faces and mirror joins are all
/// expressed in sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// The facing side across the cell
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// Grid step to the neighbour across this side (x = column, y = row)
    #[inline]
    pub fn offset(self) -> IVec2 {
        match self {
            Side::Top => IVec2::NEG_Y,
            Side::Right => IVec2::X,
            Side::Bottom => IVec2::Y,
            Side::Left => IVec2::NEG_X,
        }
    }

    fn clockwise(self) -> Side {
        match self {
            Side::Top => Side::Right,
            Side::Right => Side::Bottom,
            Side::Bottom => Side::Left,
            Side::Left => Side::Top,
        }
    }

    fn counter_clockwise(self) -> Side {
        match self {
            Side::Top => Side::Left,
            Side::Left => Side::Bottom,
            Side::Bottom => Side::Right,
            Side::Right => Side::Top,
        }
    }
}

/// Single-sided diagonal mirror, named by the two sides it joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mirror {
    BottomLeft,
    TopLeft,
    TopRight,
    BottomRight,
}

impl Mirror {
    /// The two sides the reflective face joins
    pub fn joins(self) -> (Side, Side) {
        match self {
            Mirror::BottomLeft => (Side::Bottom, Side::Left),
            Mirror::TopLeft => (Side::Top, Side::Left),
            Mirror::TopRight => (Side::Top, Side::Right),
            Mirror::BottomRight => (Side::Bottom, Side::Right),
        }
    }

    /// Exit side for a beam entering through `entry`, or `None` if it hits the back
    pub fn reflect(self, entry: Side) -> Option<Side> {
        let (a, b) = self.joins();
        if entry == a {
            Some(b)
        } else if entry == b {
            Some(a)
        } else {
            None
        }
    }
}

/// Half-silvered diagonal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Splitter {
    /// Runs top-left to bottom-right (`\`)
    Backslash,
    /// Runs top-right to bottom-left (`/`)
    Slash,
}

impl Splitter {
    /// Exit side when the beam bounces off the diagonal
    pub fn deflect(self, entry: Side) -> Side {
        match (self, entry) {
            (Splitter::Backslash, Side::Top) => Side::Right,
            (Splitter::Backslash, Side::Right) => Side::Top,
            (Splitter::Backslash, Side::Bottom) => Side::Left,
            (Splitter::Backslash, Side::Left) => Side::Bottom,
            (Splitter::Slash, Side::Top) => Side::Left,
            (Splitter::Slash, Side::Left) => Side::Top,
            (Splitter::Slash, Side::Bottom) => Side::Right,
            (Splitter::Slash, Side::Right) => Side::Bottom,
        }
    }

    fn flipped(self) -> Splitter {
        match self {
            Splitter::Backslash => Splitter::Slash,
            Splitter::Slash => Splitter::Backslash,
        }
    }
}

/// Rotation direction requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Piece kind with orientation erased
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Empty,
    Blocker,
    Target,
    Mirror,
    Splitter,
}

/// A piece that can occupy a board cell or hand slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Piece {
    #[default]
    Empty,
    Blocker,
    /// Lights only when the beam enters through the given side
    Target(Side),
    Mirror(Mirror),
    Splitter(Splitter),
}

impl Piece {
    /// Every piece identity, in catalog order
    pub const ALL: [Piece; 12] = [
        Piece::Empty,
        Piece::Blocker,
        Piece::Target(Side::Top),
        Piece::Target(Side::Right),
        Piece::Target(Side::Bottom),
        Piece::Target(Side::Left),
        Piece::Mirror(Mirror::BottomLeft),
        Piece::Mirror(Mirror::TopLeft),
        Piece::Mirror(Mirror::TopRight),
        Piece::Mirror(Mirror::BottomRight),
        Piece::Splitter(Splitter::Backslash),
        Piece::Splitter(Splitter::Slash),
    ];

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    pub fn kind(self) -> PieceKind {
        match self {
            Piece::Empty => PieceKind::Empty,
            Piece::Blocker => PieceKind::Blocker,
            Piece::Target(_) => PieceKind::Target,
            Piece::Mirror(_) => PieceKind::Mirror,
            Piece::Splitter(_) => PieceKind::Splitter,
        }
    }

    /// Apply one quarter turn
    pub fn rotated(self, rotation: Rotation) -> Piece {
        match rotation {
            Rotation::Clockwise => self.clockwise(),
            Rotation::CounterClockwise => self.counter_clockwise(),
        }
    }

    fn clockwise(self) -> Piece {
        match self {
            Piece::Empty | Piece::Blocker => self,
            Piece::Target(face) => Piece::Target(face.clockwise()),
            Piece::Mirror(Mirror::BottomLeft) => Piece::Mirror(Mirror::TopLeft),
            Piece::Mirror(Mirror::TopLeft) => Piece::Mirror(Mirror::TopRight),
            Piece::Mirror(Mirror::TopRight) => Piece::Mirror(Mirror::BottomRight),
            Piece::Mirror(Mirror::BottomRight) => Piece::Mirror(Mirror::BottomLeft),
            Piece::Splitter(s) => Piece::Splitter(s.flipped()),
        }
    }

    fn counter_clockwise(self) -> Piece {
        match self {
            Piece::Empty | Piece::Blocker => self,
            Piece::Target(face) => Piece::Target(face.counter_clockwise()),
            Piece::Mirror(Mirror::BottomLeft) => Piece::Mirror(Mirror::BottomRight),
            Piece::Mirror(Mirror::BottomRight) => Piece::Mirror(Mirror::TopRight),
            Piece::Mirror(Mirror::TopRight) => Piece::Mirror(Mirror::TopLeft),
            Piece::Mirror(Mirror::TopLeft) => Piece::Mirror(Mirror::BottomLeft),
            Piece::Splitter(s) => Piece::Splitter(s.flipped()),
        }
    }

    /// Single-character glyph used by the text renderer
    pub fn glyph(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::Blocker => '#',
            Piece::Target(Side::Top) => 'v',
            Piece::Target(Side::Right) => '<',
            Piece::Target(Side::Bottom) => '^',
            Piece::Target(Side::Left) => '>',
            Piece::Mirror(Mirror::BottomLeft) => '7',
            Piece::Mirror(Mirror::TopLeft) => 'J',
            Piece::Mirror(Mirror::TopRight) => 'L',
            Piece::Mirror(Mirror::BottomRight) => 'F',
            Piece::Splitter(Splitter::Backslash) => '\\',
            Piece::Splitter(Splitter::Slash) => '/',
        }
    }

    /// Inverse of [`Piece::glyph`]
    pub fn from_glyph(c: char) -> Option<Piece> {
        Piece::ALL.into_iter().find(|p| p.glyph() == c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_piece() -> impl Strategy<Value = Piece> {
        (0..Piece::ALL.len()).prop_map(|i| Piece::ALL[i])
    }

    proptest! {
        #[test]
        fn prop_four_clockwise_turns_is_identity(piece in any_piece()) {
            let mut p = piece;
            for _ in 0..4 {
                p = p.rotated(Rotation::Clockwise);
            }
            prop_assert_eq!(p, piece);
        }

        #[test]
        fn prop_four_counter_clockwise_turns_is_identity(piece in any_piece()) {
            let mut p = piece;
            for _ in 0..4 {
                p = p.rotated(Rotation::CounterClockwise);
            }
            prop_assert_eq!(p, piece);
        }

        #[test]
        fn prop_counter_clockwise_undoes_clockwise(piece in any_piece()) {
            let back = piece
                .rotated(Rotation::Clockwise)
                .rotated(Rotation::CounterClockwise);
            prop_assert_eq!(back, piece);
        }

        #[test]
        fn prop_rotation_preserves_kind(piece in any_piece()) {
            prop_assert_eq!(piece.rotated(Rotation::Clockwise).kind(), piece.kind());
        }
    }

    #[test]
    fn test_clockwise_table_matches_catalog_order() {
        let expected = [
            Piece::Empty,
            Piece::Blocker,
            Piece::Target(Side::Right),
            Piece::Target(Side::Bottom),
            Piece::Target(Side::Left),
            Piece::Target(Side::Top),
            Piece::Mirror(Mirror::TopLeft),
            Piece::Mirror(Mirror::TopRight),
            Piece::Mirror(Mirror::BottomRight),
            Piece::Mirror(Mirror::BottomLeft),
            Piece::Splitter(Splitter::Slash),
            Piece::Splitter(Splitter::Backslash),
        ];
        for (piece, want) in Piece::ALL.iter().zip(expected) {
            assert_eq!(piece.rotated(Rotation::Clockwise), want, "cw of {piece:?}");
        }
    }

    #[test]
    fn test_mirror_reflects_two_sides_and_blocks_two() {
        for piece in Piece::ALL {
            if let Piece::Mirror(m) = piece {
                let open = Side::ALL.iter().filter(|&&s| m.reflect(s).is_some()).count();
                assert_eq!(open, 2, "{m:?} should reflect exactly two sides");
                // Reflection is symmetric: going back out the way we came
                for side in Side::ALL {
                    if let Some(exit) = m.reflect(side) {
                        assert_eq!(m.reflect(exit), Some(side));
                    }
                }
            }
        }
    }

    #[test]
    fn test_splitter_deflect_turns_ninety_degrees() {
        for s in [Splitter::Backslash, Splitter::Slash] {
            for side in Side::ALL {
                let out = s.deflect(side);
                assert_ne!(out, side);
                assert_ne!(out, side.opposite());
                assert_eq!(s.deflect(out), side);
            }
        }
    }

    #[test]
    fn test_glyphs_are_unique() {
        for piece in Piece::ALL {
            assert_eq!(Piece::from_glyph(piece.glyph()), Some(piece));
        }
        assert_eq!(Piece::from_glyph('x'), None);
    }

    #[test]
    fn test_offsets_point_at_neighbours() {
        for side in Side::ALL {
            assert_eq!(side.offset() + side.opposite().offset(), IVec2::ZERO);
        }
        assert_eq!(Side::Bottom.offset(), IVec2::new(0, 1));
    }
}
