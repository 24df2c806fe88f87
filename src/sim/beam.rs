//! Beam propagation
//!
//! A photon enters the board left of the laser row and walks cell by cell.
//! Each piece maps the side the photon entered through to either an exit
//! side or a halt. Every traversal is OR'd into a per-cell flag set.
//!
//! The only randomness is a fair coin drawn on each splitter visit.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::{Board, CellPos};
use super::piece::{Piece, Side};
use crate::consts::{BOARD_SIZE, LASER_ENTRY_ROW};

/// Entry/exit flags for one cell.
///
/// Bit layout: exit Top/Bottom/Left/Right in bits 0-3, entry
/// Top/Bottom/Left/Right in bits 4-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BeamFlags(u8);

impl BeamFlags {
    pub const EMPTY: BeamFlags = BeamFlags(0);

    const fn side_bit(side: Side) -> u8 {
        match side {
            Side::Top => 1,
            Side::Bottom => 2,
            Side::Left => 4,
            Side::Right => 8,
        }
    }

    /// Flag for a beam entering through `side`
    pub const fn entered(side: Side) -> BeamFlags {
        BeamFlags(Self::side_bit(side) << 4)
    }

    /// Flag for a beam leaving through `side`
    pub const fn exited(side: Side) -> BeamFlags {
        BeamFlags(Self::side_bit(side))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> BeamFlags {
        BeamFlags(bits)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, other: BeamFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn has_entry(self, side: Side) -> bool {
        self.contains(Self::entered(side))
    }

    #[inline]
    pub fn has_exit(self, side: Side) -> bool {
        self.contains(Self::exited(side))
    }

    #[inline]
    pub fn insert(&mut self, other: BeamFlags) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for BeamFlags {
    type Output = BeamFlags;

    fn bitor(self, rhs: BeamFlags) -> BeamFlags {
        BeamFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for BeamFlags {
    fn bitor_assign(&mut self, rhs: BeamFlags) {
        self.insert(rhs);
    }
}

/// Per-cell record of everything the beam did during an activation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BeamPattern {
    cells: [[BeamFlags; BOARD_SIZE]; BOARD_SIZE],
}

impl BeamPattern {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, pos: CellPos) -> BeamFlags {
        self.cells[pos.row][pos.col]
    }

    /// OR flags into a cell
    #[inline]
    pub fn record(&mut self, pos: CellPos, flags: BeamFlags) {
        self.cells[pos.row][pos.col] |= flags;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_clear(&self) -> bool {
        self.iter().all(|(_, flags)| flags.is_empty())
    }

    /// Union of two patterns
    pub fn merge(&mut self, other: &BeamPattern) {
        for pos in CellPos::all() {
            self.record(pos, other.get(pos));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellPos, BeamFlags)> + '_ {
        CellPos::all().map(move |pos| (pos, self.get(pos)))
    }

    /// Positions of targets on `board` that the beam entered through their face
    pub fn lit_targets<'a>(&'a self, board: &'a Board) -> impl Iterator<Item = CellPos> + 'a {
        board.iter().filter_map(move |(pos, cell)| match cell.piece {
            Piece::Target(face) if self.get(pos).has_entry(face) => Some(pos),
            _ => None,
        })
    }
}

/// What a piece does with a photon entering through one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Leave the cell through `exit`
    Continue { exit: Side },
    /// Stop here; `lit` when the photon struck a target's face
    Halt { lit: bool },
}

impl Transition {
    /// Flags this transition leaves on its cell
    pub fn flags(self, entry: Side) -> BeamFlags {
        match self {
            Transition::Continue { exit } => BeamFlags::entered(entry) | BeamFlags::exited(exit),
            Transition::Halt { lit: true } => BeamFlags::entered(entry),
            Transition::Halt { lit: false } => BeamFlags::EMPTY,
        }
    }
}

/// Transition table. `bounce` is only consulted for splitters.
pub fn transition(piece: Piece, entry: Side, bounce: bool) -> Transition {
    match piece {
        Piece::Empty => Transition::Continue {
            exit: entry.opposite(),
        },
        Piece::Blocker => Transition::Halt { lit: false },
        Piece::Target(face) => Transition::Halt { lit: entry == face },
        Piece::Mirror(mirror) => match mirror.reflect(entry) {
            Some(exit) => Transition::Continue { exit },
            None => Transition::Halt { lit: false },
        },
        Piece::Splitter(splitter) => {
            let exit = if bounce {
                splitter.deflect(entry)
            } else {
                entry.opposite()
            };
            Transition::Continue { exit }
        }
    }
}

/// How a single photon pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassEnd {
    /// Walked off the board
    Exited,
    /// Stopped by a blocker, a mirror's back or a target's side
    Absorbed(CellPos),
    /// Struck a target through its face
    TargetLit(CellPos),
    /// Hit the step cap; treated as a lost beam
    Overrun,
}

/// Trace one photon from the laser source, OR-ing its path into `pattern`.
///
/// The board is only read. `pattern` is not cleared first, so repeated
/// calls accumulate.
pub fn simulate<R: Rng>(
    board: &Board,
    pattern: &mut BeamPattern,
    rng: &mut R,
    max_steps: u32,
) -> PassEnd {
    let mut pos = IVec2::new(0, LASER_ENTRY_ROW as i32);
    let mut entry = Side::Left;

    for _ in 0..max_steps {
        let Some(cell) = CellPos::from_grid(pos) else {
            return PassEnd::Exited;
        };
        let piece = board.piece(cell);

        // Fresh coin on every splitter visit, never cached per cell
        let bounce = matches!(piece, Piece::Splitter(_)) && rng.random_bool(0.5);

        let step = transition(piece, entry, bounce);
        pattern.record(cell, step.flags(entry));

        match step {
            Transition::Continue { exit } => {
                pos += exit.offset();
                entry = exit.opposite();
            }
            Transition::Halt { lit: true } => return PassEnd::TargetLit(cell),
            Transition::Halt { lit: false } => return PassEnd::Absorbed(cell),
        }
    }

    if crate::on_board(pos) {
        log::debug!("Photon overran {} steps at {:?}; treating as lost", max_steps, pos);
        PassEnd::Overrun
    } else {
        PassEnd::Exited
    }
}

/// Summary of a multi-pass trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    pub passes: u32,
    pub exited: u32,
    pub absorbed: u32,
    pub targets_hit: u32,
    pub overruns: u32,
}

impl TraceStats {
    fn count(&mut self, end: PassEnd) {
        self.passes += 1;
        match end {
            PassEnd::Exited => self.exited += 1,
            PassEnd::Absorbed(_) => self.absorbed += 1,
            PassEnd::TargetLit(_) => self.targets_hit += 1,
            PassEnd::Overrun => self.overruns += 1,
        }
    }
}

/// Clear `pattern` and accumulate `passes` independent photons into it
pub fn trace_beam<R: Rng>(
    board: &Board,
    pattern: &mut BeamPattern,
    rng: &mut R,
    passes: u32,
    max_steps: u32,
) -> TraceStats {
    pattern.clear();
    let mut stats = TraceStats::default();
    for _ in 0..passes {
        stats.count(simulate(board, pattern, rng, max_steps));
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_STEPS_PER_PASS, PASSES_PER_ACTIVATION};
    use crate::sim::board::Layout;
    use crate::sim::piece::{Mirror, Splitter};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pos(row: usize, col: usize) -> CellPos {
        CellPos::new(row, col).unwrap()
    }

    fn board_with(pieces: &[(usize, usize, Piece)]) -> Board {
        let mut layout: Layout = Default::default();
        for &(row, col, piece) in pieces {
            layout[row][col] = piece;
        }
        Board::from_layout(&layout)
    }

    fn run_once(board: &Board, seed: u64) -> (BeamPattern, PassEnd) {
        let mut pattern = BeamPattern::new();
        let mut rng = Pcg32::seed_from_u64(seed);
        let end = simulate(board, &mut pattern, &mut rng, MAX_STEPS_PER_PASS);
        (pattern, end)
    }

    #[test]
    fn test_flag_bits_match_legacy_layout() {
        assert_eq!(BeamFlags::exited(Side::Top).bits(), 1);
        assert_eq!(BeamFlags::exited(Side::Bottom).bits(), 2);
        assert_eq!(BeamFlags::exited(Side::Left).bits(), 4);
        assert_eq!(BeamFlags::exited(Side::Right).bits(), 8);
        assert_eq!(BeamFlags::entered(Side::Top).bits(), 16);
        assert_eq!(BeamFlags::entered(Side::Bottom).bits(), 32);
        assert_eq!(BeamFlags::entered(Side::Left).bits(), 64);
        assert_eq!(BeamFlags::entered(Side::Right).bits(), 128);
    }

    #[test]
    fn test_empty_board_is_straight_line_on_entry_row() {
        let (pattern, end) = run_once(&Board::empty(), 1);
        assert_eq!(end, PassEnd::Exited);
        let straight = BeamFlags::entered(Side::Left) | BeamFlags::exited(Side::Right);
        for (p, flags) in pattern.iter() {
            if p.row == LASER_ENTRY_ROW {
                assert_eq!(flags, straight, "row cell {p}");
            } else {
                assert!(flags.is_empty(), "stray flags at {p}");
            }
        }
    }

    #[test]
    fn test_blocker_absorbs_without_light() {
        let board = board_with(&[(1, 2, Piece::Blocker)]);
        let (pattern, end) = run_once(&board, 1);
        assert_eq!(end, PassEnd::Absorbed(pos(1, 2)));
        assert!(pattern.get(pos(1, 2)).is_empty());
        assert!(pattern.get(pos(1, 1)).has_exit(Side::Right));
        assert!(pattern.get(pos(1, 3)).is_empty());
    }

    #[test]
    fn test_target_lights_only_through_its_face() {
        let board = board_with(&[(1, 3, Piece::Target(Side::Left))]);
        let (pattern, end) = run_once(&board, 1);
        assert_eq!(end, PassEnd::TargetLit(pos(1, 3)));
        assert_eq!(pattern.get(pos(1, 3)), BeamFlags::entered(Side::Left));
        assert_eq!(pattern.lit_targets(&board).collect::<Vec<_>>(), vec![pos(1, 3)]);

        let board = board_with(&[(1, 3, Piece::Target(Side::Top))]);
        let (pattern, end) = run_once(&board, 1);
        assert_eq!(end, PassEnd::Absorbed(pos(1, 3)));
        assert!(pattern.get(pos(1, 3)).is_empty());
        assert_eq!(pattern.lit_targets(&board).count(), 0);
    }

    #[test]
    fn test_mirror_turns_beam_down_onto_target() {
        let board = board_with(&[
            (1, 2, Piece::Mirror(Mirror::BottomLeft)),
            (4, 2, Piece::Target(Side::Top)),
        ]);
        let (pattern, end) = run_once(&board, 1);
        assert_eq!(end, PassEnd::TargetLit(pos(4, 2)));
        assert_eq!(
            pattern.get(pos(1, 2)),
            BeamFlags::entered(Side::Left) | BeamFlags::exited(Side::Bottom)
        );
        for row in 2..4 {
            assert_eq!(
                pattern.get(pos(row, 2)),
                BeamFlags::entered(Side::Top) | BeamFlags::exited(Side::Bottom)
            );
        }
        assert!(pattern.get(pos(1, 3)).is_empty());
    }

    #[test]
    fn test_mirror_back_face_halts() {
        let board = board_with(&[(1, 2, Piece::Mirror(Mirror::TopRight))]);
        let (pattern, end) = run_once(&board, 1);
        assert_eq!(end, PassEnd::Absorbed(pos(1, 2)));
        assert!(pattern.get(pos(1, 2)).is_empty());
    }

    #[test]
    fn test_transition_table_is_total() {
        for piece in Piece::ALL {
            for side in Side::ALL {
                for bounce in [false, true] {
                    let t = transition(piece, side, bounce);
                    if let Transition::Continue { exit } = t {
                        assert_ne!(exit, side, "{piece:?} sent the beam back out its entry");
                    }
                    if matches!(piece, Piece::Splitter(_)) {
                        assert!(matches!(t, Transition::Continue { .. }));
                    }
                }
            }
        }
    }

    #[test]
    fn test_splitter_ring_overruns_small_cap() {
        // Mirrors turn the pass-through branch back into the splitter from
        // below, where a bounce sends it round again. The escape branch
        // runs up into a target.
        let board = board_with(&[
            (0, 1, Piece::Target(Side::Bottom)),
            (1, 1, Piece::Splitter(Splitter::Slash)),
            (1, 3, Piece::Mirror(Mirror::BottomLeft)),
            (3, 3, Piece::Mirror(Mirror::TopLeft)),
            (3, 1, Piece::Mirror(Mirror::TopRight)),
        ]);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut stats = TraceStats::default();
        for _ in 0..400 {
            let mut pattern = BeamPattern::new();
            let end = simulate(&board, &mut pattern, &mut rng, 12);
            stats.count(end);
            match end {
                PassEnd::Overrun => {
                    // Path so far is kept, but a lost beam lights nothing
                    assert!(!pattern.is_clear());
                    assert_eq!(pattern.lit_targets(&board).count(), 0);
                    assert!(pattern.get(pos(1, 3)).has_exit(Side::Bottom));
                }
                PassEnd::TargetLit(at) => assert_eq!(at, pos(0, 1)),
                other => panic!("unexpected pass end {other:?}"),
            }
        }
        assert!(stats.overruns > 0, "{stats:?}");
        assert!(stats.targets_hit > 0, "{stats:?}");

        // The full cap still terminates every pass
        let mut pattern = BeamPattern::new();
        let stats = trace_beam(&board, &mut pattern, &mut rng, 400, MAX_STEPS_PER_PASS);
        assert_eq!(stats.passes, 400);
        assert_eq!(stats.exited + stats.absorbed, 0);
    }

    #[test]
    fn test_cap_of_zero_steps_is_overrun() {
        let (mut pattern, mut rng) = (BeamPattern::new(), Pcg32::seed_from_u64(0));
        assert_eq!(simulate(&Board::empty(), &mut pattern, &mut rng, 0), PassEnd::Overrun);
        assert!(pattern.is_clear());
    }

    #[test]
    fn test_trace_beam_clears_previous_pattern() {
        let mut pattern = BeamPattern::new();
        pattern.record(pos(4, 4), BeamFlags::entered(Side::Top));
        let mut rng = Pcg32::seed_from_u64(3);
        trace_beam(&Board::empty(), &mut pattern, &mut rng, 3, MAX_STEPS_PER_PASS);
        assert!(pattern.get(pos(4, 4)).is_empty());
    }

    #[test]
    fn test_multiple_passes_show_both_splitter_branches() {
        let board = board_with(&[(1, 2, Piece::Splitter(Splitter::Backslash))]);
        let mut pattern = BeamPattern::new();
        let mut rng = Pcg32::seed_from_u64(11);
        trace_beam(&board, &mut pattern, &mut rng, PASSES_PER_ACTIVATION, MAX_STEPS_PER_PASS);
        let flags = pattern.get(pos(1, 2));
        assert!(flags.has_entry(Side::Left));
        assert!(flags.has_exit(Side::Right));
        assert!(flags.has_exit(Side::Bottom));
    }

    #[test]
    fn test_splitter_coin_is_fair() {
        let board = board_with(&[(1, 2, Piece::Splitter(Splitter::Backslash))]);
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut bounces = 0u32;
        let passes = 10_000u32;
        for _ in 0..passes {
            let mut pattern = BeamPattern::new();
            simulate(&board, &mut pattern, &mut rng, MAX_STEPS_PER_PASS);
            if pattern.get(pos(1, 2)).has_exit(Side::Bottom) {
                bounces += 1;
            } else {
                assert!(pattern.get(pos(1, 2)).has_exit(Side::Right));
            }
        }
        // 4 standard deviations of a fair coin over 10k draws is 200
        let fraction = bounces as f64 / passes as f64;
        assert!((fraction - 0.5).abs() < 0.02, "bounce fraction {fraction}");
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let board = board_with(&[
            (1, 1, Piece::Splitter(Splitter::Slash)),
            (1, 3, Piece::Splitter(Splitter::Backslash)),
        ]);
        let mut a = BeamPattern::new();
        let mut b = BeamPattern::new();
        trace_beam(&board, &mut a, &mut Pcg32::seed_from_u64(99), 20, MAX_STEPS_PER_PASS);
        trace_beam(&board, &mut b, &mut Pcg32::seed_from_u64(99), 20, MAX_STEPS_PER_PASS);
        assert_eq!(a, b);
    }

    fn any_layout() -> impl Strategy<Value = Layout> {
        proptest::collection::vec(0..Piece::ALL.len(), 25).prop_map(|idx| {
            let mut layout: Layout = Default::default();
            for (i, piece_index) in idx.into_iter().enumerate() {
                layout[i / BOARD_SIZE][i % BOARD_SIZE] = Piece::ALL[piece_index];
            }
            layout
        })
    }

    proptest! {
        #[test]
        fn prop_simulate_terminates_within_cap(layout in any_layout(), seed in any::<u64>()) {
            let board = Board::from_layout(&layout);
            let mut pattern = BeamPattern::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let stats = trace_beam(&board, &mut pattern, &mut rng, 4, MAX_STEPS_PER_PASS);
            prop_assert_eq!(stats.passes, 4);
            // Tracing only reads the board
            prop_assert_eq!(board.layout(), layout);
        }

        #[test]
        fn prop_mirror_only_boards_never_overrun(layout in any_layout()) {
            // Without splitters the walk is reversible, so it can't enter a cycle
            let mut layout = layout;
            for row in layout.iter_mut() {
                for piece in row.iter_mut() {
                    if matches!(piece, Piece::Splitter(_)) {
                        *piece = Piece::Empty;
                    }
                }
            }
            let board = Board::from_layout(&layout);
            let mut pattern = BeamPattern::new();
            let mut rng = Pcg32::seed_from_u64(0);
            let end = simulate(&board, &mut pattern, &mut rng, MAX_STEPS_PER_PASS);
            prop_assert_ne!(end, PassEnd::Overrun);
        }
    }
}
