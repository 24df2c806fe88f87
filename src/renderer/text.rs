//! Plain-text rendering
//!
//! Each cell is three characters wide with a one-character gap between
//! neighbours. Locked pieces are bracketed with `[]` and lit pieces with
//! `**`. Lit empty cells and gaps are drawn as beam lines.

use std::fmt;

use crate::consts::{BOARD_SIZE, LASER_ENTRY_ROW};
use crate::levels::LevelCatalog;
use crate::sim::beam::BeamPattern;
use crate::sim::board::{Board, Cell, CellPos};
use crate::sim::lighting::{Glow, cell_glow, gap_below_lit, gap_right_lit};
use crate::sim::piece::Piece;
use crate::sim::session::{Session, SessionEvent, SessionPhase};

/// Three-character cell picture
fn cell_text(cell: Cell, glow: Glow) -> [char; 3] {
    let g = cell.piece.glyph();
    match glow {
        Glow::Dark if cell.locked => ['[', g, ']'],
        Glow::Dark => [' ', g, ' '],
        Glow::Horizontal => ['-', '-', '-'],
        Glow::Vertical => [' ', '|', ' '],
        Glow::Cross => ['-', '+', '-'],
        Glow::Target | Glow::Mirror | Glow::Split(_) | Glow::SplitMixed => ['*', g, '*'],
    }
}

/// A board with its beam overlay
pub struct BoardView<'a> {
    board: &'a Board,
    pattern: &'a BeamPattern,
    coordinates: bool,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a Board, pattern: &'a BeamPattern, coordinates: bool) -> Self {
        Self {
            board,
            pattern,
            coordinates,
        }
    }

    fn margin(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: Option<usize>,
        source: bool,
    ) -> fmt::Result {
        if self.coordinates {
            match label {
                Some(row) => write!(f, "{row} ")?,
                None => write!(f, "  ")?,
            }
        }
        f.write_str(if source { "=>" } else { "  " })
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coordinates {
            self.margin(f, None, false)?;
            for col in 0..BOARD_SIZE {
                write!(f, " {col}  ")?;
            }
            writeln!(f)?;
        }

        for row in 0..BOARD_SIZE {
            self.margin(f, Some(row), row == LASER_ENTRY_ROW)?;
            for col in 0..BOARD_SIZE {
                let pos = CellPos { row, col };
                let glow = cell_glow(self.board, self.pattern, pos);
                let text: String = cell_text(self.board.cell(pos), glow).iter().collect();
                f.write_str(&text)?;
                let gap = if gap_right_lit(self.pattern, pos) {
                    '-'
                } else {
                    ' '
                };
                write!(f, "{gap}")?;
            }
            writeln!(f)?;

            if row + 1 < BOARD_SIZE {
                self.margin(f, None, false)?;
                for col in 0..BOARD_SIZE {
                    let pos = CellPos { row, col };
                    let gap = if gap_below_lit(self.pattern, pos) {
                        " |  "
                    } else {
                        "    "
                    };
                    f.write_str(gap)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Full session picture: status line, board, hand and held piece
pub struct SessionView<'a, C: LevelCatalog> {
    session: &'a Session<C>,
    coordinates: bool,
    solution: bool,
}

impl<'a, C: LevelCatalog> SessionView<'a, C> {
    pub fn new(session: &'a Session<C>, coordinates: bool) -> Self {
        Self {
            session,
            coordinates,
            solution: false,
        }
    }

    /// Draw the level's solution instead of the player's board
    pub fn with_solution(mut self) -> Self {
        self.solution = true;
        self
    }
}

impl<C: LevelCatalog> fmt::Display for SessionView<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.session;
        write!(f, "Level {}/{}", s.level_number(), s.level_count())?;
        match (s.phase(), s.solved()) {
            (SessionPhase::BeamActive, Some(true)) => write!(f, "  beam ON  solved!")?,
            (SessionPhase::BeamActive, _) => write!(f, "  beam ON  not solved")?,
            (SessionPhase::Idle, _) => write!(f, "  beam off")?,
        }
        if s.cleared() {
            write!(f, "  [cleared]")?;
        }
        writeln!(f)?;

        if self.solution {
            writeln!(f, "(solution)")?;
            let board = s.reveal_solution();
            write!(f, "{}", BoardView::new(&board, &BeamPattern::new(), self.coordinates))?;
        } else {
            write!(f, "{}", BoardView::new(s.board(), s.pattern(), self.coordinates))?;
        }

        write!(f, "hand:")?;
        for (i, piece) in s.hand().iter().enumerate() {
            write!(f, " {i}:{}", piece.glyph())?;
        }
        writeln!(f)?;

        if let Some(held) = s.held() {
            writeln!(f, "holding {} from {}", held.piece.glyph(), held.origin)?;
        }
        Ok(())
    }
}

/// One-line description of a session event
pub fn describe_event(event: &SessionEvent) -> String {
    match *event {
        SessionEvent::LevelLoaded { number } => format!("level {number} loaded"),
        SessionEvent::PiecePicked { from, piece } => {
            format!("picked {} from {from}", piece.glyph())
        }
        SessionEvent::PieceRotated { at: Some(at), piece } => {
            format!("{at} now {}", piece.glyph())
        }
        SessionEvent::PieceRotated { at: None, piece } => format!("holding {}", piece.glyph()),
        SessionEvent::PieceDropped {
            at,
            piece,
            returned: true,
        } => format!("{} returned to {at}", piece.glyph()),
        SessionEvent::PieceDropped { at, piece, .. } => {
            format!("placed {} at {at}", piece.glyph())
        }
        SessionEvent::BeamFired { solved: true } => "beam on: level solved!".to_string(),
        SessionEvent::BeamFired { solved: false } => "beam on".to_string(),
        SessionEvent::BeamCleared => "beam off".to_string(),
    }
}

/// Glyph key for the help screen
pub fn legend() -> String {
    let mut out = String::from("pieces:");
    for piece in Piece::ALL {
        out.push_str(&format!(" {}={:?}", piece.glyph(), piece));
    }
    out
}
