//! Win evaluation
//!
//! A level is solved when the placed pieces equal its solution layout cell
//! for cell. Lock flags and the traced beam play no part.

use super::board::{Board, CellPos, Layout};

/// True iff every cell on `board` holds exactly the piece in `solution`
pub fn is_solved(board: &Board, solution: &Layout) -> bool {
    mismatches(board, solution).next().is_none()
}

/// Cells whose piece differs from the solution
pub fn mismatches<'a>(
    board: &'a Board,
    solution: &'a Layout,
) -> impl Iterator<Item = CellPos> + 'a {
    CellPos::all().filter(move |pos| board.piece(*pos) != solution[pos.row][pos.col])
}
