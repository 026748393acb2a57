use smallvec::SmallVec;

use crate::base::{Bounds, Position};

/// Legal destinations of a single knight, at most eight.
pub type Moves = SmallVec<[Position; 8]>;

/// Knight offsets as `(drow, dcol)`, in the canonical enumeration order.
///
/// Callers that do not re-sort rely on this order, so it must never change.
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Enumerate the cells a knight on `position` can jump to without leaving the board.
pub fn possible_moves(position: Position, bounds: Bounds) -> Moves {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(drow, dcol)| position.offset(drow, dcol))
        .filter(|p| bounds.contains(*p))
        .collect()
}

pub fn is_knight_move(from: Position, to: Position) -> bool {
    let drow = from.row.abs_diff(to.row);
    let dcol = from.col.abs_diff(to.col);
    (drow == 1 && dcol == 2) || (drow == 2 && dcol == 1)
}
