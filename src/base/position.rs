use std::{fmt, str::FromStr};

use crate::engine::error::Error;

/// A cell on the board, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a `(drow, dcol)` offset, returning `None` if the result would be negative.
    pub fn offset(self, drow: isize, dcol: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(drow)?,
            col: self.col.checked_add_signed(dcol)?,
        })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// The key form used by visit records: `"<row>,<col>"`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidKey(s.to_owned());
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        Ok(Self {
            row: parse_component(row).ok_or_else(invalid)?,
            col: parse_component(col).ok_or_else(invalid)?,
        })
    }
}

/// Plain decimal digits only, no sign, no padding, no leading zeros.
fn parse_component(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) || (s.len() > 1 && s.starts_with('0')) {
        return None;
    }
    s.parse().ok()
}

/// Board dimensions. Immutable for the duration of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub width: usize,
    pub height: usize,
}

impl Bounds {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.height && position.col < self.width
    }

    /// The four corners: top-left, top-right, bottom-left, bottom-right.
    ///
    /// Must not be called on an empty board.
    pub fn corners(&self) -> [Position; 4] {
        let last_row = self.height - 1;
        let last_col = self.width - 1;
        [
            Position::new(0, 0),
            Position::new(0, last_col),
            Position::new(last_row, 0),
            Position::new(last_row, last_col),
        ]
    }

    /// Whether the cell lies within one cell of any edge.
    pub fn is_near_border(&self, position: Position) -> bool {
        position.row <= 1 || position.row + 2 >= self.height || position.col <= 1 || position.col + 2 >= self.width
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + use<> {
        let Bounds { width, height } = *self;
        (0..height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
