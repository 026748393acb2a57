use std::collections::BTreeMap;

use super::{Bounds, Position};
use crate::engine::{
    error::{Error, Result},
    moves::is_knight_move,
};

/// The caller's live tour state: which cell was visited at which 1-based move number.
///
/// On the wire this is a map keyed by `"row,col"`, e.g. `{"0,0": 1, "1,2": 2}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "BTreeMap<String, usize>", into = "BTreeMap<String, usize>")]
pub struct VisitRecord {
    entries: BTreeMap<Position, usize>,
}

impl VisitRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the cells of `path` 1, 2, 3, ... in order.
    pub fn from_path<I>(path: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        Self {
            entries: path.into_iter().zip(1..).collect(),
        }
    }

    /// Record `position` as move `index`, returning the index it previously held.
    pub fn insert(&mut self, position: Position, index: usize) -> Option<usize> {
        self.entries.insert(position, index)
    }

    pub fn remove(&mut self, position: Position) -> Option<usize> {
        self.entries.remove(&position)
    }

    pub fn get(&self, position: Position) -> Option<usize> {
        self.entries.get(&position).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, usize)> + '_ {
        self.entries.iter().map(|(&p, &i)| (p, i))
    }

    /// The cell holding the highest move number, where the knight currently stands.
    pub fn last(&self) -> Option<Position> {
        self.entries.iter().max_by_key(|&(_, &i)| i).map(|(&p, _)| p)
    }

    /// Check the record against `bounds` and return its cells in visiting order.
    ///
    /// A valid record uses every index in `1..=len()` exactly once, stays on the board and only
    /// ever steps by a knight move.
    pub fn to_path(&self, bounds: Bounds) -> Result<Vec<Position>> {
        let mut ordered = Vec::with_capacity(self.entries.len());
        for (&position, &index) in &self.entries {
            if !bounds.contains(position) {
                return Err(Error::CellOutOfBounds { position, bounds });
            }
            if index == 0 {
                return Err(Error::ZeroIndex(position));
            }
            ordered.push((index, position));
        }
        ordered.sort_unstable();

        let mut path = Vec::with_capacity(ordered.len());
        let mut previous: Option<(usize, Position)> = None;
        for &(index, position) in &ordered {
            if let Some((prev_index, prev_position)) = previous
                && prev_index == index
            {
                return Err(Error::DuplicateIndex {
                    index,
                    first: prev_position,
                    second: position,
                });
            }
            let expected = path.len() + 1;
            if index != expected {
                return Err(Error::MissingIndex(expected));
            }
            if let Some((_, from)) = previous
                && !is_knight_move(from, position)
            {
                return Err(Error::IllegalStep {
                    index,
                    from,
                    to: position,
                });
            }
            path.push(position);
            previous = Some((index, position));
        }
        Ok(path)
    }
}

impl TryFrom<BTreeMap<String, usize>> for VisitRecord {
    type Error = Error;

    fn try_from(value: BTreeMap<String, usize>) -> Result<Self> {
        let entries = value
            .into_iter()
            .map(|(key, index)| Ok((key.parse::<Position>()?, index)))
            .collect::<Result<_>>()?;
        Ok(Self { entries })
    }
}

impl From<VisitRecord> for BTreeMap<String, usize> {
    fn from(value: VisitRecord) -> Self {
        value.entries.into_iter().map(|(p, i)| (p.to_string(), i)).collect()
    }
}

impl FromIterator<(Position, usize)> for VisitRecord {
    fn from_iter<I: IntoIterator<Item = (Position, usize)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
