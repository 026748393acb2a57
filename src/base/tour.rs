use super::{Bounds, Position, Vec2D, VisitRecord};
use crate::engine::{
    error::{Error, Result},
    moves::is_knight_move,
};

/// An ordered sequence of visited cells on a board of known size.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tour {
    bounds: Bounds,
    path: Vec<Position>,
}

impl Tour {
    pub fn new(bounds: Bounds, path: Vec<Position>) -> Self {
        Self { bounds, path }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn into_path(self) -> Vec<Position> {
        self.path
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.verify().is_ok()
    }

    /// Check that the path stays on the board, only makes knight moves, never revisits a cell and
    /// covers the whole board.
    pub fn verify(&self) -> Result<()> {
        let mut seen: Vec2D<Option<usize>> = Vec2D::new(self.bounds);
        for (index, &position) in (1..).zip(&self.path) {
            let Some(slot) = seen.get_mut(position) else {
                return Err(Error::CellOutOfBounds {
                    position,
                    bounds: self.bounds,
                });
            };
            if let Some(first) = *slot {
                return Err(Error::RevisitedCell {
                    position,
                    first,
                    second: index,
                });
            }
            *slot = Some(index);
        }
        for (index, pair) in (2..).zip(self.path.windows(2)) {
            if !is_knight_move(pair[0], pair[1]) {
                return Err(Error::IllegalStep {
                    index,
                    from: pair[0],
                    to: pair[1],
                });
            }
        }
        if self.path.len() != self.bounds.area() {
            return Err(Error::IncompleteTour {
                visited: self.path.len(),
                area: self.bounds.area(),
            });
        }
        Ok(())
    }

    /// Number the cells of the tour in visiting order.
    pub fn to_visit_record(&self) -> VisitRecord {
        VisitRecord::from_path(self.path.iter().copied())
    }

    /// Move numbers laid out on the board, `None` for cells the tour never reaches.
    pub fn numbering(&self) -> Vec2D<Option<usize>> {
        let mut grid = Vec2D::new(self.bounds);
        for (index, &position) in (1..).zip(&self.path) {
            if let Some(slot) = grid.get_mut(position) {
                *slot = Some(index);
            }
        }
        grid
    }
}

impl IntoIterator for Tour {
    type Item = Position;
    type IntoIter = std::vec::IntoIter<Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.path.into_iter()
    }
}
