use std::ops::{Index, IndexMut};

use super::{Bounds, Position};

/// Dense row-major grid with one `T` per board cell.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Vec2D<T> {
    bounds: Bounds,
    data: Vec<T>,
}

impl<T> Vec2D<T> {
    pub fn new(bounds: Bounds) -> Self
    where
        T: Default + Clone,
    {
        Self::filled(bounds, T::default())
    }

    pub fn filled(bounds: Bounds, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            bounds,
            data: vec![value; bounds.area()],
        }
    }

    /// Build a grid by evaluating `f` once per cell.
    pub fn from_fn(bounds: Bounds, mut f: impl FnMut(Position) -> T) -> Self {
        Self {
            bounds,
            data: bounds.cells().map(&mut f).collect(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        if !self.bounds.contains(position) {
            return None;
        }
        self.data.get(position.row * self.bounds.width + position.col)
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        if !self.bounds.contains(position) {
            return None;
        }
        self.data.get_mut(position.row * self.bounds.width + position.col)
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, T> {
        // `chunks(0)` panics; a zero-width grid has no data anyway.
        self.data.chunks(self.bounds.width.max(1))
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }
}

impl<T> Index<Position> for Vec2D<T> {
    type Output = T;

    fn index(&self, position: Position) -> &Self::Output {
        &self.data[position.row * self.bounds.width + position.col]
    }
}

impl<T> IndexMut<Position> for Vec2D<T> {
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        &mut self.data[position.row * self.bounds.width + position.col]
    }
}
