//! Depth-first backtracking shared by every tour strategy.
//!
//! The search keeps an explicit stack of frames, one per entered cell, so the depth of a tour is
//! bounded by the heap rather than the thread's call stack. A strategy only decides which
//! neighbours to try next and in which order.

use log::trace;

use super::{
    budget::SearchBudget,
    error::Result,
    moves::{Moves, possible_moves},
};
use crate::base::{Bounds, Position, Vec2D};

/// Visited cells plus the path that visited them, for one solve call.
#[derive(Debug, Clone)]
pub struct SearchState {
    bounds: Bounds,
    visited: Vec2D<bool>,
    path: Vec<Position>,
}

impl SearchState {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            visited: Vec2D::new(bounds),
            path: Vec::with_capacity(bounds.area()),
        }
    }

    /// Start from an already walked path.
    ///
    /// The path must be in bounds and free of repeats; [`crate::base::VisitRecord::to_path`]
    /// guarantees both.
    pub fn from_path(bounds: Bounds, path: Vec<Position>) -> Self {
        let mut state = Self::new(bounds);
        for position in path {
            state.enter(position);
        }
        state
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_visited(&self, position: Position) -> bool {
        self.visited.get(position).copied().unwrap_or(false)
    }

    /// Number of cells on the path so far.
    pub fn move_count(&self) -> usize {
        self.path.len()
    }

    pub fn current(&self) -> Option<Position> {
        self.path.last().copied()
    }

    pub fn is_complete(&self) -> bool {
        self.path.len() == self.bounds.area()
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn into_path(self) -> Vec<Position> {
        self.path
    }

    /// Knight moves from `from` that land on cells not yet visited, in canonical order.
    pub fn unvisited_moves(&self, from: Position) -> Moves {
        possible_moves(from, self.bounds)
            .into_iter()
            .filter(|&p| !self.is_visited(p))
            .collect()
    }

    fn enter(&mut self, position: Position) {
        self.visited[position] = true;
        self.path.push(position);
    }

    fn leave(&mut self) {
        if let Some(position) = self.path.pop() {
            self.visited[position] = false;
        }
    }
}

/// Decides which cells the search tries after `from`, and in which order.
pub trait SearchStrategy {
    /// Candidate next cells. Only unvisited cells are ever entered.
    fn candidates(&self, from: Position, state: &SearchState) -> Moves;
}

struct Frame {
    candidates: Moves,
    next: usize,
}

impl Frame {
    fn new(candidates: Moves) -> Self {
        Self { candidates, next: 0 }
    }

    fn advance(&mut self) -> Option<Position> {
        let candidate = self.candidates.get(self.next).copied();
        self.next += 1;
        candidate
    }
}

/// Extend the path in `state` from its last cell until every cell is visited.
///
/// Returns `Ok(true)` with the full tour left in `state`, or `Ok(false)` once every branch has
/// been exhausted, in which case `state` is exactly as it was on entry.
pub fn extend<S>(strategy: &S, state: &mut SearchState, budget: &mut SearchBudget) -> Result<bool>
where
    S: SearchStrategy + ?Sized,
{
    let Some(current) = state.current() else {
        return Ok(false);
    };
    if state.is_complete() {
        return Ok(true);
    }

    let mut stack = Vec::with_capacity(state.bounds.area() - state.move_count());
    stack.push(Frame::new(strategy.candidates(current, state)));

    while let Some(frame) = stack.last_mut() {
        match frame.advance() {
            Some(next) => {
                if state.is_visited(next) {
                    continue;
                }
                budget.charge()?;
                state.enter(next);
                if state.is_complete() {
                    return Ok(true);
                }
                stack.push(Frame::new(strategy.candidates(next, state)));
            },
            None => {
                stack.pop();
                // The bottom frame belongs to the cell we started from, which stays.
                if !stack.is_empty() {
                    state.leave();
                }
            },
        }
    }

    trace!(
        "Exhausted all branches after move {} ({} nodes so far)",
        state.move_count(),
        budget.nodes()
    );
    Ok(false)
}

/// Enter `start` and search onward from it, undoing the entry if no tour is found.
pub fn extend_from<S>(strategy: &S, state: &mut SearchState, start: Position, budget: &mut SearchBudget) -> Result<bool>
where
    S: SearchStrategy + ?Sized,
{
    if state.is_visited(start) {
        return Ok(false);
    }
    budget.charge()?;
    state.enter(start);
    if extend(strategy, state, budget)? {
        return Ok(true);
    }
    state.leave();
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{budget::SearchLimits, error::Error};

    struct CanonicalOrder;

    impl SearchStrategy for CanonicalOrder {
        fn candidates(&self, from: Position, state: &SearchState) -> Moves {
            state.unvisited_moves(from)
        }
    }

    #[test]
    fn failed_search_restores_state() {
        let bounds = Bounds::new(4, 4);
        let prefix = vec![Position::new(0, 0), Position::new(1, 2)];
        let mut state = SearchState::from_path(bounds, prefix.clone());
        let found = extend(&CanonicalOrder, &mut state, &mut SearchBudget::unlimited()).unwrap();
        assert!(!found);
        assert_eq!(state.path(), prefix.as_slice());
        let visited = bounds.cells().filter(|&p| state.is_visited(p)).count();
        assert_eq!(visited, 2);
    }

    #[test]
    fn extend_from_undoes_the_start_on_failure() {
        let bounds = Bounds::new(3, 3);
        let mut state = SearchState::new(bounds);
        let found = extend_from(&CanonicalOrder, &mut state, Position::new(0, 0), &mut SearchBudget::unlimited());
        assert_eq!(found, Ok(false));
        assert_eq!(state.move_count(), 0);
        assert!(!state.is_visited(Position::new(0, 0)));
    }

    #[test]
    fn single_cell_board_is_complete_on_entry() {
        let mut state = SearchState::new(Bounds::new(1, 1));
        let found = extend_from(&CanonicalOrder, &mut state, Position::new(0, 0), &mut SearchBudget::unlimited());
        assert_eq!(found, Ok(true));
        assert_eq!(state.into_path(), vec![Position::new(0, 0)]);
    }

    #[test]
    fn budget_errors_abort_the_search() {
        let limits = SearchLimits {
            max_nodes: Some(5),
            ..Default::default()
        };
        let mut budget = SearchBudget::new(limits, None);
        let mut state = SearchState::new(Bounds::new(8, 8));
        let result = extend_from(&CanonicalOrder, &mut state, Position::new(0, 0), &mut budget);
        assert!(matches!(result, Err(Error::LimitExceeded { metric: "nodes", .. })));
    }
}
