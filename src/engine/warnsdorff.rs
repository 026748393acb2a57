//! Fresh-start search ordered by Warnsdorff's rule.
//!
//! Every step prefers the neighbour that is hardest to reach later, which on most boards walks
//! straight into a tour with little or no backtracking. Backtracking is still exhaustive within
//! this ordering, but the ordering is never revisited, so `None` from here is a statement about
//! the policy, not a proof that the board has no tour from the start cell.

use log::{debug, trace};
use smallvec::SmallVec;

use super::{
    Problem, Solver,
    budget::SearchBudget,
    error::Result,
    moves::{Moves, possible_moves},
    search::{self, SearchState, SearchStrategy},
};
use crate::base::{Bounds, Position, Vec2D};

/// A start cell tried by [`HeuristicFreshSearch`], in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAttempt {
    /// The requested start is one of the four corners, which are strong starting points for
    /// open tours.
    Corner(Position),
    /// The requested start itself.
    Requested(Position),
}

impl StartAttempt {
    pub fn cell(&self) -> Position {
        match *self {
            StartAttempt::Corner(p) | StartAttempt::Requested(p) => p,
        }
    }
}

/// Start attempts for `start`: each corner equal to it, then the cell itself.
///
/// Other corners are never tried; the search always respects the requested start.
pub fn start_attempts(bounds: Bounds, start: Position) -> SmallVec<[StartAttempt; 5]> {
    let mut attempts: SmallVec<[StartAttempt; 5]> = bounds
        .corners()
        .into_iter()
        .filter(|&corner| corner == start)
        .map(StartAttempt::Corner)
        .collect();
    attempts.push(StartAttempt::Requested(start));
    attempts
}

/// Warnsdorff move ordering for one board size.
#[derive(Debug, Clone)]
pub struct WarnsdorffOrder {
    accessibility: Vec2D<u8>,
}

impl WarnsdorffOrder {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            accessibility: Vec2D::from_fn(bounds, |p| possible_moves(p, bounds).len() as u8),
        }
    }

    /// Number of knight moves from `position` on the empty board.
    pub fn accessibility(&self, position: Position) -> u8 {
        self.accessibility[position]
    }

    /// Sum, over each unvisited neighbour of `position`, of that neighbour's unvisited neighbours.
    ///
    /// Lower means more constrained.
    pub fn access_score(&self, position: Position, state: &SearchState) -> usize {
        state
            .unvisited_moves(position)
            .into_iter()
            .map(|neighbour| state.unvisited_moves(neighbour).len())
            .sum()
    }

    /// Search for a full tour starting at `start` on an empty board.
    pub fn find_tour(&self, start: Position, budget: &mut SearchBudget) -> Result<Option<Vec<Position>>> {
        let bounds = self.accessibility.bounds();
        let mut exhausted: SmallVec<[Position; 5]> = SmallVec::new();
        for attempt in start_attempts(bounds, start) {
            let cell = attempt.cell();
            // The search is deterministic, so a cell that failed once fails again.
            if exhausted.contains(&cell) {
                trace!("Skipping {attempt:?}, already exhausted");
                continue;
            }
            trace!("Trying {attempt:?}");
            let mut state = SearchState::new(bounds);
            if search::extend_from(self, &mut state, cell, budget)? {
                debug!("Found a tour from {attempt:?} after {} nodes", budget.nodes());
                return Ok(Some(state.into_path()));
            }
            exhausted.push(cell);
        }
        debug!(
            "No tour from ({start}) on a {bounds} board after {} nodes",
            budget.nodes()
        );
        Ok(None)
    }
}

impl SearchStrategy for WarnsdorffOrder {
    /// Unvisited moves sorted by access score, then (during the first half of the tour) cells
    /// near the border first, then by static accessibility. The sort is stable, so full ties
    /// keep canonical move order.
    fn candidates(&self, from: Position, state: &SearchState) -> Moves {
        let bounds = state.bounds();
        let first_half = 2 * state.move_count() < bounds.area();
        let mut scored: SmallVec<[(Position, (usize, bool, u8)); 8]> = state
            .unvisited_moves(from)
            .into_iter()
            .map(|p| {
                let interior = first_half && !bounds.is_near_border(p);
                (p, (self.access_score(p, state), interior, self.accessibility(p)))
            })
            .collect();
        scored.sort_by_key(|&(_, key)| key);
        scored.into_iter().map(|(p, _)| p).collect()
    }
}

/// The fresh-start solver: builds a [`WarnsdorffOrder`] for the board and searches from the
/// requested start.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicFreshSearch;

impl Solver for HeuristicFreshSearch {
    fn solve(&self, problem: &Problem, budget: &mut SearchBudget) -> Result<Option<Vec<Position>>> {
        debug!(
            "Searching a fresh tour from ({}) on a {} board",
            problem.start(),
            problem.bounds()
        );
        WarnsdorffOrder::new(problem.bounds()).find_tour(problem.start(), budget)
    }
}
