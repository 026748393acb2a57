use log::debug;

use super::{
    Problem, Solver,
    budget::SearchBudget,
    error::Result,
    moves::Moves,
    search::{self, SearchState, SearchStrategy},
};
use crate::base::Position;

/// Exhaustive backtracking that extends a partially walked tour, trying moves in canonical order.
///
/// The search is complete for its move order: `None` means no tour extends the given prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContinuationSearch;

impl SearchStrategy for ContinuationSearch {
    fn candidates(&self, from: Position, state: &SearchState) -> Moves {
        state.unvisited_moves(from)
    }
}

impl Solver for ContinuationSearch {
    fn solve(&self, problem: &Problem, budget: &mut SearchBudget) -> Result<Option<Vec<Position>>> {
        debug!(
            "Continuing a {}-move tour from ({}) on a {} board",
            problem.prefix().len(),
            problem.start(),
            problem.bounds()
        );
        let mut state = SearchState::from_path(problem.bounds(), problem.prefix().to_vec());
        if search::extend(self, &mut state, budget)? {
            Ok(Some(state.into_path()))
        } else {
            Ok(None)
        }
    }
}
