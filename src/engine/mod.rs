use std::sync::{Arc, atomic::AtomicBool};

use log::{debug, info};

use crate::base::{Bounds, Position, Tour, VisitRecord};

pub mod budget;
pub mod continuation;
pub mod error;
pub mod moves;
pub mod search;
pub mod warnsdorff;

use budget::{SearchBudget, SearchLimits};
use error::{Error, Result};

pub use moves::possible_moves;

/// Continue a recorded tour if there is one, otherwise search from scratch.
pub fn default_engine() -> impl Solver {
    select(
        Problem::is_continuation,
        continuation::ContinuationSearch,
        warnsdorff::HeuristicFreshSearch,
    )
}

/// A validated solve request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    start: Position,
    bounds: Bounds,
    prefix: Vec<Position>,
}

impl Problem {
    /// Check the request and rehydrate `record` into the already walked prefix of the tour.
    pub fn new(start: Position, bounds: Bounds, record: &VisitRecord) -> Result<Self> {
        if bounds.is_empty() {
            return Err(Error::EmptyBoard(bounds));
        }
        if !bounds.contains(start) {
            return Err(Error::StartOutOfBounds { start, bounds });
        }
        let prefix = record.to_path(bounds)?;
        if let Some(&last) = prefix.last()
            && last != start
        {
            return Err(Error::StartMismatch {
                expected: last,
                actual: start,
            });
        }
        Ok(Self { start, bounds, prefix })
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Cells already visited, in order. Empty for a fresh search.
    pub fn prefix(&self) -> &[Position] {
        &self.prefix
    }

    pub fn is_continuation(&self) -> bool {
        !self.prefix.is_empty()
    }
}

pub trait Solver: Send + Sync {
    /// Find a full tour for `problem`, beginning with its prefix.
    ///
    /// `Ok(None)` means the solver's search policy found no tour.
    fn solve(&self, problem: &Problem, budget: &mut SearchBudget) -> Result<Option<Vec<Position>>>;
}

#[derive(Debug, Clone)]
struct SolverCombinerSelect<F, T, U>
where
    F: Fn(&Problem) -> bool + Send + Sync + 'static,
    T: Solver + 'static,
    U: Solver + 'static,
{
    condition: F,
    yes: T,
    no: U,
}

impl<F, T, U> Solver for SolverCombinerSelect<F, T, U>
where
    F: Fn(&Problem) -> bool + Send + Sync + 'static,
    T: Solver + 'static,
    U: Solver + 'static,
{
    fn solve(&self, problem: &Problem, budget: &mut SearchBudget) -> Result<Option<Vec<Position>>> {
        if (self.condition)(problem) {
            self.yes.solve(problem, budget)
        } else {
            self.no.solve(problem, budget)
        }
    }
}

/// Selects between two solvers based on a condition evaluated on the problem.
pub fn select<F, T, U>(condition: F, yes: T, no: U) -> impl Solver
where
    F: Fn(&Problem) -> bool + Send + Sync + 'static,
    T: Solver + 'static,
    U: Solver + 'static,
{
    SolverCombinerSelect { condition, yes, no }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Continuation,
    Heuristic,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Continuation => write!(f, "continuation"),
            Strategy::Heuristic => write!(f, "heuristic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SearchStats {
    pub strategy: Strategy,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

/// Entry point for solving tours. Holds only the caller's limits; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct TourSolver {
    limits: SearchLimits,
    cancel: Option<Arc<AtomicBool>>,
}

impl TourSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Abort the search with [`Error::Cancelled`] once `flag` is raised.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Complete the tour in `record` from `start`, or find one from scratch if `record` is empty.
    ///
    /// The returned tour always covers the whole board and begins with the recorded moves.
    pub fn solve(&self, start: Position, bounds: Bounds, record: &VisitRecord) -> Result<Option<Tour>> {
        self.solve_with_stats(start, bounds, record).map(|(tour, _)| tour)
    }

    pub fn solve_with_stats(
        &self,
        start: Position,
        bounds: Bounds,
        record: &VisitRecord,
    ) -> Result<(Option<Tour>, SearchStats)> {
        let problem = Problem::new(start, bounds, record).inspect_err(|e| debug!("Rejected solve request: {e}"))?;
        let strategy = if problem.is_continuation() {
            Strategy::Continuation
        } else {
            Strategy::Heuristic
        };
        debug!("Solving {bounds} from ({start}) with {strategy} search, limits {:?}", self.limits);

        let mut budget = SearchBudget::new(self.limits, self.cancel.clone());
        let path = default_engine()
            .solve(&problem, &mut budget)
            .inspect_err(|e| info!("Search stopped after {} nodes: {e}", budget.nodes()))?;

        let stats = SearchStats {
            strategy,
            nodes: budget.nodes(),
            elapsed_ms: budget.elapsed().as_millis().try_into().unwrap_or(u64::MAX),
        };
        match &path {
            Some(_) => debug!("Found a tour with {strategy} search in {} nodes", stats.nodes),
            None => info!("No tour found on {bounds} from ({start}) after {} nodes", stats.nodes),
        }
        Ok((path.map(|path| Tour::new(bounds, path)), stats))
    }
}

/// Solve with no search limits.
pub fn solve(start: Position, bounds: Bounds, record: &VisitRecord) -> Result<Option<Tour>> {
    TourSolver::new().solve(start, bounds, record)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;

    #[test]
    fn empty_record_uses_heuristic_search() {
        let (tour, stats) = TourSolver::new()
            .solve_with_stats(Position::new(0, 0), Bounds::new(5, 5), &VisitRecord::new())
            .unwrap();
        assert_eq!(stats.strategy, Strategy::Heuristic);
        assert!(stats.nodes >= 25);
        assert!(tour.unwrap().is_complete());
    }

    #[test]
    fn recorded_moves_use_continuation_search() {
        let record = VisitRecord::from_path([Position::new(0, 0), Position::new(1, 2)]);
        let (tour, stats) = TourSolver::new()
            .solve_with_stats(Position::new(1, 2), Bounds::new(5, 5), &record)
            .unwrap();
        assert_eq!(stats.strategy, Strategy::Continuation);
        let tour = tour.unwrap();
        assert!(tour.is_complete());
        assert_eq!(&tour.path()[..2], &[Position::new(0, 0), Position::new(1, 2)]);
    }

    #[test]
    fn invalid_requests_are_rejected_before_searching() {
        let bounds = Bounds::new(5, 5);
        assert_eq!(
            solve(Position::new(0, 0), Bounds::new(0, 5), &VisitRecord::new()),
            Err(Error::EmptyBoard(Bounds::new(0, 5)))
        );
        assert_eq!(
            solve(Position::new(5, 0), bounds, &VisitRecord::new()),
            Err(Error::StartOutOfBounds {
                start: Position::new(5, 0),
                bounds,
            })
        );
        let record = VisitRecord::from_path([Position::new(0, 0), Position::new(1, 2)]);
        let err = solve(Position::new(0, 0), bounds, &record).unwrap_err();
        assert_eq!(
            err,
            Error::StartMismatch {
                expected: Position::new(1, 2),
                actual: Position::new(0, 0),
            }
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn exhausted_budget_is_not_a_missing_solution() {
        let record = VisitRecord::from_path([Position::new(0, 0)]);
        let solver = TourSolver::new().with_limits(SearchLimits {
            max_nodes: Some(10),
            ..Default::default()
        });
        let err = solver.solve(Position::new(0, 0), Bounds::new(8, 8), &record).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded { metric: "nodes", limit: 10, .. }));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn raised_cancel_flag_stops_the_search() {
        let flag = Arc::new(AtomicBool::new(false));
        flag.store(true, Ordering::Relaxed);
        let solver = TourSolver::new().with_cancel_flag(flag);
        let err = solver
            .solve(Position::new(0, 0), Bounds::new(6, 6), &VisitRecord::new())
            .unwrap_err();
        assert_eq!(err, Error::Cancelled { nodes: 1 });
    }
}
