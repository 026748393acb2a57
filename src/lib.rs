//! Knight's Tour solving: legal move generation, completion of a partially walked tour, and
//! Warnsdorff-ordered search for a fresh one.
//!
//! ```
//! use knights_tour::{Bounds, Position, VisitRecord, solve};
//!
//! let tour = solve(Position::new(0, 0), Bounds::new(5, 5), &VisitRecord::new())
//!     .unwrap()
//!     .expect("5x5 has a tour from a corner");
//! assert_eq!(tour.len(), 25);
//! ```

pub mod base;
pub mod config;
pub mod engine;
pub mod error;
pub mod utils;

pub use base::{Bounds, Position, Tour, VisitRecord};
pub use engine::{TourSolver, possible_moves, solve};
