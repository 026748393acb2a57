use std::collections::HashSet;

use knights_tour::{
    Bounds, Position, Tour, TourSolver, VisitRecord,
    engine::{budget::SearchLimits, error::Error},
    possible_moves, solve,
};

fn assert_full_tour(tour: &Tour) {
    let bounds = tour.bounds();
    let path = tour.path();
    assert_eq!(path.len(), bounds.area());

    let distinct: HashSet<_> = path.iter().copied().collect();
    assert_eq!(distinct.len(), path.len());
    assert!(path.iter().all(|&p| bounds.contains(p)));

    for pair in path.windows(2) {
        assert!(
            possible_moves(pair[0], bounds).contains(&pair[1]),
            "{} -> {} is not a knight move",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn corner_of_five_by_five_has_two_moves() {
    let moves = possible_moves(Position::new(0, 0), Bounds::new(5, 5));
    assert_eq!(moves.as_slice(), &[Position::new(1, 2), Position::new(2, 1)]);
}

#[test]
fn fresh_five_by_five_from_corner() {
    let bounds = Bounds::new(5, 5);
    let tour = solve(Position::new(0, 0), bounds, &VisitRecord::new())
        .unwrap()
        .expect("5x5 has an open tour from a corner");
    assert_full_tour(&tour);
    assert_eq!(tour.path()[0], Position::new(0, 0));
}

#[test]
fn fresh_three_wide_four_high() {
    // Three columns, four rows: open tours exist from the corner, and the fresh search
    // backtracks exhaustively within its ordering, so it must find one.
    let bounds = Bounds::new(3, 4);
    let tour = solve(Position::new(0, 0), bounds, &VisitRecord::new())
        .unwrap()
        .expect("3x4 has an open tour from a corner");
    assert_full_tour(&tour);
}

#[test]
fn continuation_keeps_recorded_prefix() {
    let bounds = Bounds::new(5, 5);
    let record: VisitRecord = serde_json::from_str(r#"{"0,0": 1, "1,2": 2}"#).unwrap();
    let tour = solve(Position::new(1, 2), bounds, &record)
        .unwrap()
        .expect("the prefix (0,0) -> (1,2) extends to a full tour");
    assert_full_tour(&tour);
    assert_eq!(&tour.path()[..2], &[Position::new(0, 0), Position::new(1, 2)]);
}

#[test]
fn longer_prefix_is_preserved_in_order() {
    let bounds = Bounds::new(5, 5);
    let seed = solve(Position::new(0, 0), bounds, &VisitRecord::new()).unwrap().unwrap();
    let prefix: Vec<Position> = seed.path()[..6].to_vec();
    let record = VisitRecord::from_path(prefix.iter().copied());

    let tour = solve(prefix[5], bounds, &record)
        .unwrap()
        .expect("a prefix of a known tour can be completed");
    assert_full_tour(&tour);
    assert_eq!(&tour.path()[..6], prefix.as_slice());
}

#[test]
fn single_cell_board_is_trivially_toured() {
    let bounds = Bounds::new(1, 1);
    assert!(possible_moves(Position::new(0, 0), bounds).is_empty());
    let tour = solve(Position::new(0, 0), bounds, &VisitRecord::new()).unwrap().unwrap();
    assert_eq!(tour.path(), &[Position::new(0, 0)]);
}

#[test]
fn no_tour_means_none_never_a_partial_path() {
    for bounds in [Bounds::new(3, 3), Bounds::new(4, 4), Bounds::new(2, 2)] {
        assert_eq!(
            solve(Position::new(0, 0), bounds, &VisitRecord::new()),
            Ok(None),
            "{bounds}"
        );
    }
}

#[test]
fn repeated_solves_agree() {
    let bounds = Bounds::new(6, 5);
    let first = solve(Position::new(0, 0), bounds, &VisitRecord::new()).unwrap();
    let second = solve(Position::new(0, 0), bounds, &VisitRecord::new()).unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);

    let record = VisitRecord::from_path([Position::new(0, 0), Position::new(2, 1)]);
    let first = solve(Position::new(2, 1), Bounds::new(5, 5), &record).unwrap();
    let second = solve(Position::new(2, 1), Bounds::new(5, 5), &record).unwrap();
    assert_eq!(first, second);
}

#[test]
fn eight_by_eight_from_each_corner() {
    let bounds = Bounds::new(8, 8);
    let solver = TourSolver::new().with_limits(SearchLimits {
        max_nodes: Some(5_000_000),
        ..Default::default()
    });
    for start in bounds.corners() {
        let tour = solver
            .solve(start, bounds, &VisitRecord::new())
            .unwrap()
            .unwrap_or_else(|| panic!("no tour from {start}"));
        assert_full_tour(&tour);
        assert_eq!(tour.path()[0], start);
    }
}

#[test]
fn non_corner_start_on_rectangular_board() {
    let bounds = Bounds::new(7, 6);
    let start = Position::new(2, 3);
    let solver = TourSolver::new().with_limits(SearchLimits {
        max_nodes: Some(5_000_000),
        ..Default::default()
    });
    let tour = solver.solve(start, bounds, &VisitRecord::new()).unwrap().unwrap();
    assert_full_tour(&tour);
    assert_eq!(tour.path()[0], start);
}

#[test]
fn solved_tour_round_trips_through_its_record() {
    let bounds = Bounds::new(5, 5);
    let tour = solve(Position::new(0, 0), bounds, &VisitRecord::new()).unwrap().unwrap();
    let record = tour.to_visit_record();
    assert_eq!(record.len(), 25);

    // A complete record continues to itself.
    let last = record.last().unwrap();
    let again = solve(last, bounds, &record).unwrap().unwrap();
    assert_eq!(again, tour);
}

#[test]
fn malformed_records_are_rejected() {
    let bounds = Bounds::new(5, 5);
    let gap: VisitRecord = serde_json::from_str(r#"{"0,0": 1, "1,2": 3}"#).unwrap();
    assert_eq!(solve(Position::new(1, 2), bounds, &gap), Err(Error::MissingIndex(2)));

    let off_board: VisitRecord = serde_json::from_str(r#"{"7,7": 1}"#).unwrap();
    assert!(matches!(
        solve(Position::new(0, 0), bounds, &off_board),
        Err(Error::CellOutOfBounds { .. })
    ));

    let jump: VisitRecord = serde_json::from_str(r#"{"0,0": 1, "0,1": 2}"#).unwrap();
    let err = solve(Position::new(0, 1), bounds, &jump).unwrap_err();
    assert!(matches!(err, Error::IllegalStep { index: 2, .. }));
    assert!(err.is_invalid_input());
}

#[test]
fn budget_expiry_is_distinct_from_no_solution() {
    let bounds = Bounds::new(8, 8);
    let record = VisitRecord::from_path([Position::new(0, 0)]);
    let solver = TourSolver::new().with_limits(SearchLimits {
        max_nodes: Some(1_000),
        ..Default::default()
    });
    let err = solver.solve(Position::new(0, 0), bounds, &record).unwrap_err();
    assert!(matches!(err, Error::LimitExceeded { metric: "nodes", .. }));
    assert!(!err.is_invalid_input());
}
