use crate::base::{Bounds, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    EmptyBoard(Bounds),
    StartOutOfBounds {
        start: Position,
        bounds: Bounds,
    },
    CellOutOfBounds {
        position: Position,
        bounds: Bounds,
    },
    InvalidKey(String),
    ZeroIndex(Position),
    DuplicateIndex {
        index: usize,
        first: Position,
        second: Position,
    },
    MissingIndex(usize),
    IllegalStep {
        index: usize,
        from: Position,
        to: Position,
    },
    StartMismatch {
        expected: Position,
        actual: Position,
    },
    RevisitedCell {
        position: Position,
        first: usize,
        second: usize,
    },
    IncompleteTour {
        visited: usize,
        area: usize,
    },
    LimitExceeded {
        metric: &'static str,
        limit: u64,
        observed: u64,
    },
    Cancelled {
        nodes: u64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error rejects the caller's input rather than reporting a search budget expiry.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Error::LimitExceeded { .. } | Error::Cancelled { .. })
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyBoard(bounds) => write!(f, "board {bounds} has no cells"),
            Error::StartOutOfBounds { start, bounds } => {
                write!(f, "start cell ({start}) is outside the {bounds} board")
            },
            Error::CellOutOfBounds { position, bounds } => {
                write!(f, "visited cell ({position}) is outside the {bounds} board")
            },
            Error::InvalidKey(key) => write!(f, "invalid cell key {key:?}, expected \"row,col\""),
            Error::ZeroIndex(position) => write!(f, "cell ({position}) has move index 0, indices start at 1"),
            Error::DuplicateIndex { index, first, second } => {
                write!(f, "move {index} is recorded at both ({first}) and ({second})")
            },
            Error::MissingIndex(index) => write!(f, "move {index} is missing from the visit record"),
            Error::IllegalStep { index, from, to } => {
                write!(f, "move {index} from ({from}) to ({to}) is not a knight move")
            },
            Error::StartMismatch { expected, actual } => {
                write!(
                    f,
                    "search must continue from the last visited cell ({expected}), not ({actual})"
                )
            },
            Error::RevisitedCell { position, first, second } => {
                write!(f, "cell ({position}) is visited by both move {first} and move {second}")
            },
            Error::IncompleteTour { visited, area } => {
                write!(f, "tour visits {visited} of {area} cells")
            },
            Error::LimitExceeded { metric, limit, observed } => {
                write!(f, "search limit exceeded: {metric} {observed} > {limit}")
            },
            Error::Cancelled { nodes } => write!(f, "search cancelled after {nodes} nodes"),
        }
    }
}

impl std::error::Error for Error {}
