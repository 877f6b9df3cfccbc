use std::fmt;

use gridpath_core::Point;

/// Reasons a search refuses to start.
///
/// Finding no path and being cancelled are ordinary
/// [`Outcome`](crate::Outcome)s, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// An endpoint is not on the grid.
    OutOfBounds(Point),
    /// Start and end are the same cell.
    SameEndpoints(Point),
    /// An endpoint is an obstacle.
    BlockedEndpoint(Point),
    /// The grid has no start or no end set.
    MissingEndpoint(&'static str),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "endpoint {p} is outside the grid"),
            Self::SameEndpoints(p) => write!(f, "start and end are both {p}"),
            Self::BlockedEndpoint(p) => write!(f, "endpoint {p} is an obstacle"),
            Self::MissingEndpoint(which) => write!(f, "no {which} cell set"),
        }
    }
}

impl std::error::Error for SearchError {}

/// An algorithm name that [`Algorithm::from_str`](crate::Algorithm) did not
/// recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected astar, dijkstra or greedy)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}
