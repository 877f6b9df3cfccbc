//! Grid pathfinding with observable, cancellable searches.
//!
//! A [`Grid`] is a square board of [`Cell`]s, each carrying a display
//! [`Tag`]. [`SearchEngine`] runs one of three best-first searches over it:
//!
//! - **A\*** ([`SearchEngine::astar`]): priority g + h, shortest paths
//! - **Dijkstra** ([`SearchEngine::dijkstra`]): priority g, shortest paths
//! - **Greedy best-first** ([`SearchEngine::greedy_best_first`]): priority
//!   h only, fast but not optimal
//!
//! All three share one skeleton and one signature. A [`StepObserver`] is
//! called after every expansion so a front end can redraw, and is polled
//! once per iteration for cancellation. The only state left behind on the
//! grid is the display tag of each cell; scores, predecessors and open-set
//! membership live in the run itself.
//!
//! Movement is 4-directional with unit cost and the heuristic is
//! [`manhattan`] distance.

mod astar;
mod cell;
mod dijkstra;
mod engine;
mod error;
mod frontier;
mod greedy;
mod grid;
mod heuristic;
mod neighbors;
mod path;

pub use cell::{Cell, Tag};
pub use engine::{Algorithm, NoopObserver, Outcome, Route, SearchEngine, StepObserver};
pub use error::{ParseAlgorithmError, SearchError};
pub use frontier::{Entry, Frontier};
pub use grid::Grid;
pub use heuristic::manhattan;
pub use path::reconstruct;
