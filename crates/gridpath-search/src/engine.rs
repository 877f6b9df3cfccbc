//! The traversal contract shared by every algorithm and the skeleton that
//! implements it.

use std::fmt;
use std::str::FromStr;

use gridpath_core::Point;

use crate::cell::Tag;
use crate::error::{ParseAlgorithmError, SearchError};
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::path;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Which search to run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
    GreedyBestFirst,
}

impl Algorithm {
    /// Every algorithm, in cycling order.
    pub const ALL: [Algorithm; 3] = [Self::AStar, Self::Dijkstra, Self::GreedyBestFirst];

    pub fn label(self) -> &'static str {
        match self {
            Self::AStar => "A*",
            Self::Dijkstra => "Dijkstra",
            Self::GreedyBestFirst => "Greedy best-first",
        }
    }

    /// The next algorithm in [`ALL`](Algorithm::ALL), wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::AStar => Self::Dijkstra,
            Self::Dijkstra => Self::GreedyBestFirst,
            Self::GreedyBestFirst => Self::AStar,
        }
    }

    /// Whether the algorithm always returns a shortest path.
    pub fn is_optimal(self) -> bool {
        !matches!(self, Self::GreedyBestFirst)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            "dijkstra" | "ucs" => Ok(Self::Dijkstra),
            "greedy" | "gbfs" | "greedy-best-first" => Ok(Self::GreedyBestFirst),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// Receives the grid after every expansion step.
///
/// `on_step` is synchronous: the search does not continue until it
/// returns. `cancelled` is polled once per iteration; returning `true`
/// stops the run immediately with [`Outcome::Cancelled`], leaving the tags
/// as they are.
pub trait StepObserver {
    fn on_step(&mut self, grid: &Grid);

    fn cancelled(&mut self) -> bool {
        false
    }
}

impl<F: FnMut(&Grid)> StepObserver for F {
    fn on_step(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// An observer that ignores every step and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _grid: &Grid) {}
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// A route found by a successful search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    cells: Vec<Point>,
    expanded: usize,
}

impl Route {
    /// Cells from start to end, both included.
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Number of moves (edges) along the route.
    pub fn len(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of cells expanded before the end was reached.
    pub fn expanded(&self) -> usize {
        self.expanded
    }
}

/// How a search run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found(Route),
    /// The open set ran dry before reaching the end.
    NoPath { expanded: usize },
    /// The observer asked to stop.
    Cancelled { expanded: usize },
}

impl Outcome {
    /// `true` only for [`Outcome::Found`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Found(r) => Some(r),
            _ => None,
        }
    }

    pub fn expanded(&self) -> usize {
        match self {
            Self::Found(r) => r.expanded,
            Self::NoPath { expanded } | Self::Cancelled { expanded } => *expanded,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// Stateless entry point to the three searches.
///
/// Every method has the same contract: refresh adjacency, search from
/// `start` to `end` calling `observer` after each expansion, and leave the
/// grid tagged with what was explored. On success the route is tagged
/// [`Tag::Path`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchEngine;

impl SearchEngine {
    /// Run `algorithm`. Same contract as the per-algorithm methods.
    pub fn run<O: StepObserver + ?Sized>(
        algorithm: Algorithm,
        grid: &mut Grid,
        start: Point,
        end: Point,
        observer: &mut O,
    ) -> Result<Outcome, SearchError> {
        match algorithm {
            Algorithm::AStar => Self::astar(grid, start, end, observer),
            Algorithm::Dijkstra => Self::dijkstra(grid, start, end, observer),
            Algorithm::GreedyBestFirst => Self::greedy_best_first(grid, start, end, observer),
        }
    }

    /// Run `algorithm` between the grid's own start and end cells.
    pub fn solve<O: StepObserver + ?Sized>(
        algorithm: Algorithm,
        grid: &mut Grid,
        observer: &mut O,
    ) -> Result<Outcome, SearchError> {
        let start = grid.start().ok_or(SearchError::MissingEndpoint("start"))?;
        let end = grid.end().ok_or(SearchError::MissingEndpoint("end"))?;
        Self::run(algorithm, grid, start, end, observer)
    }
}

// ---------------------------------------------------------------------------
// Shared skeleton
// ---------------------------------------------------------------------------

/// A node's score during one run.
///
/// `cost` is what improvements are judged on (g for A* and Dijkstra, h for
/// greedy best-first); `key` is the queue priority.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Score {
    pub(crate) cost: i32,
    pub(crate) key: i32,
}

impl Score {
    /// Not reached yet: worse than any real score.
    pub(crate) const UNREACHED: Self = Self {
        cost: i32::MAX,
        key: i32::MAX,
    };
}

/// The per-algorithm scoring rule; the only point where the searches differ.
pub(crate) trait Scoring {
    const ALGORITHM: Algorithm;

    /// Score of the start cell.
    fn seed(start: Point, end: Point) -> Score;

    /// Candidate score for reaching `next` from a cell scored `current`.
    fn relax(current: Score, next: Point, end: Point) -> Score;
}

/// Bookkeeping private to one run, indexed by cell.
struct RunState {
    scores: Vec<Score>,
    came_from: Vec<Option<usize>>,
    open: Vec<bool>,
}

impl RunState {
    fn new(len: usize) -> Self {
        Self {
            scores: vec![Score::UNREACHED; len],
            came_from: vec![None; len],
            open: vec![false; len],
        }
    }
}

fn validate(grid: &Grid, start: Point, end: Point) -> Result<(), SearchError> {
    for p in [start, end] {
        match grid.tag(p) {
            None => return Err(SearchError::OutOfBounds(p)),
            Some(Tag::Obstacle) => return Err(SearchError::BlockedEndpoint(p)),
            Some(_) => {}
        }
    }
    if start == end {
        return Err(SearchError::SameEndpoints(start));
    }
    Ok(())
}

pub(crate) fn search<S: Scoring, O: StepObserver + ?Sized>(
    grid: &mut Grid,
    start: Point,
    end: Point,
    observer: &mut O,
) -> Result<Outcome, SearchError> {
    validate(grid, start, end)?;
    log::debug!(
        "{} from {start} to {end} on a {n}x{n} grid",
        S::ALGORITHM,
        n = grid.rows()
    );

    grid.refresh_adjacency();
    let mut state = RunState::new(grid.len());
    let mut frontier = Frontier::new();
    let mut nbuf: Vec<Point> = Vec::with_capacity(4);
    let mut expanded = 0;

    let si = grid.index_of(start).ok_or(SearchError::OutOfBounds(start))?;
    let seed = S::seed(start, end);
    state.scores[si] = seed;
    state.open[si] = true;
    frontier.push(seed.key, start);

    while !frontier.is_empty() {
        if observer.cancelled() {
            log::info!("{} cancelled after {expanded} expansions", S::ALGORITHM);
            return Ok(Outcome::Cancelled { expanded });
        }
        let Some(entry) = frontier.pop() else {
            break;
        };
        let Some(ci) = grid.index_of(entry.pos) else {
            continue;
        };
        state.open[ci] = false;

        if entry.pos == end {
            let cells = path::reconstruct(grid, &state.came_from, end, observer);
            grid.set_tag(start, Tag::Start);
            grid.set_tag(end, Tag::End);
            observer.on_step(grid);
            log::info!(
                "{} found a {}-step path after {expanded} expansions",
                S::ALGORITHM,
                cells.len().saturating_sub(1)
            );
            return Ok(Outcome::Found(Route { cells, expanded }));
        }
        expanded += 1;

        let current = state.scores[ci];
        nbuf.clear();
        if let Some(cell) = grid.get(entry.pos) {
            nbuf.extend_from_slice(cell.neighbors());
        }
        for &np in &nbuf {
            let Some(ni) = grid.index_of(np) else {
                continue;
            };
            let candidate = S::relax(current, np, end);
            if candidate.cost >= state.scores[ni].cost {
                continue;
            }
            state.scores[ni] = candidate;
            state.came_from[ni] = Some(ci);
            // An open cell keeps its queued entry and counter.
            if !state.open[ni] {
                frontier.push(candidate.key, np);
                state.open[ni] = true;
                grid.mark(np, Tag::Frontier);
            }
        }

        observer.on_step(grid);
        if entry.pos != start {
            grid.mark(entry.pos, Tag::Visited);
        }
    }

    log::info!("{} found no path after {expanded} expansions", S::ALGORITHM);
    Ok(Outcome::NoPath { expanded })
}
