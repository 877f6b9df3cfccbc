use gridpath_core::Point;

use crate::engine::{self, Algorithm, Outcome, Score, Scoring, StepObserver};
use crate::error::SearchError;
use crate::grid::Grid;
use crate::SearchEngine;

/// Uniform cost: priority g alone, no heuristic.
struct Dijkstra;

impl Scoring for Dijkstra {
    const ALGORITHM: Algorithm = Algorithm::Dijkstra;

    fn seed(_start: Point, _end: Point) -> Score {
        Score { cost: 0, key: 0 }
    }

    fn relax(current: Score, _next: Point, _end: Point) -> Score {
        let g = current.cost + 1;
        Score { cost: g, key: g }
    }
}

impl SearchEngine {
    /// Dijkstra (uniform-cost) search. Finds a shortest path, exploring in
    /// rings of equal distance from the start.
    pub fn dijkstra<O: StepObserver + ?Sized>(
        grid: &mut Grid,
        start: Point,
        end: Point,
        observer: &mut O,
    ) -> Result<Outcome, SearchError> {
        engine::search::<Dijkstra, O>(grid, start, end, observer)
    }
}
