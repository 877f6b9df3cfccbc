use gridpath_core::Point;

use crate::engine::{self, Algorithm, Outcome, Score, Scoring, StepObserver};
use crate::error::SearchError;
use crate::grid::Grid;
use crate::heuristic::manhattan;
use crate::SearchEngine;

/// Priority h alone, improvement judged on h.
struct GreedyBestFirst;

impl Scoring for GreedyBestFirst {
    const ALGORITHM: Algorithm = Algorithm::GreedyBestFirst;

    fn seed(start: Point, end: Point) -> Score {
        let h = manhattan(start, end);
        Score { cost: h, key: h }
    }

    fn relax(_current: Score, next: Point, end: Point) -> Score {
        let h = manhattan(next, end);
        Score { cost: h, key: h }
    }
}

impl SearchEngine {
    /// Greedy best-first search: always expands the open cell that looks
    /// closest to the end. Usually fast, but the path is not guaranteed to
    /// be the shortest.
    pub fn greedy_best_first<O: StepObserver + ?Sized>(
        grid: &mut Grid,
        start: Point,
        end: Point,
        observer: &mut O,
    ) -> Result<Outcome, SearchError> {
        engine::search::<GreedyBestFirst, O>(grid, start, end, observer)
    }
}
