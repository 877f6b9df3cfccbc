use gridpath_core::Point;

use crate::engine::{self, Algorithm, Outcome, Score, Scoring, StepObserver};
use crate::error::SearchError;
use crate::grid::Grid;
use crate::heuristic::manhattan;
use crate::SearchEngine;

/// Priority g + h, improvement judged on g.
struct AStar;

impl Scoring for AStar {
    const ALGORITHM: Algorithm = Algorithm::AStar;

    fn seed(start: Point, end: Point) -> Score {
        Score {
            cost: 0,
            key: manhattan(start, end),
        }
    }

    fn relax(current: Score, next: Point, end: Point) -> Score {
        let g = current.cost + 1;
        Score {
            cost: g,
            key: g + manhattan(next, end),
        }
    }
}

impl SearchEngine {
    /// A* search with the Manhattan heuristic. Always finds a shortest path
    /// when one exists.
    pub fn astar<O: StepObserver + ?Sized>(
        grid: &mut Grid,
        start: Point,
        end: Point,
        observer: &mut O,
    ) -> Result<Outcome, SearchError> {
        engine::search::<AStar, O>(grid, start, end, observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoopObserver, Tag};

    /// Records cells in the order they turn `Visited`.
    #[derive(Default)]
    struct VisitOrder {
        last: Vec<Tag>,
        order: Vec<Point>,
    }

    impl StepObserver for VisitOrder {
        fn on_step(&mut self, grid: &Grid) {
            let now = grid.tags();
            if self.last.len() == now.len() {
                for (i, (&before, &after)) in self.last.iter().zip(&now).enumerate() {
                    if after == Tag::Visited && before != Tag::Visited {
                        self.order.push(grid.point(i));
                    }
                }
            }
            self.last = now;
        }
    }

    #[test]
    fn open_grid_path_is_manhattan() {
        let mut g = Grid::build(5, 5);
        let (s, e) = (Point::at(0, 0), Point::at(4, 4));
        let out = SearchEngine::astar(&mut g, s, e, &mut NoopObserver).unwrap();
        let route = out.route().unwrap();
        assert_eq!(route.len(), 8);
        assert_eq!(route.cells().first(), Some(&s));
        assert_eq!(route.cells().last(), Some(&e));
        assert_eq!(g.tags().iter().filter(|&&t| t == Tag::Path).count(), 7);
    }

    #[test]
    fn heuristic_focuses_the_search() {
        // Straight corridor goal: A* should expand only the cells on the line.
        let mut g = Grid::build(9, 9);
        let out =
            SearchEngine::astar(&mut g, Point::at(4, 0), Point::at(4, 8), &mut NoopObserver)
                .unwrap();
        assert_eq!(out.expanded(), 8);
    }

    #[test]
    fn walled_off_end_is_no_path() {
        let mut g = Grid::build(4, 4);
        for p in [Point::at(2, 3), Point::at(3, 2)] {
            g.set_obstacle(p);
        }
        let out =
            SearchEngine::astar(&mut g, Point::at(0, 0), Point::at(3, 3), &mut NoopObserver)
                .unwrap();
        assert_eq!(out, Outcome::NoPath { expanded: 13 });
        assert_eq!(g.tag(Point::at(3, 3)), Some(Tag::Default));
    }

    #[test]
    fn improved_open_cell_keeps_its_queue_slot() {
        //   . . . . #
        //   . . . # E
        //   S # . . .
        //   . . . . .
        //   . . . . .
        //
        // (3, 2) is first opened from (2, 2) with g = 5, then improved to
        // g = 3 from (3, 1) while still queued. It keeps its original entry,
        // so the run finishes before the detour below the wall is explored.
        let mut g = Grid::build(5, 5);
        for p in [Point::at(0, 4), Point::at(1, 3), Point::at(2, 1)] {
            g.set_obstacle(p);
        }
        let (s, e) = (Point::at(2, 0), Point::at(1, 4));
        let mut log = VisitOrder::default();
        let out = SearchEngine::astar(&mut g, s, e, &mut log).unwrap();

        assert_eq!(out.route().map(|r| r.len()), Some(7));
        assert_eq!(out.expanded(), 13);
        let expected = [
            (1, 0),
            (1, 1),
            (1, 2),
            (3, 0),
            (0, 0),
            (0, 1),
            (0, 2),
            (2, 2),
            (3, 1),
            (0, 3),
            (2, 3),
        ]
        .map(|(r, c)| Point::at(r, c));
        assert_eq!(log.order, expected);
    }
}
