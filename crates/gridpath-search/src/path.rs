use gridpath_core::Point;

use crate::cell::Tag;
use crate::engine::StepObserver;
use crate::grid::Grid;

/// Walk `came_from` back from `end` and tag the route.
///
/// `came_from[i]` is the flat index of the predecessor of cell `i`, `None`
/// for the start (or any cell never reached). Every cell strictly between
/// start and end is tagged [`Tag::Path`]; the endpoints keep their tags.
/// The observer is called once, after the whole route is tagged.
///
/// Returns the route ordered from start to end.
pub fn reconstruct<O: StepObserver + ?Sized>(
    grid: &mut Grid,
    came_from: &[Option<usize>],
    end: Point,
    observer: &mut O,
) -> Vec<Point> {
    let mut route = Vec::new();
    let mut cur = grid.index_of(end);
    while let Some(i) = cur {
        route.push(grid.point(i));
        cur = came_from.get(i).copied().flatten();
        // Guard against a malformed map that loops back on itself.
        if route.len() > came_from.len() {
            break;
        }
    }
    route.reverse();

    if let [_, inner @ .., _] = route.as_slice() {
        for &p in inner {
            grid.mark(p, Tag::Path);
        }
    }
    observer.on_step(grid);
    route
}
