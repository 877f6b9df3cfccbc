use gridpath_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible and consistent for 4-directional unit-cost movement.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
