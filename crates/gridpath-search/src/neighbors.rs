use gridpath_core::Point;

/// Reusable buffer for cardinal neighbour enumeration.
pub(crate) struct Neighbors {
    buf: Vec<Point>,
}

impl Neighbors {
    pub(crate) fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// 4-directional neighbours of `p` (up, down, left, right) for which
    /// `keep` returns `true`.
    pub(crate) fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        self.buf
            .extend(p.neighbors_4().into_iter().filter(|&n| keep(n)));
        &self.buf
    }
}
