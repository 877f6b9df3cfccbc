//! The [`Grid`] type, a square board of [`Cell`]s.
//!
//! The grid is the single owner of its cells and is rebuilt in place on
//! reset, so positions handed out earlier never dangle: they either still
//! index a cell or fall out of bounds.

use gridpath_core::{Point, Range};
use rand::{Rng, RngExt};

use crate::cell::{Cell, Tag};
use crate::neighbors::Neighbors;

/// A square `rows` × `rows` grid.
///
/// At most one cell is tagged [`Tag::Start`] and at most one [`Tag::End`];
/// the tag setters maintain this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    gap: i32,
    bounds: Range,
    cells: Vec<Cell>,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Allocate a `rows` × `rows` grid that fits in `pixel_width` pixels.
    ///
    /// `pixel_width` only determines how pointer positions are quantised
    /// (see [`cell_at_pixel`](Grid::cell_at_pixel)).
    pub fn build(rows: i32, pixel_width: i32) -> Self {
        let mut grid = Self {
            rows: 0,
            gap: 1,
            bounds: Range::default(),
            cells: Vec::new(),
            start: None,
            end: None,
        };
        grid.rebuild(rows, pixel_width);
        grid
    }

    /// Clear and reinitialise this grid in place.
    pub fn rebuild(&mut self, rows: i32, pixel_width: i32) {
        let rows = rows.max(1);
        self.rows = rows;
        self.gap = (pixel_width / rows).max(1);
        self.bounds = Range::new(0, 0, rows, rows);
        self.cells.clear();
        self.cells.reserve(self.bounds.len());
        self.cells
            .extend(self.bounds.iter().map(|p| Cell::new(p.row(), p.col())));
        self.start = None;
        self.end = None;
    }

    /// Grid dimension (rows = columns).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Pixels per cell along each axis.
    #[inline]
    pub fn gap(&self) -> i32 {
        self.gap
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat row-major index of `p`.
    #[inline]
    pub fn index_of(&self, p: Point) -> Option<usize> {
        self.bounds.index_of(p)
    }

    /// Position of the cell at flat index `idx`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.bounds.point_at(idx)
    }

    /// Direct lookup.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid.
    pub fn cell_at(&self, row: i32, col: i32) -> &Cell {
        match self.get(Point::at(row, col)) {
            Some(c) => c,
            None => panic!("cell ({row}, {col}) outside {}x{} grid", self.rows, self.rows),
        }
    }

    /// Mutable direct lookup. [`Cell`] has no public setters, so tags still
    /// change only through [`set_tag`](Grid::set_tag) and its wrappers.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid.
    pub fn cell_at_mut(&mut self, row: i32, col: i32) -> &mut Cell {
        let rows = self.rows;
        match self.get_mut(Point::at(row, col)) {
            Some(c) => c,
            None => panic!("cell ({row}, {col}) outside {rows}x{rows} grid"),
        }
    }

    #[inline]
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.index_of(p).map(|i| &self.cells[i])
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.index_of(p).map(|i| &mut self.cells[i])
    }

    /// The cell under pixel position `px`, or `None` outside the grid.
    pub fn cell_at_pixel(&self, px: Point) -> Option<Point> {
        if px.x < 0 || px.y < 0 {
            return None;
        }
        let p = Point::at(px.y / self.gap, px.x / self.gap);
        self.contains(p).then_some(p)
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Snapshot of every display tag, row-major.
    pub fn tags(&self) -> Vec<Tag> {
        self.cells.iter().map(Cell::tag).collect()
    }

    // -----------------------------------------------------------------------
    // Authoring
    // -----------------------------------------------------------------------

    #[inline]
    pub fn tag(&self, p: Point) -> Option<Tag> {
        self.get(p).map(Cell::tag)
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Both endpoints, when set.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((self.start?, self.end?))
    }

    /// Set the tag at `p`, keeping the single-start / single-end invariant.
    ///
    /// Tagging a cell `Start` (or `End`) moves the endpoint there and resets
    /// the previous one to `Default`. Overwriting an endpoint with any other
    /// tag unsets it. Returns `false` if `p` is outside the grid.
    pub fn set_tag(&mut self, p: Point, tag: Tag) -> bool {
        let Some(i) = self.index_of(p) else {
            return false;
        };
        if self.start == Some(p) {
            self.start = None;
        }
        if self.end == Some(p) {
            self.end = None;
        }
        match tag {
            Tag::Start => {
                if let Some(old) = self.start.replace(p) {
                    self.reset_cell(old);
                }
            }
            Tag::End => {
                if let Some(old) = self.end.replace(p) {
                    self.reset_cell(old);
                }
            }
            _ => {}
        }
        self.cells[i].tag = tag;
        true
    }

    pub fn set_start(&mut self, p: Point) -> bool {
        self.set_tag(p, Tag::Start)
    }

    pub fn set_end(&mut self, p: Point) -> bool {
        self.set_tag(p, Tag::End)
    }

    pub fn set_obstacle(&mut self, p: Point) -> bool {
        self.set_tag(p, Tag::Obstacle)
    }

    pub fn erase(&mut self, p: Point) -> bool {
        self.set_tag(p, Tag::Default)
    }

    fn reset_cell(&mut self, p: Point) {
        if let Some(cell) = self.get_mut(p) {
            cell.tag = Tag::Default;
        }
    }

    /// Reset every `Frontier`, `Visited` and `Path` tag to `Default`.
    /// Obstacles and endpoints are kept.
    pub fn clear_search_marks(&mut self) {
        for c in self.cells.iter_mut().filter(|c| c.tag.is_search_mark()) {
            c.tag = Tag::Default;
        }
    }

    /// Turn each non-endpoint cell into an obstacle with probability
    /// `density`, clearing everything else that is not an endpoint.
    /// Returns the number of obstacles placed.
    pub fn scatter_obstacles(&mut self, rng: &mut impl Rng, density: f64) -> usize {
        let mut placed = 0;
        for c in self.cells.iter_mut().filter(|c| !c.tag.is_endpoint()) {
            let r: f64 = rng.random();
            c.tag = if r < density {
                placed += 1;
                Tag::Obstacle
            } else {
                Tag::Default
            };
        }
        placed
    }

    /// Display-only retag used while searching. Endpoints keep their tag.
    pub(crate) fn mark(&mut self, p: Point, tag: Tag) {
        if let Some(cell) = self.get_mut(p) {
            if !cell.tag.is_endpoint() {
                cell.tag = tag;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Recompute every cell's neighbour list from scratch: the in-bounds
    /// 4-adjacent cells that are not obstacles.
    pub fn refresh_adjacency(&mut self) {
        let blocked: Vec<bool> = self.cells.iter().map(Cell::is_obstacle).collect();
        let bounds = self.bounds;
        let passable = |q: Point| bounds.index_of(q).is_some_and(|i| !blocked[i]);
        let mut nb = Neighbors::new();
        for cell in &mut self.cells {
            cell.neighbors.clear();
            cell.neighbors
                .extend_from_slice(nb.cardinal(cell.pos(), passable));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn build_allocates_square() {
        let g = Grid::build(5, 100);
        assert_eq!(g.rows(), 5);
        assert_eq!(g.len(), 25);
        assert_eq!(g.gap(), 20);
        let c = g.cell_at(3, 1);
        assert_eq!((c.row(), c.col()), (3, 1));
        assert!(g.iter().all(|c| c.tag() == Tag::Default && c.neighbors().is_empty()));
    }

    #[test]
    fn cell_at_mut_reaches_the_same_cell() {
        let mut g = Grid::build(4, 4);
        g.cell_at_mut(2, 3).tag = Tag::Visited;
        assert_eq!(g.cell_at(2, 3).tag(), Tag::Visited);
        assert_eq!(g.tag(Point::at(2, 3)), Some(Tag::Visited));
    }

    #[test]
    #[should_panic]
    fn cell_at_out_of_bounds_panics() {
        Grid::build(3, 3).cell_at(3, 0);
    }

    #[test]
    fn pixel_quantisation() {
        let g = Grid::build(4, 80);
        assert_eq!(g.cell_at_pixel(Point::new(0, 0)), Some(Point::at(0, 0)));
        assert_eq!(g.cell_at_pixel(Point::new(45, 19)), Some(Point::at(0, 2)));
        assert_eq!(g.cell_at_pixel(Point::new(79, 79)), Some(Point::at(3, 3)));
        assert_eq!(g.cell_at_pixel(Point::new(80, 0)), None);
        assert_eq!(g.cell_at_pixel(Point::new(-1, 0)), None);
    }

    #[test]
    fn single_start_and_end() {
        let mut g = Grid::build(4, 4);
        g.set_start(Point::at(0, 0));
        g.set_start(Point::at(1, 1));
        assert_eq!(g.tag(Point::at(0, 0)), Some(Tag::Default));
        assert_eq!(g.start(), Some(Point::at(1, 1)));

        g.set_end(Point::at(2, 2));
        assert_eq!(g.endpoints(), Some((Point::at(1, 1), Point::at(2, 2))));

        // Moving the end onto the start steals the cell.
        g.set_end(Point::at(1, 1));
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), Some(Point::at(1, 1)));
        assert_eq!(g.tag(Point::at(2, 2)), Some(Tag::Default));
        let starts = g.iter().filter(|c| c.tag() == Tag::Start).count();
        let ends = g.iter().filter(|c| c.tag() == Tag::End).count();
        assert_eq!((starts, ends), (0, 1));
    }

    #[test]
    fn obstacle_over_endpoint_unsets_it() {
        let mut g = Grid::build(3, 3);
        g.set_end(Point::at(1, 1));
        g.set_obstacle(Point::at(1, 1));
        assert_eq!(g.end(), None);
        assert!(!g.set_obstacle(Point::at(5, 5)));
    }

    #[test]
    fn adjacency_excludes_obstacles_and_edges() {
        let mut g = Grid::build(3, 3);
        g.set_obstacle(Point::at(0, 1));
        g.refresh_adjacency();
        assert_eq!(g.cell_at(0, 0).neighbors(), &[Point::at(1, 0)]);
        assert_eq!(
            g.cell_at(1, 1).neighbors(),
            &[Point::at(2, 1), Point::at(1, 0), Point::at(1, 2)]
        );
        // Obstacle edits after the refresh are not seen until the next one.
        g.erase(Point::at(0, 1));
        assert_eq!(g.cell_at(0, 0).neighbors().len(), 1);
        g.refresh_adjacency();
        assert_eq!(g.cell_at(0, 0).neighbors().len(), 2);
    }

    #[test]
    fn rebuild_resets_in_place() {
        let mut g = Grid::build(3, 3);
        g.set_start(Point::at(0, 0));
        g.set_obstacle(Point::at(1, 1));
        g.rebuild(6, 12);
        assert_eq!(g.len(), 36);
        assert_eq!(g.gap(), 2);
        assert_eq!(g.start(), None);
        assert!(g.iter().all(|c| c.tag() == Tag::Default));
    }

    #[test]
    fn clear_search_marks_keeps_authored_tags() {
        let mut g = Grid::build(3, 3);
        g.set_start(Point::at(0, 0));
        g.set_obstacle(Point::at(0, 1));
        g.mark(Point::at(1, 0), Tag::Visited);
        g.mark(Point::at(2, 0), Tag::Path);
        g.mark(Point::at(0, 0), Tag::Visited);
        g.clear_search_marks();
        assert_eq!(g.tag(Point::at(0, 0)), Some(Tag::Start));
        assert_eq!(g.tag(Point::at(0, 1)), Some(Tag::Obstacle));
        assert!(g.tags().iter().all(|t| !t.is_search_mark()));
    }

    #[test]
    fn scatter_spares_endpoints() {
        let mut g = Grid::build(10, 10);
        g.set_start(Point::at(0, 0));
        g.set_end(Point::at(9, 9));
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let placed = g.scatter_obstacles(&mut rng, 1.0);
        assert_eq!(placed, 98);
        assert_eq!(g.endpoints(), Some((Point::at(0, 0), Point::at(9, 9))));
        let placed = g.scatter_obstacles(&mut rng, 0.0);
        assert_eq!(placed, 0);
    }
}
