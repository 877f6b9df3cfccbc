//! The [`Cell`] type and its display [`Tag`].

use gridpath_core::Point;

/// What a cell currently shows.
///
/// `Obstacle`, `Start` and `End` are authored by the user. `Frontier`,
/// `Visited` and `Path` are written by a search run as it progresses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    #[default]
    Default,
    Obstacle,
    Start,
    End,
    /// Discovered, waiting in the open set.
    Frontier,
    /// Expanded.
    Visited,
    /// Part of the reconstructed route.
    Path,
}

impl Tag {
    /// Whether the tag was written by a search run.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Frontier | Self::Visited | Self::Path)
    }

    /// Whether the tag marks one of the two endpoints.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

/// A single grid position.
///
/// The neighbour list holds the positions of the traversable 4-adjacent
/// cells as of the last [`Grid::refresh_adjacency`](crate::Grid::refresh_adjacency).
/// It is a plain list of coordinates; the grid owns every cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    pub(crate) tag: Tag,
    pub(crate) neighbors: Vec<Point>,
}

impl Cell {
    pub(crate) fn new(row: i32, col: i32) -> Self {
        Self {
            pos: Point::at(row, col),
            tag: Tag::Default,
            neighbors: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row()
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col()
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Traversable neighbours, in up, down, left, right order.
    #[inline]
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }

    #[inline]
    pub fn is_obstacle(&self) -> bool {
        self.tag == Tag::Obstacle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_blank() {
        let c = Cell::new(2, 5);
        assert_eq!((c.row(), c.col()), (2, 5));
        assert_eq!(c.pos(), Point::new(5, 2));
        assert_eq!(c.tag(), Tag::Default);
        assert!(c.neighbors().is_empty());
    }

    #[test]
    fn tag_classes() {
        for t in [Tag::Frontier, Tag::Visited, Tag::Path] {
            assert!(t.is_search_mark());
            assert!(!t.is_endpoint());
        }
        for t in [Tag::Default, Tag::Obstacle, Tag::Start, Tag::End] {
            assert!(!t.is_search_mark());
        }
        assert!(Tag::Start.is_endpoint() && Tag::End.is_endpoint());
    }
}
