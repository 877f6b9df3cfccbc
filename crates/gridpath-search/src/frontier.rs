//! The open-set priority queue shared by every algorithm.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridpath_core::Point;

/// One queued position.
///
/// Entries order by `priority`, then by `seq`: among equal priorities the
/// one pushed first pops first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub priority: i32,
    pub seq: u64,
    pub pos: Point,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest (priority, seq) first.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue with FIFO tie-breaking.
///
/// The insertion counter starts at 0 and grows by one per push, so a run's
/// expansion order depends only on the pushes it makes.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `pos` at `priority`, returning the sequence number it got.
    pub fn push(&mut self, priority: i32, pos: Point) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { priority, seq, pos });
        seq
    }

    /// Remove the lowest-priority, earliest-pushed entry.
    pub fn pop(&mut self) -> Option<Entry> {
        self.heap.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_priority_first() {
        let mut f = Frontier::new();
        f.push(5, Point::new(0, 0));
        f.push(1, Point::new(1, 0));
        f.push(3, Point::new(2, 0));
        let order: Vec<i32> = std::iter::from_fn(|| f.pop()).map(|e| e.priority).collect();
        assert_eq!(order, vec![1, 3, 5]);
    }

    #[test]
    fn equal_priorities_pop_in_insertion_order() {
        let mut f = Frontier::new();
        let pts: Vec<Point> = (0..6).map(|i| Point::new(i, 0)).collect();
        for &p in &pts {
            f.push(2, p);
        }
        f.push(1, Point::new(9, 9));
        assert_eq!(f.pop().map(|e| e.pos), Some(Point::new(9, 9)));
        let rest: Vec<Point> = std::iter::from_fn(|| f.pop()).map(|e| e.pos).collect();
        assert_eq!(rest, pts);
    }

    #[test]
    fn counter_starts_at_zero_and_increments() {
        let mut f = Frontier::new();
        assert_eq!(f.push(0, Point::ZERO), 0);
        assert_eq!(f.push(0, Point::ZERO), 1);
        f.pop();
        assert_eq!(f.push(0, Point::ZERO), 2);
        assert_eq!(f.len(), 2);
    }
}
