//! The character canvas a [`Model`](crate::Model) draws into, and the
//! [`Frame`] diffs a [`Driver`](crate::Driver) flushes.

use crate::geom::{Point, Range};
use crate::style::Style;

/// A styled character: the unit the canvas is made of.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// An owned, fixed-size 2D buffer of [`Glyph`]s.
///
/// Writes outside the bounds are ignored; reads outside return the default
/// glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    glyphs: Vec<Glyph>,
    bounds: Range,
}

impl Canvas {
    /// Create a blank canvas of `width` × `height`.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::sized(Point::new(width, height));
        Self {
            glyphs: vec![Glyph::default(); bounds.len()],
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Read the glyph at `p`.
    pub fn at(&self, p: Point) -> Glyph {
        self.bounds
            .index_of(p)
            .map(|i| self.glyphs[i])
            .unwrap_or_default()
    }

    /// Set the glyph at `p`. No-op outside the bounds.
    pub fn set(&mut self, p: Point, glyph: Glyph) {
        if let Some(i) = self.bounds.index_of(p) {
            self.glyphs[i] = glyph;
        }
    }

    /// Write `text` left to right starting at `p`, clipped to the canvas.
    /// Returns the position just past the last character written.
    pub fn text(&mut self, p: Point, text: &str, style: Style) -> Point {
        let mut q = p;
        for ch in text.chars() {
            if q.x >= self.bounds.max.x {
                break;
            }
            self.set(q, Glyph::new(ch, style));
            q = q.shift(1, 0);
        }
        q
    }

    /// Fill every glyph with `glyph`.
    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Resize to `width` × `height`, discarding the old content.
    pub fn resize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }

    /// Row-major iterator over `(Point, Glyph)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Glyph)> + '_ {
        self.bounds.iter().zip(self.glyphs.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// A single glyph that changed between two canvases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub glyph: Glyph,
    pub pos: Point,
}

/// The set of glyph changes needed to turn one canvas into the next.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

impl Frame {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Compute the difference between two canvases.
///
/// When the sizes differ every glyph of `curr` is reported, so a resized
/// screen is fully repainted.
pub fn compute_frame(prev: &Canvas, curr: &Canvas) -> Frame {
    let full = prev.bounds() != curr.bounds();
    let cells = curr
        .iter()
        .filter(|&(p, g)| full || prev.at(p) != g)
        .map(|(pos, glyph)| FrameCell { glyph, pos })
        .collect();
    Frame {
        cells,
        width: curr.width(),
        height: curr.height(),
    }
}
