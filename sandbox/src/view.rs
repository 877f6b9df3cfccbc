//! Drawing the grid and the status lines, and mapping the pointer back to
//! grid cells.
//!
//! Screen layout, top to bottom: a status line, the grid, a key-help line.
//! A cell is one text row tall and [`Grid::gap`] columns wide. For
//! quantisation a text row counts as `gap` pixels, so cells are square in
//! pixel space.

use gridpath_core::{AttrMask, Canvas, Color, Glyph, Point, Style};
use gridpath_search::{Algorithm, Grid, Tag};

const COL_DEFAULT: Color = Color::from_rgb(48, 48, 56);
const COL_OBSTACLE: Color = Color::from_rgb(12, 12, 14);
const COL_START: Color = Color::from_rgb(255, 165, 0);
const COL_END: Color = Color::from_rgb(64, 224, 208);
const COL_FRONTIER: Color = Color::from_rgb(40, 170, 70);
const COL_VISITED: Color = Color::from_rgb(190, 50, 50);
const COL_PATH: Color = Color::from_rgb(150, 70, 200);
const COL_CURSOR: Color = Color::from_rgb(250, 250, 250);
const COL_STATUS_FG: Color = Color::from_rgb(220, 220, 220);
const COL_STATUS_BG: Color = Color::from_rgb(30, 30, 50);
const COL_HELP_FG: Color = Color::from_rgb(140, 140, 160);

pub const HELP: &str = "click: start/end/wall  right: erase  arrows+s/e/w: paint  \
space: run  tab: algorithm  r: random  x: clear marks  c: reset  esc: stop  q: quit";

/// Background colour for a tag.
pub fn tag_color(tag: Tag) -> Color {
    match tag {
        Tag::Default => COL_DEFAULT,
        Tag::Obstacle => COL_OBSTACLE,
        Tag::Start => COL_START,
        Tag::End => COL_END,
        Tag::Frontier => COL_FRONTIER,
        Tag::Visited => COL_VISITED,
        Tag::Path => COL_PATH,
    }
}

/// Where the grid sits on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Screen position of cell (0, 0).
    pub origin: Point,
    /// Columns per cell.
    pub cell_w: i32,
}

impl Layout {
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            origin: Point::new(0, 1),
            cell_w: grid.gap(),
        }
    }

    /// Screen size needed to show everything.
    pub fn screen_size(&self, grid: &Grid) -> Point {
        Point::new(
            (grid.rows() * self.cell_w).max(HELP.len() as i32),
            self.origin.y + grid.rows() + 1,
        )
    }

    /// The grid cell under screen position `pos`.
    pub fn cell_under(&self, grid: &Grid, pos: Point) -> Option<Point> {
        let rel = pos - self.origin;
        if rel.y < 0 {
            return None;
        }
        grid.cell_at_pixel(Point::new(rel.x, rel.y * self.cell_w))
    }

    /// Screen position of the left edge of cell `p`.
    pub fn cell_origin(&self, p: Point) -> Point {
        self.origin + Point::new(p.col() * self.cell_w, p.row())
    }
}

/// What to show around the grid.
#[derive(Debug, Clone, Copy)]
pub struct Hud<'a> {
    pub algorithm: Algorithm,
    pub status: &'a str,
    pub cursor: Option<Point>,
}

/// Draw the whole screen.
pub fn draw(canvas: &mut Canvas, grid: &Grid, layout: &Layout, hud: &Hud<'_>) {
    canvas.fill(Glyph::default());
    draw_status(canvas, hud);
    draw_grid(canvas, grid, layout, hud.cursor);
    let help_y = layout.origin.y + grid.rows();
    canvas.text(
        Point::new(0, help_y),
        HELP,
        Style::default().with_fg(COL_HELP_FG),
    );
}

fn draw_status(canvas: &mut Canvas, hud: &Hud<'_>) {
    let style = Style::default()
        .with_fg(COL_STATUS_FG)
        .with_bg(COL_STATUS_BG);
    for x in 0..canvas.width() {
        canvas.set(Point::new(x, 0), Glyph::new(' ', style));
    }
    let end = canvas.text(
        Point::new(0, 0),
        &format!(" [{}] ", hud.algorithm),
        style.with_attrs(AttrMask::BOLD),
    );
    canvas.text(end, hud.status, style);
}

fn draw_grid(canvas: &mut Canvas, grid: &Grid, layout: &Layout, cursor: Option<Point>) {
    for cell in grid.iter() {
        let style = Style::default()
            .with_fg(COL_CURSOR)
            .with_bg(tag_color(cell.tag()));
        let at = layout.cell_origin(cell.pos());
        let selected = cursor == Some(cell.pos());
        for dx in 0..layout.cell_w {
            let ch = match (selected, dx) {
                (true, 0) => '[',
                (true, d) if d == layout.cell_w - 1 => ']',
                _ => ' ',
            };
            canvas.set(at.shift(dx, 0), Glyph::new(ch, style));
        }
    }
}
