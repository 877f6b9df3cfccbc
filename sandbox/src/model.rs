//! The sandbox [`Model`]: painting, algorithm selection and animated runs.

use gridpath_core::{Canvas, Effect, Key, ModMask, Model, MouseAction, Msg, Point, Screen};
use gridpath_search::{Algorithm, Grid, Outcome, SearchEngine, SearchError, StepObserver, Tag};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SandboxConfig;
use crate::view::{self, Hud, Layout};

/// Interactive pathfinding sandbox.
pub struct Sandbox {
    config: SandboxConfig,
    grid: Grid,
    layout: Layout,
    algorithm: Algorithm,
    cursor: Point,
    status: String,
    last_outcome: Option<Outcome>,
    rng: StdRng,
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Self {
        let grid = Grid::build(config.rows, config.pixel_width);
        let layout = Layout::for_grid(&grid);
        Self {
            algorithm: config.algorithm,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            grid,
            layout,
            cursor: Point::ZERO,
            status: String::new(),
            last_outcome: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Result of the most recent run, if any.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Screen size that fits the grid and the status lines.
    pub fn screen_size(&self) -> Point {
        self.layout.screen_size(&self.grid)
    }

    fn hud(&self) -> Hud<'_> {
        Hud {
            algorithm: self.algorithm,
            status: &self.status,
            cursor: Some(self.cursor),
        }
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Any authoring edit invalidates the marks of the previous run.
    fn edit(&mut self, p: Point, tag: Tag) {
        self.grid.clear_search_marks();
        self.last_outcome = None;
        self.grid.set_tag(p, tag);
    }

    /// Left-button painting: start first, then end, then obstacles.
    fn paint(&mut self, p: Point) {
        let tag = match self.grid.tag(p) {
            None | Some(Tag::Start) | Some(Tag::End) => return,
            Some(_) if self.grid.start().is_none() => Tag::Start,
            Some(_) if self.grid.end().is_none() => Tag::End,
            Some(_) => Tag::Obstacle,
        };
        self.edit(p, tag);
    }

    fn erase(&mut self, p: Point) {
        if self.grid.tag(p).is_some() {
            self.edit(p, Tag::Default);
        }
    }

    fn toggle_obstacle(&mut self, p: Point) {
        let tag = match self.grid.tag(p) {
            Some(Tag::Obstacle) => Tag::Default,
            _ => Tag::Obstacle,
        };
        self.edit(p, tag);
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let last = self.grid.rows() - 1;
        let p = self.cursor.shift(dx, dy);
        self.cursor = Point::new(p.x.clamp(0, last), p.y.clamp(0, last));
    }

    fn reset(&mut self) {
        self.grid.rebuild(self.config.rows, self.config.pixel_width);
        self.last_outcome = None;
        self.cursor = Point::ZERO;
        self.set_status("grid reset");
        log::info!("grid reset to {0}x{0}", self.config.rows);
    }

    fn scatter(&mut self) {
        self.grid.clear_search_marks();
        self.last_outcome = None;
        let placed = self.grid.scatter_obstacles(&mut self.rng, self.config.density);
        self.set_status(format!("placed {placed} random obstacles"));
        log::info!("scattered {placed} obstacles at density {}", self.config.density);
    }

    /// Check a run can start; on success the screen is handed to
    /// [`animate`](Model::animate).
    fn request_run(&mut self) -> Option<Effect> {
        if let Err(e) = self.check_endpoints() {
            log::warn!("run refused: {e}");
            self.set_status(format!("cannot run: {e}"));
            return None;
        }
        self.grid.clear_search_marks();
        log::info!("running {}", self.algorithm);
        self.set_status(format!("running {}{}", self.algorithm, self.stop_hint()));
        Some(Effect::Animate)
    }

    fn check_endpoints(&self) -> Result<(Point, Point), SearchError> {
        let start = self.grid.start().ok_or(SearchError::MissingEndpoint("start"))?;
        let end = self.grid.end().ok_or(SearchError::MissingEndpoint("end"))?;
        if start == end {
            return Err(SearchError::SameEndpoints(start));
        }
        Ok((start, end))
    }

    fn stop_hint(&self) -> &'static str {
        if self.config.step_delay.is_zero() {
            ""
        } else {
            " (esc to stop)"
        }
    }

    fn describe(&self, result: &Result<Outcome, SearchError>) -> String {
        match result {
            Ok(Outcome::Found(route)) => format!(
                "path of {} steps, {} cells expanded{}",
                route.len(),
                route.expanded(),
                if self.algorithm.is_optimal() {
                    ""
                } else {
                    " (not guaranteed shortest)"
                }
            ),
            Ok(Outcome::NoPath { expanded }) => {
                format!("no path ({expanded} cells expanded)")
            }
            Ok(Outcome::Cancelled { expanded }) => {
                format!("stopped after {expanded} cells")
            }
            Err(e) => format!("cannot run: {e}"),
        }
    }

    fn on_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('q') => return Some(Effect::End),
            Key::Space | Key::Enter => return self.request_run(),
            Key::Tab | Key::Char('t') => {
                self.algorithm = self.algorithm.next();
                self.set_status(format!("switched to {}", self.algorithm));
            }
            Key::Char('x') => {
                self.grid.clear_search_marks();
                self.last_outcome = None;
                self.set_status("marks cleared");
            }
            Key::Char('c') => self.reset(),
            Key::Char('r') => self.scatter(),
            Key::ArrowUp | Key::Char('k') => self.move_cursor(0, -1),
            Key::ArrowDown | Key::Char('j') => self.move_cursor(0, 1),
            Key::ArrowLeft | Key::Char('h') => self.move_cursor(-1, 0),
            Key::ArrowRight | Key::Char('l') => self.move_cursor(1, 0),
            Key::Char('s') => self.edit(self.cursor, Tag::Start),
            Key::Char('e') => self.edit(self.cursor, Tag::End),
            Key::Char('w') => self.toggle_obstacle(self.cursor),
            Key::Backspace | Key::Delete => self.erase(self.cursor),
            _ => {}
        }
        None
    }

    fn on_mouse(&mut self, action: MouseAction, pos: Point) {
        let Some(p) = self.layout.cell_under(&self.grid, pos) else {
            return;
        };
        self.cursor = p;
        match action {
            MouseAction::Main | MouseAction::DragMain => self.paint(p),
            MouseAction::Secondary | MouseAction::DragSecondary => self.erase(p),
            MouseAction::Release => {}
        }
    }
}

impl Model for Sandbox {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                self.set_status("paint a start and an end, then press space");
                None
            }
            Msg::Quit => Some(Effect::End),
            Msg::KeyDown {
                key: Key::Char('c'),
                modifiers,
                ..
            } if modifiers.contains(ModMask::CTRL) => Some(Effect::End),
            Msg::KeyDown { key, .. } => self.on_key(key),
            Msg::Mouse { action, pos, .. } => {
                self.on_mouse(action, pos);
                None
            }
            Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        view::draw(canvas, &self.grid, &self.layout, &self.hud());
    }

    fn animate(&mut self, screen: &mut Screen<'_>) -> Option<Msg> {
        let algorithm = self.algorithm;
        let status = self.status.clone();
        let mut live = LiveView {
            screen,
            layout: self.layout,
            hud: Hud {
                algorithm,
                status: &status,
                cursor: None,
            },
            delay: self.config.step_delay,
        };
        let result = SearchEngine::solve(algorithm, &mut self.grid, &mut live);
        self.status = self.describe(&result);
        self.last_outcome = result.ok();
        None
    }
}

/// Redraws the screen after every search step and turns Escape into
/// cancellation.
struct LiveView<'s, 'a, 'h> {
    screen: &'s mut Screen<'a>,
    layout: Layout,
    hud: Hud<'h>,
    delay: std::time::Duration,
}

impl StepObserver for LiveView<'_, '_, '_> {
    fn on_step(&mut self, grid: &Grid) {
        let (layout, hud) = (self.layout, self.hud);
        self.screen
            .present(|canvas| view::draw(canvas, grid, &layout, &hud));
        if !self.delay.is_zero() {
            self.screen.pause(self.delay);
        }
    }

    fn cancelled(&mut self) -> bool {
        self.screen.interrupted()
    }
}
