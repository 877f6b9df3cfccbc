//! **gridpath-core**: shared plumbing for the gridpath sandbox.
//!
//! Geometry primitives, a diffable character canvas, input messages and the
//! Elm-architecture loop that drives a [`Model`] through a [`Driver`]. The
//! pathfinding engine itself lives in `gridpath-search`; this crate knows
//! nothing about searching.

pub mod app;
pub mod canvas;
pub mod geom;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model, Screen};
pub use canvas::{Canvas, Frame, FrameCell, Glyph};
pub use geom::{Point, Range};
pub use messages::*;
pub use style::{AttrMask, Color, Style};
