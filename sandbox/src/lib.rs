//! The gridpath sandbox: paint obstacles and endpoints on a grid, pick an
//! algorithm, and watch the search expand.

pub mod config;
pub mod logging;
pub mod model;
pub mod view;

pub use config::{Cli, ConfigError, SandboxConfig};
pub use model::Sandbox;
pub use view::Layout;
