//! Command-line options and the validated [`SandboxConfig`] built from them.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gridpath_search::Algorithm;

/// Largest grid the terminal view can reasonably show.
pub const MAX_ROWS: i32 = 200;

/// Watch grid pathfinding algorithms search, step by step.
#[derive(Parser, Debug, Clone)]
#[command(name = "gridpath", version, about)]
pub struct Cli {
    /// Grid dimension (the grid is rows x rows).
    #[arg(long, default_value_t = 25)]
    pub rows: i32,

    /// Horizontal span in terminal columns; each cell is width / rows
    /// columns wide. Defaults to two columns per cell.
    #[arg(long)]
    pub width: Option<i32>,

    /// Starting algorithm: astar, dijkstra or greedy.
    #[arg(short, long, default_value = "astar")]
    pub algorithm: Algorithm,

    /// Pause after each expansion, in milliseconds.
    #[arg(long, default_value_t = 15)]
    pub delay_ms: u64,

    /// Seed for random obstacle fields.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Fraction of cells turned into obstacles by a random fill.
    #[arg(long, default_value_t = 0.3)]
    pub density: f64,

    /// Disable mouse capture (keyboard painting only).
    #[arg(long)]
    pub no_mouse: bool,

    /// Write logs to this directory. Logging is off when not set.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log level or flexi_logger spec, e.g. "debug" or "info, gridpath_search=debug".
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Validate the options and turn them into a [`SandboxConfig`].
    pub fn to_config(&self) -> Result<SandboxConfig, ConfigError> {
        let config = SandboxConfig {
            rows: self.rows,
            pixel_width: self.width.unwrap_or(self.rows.saturating_mul(2)),
            algorithm: self.algorithm,
            step_delay: Duration::from_millis(self.delay_ms),
            seed: self.seed,
            density: self.density,
            mouse: !self.no_mouse,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Everything the sandbox needs to start.
#[derive(Debug, Clone, PartialEq)]
pub struct SandboxConfig {
    pub rows: i32,
    /// Span the grid is quantised against; see [`gridpath_search::Grid::build`].
    pub pixel_width: i32,
    pub algorithm: Algorithm,
    pub step_delay: Duration,
    pub seed: u64,
    pub density: f64,
    pub mouse: bool,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            pixel_width: 50,
            algorithm: Algorithm::AStar,
            step_delay: Duration::from_millis(15),
            seed: 42,
            density: 0.3,
            mouse: true,
        }
    }
}

impl SandboxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_ROWS).contains(&self.rows) {
            return Err(ConfigError::Rows(self.rows));
        }
        if self.pixel_width < self.rows {
            return Err(ConfigError::Width {
                width: self.pixel_width,
                rows: self.rows,
            });
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::Density(self.density));
        }
        Ok(())
    }
}

/// An invalid combination of options.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Rows(i32),
    Width { width: i32, rows: i32 },
    Density(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows(r) => write!(f, "rows must be between 2 and {MAX_ROWS}, got {r}"),
            Self::Width { width, rows } => {
                write!(f, "width {width} is too small for {rows} rows")
            }
            Self::Density(d) => write!(f, "density must be between 0 and 1, got {d}"),
        }
    }
}

impl std::error::Error for ConfigError {}
