//! File logging for the sandbox binary.
//!
//! The terminal belongs to the UI, so log records go to a file. The handle
//! returned by [`init`] must be kept alive for as long as logging should
//! work; dropping it flushes the writer.

use std::error::Error;
use std::path::Path;

use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Start logging to `<dir>/gridpath_*.log` at the given level spec.
pub fn init(dir: &Path, level: &str) -> Result<LoggerHandle, Box<dyn Error>> {
    let handle = Logger::try_with_str(level)?
        .log_to_file(FileSpec::default().directory(dir).basename("gridpath"))
        .start()?;
    log::info!("logging to {} at {level}", dir.display());
    Ok(handle)
}
