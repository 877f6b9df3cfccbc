use std::process;

use clap::Parser;
use gridpath_core::{App, AppConfig};
use gridpath_crossterm::CrosstermDriver;
use gridpath_sandbox::{Cli, Sandbox, logging};

fn main() {
    let cli = Cli::parse();

    // Keep the handle alive until exit so records are flushed.
    let _logger = match &cli.log_dir {
        Some(dir) => match logging::init(dir, &cli.log_level) {
            Ok(handle) => Some(handle),
            Err(e) => {
                eprintln!("gridpath: cannot start logging: {e}");
                process::exit(1);
            }
        },
        None => None,
    };

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("gridpath: {e}");
            process::exit(1);
        }
    };
    log::info!("starting with {config:?}");

    let sandbox = Sandbox::new(config.clone());
    let wanted = sandbox.screen_size();
    let size = match CrosstermDriver::terminal_size() {
        Ok(term) => gridpath_core::Point::new(term.x.max(wanted.x), term.y.max(wanted.y)),
        Err(e) => {
            log::warn!("cannot read terminal size: {e}");
            wanted
        }
    };

    let mut app = App::new(AppConfig {
        model: sandbox,
        driver: CrosstermDriver::new().with_mouse(config.mouse),
        width: size.x,
        height: size.y,
    });
    if let Err(e) = app.run() {
        log::error!("{e}");
        eprintln!("gridpath: {e}");
        process::exit(1);
    }
}
