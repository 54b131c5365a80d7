//! Vectra Studio: interactive canvas on the vectra engine.
//!
//! Right drag pans, the wheel zooms about the cursor, `r` resets the view,
//! `g` toggles the dot grid.

mod app;
mod scene;
mod tool;

use vectra_engine::device::GpuInit;
use vectra_engine::logging::{init_logging, LoggingConfig};
use vectra_engine::window::{LogicalSize, Runtime, RuntimeConfig};

fn main() {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Vectra Studio".to_string(),
        initial_size: LogicalSize::new(1280.0, 800.0),
    };

    if let Err(e) = Runtime::run(config, GpuInit::default(), app::Studio::new()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
