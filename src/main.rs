mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Result, anyhow};
use eframe::egui;

use app::LimitViewApp;
use config::AppConfig;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::load_or_default(Path::new(config::CONFIG_FILE))?;

    // The configured limits table must load; a dashboard without its data
    // is not started.
    let state = AppState::load_initial(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LimitView – Tolerance Limits Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LimitViewApp::new(state)))),
    )
    .map_err(|e| anyhow!("failed to run UI: {e}"))
}
