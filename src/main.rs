mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use app::CountryLensApp;
use clap::Parser;
use config::Args;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.headless {
        return run_headless(&args);
    }

    let mut state = AppState::from_args(&args);
    state.load_sources();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Country Lens – GDP & Life Expectancy",
        options,
        Box::new(|_cc| Ok(Box::new(CountryLensApp::new(state)))),
    )
    .map_err(|e| anyhow!("window error: {e}"))
}

/// Load, filter and print the view as CSV on stdout.
fn run_headless(args: &Args) -> Result<()> {
    let dataset = data::loader::load_dataset(&args.source_paths())?;
    let view = data::view::derive_view(dataset.records(), &args.view_filter());
    if view.is_empty() {
        log::warn!("No data matches the selected life expectancy range.");
    }
    export::write_csv(std::io::stdout().lock(), dataset.view(&view))
}
