mod app;
mod color;
mod dashboard;
mod data;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use app::VolcanoExplorerApp;
use eframe::egui;

/// Dataset read when no path is given on the command line.
const DEFAULT_DATA_PATH: &str = "volcanoes.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    // Loaded exactly once; every recomputation borrows this value.
    let app = match data::loader::load_file(&path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} volcanoes from {} ({} countries, {} types)",
                dataset.len(),
                path.display(),
                dataset.countries.len(),
                dataset.primary_types.len()
            );
            VolcanoExplorerApp::ready(Arc::new(dataset))
        }
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            VolcanoExplorerApp::load_failed(&path, &e)
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Interactive Volcano Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
