mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use app::InspectionExplorerApp;
use eframe::egui;
use inspection_explorer::data::loader;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // An optional path loads a local copy instead of the live dataset.
    let state = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => AppState::from_load(loader::load_file(&path).map(Arc::new)),
        None => AppState::from_load(loader::cached_dataset()),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NYC Restaurant Inspector",
        options,
        Box::new(|_cc| Ok(Box::new(InspectionExplorerApp::new(state)))),
    )
}
