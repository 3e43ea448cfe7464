mod app;
mod color;
mod state;
mod ui;

use app::PrensaViewerApp;
use eframe::egui;
use prensa_viewer::config::ViewerConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::load();
    log::debug!("Using config {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Prensa Viewer – Production Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(PrensaViewerApp::new(config)))),
    )
}
