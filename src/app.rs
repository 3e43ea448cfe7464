use eframe::egui;
use prensa_viewer::config::ViewerConfig;
use prensa_viewer::worker::LoadWorker;

use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PrensaViewerApp {
    pub state: AppState,
    worker: LoadWorker,
}

impl PrensaViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            state: AppState::new(config),
            worker: LoadWorker::default(),
        }
    }

    /// Apply every load that finished since the last frame.
    fn drain_loads(&mut self) {
        while let Some(msg) = self.worker.try_recv() {
            log::debug!(
                "Load of {} finished (generation {})",
                msg.path.display(),
                msg.generation
            );
            self.state.complete_load(msg.generation, msg.result);
        }
    }
}

impl eframe::App for PrensaViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_loads();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &self.worker);
        });

        // ---- Left side panel: filters + statistics ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: highlight + table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::central_panel(ui, &self.state);
        });
    }
}
