use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use prensa_viewer::data::model::{month_label, ProductionRecord};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – best record highlight and record table
// ---------------------------------------------------------------------------

/// Render the central panel.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a spreadsheet to analyse production  (File → Open…)");
        });
        return;
    }

    if let Some(best) = &state.stats.global_max {
        max_production_highlight(ui, best);
        ui.add_space(8.0);
    }

    if state.visible_indices.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    records_table(ui, state);
}

fn max_production_highlight(ui: &mut Ui, best: &ProductionRecord) {
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgba_unmultiplied(16, 185, 129, 40))
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label(RichText::new("🏆 Highest production").strong());
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.label("Product");
                    ui.label(RichText::new(&best.description).strong().size(16.0));
                    ui.label(format!("Code: {}", best.product_code));
                });
                ui.separator();
                ui.vertical(|ui: &mut Ui| {
                    ui.label("Max production");
                    ui.label(
                        RichText::new(format!("{}", best.max_production))
                            .strong()
                            .size(22.0)
                            .color(Color32::from_rgb(52, 211, 153)),
                    );
                });
                ui.separator();
                ui.vertical(|ui: &mut Ui| {
                    ui.label("Machine");
                    ui.label(RichText::new(format!("Press {}", best.machine)).strong());
                    ui.label(&best.group);
                });
            });
            ui.label(format!(
                "Year: {}   Month: {}",
                best.year,
                month_label(best.month)
            ));
        });
}

fn records_table(ui: &mut Ui, state: &AppState) {
    let total = state.visible_indices.len();
    let shown: Vec<&ProductionRecord> = state.visible_records().take(state.config.preview_rows).collect();
    let stats = &state.stats;

    if total > shown.len() {
        ui.label(format!("Showing first {} of {total} records", shown.len()));
    } else {
        ui.label(format!("{total} records"));
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto(), 4)
        .column(Column::remainder().at_least(160.0))
        .columns(Column::auto(), 2)
        .header(20.0, |mut header| {
            for title in ["Year", "Month", "Group", "Code", "Product", "Press", "Max prod."] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, shown.len(), |mut row| {
                let record = shown[row.index()];
                let best = stats.is_product_best(record);
                let group_color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(&record.group))
                    .unwrap_or(Color32::GRAY);

                row.col(|ui: &mut Ui| {
                    ui.label(record.year.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(month_label(record.month));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(&record.group).color(group_color));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&record.product_code);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&record.description);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.machine.to_string());
                });
                row.col(|ui: &mut Ui| {
                    let value = format!("{}", record.max_production);
                    if best {
                        ui.label(
                            RichText::new(format!("★ {value}"))
                                .strong()
                                .color(Color32::from_rgb(110, 231, 183)),
                        );
                    } else {
                        ui.label(value);
                    }
                });
            });
        });
}
