use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use prensa_viewer::data::facets::group_counts;
use prensa_viewer::data::filter::{FilterCriteria, MatchMode};
use prensa_viewer::data::loader::SUPPORTED_EXTENSIONS;
use prensa_viewer::data::model::month_label;
use prensa_viewer::worker::LoadWorker;

use crate::state::{AppState, StatusKind};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and statistics
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No spreadsheet loaded.");
        return;
    };

    // Edit a copy; the state recomputes its views once per change.
    let facets = dataset.facets.clone();
    let mut criteria = state.criteria.clone();
    let mut search = criteria.product_search.clone();
    let mut picked: Option<String> = None;
    let mut clear = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Year");
            facet_combo(
                ui,
                "year_filter",
                &mut criteria.year,
                facets.years.iter().map(|y| (y.to_string(), y.to_string())),
            );

            ui.strong("Month");
            facet_combo(
                ui,
                "month_filter",
                &mut criteria.month,
                facets.months.iter().map(|m| (m.to_string(), month_label(*m))),
            );

            ui.strong("Group");
            match criteria.group_mode {
                MatchMode::Exact => facet_combo(
                    ui,
                    "group_filter",
                    &mut criteria.group,
                    facets.groups.iter().map(|g| (g.clone(), g.clone())),
                ),
                MatchMode::Contains => {
                    ui.add(egui::TextEdit::singleline(&mut criteria.group).hint_text("Group…"));
                }
            }

            ui.strong("Machine (press)");
            match criteria.machine_mode {
                MatchMode::Exact => facet_combo(
                    ui,
                    "machine_filter",
                    &mut criteria.machine,
                    facets.machines.iter().map(|m| (m.to_string(), m.to_string())),
                ),
                MatchMode::Contains => {
                    ui.add(egui::TextEdit::singleline(&mut criteria.machine).hint_text("Press…"));
                }
            }

            ui.strong("Product search");
            ui.add(egui::TextEdit::singleline(&mut search).hint_text("Description or code…"));
            if state.show_suggestions && !state.suggestions.is_empty() {
                egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                    for suggestion in &state.suggestions {
                        if ui.selectable_label(false, suggestion).clicked() {
                            picked = Some(suggestion.clone());
                        }
                    }
                });
            }

            ui.add_space(6.0);
            if ui.button("Clear filters").clicked() {
                clear = true;
            }

            ui.separator();
            statistics_cards(ui, state);

            ui.separator();
            egui::CollapsingHeader::new(RichText::new("Groups").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for (group, count) in group_counts(&dataset.records) {
                        let color = state
                            .color_map
                            .as_ref()
                            .map(|cm| cm.color_for(&group))
                            .unwrap_or(Color32::GRAY);
                        ui.label(RichText::new(format!("{group}  ({count})")).color(color));
                    }
                });
        });

    if clear {
        state.clear_filters();
    } else if let Some(suggestion) = picked {
        state.pick_suggestion(suggestion);
    } else {
        if search != state.criteria.product_search {
            state.set_product_search(search.clone());
        }
        state.set_criteria(FilterCriteria {
            product_search: search,
            ..criteria
        });
    }
}

/// Dropdown over facet values with an "All" entry mapping to "".
fn facet_combo(
    ui: &mut Ui,
    id: &str,
    selected: &mut String,
    options: impl Iterator<Item = (String, String)>,
) {
    let options: Vec<(String, String)> = options.collect();
    let current = if selected.is_empty() {
        "All".to_string()
    } else {
        options
            .iter()
            .find(|(value, _)| value == selected)
            .map(|(_, label)| label.clone())
            .unwrap_or_else(|| selected.clone())
    };
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(selected, String::new(), "All");
            for (value, label) in options {
                ui.selectable_value(selected, value, label);
            }
        });
}

fn statistics_cards(ui: &mut Ui, state: &AppState) {
    let stats = &state.stats;
    ui.strong("Statistics");
    egui::Grid::new("stats_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Records");
            ui.label(RichText::new(stats.total.to_string()).strong());
            ui.end_row();

            ui.label("Avg. max production");
            ui.label(RichText::new(format!("{:.1}", stats.avg_max)).strong());
            ui.end_row();

            if let Some(best) = &stats.global_max {
                ui.label("Max production");
                ui.label(RichText::new(format!("{}", best.max_production)).strong());
                ui.end_row();

                ui.label("Machine");
                ui.label(RichText::new(best.machine.to_string()).strong());
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, worker: &LoadWorker) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            // A newer load supersedes one still in flight.
            if ui.button("Open…").clicked() {
                open_file_dialog(ui.ctx(), state, worker);
                ui.close_menu();
            }
            let can_export = !state.visible_indices.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered view…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{}: {} records loaded, {} visible",
                ds.source_name,
                ds.len(),
                state.visible_indices.len()
            ));
            ui.separator();
        }

        if state.loading {
            ui.spinner();
            ui.label("Processing…");
        }

        if let Some(msg) = &state.status_message {
            let color = match msg.kind {
                StatusKind::Info => Color32::LIGHT_GREEN,
                StatusKind::Error => Color32::RED,
            };
            ui.label(RichText::new(&msg.text).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(ctx: &egui::Context, state: &mut AppState, worker: &LoadWorker) {
    let file = rfd::FileDialog::new()
        .set_title("Open production spreadsheet")
        .add_filter("Excel", &SUPPORTED_EXTENSIONS)
        .pick_file();

    if let Some(path) = file {
        let generation = state.begin_load();
        let ctx = ctx.clone();
        if let Err(e) = worker.spawn(generation, path, state.config.validation, move || {
            ctx.request_repaint()
        }) {
            state.report_error(format!("Error: could not start loader thread: {e}"));
        }
    }
}

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered records")
        .set_file_name("producao_filtrada.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_visible(&path) {
            state.report_error(format!("Error: export failed: {e:#}"));
        }
    }
}
