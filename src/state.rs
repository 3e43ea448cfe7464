use std::path::Path;

use anyhow::Result;
use prensa_viewer::config::ViewerConfig;
use prensa_viewer::data::export;
use prensa_viewer::data::filter::{filtered_indices, FilterCriteria};
use prensa_viewer::data::loader::IngestError;
use prensa_viewer::data::model::{Dataset, ProductionRecord};
use prensa_viewer::data::stats::{statistics, Statistics};
use prensa_viewer::data::suggest::suggest;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Status notification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-shot message shown in the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Active filter constraints.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Statistics over the visible records.
    pub stats: Statistics,

    /// Autocomplete entries for the product search box.
    pub suggestions: Vec<String>,
    pub show_suggestions: bool,

    /// Colour per product group.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,

    /// Generation of the most recently started load.
    generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let criteria = FilterCriteria::cleared(config.group_match, config.machine_match);
        Self {
            config,
            dataset: None,
            criteria,
            visible_indices: Vec::new(),
            stats: Statistics::default(),
            suggestions: Vec::new(),
            show_suggestions: false,
            color_map: None,
            status_message: None,
            loading: false,
            generation: 0,
        }
    }

    /// Install a newly loaded dataset, reset the criteria and recompute
    /// every derived view.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.criteria.clear();
        self.suggestions.clear();
        self.show_suggestions = false;
        self.color_map = Some(ColorMap::new(&dataset.facets.groups));
        self.status_message = Some(StatusMessage::info(format!(
            "{} records loaded from {}",
            dataset.len(),
            dataset.source_name
        )));
        self.dataset = Some(dataset);
        self.loading = false;
        self.refilter();
    }

    /// Recompute `visible_indices` and `stats` after a criteria change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.stats = Statistics::default();
            return;
        };
        self.visible_indices = filtered_indices(&ds.records, &self.criteria);
        self.stats = statistics(
            self.visible_indices.iter().map(|&i| &ds.records[i]),
            self.criteria.machine_filter_active(),
        );
    }

    /// Records passing the current criteria, in dataset order.
    pub fn visible_records(&self) -> impl Iterator<Item = &ProductionRecord> + '_ {
        let records = self.dataset.as_ref().map(|ds| ds.records.as_slice()).unwrap_or(&[]);
        self.visible_indices.iter().filter_map(move |&i| records.get(i))
    }

    /// Replace the criteria wholesale.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if criteria != self.criteria {
            self.criteria = criteria;
            self.refilter();
        }
    }

    /// Reset every constraint and hide the suggestions.
    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.suggestions.clear();
        self.show_suggestions = false;
        self.refilter();
    }

    /// Update the product search text and its autocomplete entries.
    pub fn set_product_search(&mut self, text: String) {
        self.suggestions = self
            .dataset
            .as_ref()
            .map(|ds| suggest(&ds.records, &text))
            .unwrap_or_default();
        self.show_suggestions = !text.is_empty();
        self.set_criteria(FilterCriteria {
            product_search: text,
            ..self.criteria.clone()
        });
    }

    /// Use an autocomplete entry as the search text.
    pub fn pick_suggestion(&mut self, suggestion: String) {
        self.show_suggestions = false;
        self.set_criteria(FilterCriteria {
            product_search: suggestion,
            ..self.criteria.clone()
        });
    }

    // -- Loading --

    /// Mark a new load as started and return its generation.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Apply the result of a load. Results from superseded generations are
    /// dropped; failures keep the current dataset. Returns whether the
    /// result was applied.
    pub fn complete_load(&mut self, generation: u64, result: Result<Dataset, IngestError>) -> bool {
        if generation != self.generation {
            log::debug!(
                "Dropping stale load result (generation {generation}, current {})",
                self.generation
            );
            return false;
        }
        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {}",
                    dataset.len(),
                    dataset.source_name
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(StatusMessage::error(format!("Error: {e}")));
                self.loading = false;
            }
        }
        true
    }

    /// Report a failure outside the load pipeline (loader thread, export).
    pub fn report_error(&mut self, message: String) {
        log::error!("{message}");
        self.status_message = Some(StatusMessage::error(message));
        self.loading = false;
    }

    // -- Export --

    /// Write the visible records to a CSV file.
    pub fn export_visible(&mut self, path: &Path) -> Result<usize> {
        let written = export::export_csv(path, self.visible_records())?;
        log::info!("Exported {written} records to {}", path.display());
        self.status_message = Some(StatusMessage::info(format!(
            "{written} records exported to {}",
            path.display()
        )));
        Ok(written)
    }
}
