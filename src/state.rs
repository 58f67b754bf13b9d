use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use eframe::egui;

use crate::color::CategoryPalette;
use crate::data::filter::{FilterState, highlight_mask};
use crate::data::grid::PeriodicGrid;
use crate::data::loader::{self, DataSource, LoadError};
use crate::data::model::{Element, ElementDataset};

type LoadResult = Result<ElementDataset, LoadError>;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table; empty until a load succeeds (and after one fails).
    pub dataset: ElementDataset,

    /// Cell index for the loaded table.
    pub grid: PeriodicGrid,

    /// Search term, category and phase selections.
    pub filters: FilterState,

    /// Match flag per element, index-aligned with `dataset` (cached).
    pub highlighted: Vec<bool>,

    /// Tile colours by category.
    pub palette: CategoryPalette,

    /// Atomic number of the last clicked element.
    pub selected: Option<u32>,

    /// Where the current table came from.
    pub source: DataSource,

    /// HTTP timeout for remote sources.
    pub timeout: Duration,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load is in flight.
    pub loading: bool,

    pending: Option<Receiver<LoadResult>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: ElementDataset::default(),
            grid: PeriodicGrid::default(),
            filters: FilterState::default(),
            highlighted: Vec::new(),
            palette: CategoryPalette::default(),
            selected: None,
            source: DataSource::Bundled,
            timeout: loader::DEFAULT_TIMEOUT,
            status_message: None,
            loading: false,
            pending: None,
        }
    }
}

impl AppState {
    pub fn new(source: DataSource, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            ..Self::default()
        }
    }

    /// Start loading `source` on a worker thread. The UI stays in the
    /// loading state until [`AppState::poll_load`] sees the result.
    pub fn begin_load(&mut self, source: DataSource, ctx: &egui::Context) {
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        let timeout = self.timeout;
        let worker_source = source.clone();

        log::info!("loading elements from {source}");
        thread::spawn(move || {
            let result = loader::load(&worker_source, timeout);
            // The receiver is gone if the app closed mid-load.
            let _ = tx.send(result);
            ctx.request_repaint();
        });

        self.source = source;
        self.loading = true;
        self.status_message = None;
        self.pending = Some(rx);
    }

    /// Install the worker's result if it has arrived.
    pub fn poll_load(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.finish_load(result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.finish_load(Err(LoadError::Interrupted));
            }
        }
    }

    /// Apply a load outcome. Failures leave an empty, ready table.
    pub fn finish_load(&mut self, result: LoadResult) {
        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} elements ({} categories, {} phases) from {}",
                    dataset.len(),
                    dataset.categories.len().saturating_sub(1),
                    dataset.phases.len().saturating_sub(1),
                    self.source
                );
                self.set_dataset(dataset);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load elements data: {e}");
                self.set_dataset(ElementDataset::default());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
        self.loading = false;
    }

    /// Ingest a dataset: rebuild the grid index, clear filters, refilter.
    pub fn set_dataset(&mut self, dataset: ElementDataset) {
        self.grid = match PeriodicGrid::layout(dataset.elements()) {
            Ok(grid) => grid,
            Err(e) => {
                log::warn!("dataset layout rejected: {e}");
                PeriodicGrid::default()
            }
        };
        self.dataset = dataset;
        self.filters.reset();
        self.selected = None;
        self.refilter();
    }

    /// Recompute `highlighted` for the current filters.
    pub fn refilter(&mut self) {
        self.highlighted = highlight_mask(self.dataset.elements(), &self.filters);
        log::debug!(
            "filters {:?}: {} of {} highlighted",
            self.filters,
            self.highlight_count(),
            self.dataset.len()
        );
    }

    pub fn set_search(&mut self, term: &str) {
        if self.filters.search != term {
            self.filters.search = term.to_string();
            self.refilter();
        }
    }

    pub fn set_category(&mut self, category: &str) {
        if self.filters.category != category {
            self.filters.category = category.to_string();
            self.refilter();
        }
    }

    pub fn set_phase(&mut self, phase: &str) {
        if self.filters.phase != phase {
            self.filters.phase = phase.to_string();
            self.refilter();
        }
    }

    /// Clear search, category and phase back to their defaults.
    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.refilter();
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.get(index).copied().unwrap_or(false)
    }

    pub fn highlight_count(&self) -> usize {
        self.highlighted.iter().filter(|h| **h).count()
    }

    /// Highlighted elements in source order.
    pub fn highlighted_elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.dataset
            .iter()
            .zip(&self.highlighted)
            .filter(|(_, h)| **h)
            .map(|(el, _)| el)
    }

    pub fn select(&mut self, number: u32) {
        if let Some(el) = self.dataset.find_by_number(number) {
            log::info!("Clicked element: {}", el.name);
            self.selected = Some(number);
        }
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|n| self.dataset.find_by_number(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{DataFormat, Response, parse_response};

    const TABLE: &str = r#"[
        {"number": 1, "symbol": "H", "name": "Hydrogen", "category": "diatomic nonmetal", "phase": "Gas", "xpos": 1, "ypos": 1},
        {"number": 26, "symbol": "Fe", "name": "Iron", "category": "transition metal", "phase": "Solid", "xpos": 8, "ypos": 4},
        {"number": 79, "symbol": "Au", "name": "Gold", "category": "transition metal", "phase": "Solid", "xpos": 11, "ypos": 6}
    ]"#;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.finish_load(parse_response(Response::ok(TABLE, DataFormat::Json)));
        state
    }

    #[test]
    fn successful_load_highlights_everything() {
        let state = loaded();
        assert!(!state.loading);
        assert_eq!(state.dataset.len(), 3);
        assert_eq!(state.highlighted, vec![true, true, true]);
        assert_eq!(state.grid.len(), 3);
    }

    #[test]
    fn failed_load_leaves_an_empty_ready_table() {
        let mut state = loaded();
        state.loading = true;
        state.finish_load(Err(LoadError::Status { status: 404 }));
        assert!(!state.loading);
        assert!(state.dataset.is_empty());
        assert!(state.highlighted.is_empty());
        assert!(state.status_message.as_deref().unwrap().contains("404"));
    }

    #[test]
    fn setters_refilter_and_reset_restores() {
        let mut state = loaded();
        state.set_search("go");
        state.set_category("transition metal");
        state.set_phase("Solid");
        assert_eq!(state.highlighted, vec![false, false, true]);
        assert_eq!(state.highlighted_elements().map(|e| e.number).collect::<Vec<_>>(), vec![79]);

        state.reset_filters();
        assert!(state.filters.is_default());
        assert_eq!(state.highlight_count(), 3);
    }

    #[test]
    fn new_dataset_clears_filters() {
        let mut state = loaded();
        state.set_search("zzz");
        assert_eq!(state.highlight_count(), 0);
        state.finish_load(parse_response(Response::ok(TABLE, DataFormat::Json)));
        assert!(state.filters.is_default());
        assert_eq!(state.highlight_count(), 3);
    }

    #[test]
    fn selecting_unknown_number_is_ignored() {
        let mut state = loaded();
        state.select(999);
        assert!(state.selected_element().is_none());
        state.select(26);
        assert_eq!(state.selected_element().map(|e| e.symbol.as_str()), Some("Fe"));
    }
}
