use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::config::AppConfig;
use crate::data::aggregate::AggregateView;
use crate::data::cache::DatasetCache;
use crate::data::filter::{FilterSelection, filtered_indices};
use crate::data::model::LimitDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which chart tab is active in the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// LIC vs LSC per variable, one base only.
    #[default]
    LimitsByVariable,
    /// Per-variable averages: line comparison, single-metric bars, raw rows.
    VariableAverages,
    /// Mean range heatmap, base × variable.
    RangeHeatmap,
}

/// The full UI state, independent of rendering.
///
/// The dataset is immutable once loaded; every filter change recomputes
/// `visible_indices` and `view` from scratch.  `view` is `None` exactly when
/// the current selection matches no rows.
pub struct AppState {
    /// Startup configuration (data path, column mapping).
    pub config: AppConfig,

    /// Loaded-table cache keyed by (path, mtime).
    pub cache: DatasetCache,

    /// The loaded dataset shared with the cache.
    pub dataset: Option<Arc<LimitDataset>>,

    /// Selected bases and variables.
    pub selection: FilterSelection,

    /// Indices of rows passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates of the current selection; `None` = no matching rows.
    pub view: Option<AggregateView>,

    /// Active chart tab.
    pub tab: Tab,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load the configured data file and build the initial state.
    ///
    /// Startup load failures are fatal: a dashboard without its limits table
    /// has nothing to show.
    pub fn load_initial(config: AppConfig) -> Result<Self> {
        let mut cache = DatasetCache::default();
        let dataset = cache.get_or_load(&config.data_path, &config.columns)?;

        let mut state = AppState {
            config,
            cache,
            dataset: None,
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            view: None,
            tab: Tab::default(),
            status_message: None,
        };
        state.set_dataset(dataset);
        Ok(state)
    }

    /// Ingest a dataset: select everything, recompute the pipeline.
    pub fn set_dataset(&mut self, dataset: Arc<LimitDataset>) {
        self.selection = FilterSelection::all_of(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Load a different file through the cache, e.g. from File → Open.
    /// Failures keep the current dataset and surface a status message.
    pub fn open_path(&mut self, path: &Path) {
        match self.cache.get_or_load(path, &self.config.columns) {
            Ok(dataset) => {
                self.config.data_path = path.to_path_buf();
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute `visible_indices` and the aggregate view after any
    /// selection change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.view = None;
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.selection);
        self.view = AggregateView::compute(ds, &self.visible_indices);
        log::debug!(
            "refilter: {} of {} rows visible",
            self.visible_indices.len(),
            ds.len()
        );
    }

    /// Toggle one base in the selection.
    pub fn toggle_base(&mut self, base: &str) {
        if !self.selection.bases.remove(base) {
            self.selection.bases.insert(base.to_string());
        }
        self.refilter();
    }

    /// Toggle one variable in the selection.
    pub fn toggle_variable(&mut self, variable: &str) {
        if !self.selection.variables.remove(variable) {
            self.selection.variables.insert(variable.to_string());
        }
        self.refilter();
    }

    /// Select every observed base.
    pub fn select_all_bases(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.bases = ds.bases.clone();
        }
        self.refilter();
    }

    /// Deselect every base.
    pub fn select_no_bases(&mut self) {
        self.selection.bases.clear();
        self.refilter();
    }

    /// Select every observed variable.
    pub fn select_all_variables(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.variables = ds.variables.clone();
        }
        self.refilter();
    }

    /// Deselect every variable.
    pub fn select_no_variables(&mut self) {
        self.selection.variables.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LimitDataset, LimitRecord};
    use std::collections::BTreeMap;

    fn rec(base: &str, variable: &str, lic: f64, lsc: f64) -> LimitRecord {
        LimitRecord {
            base: base.to_string(),
            variable: variable.to_string(),
            lic,
            lsc,
            extra: BTreeMap::new(),
        }
    }

    fn state_with(records: Vec<LimitRecord>) -> AppState {
        let mut state = AppState {
            config: AppConfig::default(),
            cache: DatasetCache::default(),
            dataset: None,
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            view: None,
            tab: Tab::default(),
            status_message: None,
        };
        state.set_dataset(Arc::new(LimitDataset::from_records(records)));
        state
    }

    #[test]
    fn ingesting_a_dataset_selects_everything() {
        let state = state_with(vec![
            rec("A", "X", 0.0, 1.0),
            rec("B", "Y", 0.0, 1.0),
        ]);
        assert_eq!(state.selection.bases.len(), 2);
        assert_eq!(state.selection.variables.len(), 2);
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert!(state.view.is_some());
    }

    #[test]
    fn toggling_a_base_recomputes_the_view() {
        let mut state = state_with(vec![
            rec("A", "X", 10.0, 20.0),
            rec("B", "X", 14.0, 22.0),
        ]);
        state.toggle_base("B");
        assert_eq!(state.visible_indices, vec![0]);
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.extremes.lic_max.value, 10.0);
    }

    #[test]
    fn empty_selection_clears_the_view() {
        let mut state = state_with(vec![rec("A", "X", 0.0, 1.0)]);
        state.select_no_bases();
        assert!(state.visible_indices.is_empty());
        assert!(state.view.is_none());

        state.select_all_bases();
        assert!(state.view.is_some());
    }
}
