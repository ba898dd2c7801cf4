use std::sync::Arc;

use crate::dashboard::{self, Snapshot};
use crate::data::filter::FilterCriteria;
use crate::data::model::VolcanoDataset;
use crate::data::present;

/// Elevation range selected on start-up, clamped into the dataset bounds.
pub const DEFAULT_ELEVATION_RANGE: (f64, f64) = (0.0, 5000.0);

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Every mutating method ends in [`AppState::refresh`], so `snapshot` always
/// reflects `criteria`.
pub struct AppState {
    /// Loaded once at start-up, never mutated.
    pub dataset: Arc<VolcanoDataset>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Everything derived from `dataset` + `criteria`.
    pub snapshot: Snapshot,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Arc<VolcanoDataset>) -> Self {
        let criteria = initial_criteria(&dataset);
        let mut state = AppState {
            dataset,
            criteria,
            snapshot: Snapshot::default(),
            status_message: None,
        };
        state.refresh();
        state
    }

    /// Slider bounds: whole metres enclosing every record.
    pub fn elevation_limits(&self) -> (f64, f64) {
        slider_limits(&self.dataset)
    }

    /// Recompute the snapshot after a criteria change.
    pub fn refresh(&mut self) {
        self.snapshot = dashboard::compute(&self.dataset, &self.criteria);
        log::debug!(
            "Recomputed view for {:?}: {} of {} name-independent matches",
            self.criteria.country,
            self.snapshot.view.len(),
            self.snapshot.baseline.len()
        );
    }

    pub fn set_country(&mut self, country: &str) {
        if self.criteria.country != country {
            self.criteria.country = country.to_string();
            self.refresh();
        }
    }

    /// Toggle a single primary type in the selection.
    pub fn toggle_type(&mut self, primary_type: &str) {
        if !self.criteria.types.remove(primary_type) {
            self.criteria.types.insert(primary_type.to_string());
        }
        self.refresh();
    }

    pub fn select_all_types(&mut self) {
        self.criteria.types = self.dataset.primary_types.iter().cloned().collect();
        self.refresh();
    }

    pub fn select_no_types(&mut self) {
        self.criteria.types.clear();
        self.refresh();
    }

    /// Set the inclusive elevation range; inverted bounds are swapped.
    pub fn set_elevation_range(&mut self, lo: f64, hi: f64) {
        let range = if lo <= hi { (lo, hi) } else { (hi, lo) };
        if self.criteria.elevation_range != range {
            self.criteria.elevation_range = range;
            self.refresh();
        }
    }

    pub fn set_name_query(&mut self, query: &str) {
        if self.criteria.name_query != query {
            self.criteria.name_query = query.to_string();
            self.refresh();
        }
    }

    /// Ask for a destination and write the current table as CSV.
    pub fn export_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Download filtered data")
            .set_file_name(present::EXPORT_FILE_NAME)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };

        match present::export_csv(&path, &self.snapshot.table) {
            Ok(()) => {
                log::info!(
                    "Exported {} rows to {}",
                    self.snapshot.table.len(),
                    path.display()
                );
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export CSV: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Start-up defaults
// ---------------------------------------------------------------------------

fn slider_limits(dataset: &VolcanoDataset) -> (f64, f64) {
    dataset
        .elevation_bounds
        .map(|(lo, hi)| (lo.floor(), hi.ceil()))
        .unwrap_or(DEFAULT_ELEVATION_RANGE)
}

/// First country alphabetically, every type, (0, 5000) m clamped, no name.
pub fn initial_criteria(dataset: &VolcanoDataset) -> FilterCriteria {
    let (min, max) = slider_limits(dataset);
    let (lo, hi) = DEFAULT_ELEVATION_RANGE;
    FilterCriteria {
        country: dataset.countries.first().cloned().unwrap_or_default(),
        types: dataset.primary_types.iter().cloned().collect(),
        elevation_range: (lo.clamp(min, max), hi.clamp(min, max)),
        name_query: String::new(),
    }
}
