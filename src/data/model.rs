use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// VolcanoRecord – one row of the cleaned dataset
// ---------------------------------------------------------------------------

/// A single volcano after cleaning.
///
/// Elevation and coordinates are plain `f64` rather than `Option<f64>`:
/// rows lacking any of them never make it out of the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct VolcanoRecord {
    pub name: String,
    pub country: String,
    /// Primary volcano type with parenthetical qualifiers and `?` removed.
    pub primary_type: String,
    /// Metres above sea level (negative for submarine volcanoes).
    pub elevation: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Free-text activity evidence, e.g. `"Eruption Observed"`.
    pub activity_evidence: String,
}

// ---------------------------------------------------------------------------
// VolcanoDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full cleaned dataset with pre-computed indices for the controls.
///
/// Built once at start-up and shared read-only for the rest of the process.
#[derive(Debug, Clone)]
pub struct VolcanoDataset {
    /// All records in source order.
    pub records: Vec<VolcanoRecord>,
    /// Sorted distinct countries.
    pub countries: Vec<String>,
    /// Sorted distinct primary types.
    pub primary_types: Vec<String>,
    /// Lowest and highest elevation, `None` only for an empty dataset.
    pub elevation_bounds: Option<(f64, f64)>,
}

impl VolcanoDataset {
    /// Build indices from the cleaned records.
    pub fn from_records(records: Vec<VolcanoRecord>) -> Self {
        let mut countries: BTreeSet<String> = BTreeSet::new();
        let mut primary_types: BTreeSet<String> = BTreeSet::new();
        let mut elevation_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            countries.insert(rec.country.clone());
            primary_types.insert(rec.primary_type.clone());
            elevation_bounds = Some(match elevation_bounds {
                None => (rec.elevation, rec.elevation),
                Some((lo, hi)) => (lo.min(rec.elevation), hi.max(rec.elevation)),
            });
        }

        VolcanoDataset {
            records,
            countries: countries.into_iter().collect(),
            primary_types: primary_types.into_iter().collect(),
            elevation_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
