use std::collections::BTreeSet;

use super::model::{VolcanoDataset, VolcanoRecord};

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Everything the user has chosen in the filter panel.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Exact country match.
    pub country: String,
    /// Allowed primary types. Empty means nothing passes.
    pub types: BTreeSet<String>,
    /// Inclusive `(min, max)` elevation in metres.
    pub elevation_range: (f64, f64),
    /// Case-insensitive name substring. Empty means no name filter.
    pub name_query: String,
}

impl FilterCriteria {
    /// The same criteria with the name search cleared.
    pub fn without_name(&self) -> Self {
        FilterCriteria {
            name_query: String::new(),
            ..self.clone()
        }
    }

    /// Whether a single record passes every active predicate.
    pub fn matches(&self, rec: &VolcanoRecord) -> bool {
        let (lo, hi) = self.elevation_range;
        rec.country == self.country
            && self.types.contains(&rec.primary_type)
            && rec.elevation >= lo
            && rec.elevation <= hi
            && (self.name_query.is_empty() || contains_ignore_case(&rec.name, &self.name_query))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Indices into [`VolcanoDataset::records`] of the records passing a filter,
/// in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    pub indices: Vec<usize>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolve the indices against the dataset they were computed from.
    pub fn records<'a>(&self, dataset: &'a VolcanoDataset) -> Vec<&'a VolcanoRecord> {
        self.indices
            .iter()
            .filter_map(|&i| dataset.records.get(i))
            .collect()
    }
}

/// Return the view of records that pass all predicates in `criteria`.
///
/// Pure: no state is kept between calls, so calling it twice with the same
/// inputs yields equal views.
pub fn filter(dataset: &VolcanoDataset, criteria: &FilterCriteria) -> FilteredView {
    if criteria.types.is_empty() {
        return FilteredView::default();
    }
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect();
    FilteredView { indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::sample_dataset;

    fn criteria(ds: &VolcanoDataset, country: &str) -> FilterCriteria {
        FilterCriteria {
            country: country.to_string(),
            types: ds.primary_types.iter().cloned().collect(),
            elevation_range: ds.elevation_bounds.unwrap(),
            name_query: String::new(),
        }
    }

    fn names(ds: &VolcanoDataset, view: &FilteredView) -> Vec<String> {
        view.records(ds).iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn open_criteria_return_whole_country() {
        let ds = sample_dataset();
        let view = filter(&ds, &criteria(&ds, "Japan"));
        let expected: Vec<usize> = ds
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.country == "Japan")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(view.indices, expected);
        assert_eq!(view.len(), 5);
    }

    #[test]
    fn empty_type_set_yields_empty_view() {
        let ds = sample_dataset();
        let mut c = criteria(&ds, "Japan");
        c.types.clear();
        assert!(filter(&ds, &c).is_empty());
        c.name_query = "fuji".to_string();
        assert!(filter(&ds, &c).is_empty());
    }

    #[test]
    fn elevation_range_is_inclusive() {
        let ds = sample_dataset();
        let mut c = criteria(&ds, "Japan");
        c.elevation_range = (1483.0, 1700.0);
        assert_eq!(names(&ds, &filter(&ds, &c)), vec!["Asosan", "Kirishimayama", "Unzendake"]);
    }

    #[test]
    fn name_query_is_case_insensitive_substring() {
        let ds = sample_dataset();
        let mut c = criteria(&ds, "Japan");
        c.types = ["Stratovolcano".to_string()].into();
        c.elevation_range = (0.0, 5000.0);
        c.name_query = "FUJI".to_string();

        let view = filter(&ds, &c);
        assert_eq!(names(&ds, &view), vec!["Fujisan", "Fuji-Oshima"]);
        for rec in view.records(&ds) {
            assert!(rec.name.to_lowercase().contains("fuji"));
            assert_eq!(rec.country, "Japan");
            assert_eq!(rec.primary_type, "Stratovolcano");
            assert!((0.0..=5000.0).contains(&rec.elevation));
        }
    }

    #[test]
    fn empty_name_differs_from_unmatched_name() {
        let ds = sample_dataset();
        let mut c = criteria(&ds, "Italy");
        assert_eq!(filter(&ds, &c).len(), 3);
        c.name_query = "zzz".to_string();
        assert!(filter(&ds, &c).is_empty());
        assert_eq!(filter(&ds, &c.without_name()).len(), 3);
    }

    #[test]
    fn unknown_country_matches_nothing() {
        let ds = sample_dataset();
        assert!(filter(&ds, &criteria(&ds, "Atlantis")).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample_dataset();
        let mut c = criteria(&ds, "Japan");
        c.name_query = "san".to_string();
        assert_eq!(filter(&ds, &c), filter(&ds, &c));
    }
}
