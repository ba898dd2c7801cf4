use crate::data::aggregate::{self, SummaryStats, TypeFrequencyBucket};
use crate::data::filter::{self, FilterCriteria, FilteredView};
use crate::data::model::VolcanoDataset;
use crate::data::present::{self, BarEntry, MapLayer, PieSlice, TableRow};

/// Number of bars in the elevation chart.
pub const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Snapshot – everything the UI draws for one set of criteria
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Records passing every criterion, name search included.
    pub view: FilteredView,
    /// Same criteria without the name search.
    pub baseline: FilteredView,
    pub stats: SummaryStats,
    pub top_bars: Vec<BarEntry>,
    pub type_buckets: Vec<TypeFrequencyBucket>,
    pub pie: Vec<PieSlice>,
    pub map: MapLayer,
    pub table: Vec<TableRow>,
}

impl Snapshot {
    /// Charts and the map are only drawn for a non-empty view.
    pub fn has_charts(&self) -> bool {
        !self.view.is_empty()
    }
}

/// One full recomputation pass: filter → aggregate → present.
pub fn compute(dataset: &VolcanoDataset, criteria: &FilterCriteria) -> Snapshot {
    let view = filter::filter(dataset, criteria);
    let baseline = filter::filter(dataset, &criteria.without_name());

    let records = view.records(dataset);
    let type_buckets = aggregate::type_frequency(&records);

    Snapshot {
        stats: aggregate::summary_stats(&records),
        top_bars: present::bar_entries(&aggregate::top_n(&records, TOP_N)),
        pie: present::pie_slices(&type_buckets),
        type_buckets,
        map: present::map_layer(&records),
        table: present::table_rows(&records),
        view,
        baseline,
    }
}
