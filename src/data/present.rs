use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::aggregate::TypeFrequencyBucket;
use super::model::VolcanoRecord;
use crate::color::ActivityColor;

/// Suggested file name for the CSV download.
pub const EXPORT_FILE_NAME: &str = "volcanoes_filtered.csv";

// ---------------------------------------------------------------------------
// Table / CSV rows
// ---------------------------------------------------------------------------

/// The columns shown in the data table and written to the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Volcano Name")]
    pub name: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Primary Volcano Type")]
    pub primary_type: String,
    #[serde(rename = "Elevation (m)")]
    pub elevation: f64,
    #[serde(rename = "Activity Evidence")]
    pub activity_evidence: String,
}

impl From<&VolcanoRecord> for TableRow {
    fn from(rec: &VolcanoRecord) -> Self {
        TableRow {
            name: rec.name.clone(),
            country: rec.country.clone(),
            primary_type: rec.primary_type.clone(),
            elevation: rec.elevation,
            activity_evidence: rec.activity_evidence.clone(),
        }
    }
}

pub const TABLE_HEADERS: [&str; 5] = [
    "Volcano Name",
    "Country",
    "Primary Volcano Type",
    "Elevation (m)",
    "Activity Evidence",
];

pub fn table_rows(records: &[&VolcanoRecord]) -> Vec<TableRow> {
    records.iter().map(|r| TableRow::from(*r)).collect()
}

/// Serialize rows as CSV with a header line and no index column.
///
/// The header is written even when `rows` is empty.
pub fn to_csv(rows: &[TableRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(TABLE_HEADERS)
        .context("writing CSV header")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Write the CSV export to `path`.
pub fn export_csv(path: &Path, rows: &[TableRow]) -> Result<()> {
    let text = to_csv(rows)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// Map layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub color: ActivityColor,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapLayer {
    pub points: Vec<MapPoint>,
    /// Mean position of all points; `None` for an empty layer.
    pub center: Option<GeoPoint>,
}

pub fn map_layer(records: &[&VolcanoRecord]) -> MapLayer {
    let points: Vec<MapPoint> = records
        .iter()
        .map(|r| MapPoint {
            longitude: r.longitude,
            latitude: r.latitude,
            color: ActivityColor::classify(&r.activity_evidence),
        })
        .collect();

    let center = if points.is_empty() {
        None
    } else {
        let n = points.len() as f64;
        Some(GeoPoint {
            latitude: points.iter().map(|p| p.latitude).sum::<f64>() / n,
            longitude: points.iter().map(|p| p.longitude).sum::<f64>() / n,
        })
    };

    MapLayer { points, center }
}

// ---------------------------------------------------------------------------
// Chart inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BarEntry {
    pub name: String,
    pub elevation: f64,
}

/// Bars for the elevation chart, in the order given (highest first for top-N).
pub fn bar_entries(top: &[&VolcanoRecord]) -> Vec<BarEntry> {
    top.iter()
        .map(|r| BarEntry {
            name: r.name.clone(),
            elevation: r.elevation,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the whole pie in `[0, 1]`.
    pub fraction: f64,
}

impl PieSlice {
    /// `"Stratovolcano (62.5%)"`
    pub fn legend_text(&self) -> String {
        format!("{} ({:.1}%)", self.label, self.fraction * 100.0)
    }
}

pub fn pie_slices(buckets: &[TypeFrequencyBucket]) -> Vec<PieSlice> {
    let total: usize = buckets.iter().map(|b| b.count).sum();
    if total == 0 {
        return Vec::new();
    }
    buckets
        .iter()
        .map(|b| PieSlice {
            label: b.label.clone(),
            count: b.count,
            fraction: b.count as f64 / total as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::record;

    #[test]
    fn table_rows_keep_display_columns() {
        let rec = record("Etna", "Italy", "Stratovolcano", 3357.0);
        let rows = table_rows(&[&rec]);
        assert_eq!(
            rows,
            vec![TableRow {
                name: "Etna".into(),
                country: "Italy".into(),
                primary_type: "Stratovolcano".into(),
                elevation: 3357.0,
                activity_evidence: "Eruption Observed".into(),
            }]
        );
    }

    #[test]
    fn csv_has_header_and_no_index() {
        let a = record("Etna", "Italy", "Stratovolcano", 3357.5);
        let mut b = record("Campi Flegrei, Solfatara", "Italy", "Caldera", 458.0);
        b.activity_evidence = "Historical".into();
        let text = to_csv(&table_rows(&[&a, &b])).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Volcano Name,Country,Primary Volcano Type,Elevation (m),Activity Evidence",
                "Etna,Italy,Stratovolcano,3357.5,Eruption Observed",
                "\"Campi Flegrei, Solfatara\",Italy,Caldera,458.0,Historical",
            ]
        );
    }

    #[test]
    fn csv_of_empty_view_is_header_only() {
        let text = to_csv(&[]).unwrap();
        assert_eq!(
            text.trim_end(),
            "Volcano Name,Country,Primary Volcano Type,Elevation (m),Activity Evidence"
        );
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let rec = record("Etna", "Italy", "Stratovolcano", 3357.0);
        export_csv(&path, &table_rows(&[&rec])).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Volcano Name,"));
        assert!(written.contains("Etna"));
    }

    #[test]
    fn map_layer_colours_and_centre() {
        let mut a = record("A", "X", "Shield", 1.0);
        a.latitude = 10.0;
        a.longitude = 20.0;
        a.activity_evidence = "Historical".into();
        let mut b = record("B", "X", "Shield", 1.0);
        b.latitude = 20.0;
        b.longitude = 40.0;
        b.activity_evidence = "Uncertain".into();

        let layer = map_layer(&[&a, &b]);
        assert_eq!(layer.points.len(), 2);
        assert_eq!(layer.points[0].color, ActivityColor::RedHighlight);
        assert_eq!(layer.points[1].color, ActivityColor::BlueDefault);
        assert_eq!(
            layer.center,
            Some(GeoPoint {
                latitude: 15.0,
                longitude: 30.0
            })
        );
        // classification never touches the record
        assert_eq!(a.activity_evidence, "Historical");
    }

    #[test]
    fn empty_map_has_no_centre() {
        let layer = map_layer(&[]);
        assert!(layer.points.is_empty());
        assert_eq!(layer.center, None);
    }

    #[test]
    fn pie_fractions_sum_to_one() {
        let buckets = vec![
            TypeFrequencyBucket { label: "Stratovolcano".into(), count: 5 },
            TypeFrequencyBucket { label: "Caldera".into(), count: 2 },
            TypeFrequencyBucket { label: "Other".into(), count: 1 },
        ];
        let slices = pie_slices(&buckets);
        let sum: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(slices[0].legend_text(), "Stratovolcano (62.5%)");
        assert!(pie_slices(&[]).is_empty());
    }

    #[test]
    fn bars_follow_input_order() {
        let a = record("High", "X", "Shield", 900.0);
        let b = record("Low", "X", "Shield", 100.0);
        let bars = bar_entries(&[&a, &b]);
        assert_eq!(bars[0].name, "High");
        assert_eq!(bars[1].elevation, 100.0);
    }
}
