use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use encoding_rs::{UTF_8, WINDOWS_1252};
use regex::Regex;
use thiserror::Error;

use super::model::{VolcanoDataset, VolcanoRecord};

pub const COL_NAME: &str = "Volcano Name";
pub const COL_COUNTRY: &str = "Country";
pub const COL_TYPE: &str = "Primary Volcano Type";
pub const COL_ELEVATION: &str = "Elevation (m)";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_ACTIVITY: &str = "Activity Evidence";

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("static regex"));

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to produce a usable dataset. Always fatal for the dashboard.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("file has no header line after the title line")]
    MissingHeader,
    #[error("required column '{0}' not found")]
    MissingColumn(&'static str),
    #[error("no volcano has a usable elevation and position")]
    NoRecords,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean the volcano dataset from a file.
pub fn load_file(path: &Path) -> Result<VolcanoDataset, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_bytes(&bytes)
}

/// Load and clean the volcano dataset from raw file contents.
///
/// Layout: one title line, then a CSV header, then data rows. The required
/// columns are looked up by name so extra columns and ordering don't matter.
pub fn load_bytes(bytes: &[u8]) -> Result<VolcanoDataset, LoadError> {
    let text = decode(bytes);
    let body = skip_title_line(&text).ok_or(LoadError::MissingHeader)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader);
    }
    let columns = Columns::locate(&headers)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        let row = result?;
        match columns.parse_row(&row) {
            Some(rec) => records.push(rec),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!("Dropped {dropped} rows without a numeric elevation, latitude or longitude");
    }
    let dataset = VolcanoDataset::from_records(records);
    if dataset.is_empty() {
        return Err(LoadError::NoRecords);
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Decoding and header cleanup
// ---------------------------------------------------------------------------

/// UTF-8 when the bytes are valid UTF-8, Windows-1252 (a Latin-1 superset)
/// otherwise. Windows-1252 maps every byte, so this never fails.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        None => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}

fn skip_title_line(text: &str) -> Option<&str> {
    text.split_once('\n').map(|(_, rest)| rest)
}

fn normalize_header(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}'], "").trim().to_string()
}

/// Remove every `( … )` group and every `?`, then trim.
pub fn normalize_type(raw: &str) -> String {
    PARENTHETICAL
        .replace_all(raw, "")
        .replace('?', "")
        .trim()
        .to_string()
}

/// Numeric coercion: anything that doesn't parse to a finite number is missing.
/// `inf`, `NaN` and overflowing text such as `1e999` are all rejected.
fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw?.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Column positions
// ---------------------------------------------------------------------------

struct Columns {
    name: usize,
    country: usize,
    primary_type: usize,
    elevation: usize,
    latitude: usize,
    longitude: usize,
    activity: usize,
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self, LoadError> {
        let find = |col: &'static str| {
            headers
                .iter()
                .position(|h| h == col)
                .ok_or(LoadError::MissingColumn(col))
        };
        Ok(Columns {
            name: find(COL_NAME)?,
            country: find(COL_COUNTRY)?,
            primary_type: find(COL_TYPE)?,
            elevation: find(COL_ELEVATION)?,
            latitude: find(COL_LATITUDE)?,
            longitude: find(COL_LONGITUDE)?,
            activity: find(COL_ACTIVITY)?,
        })
    }

    /// `None` when the row lacks elevation or either coordinate.
    fn parse_row(&self, row: &csv::StringRecord) -> Option<VolcanoRecord> {
        let text = |idx: usize| row.get(idx).unwrap_or("").to_string();

        let elevation = parse_number(row.get(self.elevation))?;
        let latitude = parse_number(row.get(self.latitude))?;
        let longitude = parse_number(row.get(self.longitude))?;

        Some(VolcanoRecord {
            name: text(self.name),
            country: text(self.country),
            primary_type: normalize_type(row.get(self.primary_type).unwrap_or("")),
            elevation,
            latitude,
            longitude,
            activity_evidence: text(self.activity),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Volcano Number,Volcano Name,Country,Primary Volcano Type,Activity Evidence,Last Known Eruption,Region,Subregion,Latitude,Longitude,Elevation (m),Dominant Rock Type,Tectonic Setting";

    fn source(rows: &[&str]) -> String {
        let mut s = String::from("Volcano List\n");
        s.push_str(HEADER);
        s.push('\n');
        for r in rows {
            s.push_str(r);
            s.push('\n');
        }
        s
    }

    #[test]
    fn loads_clean_rows() {
        let text = source(&[
            "283030,Fujisan,Japan,Stratovolcano,Eruption Observed,1708 CE,Japan,Honshu,35.3606,138.7274,3776,Andesite,Subduction zone",
        ]);
        let ds = load_bytes(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        let rec = &ds.records[0];
        assert_eq!(rec.name, "Fujisan");
        assert_eq!(rec.country, "Japan");
        assert_eq!(rec.primary_type, "Stratovolcano");
        assert_eq!(rec.elevation, 3776.0);
        assert_eq!(rec.latitude, 35.3606);
        assert_eq!(rec.longitude, 138.7274);
        assert_eq!(rec.activity_evidence, "Eruption Observed");
    }

    #[test]
    fn drops_rows_missing_elevation_or_position() {
        let text = source(&[
            "1,Good,Chile,Stratovolcano,Eruption Observed,,,,-23.3,-67.7,5592,,",
            "2,Unknown Elev,Chile,Stratovolcano,Uncertain,,,,-23.3,-67.7,Unknown,,",
            "3,No Elev,Chile,Stratovolcano,Uncertain,,,,-23.3,-67.7,,,",
            "4,No Lat,Chile,Stratovolcano,Uncertain,,,,,-67.7,100,,",
            "5,No Lon,Chile,Stratovolcano,Uncertain,,,,-23.3,,100,,",
            "6,Short Row,Chile,Stratovolcano",
        ]);
        let ds = load_bytes(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].name, "Good");
        for rec in &ds.records {
            assert!(rec.elevation.is_finite());
            assert!(rec.latitude.is_finite());
            assert!(rec.longitude.is_finite());
        }
    }

    #[test]
    fn drops_rows_with_non_finite_numbers() {
        let text = source(&[
            "1,Kept,Chile,Stratovolcano,Uncertain,,,,10,20,100,,",
            "2,Inf Lon,Chile,Stratovolcano,Uncertain,,,,10,inf,100,,",
            "3,Overflow Elev,Chile,Stratovolcano,Uncertain,,,,10,-20,1e999,,",
            "4,Neg Inf Lat,Chile,Stratovolcano,Uncertain,,,,-inf,20,100,,",
            "5,NaN Elev,Chile,Stratovolcano,Uncertain,,,,10,20,NaN,,",
        ]);
        let ds = load_bytes(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].name, "Kept");
        assert_eq!(ds.elevation_bounds, Some((100.0, 100.0)));

        let records: Vec<_> = ds.records.iter().collect();
        let center = crate::data::present::map_layer(&records).center.unwrap();
        assert!(center.latitude.is_finite() && center.longitude.is_finite());
    }

    #[test]
    fn strips_type_annotations() {
        assert_eq!(normalize_type("Stratovolcano(es)"), "Stratovolcano");
        assert_eq!(normalize_type("Caldera(s) ?"), "Caldera");
        assert_eq!(normalize_type(" Shield? "), "Shield");
        assert_eq!(normalize_type("Lava dome(s) (compound)"), "Lava dome");
        assert_eq!(normalize_type("Fissure vent(s"), "Fissure vent(s");
    }

    #[test]
    fn normalizes_headers_with_bom_and_carriage_returns() {
        let text = "title\r\n\u{feff}Volcano Name , Country,Primary Volcano Type,Elevation (m),Latitude,Longitude,Activity Evidence\r\nEtna,Italy,Stratovolcano,3357,37.748,14.999,Eruption Observed\r\n";
        let ds = load_bytes(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].name, "Etna");
        assert_eq!(ds.records[0].activity_evidence, "Eruption Observed");
    }

    #[test]
    fn decodes_latin1_bytes() {
        let mut bytes = b"title\nVolcano Name,Country,Primary Volcano Type,Elevation (m),Latitude,Longitude,Activity Evidence\n".to_vec();
        // Latin-1 0xF1 is not valid UTF-8 on its own
        bytes.extend_from_slice(b"Pe\xf1a Blanca,Mexico,Stratovolcano,2000,20.0,-100.0,Uncertain\n");
        let ds = load_bytes(&bytes).unwrap();
        assert_eq!(ds.records[0].name, "Peña Blanca");
    }

    #[test]
    fn missing_column_is_an_error() {
        let text = "title\nVolcano Name,Country,Latitude,Longitude\nEtna,Italy,37.7,15.0\n";
        let err = load_bytes(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(COL_TYPE)));
    }

    #[test]
    fn title_only_file_has_no_header() {
        let err = load_bytes(b"Volcano List").unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader));
    }

    #[test]
    fn all_rows_dropped_is_an_error() {
        let text = source(&["1,Ghost,Chile,Stratovolcano,Uncertain,,,,,,,,"]);
        let err = load_bytes(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NoRecords));
    }

    #[test]
    fn unreadable_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let text = source(&[
            "1,Villarrica,Chile,Stratovolcano,Eruption Observed,,,,-39.42,-71.93,2847,,",
        ]);
        file.write_all(text.as_bytes()).unwrap();
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.countries, vec!["Chile"]);
    }
}
