use std::collections::HashMap;

use super::model::VolcanoRecord;

/// Types below this share of the view are folded into [`OTHER_LABEL`].
pub const MINORITY_SHARE: f64 = 0.05;
pub const OTHER_LABEL: &str = "Other";

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Elevation statistics; only exist for a non-empty view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationStats {
    pub average: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    /// `None` when `count == 0`.
    pub elevation: Option<ElevationStats>,
}

pub fn summary_stats(records: &[&VolcanoRecord]) -> SummaryStats {
    let count = records.len();
    if count == 0 {
        return SummaryStats {
            count,
            elevation: None,
        };
    }
    let sum: f64 = records.iter().map(|r| r.elevation).sum();
    let max = records
        .iter()
        .map(|r| r.elevation)
        .fold(f64::NEG_INFINITY, f64::max);
    SummaryStats {
        count,
        elevation: Some(ElevationStats {
            average: sum / count as f64,
            max,
        }),
    }
}

// ---------------------------------------------------------------------------
// Top-N by elevation
// ---------------------------------------------------------------------------

/// The `n` highest records, highest first. Equal elevations keep view order.
pub fn top_n<'a>(records: &[&'a VolcanoRecord], n: usize) -> Vec<&'a VolcanoRecord> {
    let mut sorted = records.to_vec();
    // `sort_by` is stable
    sorted.sort_by(|a, b| b.elevation.total_cmp(&a.elevation));
    sorted.truncate(n);
    sorted
}

// ---------------------------------------------------------------------------
// Type frequency with minority collapsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFrequencyBucket {
    pub label: String,
    pub count: usize,
}

/// Count records per primary type and fold the rare ones into "Other".
///
/// A type is kept when its count is at least [`MINORITY_SHARE`] of the
/// total. Kept buckets are ordered by descending count, then label; the
/// "Other" bucket, if any, comes last. A type actually named "Other" is
/// counted into that bucket so the label never appears twice.
pub fn type_frequency(records: &[&VolcanoRecord]) -> Vec<TypeFrequencyBucket> {
    let total = records.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for rec in records {
        *counts.entry(rec.primary_type.as_str()).or_default() += 1;
    }

    let threshold = MINORITY_SHARE * total as f64;
    let mut major: Vec<TypeFrequencyBucket> = Vec::new();
    let mut other = 0usize;
    for (label, count) in counts {
        if label == OTHER_LABEL {
            other += count;
        } else if count as f64 >= threshold {
            major.push(TypeFrequencyBucket {
                label: label.to_string(),
                count,
            });
        } else {
            other += count;
        }
    }

    major.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    if other > 0 {
        major.push(TypeFrequencyBucket {
            label: OTHER_LABEL.to_string(),
            count: other,
        });
    }
    major
}
