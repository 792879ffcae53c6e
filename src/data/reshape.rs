use std::fmt;

use super::filter::FilterSelection;
use super::model::LimitDataset;

// ---------------------------------------------------------------------------
// Wide-to-long reshape for the grouped LIC/LSC bar chart
// ---------------------------------------------------------------------------

/// Which of the two limit columns a long-format value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Lic,
    Lsc,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitKind::Lic => write!(f, "LIC"),
            LimitKind::Lsc => write!(f, "LSC"),
        }
    }
}

/// One melted value: `(variable, limit kind, value)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub variable: String,
    pub kind: LimitKind,
    pub value: f64,
}

/// Long-format limits for a single base, ready for grouped-bar rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleBaseLimits {
    pub base: String,
    pub records: Vec<LongRecord>,
}

/// Melt the filtered rows of the single selected base into long format:
/// each row contributes one LIC record and one LSC record.
///
/// Returns `None` unless exactly one base is selected; the grouped bar chart
/// is undefined across bases, so the caller shows a guidance message instead.
pub fn single_base_long(
    dataset: &LimitDataset,
    indices: &[usize],
    selection: &FilterSelection,
) -> Option<SingleBaseLimits> {
    let base = selection.single_base()?;

    let mut records = Vec::with_capacity(indices.len() * 2);
    for &i in indices {
        let rec = &dataset.records[i];
        // All filtered rows carry the selected base already; keep the guard
        // cheap in case a caller passes unfiltered indices.
        if rec.base != base {
            continue;
        }
        records.push(LongRecord {
            variable: rec.variable.clone(),
            kind: LimitKind::Lic,
            value: rec.lic,
        });
        records.push(LongRecord {
            variable: rec.variable.clone(),
            kind: LimitKind::Lsc,
            value: rec.lsc,
        });
    }

    Some(SingleBaseLimits {
        base: base.to_string(),
        records,
    })
}
