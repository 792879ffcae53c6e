use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// LimitRecord – one row of the limits table
// ---------------------------------------------------------------------------

/// A single tolerance-limit row: one part (`variable`) measured under one
/// fixture (`base`), with its lower (`lic`) and upper (`lsc`) control limits.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitRecord {
    /// Test fixture / process variant identifier.
    pub base: String,
    /// Part / measured feature identifier.
    pub variable: String,
    /// Lower control limit.
    pub lic: f64,
    /// Upper control limit.
    pub lsc: f64,
    /// Columns of the source file not mapped to a logical role, kept as text.
    pub extra: BTreeMap<String, String>,
}

impl LimitRecord {
    /// Width of the tolerance interval, `lsc − lic`.
    ///
    /// Row-local and cheap; always derived from the current `lic`/`lsc`
    /// rather than stored, so it can never go stale under filtering.
    pub fn range(&self) -> f64 {
        self.lsc - self.lic
    }

    /// Midpoint of the tolerance interval, `(lsc + lic) / 2`.
    pub fn center(&self) -> f64 {
        (self.lsc + self.lic) / 2.0
    }
}

// ---------------------------------------------------------------------------
// LimitDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed distinct category values.
#[derive(Debug, Clone)]
pub struct LimitDataset {
    /// All rows in source order.
    pub records: Vec<LimitRecord>,
    /// Sorted distinct `base` values observed in the table.
    pub bases: BTreeSet<String>,
    /// Sorted distinct `variable` values observed in the table.
    pub variables: BTreeSet<String>,
}

impl LimitDataset {
    /// Build the category indices from the loaded rows.
    pub fn from_records(records: Vec<LimitRecord>) -> Self {
        let mut bases = BTreeSet::new();
        let mut variables = BTreeSet::new();
        for rec in &records {
            bases.insert(rec.base.clone());
            variables.insert(rec.variable.clone());
        }
        LimitDataset {
            records,
            bases,
            variables,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
