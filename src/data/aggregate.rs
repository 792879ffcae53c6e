use std::collections::BTreeMap;

use super::model::{LimitDataset, LimitRecord};

// ---------------------------------------------------------------------------
// Aggregate view: everything the dashboard derives from the filtered rows
// ---------------------------------------------------------------------------

/// One extreme-value KPI: the winning value plus its row context.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeEntry {
    pub value: f64,
    pub base: String,
    pub variable: String,
}

impl ExtremeEntry {
    fn from_record(value: f64, rec: &LimitRecord) -> Self {
        ExtremeEntry {
            value,
            base: rec.base.clone(),
            variable: rec.variable.clone(),
        }
    }
}

/// The four KPI extremes over the filtered rows.  Ties resolve to the first
/// occurrence in filtered iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Extremes {
    pub lic_max: ExtremeEntry,
    pub lic_min: ExtremeEntry,
    pub lsc_max: ExtremeEntry,
    pub lsc_min: ExtremeEntry,
}

/// Mean LIC and LSC per variable, averaged across all selected bases.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableMeans {
    pub variable: String,
    pub mean_lic: f64,
    pub mean_lsc: f64,
}

/// Mean range (LSC − LIC) cross-tabulated by base × variable.
///
/// Cells are `None` when the filtered rows contain no record for that pair;
/// that is "no data", never 0.0.  Axes follow the natural sort of the values
/// observed in the filtered subset.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeHeatmap {
    pub bases: Vec<String>,
    pub variables: Vec<String>,
    /// Row-major: `cells[base_idx * variables.len() + variable_idx]`.
    cells: Vec<Option<f64>>,
}

impl RangeHeatmap {
    pub fn cell(&self, base_idx: usize, variable_idx: usize) -> Option<f64> {
        self.cells
            .get(base_idx * self.variables.len() + variable_idx)
            .copied()
            .flatten()
    }

    /// Min and max over the present cells, for color scaling.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for v in self.cells.iter().copied().flatten() {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        bounds
    }
}

/// All aggregates of one filter interaction, recomputed synchronously on
/// every selection change.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateView {
    pub extremes: Extremes,
    pub per_variable: Vec<VariableMeans>,
    pub heatmap: RangeHeatmap,
}

impl AggregateView {
    /// Compute the three aggregations over the filtered row subset.
    ///
    /// Returns `None` for an empty subset: the "no data" signal.  Callers
    /// must skip aggregation-dependent rendering entirely in that case.
    pub fn compute(dataset: &LimitDataset, indices: &[usize]) -> Option<Self> {
        if indices.is_empty() {
            return None;
        }
        let rows: Vec<&LimitRecord> = indices.iter().map(|&i| &dataset.records[i]).collect();

        Some(AggregateView {
            extremes: compute_extremes(&rows),
            per_variable: compute_variable_means(&rows),
            heatmap: compute_range_heatmap(&rows),
        })
    }
}

// ---------------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------------

/// Strict comparisons keep the first occurrence on ties, so results are
/// reproducible for identical input ordering.
fn compute_extremes(rows: &[&LimitRecord]) -> Extremes {
    let first = rows[0];
    let mut lic_max = ExtremeEntry::from_record(first.lic, first);
    let mut lic_min = lic_max.clone();
    let mut lsc_max = ExtremeEntry::from_record(first.lsc, first);
    let mut lsc_min = lsc_max.clone();

    for rec in &rows[1..] {
        if rec.lic > lic_max.value {
            lic_max = ExtremeEntry::from_record(rec.lic, rec);
        }
        if rec.lic < lic_min.value {
            lic_min = ExtremeEntry::from_record(rec.lic, rec);
        }
        if rec.lsc > lsc_max.value {
            lsc_max = ExtremeEntry::from_record(rec.lsc, rec);
        }
        if rec.lsc < lsc_min.value {
            lsc_min = ExtremeEntry::from_record(rec.lsc, rec);
        }
    }

    Extremes {
        lic_max,
        lic_min,
        lsc_max,
        lsc_min,
    }
}

fn compute_variable_means(rows: &[&LimitRecord]) -> Vec<VariableMeans> {
    // BTreeMap keeps the ascending variable order the charts rely on.
    let mut groups: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();
    for rec in rows {
        let entry = groups.entry(rec.variable.as_str()).or_insert((0.0, 0.0, 0));
        entry.0 += rec.lic;
        entry.1 += rec.lsc;
        entry.2 += 1;
    }

    groups
        .into_iter()
        .map(|(variable, (lic_sum, lsc_sum, n))| VariableMeans {
            variable: variable.to_string(),
            mean_lic: lic_sum / n as f64,
            mean_lsc: lsc_sum / n as f64,
        })
        .collect()
}

fn compute_range_heatmap(rows: &[&LimitRecord]) -> RangeHeatmap {
    let bases: Vec<String> = rows
        .iter()
        .map(|r| r.base.clone())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    let variables: Vec<String> = rows
        .iter()
        .map(|r| r.variable.clone())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();

    let base_idx: BTreeMap<&str, usize> = bases
        .iter()
        .enumerate()
        .map(|(i, b)| (b.as_str(), i))
        .collect();
    let var_idx: BTreeMap<&str, usize> = variables
        .iter()
        .enumerate()
        .map(|(i, v)| (v.as_str(), i))
        .collect();

    let mut sums = vec![(0.0f64, 0usize); bases.len() * variables.len()];
    for rec in rows {
        let cell = base_idx[rec.base.as_str()] * variables.len() + var_idx[rec.variable.as_str()];
        sums[cell].0 += rec.range();
        sums[cell].1 += 1;
    }

    let cells = sums
        .into_iter()
        .map(|(sum, n)| if n == 0 { None } else { Some(sum / n as f64) })
        .collect();

    RangeHeatmap {
        bases,
        variables,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn view(records: Vec<LimitRecord>) -> AggregateView {
        let ds = LimitDataset::from_records(records);
        let indices: Vec<usize> = (0..ds.len()).collect();
        AggregateView::compute(&ds, &indices).unwrap()
    }

    #[test]
    fn empty_subset_signals_no_data() {
        let ds = LimitDataset::from_records(vec![rec("A", "X", 0.0, 1.0)]);
        assert!(AggregateView::compute(&ds, &[]).is_none());
    }

    #[test]
    fn per_variable_means_average_across_bases() {
        let v = view(vec![
            rec("A", "X", 10.0, 20.0),
            rec("B", "X", 14.0, 22.0),
        ]);
        assert_eq!(v.per_variable.len(), 1);
        assert_eq!(v.per_variable[0].variable, "X");
        assert_eq!(v.per_variable[0].mean_lic, 12.0);
        assert_eq!(v.per_variable[0].mean_lsc, 21.0);
    }

    #[test]
    fn per_variable_means_are_ordered_ascending() {
        let v = view(vec![
            rec("A", "Y", 1.0, 2.0),
            rec("A", "X", 3.0, 4.0),
            rec("A", "Z", 5.0, 6.0),
        ]);
        let order: Vec<&str> = v.per_variable.iter().map(|m| m.variable.as_str()).collect();
        assert_eq!(order, ["X", "Y", "Z"]);
    }

    #[test]
    fn extremes_report_value_and_context() {
        let v = view(vec![
            rec("A", "X", 10.0, 20.0),
            rec("B", "Y", 14.0, 18.0),
        ]);
        let e = &v.extremes;
        assert_eq!((e.lic_max.value, e.lic_max.base.as_str()), (14.0, "B"));
        assert_eq!((e.lic_min.value, e.lic_min.base.as_str()), (10.0, "A"));
        assert_eq!((e.lsc_max.value, e.lsc_max.variable.as_str()), (20.0, "X"));
        assert_eq!((e.lsc_min.value, e.lsc_min.variable.as_str()), (18.0, "Y"));
    }

    #[test]
    fn extreme_ties_keep_first_occurrence() {
        let v = view(vec![
            rec("A", "X", 10.0, 20.0),
            rec("B", "Y", 10.0, 20.0),
        ]);
        let e = &v.extremes;
        assert_eq!(e.lic_max.base, "A");
        assert_eq!(e.lic_max.variable, "X");
        assert_eq!(e.lic_min.base, "A");
        assert_eq!(e.lsc_max.base, "A");
        assert_eq!(e.lsc_min.base, "A");
    }

    #[test]
    fn heatmap_shape_matches_observed_categories() {
        let v = view(vec![
            rec("A", "X", 10.0, 20.0),
            rec("A", "Y", 0.0, 5.0),
            rec("B", "X", 0.0, 2.0),
            rec("B", "Y", 1.0, 2.0),
        ]);
        let h = &v.heatmap;
        assert_eq!(h.bases, ["A", "B"]);
        assert_eq!(h.variables, ["X", "Y"]);
        assert_eq!(h.cell(0, 0), Some(10.0));
        assert_eq!(h.cell(0, 1), Some(5.0));
        assert_eq!(h.cell(1, 0), Some(2.0));
        assert_eq!(h.cell(1, 1), Some(1.0));
    }

    #[test]
    fn heatmap_missing_pair_is_none_not_zero() {
        let v = view(vec![
            rec("A", "X", 0.0, 4.0),
            rec("B", "Y", 0.0, 6.0),
        ]);
        let h = &v.heatmap;
        assert_eq!(h.cell(0, 0), Some(4.0));
        assert_eq!(h.cell(0, 1), None);
        assert_eq!(h.cell(1, 0), None);
        assert_eq!(h.cell(1, 1), Some(6.0));
        assert_eq!(h.value_bounds(), Some((4.0, 6.0)));
    }

    #[test]
    fn heatmap_cell_averages_duplicate_pairs() {
        let v = view(vec![
            rec("A", "X", 0.0, 4.0),
            rec("A", "X", 0.0, 8.0),
        ]);
        assert_eq!(v.heatmap.cell(0, 0), Some(6.0));
    }
}
