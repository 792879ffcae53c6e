use std::collections::BTreeSet;

use super::model::LimitDataset;

// ---------------------------------------------------------------------------
// Filter predicate: which bases and variables are selected
// ---------------------------------------------------------------------------

/// The two inclusion sets driving the dashboard: selected fixture (`base`)
/// values and selected part (`variable`) values.  A row is visible when its
/// base AND its variable are both selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub bases: BTreeSet<String>,
    pub variables: BTreeSet<String>,
}

impl FilterSelection {
    /// Initial selection at load time: every observed value of both columns.
    pub fn all_of(dataset: &LimitDataset) -> Self {
        FilterSelection {
            bases: dataset.bases.clone(),
            variables: dataset.variables.clone(),
        }
    }

    /// Whether exactly one base is selected.  Gates the per-variable
    /// LIC-vs-LSC grouped bar chart.
    pub fn single_base(&self) -> Option<&str> {
        if self.bases.len() == 1 {
            self.bases.iter().next().map(String::as_str)
        } else {
            None
        }
    }
}

/// Return indices of rows passing the current selection, in source order.
///
/// Selected values absent from the data simply match nothing; an empty result
/// is a valid state the caller must surface instead of aggregating.
pub fn filtered_indices(dataset: &LimitDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            selection.bases.contains(&rec.base) && selection.variables.contains(&rec.variable)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LimitRecord;
    use std::collections::BTreeMap;

    fn rec(base: &str, variable: &str) -> LimitRecord {
        LimitRecord {
            base: base.to_string(),
            variable: variable.to_string(),
            lic: 0.0,
            lsc: 1.0,
            extra: BTreeMap::new(),
        }
    }

    fn dataset() -> LimitDataset {
        LimitDataset::from_records(vec![
            rec("A", "X"),
            rec("A", "Y"),
            rec("B", "X"),
            rec("B", "Y"),
        ])
    }

    fn sel(bases: &[&str], variables: &[&str]) -> FilterSelection {
        FilterSelection {
            bases: bases.iter().map(|s| s.to_string()).collect(),
            variables: variables.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn default_selection_keeps_every_row() {
        let ds = dataset();
        let selection = FilterSelection::all_of(&ds);
        assert_eq!(filtered_indices(&ds, &selection), vec![0, 1, 2, 3]);
    }

    #[test]
    fn filter_is_an_exact_intersection() {
        let ds = dataset();
        let indices = filtered_indices(&ds, &sel(&["A"], &["X", "Y"]));
        assert_eq!(indices, vec![0, 1]);

        // AND across the two dimensions, not OR.
        let indices = filtered_indices(&ds, &sel(&["A"], &["Y"]));
        assert_eq!(indices, vec![1]);

        for &i in &indices {
            let r = &ds.records[i];
            assert_eq!(r.base, "A");
            assert_eq!(r.variable, "Y");
        }
    }

    #[test]
    fn empty_intersection_yields_no_rows() {
        let ds = dataset();
        assert!(filtered_indices(&ds, &sel(&[], &["X"])).is_empty());
        assert!(filtered_indices(&ds, &sel(&["A"], &[])).is_empty());
    }

    #[test]
    fn out_of_domain_values_match_nothing() {
        let ds = dataset();
        assert!(filtered_indices(&ds, &sel(&["Z"], &["X", "Y"])).is_empty());
    }

    #[test]
    fn single_base_gate() {
        assert_eq!(sel(&["A"], &[]).single_base(), Some("A"));
        assert_eq!(sel(&[], &[]).single_base(), None);
        assert_eq!(sel(&["A", "B"], &[]).single_base(), None);
    }
}
