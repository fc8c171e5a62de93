use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Filter predicate: which unique values are selected per segment column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps segment column → set of selected values.
/// Only segment columns carry a filter; other columns are never constrained.
pub type FilterState = BTreeMap<String, BTreeSet<CellValue>>;

/// Initialise a [`FilterState`] for the given segment columns with all
/// values selected (i.e., show everything).
pub fn init_filter_state(dataset: &Dataset, segment_columns: &[String]) -> FilterState {
    segment_columns
        .iter()
        .map(|col| {
            let vals = dataset
                .unique_values
                .get(col)
                .cloned()
                .unwrap_or_default();
            (col.clone(), vals)
        })
        .collect()
}

/// Return indices of rows that pass all active filters.
///
/// A row passes a column filter when its value for that column is a member
/// of the selected set. An empty selected set excludes every row (nothing
/// is checked on). A cell missing from a row counts as [`CellValue::Null`].
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            for (col, selected) in filters {
                if selected.is_empty() {
                    return false;
                }
                match row.get(col) {
                    Some(val) => {
                        if !selected.contains(val) {
                            return false;
                        }
                    }
                    None => {
                        if !selected.contains(&CellValue::Null) {
                            return false;
                        }
                    }
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn region(name: &str) -> Row {
        let mut row = Row::new();
        row.insert("region".to_string(), CellValue::String(name.to_string()));
        row
    }

    fn dataset() -> Dataset {
        Dataset::from_rows(vec![region("EU"), region("US"), region("EU")])
    }

    fn only(col: &str, vals: &[&str]) -> FilterState {
        let set: BTreeSet<CellValue> = vals
            .iter()
            .map(|v| CellValue::String(v.to_string()))
            .collect();
        FilterState::from([(col.to_string(), set)])
    }

    #[test]
    fn all_values_selected_passes_everything() {
        let ds = dataset();
        let filters = init_filter_state(&ds, &["region".to_string()]);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn subset_selection_keeps_matching_rows() {
        let ds = dataset();
        assert_eq!(filtered_indices(&ds, &only("region", &["EU"])), vec![0, 2]);
    }

    #[test]
    fn empty_selection_excludes_all_rows() {
        let ds = dataset();
        assert!(filtered_indices(&ds, &only("region", &[])).is_empty());
    }

    #[test]
    fn missing_cell_needs_null_selected() {
        let mut rows = vec![region("EU")];
        rows.push(Row::new()); // row without the region column
        let ds = Dataset::from_rows(rows);

        assert_eq!(filtered_indices(&ds, &only("region", &["EU"])), vec![0]);

        let mut filters = only("region", &["EU"]);
        filters
            .get_mut("region")
            .unwrap()
            .insert(CellValue::Null);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1]);
    }
}
