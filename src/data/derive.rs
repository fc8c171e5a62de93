use std::collections::BTreeMap;

use eframe::egui::Color32;

use crate::color::ColorMap;
use super::filter::{filtered_indices, FilterState};
use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Selection – the full widget state driving one derivation
// ---------------------------------------------------------------------------

/// Everything the widgets currently say: which segment column splits the
/// data, which metric is averaged, and which values each segment filter
/// lets through. Passed explicitly so derivation stays a pure function.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub segment: String,
    pub metric: String,
    pub filters: FilterState,
}

// ---------------------------------------------------------------------------
// DerivedDataset – the grouped / averaged table behind the chart
// ---------------------------------------------------------------------------

/// One plotted point: the mean of the metric over all filtered rows sharing
/// this (segment value, x value) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub x: f64,
    pub metric: f64,
    pub name: String,
    pub color: Color32,
}

/// The table the chart actually renders, fully recomputed on every
/// selection change. Rows are sorted by (segment value, x value).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedDataset {
    pub rows: Vec<DerivedRow>,
}

/// An `f64` with the total order, so x values can key a `BTreeMap`.
/// Grouping on the numeric value (not the cell) makes `Integer(2)` and
/// `Float(2.0)` the same x bucket, the way a single-dtype column behaves.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrderedF64(f64);

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedF64 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Filter, group and average the source table for one selection.
///
/// Rows surviving the filters are grouped by the selected segment column's
/// value and, within each group, by numeric x-axis value; the selected
/// metric is arithmetically averaged per group. Filtering everything away
/// yields an empty derived dataset, never an error. Rows whose segment, x
/// or metric cell is missing or non-numeric (where a number is needed) are
/// skipped.
pub fn derive_dataset(
    dataset: &Dataset,
    x_axis: &str,
    selection: &Selection,
    colors: &ColorMap,
) -> DerivedDataset {
    // (segment value, x value) → (metric sum, count). BTreeMap keys give the
    // (name, x) sort order for free.
    let mut groups: BTreeMap<(CellValue, OrderedF64), (f64, usize)> = BTreeMap::new();

    for idx in filtered_indices(dataset, &selection.filters) {
        let row = &dataset.rows[idx];
        let Some(seg_val) = row.get(&selection.segment) else {
            continue;
        };
        let Some(x) = row.get(x_axis).and_then(CellValue::as_f64) else {
            continue;
        };
        let Some(metric) = row.get(&selection.metric).and_then(CellValue::as_f64) else {
            continue;
        };

        let entry = groups
            .entry((seg_val.clone(), OrderedF64(x)))
            .or_insert((0.0, 0));
        entry.0 += metric;
        entry.1 += 1;
    }

    let rows = groups
        .into_iter()
        .map(|((seg_val, x), (sum, count))| DerivedRow {
            x: x.0,
            metric: sum / count as f64,
            name: seg_val.to_string(),
            color: colors.color_for(&seg_val),
        })
        .collect();

    DerivedDataset { rows }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::model::Row;

    fn row(x: i64, seg: &str, m: f64) -> Row {
        Row::from([
            ("x".to_string(), CellValue::Integer(x)),
            ("seg".to_string(), CellValue::String(seg.to_string())),
            ("m".to_string(), CellValue::Float(m)),
        ])
    }

    fn four_row_dataset() -> Dataset {
        Dataset::from_rows(vec![
            row(1, "A", 10.0),
            row(1, "B", 20.0),
            row(2, "A", 30.0),
            row(2, "B", 40.0),
        ])
    }

    fn selection(filter_values: &[&str]) -> Selection {
        let set: BTreeSet<CellValue> = filter_values
            .iter()
            .map(|v| CellValue::String(v.to_string()))
            .collect();
        Selection {
            segment: "seg".to_string(),
            metric: "m".to_string(),
            filters: FilterState::from([("seg".to_string(), set)]),
        }
    }

    fn seg_colors(dataset: &Dataset) -> ColorMap {
        ColorMap::new(&dataset.unique_values["seg"])
    }

    #[test]
    fn no_filtering_yields_one_row_per_segment_and_x() {
        let ds = four_row_dataset();
        let derived = derive_dataset(&ds, "x", &selection(&["A", "B"]), &seg_colors(&ds));

        let flat: Vec<(f64, &str, f64)> = derived
            .rows
            .iter()
            .map(|r| (r.x, r.name.as_str(), r.metric))
            .collect();
        assert_eq!(
            flat,
            vec![
                (1.0, "A", 10.0),
                (2.0, "A", 30.0),
                (1.0, "B", 20.0),
                (2.0, "B", 40.0),
            ]
        );
    }

    #[test]
    fn filtering_to_one_segment_drops_the_other() {
        let ds = four_row_dataset();
        let derived = derive_dataset(&ds, "x", &selection(&["A"]), &seg_colors(&ds));
        assert_eq!(derived.rows.len(), 2);
        assert!(derived.rows.iter().all(|r| r.name == "A"));
    }

    #[test]
    fn empty_filter_set_yields_empty_derived_dataset() {
        let ds = four_row_dataset();
        let derived = derive_dataset(&ds, "x", &selection(&[]), &seg_colors(&ds));
        assert!(derived.rows.is_empty());
    }

    #[test]
    fn groups_average_the_metric() {
        // 6 rows, 2 segment values, 2 x buckets; hand-computed means.
        let ds = Dataset::from_rows(vec![
            row(1, "A", 10.0),
            row(1, "A", 20.0),
            row(2, "A", 30.0),
            row(1, "B", 5.0),
            row(2, "B", 7.0),
            row(2, "B", 9.0),
        ]);
        let derived = derive_dataset(&ds, "x", &selection(&["A", "B"]), &seg_colors(&ds));

        let flat: Vec<(f64, &str, f64)> = derived
            .rows
            .iter()
            .map(|r| (r.x, r.name.as_str(), r.metric))
            .collect();
        assert_eq!(
            flat,
            vec![
                (1.0, "A", 15.0),
                (2.0, "A", 30.0),
                (1.0, "B", 5.0),
                (2.0, "B", 8.0),
            ]
        );
    }

    #[test]
    fn mixed_integer_and_float_x_cells_sort_by_numeric_value() {
        // Type-guessed CSV columns can mix Integer and Float cells; ordering
        // must follow the number, not the cell type.
        let ds = Dataset::from_rows(vec![
            Row::from([
                ("x".to_string(), CellValue::Integer(3)),
                ("seg".to_string(), CellValue::String("A".to_string())),
                ("m".to_string(), CellValue::Float(30.0)),
            ]),
            Row::from([
                ("x".to_string(), CellValue::Float(1.5)),
                ("seg".to_string(), CellValue::String("A".to_string())),
                ("m".to_string(), CellValue::Float(15.0)),
            ]),
        ]);
        let derived = derive_dataset(&ds, "x", &selection(&["A"]), &seg_colors(&ds));
        let xs: Vec<f64> = derived.rows.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![1.5, 3.0]);
    }

    #[test]
    fn integer_and_float_cells_with_equal_value_share_one_x_bucket() {
        let ds = Dataset::from_rows(vec![
            Row::from([
                ("x".to_string(), CellValue::Integer(2)),
                ("seg".to_string(), CellValue::String("A".to_string())),
                ("m".to_string(), CellValue::Float(10.0)),
            ]),
            Row::from([
                ("x".to_string(), CellValue::Float(2.0)),
                ("seg".to_string(), CellValue::String("A".to_string())),
                ("m".to_string(), CellValue::Float(20.0)),
            ]),
        ]);
        let derived = derive_dataset(&ds, "x", &selection(&["A"]), &seg_colors(&ds));
        assert_eq!(derived.rows.len(), 1);
        assert_eq!(derived.rows[0].x, 2.0);
        assert_eq!(derived.rows[0].metric, 15.0);
    }

    #[test]
    fn derivation_is_pure() {
        let ds = four_row_dataset();
        let sel = selection(&["A", "B"]);
        let colors = seg_colors(&ds);
        let first = derive_dataset(&ds, "x", &sel, &colors);
        let second = derive_dataset(&ds, "x", &sel, &colors);
        assert_eq!(first, second);
    }

    #[test]
    fn rows_are_sorted_by_name_then_x() {
        // Insertion order deliberately scrambled.
        let ds = Dataset::from_rows(vec![
            row(2, "B", 1.0),
            row(1, "B", 1.0),
            row(2, "A", 1.0),
            row(1, "A", 1.0),
        ]);
        let derived = derive_dataset(&ds, "x", &selection(&["A", "B"]), &seg_colors(&ds));
        let keys: Vec<(&str, f64)> = derived
            .rows
            .iter()
            .map(|r| (r.name.as_str(), r.x))
            .collect();
        assert_eq!(keys, vec![("A", 1.0), ("A", 2.0), ("B", 1.0), ("B", 2.0)]);
    }
}
