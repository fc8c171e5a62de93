use std::io::Write;

use anyhow::{Context, Result};
use eframe::egui::Color32;
use serde::Serialize;

use crate::data::derive::DerivedDataset;

// ---------------------------------------------------------------------------
// ChartSource – column-oriented backing store of the live chart
// ---------------------------------------------------------------------------

/// The data container the chart reads from, column-oriented like the rows it
/// mirrors. It is created once per tab and lives for the whole session: a
/// selection change replaces the column contents, never the container.
/// Columns always have equal length.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChartSource {
    pub x: Vec<f64>,
    pub metric: Vec<f64>,
    pub name: Vec<String>,
    pub color: Vec<Color32>,
}

/// One plotted line: a maximal run of consecutive rows sharing a name.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<'a> {
    pub name: &'a str,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

#[derive(Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    x: f64,
    metric: f64,
}

impl ChartSource {
    /// Replace the contents column by column from a freshly derived table.
    /// The container itself is kept; only its columns change.
    pub fn publish(&mut self, derived: &DerivedDataset) {
        self.x.clear();
        self.metric.clear();
        self.name.clear();
        self.color.clear();
        for row in &derived.rows {
            self.x.push(row.x);
            self.metric.push(row.metric);
            self.name.push(row.name.clone());
            self.color.push(row.color);
        }
    }

    /// Number of published rows.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether nothing is published (e.g. filters excluded every row).
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Split the published rows into one series per segment value. Rows are
    /// published sorted by (name, x), so consecutive runs are exactly the
    /// segment groups.
    pub fn series(&self) -> Vec<Series<'_>> {
        let mut series: Vec<Series<'_>> = Vec::new();
        for i in 0..self.len() {
            match series.last_mut() {
                Some(last) if last.name == self.name[i] => {
                    last.points.push([self.x[i], self.metric[i]]);
                }
                _ => series.push(Series {
                    name: &self.name[i],
                    color: self.color[i],
                    points: vec![[self.x[i], self.metric[i]]],
                }),
            }
        }
        series
    }

    /// Write the published rows as CSV (`name,x,metric`), for export.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        for i in 0..self.len() {
            out.serialize(ExportRow {
                name: &self.name[i],
                x: self.x[i],
                metric: self.metric[i],
            })
            .context("writing CSV record")?;
        }
        out.flush().context("flushing CSV writer")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derive::DerivedRow;

    fn derived(rows: &[(&str, f64, f64)]) -> DerivedDataset {
        DerivedDataset {
            rows: rows
                .iter()
                .map(|&(name, x, metric)| DerivedRow {
                    x,
                    metric,
                    name: name.to_string(),
                    color: Color32::WHITE,
                })
                .collect(),
        }
    }

    #[test]
    fn publish_replaces_previous_contents() {
        let mut source = ChartSource::default();
        source.publish(&derived(&[("A", 1.0, 10.0), ("A", 2.0, 20.0)]));
        assert_eq!(source.len(), 2);

        source.publish(&derived(&[("B", 1.0, 5.0)]));
        assert_eq!(source.len(), 1);
        assert_eq!(source.name, vec!["B"]);
        assert_eq!(source.x, vec![1.0]);
        assert_eq!(source.metric, vec![5.0]);
    }

    #[test]
    fn publish_empty_clears_the_source() {
        let mut source = ChartSource::default();
        source.publish(&derived(&[("A", 1.0, 10.0)]));
        source.publish(&DerivedDataset::default());
        assert!(source.is_empty());
    }

    #[test]
    fn series_groups_consecutive_names() {
        let mut source = ChartSource::default();
        source.publish(&derived(&[
            ("A", 1.0, 10.0),
            ("A", 2.0, 30.0),
            ("B", 1.0, 20.0),
        ]));
        let series = source.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "A");
        assert_eq!(series[0].points, vec![[1.0, 10.0], [2.0, 30.0]]);
        assert_eq!(series[1].name, "B");
        assert_eq!(series[1].points, vec![[1.0, 20.0]]);
    }

    #[test]
    fn csv_export_writes_one_line_per_row() {
        let mut source = ChartSource::default();
        source.publish(&derived(&[("A", 1.0, 10.0), ("B", 2.0, 20.0)]));

        let mut buf = Vec::new();
        source.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "name,x,metric\nA,1.0,10.0\nB,2.0,20.0\n");
    }
}
