use std::collections::BTreeMap;

use eframe::egui::Ui;

use crate::chart::ChartSource;
use crate::color::ColorMap;
use crate::data::derive::{derive_dataset, DerivedDataset, Selection};
use crate::data::filter::init_filter_state;
use crate::data::model::Dataset;
use crate::ui::{panels, plot};

use super::{InteractiveTab, TabError};

// ---------------------------------------------------------------------------
// LineTab – reactive line chart over segment means
// ---------------------------------------------------------------------------

/// The line-chart tab: plots the mean of a selectable metric against the
/// x-axis column, split into one line per value of a selectable segment
/// column, with a checkbox filter per segment column.
#[derive(Debug)]
pub struct LineTab {
    data: Dataset,
    x_axis: String,
    segments: Vec<String>,
    metrics: Vec<String>,

    /// Current widget state; mutated only by `controls`.
    selection: Selection,

    /// Per segment column, a colour for each value it can take. Built once
    /// so colours survive filter changes.
    colors: BTreeMap<String, ColorMap>,

    /// Live chart backing store; contents replaced by `update`.
    source: ChartSource,
}

impl LineTab {
    /// Build the tab: validate the column configuration, select the first
    /// segment and metric with every filter value active, and publish the
    /// initial derived dataset.
    pub fn new(
        data: Dataset,
        x_axis: impl Into<String>,
        segments: Vec<String>,
        metrics: Vec<String>,
    ) -> Result<Self, TabError> {
        let x_axis = x_axis.into();

        let first_segment = segments.first().ok_or(TabError::NoSegments)?.clone();
        let first_metric = metrics.first().ok_or(TabError::NoMetrics)?.clone();

        for col in segments.iter().chain(metrics.iter()).chain([&x_axis]) {
            if !data.has_column(col) {
                return Err(TabError::UnknownColumn(col.clone()));
            }
        }
        for col in metrics.iter().chain([&x_axis]) {
            if !data.is_numeric_column(col) {
                return Err(TabError::NonNumericColumn(col.clone()));
            }
        }

        let selection = Selection {
            segment: first_segment,
            metric: first_metric,
            filters: init_filter_state(&data, &segments),
        };

        let colors = segments
            .iter()
            .map(|col| {
                // has_column was checked above, so the entry exists
                let values = &data.unique_values[col];
                (col.clone(), ColorMap::new(values))
            })
            .collect();

        let mut tab = LineTab {
            data,
            x_axis,
            segments,
            metrics,
            selection,
            colors,
            source: ChartSource::default(),
        };
        tab.update();
        Ok(tab)
    }

    fn color_map(&self, segment: &str) -> &ColorMap {
        &self.colors[segment]
    }
}

impl InteractiveTab for LineTab {
    fn title(&self) -> &str {
        "Segment metrics"
    }

    fn controls(&mut self, ui: &mut Ui) -> bool {
        let mut changed = panels::selection_controls(
            ui,
            &mut self.selection,
            &self.segments,
            &self.metrics,
        );
        changed |= panels::filter_controls(
            ui,
            &mut self.selection.filters,
            &self.data.unique_values,
            &self.colors,
        );
        changed
    }

    fn make_dataset(&self, selection: &Selection) -> DerivedDataset {
        derive_dataset(
            &self.data,
            &self.x_axis,
            selection,
            self.color_map(&selection.segment),
        )
    }

    fn make_plot(&self, ui: &mut Ui) {
        plot::line_chart(ui, &self.source, &self.x_axis, &self.selection.metric);
    }

    fn update(&mut self) {
        let derived = self.make_dataset(&self.selection);
        self.source.publish(&derived);
    }

    fn source(&self) -> &ChartSource {
        &self.source
    }
}
