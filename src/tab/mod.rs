/// Tab layer: the shared tab contract and the concrete line-chart tab.
///
/// Every tab follows the same loop:
/// ```text
///   widgets change → update() → make_dataset() → publish into ChartSource
///                                                      │
///                                  make_plot() ◄───────┘  (every frame)
/// ```
/// The chart source is created once per tab; updates replace its contents,
/// never the container, so the rendered view follows without a rebuild.
pub mod line;

use eframe::egui::Ui;
use thiserror::Error;

use crate::chart::ChartSource;
use crate::data::derive::{DerivedDataset, Selection};

/// Errors raised while constructing a tab from its column configuration.
/// All of these are fatal: no widget is built for a misconfigured tab.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabError {
    #[error("no segment columns configured")]
    NoSegments,
    #[error("no metric columns configured")]
    NoMetrics,
    #[error("column '{0}' not found in dataset")]
    UnknownColumn(String),
    #[error("column '{0}' is not numeric")]
    NonNumericColumn(String),
}

/// The capability set every tab type must provide to be composed into the
/// multi-tab view. Construction stays on the concrete type (it produces the
/// type itself); everything after construction goes through this trait.
pub trait InteractiveTab {
    /// Short label shown in the tab bar.
    fn title(&self) -> &str;

    /// Render this tab's widgets; returns true when any selection changed.
    fn controls(&mut self, ui: &mut Ui) -> bool;

    /// Derive the grouped/averaged table for an arbitrary selection.
    /// Pure with respect to the tab's source data.
    fn make_dataset(&self, selection: &Selection) -> DerivedDataset;

    /// Render the chart from the currently published source.
    fn make_plot(&self, ui: &mut Ui);

    /// Re-read the current widget state, recompute the derived table and
    /// republish it into the chart source. The single mutation point.
    fn update(&mut self);

    /// The live chart source (for export and status display).
    fn source(&self) -> &ChartSource;
}
