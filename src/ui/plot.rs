use eframe::egui::Ui;
use egui_plot::{Line, Plot, PlotPoints};

use crate::chart::ChartSource;

// ---------------------------------------------------------------------------
// Segment-metrics line chart (central panel)
// ---------------------------------------------------------------------------

/// Render the line chart from the published chart source: one line per
/// segment value. An empty source renders an empty chart, not an error.
pub fn line_chart(ui: &mut Ui, source: &ChartSource, x_label: &str, metric_label: &str) {
    Plot::new("segment_metrics_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(metric_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in source.series() {
                let points: PlotPoints = series.points.iter().copied().collect();
                let line = Line::new(points)
                    .name(series.name)
                    .color(series.color)
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}
