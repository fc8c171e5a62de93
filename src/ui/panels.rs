use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ColorMap;
use crate::data::derive::Selection;
use crate::data::filter::FilterState;
use crate::data::model::CellValue;
use crate::tab::InteractiveTab;

// ---------------------------------------------------------------------------
// Left side panel – selection and filter widgets
// ---------------------------------------------------------------------------

/// Render the segment and metric selectors. Returns true when either
/// selection changed this frame.
pub fn selection_controls(
    ui: &mut Ui,
    selection: &mut Selection,
    segments: &[String],
    metrics: &[String],
) -> bool {
    let mut changed = false;

    ui.strong("Segment");
    egui::ComboBox::from_id_salt("segment_select")
        .selected_text(selection.segment.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for col in segments {
                if ui
                    .selectable_label(selection.segment == *col, col)
                    .clicked()
                    && selection.segment != *col
                {
                    selection.segment = col.clone();
                    changed = true;
                }
            }
        });
    ui.add_space(4.0);

    ui.strong("Metric");
    egui::ComboBox::from_id_salt("metric_select")
        .selected_text(selection.metric.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for col in metrics {
                if ui
                    .selectable_label(selection.metric == *col, col)
                    .clicked()
                    && selection.metric != *col
                {
                    selection.metric = col.clone();
                    changed = true;
                }
            }
        });
    ui.separator();

    changed
}

/// Render one collapsible checkbox group per segment column. Returns true
/// when any filter set changed this frame.
pub fn filter_controls(
    ui: &mut Ui,
    filters: &mut FilterState,
    unique_values: &BTreeMap<String, BTreeSet<CellValue>>,
    colors: &BTreeMap<String, ColorMap>,
) -> bool {
    let mut changed = false;

    ui.heading("Filters");
    ui.separator();

    let columns: Vec<String> = filters.keys().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in &columns {
                let Some(all_values) = unique_values.get(col) else {
                    continue;
                };
                let Some(selected) = filters.get_mut(col) else {
                    continue;
                };

                // Show count of selected / total in the header
                let n_selected = selected.len();
                let n_total = all_values.len();
                let header_text = format!("{col}  ({n_selected}/{n_total})");

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        // Select all / none buttons
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                *selected = all_values.clone();
                                changed = true;
                            }
                            if ui.small_button("None").clicked() {
                                selected.clear();
                                changed = true;
                            }
                        });

                        for val in all_values {
                            let mut text = RichText::new(val.to_string());
                            if let Some(cm) = colors.get(col) {
                                text = text.color(cm.color_for(val));
                            }

                            let mut checked = selected.contains(val);
                            if ui.checkbox(&mut checked, text).changed() {
                                if checked {
                                    selected.insert(val.clone());
                                } else {
                                    selected.remove(val);
                                }
                                changed = true;
                            }
                        }
                    });
            }
        });

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar: tab selector, export menu, row counts.
pub fn top_bar(
    ui: &mut Ui,
    tabs: &[Box<dyn InteractiveTab>],
    active: &mut usize,
    status_message: &mut Option<String>,
) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export aggregated CSV…").clicked() {
                export_dialog(tabs[*active].as_ref(), status_message);
                ui.close_menu();
            }
        });

        ui.separator();

        for (i, tab) in tabs.iter().enumerate() {
            if ui.selectable_label(*active == i, tab.title()).clicked() {
                *active = i;
            }
        }

        ui.separator();

        ui.label(format!(
            "{} aggregated rows",
            tabs[*active].source().len()
        ));

        if let Some(msg) = status_message {
            ui.label(RichText::new(msg.as_str()).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

fn export_dialog(tab: &dyn InteractiveTab, status_message: &mut Option<String>) {
    let file = rfd::FileDialog::new()
        .set_title("Export aggregated data")
        .set_file_name("aggregated.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export_csv(tab, &path) {
            Ok(n) => {
                log::info!("Exported {n} aggregated rows to {}", path.display());
                *status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                *status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_csv(tab: &dyn InteractiveTab, path: &Path) -> anyhow::Result<usize> {
    use anyhow::Context;

    let file = std::fs::File::create(path).context("creating export file")?;
    let source = tab.source();
    source.write_csv(file)?;
    Ok(source.len())
}
