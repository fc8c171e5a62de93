mod app;
mod chart;
mod color;
mod config;
mod data;
mod tab;
mod ui;

use anyhow::{anyhow, Context, Result};
use eframe::egui;

use app::DashboardApp;
use config::Deployment;
use tab::line::LineTab;
use tab::InteractiveTab;

fn main() -> Result<()> {
    env_logger::init();

    let mut deployment = Deployment::demo();
    if let Some(path) = std::env::args().nth(1) {
        deployment.data_path = path.into();
    }

    let dataset = data::loader::load_file(&deployment.data_path)
        .with_context(|| format!("loading {}", deployment.data_path.display()))?;
    log::info!(
        "Loaded {} rows with columns {:?}",
        dataset.len(),
        dataset.column_names
    );

    let line_tab = LineTab::new(
        dataset,
        deployment.x_axis,
        deployment.segments,
        deployment.metrics,
    )
    .context("initializing line tab")?;

    let tabs: Vec<Box<dyn InteractiveTab>> = vec![Box::new(line_tab)];

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Segboard – Segment Metrics",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(tabs)))),
    )
    .map_err(|e| anyhow!("eframe error: {e}"))
}
