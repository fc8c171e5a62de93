use eframe::egui;

use crate::tab::InteractiveTab;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// The multi-tab container. Tabs share nothing beyond living in the same
/// window; all reactive state is owned by the tabs themselves.
pub struct DashboardApp {
    tabs: Vec<Box<dyn InteractiveTab>>,
    active: usize,
    status_message: Option<String>,
}

impl DashboardApp {
    pub fn new(tabs: Vec<Box<dyn InteractiveTab>>) -> Self {
        Self {
            tabs,
            active: 0,
            status_message: None,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: tab bar and menus ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.tabs, &mut self.active, &mut self.status_message);
        });

        let tab = &mut self.tabs[self.active];

        // ---- Left side panel: selection and filter widgets ----
        let mut changed = false;
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                changed = tab.controls(ui);
            });

        // Widget change → recompute and republish before drawing the chart.
        if changed {
            tab.update();
        }

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            tab.make_plot(ui);
        });
    }
}
