use eframe::egui;

use dataset_viewer::config::ViewerConfig;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DatasetViewerApp {
    pub state: AppState,
}

impl DatasetViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for DatasetViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("navigation_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected section ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &mut self.state);
        });
    }
}
