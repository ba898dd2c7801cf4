use std::path::Path;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText};

use crate::data::loader::LoadError;
use crate::data::model::VolcanoDataset;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub enum VolcanoExplorerApp {
    Ready(Box<AppState>),
    /// The dataset could not be loaded; only the message is shown.
    LoadFailed { message: String },
}

impl VolcanoExplorerApp {
    pub fn ready(dataset: Arc<VolcanoDataset>) -> Self {
        VolcanoExplorerApp::Ready(Box::new(AppState::new(dataset)))
    }

    pub fn load_failed(path: &Path, err: &LoadError) -> Self {
        VolcanoExplorerApp::LoadFailed {
            message: format!("Error loading data from {}: {err}", path.display()),
        }
    }
}

impl eframe::App for VolcanoExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match self {
            VolcanoExplorerApp::Ready(state) => state.as_mut(),
            VolcanoExplorerApp::LoadFailed { message } => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Interactive Volcano Explorer");
                    ui.label(RichText::new(message.as_str()).color(Color32::RED));
                });
                return;
            }
        };

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, state);
            });

        // ---- Central panel: summary, charts, map, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, state);
        });
    }
}
