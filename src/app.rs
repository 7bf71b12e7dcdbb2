use dvf_radius::config::Settings;
use dvf_radius::data::loader;
use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DvfRadiusApp {
    pub state: AppState,
}

impl DvfRadiusApp {
    /// Build the app, loading the startup dataset if one was given.
    pub fn new(settings: &Settings) -> Self {
        let mut state = AppState::new(settings);
        if let Some(path) = &settings.data_path {
            let dataset = loader::load_or_empty(path);
            if dataset.is_empty() {
                state.status_message = Some(format!("No mutations loaded from {}", path.display()));
            }
            state.set_dataset(dataset, Some(path.clone()));
        }
        Self { state }
    }
}

impl eframe::App for DvfRadiusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: inputs and results ----
        egui::SidePanel::left("query_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: matching mutations ----
        egui::TopBottomPanel::bottom("mutation_table")
            .default_height(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::mutation_table(ui, &self.state);
            });

        // ---- Central panel: parcel map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::parcel_map(ui, &mut self.state);
        });
    }
}
