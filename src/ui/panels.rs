use eframe::egui::{self, Color32, RichText, Ui};

use dvf_radius::data::loader;
use dvf_radius::stats::truncate;

use super::{format_optional, format_thousands};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – inputs and results
// ---------------------------------------------------------------------------

/// Render the left panel: radius, statistics, model and prediction.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Search");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Radius (m)");
        ui.add(egui::TextEdit::singleline(&mut state.radius_text).desired_width(90.0));
    });
    if state.session.query.is_some() && ui.small_button("Clear").clicked() {
        state.clear();
    }
    if state.dataset.is_empty() {
        ui.label("No dataset loaded.");
    } else {
        ui.label("Click on the map to search.");
    }

    ui.add_space(8.0);
    ui.heading("Price per m²");
    ui.separator();

    let summary = state.session.summary;
    egui::Grid::new("summary_grid")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Count");
            ui.label(format_thousands(summary.count as i64));
            ui.end_row();
            ui.label("Average");
            ui.label(format_optional(summary.average));
            ui.end_row();
            ui.label("Median");
            ui.label(format_optional(summary.median));
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.heading("Estimate");
    ui.separator();

    match &state.session.model {
        Some(model) => {
            egui::Grid::new("model_grid")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Intercept");
                    ui.label(format!("{:.2}", model.intercept));
                    ui.end_row();
                    ui.label("× building m²");
                    ui.label(format!("{:.2}", model.building_coefficient));
                    ui.end_row();
                    ui.label("× land m²");
                    ui.label(format!("{:.2}", model.land_coefficient));
                    ui.end_row();
                });
        }
        None => {
            ui.label(RichText::new("No model for this selection.").weak());
        }
    }

    ui.add_space(4.0);
    egui::Grid::new("prediction_inputs")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Land (m²)");
            ui.add(egui::TextEdit::singleline(&mut state.land_text).desired_width(90.0));
            ui.end_row();
            ui.label("Building (m²)");
            ui.add(egui::TextEdit::singleline(&mut state.building_text).desired_width(90.0));
            ui.end_row();
        });

    let predicted = state.prediction().map(truncate);
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Predicted price");
        ui.label(format_optional(predicted));
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.dataset.is_empty() {
            let source = state
                .source
                .as_deref()
                .and_then(|p| p.file_name())
                .map(|n| format!(" from {}", n.to_string_lossy()))
                .unwrap_or_default();
            ui.label(format!(
                "{} mutations loaded{source}, {} in range",
                state.dataset.len(),
                state.session.visible.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open mutations")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("Mutations JSON", &["json"])
        .add_filter("DVF CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} mutations ({} parcels) from {}",
                    dataset.len(),
                    dataset.parcel_count(),
                    path.display()
                );
                state.status_message = None;
                state.set_dataset(dataset, Some(path));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
