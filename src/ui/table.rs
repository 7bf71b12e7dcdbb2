use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use dvf_radius::data::model::Mutation;
use dvf_radius::stats::{price_per_area, truncate};

use super::format_thousands;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Matching mutations (bottom panel)
// ---------------------------------------------------------------------------

/// Table of the mutations found by the last search.
pub fn mutation_table(ui: &mut Ui, state: &AppState) {
    let rows: Vec<&Mutation> = state.visible().collect();
    if rows.is_empty() {
        ui.label("No mutation in range.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(90.0))
        .columns(Column::remainder().at_least(80.0), 4)
        .header(20.0, |mut header| {
            for title in ["Date", "Price", "Building m²", "Land m²", "Price / m²"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let m = rows[row.index()];
                row.col(|ui| {
                    ui.label(&m.date).on_hover_text(&m.id);
                });
                row.col(|ui| {
                    ui.label(format_thousands(truncate(m.price)));
                });
                row.col(|ui| {
                    ui.label(m.building_area.to_string());
                });
                row.col(|ui| {
                    ui.label(m.land_area.to_string());
                });
                row.col(|ui| {
                    ui.label(format_thousands(price_per_area(m)));
                });
            });
        });
}
