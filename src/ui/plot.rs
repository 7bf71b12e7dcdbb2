use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use dvf_radius::geo::{circle_outline, GeoPoint};
use dvf_radius::stats::price_per_area;

use crate::state::AppState;

/// Latitude used for the map aspect before any search (mainland France).
const DEFAULT_LATITUDE: f64 = 46.5;
const CIRCLE_SEGMENTS: usize = 96;

// ---------------------------------------------------------------------------
// Parcel map (central panel)
// ---------------------------------------------------------------------------

/// Render every parcel in lon/lat space; a click starts a search there.
pub fn parcel_map(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a mutations file to start  (File → Open…)");
        });
        return;
    }

    // Equirectangular view: stretch longitude so distances look right.
    let latitude = state
        .session
        .query
        .map(|q| q.center.latitude)
        .unwrap_or(DEFAULT_LATITUDE);
    let aspect = (1.0 / latitude.to_radians().cos()) as f32;

    let ramp = state.price_ramp();

    let clicked = Plot::new("parcel_map")
        .data_aspect(aspect)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let all: PlotPoints = state
                .dataset
                .mutations()
                .iter()
                .flat_map(|m| m.points())
                .map(|p| [p.longitude, p.latitude])
                .collect();
            plot_ui.points(
                Points::new(all)
                    .name("Parcels")
                    .color(Color32::from_gray(140))
                    .radius(1.5),
            );

            // Parcels of matching mutations, coloured by price per m².
            for m in state.visible() {
                let color = ramp
                    .map(|r| r.color_for(price_per_area(m)))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let points: PlotPoints = m.points().map(|p| [p.longitude, p.latitude]).collect();
                plot_ui.points(Points::new(points).color(color).radius(4.0));
            }

            if let Some(query) = &state.session.query {
                let outline: PlotPoints = circle_outline(query.center, query.radius(), CIRCLE_SEGMENTS)
                    .into_iter()
                    .map(|p| [p.longitude, p.latitude])
                    .collect();
                plot_ui.line(
                    Line::new(outline)
                        .name("Search radius")
                        .color(Color32::from_rgb(220, 60, 60))
                        .width(1.5),
                );
            }

            if plot_ui.response().clicked() {
                plot_ui.pointer_coordinate()
            } else {
                None
            }
        })
        .inner;

    if let Some(pos) = clicked {
        state.select(GeoPoint::new(pos.y, pos.x));
    }
}
