use std::path::PathBuf;

use dvf_radius::config::Settings;
use dvf_radius::data::filter::parse_radius;
use dvf_radius::data::model::{Mutation, MutationSet};
use dvf_radius::geo::GeoPoint;
use dvf_radius::session::{handle_query, QueryEvent, Session};
use dvf_radius::stats::price_per_area;

use crate::color::PriceRamp;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (empty until a file is loaded).
    pub dataset: MutationSet,

    /// Where `dataset` came from.
    pub source: Option<PathBuf>,

    /// Result of the last map click.
    pub session: Session,

    /// Raw text of the radius field, in meters.
    pub radius_text: String,

    /// Raw text of the prediction fields.
    pub land_text: String,
    pub building_text: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            dataset: MutationSet::default(),
            source: None,
            session: Session::new(settings.predictors),
            radius_text: settings.radius.to_string(),
            land_text: String::new(),
            building_text: String::new(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset. Any previous search is dropped.
    pub fn set_dataset(&mut self, dataset: MutationSet, source: Option<PathBuf>) {
        self.dataset = dataset;
        self.source = source;
        self.apply(QueryEvent::Clear);
    }

    /// Search around `center` with the radius currently typed in.
    pub fn select(&mut self, center: GeoPoint) {
        let radius = parse_radius(&self.radius_text).unwrap_or(f64::NAN);
        self.apply(QueryEvent::Select { center, radius });
    }

    pub fn clear(&mut self) {
        self.apply(QueryEvent::Clear);
    }

    fn apply(&mut self, event: QueryEvent) {
        self.session = handle_query(&self.session, self.dataset.mutations(), event);
    }

    /// Matching mutations of the current search, in input order.
    pub fn visible(&self) -> impl Iterator<Item = &Mutation> + '_ {
        self.session.visible_mutations(self.dataset.mutations())
    }

    /// Predicted price for the area fields, if a model is available.
    pub fn prediction(&self) -> Option<f64> {
        self.session.prediction(&self.land_text, &self.building_text)
    }

    /// Colour ramp over the visible prices per m².
    pub fn price_ramp(&self) -> Option<PriceRamp> {
        PriceRamp::from_values(self.visible().map(price_per_area))
    }
}
