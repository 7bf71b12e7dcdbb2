use crate::config::PredictorLayout;
use crate::data::filter::{filtered_indices, parse_area, Query};
use crate::data::model::Mutation;
use crate::geo::GeoPoint;
use crate::regression::{self, RegressionModel};
use crate::stats::Summary;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Something the user did that changes the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryEvent {
    /// Search around `center`. `radius` comes straight from the text field
    /// and may be invalid.
    Select { center: GeoPoint, radius: f64 },
    /// Forget the current search.
    Clear,
}

// ---------------------------------------------------------------------------
// Session: the result of the last query
// ---------------------------------------------------------------------------

/// Everything derived from the most recent query.
///
/// A session is replaced wholesale by [`handle_query`]; the model it holds
/// was fit on exactly its `visible` mutations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Predictor assignment used for every fit of this session.
    pub layout: PredictorLayout,
    pub query: Option<Query>,
    /// Indices of matching mutations, ascending.
    pub visible: Vec<usize>,
    pub summary: Summary,
    pub model: Option<RegressionModel>,
}

impl Session {
    pub fn new(layout: PredictorLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// The matching mutations, in input order.
    pub fn visible_mutations<'a>(
        &'a self,
        mutations: &'a [Mutation],
    ) -> impl Iterator<Item = &'a Mutation> + 'a {
        self.visible.iter().filter_map(|&i| mutations.get(i))
    }

    /// Predict a price from the raw contents of the area fields.
    ///
    /// `None` when there is no model or either field is not a number.
    pub fn prediction(&self, land_text: &str, building_text: &str) -> Option<f64> {
        let land = parse_area(land_text)?;
        let building = parse_area(building_text)?;
        // Route the inputs through the same columns the model was fit on.
        let (building_col, land_col) = self.layout.assign(land, building);
        regression::predict(self.model.as_ref(), land_col, building_col)
    }
}

/// Apply one event, producing the next session.
///
/// Filtering, statistics and the fit are all recomputed from `mutations`;
/// nothing but the predictor layout carries over from `session`.
pub fn handle_query(session: &Session, mutations: &[Mutation], event: QueryEvent) -> Session {
    let layout = session.layout;
    let query = match event {
        QueryEvent::Clear => return Session::new(layout),
        QueryEvent::Select { center, radius } => Query::new(center, radius),
    };
    let Some(query) = query else {
        log::debug!("Ignoring query with invalid radius");
        return Session::new(layout);
    };

    let visible = filtered_indices(mutations, &query);
    let matching = || visible.iter().map(move |&i| &mutations[i]);

    let summary = Summary::from_mutations(matching());
    let model = match regression::fit(matching(), layout) {
        Ok(model) => Some(model),
        Err(e) => {
            log::debug!("No regression for this query: {e}");
            None
        }
    };
    log::debug!(
        "Query ({:.5}, {:.5}) r={} m: {} matches",
        query.center.latitude,
        query.center.longitude,
        query.radius(),
        summary.count
    );

    Session {
        layout,
        query: Some(query),
        visible,
        summary,
        model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Parcel;

    fn sale(price: f64, building_area: f64, land_area: f64, at: (f64, f64)) -> Mutation {
        Mutation {
            id: format!("{price}"),
            date: "2023-01-01".into(),
            price,
            land_area,
            building_area,
            parcels: vec![Parcel {
                id: "p".into(),
                latitude: at.0,
                longitude: at.1,
                buildings: vec![],
                lands: vec![],
            }],
        }
    }

    fn town() -> Vec<Mutation> {
        vec![
            sale(210_000.0, 90.0, 400.0, (48.850, 2.350)),
            sale(185_000.0, 75.0, 650.0, (48.851, 2.352)),
            sale(320_000.0, 140.0, 520.0, (48.849, 2.348)),
            sale(260_000.0, 110.0, 900.0, (48.852, 2.351)),
            // far away
            sale(90_000.0, 70.0, 2_000.0, (45.760, 4.840)),
        ]
    }

    fn select(radius: f64) -> QueryEvent {
        QueryEvent::Select {
            center: GeoPoint::new(48.85, 2.35),
            radius,
        }
    }

    #[test]
    fn select_filters_summarises_and_fits() {
        let data = town();
        let s = handle_query(&Session::default(), &data, select(1_000.0));
        assert_eq!(s.visible, vec![0, 1, 2, 3]);
        assert_eq!(s.summary.count, 4);
        assert!(s.model.is_some());
        assert!(s.prediction("500", "100").is_some());
        assert_eq!(s.visible_mutations(&data).count(), 4);
    }

    #[test]
    fn empty_result_drops_previous_model() {
        let data = town();
        let fitted = handle_query(&Session::default(), &data, select(1_000.0));
        assert!(fitted.model.is_some());

        let nowhere = QueryEvent::Select {
            center: GeoPoint::new(0.0, 0.0),
            radius: 10.0,
        };
        let s = handle_query(&fitted, &data, nowhere);
        assert!(s.visible.is_empty());
        assert_eq!(s.summary.average, None);
        assert_eq!(s.model, None);
        assert_eq!(s.prediction("500", "100"), None);
    }

    #[test]
    fn invalid_radius_gives_no_result() {
        let data = town();
        let fitted = handle_query(&Session::default(), &data, select(1_000.0));
        let s = handle_query(&fitted, &data, select(f64::NAN));
        assert_eq!(s.query, None);
        assert!(s.visible.is_empty());
        assert_eq!(s.model, None);
    }

    #[test]
    fn clear_resets_but_keeps_layout() {
        let data = town();
        let start = Session::new(PredictorLayout::Swapped);
        let fitted = handle_query(&start, &data, select(1_000.0));
        let s = handle_query(&fitted, &data, QueryEvent::Clear);
        assert_eq!(s, Session::new(PredictorLayout::Swapped));
    }

    #[test]
    fn tiny_building_areas_do_not_panic() {
        let data = vec![
            sale(250_000.0, 1e-15, 400.0, (48.85, 2.35)),
            sale(300_000.0, 1e-15, 500.0, (48.85, 2.35)),
        ];
        let s = handle_query(&Session::default(), &data, select(100.0));
        assert_eq!(s.summary.count, 2);
        assert_eq!(s.model, None);
    }

    #[test]
    fn unparsed_area_fields_give_no_prediction() {
        let data = town();
        let s = handle_query(&Session::default(), &data, select(1_000.0));
        assert_eq!(s.prediction("", "100"), None);
        assert_eq!(s.prediction("500", "abc"), None);
    }

    #[test]
    fn layouts_agree_on_predictions() {
        let data = town();
        let standard = handle_query(&Session::new(PredictorLayout::Standard), &data, select(1_000.0));
        let swapped = handle_query(&Session::new(PredictorLayout::Swapped), &data, select(1_000.0));
        let a = standard.prediction("600", "95").unwrap();
        let b = swapped.prediction("600", "95").unwrap();
        approx::assert_relative_eq!(a, b, max_relative = 1e-6);
    }
}
