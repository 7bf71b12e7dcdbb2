use crate::geo::{geodesic_distance, GeoPoint};

use super::model::Mutation;

// ---------------------------------------------------------------------------
// Query: a center and a radius in meters
// ---------------------------------------------------------------------------

/// One radius search. Created per interaction, never stored beyond it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub center: GeoPoint,
    radius: f64,
}

impl Query {
    /// Returns `None` for a negative or non-finite radius.
    pub fn new(center: GeoPoint, radius: f64) -> Option<Self> {
        (radius.is_finite() && radius >= 0.0).then_some(Self { center, radius })
    }

    /// Radius in meters, always `>= 0`.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether at least one parcel of `mutation` lies within the radius.
    ///
    /// Stops at the first matching parcel. A mutation without parcels never
    /// matches.
    pub fn matches(&self, mutation: &Mutation) -> bool {
        mutation
            .points()
            .any(|p| geodesic_distance(self.center, p) <= self.radius)
    }
}

// ---------------------------------------------------------------------------
// Text-field parsing
// ---------------------------------------------------------------------------

/// Parse a real number typed by the user. Empty, garbage and non-finite
/// input all give `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse a radius field: a finite, non-negative number of meters.
pub fn parse_radius(text: &str) -> Option<f64> {
    parse_number(text).filter(|r| *r >= 0.0)
}

/// Parse an area field for prediction.
pub fn parse_area(text: &str) -> Option<f64> {
    parse_number(text)
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of mutations with a parcel inside the query circle.
///
/// Indices are ascending, so the input order is preserved and each mutation
/// appears at most once.
pub fn filtered_indices(mutations: &[Mutation], query: &Query) -> Vec<usize> {
    mutations
        .iter()
        .enumerate()
        .filter(|(_, m)| query.matches(m))
        .map(|(i, _)| i)
        .collect()
}

/// Same as [`filtered_indices`] but borrowing the matching mutations.
pub fn filter<'a>(mutations: &'a [Mutation], query: &Query) -> Vec<&'a Mutation> {
    mutations.iter().filter(|m| query.matches(m)).collect()
}
