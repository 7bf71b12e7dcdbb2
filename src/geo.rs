use ::geo::{HaversineDestination, HaversineDistance, Point};

// ---------------------------------------------------------------------------
// GeoPoint – a position in unprojected degrees
// ---------------------------------------------------------------------------

/// A point on the WGS84 geographic grid, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn to_point(self) -> Point<f64> {
        // geo uses (x, y) = (lon, lat)
        Point::new(self.longitude, self.latitude)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(p: Point<f64>) -> Self {
        GeoPoint::new(p.y(), p.x())
    }
}

// ---------------------------------------------------------------------------
// Distances
// ---------------------------------------------------------------------------

/// Great-circle distance in meters (haversine on the mean Earth radius,
/// 6 371 008.8 m).
///
/// Out-of-range coordinates are not rejected; whatever the formula returns
/// is passed through.
pub fn geodesic_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    a.to_point().haversine_distance(&b.to_point())
}

/// Points on the circle of `radius` meters around `center`, closed (the
/// first point is repeated at the end). Used to draw the query area.
pub fn circle_outline(center: GeoPoint, radius: f64, segments: usize) -> Vec<GeoPoint> {
    let segments = segments.max(3);
    let origin = center.to_point();
    (0..=segments)
        .map(|i| {
            let bearing = 360.0 * i as f64 / segments as f64;
            origin.haversine_destination(bearing, radius).into()
        })
        .collect()
}
