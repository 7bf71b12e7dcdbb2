use serde::{Deserialize, Serialize, Serializer};

use crate::geo::GeoPoint;

// ---------------------------------------------------------------------------
// Surface – one land or building line attached to a parcel
// ---------------------------------------------------------------------------

/// A typed surface: `[code, area]` on disk.
///
/// For buildings the code is `code_type_local`, for lands it is
/// `code_nature_culture`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Surface {
    pub code: String,
    pub area: f64,
}

// ---------------------------------------------------------------------------
// Parcel – a geolocated plot owned by one mutation
// ---------------------------------------------------------------------------

/// A land parcel. On disk: `[id, latitude, longitude, buildings, lands]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parcel {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub buildings: Vec<Surface>,
    #[serde(default)]
    pub lands: Vec<Surface>,
}

impl Parcel {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Mutation – one recorded sale
// ---------------------------------------------------------------------------

/// A real-estate transaction.
///
/// The field order is the positional layout of a `mutations.json` record:
/// `[id, date, price, land_area, building_area, parcels]`. Serde also
/// accepts the same record as an object keyed by field name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Mutation {
    /// Opaque identifier, display only.
    pub id: String,
    /// ISO-8601 date kept as text.
    pub date: String,
    pub price: f64,
    /// Total land surface (m²).
    pub land_area: f64,
    /// Total built floor surface (m²).
    pub building_area: f64,
    /// At least one in well-formed data; an empty list never matches a query.
    #[serde(default)]
    pub parcels: Vec<Parcel>,
}

impl Mutation {
    /// Geographic positions of all parcels, in order.
    pub fn points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.parcels.iter().map(Parcel::point)
    }
}

// ---------------------------------------------------------------------------
// Positional records
// ---------------------------------------------------------------------------

// Written as arrays, the layout `mutations.json` ships with. Reading accepts
// both arrays and objects through the derived `Deserialize`.

impl Serialize for Surface {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.code, self.area).serialize(serializer)
    }
}

impl Serialize for Parcel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            &self.id,
            self.latitude,
            self.longitude,
            &self.buildings,
            &self.lands,
        )
            .serialize(serializer)
    }
}

impl Serialize for Mutation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            &self.id,
            &self.date,
            self.price,
            self.land_area,
            self.building_area,
            &self.parcels,
        )
            .serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// MutationSet – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full dataset. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MutationSet {
    mutations: Vec<Mutation>,
}

impl MutationSet {
    pub fn new(mutations: Vec<Mutation>) -> Self {
        Self { mutations }
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Number of mutations.
    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Total number of parcels across all mutations.
    pub fn parcel_count(&self) -> usize {
        self.mutations.iter().map(|m| m.parcels.len()).sum()
    }
}
