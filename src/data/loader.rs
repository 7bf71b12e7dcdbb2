use std::collections::HashMap;
use std::hash::Hash;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::model::{Mutation, MutationSet, Parcel, Surface};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a mutation dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – prepared `mutations.json`, one record per mutation
/// * `.csv`  – raw geolocated DVF export, grouped into mutations on load
pub fn load_file(path: &Path) -> Result<MutationSet> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Load `path`, falling back to an empty dataset when anything goes wrong.
///
/// Queries against the empty set simply return nothing.
pub fn load_or_empty(path: &Path) -> MutationSet {
    match load_file(path) {
        Ok(set) => {
            log::info!(
                "Loaded {} mutations ({} parcels) from {}",
                set.len(),
                set.parcel_count(),
                path.display()
            );
            set
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            MutationSet::default()
        }
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema, one positional record per mutation:
///
/// ```json
/// [
///   ["2023-123", "2023-03-14", 215000.0, 612.0, 98.0,
///     [["33063000AB0042", 44.84, -0.58, [["1", 98.0]], [["S", 612.0]]]]],
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<MutationSet> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<MutationSet> {
    let mutations: Vec<Mutation> = serde_json::from_str(text).context("parsing mutations JSON")?;
    Ok(MutationSet::new(mutations))
}

// ---------------------------------------------------------------------------
// DVF CSV loader
// ---------------------------------------------------------------------------

/// The columns of a geolocated DVF row that matter here. Other columns are
/// ignored; missing ones read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DvfRow {
    id_mutation: String,
    date_mutation: String,
    valeur_fonciere: String,
    id_parcelle: String,
    latitude: String,
    longitude: String,
    type_local: String,
    code_type_local: String,
    surface_reelle_bati: String,
    nature_culture: String,
    code_nature_culture: String,
    code_nature_culture_speciale: String,
    surface_terrain: String,
}

fn load_csv(path: &Path) -> Result<MutationSet> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

/// Build mutations from a DVF CSV stream.
///
/// Only sales of a house with land are kept. Rows are grouped by
/// `id_mutation` in order of first appearance.
pub fn parse_csv<R: Read>(input: R) -> Result<MutationSet> {
    let mut reader = csv::Reader::from_reader(input);

    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<DvfRow>> = HashMap::new();
    let mut row_count = 0usize;

    for (row_no, result) in reader.deserialize::<DvfRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        row_count += 1;
        groups
            .entry(row.id_mutation.clone())
            .or_insert_with(|| {
                order.push(row.id_mutation.clone());
                Vec::new()
            })
            .push(row);
    }
    log::debug!("Found {row_count} rows in {} mutations", order.len());

    let mut mutations = Vec::new();
    for id in &order {
        let Some(rows) = groups.remove(id) else {
            continue;
        };
        if let Some(m) = build_mutation(&rows).with_context(|| format!("mutation {id}"))? {
            mutations.push(m);
        }
    }
    log::debug!("Kept {} house-with-land mutations", mutations.len());

    Ok(MutationSet::new(mutations))
}

/// Turn the rows of one mutation into a [`Mutation`], or `None` when it is
/// not a priced, geolocated sale with both land and a house.
fn build_mutation(rows: &[DvfRow]) -> Result<Option<Mutation>> {
    let Some(first) = rows.first() else {
        return Ok(None);
    };

    let has_land = rows.iter().any(|r| !r.surface_terrain.is_empty());
    let has_house = rows.iter().any(|r| r.type_local == "Maison");
    if !(has_land && has_house) {
        return Ok(None);
    }
    if first.valeur_fonciere.is_empty() {
        return Ok(None);
    }
    if rows
        .iter()
        .any(|r| r.latitude.is_empty() || r.longitude.is_empty())
    {
        return Ok(None);
    }

    // Parcels in order of first appearance; later rows refresh coordinates.
    let mut parcels: Vec<Parcel> = Vec::new();
    let mut parcel_index: HashMap<&str, usize> = HashMap::new();
    for r in rows {
        let latitude = parse_f64(&r.latitude, "latitude")?;
        let longitude = parse_f64(&r.longitude, "longitude")?;
        match parcel_index.get(r.id_parcelle.as_str()) {
            Some(&i) => {
                parcels[i].latitude = latitude;
                parcels[i].longitude = longitude;
            }
            None => {
                parcel_index.insert(&r.id_parcelle, parcels.len());
                parcels.push(Parcel {
                    id: r.id_parcelle.clone(),
                    latitude,
                    longitude,
                    buildings: Vec::new(),
                    lands: Vec::new(),
                });
            }
        }
    }

    let mut land_rows = Vec::new();
    for r in rows
        .iter()
        .filter(|r| !r.nature_culture.is_empty() && !r.surface_terrain.is_empty())
    {
        let area = parse_f64(&r.surface_terrain, "surface_terrain")?;
        let key = (
            r.code_nature_culture.as_str(),
            r.code_nature_culture_speciale.as_str(),
            area.to_bits(),
        );
        land_rows.push((key, r, area));
    }
    let lands = unique_last(land_rows);
    if lands.is_empty() {
        return Ok(None);
    }

    let mut building_rows = Vec::new();
    for r in rows
        .iter()
        .filter(|r| !r.type_local.is_empty() && !r.surface_reelle_bati.is_empty())
    {
        let area = parse_f64(&r.surface_reelle_bati, "surface_reelle_bati")?;
        let key = (r.code_type_local.as_str(), area.to_bits());
        building_rows.push((key, r, area));
    }
    let buildings = unique_last(building_rows);
    if buildings.is_empty() {
        return Ok(None);
    }

    let land_area: f64 = lands.iter().map(|(_, a)| a).sum();
    let building_area: f64 = buildings.iter().map(|(_, a)| a).sum();

    for (r, area) in &lands {
        let i = *parcel_index
            .get(r.id_parcelle.as_str())
            .with_context(|| format!("unknown parcel {}", r.id_parcelle))?;
        parcels[i].lands.push(Surface {
            code: r.code_nature_culture.clone(),
            area: *area,
        });
    }
    for (r, area) in &buildings {
        let i = *parcel_index
            .get(r.id_parcelle.as_str())
            .with_context(|| format!("unknown parcel {}", r.id_parcelle))?;
        parcels[i].buildings.push(Surface {
            code: r.code_type_local.clone(),
            area: *area,
        });
    }

    Ok(Some(Mutation {
        id: first.id_mutation.clone(),
        date: first.date_mutation.clone(),
        price: parse_f64(&first.valeur_fonciere, "valeur_fonciere")?,
        land_area,
        building_area,
        parcels,
    }))
}

/// Deduplicate on `key`: the last row with a given key wins, at the position
/// where that key first appeared.
fn unique_last<K: Eq + Hash, T>(items: Vec<(K, T, f64)>) -> Vec<(T, f64)> {
    let mut out: Vec<(T, f64)> = Vec::new();
    let mut seen: HashMap<K, usize> = HashMap::new();
    for (key, item, area) in items {
        match seen.get(&key) {
            Some(&i) => out[i] = (item, area),
            None => {
                seen.insert(key, out.len());
                out.push((item, area));
            }
        }
    }
    out
}

fn parse_f64(s: &str, col: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .with_context(|| format!("{col}: '{s}' is not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id_mutation,date_mutation,valeur_fonciere,id_parcelle,type_local,code_type_local,surface_reelle_bati,nature_culture,code_nature_culture,code_nature_culture_speciale,surface_terrain,latitude,longitude";

    fn csv(rows: &[&str]) -> String {
        let mut s = String::from(HEADER);
        for r in rows {
            s.push('\n');
            s.push_str(r);
        }
        s.push('\n');
        s
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_file(Path::new("data.parquet")).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn missing_file_falls_back_to_empty() {
        let set = load_or_empty(Path::new("/nonexistent/mutations.json"));
        assert!(set.is_empty());
    }

    #[test]
    fn parses_positional_json() {
        let text = r#"[
            ["1", "2023-01-01", 200000, 500, 100, [["p1", 48.85, 2.35, [], []]]],
            ["2", "2023-02-01", 300000, 600, 150, [["p2", 48.86, 2.36, [], []]]]
        ]"#;
        let set = parse_json(text).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.mutations()[1].price, 300000.0);
        assert_eq!(set.mutations()[1].building_area, 150.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_json("{\"not\": \"a list\"}").is_err());
    }

    #[test]
    fn groups_house_with_land_sale() {
        let text = csv(&[
            "M1,2023-03-01,250000,P1,Maison,1,90,,,,,48.85,2.35",
            "M1,2023-03-01,250000,P1,,,,sols,S,,400,48.85,2.35",
            "M1,2023-03-01,250000,P2,,,,jardins,J,,100,48.851,2.351",
            // duplicated land line: counted once
            "M1,2023-03-01,250000,P2,,,,jardins,J,,100,48.851,2.351",
        ]);
        let set = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(set.len(), 1);
        let m = &set.mutations()[0];
        assert_eq!(m.id, "M1");
        assert_eq!(m.price, 250000.0);
        assert_eq!(m.building_area, 90.0);
        assert_eq!(m.land_area, 500.0);
        assert_eq!(m.parcels.len(), 2);
        assert_eq!(m.parcels[0].buildings, vec![Surface { code: "1".into(), area: 90.0 }]);
        assert_eq!(m.parcels[1].lands.len(), 1);
    }

    #[test]
    fn skips_incomplete_sales() {
        let text = csv(&[
            // apartment only, no land
            "A,2023-01-01,100000,P1,Appartement,2,40,,,,,48.85,2.35",
            // no price
            "B,2023-01-01,,P2,Maison,1,80,sols,S,,300,48.85,2.35",
            // missing coordinates
            "C,2023-01-01,150000,P3,Maison,1,80,sols,S,,300,,",
            // kept
            "D,2023-01-02,180000,P4,Maison,1,85,sols,S,,350,48.85,2.35",
        ]);
        let set = parse_csv(text.as_bytes()).unwrap();
        let ids: Vec<&str> = set.mutations().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["D"]);
    }

    #[test]
    fn keeps_first_appearance_order() {
        let text = csv(&[
            "B,2023-01-02,180000,P2,Maison,1,85,sols,S,,350,48.85,2.35",
            "A,2023-01-01,150000,P1,Maison,1,70,sols,S,,250,48.86,2.36",
            "B,2023-01-02,180000,P2,Dépendance,3,10,,,,,48.85,2.35",
        ]);
        let set = parse_csv(text.as_bytes()).unwrap();
        let ids: Vec<&str> = set.mutations().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(set.mutations()[0].building_area, 95.0);
    }

    #[test]
    fn bad_number_fails_the_load() {
        let text = csv(&["X,2023-01-01,cheap,P1,Maison,1,85,sols,S,,350,48.85,2.35"]);
        assert!(parse_csv(text.as_bytes()).is_err());
    }
}
