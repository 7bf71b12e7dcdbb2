use approx::assert_relative_eq;
use dvf_radius::config::PredictorLayout;
use dvf_radius::data::filter::{filter, Query};
use dvf_radius::data::loader;
use dvf_radius::geo::{geodesic_distance, GeoPoint};
use dvf_radius::regression;
use dvf_radius::session::{handle_query, QueryEvent, Session};
use dvf_radius::stats::{price_per_area, Summary};

const TWO_SALES: &str = r#"[
    ["1", "2023-01-10", 200000, 500, 100, [["p1", 48.85, 2.35, [["1", 100]], [["S", 500]]]]],
    ["2", "2023-02-20", 300000, 600, 150, [["p2", 48.86, 2.36, [["1", 150]], [["S", 600]]]]]
]"#;

fn center() -> GeoPoint {
    GeoPoint::new(48.85, 2.35)
}

#[test]
fn two_sales_in_range_give_stats_but_no_model() {
    let set = loader::parse_json(TWO_SALES).unwrap();
    let query = Query::new(center(), 5_000.0).unwrap();

    let found = filter(set.mutations(), &query);
    assert_eq!(found.len(), 2);

    let per_unit: Vec<i64> = found.iter().map(|m| price_per_area(m)).collect();
    assert_eq!(per_unit, vec![2000, 2000]);

    let summary = Summary::from_mutations(found.iter().copied());
    assert_eq!(summary.count, 2);
    assert_eq!(summary.average, Some(2000));
    assert_eq!(summary.median, Some(2000));

    assert!(regression::fit(found.iter().copied(), PredictorLayout::Standard).is_err());

    let session = handle_query(
        &Session::default(),
        set.mutations(),
        QueryEvent::Select {
            center: center(),
            radius: 5_000.0,
        },
    );
    assert_eq!(session.visible, vec![0, 1]);
    assert_eq!(session.model, None);
    assert_eq!(session.prediction("500", "100"), None);
}

#[test]
fn small_radius_keeps_only_the_nearby_sale() {
    let set = loader::parse_json(TWO_SALES).unwrap();
    let second = GeoPoint::new(48.86, 2.36);
    let gap = geodesic_distance(center(), second);

    let just_short = Query::new(center(), gap * 0.999).unwrap();
    assert_eq!(filter(set.mutations(), &just_short).len(), 1);

    let just_enough = Query::new(center(), gap).unwrap();
    assert_eq!(filter(set.mutations(), &just_enough).len(), 2);
}

#[test]
fn json_file_round_trip_through_loader() {
    let path = std::env::temp_dir().join(format!("dvf-radius-{}.json", std::process::id()));
    std::fs::write(&path, TWO_SALES).unwrap();
    let set = loader::load_or_empty(&path);
    std::fs::remove_file(&path).ok();
    assert_eq!(set.len(), 2);
    assert_eq!(set.parcel_count(), 2);
}

#[test]
fn neighbourhood_fit_predicts_new_house() {
    // price = 30 000 + 2 800·building + 60·land, all within a few hundred meters
    let rows = [
        ("a", 48.850, 2.350, 90.0, 400.0),
        ("b", 48.851, 2.351, 120.0, 650.0),
        ("c", 48.849, 2.352, 75.0, 300.0),
        ("d", 48.852, 2.349, 160.0, 1100.0),
        ("e", 48.848, 2.348, 105.0, 820.0),
    ];
    let records: Vec<String> = rows
        .iter()
        .map(|(id, lat, lon, b, l)| {
            let price = 30_000.0 + 2_800.0 * b + 60.0 * l;
            format!(r#"["{id}", "2023-05-01", {price}, {l}, {b}, [["{id}", {lat}, {lon}, [], []]]]"#)
        })
        .collect();
    let set = loader::parse_json(&format!("[{}]", records.join(","))).unwrap();

    let session = handle_query(
        &Session::default(),
        set.mutations(),
        QueryEvent::Select {
            center: center(),
            radius: 1_000.0,
        },
    );
    assert_eq!(session.summary.count, 5);
    let model = session.model.expect("five independent rows fit");
    assert_relative_eq!(model.building_coefficient, 2_800.0, max_relative = 1e-6);
    assert_relative_eq!(model.land_coefficient, 60.0, max_relative = 1e-6);

    let predicted = session.prediction("700", "130").unwrap();
    assert_relative_eq!(predicted, 30_000.0 + 2_800.0 * 130.0 + 60.0 * 700.0, max_relative = 1e-6);
}
