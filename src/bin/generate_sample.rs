use std::io::BufWriter;

use anyhow::{Context, Result};
use dvf_radius::data::model::{Mutation, Parcel, Surface};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Town center, price per built m², price per land m².
struct Town {
    name: &'static str,
    latitude: f64,
    longitude: f64,
    building_price: f64,
    land_price: f64,
}

const TOWNS: [Town; 4] = [
    Town { name: "75056", latitude: 48.8566, longitude: 2.3522, building_price: 6200.0, land_price: 180.0 },
    Town { name: "69123", latitude: 45.7640, longitude: 4.8357, building_price: 3900.0, land_price: 110.0 },
    Town { name: "33063", latitude: 44.8378, longitude: -0.5792, building_price: 3600.0, land_price: 90.0 },
    Town { name: "44109", latitude: 47.2184, longitude: -1.5536, building_price: 3100.0, land_price: 70.0 },
];

const SALES_PER_TOWN: usize = 250;

fn generate_mutation(town: &Town, n: usize, rng: &mut SimpleRng) -> Mutation {
    let building_area = rng.uniform(55.0, 210.0).round();
    let parcel_count = 1 + (rng.next_u64() % 3) as usize;

    // Houses cluster within ~4 km of the center; extra parcels sit next door.
    let latitude = town.latitude + rng.gauss(0.0, 0.02);
    let longitude = town.longitude + rng.gauss(0.0, 0.03);

    let mut parcels = Vec::with_capacity(parcel_count);
    let mut land_area = 0.0;
    for p in 0..parcel_count {
        let land = rng.uniform(120.0, 900.0).round();
        land_area += land;
        parcels.push(Parcel {
            id: format!("{}000AB{:04}", town.name, n * 3 + p),
            latitude: latitude + rng.gauss(0.0, 0.0004),
            longitude: longitude + rng.gauss(0.0, 0.0006),
            buildings: if p == 0 {
                vec![Surface { code: "1".into(), area: building_area }]
            } else {
                Vec::new()
            },
            lands: vec![Surface { code: "S".into(), area: land }],
        });
    }

    let price = town.building_price * building_area
        + town.land_price * land_area
        + rng.gauss(0.0, 25_000.0);

    Mutation {
        id: format!("2023-{}-{n}", town.name),
        date: format!("2023-{:02}-{:02}", 1 + n % 12, 1 + n % 28),
        price: price.max(10_000.0).round(),
        land_area,
        building_area,
        parcels,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "mutations.json".to_string());

    let mut rng = SimpleRng::new(42);
    let mutations: Vec<Mutation> = TOWNS
        .iter()
        .flat_map(|town| (0..SALES_PER_TOWN).map(move |n| (town, n)))
        .map(|(town, n)| generate_mutation(town, n, &mut rng))
        .collect();

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    serde_json::to_writer(BufWriter::new(file), &mutations).context("writing mutations")?;

    log::info!("Wrote {} mutations to {output_path}", mutations.len());
    println!(
        "Wrote {} mutations around {} towns to {output_path}",
        mutations.len(),
        TOWNS.len()
    );
    Ok(())
}
