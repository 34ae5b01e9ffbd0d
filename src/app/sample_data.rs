//! Seeded sample property listings for the demo.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

/// Seed used by the demo so every run shows the same listings.
pub const DEFAULT_SEED: u64 = 42;

const CITIES: &[&str] = &[
    "Santiago", "Valparaíso", "Concepción", "La Serena", "Antofagasta",
    "Temuco", "Puerto Montt", "Viña del Mar", "Iquique", "Punta Arenas",
];

const KINDS: &[&str] = &["Apartment", "House", "Loft", "Studio", "Townhouse", "Penthouse"];

const ADJECTIVES: &[&str] = &["Sunny", "Modern", "Cozy", "Spacious", "Renovated", "Quiet", "Bright"];

const STATUSES: &[&str] = &["available", "reserved", "sold"];

/// Generates `count` listings deterministically from `seed`.
///
/// Each row carries `id`, `title`, `city`, `price`, `bedrooms`, `area_m2`,
/// `status` and `agent` (sometimes `null`).
pub fn generate_listings(seed: u64, count: usize) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(seed);

    (1..=count)
        .map(|id| {
            let kind = KINDS[rng.gen_range(0..KINDS.len())];
            let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
            let city = CITIES[rng.gen_range(0..CITIES.len())];
            let bedrooms: u32 = if kind == "Studio" { 0 } else { rng.gen_range(1..=5) };
            let area = rng.gen_range(28..=320);
            let price = (area * rng.gen_range(1800..=4200) / 100) * 100;
            let status = STATUSES[rng.gen_range(0..STATUSES.len())];
            let agent = if rng.gen_bool(0.8) {
                json!(format!("Agent {:02}", rng.gen_range(1..=12)))
            } else {
                Value::Null
            };

            json!({
                "id": id,
                "title": format!("{} {} in {}", adjective, kind, city),
                "city": city,
                "price": price,
                "bedrooms": bedrooms,
                "area_m2": area,
                "status": status,
                "agent": agent,
            })
        })
        .collect()
}
