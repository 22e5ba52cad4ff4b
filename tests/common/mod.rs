#![allow(dead_code)]

use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const ZONES: [(&str, &str); 4] = [
    ("Pune", "Baner"),
    ("Pune", "Aundh"),
    ("Delhi", "Saket"),
    ("Mumbai", "Andheri"),
];

/// Writes a seed CSV with `rows` DEs spread over [`ZONES`] and 0..=30 orders.
pub fn generate_seed_csv(path: &Path, rows: usize, seed: u64) -> Result<(), Error> {
    let mut rng = StdRng::seed_from_u64(seed);
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record([
        "WEEK",
        "DE ID",
        "DE NAME",
        "CITY",
        "ZONE NAME",
        "SHIFT NAME",
        "TOTAL ORDERS",
    ])?;

    for i in 1..=rows {
        let (city, zone) = ZONES[rng.gen_range(0..ZONES.len())];
        let shift = if rng.gen_bool(0.5) { "Day" } else { "Night" };
        let orders: u32 = rng.gen_range(0..=30);
        wtr.write_record([
            "W1",
            &i.to_string(),
            &format!("DE {i}"),
            city,
            zone,
            shift,
            &orders.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
