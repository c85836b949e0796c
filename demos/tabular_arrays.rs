//! Tabular arrays: TOON's signature feature for repeated structures.
//!
//! Run with: cargo run --example tabular_arrays

use serde::Serialize;
use std::error::Error;
use toon::to_string;

#[derive(Serialize)]
struct Measurement {
    sensor: String,
    value: f64,
    ok: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let readings: Vec<Measurement> = (0..5)
        .map(|i| Measurement {
            sensor: format!("s{}", i),
            value: 20.0 + f64::from(i) * 0.25,
            ok: i != 3,
        })
        .collect();

    // Uniform objects with primitive fields collapse into a single header
    // plus one row per object.
    let text = to_string(&readings)?;
    println!("TOON:\n{}\n", text);

    let json = serde_json::to_string(&readings)?;
    println!("Equivalent JSON ({} bytes vs {}):\n{}", json.len(), text.len(), json);

    Ok(())
}
