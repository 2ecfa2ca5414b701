//! Generate a synthetic input artifact (one year of hourly temperatures)
//! for demos and manual testing, without hitting the weather API.
//!
//! Usage: `cargo run --bin generate_sample [output.csv]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Seasonal + diurnal sinusoids with noise, roughly southern-Finland shaped:
/// annual mean 5 °C, ±12 °C over the year, ±4 °C over the day.
fn temperature(hour_of_year: i64, rng: &mut SimpleRng) -> f64 {
    let day = hour_of_year as f64 / 24.0;
    let seasonal = 5.0 - 12.0 * (2.0 * std::f64::consts::PI * (day + 10.0) / 365.25).cos();
    let diurnal = 4.0 * (2.0 * std::f64::consts::PI * (hour_of_year as f64 - 4.0) / 24.0).sin();
    seasonal + diurnal + rng.gauss(0.0, 1.5)
}

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("temperature_data.csv"));

    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["DateTime", "Temperature (°C)"])?;

    for hour in 0..(365 * 24) {
        let timestamp = start + Duration::hours(hour);
        let temp = temperature(hour, &mut rng);
        writer.write_record([
            timestamp.format("%Y-%m-%dT%H:%M").to_string(),
            format!("{temp:.1}"),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {} hourly samples to {}", 365 * 24, path.display());
    Ok(())
}
