use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Reflectance with a sloped continuum and absorption bands carved out of it.
fn generate_spectrum(
    wavelengths: &[f64],
    bands: &[(f64, f64, f64)],
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    wavelengths
        .iter()
        .map(|&wl| {
            let continuum = 0.35 + 0.25 * (wl - wavelengths[0]) / 2000.0;
            let absorption: f64 = bands
                .iter()
                .map(|&(mu, sigma, depth)| gaussian(wl, mu, sigma, depth))
                .sum();
            (continuum * (1.0 - absorption) + rng.gauss(0.0, noise_level)).max(0.0)
        })
        .collect()
}

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

fn write_csv(path: &str, x: &[f64], y: &[f64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["x", "y"])?;
    for (xv, yv) in x.iter().zip(y) {
        writer.write_record([xv.to_string(), yv.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, x: Vec<f64>, y: Vec<f64>) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(Float64Array::from(x)), Arc::new(Float64Array::from(y))],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Wavelengths: 400 → 2390 nm, step 10 (fits the default 200-band limit)
    let wavelengths: Vec<f64> = (0..200).map(|i| 400.0 + i as f64 * 10.0).collect();

    // (centre, width, fractional depth)
    let bands = [(950.0, 60.0, 0.25), (1400.0, 45.0, 0.15), (1900.0, 70.0, 0.35), (2200.0, 30.0, 0.1)];
    let reflectance = generate_spectrum(&wavelengths, &bands, 0.002, &mut rng);

    write_csv("sample_spectrum.csv", &wavelengths, &reflectance)?;
    write_parquet("sample_spectrum.parquet", wavelengths.clone(), reflectance)?;

    println!(
        "Wrote {} bands to sample_spectrum.csv and sample_spectrum.parquet",
        wavelengths.len()
    );
    Ok(())
}
