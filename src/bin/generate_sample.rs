use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Relative HyperLogLog error for 2^14 registers (1.04 / sqrt(m)).
const HLL_RELATIVE_ERROR: f64 = 1.04 / 128.0;

const OUTPUT_PATH: &str = "resultados streptococcus/streptococcus7001.csv";
const N_GENOMES: usize = 250;
const CATALOGUE_SIZE: f64 = 2_150_000.0;

#[derive(Debug, Serialize)]
struct ComparisonRow {
    #[serde(rename = "sketch_S")]
    sketch: String,
    #[serde(rename = "|R|")]
    size_r: f64,
    #[serde(rename = "|S|")]
    size_s: f64,
    #[serde(rename = "|R_union_S|")]
    size_union: f64,
    #[serde(rename = "|S_minus_R|")]
    size_s_minus_r: f64,
    rho: f64,
}

impl ComparisonRow {
    /// Derive the novelty columns from the three cardinality estimates.
    fn from_estimates(sketch: String, size_r: f64, size_s: f64, size_union: f64) -> Self {
        let size_s_minus_r = (size_union - size_r).max(0.0);
        let rho = if size_s > 0.0 {
            size_s_minus_r / size_s
        } else {
            0.0
        };
        ComparisonRow {
            sketch,
            size_r,
            size_s,
            size_union,
            size_s_minus_r,
            rho,
        }
    }
}

/// Seedable generator for the synthetic estimates: xoshiro256** seeded
/// through splitmix64, with normal deviates from the Marsaglia polar method.
struct SketchRng {
    state: [u64; 4],
    spare_normal: Option<f64>,
}

impl SketchRng {
    fn seeded(seed: u64) -> Self {
        let mut sm = seed;
        let mut splitmix = || {
            sm = sm.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = sm;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        };
        SketchRng {
            state: [splitmix(), splitmix(), splitmix(), splitmix()],
            spare_normal: None,
        }
    }

    fn next_u64(&mut self) -> u64 {
        let [a, b, c, d] = &mut self.state;
        let out = b.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let shifted = *b << 17;
        *c ^= *a;
        *d ^= *b;
        *b ^= *c;
        *a ^= *d;
        *c ^= shifted;
        *d = d.rotate_left(45);
        out
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * f64::EPSILON / 2.0
    }

    /// Standard normal deviate; each accepted pair yields two values.
    fn standard_normal(&mut self) -> f64 {
        if let Some(z) = self.spare_normal.take() {
            return z;
        }
        loop {
            let u = 2.0 * self.uniform() - 1.0;
            let v = 2.0 * self.uniform() - 1.0;
            let r2 = u * u + v * v;
            if r2 > 0.0 && r2 < 1.0 {
                let scale = (-2.0 * r2.ln() / r2).sqrt();
                self.spare_normal = Some(v * scale);
                return u * scale;
            }
        }
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }

    /// Multiply `value` by a normally distributed estimation error.
    fn estimate(&mut self, value: f64) -> f64 {
        (value * self.normal(1.0, HLL_RELATIVE_ERROR)).max(0.0)
    }
}

fn generate_rows(rng: &mut SketchRng) -> Vec<ComparisonRow> {
    let size_r = rng.estimate(CATALOGUE_SIZE);

    (0..N_GENOMES)
        .map(|i| {
            let true_s = rng.normal(2_050_000.0, 120_000.0).max(1.0);
            // Most genomes are close relatives of the catalogue; a few are not.
            let novelty = if rng.uniform() < 0.1 {
                0.2 + 0.3 * rng.uniform()
            } else {
                0.12 * rng.uniform().powi(2)
            };
            let true_union = CATALOGUE_SIZE + novelty * true_s;

            ComparisonRow::from_estimates(
                format!("GCF_{:09}.hll", 7000 + i),
                size_r,
                rng.estimate(true_s),
                rng.estimate(true_union),
            )
        })
        .collect()
}

fn write_rows(path: &Path, rows: &[ComparisonRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SketchRng::seeded(7001);
    let rows = generate_rows(&mut rng);

    let output_path = Path::new(OUTPUT_PATH);
    write_rows(output_path, &rows)?;

    println!(
        "Wrote {} sketch comparisons to {}",
        rows.len(),
        output_path.display()
    );
    Ok(())
}
