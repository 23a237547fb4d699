use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ftir_baseline::concentration_from_label;
use ftir_baseline::data::loader::{FOOTER_LINES, HEADER_LINES};

const FOOTER: [&str; FOOTER_LINES] = ["##END=", ""];

/// Gaussian band of `height` centred on `centre`.
fn band_profile(wn: f64, centre: f64, width: f64, height: f64) -> f64 {
    let z = (wn - centre) / width;
    height * (-0.5 * z * z).exp()
}

/// Peaks on a sloped background, with a per-replicate offset and noise.
fn generate_spectrum(
    wavenumbers: &[i64],
    peaks: &[(f64, f64, f64)],
    background: (f64, f64),
    noise_level: f64,
    noise: &mut NoiseSource,
) -> Vec<f64> {
    let (slope, offset) = background;
    wavenumbers
        .iter()
        .map(|&wn| {
            let wn = wn as f64;
            let signal: f64 = peaks
                .iter()
                .map(|&(centre, width, height)| band_profile(wn, centre, width, height))
                .sum();
            signal + slope * wn + offset + noise.normal(noise_level)
        })
        .collect()
}

/// Seeded SplitMix64 stream; enough for reproducible instrument noise.
struct NoiseSource {
    state: u64,
}

impl NoiseSource {
    fn new(seed: u64) -> Self {
        NoiseSource { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in (0, 1].
    fn unit(&mut self) -> f64 {
        ((self.next_u64() >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    /// Zero-mean normal noise of width `sigma` (Box-Muller, cosine branch).
    fn normal(&mut self, sigma: f64) -> f64 {
        let radius = (-2.0 * self.unit().ln()).sqrt();
        let angle = std::f64::consts::TAU * self.unit();
        sigma * radius * angle.cos()
    }
}

// ---------------------------------------------------------------------------
// Instrument export rendering
// ---------------------------------------------------------------------------

fn render_export(title: &str, wavenumbers: &[i64], absorbance: &[f64]) -> String {
    let mut text = String::new();

    let meta = [
        format!("TITLE\t{title}"),
        "DATA TYPE\tINFRARED SPECTRUM".to_string(),
        "ORIGIN\tsynthetic".to_string(),
        "XUNITS\t1/CM".to_string(),
        "YUNITS\tABSORBANCE".to_string(),
        format!("NPOINTS\t{}", wavenumbers.len()),
    ];
    for i in 0..HEADER_LINES {
        match meta.get(i) {
            Some(line) => text.push_str(line),
            None => text.push_str(&format!("##PARAM{i}=")),
        }
        text.push('\n');
    }

    for (wn, abs) in wavenumbers.iter().zip(absorbance) {
        text.push_str(&format!("{wn}.000000\t{abs:.6}\n"));
    }

    for line in FOOTER {
        text.push_str(line);
        text.push('\n');
    }
    text
}

fn write_series(
    out_dir: &Path,
    alcohol: &str,
    labels: &[&str],
    replicates: usize,
    noise: &mut NoiseSource,
) -> Result<usize> {
    // 4000 → 600 cm⁻¹, step 2: both default anchors land on the grid.
    let wavenumbers: Vec<i64> = (0..=1700).map(|i| 4000 - 2 * i).collect();
    let mut written = 0;

    for label in labels {
        let concentration = concentration_from_label(label)?;
        // Ester carbonyl grows with biodiesel content; O-H stretch of the alcohol stays.
        let peaks = [(1745.0, 9.0, 0.08 * concentration), (3350.0, 120.0, 0.9)];

        for index in 0..replicates {
            let background = (1.5e-5, 0.02 + 0.01 * index as f64);
            let absorbance = generate_spectrum(&wavenumbers, &peaks, background, 0.0005, noise);
            let title = format!("{alcohol}-{label}-{index}");
            let path = out_dir.join(format!("{title}.asc"));

            std::fs::write(&path, render_export(&title, &wavenumbers, &absorbance))
                .with_context(|| format!("writing {}", path.display()))?;
            log::debug!("wrote {}", path.display());
            written += 1;
        }
    }

    Ok(written)
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_data".to_string())
        .into();
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut noise = NoiseSource::new(42);
    let alcohols = ["MeOH", "EtOH", "PrOH"];
    let labels = ["0000", "0250", "0500", "1000", "2000"];

    let mut written = 0;
    for alcohol in alcohols {
        written += write_series(&out_dir, alcohol, &labels, 3, &mut noise)?;
    }

    println!("Wrote {written} exports to {}", out_dir.display());
    Ok(())
}
