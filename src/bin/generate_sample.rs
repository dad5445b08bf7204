use anyhow::{Context, Result};

/// Fluorescence band: centre (nm), width (nm), peak counts.
type Band = (f64, f64, f64);

fn band_signal(wl: f64, bands: &[Band]) -> f64 {
    bands
        .iter()
        .map(|&(centre, width, amp)| amp * (-(wl - centre).powi(2) / (2.0 * width.powi(2))).exp())
        .sum()
}

/// Photon shot noise on a counting detector, seeded for repeatable files.
///
/// splitmix64 drives an Irwin–Hall approximation of a unit normal, scaled by
/// `sqrt(expected)` as for Poisson counts.
struct ShotNoise(u64);

impl ShotNoise {
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    fn counts(&mut self, expected: f64) -> f64 {
        let unit: f64 = (0..12).map(|_| self.uniform()).sum::<f64>() - 6.0;
        (expected + unit * expected.sqrt()).max(0.0).round()
    }
}

fn main() -> Result<()> {
    let mut noise = ShotNoise(42);

    // Pixel → wavelength calibration of a small grating spectrometer:
    // 1024 pixels, 350 → ~750 nm, slightly non-linear.
    let wavelengths: Vec<f64> = (0..1024)
        .map(|p| {
            let p = p as f64;
            350.0 + 0.38 * p + 1.5e-5 * p * p
        })
        .collect();

    // Broad fluorescence band, a red-shifted shoulder and a weak far-red band
    let bands: [Band; 3] = [(465.0, 18.0, 3200.0), (520.0, 30.0, 1100.0), (690.0, 12.0, 400.0)];
    let dark_counts = 120.0;

    let output_path = "sample_lifs.txt";
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Wavelength", "Count"])?;
    for &wl in &wavelengths {
        let count = noise.counts(dark_counts + band_signal(wl, &bands));
        writer.write_record([format!("{wl:.3}"), format!("{count}")])?;
    }
    writer.flush()?;

    println!("Wrote {} points to {output_path}", wavelengths.len());
    Ok(())
}
