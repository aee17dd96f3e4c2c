use std::io::Write;

use anyhow::{Context, Result};

/// Sensor band: centre (nm), width (nm), peak QE.
type Band = (f64, f64, f64);

/// A synthetic channel sampled on its own wavelength range.
struct SampleChannel {
    name: &'static str,
    start_nm: f64,
    end_nm: f64,
    step_nm: f64,
    bands: &'static [Band],
}

const CHANNELS: [SampleChannel; 3] = [
    SampleChannel {
        name: "Red",
        start_nm: 380.0,
        end_nm: 1000.0,
        step_nm: 4.0,
        bands: &[(610.0, 45.0, 0.55), (850.0, 90.0, 0.12)],
    },
    SampleChannel {
        name: "Green",
        start_nm: 370.0,
        end_nm: 980.0,
        step_nm: 5.0,
        bands: &[(535.0, 40.0, 0.68), (830.0, 80.0, 0.10)],
    },
    SampleChannel {
        name: "Blue",
        start_nm: 350.0,
        end_nm: 960.0,
        step_nm: 7.5,
        bands: &[(460.0, 35.0, 0.62), (810.0, 70.0, 0.08)],
    },
];

/// splitmix64; reproducible measurement jitter for a given seed.
struct Jitter(u64);

impl Jitter {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[-amplitude, amplitude)`.
    fn sample(&mut self, amplitude: f64) -> f64 {
        amplitude * (2.0 * self.next_unit() - 1.0)
    }
}

impl SampleChannel {
    fn wavelengths(&self) -> Vec<f64> {
        let count = ((self.end_nm - self.start_nm) / self.step_nm).floor() as usize + 1;
        (0..count)
            .map(|i| self.start_nm + i as f64 * self.step_nm)
            .collect()
    }

    /// Sum of Gaussian bands, never below zero after jitter.
    fn response(&self, wavelength: f64, jitter: &mut Jitter) -> f64 {
        let signal: f64 = self
            .bands
            .iter()
            .map(|&(centre, width, peak)| peak * (-(wavelength - centre).powi(2) / (2.0 * width.powi(2))).exp())
            .sum();
        (signal + jitter.sample(0.004)).max(0.0)
    }
}

/// Write a two-row-header QE CSV (colour row, X/Y row, ragged data columns).
/// Returns the number of data rows.
fn write_sample<W: Write>(out: W, seed: u64) -> Result<usize> {
    let mut jitter = Jitter(seed);
    let mut columns: Vec<Vec<f64>> = Vec::new();
    for channel in &CHANNELS {
        let wavelengths = channel.wavelengths();
        let response = wavelengths
            .iter()
            .map(|&wl| channel.response(wl, &mut jitter))
            .collect();
        columns.push(wavelengths);
        columns.push(response);
    }

    let mut writer = csv::Writer::from_writer(out);
    let colors: Vec<&str> = CHANNELS.iter().flat_map(|c| [c.name, ""]).collect();
    writer.write_record(&colors)?;
    let axes: Vec<&str> = CHANNELS.iter().flat_map(|_| ["X", "Y"]).collect();
    writer.write_record(&axes)?;

    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    for r in 0..rows {
        let record: Vec<String> = columns
            .iter()
            .map(|col| col.get(r).map_or_else(String::new, |v| format!("{v:.4}")))
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(rows)
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_qe.csv".to_string());
    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    let rows = write_sample(file, 42)?;

    println!(
        "Wrote {} channels ({rows} rows) to {output_path}",
        CHANNELS.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_back(bytes: &[u8]) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn sample_has_importable_layout() {
        let mut buf = Vec::new();
        let rows = write_sample(&mut buf, 42).unwrap();
        let records = read_back(&buf);

        assert_eq!(records.len(), rows + 2);
        assert_eq!(records[0], vec!["Red", "", "Green", "", "Blue", ""]);
        assert_eq!(records[1], vec!["X", "Y", "X", "Y", "X", "Y"]);

        for col in (0..6).step_by(2) {
            let mut filled = 0;
            for record in &records[2..] {
                let (x, y) = (&record[col], &record[col + 1]);
                assert_eq!(x.is_empty(), y.is_empty(), "half-empty pair in column {col}");
                if !x.is_empty() {
                    assert!(x.parse::<f64>().is_ok());
                    assert!(y.parse::<f64>().unwrap() >= 0.0);
                    filled += 1;
                }
            }
            assert!(filled > 1);
        }
        // Channels have different sample counts, so the columns are ragged.
        assert!(records.last().unwrap().iter().any(String::is_empty));
    }

    #[test]
    fn same_seed_same_file() {
        let (mut a, mut b) = (Vec::new(), Vec::new());
        write_sample(&mut a, 7).unwrap();
        write_sample(&mut b, 7).unwrap();
        assert_eq!(a, b);
    }
}
