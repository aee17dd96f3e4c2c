use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, warn};

use super::interpolate::LinearInterpolant;
use super::model::{Axis, CellValue, ChannelRow, ColumnKey, QeTable};
use super::reconstruct::ReconstructedTable;
use crate::config::WavelengthGrid;
use crate::error::{QeError, Result};

// ---------------------------------------------------------------------------
// Per-channel diagnostics
// ---------------------------------------------------------------------------

/// A channel left out of the output, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSkip {
    pub channel: String,
    pub reason: String,
}

impl fmt::Display for ChannelSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipping channel {}: {}", self.channel, self.reason)
    }
}

/// The output table plus the channels that did not make it.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub table: QeTable,
    pub skipped: Vec<ChannelSkip>,
}

// ---------------------------------------------------------------------------
// Sample extraction
// ---------------------------------------------------------------------------

/// The single column for `channel`/`axis`, or why there isn't one.
fn single_column<'a>(
    table: &'a ReconstructedTable,
    channel: &str,
    axis: Axis,
) -> std::result::Result<&'a [CellValue], String> {
    let mut cols = table.columns_for(ColumnKey::new(channel, axis));
    match (cols.next(), cols.next()) {
        (Some(col), None) => Ok(col),
        (None, _) => Err(format!("no {axis} column")),
        (Some(_), Some(_)) => Err(format!("more than one {axis} column")),
    }
}

/// Pair up a channel's X and Y cells. Rows where both cells are empty are
/// padding and ignored; anything else that is not a number rejects the
/// whole channel.
pub fn channel_samples(
    table: &ReconstructedTable,
    channel: &str,
) -> std::result::Result<Vec<(f64, f64)>, String> {
    let xs = single_column(table, channel, Axis::X)?;
    let ys = single_column(table, channel, Axis::Y)?;

    let mut samples = Vec::with_capacity(xs.len());
    for (row, (x, y)) in xs.iter().zip(ys).enumerate() {
        if x.is_empty() && y.is_empty() {
            continue;
        }
        match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => samples.push((x, y)),
            (None, _) => return Err(format!("data row {row}: cannot convert X value '{x}' to float")),
            (_, None) => return Err(format!("data row {row}: cannot convert Y value '{y}' to float")),
        }
    }
    if samples.is_empty() {
        return Err("no samples".to_string());
    }
    Ok(samples)
}

/// Clamp to non-negative, then round to `decimals` places. Exact halves
/// go to the even neighbour.
pub fn clamp_round(value: f64, decimals: u32) -> f64 {
    let clamped = if value > 0.0 { value } else { 0.0 };
    let scale = 10f64.powi(decimals as i32);
    (clamped * scale).round_ties_even() / scale
}

// ---------------------------------------------------------------------------
// Interpolation and assembly
// ---------------------------------------------------------------------------

/// Resample every channel onto `grid`. Channels that cannot be used are
/// returned as skips instead of failing the run.
pub fn interpolate_channels(
    table: &ReconstructedTable,
    grid: &WavelengthGrid,
    decimals: u32,
) -> (BTreeMap<String, Vec<f64>>, Vec<ChannelSkip>) {
    let mut results = BTreeMap::new();
    let mut skipped = Vec::new();

    for channel in &table.channels {
        let interpolant = channel_samples(table, channel).and_then(|samples| {
            LinearInterpolant::new(samples).ok_or_else(|| "no samples".to_string())
        });
        match interpolant {
            Ok(f) => {
                let (lo, hi) = f.domain();
                debug!("channel {channel}: samples span {lo}..{hi} nm");
                let values = f
                    .resample(grid.iter_f64())
                    .into_iter()
                    .map(|v| clamp_round(v, decimals))
                    .collect();
                results.insert(channel.clone(), values);
            }
            Err(reason) => {
                let skip = ChannelSkip {
                    channel: channel.clone(),
                    reason,
                };
                warn!("{skip}");
                skipped.push(skip);
            }
        }
    }
    (results, skipped)
}

/// Build the output table: one row per interpolated channel, wavelength
/// columns where every channel is zero removed.
///
/// Required channels are checked only during reconstruction. A required
/// channel lost here is logged but does not fail the run.
pub fn assemble(
    table: &ReconstructedTable,
    grid: &WavelengthGrid,
    required: &[String],
    brand: &str,
    model: &str,
    decimals: u32,
) -> Result<Assembly> {
    let (results, skipped) = interpolate_channels(table, grid, decimals);
    if results.is_empty() {
        return Err(QeError::NoValidData);
    }

    for name in required.iter().filter(|r| !results.contains_key(*r)) {
        warn!("required channel {name} was dropped during interpolation; continuing without it");
    }

    let keep: Vec<usize> = (0..grid.len())
        .filter(|&i| results.values().any(|values| values[i] != 0.0))
        .collect();
    let wavelengths = keep.iter().map(|&i| grid.points()[i]).collect();
    let rows = results
        .into_iter()
        .map(|(channel, values)| ChannelRow {
            channel,
            values: keep.iter().map(|&i| values[i]).collect(),
        })
        .collect::<Vec<_>>();

    info!(
        "assembled {} channels over {} of {} wavelengths",
        rows.len(),
        keep.len(),
        grid.len()
    );

    Ok(Assembly {
        table: QeTable {
            brand: brand.to_string(),
            model: model.to_string(),
            wavelengths,
            rows,
        },
        skipped,
    })
}
