use std::collections::BTreeSet;

use log::debug;

use super::model::{Axis, CellValue, ColumnKey, RawGrid, HEADER_ROWS};
use crate::error::{QeError, Result};

/// Minimum number of rows: colour labels, axis labels, one data row.
pub const MIN_ROWS: usize = HEADER_ROWS + 1;

// ---------------------------------------------------------------------------
// ReconstructedTable – data columns keyed by (channel, axis)
// ---------------------------------------------------------------------------

/// Data rows of the grid with the two header rows folded into column keys.
/// Columns whose axis label is not X or Y are gone.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedTable {
    /// Retained columns in file order. Keys may repeat if the file repeats
    /// a `(channel, axis)` pair.
    pub columns: Vec<(ColumnKey, Vec<CellValue>)>,
    /// Sorted distinct channel names with at least one retained column.
    pub channels: BTreeSet<String>,
}

impl ReconstructedTable {
    /// All columns carrying `key`, in file order.
    pub fn columns_for(&self, key: ColumnKey) -> impl Iterator<Item = &[CellValue]> + '_ {
        self.columns
            .iter()
            .filter(move |(k, _)| *k == key)
            .map(|(_, cells)| cells.as_slice())
    }
}

// ---------------------------------------------------------------------------
// Reconstruction
// ---------------------------------------------------------------------------

/// Fold the colour/axis header rows of `grid` into column keys and check
/// that every channel in `required` is present.
pub fn reconstruct(grid: &RawGrid, required: &[String]) -> Result<ReconstructedTable> {
    if grid.len() < MIN_ROWS {
        return Err(QeError::malformed(format!(
            "File must contain at least {MIN_ROWS} rows (2 headers + data), found {}.",
            grid.len()
        )));
    }

    let colors = forward_fill(&grid.rows[0])?;
    let axes: Vec<Option<Axis>> = grid.rows[1]
        .iter()
        .map(|cell| Axis::parse(&cell.to_string()))
        .collect();

    let mut columns = Vec::new();
    for (i, (color, axis)) in colors.into_iter().zip(axes).enumerate() {
        let Some(axis) = axis else {
            debug!("dropping column {i}: axis label '{}' is not X or Y", grid.rows[1][i]);
            continue;
        };
        let cells = grid.rows[HEADER_ROWS..].iter().map(|row| row[i].clone()).collect();
        columns.push((ColumnKey::new(color, axis), cells));
    }

    let channels: BTreeSet<String> = columns.iter().map(|(k, _)| k.channel.clone()).collect();
    debug!("reconstructed {} columns, channels {:?}", columns.len(), channels);

    let missing = required.iter().any(|r| !channels.contains(r));
    if missing {
        return Err(QeError::MissingChannels {
            required: required.to_vec(),
            found: channels.into_iter().collect(),
        });
    }

    Ok(ReconstructedTable { columns, channels })
}

/// Carry the last non-empty label rightwards over gaps. The first cell must
/// hold a label.
pub fn forward_fill(row: &[CellValue]) -> Result<Vec<String>> {
    let mut last: Option<String> = None;
    let mut filled = Vec::with_capacity(row.len());
    for (i, cell) in row.iter().enumerate() {
        if let Some(label) = cell.as_label() {
            last = Some(label);
        }
        match &last {
            Some(label) => filled.push(label.clone()),
            None => {
                return Err(QeError::malformed(format!(
                    "colour label missing in column {i} with no preceding label to carry forward"
                )))
            }
        }
    }
    Ok(filled)
}
