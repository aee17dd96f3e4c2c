use std::fmt;

/// Leading label rows of a QE export: colour names, then axis markers.
pub const HEADER_ROWS: usize = 2;

// ---------------------------------------------------------------------------
// CellValue – a single untyped cell of the raw grid
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as read from the CSV, before any header
/// interpretation has happened.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Classify a raw CSV field. Surrounding whitespace is not significant.
    pub fn from_field(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Empty;
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Text(s.to_string()),
        }
    }

    /// Classify a header field. Labels stay text even when they look
    /// numeric, so `2.50` is not re-rendered as `2.5`.
    pub fn from_label(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Interpret the cell as a sample value. Only finite numbers qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text form used for header labels: trimmed, `None` when empty.
    pub fn as_label(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            other => Some(other.to_string().trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Empty => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// RawGrid – the file as rows of cells
// ---------------------------------------------------------------------------

/// The input file as an ordered sequence of rows. Rows are padded with
/// [`CellValue::Empty`] so every row has the same width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGrid {
    pub rows: Vec<Vec<CellValue>>,
}

impl RawGrid {
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        RawGrid { rows }
    }

    /// Build from string fields the way the loader classifies them.
    #[cfg(test)]
    pub fn from_fields<R, F>(rows: R) -> Self
    where
        R: IntoIterator<Item = F>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        Self::from_rows(
            rows.into_iter()
                .enumerate()
                .map(|(i, r)| {
                    let classify = field_classifier(i);
                    r.into_iter().map(|s| classify(s.as_ref())).collect()
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// How cells of row `index` are classified: label text for the header
/// rows, numbers where possible below them.
pub fn field_classifier(index: usize) -> fn(&str) -> CellValue {
    if index < HEADER_ROWS {
        CellValue::from_label
    } else {
        CellValue::from_field
    }
}

// ---------------------------------------------------------------------------
// Column keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Parse an axis marker. Case-insensitive, whitespace-trimmed.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "X" => Some(Axis::X),
            "Y" => Some(Axis::Y),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// `(channel name, axis)` identifying one retained column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnKey {
    pub channel: String,
    pub axis: Axis,
}

impl ColumnKey {
    pub fn new(channel: impl Into<String>, axis: Axis) -> Self {
        ColumnKey {
            channel: channel.into(),
            axis,
        }
    }
}

// ---------------------------------------------------------------------------
// QeTable – the assembled output
// ---------------------------------------------------------------------------

/// One output row: a channel resampled onto the retained wavelengths.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelRow {
    pub channel: String,
    /// Same length as [`QeTable::wavelengths`].
    pub values: Vec<f64>,
}

/// The finished output table. Every row carries the same brand and model.
#[derive(Debug, Clone, PartialEq)]
pub struct QeTable {
    pub brand: String,
    pub model: String,
    /// Retained wavelengths in nm, ascending.
    pub wavelengths: Vec<u32>,
    /// Rows in sorted channel order.
    pub rows: Vec<ChannelRow>,
}

impl QeTable {
    pub fn channel_names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.channel.as_str()).collect()
    }
}

#[cfg(test)]
impl QeTable {
    pub fn row(&self, channel: &str) -> Option<&ChannelRow> {
        self.rows.iter().find(|r| r.channel == channel)
    }

    /// Value of `channel` at `wavelength`, `None` if either was dropped.
    pub fn value(&self, channel: &str, wavelength: u32) -> Option<f64> {
        let col = self.wavelengths.iter().position(|&w| w == wavelength)?;
        self.row(channel).map(|r| r.values[col])
    }
}
