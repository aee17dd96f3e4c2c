use std::io::Read;
use std::path::Path;

use log::debug;

use super::model::{field_classifier, RawGrid};
use crate::error::{QeError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a QE export into a [`RawGrid`]. No row is treated as a header here;
/// the two label rows are interpreted later by the reconstructor.
pub fn load_file(path: &Path) -> Result<RawGrid> {
    let file = std::fs::File::open(path).map_err(|e| QeError::io(path, e))?;
    let grid = read_grid(file).map_err(|e| QeError::csv(path, e))?;
    debug!(
        "loaded {} rows x {} columns from {}",
        grid.len(),
        grid.width(),
        path.display()
    );
    Ok(grid)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read comma-separated text into a grid. Records may have differing
/// lengths; short rows are padded with empty cells. Blank lines are skipped
/// by the CSV reader. Header rows are kept as label text.
pub fn read_grid<R: Read>(input: R) -> std::result::Result<RawGrid, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let classify = field_classifier(i);
        rows.push(record.iter().map(classify).collect());
    }
    Ok(RawGrid::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use crate::data::reconstruct::forward_fill;
    use std::io::Write;

    #[test]
    fn reads_two_header_rows_verbatim() {
        let text = "Red,,Green,\nX,Y,x,y\n400,0.1,400,0.2\n";
        let grid = read_grid(text.as_bytes()).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.rows[0][0], CellValue::Text("Red".into()));
        assert_eq!(grid.rows[0][1], CellValue::Empty);
        assert_eq!(grid.rows[1][2], CellValue::Text("x".into()));
        assert_eq!(grid.rows[2][1], CellValue::Number(0.1));
    }

    #[test]
    fn numeric_colour_labels_keep_source_text() {
        let text = "2.50,,1e3,\nX,Y,X,Y\n400,0.1,400,0.2\n";
        let grid = read_grid(text.as_bytes()).unwrap();
        assert_eq!(
            forward_fill(&grid.rows[0]).unwrap(),
            vec!["2.50", "2.50", "1e3", "1e3"]
        );
        assert_eq!(grid.rows[2][0], CellValue::Number(400.0));
    }

    #[test]
    fn ragged_rows_are_padded() {
        let text = "Red,,Green,\nX,Y,X,Y\n400,0.1\n";
        let grid = read_grid(text.as_bytes()).unwrap();
        assert_eq!(grid.rows[2].len(), 4);
        assert!(grid.rows[2][3].is_empty());
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Red,\nX,Y\n500,0.5").unwrap();
        let grid = load_file(file.path()).unwrap();
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, QeError::Io { .. }));
    }
}
