use std::io::Write;
use std::path::{Path, PathBuf};

use super::model::QeTable;
use crate::error::{QeError, Result};

pub const CHANNEL_HEADER: &str = "Channel";
pub const BRAND_HEADER: &str = "Camera Brand";
pub const MODEL_HEADER: &str = "Camera Model";

/// `QE_<brand>_<model>.tsv` with spaces and path separators replaced by `_`.
pub fn output_file_name(brand: &str, model: &str) -> String {
    format!("QE_{brand}_{model}.tsv").replace([' ', '/', '\\'], "_")
}

/// Responses keep at least one fractional digit (`0.0`, `0.3`, `0.125`).
pub fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Serialize `table` as tab-separated text.
pub fn write_tsv<W: Write>(table: &QeTable, out: W) -> std::result::Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(out);

    let mut header = vec![
        CHANNEL_HEADER.to_string(),
        BRAND_HEADER.to_string(),
        MODEL_HEADER.to_string(),
    ];
    header.extend(table.wavelengths.iter().map(u32::to_string));
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![row.channel.clone(), table.brand.clone(), table.model.clone()];
        record.extend(row.values.iter().map(|&v| format_value(v)));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `table` into `dir` under [`output_file_name`], replacing any
/// existing file. Returns the written path.
pub fn save_table(table: &QeTable, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(output_file_name(&table.brand, &table.model));
    let file = std::fs::File::create(&path).map_err(|e| QeError::io(&path, e))?;
    write_tsv(table, std::io::BufWriter::new(file)).map_err(|e| QeError::csv(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ChannelRow;

    fn table() -> QeTable {
        QeTable {
            brand: "Acme Corp".into(),
            model: "X1".into(),
            wavelengths: vec![400, 450],
            rows: vec![
                ChannelRow {
                    channel: "Blue".into(),
                    values: vec![0.0, 0.125],
                },
                ChannelRow {
                    channel: "Red".into(),
                    values: vec![0.1, 0.3],
                },
            ],
        }
    }

    #[test]
    fn file_name_replaces_spaces() {
        assert_eq!(output_file_name("Acme", "X1"), "QE_Acme_X1.tsv");
        assert_eq!(output_file_name("Big Cam", "Mark II"), "QE_Big_Cam_Mark_II.tsv");
        assert_eq!(output_file_name("A/B", "C\\D"), "QE_A_B_C_D.tsv");
    }

    #[test]
    fn values_keep_a_fractional_digit() {
        assert_eq!(format_value(0.0), "0.0");
        assert_eq!(format_value(1.0), "1.0");
        assert_eq!(format_value(0.3), "0.3");
        assert_eq!(format_value(0.125), "0.125");
    }

    #[test]
    fn tsv_layout() {
        let mut buf = Vec::new();
        write_tsv(&table(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Channel\tCamera Brand\tCamera Model\t400\t450");
        assert_eq!(lines[1], "Blue\tAcme Corp\tX1\t0.0\t0.125");
        assert_eq!(lines[2], "Red\tAcme Corp\tX1\t0.1\t0.3");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("QE_Acme_Corp_X1.tsv");
        std::fs::write(&stale, "old contents that are longer than the table itself .......").unwrap();
        let path = save_table(&table(), dir.path()).unwrap();
        assert_eq!(path, stale);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Channel\t"));
        assert!(!text.contains("old contents"));
    }
}
