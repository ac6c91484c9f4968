use crate::models::{ProspectRecord, Result};
use tracing::{info, warn};

/// Outcome of loading the prospect CSV: valid records plus the rows that were
/// skipped, with the row number and reason kept for the final report.
#[derive(Debug, Default)]
pub struct ProspectLoad {
    pub prospects: Vec<ProspectRecord>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

/// Load and validate prospects. Rows with an invalid email or missing company
/// URL are skipped and counted, never fatal; a missing header column is.
pub fn load_prospects(path: &str) -> Result<ProspectLoad> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut load = ProspectLoad::default();

    for (i, row) in reader.deserialize::<ProspectRecord>().enumerate() {
        let row_number = i + 2; // 1-based, after the header
        match row {
            Ok(mut record) => {
                record.normalize();
                if record.is_valid() {
                    load.prospects.push(record);
                } else {
                    load.skipped.push(SkippedRow {
                        row: row_number,
                        reason: "invalid email or company URL".to_string(),
                    });
                }
            }
            Err(e) => {
                load.skipped.push(SkippedRow {
                    row: row_number,
                    reason: format!("unreadable row: {e}"),
                });
            }
        }
    }

    info!(
        "Loaded {} prospects from {} ({} skipped)",
        load.prospects.len(),
        path,
        load.skipped.len()
    );
    for skipped in &load.skipped {
        warn!("Skipped row {}: {}", skipped.row, skipped.reason);
    }

    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "Email,First name,Last name,LinkedIn,Job position,Country,Company name,Company URL";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn loads_valid_rows() {
        let file = write_csv(&[
            "jane@acme.com,Jane,Doe,,CTO,CH,Acme,https://acme.com",
            "bob@shop.io,Bob,Ray,,CEO,US,Shopmate,shop.io",
        ]);
        let load = load_prospects(file.path().to_str().unwrap()).unwrap();
        assert_eq!(load.prospects.len(), 2);
        assert!(load.skipped.is_empty());
        assert_eq!(load.prospects[1].company_url, "https://shop.io");
    }

    #[test]
    fn skips_invalid_rows_without_failing() {
        let file = write_csv(&[
            "not-an-email,Jane,Doe,,CTO,CH,Acme,https://acme.com",
            "jane@acme.com,Jane,Doe,,CTO,CH,Acme,",
            "ok@acme.com,Jane,Doe,,CTO,CH,Acme,https://acme.com",
        ]);
        let load = load_prospects(file.path().to_str().unwrap()).unwrap();
        assert_eq!(load.prospects.len(), 1);
        assert_eq!(load.skipped.len(), 2);
        assert_eq!(load.skipped[0].row, 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_prospects("definitely/not/here.csv").is_err());
    }
}
