//! CSV export with the fixed `key, value, comments[, source_file]` column order

use std::io::Write;

use crate::error::{Error, Result};
use crate::types::OutputRow;

/// Write output rows as CSV.
///
/// `include_source` appends the `source_file` column after the three
/// exported ones.
pub fn write_csv<W: Write>(rows: &[OutputRow], include_source: bool, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let header: &[&str] = if include_source {
        &["key", "value", "comments", "source_file"]
    } else {
        &["key", "value", "comments"]
    };
    csv_writer
        .write_record(header)
        .map_err(|e| Error::Export(e.to_string()))?;

    for row in rows {
        let record: Vec<&str> = if include_source {
            vec![&row.key, &row.value, &row.comments, &row.source_file]
        } else {
            vec![&row.key, &row.value, &row.comments]
        };
        csv_writer
            .write_record(&record)
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    csv_writer.flush()?;
    Ok(())
}
