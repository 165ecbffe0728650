use std::io::Write;
use std::path::Path;

use super::error::Result;
use super::model::Table;

/// Default file name offered when saving the report.
pub const REPORT_FILE_NAME: &str = "ncrs_report.csv";

/// Write the whole table as CSV: header first, original column order, no index column.
pub fn write_report<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&table.column_names)?;
    for row in 0..table.len() {
        csv_writer.write_record(
            table
                .column_names
                .iter()
                .map(|col| table.value(row, col).to_csv_field()),
        )?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the report to `path`, creating or truncating the file.
pub fn export_report(table: &Table, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_report(table, file)?;
    log::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}
