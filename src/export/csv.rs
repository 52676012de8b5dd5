use super::{header, record};
use crate::error::ExportError;
use crate::table::VdotTableRow;
use std::io::Write;

/// Write the reference table as CSV, one record per score
pub fn write_table<W: Write>(rows: &[VdotTableRow], writer: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(header(rows))?;
    for row in rows {
        writer.write_record(record(row))?;
    }

    writer.flush()?;
    Ok(())
}
