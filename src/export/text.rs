use super::{header, record};
use crate::error::ExportError;
use crate::table::VdotTableRow;
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Write the reference table as an aligned plain-text grid
pub fn write_table<W: Write>(rows: &[VdotTableRow], mut writer: W) -> Result<(), ExportError> {
    let mut builder = Builder::default();
    builder.push_record(header(rows));
    for row in rows {
        builder.push_record(record(row));
    }

    let mut table = builder.build();
    table.with(Style::markdown());

    writeln!(writer, "VDOT TABLE")?;
    writeln!(writer)?;
    writeln!(writer, "{}", table)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_rows;

    #[test]
    fn test_text_table() {
        let rows = sample_rows();
        let mut buffer = Vec::new();
        write_table(&rows, &mut buffer).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        assert!(content.starts_with("VDOT TABLE"));
        assert!(content.contains("Half Marathon"));
        assert!(content.contains("| 49.9 "));
    }
}
