use crate::error::ExportError;
use crate::table::VdotTableRow;
use std::io::Write;

/// Write the full structured rows as pretty JSON
pub fn write_table<W: Write>(rows: &[VdotTableRow], mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    Ok(())
}

/// Write any serializable value as pretty JSON
pub fn write_json<T, W>(data: &T, mut writer: W) -> Result<(), ExportError>
where
    T: serde::Serialize,
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, data)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_rows;

    #[test]
    fn test_json_table() {
        let rows = sample_rows();
        let mut buffer = Vec::new();
        write_table(&rows, &mut buffer).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        assert!(content.contains("\"vdot\": 50.0"));
        assert!(content.contains("\"label\": \"Easy/Distance Pace\""));
        assert!(content.contains("\"kind\": \"synthesized\""));

        let parsed: Vec<VdotTableRow> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), rows.len());
        assert_eq!(parsed[0].projection.rows.len(), rows[0].projection.rows.len());
    }

    #[test]
    fn test_write_json_generic() {
        let mut buffer = Vec::new();
        write_json(&vec![1, 2, 3], &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value, serde_json::json!([1, 2, 3]));
    }
}
