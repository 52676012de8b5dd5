use crate::error::ExportError;
use crate::formulas::{DISTANCE_FAST, DISTANCE_SLOW};
use crate::paces::{PaceRow, Projection, RowKind};
use crate::table::VdotTableRow;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub mod csv;
pub mod json;
pub mod text;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

/// Write a reference table in `format`
pub fn export_table<W: Write>(
    rows: &[VdotTableRow],
    format: ExportFormat,
    writer: W,
) -> Result<(), ExportError> {
    tracing::debug!(rows = rows.len(), format = ?format, "Exporting VDOT table");
    match format {
        ExportFormat::Text => text::write_table(rows, writer),
        ExportFormat::Csv => csv::write_table(rows, writer),
        ExportFormat::Json => json::write_table(rows, writer),
    }
}

/// Write a reference table to a file
pub fn export_table_to_file<P: AsRef<Path>>(
    rows: &[VdotTableRow],
    format: ExportFormat,
    output_path: P,
) -> Result<(), ExportError> {
    let file = File::create(output_path.as_ref())?;
    let mut writer = BufWriter::new(file);
    export_table(rows, format, &mut writer)?;
    writer.flush()?;
    tracing::info!(path = %output_path.as_ref().display(), "VDOT table exported");
    Ok(())
}

/// Rows shown as reference table columns
///
/// Races first (table rows, then half marathon and marathon), then training
/// paces, then the easy/distance range. The two rows feeding the range are
/// folded into it.
pub fn reference_columns(projection: &Projection) -> Vec<&PaceRow> {
    let of_kind = |kind: RowKind| {
        projection.rows.iter().filter(move |row| {
            row.kind == kind && row.label != DISTANCE_FAST && row.label != DISTANCE_SLOW
        })
    };

    of_kind(RowKind::Race)
        .chain(of_kind(RowKind::Synthesized))
        .chain(of_kind(RowKind::Training))
        .chain(of_kind(RowKind::Range))
        .collect()
}

/// Header row shared by the text and CSV exports
pub(crate) fn header(rows: &[VdotTableRow]) -> Vec<String> {
    let mut header = vec!["VDOT".to_string()];
    if let Some(first) = rows.first() {
        header.extend(
            reference_columns(&first.projection)
                .into_iter()
                .map(|row| row.label.clone()),
        );
    }
    header
}

/// One formatted record per table row
pub(crate) fn record(row: &VdotTableRow) -> Vec<String> {
    let mut record = vec![format!("{:.1}", row.vdot)];
    record.extend(
        reference_columns(&row.projection)
            .into_iter()
            .map(PaceRow::headline),
    );
    record
}
