//! Integration tests for the VDOT calculator
//!
//! These tests drive the public library API end to end: text input through
//! the time codec, solver, projector, table generator, and exports.

use std::fs;
use tempfile::tempdir;
use vdotrs::export::{export_table, export_table_to_file, ExportFormat};
use vdotrs::formulas::{HALF_MARATHON, HALF_MARATHON_MILES, MARATHON, MARATHON_MILES, TEMPO};
use vdotrs::{
    format_time, parse_time, KnownResult, RowKind, TableSweep, VdotCalculator, VdotError,
};

#[test]
fn test_mile_race_end_to_end() {
    // Scenario: 1600m in 5:00
    let calculator = VdotCalculator::default();
    let calculation = calculator.calculate("1600m", "5:00").unwrap();

    let expected = ((300.0f64 / 11270.0).powf(1.0 / -0.889) * 10.0).round() / 10.0;
    assert_eq!(calculation.seconds, 300.0);
    assert_eq!(calculation.vdot, expected);
    assert_eq!(calculation.vdot, 59.1);

    // Half marathon comes from the Tempo formula at the solved score
    let half = calculation.projection.row(HALF_MARATHON).unwrap();
    let tempo_per_mile = 9596.4 * calculation.vdot.powf(-0.806);
    assert!(!half.from_input);
    assert_eq!(half.kind, RowKind::Synthesized);
    assert!((half.pace.per_mile - tempo_per_mile).abs() < 1e-9);
    assert!((half.total_time.unwrap() - tempo_per_mile * HALF_MARATHON_MILES).abs() < 1e-9);

    let mile = calculation.projection.row("1600m").unwrap();
    assert!(mile.from_input);
    assert_eq!(mile.total_time_text(), "5:00");
}

#[test]
fn test_marathon_end_to_end() {
    // Scenario: Marathon in 3:30:00
    let calculator = VdotCalculator::default();
    let calculation = calculator.calculate("Marathon", "3:30:00").unwrap();

    assert_eq!(calculation.seconds, 12600.0);
    let marathon = calculation.projection.row(MARATHON).unwrap();
    assert!(marathon.from_input);
    assert_eq!(marathon.total_time, Some(12600.0));
    assert!((marathon.pace.per_mile - 480.571).abs() < 1e-3);
    assert!((marathon.pace.per_mile * MARATHON_MILES - 12600.0).abs() < 1e-9);
    assert_eq!(marathon.total_time_text(), "3:30:00");

    // Half marathon is still projected from Tempo
    let half = calculation.projection.row(HALF_MARATHON).unwrap();
    assert!(!half.from_input);
}

#[test]
fn test_half_marathon_input_is_verbatim() {
    let calculator = VdotCalculator::default();
    let calculation = calculator.calculate("half marathon", "1:30:00").unwrap();

    assert_eq!(calculation.event, HALF_MARATHON);
    let half = calculation.projection.row(HALF_MARATHON).unwrap();
    assert!(half.from_input);
    assert_eq!(half.total_time, Some(5400.0));
    assert_eq!(half.pace.per_mile, 5400.0 / HALF_MARATHON_MILES);
}

#[test]
fn test_malformed_time_surfaces_error() {
    let calculator = VdotCalculator::default();
    let err = calculator.calculate("1600m", "abc").unwrap_err();

    assert!(matches!(err, VdotError::MalformedTime { .. }));
    assert!(err.is_input_error());
    assert!(err.user_message().contains("MM:SS"));
}

#[test]
fn test_calculator_is_repeatable() {
    let calculator = VdotCalculator::default();
    let first = calculator.calculate("10K", "42:30").unwrap();
    let second = calculator.calculate("10K", "42:30").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_projection_row_order() {
    let calculator = VdotCalculator::default();
    let projection = calculator.project(45.0, None).unwrap();
    let labels: Vec<&str> = projection.rows.iter().map(|r| r.label.as_str()).collect();

    let tempo_index = labels.iter().position(|l| *l == TEMPO).unwrap();
    let half_index = labels.iter().position(|l| *l == HALF_MARATHON).unwrap();
    assert!(tempo_index < half_index);
    assert_eq!(labels[labels.len() - 3], HALF_MARATHON);
    assert_eq!(labels[labels.len() - 2], MARATHON);
    assert_eq!(projection.rows.last().unwrap().kind, RowKind::Range);
}

#[test]
fn test_known_result_override_for_each_race_row() {
    let calculator = VdotCalculator::default();
    for (event, seconds) in [("800m", 130.0), ("3200m", 660.0), ("5K", 1140.0), ("10K", 2400.0)] {
        let vdot = calculator.score(event, seconds).unwrap();
        let known = KnownResult::new(event, seconds);
        let projection = calculator.project(vdot, Some(&known)).unwrap();
        let row = projection.row(event).unwrap();

        assert_eq!(row.total_time, Some(seconds), "{}", event);
        assert!(row.from_input);
        assert_eq!(projection.rows.iter().filter(|r| r.from_input).count(), 1);
    }
}

#[test]
fn test_table_rows_match_live_calculation() {
    let calculator = VdotCalculator::default();
    let calculation = calculator.calculate("5K", "20:00").unwrap();

    let rows = calculator.table(&TableSweep::default()).unwrap();
    assert_eq!(rows.len(), 551);

    let table_row = rows
        .iter()
        .find(|row| row.vdot == calculation.vdot)
        .expect("solved score appears in the default sweep");
    let live = calculator.project(calculation.vdot, None).unwrap();
    assert_eq!(table_row.projection, live);
}

#[test]
fn test_table_export_formats() {
    let calculator = VdotCalculator::default();
    let rows = calculator.table(&TableSweep::new(60.0, 59.0, 0.5)).unwrap();

    let mut csv_out = Vec::new();
    export_table(&rows, ExportFormat::Csv, &mut csv_out).unwrap();
    let csv_text = String::from_utf8(csv_out).unwrap();
    assert_eq!(csv_text.lines().count(), 4);
    assert!(csv_text.lines().nth(1).unwrap().starts_with("60.0,"));

    let mut text_out = Vec::new();
    export_table(&rows, ExportFormat::Text, &mut text_out).unwrap();
    assert!(String::from_utf8(text_out).unwrap().contains("59.5"));

    let temp_dir = tempdir().unwrap();
    let json_path = temp_dir.path().join("table.json");
    export_table_to_file(&rows, ExportFormat::Json, &json_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[test]
fn test_custom_formula_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("formulas.toml");
    fs::write(
        &path,
        r#"
[[race]]
label = "Mile"
factor = 11270.0
exponent = -0.889

[[pace]]
label = "Mile"
factor = 11270.0
exponent = -0.889
distance_miles = 1.0
"#,
    )
    .unwrap();

    let calculator = VdotCalculator::from_formula_file(&path).unwrap();
    let calculation = calculator.calculate("mile", "5:00").unwrap();
    assert_eq!(calculation.event, "Mile");
    assert_eq!(calculation.projection.rows.len(), 1);
    assert_eq!(calculation.projection.rows[0].total_time, Some(300.0));
}

#[test]
fn test_codec_scenarios() {
    assert_eq!(parse_time("3:30:00").unwrap(), 12600.0);
    assert_eq!(format_time(12600.0), "3:30:00");
    assert!(parse_time("3.30.00").is_err());
    assert!(parse_time("1:2:3:4").is_err());
}
