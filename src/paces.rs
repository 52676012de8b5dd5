//! Equivalent pace projection
//!
//! Given a VDOT score, evaluates every training pace formula and derives
//! total time, per-mile and per-kilometer pace, and a 400 m split. When the
//! score came from a known race result, that race's row reports the input
//! time verbatim instead of re-deriving it from the rounded score.

use crate::error::{Result, VdotError};
use crate::formulas::{
    same_label, FormulaTable, DISTANCE_FAST, DISTANCE_SLOW, EASY_DISTANCE,
    HALF_MARATHON, HALF_MARATHON_MILES, KM_PER_MILE, MARATHON, MARATHON_MILES, METERS_PER_MILE,
    STEADY_STATE, TEMPO,
};
use crate::time::{format_split, format_time, round_tenth};
use serde::{Deserialize, Serialize};

/// A race result the projection should reproduce exactly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownResult {
    pub event: String,
    pub seconds: f64,
}

impl KnownResult {
    pub fn new(event: impl Into<String>, seconds: f64) -> Self {
        Self {
            event: event.into(),
            seconds,
        }
    }

    fn matches(&self, label: &str) -> bool {
        same_label(&self.event, label)
    }
}

/// Pace expressed three ways, all in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pace {
    pub per_mile: f64,
    pub per_km: f64,
    /// 400 m split, rounded to 0.1 s
    pub split_400m: f64,
}

impl Pace {
    pub fn from_per_mile(per_mile: f64) -> Self {
        Self {
            per_mile,
            per_km: per_mile / KM_PER_MILE,
            split_400m: round_tenth(per_mile / METERS_PER_MILE * 400.0),
        }
    }

    pub fn per_mile_text(&self) -> String {
        format_time(self.per_mile)
    }

    pub fn per_km_text(&self) -> String {
        format_time(self.per_km)
    }

    pub fn split_text(&self) -> String {
        format_split(self.split_400m)
    }
}

/// Where a projected row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Distance-bearing table row
    Race,
    /// Pace-only table row
    Training,
    /// Half marathon or marathon built from a training pace
    Synthesized,
    /// Fast/slow pace band
    Range,
}

/// One projected row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceRow {
    pub label: String,
    pub kind: RowKind,
    /// Finish time; `None` for pace-only rows
    pub total_time: Option<f64>,
    /// Pace, or the fast end of a range
    pub pace: Pace,
    /// Slow end of a range row
    pub slow_pace: Option<Pace>,
    /// Row reports the user's input rather than a formula value
    pub from_input: bool,
}

impl PaceRow {
    fn race(label: &str, total_time: f64, distance_miles: f64, from_input: bool) -> Self {
        Self {
            label: label.to_string(),
            kind: RowKind::Race,
            total_time: Some(total_time),
            pace: Pace::from_per_mile(total_time / distance_miles),
            slow_pace: None,
            from_input,
        }
    }

    fn training(label: &str, per_mile: f64) -> Self {
        Self {
            label: label.to_string(),
            kind: RowKind::Training,
            total_time: None,
            pace: Pace::from_per_mile(per_mile),
            slow_pace: None,
            from_input: false,
        }
    }

    /// Finish time text, empty for pace-only rows
    pub fn total_time_text(&self) -> String {
        self.total_time.map(format_time).unwrap_or_default()
    }

    /// Per-mile pace text; ranges render as `fast-slow`
    pub fn per_mile_text(&self) -> String {
        match &self.slow_pace {
            Some(slow) => format!("{}-{}", self.pace.per_mile_text(), slow.per_mile_text()),
            None => self.pace.per_mile_text(),
        }
    }

    /// Per-kilometer pace text; ranges render as `fast-slow`
    pub fn per_km_text(&self) -> String {
        match &self.slow_pace {
            Some(slow) => format!("{}-{}", self.pace.per_km_text(), slow.per_km_text()),
            None => self.pace.per_km_text(),
        }
    }

    /// 400 m split text; ranges render as `fast-slow`
    pub fn split_text(&self) -> String {
        match &self.slow_pace {
            Some(slow) => format!("{}-{}", self.pace.split_text(), slow.split_text()),
            None => self.pace.split_text(),
        }
    }

    /// Single cell for the reference table: finish time for races, pace otherwise
    pub fn headline(&self) -> String {
        match self.total_time {
            Some(total) => format_time(total),
            None => self.per_mile_text(),
        }
    }
}

/// All rows projected for one score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub vdot: f64,
    pub rows: Vec<PaceRow>,
}

impl Projection {
    pub fn row(&self, label: &str) -> Option<&PaceRow> {
        self.rows.iter().find(|row| same_label(&row.label, label))
    }
}

/// Projects equivalent paces from a VDOT score
#[derive(Debug, Clone)]
pub struct PaceProjector {
    table: FormulaTable,
}

impl Default for PaceProjector {
    fn default() -> Self {
        Self::new(FormulaTable::training_paces())
    }
}

impl PaceProjector {
    pub fn new(table: FormulaTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FormulaTable {
        &self.table
    }

    /// Project every row for `vdot`
    ///
    /// Output order: formula table rows in insertion order, then half
    /// marathon and marathon, then the easy/distance range.
    pub fn project(&self, vdot: f64, known: Option<&KnownResult>) -> Result<Projection> {
        if !vdot.is_finite() || vdot <= 0.0 {
            return Err(VdotError::NonFiniteResult {
                calculation: format!("pace projection for VDOT {}", vdot),
            });
        }

        let mut rows = Vec::with_capacity(self.table.len() + 3);

        for entry in self.table.entries() {
            let row = match entry.distance_miles {
                Some(distance) => match known.filter(|k| k.matches(&entry.label)) {
                    Some(known) => PaceRow::race(&entry.label, known.seconds, distance, true),
                    None => PaceRow::race(&entry.label, entry.evaluate(vdot), distance, false),
                },
                None => PaceRow::training(&entry.label, entry.evaluate(vdot)),
            };
            rows.push(row);
        }

        let synthesized = [
            (HALF_MARATHON, TEMPO, HALF_MARATHON_MILES),
            (MARATHON, STEADY_STATE, MARATHON_MILES),
        ];
        for (label, source, distance) in synthesized {
            if let Some(row) = self.synthesize(label, source, distance, vdot, known) {
                rows.push(row);
            }
        }

        if let Some(row) = self.easy_range(vdot) {
            rows.push(row);
        }

        for row in &rows {
            if !row.pace.per_mile.is_finite() || row.pace.per_mile <= 0.0 {
                return Err(VdotError::NonFiniteResult {
                    calculation: format!("{} pace at VDOT {}", row.label, vdot),
                });
            }
        }

        tracing::trace!(vdot, rows = rows.len(), "Projected paces");
        Ok(Projection { vdot, rows })
    }

    fn synthesize(
        &self,
        label: &str,
        source: &str,
        distance: f64,
        vdot: f64,
        known: Option<&KnownResult>,
    ) -> Option<PaceRow> {
        let (total_time, per_mile, from_input) = match known.filter(|k| k.matches(label)) {
            Some(known) => (known.seconds, known.seconds / distance, true),
            None => {
                let Some(entry) = self.table.get(source) else {
                    tracing::debug!(label, source, "Source pace row missing, skipping");
                    return None;
                };
                let per_mile = entry.evaluate(vdot);
                (per_mile * distance, per_mile, false)
            }
        };

        Some(PaceRow {
            label: label.to_string(),
            kind: RowKind::Synthesized,
            total_time: Some(total_time),
            pace: Pace::from_per_mile(per_mile),
            slow_pace: None,
            from_input,
        })
    }

    fn easy_range(&self, vdot: f64) -> Option<PaceRow> {
        let fast = self.table.get(DISTANCE_FAST)?;
        let slow = self.table.get(DISTANCE_SLOW)?;

        Some(PaceRow {
            label: EASY_DISTANCE.to_string(),
            kind: RowKind::Range,
            total_time: None,
            pace: Pace::from_per_mile(fast.evaluate(vdot)),
            slow_pace: Some(Pace::from_per_mile(slow.evaluate(vdot))),
            from_input: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::FormulaEntry;

    fn labels(projection: &Projection) -> Vec<&str> {
        projection.rows.iter().map(|row| row.label.as_str()).collect()
    }

    #[test]
    fn test_row_order() {
        let projection = PaceProjector::default().project(50.0, None).unwrap();
        assert_eq!(
            labels(&projection),
            vec![
                "800m",
                "1600m",
                "3200m",
                "5K",
                "10K",
                TEMPO,
                STEADY_STATE,
                DISTANCE_FAST,
                DISTANCE_SLOW,
                HALF_MARATHON,
                MARATHON,
                EASY_DISTANCE,
            ]
        );
    }

    #[test]
    fn test_race_row_from_formula() {
        let projection = PaceProjector::default().project(50.0, None).unwrap();
        let mile = projection.row("1600m").unwrap();

        let expected_total = 11270.0 * 50f64.powf(-0.889);
        assert_eq!(mile.kind, RowKind::Race);
        assert!((mile.total_time.unwrap() - expected_total).abs() < 1e-9);
        assert!((mile.pace.per_mile - expected_total / 0.994).abs() < 1e-9);
        assert!((mile.pace.per_km - mile.pace.per_mile / KM_PER_MILE).abs() < 1e-9);
        assert_eq!(mile.pace.split_400m, 87.0);
        assert_eq!(mile.split_text(), "1:27.0");
        assert!(!mile.from_input);
    }

    #[test]
    fn test_training_rows_have_no_total() {
        let projection = PaceProjector::default().project(50.0, None).unwrap();
        let tempo = projection.row(TEMPO).unwrap();
        assert_eq!(tempo.kind, RowKind::Training);
        assert_eq!(tempo.total_time, None);
        assert_eq!(tempo.total_time_text(), "");
        assert!((tempo.pace.per_mile - 9596.4 * 50f64.powf(-0.806)).abs() < 1e-9);
    }

    #[test]
    fn test_known_race_is_reported_verbatim() {
        let known = KnownResult::new("1600m", 300.0);
        let projection = PaceProjector::default().project(59.1, Some(&known)).unwrap();
        let mile = projection.row("1600m").unwrap();

        assert!(mile.from_input);
        assert_eq!(mile.total_time, Some(300.0));
        assert_eq!(mile.pace.per_mile, 300.0 / 0.994);
        assert_eq!(mile.total_time_text(), "5:00");
    }

    #[test]
    fn test_half_marathon_from_tempo_when_not_known() {
        let known = KnownResult::new("1600m", 300.0);
        let projection = PaceProjector::default().project(59.1, Some(&known)).unwrap();
        let half = projection.row(HALF_MARATHON).unwrap();
        let tempo = projection.row(TEMPO).unwrap();

        assert_eq!(half.kind, RowKind::Synthesized);
        assert!(!half.from_input);
        assert_eq!(half.pace.per_mile, tempo.pace.per_mile);
        assert_eq!(
            half.total_time,
            Some(tempo.pace.per_mile * HALF_MARATHON_MILES)
        );
    }

    #[test]
    fn test_known_marathon_is_reported_verbatim() {
        let known = KnownResult::new("Marathon", 12600.0);
        let projection = PaceProjector::default().project(44.3, Some(&known)).unwrap();
        let marathon = projection.row(MARATHON).unwrap();

        assert!(marathon.from_input);
        assert_eq!(marathon.total_time, Some(12600.0));
        assert_eq!(marathon.pace.per_mile, 12600.0 / MARATHON_MILES);
        assert_eq!(marathon.total_time_text(), "3:30:00");
        assert_eq!(marathon.per_mile_text(), "8:01");
    }

    #[test]
    fn test_easy_range() {
        let projection = PaceProjector::default().project(50.0, None).unwrap();
        let easy = projection.rows.last().unwrap();

        assert_eq!(easy.label, EASY_DISTANCE);
        assert_eq!(easy.kind, RowKind::Range);
        assert_eq!(easy.total_time, None);
        let slow = easy.slow_pace.unwrap();
        assert!(slow.per_mile > easy.pace.per_mile);
        assert!(easy.per_mile_text().contains('-'));
    }

    #[test]
    fn test_missing_source_rows_are_skipped() {
        let table = FormulaTable::new(vec![FormulaEntry::new(
            "5K",
            33687.0,
            -0.854,
            Some(3.1069),
        )])
        .unwrap();
        let projector = PaceProjector::new(table);

        let projection = projector.project(50.0, None).unwrap();
        assert_eq!(labels(&projection), vec!["5K"]);

        let known = KnownResult::new("Half Marathon", 5400.0);
        let projection = projector.project(50.0, Some(&known)).unwrap();
        assert_eq!(labels(&projection), vec!["5K", HALF_MARATHON]);
    }

    #[test]
    fn test_rejects_invalid_score() {
        let projector = PaceProjector::default();
        assert!(matches!(
            projector.project(0.0, None),
            Err(VdotError::NonFiniteResult { .. })
        ));
        assert!(projector.project(f64::INFINITY, None).is_err());
    }
}
