//! VDOT solver
//!
//! Inverts the race score formula for a finish time:
//! `vdot = (per_mile / factor) ^ (1 / exponent)`, rounded to one decimal.

use crate::error::{Result, VdotError};
use crate::formulas::FormulaTable;
use crate::time::round_tenth;

/// Derives a VDOT score from a race result
#[derive(Debug, Clone)]
pub struct VdotSolver {
    table: FormulaTable,
}

impl Default for VdotSolver {
    fn default() -> Self {
        Self::new(FormulaTable::race_scores())
    }
}

impl VdotSolver {
    pub fn new(table: FormulaTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FormulaTable {
        &self.table
    }

    /// VDOT for `event` finished in `seconds`, rounded to one decimal
    pub fn score(&self, event: &str, seconds: f64) -> Result<f64> {
        let raw = self.raw_score(event, seconds)?;
        let vdot = round_tenth(raw);
        if vdot <= 0.0 {
            return Err(VdotError::NonFiniteResult {
                calculation: format!("VDOT for {} rounds to zero", event),
            });
        }
        tracing::debug!(event, seconds, raw, vdot, "Solved VDOT");
        Ok(vdot)
    }

    /// Unrounded VDOT
    pub fn raw_score(&self, event: &str, seconds: f64) -> Result<f64> {
        let entry = self.table.lookup(event)?;

        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(VdotError::NonPositiveDuration { seconds });
        }

        let per_mile = match entry.distance_miles {
            Some(distance) => seconds / distance,
            None => seconds,
        };

        let score = entry.invert(per_mile);
        if !score.is_finite() || score <= 0.0 {
            return Err(VdotError::NonFiniteResult {
                calculation: format!("VDOT for {} in {} s", entry.label, seconds),
            });
        }

        Ok(score)
    }
}
