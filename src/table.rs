//! VDOT reference table generation
//!
//! Sweeps a score range from `upper` down to `lower` in fixed steps and
//! projects one full set of paces per score.

use crate::error::{Result, VdotError};
use crate::paces::{PaceProjector, Projection};
use serde::{Deserialize, Serialize};

/// Upper bound on generated rows
pub const MAX_TABLE_ROWS: usize = 100_000;

/// Scores are snapped to this grid so a swept 53.5 equals a solved 53.5 bit for bit
const SNAP_SCALE: f64 = 1e6;

/// Slack when checking that a step lies on the snap grid
const GRID_TOLERANCE: f64 = 1e-6;

/// Score range for the reference table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableSweep {
    #[serde(default = "default_upper")]
    pub upper: f64,
    #[serde(default = "default_lower")]
    pub lower: f64,
    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_upper() -> f64 {
    85.0
}

fn default_lower() -> f64 {
    30.0
}

fn default_step() -> f64 {
    0.1
}

impl Default for TableSweep {
    fn default() -> Self {
        Self {
            upper: default_upper(),
            lower: default_lower(),
            step: default_step(),
        }
    }
}

impl TableSweep {
    pub fn new(upper: f64, lower: f64, step: f64) -> Self {
        Self { upper, lower, step }
    }

    /// Number of rows: `round((upper - lower) / step) + 1`
    pub fn row_count(&self) -> Result<usize> {
        self.validate()?;
        let intervals = ((self.upper - self.lower) / self.step).round();
        if intervals > (MAX_TABLE_ROWS - 1) as f64 {
            return Err(self.invalid(format!(
                "more than {} rows requested",
                MAX_TABLE_ROWS
            )));
        }
        if snap(self.upper - intervals * self.step) <= 0.0 {
            return Err(self.invalid("lowest score would not be positive".to_string()));
        }
        Ok(intervals as usize + 1)
    }

    /// Scores in descending order
    ///
    /// Each score is computed from its index rather than by repeated
    /// subtraction, so the step never accumulates error.
    pub fn scores(&self) -> Result<Vec<f64>> {
        let count = self.row_count()?;
        Ok((0..count)
            .map(|i| snap(self.upper - i as f64 * self.step))
            .collect())
    }

    fn validate(&self) -> Result<()> {
        if !(self.upper.is_finite() && self.lower.is_finite() && self.step.is_finite()) {
            return Err(self.invalid("bounds and step must be finite".to_string()));
        }
        if self.step <= 0.0 {
            return Err(self.invalid("step must be positive".to_string()));
        }
        if self.lower <= 0.0 {
            return Err(self.invalid("lower bound must be positive".to_string()));
        }
        if self.upper < self.lower {
            return Err(self.invalid("upper bound is below lower bound".to_string()));
        }

        // Snapped neighbours stay exactly one step apart only on the grid
        let grid_units = self.step * SNAP_SCALE;
        if grid_units < 1.0 - GRID_TOLERANCE
            || (grid_units - grid_units.round()).abs() > GRID_TOLERANCE
        {
            return Err(self.invalid(format!(
                "step must be a multiple of {}",
                1.0 / SNAP_SCALE
            )));
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> VdotError {
        VdotError::InvalidSweep {
            reason: format!(
                "{} (upper={}, lower={}, step={})",
                reason, self.upper, self.lower, self.step
            ),
        }
    }
}

fn snap(score: f64) -> f64 {
    (score * SNAP_SCALE).round() / SNAP_SCALE
}

/// One reference table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VdotTableRow {
    pub vdot: f64,
    pub projection: Projection,
}

/// Builds reference tables from a projector
#[derive(Debug, Clone, Copy)]
pub struct TableGenerator<'a> {
    projector: &'a PaceProjector,
}

impl<'a> TableGenerator<'a> {
    pub fn new(projector: &'a PaceProjector) -> Self {
        Self { projector }
    }

    /// Project every score in the sweep
    pub fn generate(&self, sweep: &TableSweep) -> Result<Vec<VdotTableRow>> {
        let scores = sweep.scores()?;
        tracing::info!(
            rows = scores.len(),
            upper = sweep.upper,
            lower = sweep.lower,
            step = sweep.step,
            "Generating VDOT table"
        );

        scores
            .into_iter()
            .map(|vdot| self.generate_row(vdot))
            .collect()
    }

    /// Single row; identical to a live projection without a known result
    pub fn generate_row(&self, vdot: f64) -> Result<VdotTableRow> {
        let projection = self.projector.project(vdot, None)?;
        Ok(VdotTableRow { vdot, projection })
    }
}
