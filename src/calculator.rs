//! End-to-end calculation: time text in, VDOT and pace rows out

use crate::error::Result;
use crate::formulas::config::FormulaFile;
use crate::formulas::FormulaTable;
use crate::paces::{KnownResult, PaceProjector, Projection};
use crate::table::{TableGenerator, TableSweep, VdotTableRow};
use crate::time::parse_time;
use crate::vdot::VdotSolver;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of a full calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// Event label as it appears in the race score table
    pub event: String,
    /// Parsed finish time
    pub seconds: f64,
    /// VDOT rounded to one decimal
    pub vdot: f64,
    pub projection: Projection,
}

/// Stateless facade over the solver, projector and table generator
#[derive(Debug, Clone, Default)]
pub struct VdotCalculator {
    solver: VdotSolver,
    projector: PaceProjector,
}

impl VdotCalculator {
    pub fn new(race_table: FormulaTable, pace_table: FormulaTable) -> Self {
        Self {
            solver: VdotSolver::new(race_table),
            projector: PaceProjector::new(pace_table),
        }
    }

    /// Calculator using the tables from a formula file
    pub fn from_formula_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = FormulaFile::load(path)?;
        Ok(Self::new(file.race_table()?, file.pace_table()?))
    }

    pub fn solver(&self) -> &VdotSolver {
        &self.solver
    }

    pub fn projector(&self) -> &PaceProjector {
        &self.projector
    }

    /// Parse `time_text`, solve the VDOT for `event`, and project paces
    ///
    /// The solver is never invoked when the time text is invalid.
    pub fn calculate(&self, event: &str, time_text: &str) -> Result<Calculation> {
        let seconds = parse_time(time_text)?;
        self.calculate_seconds(event, seconds)
    }

    /// Same as [`VdotCalculator::calculate`] for an already parsed time
    pub fn calculate_seconds(&self, event: &str, seconds: f64) -> Result<Calculation> {
        let entry = self.solver.table().lookup(event)?;
        let event = entry.label.clone();

        let vdot = self.solver.score(&event, seconds)?;
        let known = KnownResult::new(event.clone(), seconds);
        let projection = self.projector.project(vdot, Some(&known))?;

        tracing::info!(event = %event, seconds, vdot, "Calculated VDOT");
        Ok(Calculation {
            event,
            seconds,
            vdot,
            projection,
        })
    }

    /// VDOT for a race result
    pub fn score(&self, event: &str, seconds: f64) -> Result<f64> {
        self.solver.score(event, seconds)
    }

    /// Pace rows for a score, optionally anchored to a known result
    pub fn project(&self, vdot: f64, known: Option<&KnownResult>) -> Result<Projection> {
        self.projector.project(vdot, known)
    }

    /// Reference table over `sweep`
    pub fn table(&self, sweep: &TableSweep) -> Result<Vec<VdotTableRow>> {
        TableGenerator::new(&self.projector).generate(sweep)
    }
}
