//! TOML definitions for custom formula tables
//!
//! A formula file replaces one or both built-in tables:
//!
//! ```toml
//! [[race]]
//! label = "5K"
//! factor = 33687.0
//! exponent = -0.854
//!
//! [[pace]]
//! label = "Tempo"
//! factor = 9596.4
//! exponent = -0.806
//! ```
//!
//! A section that is absent or empty keeps the built-in table.

use crate::error::{Result, VdotError};
use crate::formulas::{FormulaEntry, FormulaTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serializable formula file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormulaFile {
    /// Race score rows for the solver
    #[serde(default)]
    pub race: Vec<FormulaEntry>,

    /// Training pace rows for the projector
    #[serde(default)]
    pub pace: Vec<FormulaEntry>,
}

impl FormulaFile {
    /// Parse a formula file from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| VdotError::Configuration(format!("Invalid formula file: {}", e)))
    }

    /// Load a formula file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        tracing::debug!(path = %path.as_ref().display(), "Loading formula file");
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            VdotError::Configuration(format!("Failed to serialize formula file: {}", e))
        })
    }

    /// File content describing the built-in tables
    pub fn builtin() -> Self {
        Self {
            race: FormulaTable::race_scores().entries().to_vec(),
            pace: FormulaTable::training_paces().entries().to_vec(),
        }
    }

    /// Validated race score table, falling back to the built-in one
    pub fn race_table(&self) -> Result<FormulaTable> {
        if self.race.is_empty() {
            return Ok(FormulaTable::race_scores());
        }
        FormulaTable::new(self.race.clone())
    }

    /// Validated training pace table, falling back to the built-in one
    pub fn pace_table(&self) -> Result<FormulaTable> {
        if self.pace.is_empty() {
            return Ok(FormulaTable::training_paces());
        }
        FormulaTable::new(self.pace.clone())
    }
}
