// Library interface for vdotrs modules
// The calculation core (time, formulas, vdot, paces, table) has no
// presentation dependencies; display and export consume its plain data.

pub mod calculator;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod formulas;
pub mod logging;
pub mod paces;
pub mod table;
pub mod time;
pub mod vdot;

// Re-export commonly used types for convenience
pub use calculator::{Calculation, VdotCalculator};
pub use error::{ExportError, Result, VdotError};
pub use export::ExportFormat;
pub use formulas::{FormulaEntry, FormulaTable};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use paces::{KnownResult, Pace, PaceProjector, PaceRow, Projection, RowKind};
pub use table::{TableGenerator, TableSweep, VdotTableRow};
pub use time::{format_split, format_time, parse_time};
pub use vdot::VdotSolver;
