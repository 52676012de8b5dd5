//! Terminal rendering for calculations and projections

use crate::calculator::Calculation;
use crate::formulas::FormulaTable;
use crate::paces::Projection;
use crate::time::format_time;
use colored::*;
use tabled::builder::Builder;
use tabled::settings::Style;

const PACE_HEADER: [&str; 5] = [
    "Event / Pace Type",
    "Total Time",
    "Pace / Mile",
    "Pace / Km",
    "400m",
];

/// Pace table for a projection
pub fn pace_table(projection: &Projection) -> String {
    let mut builder = Builder::default();
    builder.push_record(PACE_HEADER);

    for row in &projection.rows {
        let label = if row.from_input {
            format!("{} *", row.label)
        } else {
            row.label.clone()
        };
        builder.push_record([
            label,
            row.total_time_text(),
            row.per_mile_text(),
            row.per_km_text(),
            row.split_text(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Headline plus pace table for a full calculation
pub fn render_calculation(calculation: &Calculation) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} in {}\n",
        "Race:".bold(),
        calculation.event,
        format_time(calculation.seconds)
    ));
    out.push_str(&format!(
        "{} {}\n\n",
        "Calculated VDOT:".bold(),
        format!("{:.1}", calculation.vdot).green().bold()
    ));
    out.push_str(&pace_table(&calculation.projection));
    out.push_str(&format!("\n{}\n", "* taken from your race time".dimmed()));
    out
}

/// Headline plus pace table for a bare score
pub fn render_projection(projection: &Projection) -> String {
    format!(
        "{} {}\n\n{}\n",
        "VDOT:".bold(),
        format!("{:.1}", projection.vdot).green().bold(),
        pace_table(projection)
    )
}

/// Formula table listing
pub fn formula_table(title: &str, table: &FormulaTable) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Label", "Factor", "Exponent", "Distance (mi)"]);
    for entry in table.entries() {
        builder.push_record([
            entry.label.clone(),
            entry.factor.to_string(),
            entry.exponent.to_string(),
            entry
                .distance_miles
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    format!("{}\n{}\n", title.bold(), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::VdotCalculator;

    #[test]
    fn test_render_calculation() {
        colored::control::set_override(false);
        let calculation = VdotCalculator::default()
            .calculate("Marathon", "3:30:00")
            .unwrap();
        let rendered = render_calculation(&calculation);

        assert!(rendered.contains("Calculated VDOT: 44.3"));
        assert!(rendered.contains("Marathon *"));
        assert!(rendered.contains("3:30:00"));
        assert!(rendered.contains("Easy/Distance Pace"));
    }

    #[test]
    fn test_formula_table_listing() {
        colored::control::set_override(false);
        let listing = formula_table("Race events", &FormulaTable::race_scores());
        assert!(listing.starts_with("Race events"));
        assert!(listing.contains("13.1094"));
        assert!(listing.contains("800m"));
    }
}
