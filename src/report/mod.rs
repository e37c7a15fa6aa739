//! Report construction: the numbers a spreadsheet or console renders.
//!
//! The report carries already-scaled, already-rounded values plus
//! presentation flags (bold, highlight, delta tone). Rendering itself lives
//! in [`export`] and the CLI.
//!
//! Scaling is contractual:
//! - comparison variable columns: KRW ÷ 1e8, one decimal
//! - comparison EBITDA and change: KRW ÷ 1e8, whole units
//! - comparison percentages: one decimal
//! - baseline table: KRW ÷ 1e6, whole units

pub mod export;

use serde::Serialize;

use crate::catalog::{catalog, Catalog, LineItem, VariableId};
use crate::scenarios::{contribution_of, round_to, NamedResult};

/// Divisor for comparison currency columns (억원).
pub const COMPARISON_UNIT: f64 = 1e8;
/// Divisor for baseline table currency columns (백만원).
pub const BASELINE_UNIT: f64 = 1e6;

/// Whether a delta is rendered as a gain or a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaTone {
    /// Zero or positive.
    Positive,
    /// Negative.
    Negative,
}

impl DeltaTone {
    /// Tone of a value.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// One scenario row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Scenario name.
    pub name: String,
    /// Contributions in [`VariableId::ALL`] order, ÷1e8, one decimal.
    pub contributions: [f64; 7],
    /// Projected EBITDA, ÷1e8, whole units.
    pub ebitda_projected: f64,
    /// EBITDA change, ÷1e8, whole units.
    pub ebitda_change: f64,
    /// Tone of the change column.
    pub change_tone: DeltaTone,
    /// Projected EBITDA margin (%), one decimal.
    pub ebitda_pct: f64,
    /// Projected gross margin (%), one decimal.
    pub gp_pct: f64,
    /// Projected franchise gross margin (%), one decimal.
    pub franchise_gp_pct: f64,
    /// Projected operating margin (%), one decimal.
    pub op_margin_pct: f64,
}

impl ComparisonRow {
    /// Shape one named result.
    #[must_use]
    pub fn from_result(named: &NamedResult) -> Self {
        let r = &named.result;
        let contributions = VariableId::ALL
            .map(|id| round_to(contribution_of(&r.var_values, id) / COMPARISON_UNIT, 1));
        let ebitda_change = round_to(r.ebitda_change / COMPARISON_UNIT, 0);
        Self {
            name: named.name.clone(),
            contributions,
            ebitda_projected: round_to(r.ebitda_projected / COMPARISON_UNIT, 0),
            ebitda_change,
            change_tone: DeltaTone::of(ebitda_change),
            ebitda_pct: round_to(r.ebitda_pct_projected, 1),
            gp_pct: round_to(r.gp_pct_projected, 1),
            franchise_gp_pct: round_to(r.franchise_gp_pct_projected, 1),
            op_margin_pct: round_to(r.op_margin_pct_projected, 1),
        }
    }
}

/// One line of the baseline summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineRow {
    /// Line item.
    pub item: LineItem,
    /// Display label.
    pub label: &'static str,
    /// Prior actual, ÷1e6, whole units.
    pub prior: f64,
    /// Planned, ÷1e6, whole units.
    pub planned: f64,
    /// Planned − prior, ÷1e6, whole units.
    pub delta: f64,
    /// Tone of the delta column.
    pub delta_tone: DeltaTone,
    /// Subtotal row.
    pub bold: bool,
    /// Headline row.
    pub highlight: bool,
}

/// Comparison table plus baseline summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// One row per scenario, in input order.
    pub comparison: Vec<ComparisonRow>,
    /// One row per P&L line item, in statement order.
    pub baseline: Vec<BaselineRow>,
}

/// Build the report for evaluated scenarios against the process-wide catalog.
#[must_use]
pub fn build_report(results: &[NamedResult]) -> Report {
    build_report_with(catalog(), results)
}

/// [`build_report`] against an explicit catalog.
#[must_use]
pub fn build_report_with(catalog: &Catalog, results: &[NamedResult]) -> Report {
    Report {
        comparison: results.iter().map(ComparisonRow::from_result).collect(),
        baseline: baseline_rows(catalog),
    }
}

/// Prior vs planned summary rows.
#[must_use]
pub fn baseline_rows(catalog: &Catalog) -> Vec<BaselineRow> {
    catalog
        .baseline
        .entries()
        .iter()
        .map(|entry| {
            let planned = catalog.planned.value(entry.item);
            let delta = round_to((planned - entry.prior) / BASELINE_UNIT, 0);
            BaselineRow {
                item: entry.item,
                label: entry.label,
                prior: round_to(entry.prior / BASELINE_UNIT, 0),
                planned: round_to(planned / BASELINE_UNIT, 0),
                delta,
                delta_tone: DeltaTone::of(delta),
                bold: entry.bold,
                highlight: entry.highlight,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::{compare, GlobalParams, ScenarioInput, VarValues};

    fn report() -> Report {
        let scenarios = vec![
            ScenarioInput::new("plan", catalog().default_values()),
            ScenarioInput::new(
                "loss",
                VarValues::new().with(VariableId::VolumeDecrease, -2_886_421_988.0),
            ),
        ];
        build_report(&compare(&scenarios, &GlobalParams::new()).unwrap())
    }

    #[test]
    fn test_row_counts() {
        let report = report();
        assert_eq!(report.comparison.len(), 2);
        assert_eq!(report.baseline.len(), LineItem::COUNT);
    }

    #[test]
    fn test_comparison_scaling() {
        let row = &report().comparison[0];
        assert_eq!(row.name, "plan");
        // 8_058_746_918 / 1e8 = 80.587...
        assert!((row.contributions[0] - 80.6).abs() < 1e-9);
        assert!((row.contributions[1] + 14.4).abs() < 1e-9);
        assert!((row.contributions[6] - 49.7).abs() < 1e-9);
        assert!((row.ebitda_projected - 1244.0).abs() < f64::EPSILON);
        assert!((row.ebitda_change - 228.0).abs() < f64::EPSILON);
        assert_eq!(row.change_tone, DeltaTone::Positive);
        assert!((row.gp_pct - 38.5).abs() < 1e-9);
        assert!((row.franchise_gp_pct - 38.9).abs() < 1e-9);
        assert!((row.op_margin_pct - 19.9).abs() < 1e-9);
        assert!((row.ebitda_pct - 23.9).abs() < 1e-9);
    }

    #[test]
    fn test_negative_change_tone() {
        let row = &report().comparison[1];
        assert!((row.ebitda_change + 29.0).abs() < f64::EPSILON);
        assert_eq!(row.change_tone, DeltaTone::Negative);
        assert_eq!(row.contributions[0], 0.0);
    }

    #[test]
    fn test_baseline_rows() {
        let rows = baseline_rows(catalog());
        let revenue = &rows[LineItem::Revenue.index()];
        assert!((revenue.prior - 479_876.0).abs() < f64::EPSILON);
        assert!((revenue.planned - 519_253.0).abs() < f64::EPSILON);
        assert!((revenue.delta - 39_377.0).abs() < f64::EPSILON);
        assert_eq!(revenue.delta_tone, DeltaTone::Positive);
        assert!(!revenue.bold);

        let ebitda = &rows[LineItem::Ebitda.index()];
        assert!(ebitda.bold && ebitda.highlight);

        let tokyo = &rows[LineItem::Tokyo.index()];
        assert_eq!(tokyo.delta, 0.0);
        assert_eq!(tokyo.delta_tone, DeltaTone::Positive);

        let marketing = &rows[LineItem::Marketing.index()];
        assert_eq!(marketing.delta_tone, DeltaTone::Negative);
    }

    #[test]
    fn test_delta_tone_boundary() {
        assert_eq!(DeltaTone::of(0.0), DeltaTone::Positive);
        assert_eq!(DeltaTone::of(-0.1), DeltaTone::Negative);
    }
}
