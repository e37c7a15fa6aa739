//! Scenario evaluation: variable contributions → projected P&L.
//!
//! Pure and deterministic. Each variable is a bottom-line (EBITDA) effect;
//! the revenue-moving ones are grossed up to revenue through a fixed margin,
//! but only when the contribution has the variable's expected sign. The
//! grossed-up revenue then flows through cost-of-goods, franchise gross
//! margin, variable and fixed costs to derive the projected ratios.
//!
//! Every percentage is guarded: when projected revenue is zero or negative
//! the ratio is reported as 0.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::input::{contribution_of, GlobalParams, VarValues};
use crate::catalog::{catalog, Catalog, GlobalParamId, LineItem, VariableId};
use crate::error::PnlResult;

/// Cost-of-goods share of incremental revenue.
pub const COGS_RATIO: f64 = 0.62;
/// Variable-cost share of incremental revenue.
pub const VARIABLE_COST_RATIO: f64 = 0.088;
/// Share of store-growth revenue booked in the franchise channel.
pub const FRANCHISE_STORE_SHARE: f64 = 0.7;
/// Share of the purchase-price reduction booked in the franchise channel.
pub const FRANCHISE_COST_SHARE: f64 = 0.8;
/// Share of fixed costs indexed to wages.
pub const WAGE_INDEXED_SHARE: f64 = 0.4;

/// Intermediate projected P&L lines (KRW, full precision).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPnl {
    /// Revenue implied by the sign-filtered contributions.
    pub revenue_delta: f64,
    /// Projected total revenue.
    pub revenue: f64,
    /// Projected cost of goods.
    pub cogs: f64,
    /// Projected gross profit.
    pub gross_profit: f64,
    /// Projected franchise-channel revenue.
    pub franchise_revenue: f64,
    /// Projected franchise-channel cost of goods.
    pub franchise_cogs: f64,
    /// Projected variable costs.
    pub variable_cost: f64,
    /// Projected contribution margin.
    pub contribution: f64,
    /// Projected fixed costs.
    pub fixed_cost: f64,
    /// Projected operating profit.
    pub operating_profit: f64,
}

/// Outcome of evaluating one scenario.
///
/// `*_prior` fields carry the reference period; `*_projected` fields the
/// projection. GP%, franchise GP% and OPM% are rounded to 2 decimals; all
/// other fields keep full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Prior-period EBITDA.
    pub ebitda_prior: f64,
    /// Projected EBITDA.
    pub ebitda_projected: f64,
    /// Sum of every contribution.
    pub ebitda_change: f64,
    /// Change relative to prior EBITDA (%).
    pub ebitda_change_pct: f64,
    /// Prior EBITDA margin (%).
    pub ebitda_pct_prior: f64,
    /// Projected EBITDA margin (%).
    pub ebitda_pct_projected: f64,
    /// Prior revenue.
    pub revenue_prior: f64,
    /// Projected revenue.
    pub revenue_projected: f64,
    /// Published prior gross margin (%).
    pub gp_pct_prior: f64,
    /// Projected gross margin (%).
    pub gp_pct_projected: f64,
    /// Published prior franchise gross margin (%).
    pub franchise_gp_pct_prior: f64,
    /// Projected franchise gross margin (%).
    pub franchise_gp_pct_projected: f64,
    /// Published prior operating margin (%).
    pub op_margin_pct_prior: f64,
    /// Projected operating margin (%).
    pub op_margin_pct_projected: f64,
    /// Projected P&L lines.
    pub pnl: ProjectedPnl,
    /// Contributions as supplied.
    pub var_values: VarValues,
}

/// `numerator / denominator * 100`, or 0 when the denominator is not positive.
#[must_use]
pub fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Round half to even at `decimals` places.
///
/// Rounds the exact binary value, so 0.35 (stored just below) becomes 0.3.
/// Scaling by a power of ten first would round the product instead.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    format!("{value:.*}", decimals as usize)
        .parse()
        .unwrap_or(value)
}

/// Grossed-up revenue for one variable (0 for cost levers or wrong sign).
#[must_use]
pub fn revenue_of(var_values: &VarValues, id: VariableId) -> f64 {
    id.revenue_conversion()
        .map_or(0.0, |conv| conv.revenue(contribution_of(var_values, id)))
}

/// Evaluate a scenario against the process-wide catalog.
///
/// # Errors
///
/// Returns [`crate::PnlError::InvalidInput`] for unknown variable ids or
/// non-finite values. Degenerate revenue is not an error.
pub fn evaluate(var_values: &VarValues, global_params: &GlobalParams) -> PnlResult<ScenarioResult> {
    evaluate_with(catalog(), var_values, global_params)
}

/// Evaluate a scenario against an explicit catalog.
///
/// # Errors
///
/// See [`evaluate`].
pub fn evaluate_with(
    catalog: &Catalog,
    var_values: &VarValues,
    global_params: &GlobalParams,
) -> PnlResult<ScenarioResult> {
    var_values.validate()?;
    global_params.validate()?;

    let baseline = &catalog.baseline;
    let ebitda_prior = baseline.value(LineItem::Ebitda);
    let revenue_prior = baseline.value(LineItem::Revenue);

    let total_impact = var_values.total();
    let ebitda_projected = ebitda_prior + total_impact;

    let price_rev = revenue_of(var_values, VariableId::PriceIncrease);
    let store_rev = revenue_of(var_values, VariableId::StoreIncrease);
    let beef_rev = revenue_of(var_values, VariableId::BeefExpansion);
    let overseas_rev = revenue_of(var_values, VariableId::Overseas);
    let volume_rev = revenue_of(var_values, VariableId::VolumeDecrease);
    let cost_reduction = contribution_of(var_values, VariableId::CostReduction);
    let marketing_saving = contribution_of(var_values, VariableId::MarketingEfficiency);

    let revenue_delta = price_rev + store_rev + beef_rev + overseas_rev + volume_rev;
    let other_revenue_delta =
        catalog.planned.value(LineItem::RevenueOther) - baseline.value(LineItem::RevenueOther);
    let revenue = revenue_prior + revenue_delta + other_revenue_delta;

    let cogs = baseline.value(LineItem::Cogs) + revenue_delta * COGS_RATIO - cost_reduction;
    let gross_profit = revenue - cogs;
    let gp_pct = percent_of(gross_profit, revenue);

    // overseas revenue is not booked in the franchise channel
    let franchise_revenue = baseline.value(LineItem::RevenueFranchise)
        + price_rev
        + store_rev * FRANCHISE_STORE_SHARE
        + beef_rev
        + volume_rev;
    let franchise_cogs =
        franchise_revenue * COGS_RATIO - cost_reduction * FRANCHISE_COST_SHARE;
    let franchise_gp_pct = percent_of(franchise_revenue - franchise_cogs, franchise_revenue);

    let variable_cost = baseline.value(LineItem::VariableCost) + revenue_delta * VARIABLE_COST_RATIO
        - marketing_saving;
    let contribution = gross_profit - variable_cost;

    let wage_rate = global_params.value(GlobalParamId::WageRate, catalog);
    let fixed_cost =
        baseline.value(LineItem::FixedCost) * (1.0 + wage_rate / 100.0 * WAGE_INDEXED_SHARE);
    let operating_profit = contribution - fixed_cost;
    let op_pct = percent_of(operating_profit, revenue);

    let ebitda_pct = percent_of(ebitda_projected, revenue);

    debug!(
        total_impact,
        ebitda_projected, revenue, gp_pct, op_pct, "scenario evaluated"
    );

    Ok(ScenarioResult {
        ebitda_prior,
        ebitda_projected,
        ebitda_change: total_impact,
        ebitda_change_pct: percent_of(total_impact, ebitda_prior),
        ebitda_pct_prior: percent_of(ebitda_prior, revenue_prior),
        ebitda_pct_projected: ebitda_pct,
        revenue_prior,
        revenue_projected: revenue,
        gp_pct_prior: catalog.ratios.gp.prior,
        gp_pct_projected: round_to(gp_pct, 2),
        franchise_gp_pct_prior: catalog.ratios.gp_franchise.prior,
        franchise_gp_pct_projected: round_to(franchise_gp_pct, 2),
        op_margin_pct_prior: catalog.ratios.op_margin.prior,
        op_margin_pct_projected: round_to(op_pct, 2),
        pnl: ProjectedPnl {
            revenue_delta,
            revenue,
            cogs,
            gross_profit,
            franchise_revenue,
            franchise_cogs,
            variable_cost,
            contribution,
            fixed_cost,
            operating_profit,
        },
        var_values: var_values.clone(),
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn contribution() -> impl Strategy<Value = f64> {
        -20_000_000_000.0f64..20_000_000_000.0
    }

    proptest! {
        /// EBITDA change is the plain sum of contributions, whatever the signs.
        #[test]
        fn prop_total_impact_is_sum(
            values in proptest::collection::vec(contribution(), 7),
        ) {
            let var_values: VarValues = VariableId::ALL.into_iter().zip(values.iter().copied()).collect();
            let result = evaluate(&var_values, &GlobalParams::new()).unwrap();
            let expected: f64 = values.iter().sum();
            prop_assert!((result.ebitda_change - expected).abs() < 1e-3);
            prop_assert!((result.ebitda_projected - (result.ebitda_prior + expected)).abs() < 1e-3);
        }

        /// Wrong-signed contributions never move revenue.
        #[test]
        fn prop_sign_filter_strict(
            price in -20_000_000_000.0f64..=0.0,
            volume in 0.0f64..20_000_000_000.0,
        ) {
            let var_values = VarValues::new()
                .with(VariableId::PriceIncrease, price)
                .with(VariableId::VolumeDecrease, volume);
            let result = evaluate(&var_values, &GlobalParams::new()).unwrap();
            prop_assert_eq!(result.pnl.revenue_delta, 0.0);
        }

        /// Percentages are always finite, even for degenerate revenue.
        #[test]
        fn prop_percentages_defined(
            volume in -5_000_000_000_000.0f64..0.0,
            price in 0.0f64..20_000_000_000.0,
        ) {
            let var_values = VarValues::new()
                .with(VariableId::VolumeDecrease, volume)
                .with(VariableId::PriceIncrease, price);
            let result = evaluate(&var_values, &GlobalParams::new()).unwrap();
            prop_assert!(result.gp_pct_projected.is_finite());
            prop_assert!(result.franchise_gp_pct_projected.is_finite());
            prop_assert!(result.op_margin_pct_projected.is_finite());
            prop_assert!(result.ebitda_pct_projected.is_finite());
            if result.revenue_projected <= 0.0 {
                prop_assert_eq!(result.gp_pct_projected, 0.0);
                prop_assert_eq!(result.op_margin_pct_projected, 0.0);
            }
        }

        /// Evaluation is deterministic.
        #[test]
        fn prop_deterministic(value in contribution()) {
            let var_values = VarValues::new().with(VariableId::BeefExpansion, value);
            let a = evaluate(&var_values, &GlobalParams::new()).unwrap();
            let b = evaluate(&var_values, &GlobalParams::new()).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
