//! Scenario definition catalog and reference financials.
//!
//! The catalog is compiled in, built once on first access and never mutated.
//! Everything the evaluator anchors on (prior actuals, planned figures) and
//! everything a front end needs to offer choices (variables, presets, global
//! parameters, market context) is reachable from [`catalog()`].

pub mod baseline;
pub mod market;
pub mod params;
pub mod variables;

use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;

pub use baseline::{
    BaselineEntry, BaselineSnapshot, LineItem, MarginRatios, PlannedSnapshot, RatioPair,
};
pub use market::{CompetitorProduct, CompetitorTable, QuarterlyPoint};
pub use params::{GlobalParamId, GlobalParameter};
pub use variables::{
    CustomRange, ExpectedSign, Preset, RevenueConversion, SubParameter, VariableDefinition,
    VariableId,
};

use crate::error::{PnlError, PnlResult};
use crate::scenarios::VarValues;

/// Read-only reference data served to every request.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    /// Scenario variables in display order.
    pub variables: Vec<VariableDefinition>,
    /// Global tunables.
    pub global_params: Vec<GlobalParameter>,
    /// Prior-period actuals.
    pub baseline: BaselineSnapshot,
    /// Planned-period figures.
    pub planned: PlannedSnapshot,
    /// Published headline ratios.
    pub ratios: MarginRatios,
    /// Competitor price table.
    pub competitors: CompetitorTable,
    /// Quarterly gross-margin history.
    pub quarterly_gp: Vec<QuarterlyPoint>,
}

/// The process-wide catalog.
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::builtin)
}

impl Catalog {
    /// Assemble the compiled-in reference data.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            variables: variables::definitions(),
            global_params: params::definitions(),
            baseline: baseline::prior_actuals(),
            planned: baseline::planned_figures(),
            ratios: baseline::ratios(),
            competitors: market::competitors(),
            quarterly_gp: market::quarterly_gross_margin(),
        }
    }

    /// Definition of a variable.
    #[must_use]
    pub fn variable(&self, id: VariableId) -> Option<&VariableDefinition> {
        self.variables.iter().find(|v| v.id == id)
    }

    /// Definition of a global parameter.
    #[must_use]
    pub fn global_param(&self, id: GlobalParamId) -> Option<&GlobalParameter> {
        self.global_params.iter().find(|p| p.id == id)
    }

    /// Default for a global parameter.
    #[must_use]
    pub fn global_default(&self, id: GlobalParamId) -> f64 {
        self.global_param(id).map_or(0.0, |p| p.default)
    }

    /// Values from every variable's preset named `preset_id`.
    ///
    /// Variables without such a preset are left out (no contribution).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no variable has the preset.
    pub fn preset_values(&self, preset_id: &str) -> PnlResult<VarValues> {
        let values: VarValues = self
            .variables
            .iter()
            .filter_map(|v| v.preset(preset_id).map(|p| (v.id, p.value)))
            .collect();
        if values.is_empty() {
            return Err(PnlError::config(format!(
                "no variable defines a preset named '{preset_id}'"
            )));
        }
        Ok(values)
    }

    /// Values from every variable's default preset.
    #[must_use]
    pub fn default_values(&self) -> VarValues {
        self.variables
            .iter()
            .filter_map(|v| v.default_preset().map(|p| (v.id, p.value)))
            .collect()
    }

    /// Values from every variable's base impact.
    #[must_use]
    pub fn base_values(&self) -> VarValues {
        self.variables.iter().map(|v| (v.id, v.base_impact)).collect()
    }

    /// Check the catalog's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first broken invariant:
    /// duplicate variable or preset ids, a variable without exactly one
    /// default preset, or a preset outside its variable's custom range.
    pub fn validate(&self) -> PnlResult<()> {
        let mut seen = HashSet::new();
        for var in &self.variables {
            if !seen.insert(var.id) {
                return Err(PnlError::config(format!("duplicate variable '{}'", var.id)));
            }

            let mut preset_ids = HashSet::new();
            for preset in &var.presets {
                if !preset_ids.insert(preset.id) {
                    return Err(PnlError::config(format!(
                        "duplicate preset '{}' in '{}'",
                        preset.id, var.id
                    )));
                }
                if !var.custom_range.contains(preset.value) {
                    return Err(PnlError::config(format!(
                        "preset '{}' of '{}' lies outside the custom range",
                        preset.id, var.id
                    )));
                }
            }

            let defaults = var.presets.iter().filter(|p| p.is_default).count();
            if defaults != 1 {
                return Err(PnlError::config(format!(
                    "'{}' has {defaults} default presets, expected exactly one",
                    var.id
                )));
            }
        }
        Ok(())
    }
}
