//! Run configuration: which scenarios to evaluate and where to export.
//!
//! Run documents are YAML, checked in three layers:
//! - serde rejects unknown fields; a non-numeric contribution is reported
//!   as invalid input for its scenario
//! - `validator` enforces field constraints
//! - semantic validation checks names and preset references

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::catalog::{catalog, Catalog, GlobalParamId, VariableId};
use crate::error::{PnlError, PnlResult};
use crate::scenarios::{GlobalParams, ScenarioInput, VarValues};

/// Top-level run document.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Global tunables; omitted ids use catalog defaults.
    #[serde(default)]
    pub global_params: GlobalParams,

    /// Scenarios in report order.
    #[validate(length(min = 1))]
    pub scenarios: Vec<ScenarioSpec>,

    /// Export destination.
    #[validate(nested)]
    #[serde(default)]
    pub export: ExportOptions,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl RunConfig {
    /// Load a run document from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> PnlResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a run document from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> PnlResult<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| {
            serde_yaml::from_str::<serde_json::Value>(yaml)
                .ok()
                .and_then(|raw| non_numeric_contribution(&raw))
                .unwrap_or_else(|| e.into())
        })?;
        config.validate()?;
        config.validate_semantic(catalog())?;
        Ok(config)
    }

    /// Parse a run document from JSON.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_json(json: &str) -> PnlResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            serde_json::from_str::<serde_json::Value>(json)
                .ok()
                .and_then(|raw| non_numeric_contribution(&raw))
                .unwrap_or_else(|| e.into())
        })?;
        config.validate()?;
        config.validate_semantic(catalog())?;
        Ok(config)
    }

    /// Create a builder.
    #[must_use]
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    fn validate_semantic(&self, catalog: &Catalog) -> PnlResult<()> {
        let mut names = HashSet::new();
        for spec in &self.scenarios {
            spec.validate()?;
            if !names.insert(spec.name.as_str()) {
                return Err(PnlError::config(format!(
                    "duplicate scenario name '{}'",
                    spec.name
                )));
            }
            if let Some(preset) = &spec.preset {
                catalog.preset_values(preset)?;
            }
            spec.var_values
                .validate()
                .map_err(|e| e.in_scenario(&spec.name))?;
        }
        self.global_params.validate()
    }

    /// Expand every scenario into evaluator input.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown preset id.
    pub fn resolve_scenarios(&self) -> PnlResult<Vec<ScenarioInput>> {
        self.scenarios.iter().map(|s| s.resolve(catalog())).collect()
    }
}

/// First `var_values` entry in a raw document that is not a number.
fn non_numeric_contribution(raw: &serde_json::Value) -> Option<PnlError> {
    raw.get("scenarios")?
        .as_array()?
        .iter()
        .find_map(|scenario| {
            let name = scenario.get("name").and_then(serde_json::Value::as_str)?;
            let (key, value) = scenario
                .get("var_values")?
                .as_object()?
                .iter()
                .find(|(_, v)| !v.is_number())?;
            Some(
                PnlError::invalid_input(
                    format!("var_values.{key}"),
                    format!("expected a number, got {value}"),
                )
                .in_scenario(name),
            )
        })
}

/// One scenario as written in a run document.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ScenarioSpec {
    /// Display name, unique within the document.
    #[validate(length(min = 1))]
    pub name: String,
    /// Start from every variable's preset with this id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Explicit contributions, applied on top of the preset.
    #[serde(default)]
    pub var_values: VarValues,
}

impl ScenarioSpec {
    /// Scenario with explicit values only.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preset: None,
            var_values: VarValues::new(),
        }
    }

    /// Expand preset and overrides.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the preset id is unknown.
    pub fn resolve(&self, catalog: &Catalog) -> PnlResult<ScenarioInput> {
        let mut values = match &self.preset {
            Some(preset) => catalog.preset_values(preset)?,
            None => VarValues::new(),
        };
        values.extend_from(&self.var_values);
        Ok(ScenarioInput::new(self.name.clone(), values))
    }
}

/// Where and how the spreadsheet artifact is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ExportOptions {
    /// Output directory (created if missing).
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// File name prefix; a `_yyMMdd_HHmm.xlsx` suffix is appended.
    #[validate(length(min = 1))]
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_prefix() -> String {
    "KL_시뮬레이션".to_string()
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_prefix: default_file_prefix(),
        }
    }
}

/// Programmatic construction of a [`RunConfig`].
#[derive(Debug, Default)]
pub struct RunConfigBuilder {
    scenarios: Vec<ScenarioSpec>,
    global_params: GlobalParams,
    export: Option<ExportOptions>,
}

impl RunConfigBuilder {
    /// Add a scenario taken from a preset id.
    #[must_use]
    pub fn preset_scenario(mut self, name: impl Into<String>, preset: impl Into<String>) -> Self {
        let mut spec = ScenarioSpec::new(name);
        spec.preset = Some(preset.into());
        self.scenarios.push(spec);
        self
    }

    /// Add a scenario with explicit values.
    #[must_use]
    pub fn scenario(mut self, name: impl Into<String>, var_values: VarValues) -> Self {
        let mut spec = ScenarioSpec::new(name);
        spec.var_values = var_values;
        self.scenarios.push(spec);
        self
    }

    /// Override a global parameter.
    #[must_use]
    pub fn global_param(mut self, id: GlobalParamId, value: f64) -> Self {
        self.global_params = self.global_params.with(id, value);
        self
    }

    /// Set export options.
    #[must_use]
    pub fn export(mut self, export: ExportOptions) -> Self {
        self.export = Some(export);
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`RunConfig::from_yaml`] validation.
    pub fn build(self) -> PnlResult<RunConfig> {
        let config = RunConfig {
            schema_version: default_schema_version(),
            global_params: self.global_params,
            scenarios: self.scenarios,
            export: self.export.unwrap_or_default(),
        };
        config.validate()?;
        config.validate_semantic(catalog())?;
        Ok(config)
    }
}

/// A starter run document comparing every preset tier.
#[must_use]
pub fn sample_yaml() -> String {
    let mut out = String::from("schema_version: \"1.0\"\nglobal_params:\n  wage_rate: 4.0\nscenarios:\n");
    for (name, preset) in [("현재 계획", "plan"), ("가격 동결", "off")] {
        out.push_str(&format!("  - name: {name}\n    preset: {preset}\n"));
    }
    out.push_str(&format!(
        "  - name: 보수적\n    preset: plan\n    var_values:\n      {}: 4029373459\n      {}: -721605497\n",
        VariableId::PriceIncrease,
        VariableId::VolumeDecrease
    ));
    out.push_str("export:\n  directory: .\n  file_prefix: KL_시뮬레이션\n");
    out
}
