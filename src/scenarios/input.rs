//! Request-scoped scenario inputs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{Catalog, GlobalParamId, VariableId};
use crate::error::{PnlError, PnlResult};

/// Variable id → signed bottom-line contribution (KRW).
///
/// Keys are kept as supplied so that malformed input can be reported rather
/// than dropped during deserialization. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarValues(IndexMap<String, f64>);

impl VarValues {
    /// Empty mapping (every contribution is 0).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a contribution.
    pub fn set(&mut self, id: VariableId, value: f64) {
        self.0.insert(id.as_str().to_string(), value);
    }

    /// Builder-style [`VarValues::set`].
    #[must_use]
    pub fn with(mut self, id: VariableId, value: f64) -> Self {
        self.set(id, value);
        self
    }

    /// Overlay `other` on top of `self`.
    pub fn extend_from(&mut self, other: &Self) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), *v);
        }
    }

    /// Raw entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of supplied entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of every supplied contribution.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Reject unknown variable ids and non-finite values.
    ///
    /// # Errors
    ///
    /// Returns [`PnlError::InvalidInput`] naming the first offending key.
    pub fn validate(&self) -> PnlResult<()> {
        for (key, value) in &self.0 {
            let field = format!("var_values.{key}");
            if key.parse::<VariableId>().is_err() {
                return Err(PnlError::invalid_input(field, "unknown variable id"));
            }
            if !value.is_finite() {
                return Err(PnlError::invalid_input(
                    field,
                    format!("value must be finite, got {value}"),
                ));
            }
        }
        Ok(())
    }

    /// Variables whose value lies outside their catalog custom range.
    #[must_use]
    pub fn out_of_range(&self, catalog: &Catalog) -> Vec<VariableId> {
        VariableId::ALL
            .into_iter()
            .filter(|&id| {
                let Some(&value) = self.0.get(id.as_str()) else {
                    return false;
                };
                catalog
                    .variable(id)
                    .is_some_and(|def| !def.custom_range.contains(value))
            })
            .collect()
    }

    /// Warn about values outside their variable's custom range.
    ///
    /// Out-of-range values are still evaluated; the range only bounds what a
    /// front end offers. Returns the number of warnings emitted.
    pub fn warn_out_of_range(&self, catalog: &Catalog) -> usize {
        let flagged = self.out_of_range(catalog);
        for &id in &flagged {
            if let Some(def) = catalog.variable(id) {
                warn!(
                    variable = id.as_str(),
                    value = contribution_of(self, id),
                    min = def.custom_range.min,
                    max = def.custom_range.max,
                    "contribution outside custom range"
                );
            }
        }
        flagged.len()
    }
}

impl FromIterator<(VariableId, f64)> for VarValues {
    fn from_iter<T: IntoIterator<Item = (VariableId, f64)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, v)| (id.as_str().to_string(), v))
                .collect(),
        )
    }
}

/// Contribution of one variable, 0 when absent.
#[must_use]
pub fn contribution_of(var_values: &VarValues, id: VariableId) -> f64 {
    var_values.0.get(id.as_str()).copied().unwrap_or(0.0)
}

/// Global tunables keyed by id.
///
/// Unrecognized ids are ignored; missing ids fall back to the catalog
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalParams(IndexMap<String, f64>);

impl GlobalParams {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style override.
    #[must_use]
    pub fn with(mut self, id: GlobalParamId, value: f64) -> Self {
        self.0.insert(id.as_str().to_string(), value);
        self
    }

    /// Supplied value or the catalog default.
    #[must_use]
    pub fn value(&self, id: GlobalParamId, catalog: &Catalog) -> f64 {
        self.0
            .get(id.as_str())
            .copied()
            .unwrap_or_else(|| catalog.global_default(id))
    }

    /// Reject non-finite values for recognized ids.
    ///
    /// # Errors
    ///
    /// Returns [`PnlError::InvalidInput`] naming the offending parameter.
    pub fn validate(&self) -> PnlResult<()> {
        for id in GlobalParamId::ALL {
            if let Some(value) = self.0.get(id.as_str()) {
                if !value.is_finite() {
                    return Err(PnlError::invalid_input(
                        format!("global_params.{id}"),
                        format!("value must be finite, got {value}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A named set of contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contributions; omitted variables contribute 0.
    #[serde(default)]
    pub var_values: VarValues,
}

impl ScenarioInput {
    /// Create a scenario.
    #[must_use]
    pub fn new(name: impl Into<String>, var_values: VarValues) -> Self {
        Self {
            name: name.into(),
            var_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_out_of_range_lists_offenders() {
        let values = VarValues::new()
            .with(VariableId::PriceIncrease, 25_000_000_000.0)
            .with(VariableId::VolumeDecrease, 1_000_000.0)
            .with(VariableId::Overseas, 1_000_000_000.0);
        assert_eq!(
            values.out_of_range(catalog()),
            vec![VariableId::PriceIncrease, VariableId::VolumeDecrease]
        );
        assert!(catalog().default_values().out_of_range(catalog()).is_empty());
    }

    #[test]
    fn test_warn_out_of_range_logs_each_offender() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .finish();
        let values = VarValues::new()
            .with(VariableId::PriceIncrease, 25_000_000_000.0)
            .with(VariableId::Overseas, 1_000_000_000.0);

        let warned = tracing::subscriber::with_default(subscriber, || {
            values.warn_out_of_range(catalog())
        });

        assert_eq!(warned, 1);
        let text = log.contents();
        assert!(text.contains("WARN"));
        assert!(text.contains("contribution outside custom range"));
        assert!(text.contains("price_increase"));
        assert!(!text.contains("overseas"));
    }

    #[test]
    fn test_contribution_of_absent_is_zero() {
        let values = VarValues::new().with(VariableId::Overseas, 5.0);
        assert!((contribution_of(&values, VariableId::Overseas) - 5.0).abs() < f64::EPSILON);
        assert_eq!(contribution_of(&values, VariableId::PriceIncrease), 0.0);
    }

    #[test]
    fn test_total_sums_signed_values() {
        let values = VarValues::new()
            .with(VariableId::PriceIncrease, 10.0)
            .with(VariableId::VolumeDecrease, -4.0);
        assert!((values.total() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_unknown_id() {
        let values: VarValues = serde_json::from_str(r#"{"price_hike": 1.0}"#).unwrap();
        let err = values.validate().unwrap_err();
        match err {
            PnlError::InvalidInput { field, reason } => {
                assert_eq!(field, "var_values.price_hike");
                assert!(reason.contains("unknown"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_nan() {
        let values = VarValues::new().with(VariableId::CostReduction, f64::NAN);
        assert!(matches!(
            values.validate(),
            Err(PnlError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_non_numeric_value_fails_to_parse() {
        let parsed = serde_json::from_str::<VarValues>(r#"{"overseas": "lots"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_extend_from_overrides() {
        let mut base = catalog().default_values();
        let overrides = VarValues::new().with(VariableId::PriceIncrease, 0.0);
        base.extend_from(&overrides);
        assert_eq!(base.len(), 7);
        assert_eq!(contribution_of(&base, VariableId::PriceIncrease), 0.0);
    }

    #[test]
    fn test_global_params_default_fallback() {
        let params = GlobalParams::new();
        assert!((params.value(GlobalParamId::WageRate, catalog()) - 4.0).abs() < f64::EPSILON);

        let params = params.with(GlobalParamId::WageRate, 6.5);
        assert!((params.value(GlobalParamId::WageRate, catalog()) - 6.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_global_params_ignore_unknown() {
        let params: GlobalParams =
            serde_json::from_str(r#"{"wage_rate": 5.0, "moon_phase": 3.0}"#).unwrap();
        params.validate().unwrap();
        assert!((params.value(GlobalParamId::WageRate, catalog()) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_global_params_reject_infinite() {
        let params = GlobalParams::new().with(GlobalParamId::WageRate, f64::INFINITY);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_scenario_input_missing_fields_default() {
        let input: ScenarioInput = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_empty());
        assert!(input.var_values.is_empty());
    }
}
