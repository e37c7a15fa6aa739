//! Side-by-side evaluation of named scenarios.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::evaluator::{evaluate_with, ScenarioResult};
use super::input::{GlobalParams, ScenarioInput};
use crate::catalog::{catalog, Catalog};
use crate::error::PnlResult;

/// A scenario name paired with its evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedResult {
    /// Scenario name as supplied.
    pub name: String,
    /// Evaluation outcome.
    pub result: ScenarioResult,
}

/// Evaluate every scenario independently, preserving input order.
///
/// # Errors
///
/// Fails on the first scenario with invalid input; the error field is
/// prefixed with that scenario's name.
pub fn compare(scenarios: &[ScenarioInput], global_params: &GlobalParams) -> PnlResult<Vec<NamedResult>> {
    compare_with(catalog(), scenarios, global_params)
}

/// [`compare`] against an explicit catalog.
///
/// # Errors
///
/// See [`compare`].
pub fn compare_with(
    catalog: &Catalog,
    scenarios: &[ScenarioInput],
    global_params: &GlobalParams,
) -> PnlResult<Vec<NamedResult>> {
    scenarios
        .iter()
        .map(|scenario| {
            debug!(scenario = %scenario.name, "evaluating");
            evaluate_with(catalog, &scenario.var_values, global_params)
                .map(|result| NamedResult {
                    name: scenario.name.clone(),
                    result,
                })
                .map_err(|e| e.in_scenario(&scenario.name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VariableId;
    use crate::error::PnlError;
    use crate::scenarios::VarValues;

    fn scenarios() -> Vec<ScenarioInput> {
        vec![
            ScenarioInput::new("plan", catalog().default_values()),
            ScenarioInput::new("frozen", VarValues::new()),
            ScenarioInput::new(
                "cost only",
                VarValues::new().with(VariableId::CostReduction, 7_461_675_923.0),
            ),
        ]
    }

    #[test]
    fn test_compare_preserves_order_and_length() {
        let input = scenarios();
        let results = compare(&input, &GlobalParams::new()).unwrap();

        assert_eq!(results.len(), input.len());
        for (r, s) in results.iter().zip(&input) {
            assert_eq!(r.name, s.name);
            assert_eq!(r.result.var_values, s.var_values);
        }
    }

    #[test]
    fn test_compare_matches_independent_evaluation() {
        let input = scenarios();
        let results = compare(&input, &GlobalParams::new()).unwrap();
        let single = crate::scenarios::evaluate(&input[2].var_values, &GlobalParams::new()).unwrap();
        assert_eq!(results[2].result, single);
    }

    #[test]
    fn test_compare_empty() {
        let results = compare(&[], &GlobalParams::new()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_compare_reports_failing_scenario() {
        let mut input = scenarios();
        input[1]
            .var_values
            .set(VariableId::Overseas, f64::INFINITY);

        let err = compare(&input, &GlobalParams::new()).unwrap_err();
        match err {
            PnlError::InvalidInput { field, .. } => {
                assert_eq!(field, "frozen.var_values.overseas");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let input = vec![
            ScenarioInput::new("same", VarValues::new()),
            ScenarioInput::new("same", catalog().default_values()),
        ];
        let results = compare(&input, &GlobalParams::new()).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[1].result.ebitda_projected > results[0].result.ebitda_projected);
    }
}
