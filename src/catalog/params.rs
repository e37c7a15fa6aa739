//! Global tunables shared by every scenario.
//!
//! Only `wage_rate` feeds the projection (fixed-cost inflation). The other
//! four are published for the planner's context and accepted on input, but
//! the evaluator does not read them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Global parameter identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalParamId {
    /// Month the price increase takes effect.
    IncreaseMonth,
    /// Share of the increase absorbed by headquarters (%).
    HqShare,
    /// Consumer price inflation (%).
    CpiRate,
    /// Wage growth (%), drives fixed-cost inflation.
    WageRate,
    /// Baseline cost-of-goods ratio (%).
    BaseCostRatio,
}

impl GlobalParamId {
    /// All parameters in catalog order.
    pub const ALL: [Self; 5] = [
        Self::IncreaseMonth,
        Self::HqShare,
        Self::CpiRate,
        Self::WageRate,
        Self::BaseCostRatio,
    ];

    /// Wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IncreaseMonth => "increase_month",
            Self::HqShare => "hq_share",
            Self::CpiRate => "cpi_rate",
            Self::WageRate => "wage_rate",
            Self::BaseCostRatio => "base_cost_ratio",
        }
    }
}

impl fmt::Display for GlobalParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlobalParamId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown global parameter '{s}'"))
    }
}

/// Metadata for a global parameter.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalParameter {
    /// Identifier.
    pub id: GlobalParamId,
    /// Display label.
    pub label: &'static str,
    /// Value used when the caller omits it.
    pub default: f64,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Input step.
    pub step: f64,
}

/// Build the five global parameter definitions.
#[must_use]
pub fn definitions() -> Vec<GlobalParameter> {
    vec![
        GlobalParameter {
            id: GlobalParamId::IncreaseMonth,
            label: "가격인상 시점(월)",
            default: 3.0,
            min: 1.0,
            max: 12.0,
            step: 1.0,
        },
        GlobalParameter {
            id: GlobalParamId::HqShare,
            label: "본사 분담비중(%)",
            default: 50.0,
            min: 0.0,
            max: 100.0,
            step: 1.0,
        },
        GlobalParameter {
            id: GlobalParamId::CpiRate,
            label: "물가상승률(%)",
            default: 1.31,
            min: 0.0,
            max: 10.0,
            step: 0.1,
        },
        GlobalParameter {
            id: GlobalParamId::WageRate,
            label: "임금상승률(%)",
            default: 4.0,
            min: 0.0,
            max: 15.0,
            step: 0.5,
        },
        GlobalParameter {
            id: GlobalParamId::BaseCostRatio,
            label: "Base 원가율(%)",
            default: 61.83,
            min: 50.0,
            max: 80.0,
            step: 0.5,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wage_rate_default_is_four() {
        let wage = definitions()
            .into_iter()
            .find(|p| p.id == GlobalParamId::WageRate)
            .unwrap();
        assert!((wage.default - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_defaults_within_bounds() {
        for p in definitions() {
            assert!(p.default >= p.min && p.default <= p.max, "{}", p.id);
        }
    }

    #[test]
    fn test_param_id_parse() {
        assert_eq!("cpi_rate".parse::<GlobalParamId>(), Ok(GlobalParamId::CpiRate));
        assert!("inflation".parse::<GlobalParamId>().is_err());
    }
}
