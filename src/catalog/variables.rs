//! The seven scenario variables and their preset options.
//!
//! Every variable is expressed as a signed bottom-line (EBITDA) contribution in
//! KRW. Presets are the options offered to a planner; `custom_range` bounds
//! free-form input; `base_impact` is the figure in the current plan.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical scenario variable identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableId {
    /// Consumer and franchise supply price increase.
    PriceIncrease,
    /// Customer-count loss caused by the price increase.
    VolumeDecrease,
    /// Net new franchise stores.
    StoreIncrease,
    /// Overseas royalties and exports.
    Overseas,
    /// Beef burger mix and griddle rollout.
    BeefExpansion,
    /// Marketing spend ratio improvement.
    MarketingEfficiency,
    /// Raw material (chicken) purchase price reduction.
    CostReduction,
}

/// Sign a contribution must have before it is converted into revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedSign {
    /// Only strictly positive contributions convert.
    Positive,
    /// Only strictly negative contributions convert.
    Negative,
}

impl ExpectedSign {
    /// Whether `value` has this sign (zero never does).
    #[must_use]
    pub fn admits(self, value: f64) -> bool {
        match self {
            Self::Positive => value > 0.0,
            Self::Negative => value < 0.0,
        }
    }
}

/// Bottom-line to gross-revenue conversion for a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueConversion {
    /// Bottom-line share of each revenue unit; revenue = contribution / margin.
    pub margin: f64,
    /// Contributions of the other sign add nothing to revenue.
    pub sign: ExpectedSign,
}

impl RevenueConversion {
    /// Gross revenue implied by `contribution`, or 0 when the sign is wrong.
    #[must_use]
    pub fn revenue(&self, contribution: f64) -> f64 {
        if self.sign.admits(contribution) {
            contribution / self.margin
        } else {
            0.0
        }
    }
}

impl VariableId {
    /// All variables in catalog order.
    pub const ALL: [Self; 7] = [
        Self::PriceIncrease,
        Self::VolumeDecrease,
        Self::StoreIncrease,
        Self::Overseas,
        Self::BeefExpansion,
        Self::MarketingEfficiency,
        Self::CostReduction,
    ];

    /// Wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceIncrease => "price_increase",
            Self::VolumeDecrease => "volume_decrease",
            Self::StoreIncrease => "store_increase",
            Self::Overseas => "overseas",
            Self::BeefExpansion => "beef_expansion",
            Self::MarketingEfficiency => "marketing_efficiency",
            Self::CostReduction => "cost_reduction",
        }
    }

    /// Short column heading used in comparison reports.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::PriceIncrease => "Price",
            Self::VolumeDecrease => "Volume",
            Self::StoreIncrease => "Stores",
            Self::Overseas => "Overseas",
            Self::BeefExpansion => "Beef",
            Self::MarketingEfficiency => "Marketing",
            Self::CostReduction => "Cost",
        }
    }

    /// Revenue conversion, if this variable moves gross revenue at all.
    ///
    /// Marketing efficiency and cost reduction act on cost lines only.
    #[must_use]
    pub const fn revenue_conversion(self) -> Option<RevenueConversion> {
        let (margin, sign) = match self {
            Self::PriceIncrease => (0.55, ExpectedSign::Positive),
            Self::VolumeDecrease => (0.38, ExpectedSign::Negative),
            Self::StoreIncrease => (0.38, ExpectedSign::Positive),
            Self::Overseas => (0.74, ExpectedSign::Positive),
            Self::BeefExpansion => (0.36, ExpectedSign::Positive),
            Self::MarketingEfficiency | Self::CostReduction => return None,
        };
        Some(RevenueConversion { margin, sign })
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown variable id '{s}'"))
    }
}

/// A selectable option for a variable.
#[derive(Debug, Clone, Serialize)]
pub struct Preset {
    /// Preset key, unique within its variable.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Signed bottom-line contribution in KRW.
    pub value: f64,
    /// What the option assumes.
    pub detail: &'static str,
    /// Whether this is the planned option.
    pub is_default: bool,
}

/// Informational driver behind a variable (not read by the evaluator).
#[derive(Debug, Clone, Serialize)]
pub struct SubParameter {
    /// Parameter key.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Planned value.
    pub default: f64,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Input step.
    pub step: f64,
}

/// Bounds on free-form input for a variable.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CustomRange {
    /// Lower bound (KRW).
    pub min: f64,
    /// Upper bound (KRW).
    pub max: f64,
    /// Input step (KRW).
    pub step: f64,
}

impl CustomRange {
    /// Whether `value` lies inside the bounds (inclusive).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Descriptive metadata for one scenario variable.
#[derive(Debug, Clone, Serialize)]
pub struct VariableDefinition {
    /// Canonical identifier.
    pub id: VariableId,
    /// Display label.
    pub label: &'static str,
    /// What the variable models.
    pub description: &'static str,
    /// Display unit.
    pub unit: &'static str,
    /// Ordered preset options.
    pub presets: Vec<Preset>,
    /// Underlying drivers, informational only.
    pub sub_params: Vec<SubParameter>,
    /// Bounds on custom input.
    pub custom_range: CustomRange,
    /// Contribution used when no override is given.
    pub base_impact: f64,
}

impl VariableDefinition {
    /// Look up a preset by id.
    #[must_use]
    pub fn preset(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// The preset flagged as default, if exactly one is.
    #[must_use]
    pub fn default_preset(&self) -> Option<&Preset> {
        let mut defaults = self.presets.iter().filter(|p| p.is_default);
        match (defaults.next(), defaults.next()) {
            (Some(p), None) => Some(p),
            _ => None,
        }
    }
}

const fn preset(
    id: &'static str,
    label: &'static str,
    value: f64,
    detail: &'static str,
) -> Preset {
    Preset {
        id,
        label,
        value,
        detail,
        is_default: false,
    }
}

const fn planned(value: f64, detail: &'static str) -> Preset {
    Preset {
        id: "plan",
        label: "현재 계획",
        value,
        detail,
        is_default: true,
    }
}

const fn sub(
    id: &'static str,
    label: &'static str,
    default: f64,
    min: f64,
    max: f64,
    step: f64,
) -> SubParameter {
    SubParameter {
        id,
        label,
        default,
        min,
        max,
        step,
    }
}

const fn range(min: f64, max: f64, step: f64) -> CustomRange {
    CustomRange { min, max, step }
}

/// Build the seven variable definitions in catalog order.
#[must_use]
pub fn definitions() -> Vec<VariableDefinition> {
    vec![
        VariableDefinition {
            id: VariableId::PriceIncrease,
            label: "① 가격인상",
            description: "소비자가/물대 인상 수준",
            unit: "억원",
            presets: vec![
                preset("off", "미인상", 0.0, "가격 동결"),
                preset("half", "50% 수준", 4_029_373_459.0, "버거 150원, 치킨 500원 인상"),
                planned(8_058_746_918.0, "버거 300원, 빅싸이 1,000원, 맥스 1,500원"),
                preset(
                    "high",
                    "강하게 인상",
                    12_088_120_377.0,
                    "버거 500원, 빅싸이 1,500원, 맥스 2,000원",
                ),
            ],
            sub_params: Vec::new(),
            custom_range: range(0.0, 20_000_000_000.0, 500_000_000.0),
            base_impact: 8_058_746_918.0,
        },
        VariableDefinition {
            id: VariableId::VolumeDecrease,
            label: "② 판매량 감소",
            description: "가격인상에 따른 TC(고객수) 감소",
            unit: "억원",
            presets: vec![
                preset("none", "감소 없음", 0.0, "TC 변동 없음"),
                preset("mild", "소폭 감소", -721_605_497.0, "TC 3.7%, 3개월 감소"),
                planned(-1_443_210_994.0, "TC 7.4%, 3개월 감소"),
                preset("severe", "대폭 감소", -2_886_421_988.0, "TC 15%, 3개월 감소"),
            ],
            sub_params: vec![
                sub("tc_rate", "TC 감소율(%)", 7.43, 0.0, 30.0, 0.5),
                sub("tc_months", "감소기간(개월)", 3.0, 1.0, 12.0, 1.0),
            ],
            custom_range: range(-5_000_000_000.0, 0.0, 100_000_000.0),
            base_impact: -1_443_210_994.0,
        },
        VariableDefinition {
            id: VariableId::StoreIncrease,
            label: "③ 매장순증",
            description: "신규 매장 오픈에 따른 매출 증분",
            unit: "억원",
            presets: vec![
                preset("none", "순증 없음", 0.0, "매장수 유지"),
                preset("low", "30개 순증", 4_501_279_181.0, "터치 25개 + 피자 5개"),
                planned(7_502_131_968.0, "터치 약 50개 순증 (1,453→1,503)"),
                preset("high", "80개 순증", 12_003_411_149.0, "터치 70개 + 피자 10개"),
            ],
            sub_params: vec![sub("new_stores", "순증 매장수", 50.5, 0.0, 150.0, 5.0)],
            custom_range: range(0.0, 20_000_000_000.0, 500_000_000.0),
            base_impact: 7_502_131_968.0,
        },
        VariableDefinition {
            id: VariableId::Overseas,
            label: "④ 해외순증",
            description: "해외매장 확대에 따른 로열티/수출 증분",
            unit: "억원",
            presets: vec![
                preset("none", "증분 없음", 0.0, "해외 현상 유지"),
                planned(498_445_256.0, "26년 1월 매출 연환산 기준"),
                preset("high", "적극 확대", 996_890_512.0, "MF 및 해외매장 적극 확대"),
            ],
            sub_params: Vec::new(),
            custom_range: range(0.0, 3_000_000_000.0, 100_000_000.0),
            base_impact: 498_445_256.0,
        },
        VariableDefinition {
            id: VariableId::BeefExpansion,
            label: "⑤ 비프매출 증대",
            description: "비프버거 MIX 증대 & 설치매장 확대",
            unit: "억원",
            presets: vec![
                preset("none", "미반영", 0.0, "비프 확대 없음"),
                preset(
                    "conservative",
                    "보수적",
                    1_440_402_856.0,
                    "MIX 3.7%→4.3%, 매장 200개 확대",
                ),
                planned(2_880_805_712.0, "MIX 3.7%→5.0%, 매장 452개 확대"),
                preset(
                    "aggressive",
                    "적극적",
                    4_321_208_568.0,
                    "MIX 3.7%→6.0%, 매장 600개 확대",
                ),
            ],
            sub_params: vec![
                sub("beef_mix_target", "비프 MIX 목표(%)", 5.0, 3.7, 10.0, 0.5),
                sub("beef_stores", "그리들 설치매장수", 452.0, 0.0, 1000.0, 50.0),
            ],
            custom_range: range(0.0, 8_000_000_000.0, 200_000_000.0),
            base_impact: 2_880_805_712.0,
        },
        VariableDefinition {
            id: VariableId::MarketingEfficiency,
            label: "⑥ 마케팅 효율",
            description: "매출 대비 마케팅비율 개선",
            unit: "억원",
            presets: vec![
                preset("none", "개선 없음", 0.0, "마케팅비율 유지 (3.16%)"),
                planned(311_569_324.0, "0.3%p 개선 (3.16%→2.86%)"),
                preset(
                    "target",
                    "Target 달성",
                    2_895_336_075.0,
                    "과거 6Q 평균 Target (2.39%) 달성",
                ),
            ],
            sub_params: vec![sub("mkt_improvement", "마케팅비 개선(%p)", 0.3, 0.0, 1.5, 0.1)],
            custom_range: range(0.0, 5_000_000_000.0, 100_000_000.0),
            base_impact: 311_569_324.0,
        },
        VariableDefinition {
            id: VariableId::CostReduction,
            label: "⑦ 매입가인하",
            description: "원재료(닭고기) 매입단가 인하 전망",
            unit: "억원",
            presets: vec![
                preset("none", "인하 없음", 0.0, "현재 매입가 유지"),
                preset("mild", "소폭 인하", 2_487_225_308.0, "오퍼가 7% 인하 (10월부터)"),
                planned(4_974_450_615.0, "오퍼가 2.2불 수준 (13% 인하, 8월부터)"),
                preset(
                    "full",
                    "대폭 인하",
                    7_461_675_923.0,
                    "오퍼가 2.0불 수준 (20% 인하, 7월부터)",
                ),
            ],
            sub_params: vec![
                sub("cost_reduction_pct", "매입가 인하율(%)", 13.0, 0.0, 30.0, 1.0),
                sub("cost_reduction_month", "적용 시작월", 8.0, 1.0, 12.0, 1.0),
            ],
            custom_range: range(0.0, 12_000_000_000.0, 500_000_000.0),
            base_impact: 4_974_450_615.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_id_round_trip_str() {
        for id in VariableId::ALL {
            assert_eq!(id.as_str().parse::<VariableId>(), Ok(id));
        }
        assert!("price".parse::<VariableId>().is_err());
    }

    #[test]
    fn test_variable_id_serde_matches_as_str() {
        for id in VariableId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn test_revenue_conversion_sign_filter() {
        let price = VariableId::PriceIncrease.revenue_conversion().unwrap();
        assert!((price.revenue(55.0) - 100.0).abs() < 1e-9);
        assert_eq!(price.revenue(-55.0), 0.0);
        assert_eq!(price.revenue(0.0), 0.0);

        let volume = VariableId::VolumeDecrease.revenue_conversion().unwrap();
        assert!((volume.revenue(-38.0) + 100.0).abs() < 1e-9);
        assert_eq!(volume.revenue(38.0), 0.0);
    }

    #[test]
    fn test_cost_levers_have_no_revenue_conversion() {
        assert!(VariableId::MarketingEfficiency.revenue_conversion().is_none());
        assert!(VariableId::CostReduction.revenue_conversion().is_none());
    }

    #[test]
    fn test_definitions_cover_all_ids_in_order() {
        let ids: Vec<_> = definitions().iter().map(|d| d.id).collect();
        assert_eq!(ids, VariableId::ALL.to_vec());
    }

    #[test]
    fn test_default_preset_matches_base_impact() {
        for def in definitions() {
            let preset = def.default_preset().unwrap();
            assert_eq!(preset.id, "plan");
            assert!((preset.value - def.base_impact).abs() < f64::EPSILON, "{}", def.id);
        }
    }

    #[test]
    fn test_default_preset_rejects_ambiguity() {
        let mut def = definitions().remove(0);
        def.presets[0].is_default = true;
        assert!(def.default_preset().is_none());
    }

    #[test]
    fn test_presets_inside_custom_range() {
        for def in definitions() {
            for p in &def.presets {
                assert!(def.custom_range.contains(p.value), "{}:{}", def.id, p.id);
            }
        }
    }
}
