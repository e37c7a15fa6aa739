//! Reference P&L snapshots: prior-period actuals and the planned period.
//!
//! Amounts are KRW. The prior snapshot anchors every projection; the planned
//! snapshot only contributes the other-revenue delta to the projection and
//! the "planned" column of the baseline report.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// P&L line items in statement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineItem {
    /// Total revenue.
    Revenue,
    /// Franchise revenue.
    RevenueFranchise,
    /// Franchise revenue, burger brand.
    RevenueFranchiseTouch,
    /// Franchise revenue, pizza brand.
    RevenueFranchisePizza,
    /// Directly operated stores.
    RevenueDirect,
    /// Distribution business.
    RevenueDist,
    /// Other revenue.
    RevenueOther,
    /// Cost of goods sold.
    Cogs,
    /// Gross profit.
    GrossProfit,
    /// Variable costs.
    VariableCost,
    /// Marketing.
    Marketing,
    /// Branch commissions.
    Commission,
    /// Delivery.
    Delivery,
    /// Contribution margin.
    Contribution,
    /// Fixed costs.
    FixedCost,
    /// Operating profit.
    OpProfit,
    /// Subsidiary result.
    Subsidiary,
    /// Tokyo entity result.
    Tokyo,
    /// Consolidated operating profit.
    ConsolOp,
    /// Depreciation and amortisation.
    Da,
    /// Consolidated EBITDA.
    Ebitda,
}

impl LineItem {
    /// Number of line items.
    pub const COUNT: usize = 21;

    /// All line items in statement order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Revenue,
        Self::RevenueFranchise,
        Self::RevenueFranchiseTouch,
        Self::RevenueFranchisePizza,
        Self::RevenueDirect,
        Self::RevenueDist,
        Self::RevenueOther,
        Self::Cogs,
        Self::GrossProfit,
        Self::VariableCost,
        Self::Marketing,
        Self::Commission,
        Self::Delivery,
        Self::Contribution,
        Self::FixedCost,
        Self::OpProfit,
        Self::Subsidiary,
        Self::Tokyo,
        Self::ConsolOp,
        Self::Da,
        Self::Ebitda,
    ];

    /// Position in statement order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::RevenueFranchise => "revenue_franchise",
            Self::RevenueFranchiseTouch => "revenue_franchise_t",
            Self::RevenueFranchisePizza => "revenue_franchise_p",
            Self::RevenueDirect => "revenue_direct",
            Self::RevenueDist => "revenue_dist",
            Self::RevenueOther => "revenue_other",
            Self::Cogs => "cogs",
            Self::GrossProfit => "gross_profit",
            Self::VariableCost => "variable_cost",
            Self::Marketing => "marketing",
            Self::Commission => "commission",
            Self::Delivery => "delivery",
            Self::Contribution => "contribution",
            Self::FixedCost => "fixed_cost",
            Self::OpProfit => "op_profit",
            Self::Subsidiary => "subsidiary",
            Self::Tokyo => "tokyo",
            Self::ConsolOp => "consol_op",
            Self::Da => "da",
            Self::Ebitda => "ebitda",
        }
    }
}

impl Serialize for LineItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// One row of the prior-period statement.
#[derive(Debug, Clone, Serialize)]
pub struct BaselineEntry {
    /// Line item.
    pub item: LineItem,
    /// Display label (indented for sub-items).
    pub label: &'static str,
    /// Prior-period actual (KRW).
    pub prior: f64,
    /// Subtotal row, rendered bold.
    pub bold: bool,
    /// Headline row, rendered highlighted.
    pub highlight: bool,
}

/// Prior-period actuals.
#[derive(Debug, Clone, Serialize)]
pub struct BaselineSnapshot {
    entries: [BaselineEntry; LineItem::COUNT],
}

impl BaselineSnapshot {
    /// Entries in statement order.
    #[must_use]
    pub fn entries(&self) -> &[BaselineEntry] {
        &self.entries
    }

    /// Entry for a line item.
    #[must_use]
    pub fn entry(&self, item: LineItem) -> &BaselineEntry {
        &self.entries[item.index()]
    }

    /// Prior-period actual for a line item.
    #[must_use]
    pub fn value(&self, item: LineItem) -> f64 {
        self.entry(item).prior
    }
}

/// Planned-period figures.
///
/// Serializes as a map from line-item key to amount.
#[derive(Debug, Clone)]
pub struct PlannedSnapshot {
    values: [f64; LineItem::COUNT],
}

impl PlannedSnapshot {
    /// Planned figure for a line item.
    #[must_use]
    pub fn value(&self, item: LineItem) -> f64 {
        self.values[item.index()]
    }
}

impl Serialize for PlannedSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LineItem::COUNT))?;
        for item in LineItem::ALL {
            map.serialize_entry(item.key(), &self.value(item))?;
        }
        map.end()
    }
}

/// A ratio for the prior period and the plan.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RatioPair {
    /// Prior-period actual (%).
    pub prior: f64,
    /// Planned (%).
    pub planned: f64,
}

/// Published headline ratios.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarginRatios {
    /// Gross margin.
    pub gp: RatioPair,
    /// Franchise-channel gross margin.
    pub gp_franchise: RatioPair,
    /// EBITDA margin.
    pub ebitda_pct: RatioPair,
    /// Operating margin.
    pub op_margin: RatioPair,
}

const fn row(item: LineItem, label: &'static str, prior: f64) -> BaselineEntry {
    BaselineEntry {
        item,
        label,
        prior,
        bold: false,
        highlight: false,
    }
}

const fn subtotal(item: LineItem, label: &'static str, prior: f64) -> BaselineEntry {
    BaselineEntry {
        item,
        label,
        prior,
        bold: true,
        highlight: false,
    }
}

/// Prior-period (2025) actuals.
#[must_use]
pub fn prior_actuals() -> BaselineSnapshot {
    use LineItem as L;
    BaselineSnapshot {
        entries: [
            row(L::Revenue, "총매출액", 479_876_076_315.0),
            row(L::RevenueFranchise, "  가맹매출액", 415_129_789_902.0),
            row(L::RevenueFranchiseTouch, "    맘스터치", 406_465_489_141.0),
            row(L::RevenueFranchisePizza, "    맘스피자", 8_664_300_761.0),
            row(L::RevenueDirect, "  직영매출액", 20_888_561_841.0),
            row(L::RevenueDist, "  유통사업", 41_457_001_701.0),
            row(L::RevenueOther, "  기타매출액", 2_400_722_871.0),
            row(L::Cogs, "매출원가", 300_097_805_571.0),
            subtotal(L::GrossProfit, "매출총이익", 179_778_270_744.0),
            row(L::VariableCost, "변동비", 42_241_846_335.0),
            row(L::Marketing, "  마케팅비용", 15_186_857_123.0),
            row(L::Commission, "  지사수수료", 12_440_181_710.0),
            row(L::Delivery, "  운반비", 14_614_807_502.0),
            subtotal(L::Contribution, "공헌이익", 137_536_424_409.0),
            row(L::FixedCost, "고정비용", 50_828_153_517.0),
            subtotal(L::OpProfit, "영업이익", 86_708_270_892.0),
            row(L::Subsidiary, "자회사손익", 2_979_288_745.0),
            row(L::Tokyo, "도쿄법인손익", -4_188_390_212.0),
            subtotal(L::ConsolOp, "연결 영업이익", 89_687_559_637.0),
            row(L::Da, "D&A", 11_896_630_557.0),
            BaselineEntry {
                item: L::Ebitda,
                label: "연결 EBITDA",
                prior: 101_584_190_194.0,
                bold: true,
                highlight: true,
            },
        ],
    }
}

/// Planned (2026) figures, in [`LineItem::ALL`] order.
#[must_use]
pub fn planned_figures() -> PlannedSnapshot {
    PlannedSnapshot {
        values: [
            519_253_356_306.0,
            453_836_766_528.0,
            440_016_171_240.0,
            13_820_595_288.0,
            20_888_561_841.0,
            41_457_001_701.0,
            3_071_026_236.0,
            317_003_716_087.0,
            202_249_640_219.0,
            44_150_333_267.0,
            14_875_287_799.0,
            13_460_988_003.0,
            15_814_057_466.0,
            158_099_306_952.0,
            51_508_379_856.0,
            106_590_927_096.0,
            3_731_303_228.0,
            -4_188_390_212.0,
            110_322_230_323.0,
            11_896_630_557.0,
            122_218_860_880.0,
        ],
    }
}

/// Published headline ratios.
#[must_use]
pub const fn ratios() -> MarginRatios {
    MarginRatios {
        gp: RatioPair {
            prior: 37.46,
            planned: 38.95,
        },
        gp_franchise: RatioPair {
            prior: 37.58,
            planned: 39.27,
        },
        ebitda_pct: RatioPair {
            prior: 21.17,
            planned: 23.54,
        },
        op_margin: RatioPair {
            prior: 18.07,
            planned: 20.53,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_follow_statement_order() {
        let baseline = prior_actuals();
        for (i, entry) in baseline.entries().iter().enumerate() {
            assert_eq!(entry.item.index(), i, "{}", entry.item.key());
            assert_eq!(entry.item, LineItem::ALL[i]);
        }
    }

    #[test]
    fn test_prior_subtotals_reconcile() {
        let b = prior_actuals();
        let gp = b.value(LineItem::Revenue) - b.value(LineItem::Cogs);
        assert!((gp - b.value(LineItem::GrossProfit)).abs() < 1.0);

        let contribution = b.value(LineItem::GrossProfit) - b.value(LineItem::VariableCost);
        assert!((contribution - b.value(LineItem::Contribution)).abs() < 1.0);

        let op = b.value(LineItem::Contribution) - b.value(LineItem::FixedCost);
        assert!((op - b.value(LineItem::OpProfit)).abs() < 1.0);

        let ebitda = b.value(LineItem::ConsolOp) + b.value(LineItem::Da);
        assert!((ebitda - b.value(LineItem::Ebitda)).abs() < 1.0);
    }

    #[test]
    fn test_planned_revenue_other() {
        let planned = planned_figures();
        assert!((planned.value(LineItem::RevenueOther) - 3_071_026_236.0).abs() < f64::EPSILON);
        assert!((planned.value(LineItem::Ebitda) - 122_218_860_880.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_only_ebitda_is_highlighted() {
        let highlighted: Vec<_> = prior_actuals()
            .entries()
            .iter()
            .filter(|e| e.highlight)
            .map(|e| e.item)
            .collect();
        assert_eq!(highlighted, vec![LineItem::Ebitda]);
    }

    #[test]
    fn test_line_item_serializes_as_key() {
        let json = serde_json::to_string(&LineItem::RevenueFranchiseTouch).unwrap();
        assert_eq!(json, "\"revenue_franchise_t\"");
    }
}
