//! Market context published alongside the catalog: competitor price points
//! and the quarterly gross-margin history. Display data only.

use serde::Serialize;

/// A competitor (or own) product price point before and after the increase.
#[derive(Debug, Clone, Serialize)]
pub struct CompetitorProduct {
    /// Brand name.
    pub brand: &'static str,
    /// Product name.
    pub product: &'static str,
    /// Product weight in grams.
    pub weight_g: u32,
    /// Current price (KRW).
    pub current: u32,
    /// Price after the increase (KRW).
    pub after: u32,
    /// Current price per gram (KRW/g).
    pub per_gram_current: f64,
    /// Price per gram after the increase (KRW/g).
    pub per_gram_after: f64,
    /// Whether the product is our own.
    pub ours: bool,
}

/// Competitor comparison grouped by product category.
#[derive(Debug, Clone, Serialize)]
pub struct CompetitorTable {
    /// Single burgers.
    pub burger_single: Vec<CompetitorProduct>,
    /// Boneless chicken.
    pub chicken_boneless: Vec<CompetitorProduct>,
}

/// One quarter of gross-margin history.
#[derive(Debug, Clone, Serialize)]
pub struct QuarterlyPoint {
    /// Period label, e.g. `25.1Q`.
    pub period: &'static str,
    /// Gross margin (%).
    pub gp_pct: f64,
}

#[allow(clippy::too_many_arguments)]
const fn product(
    brand: &'static str,
    product: &'static str,
    weight_g: u32,
    current: u32,
    after: u32,
    per_gram_current: f64,
    per_gram_after: f64,
    ours: bool,
) -> CompetitorProduct {
    CompetitorProduct {
        brand,
        product,
        weight_g,
        current,
        after,
        per_gram_current,
        per_gram_after,
        ours,
    }
}

/// Competitor price table.
#[must_use]
pub fn competitors() -> CompetitorTable {
    CompetitorTable {
        burger_single: vec![
            product("맘스터치", "싸이버거", 256, 4900, 5200, 19.1, 20.3, true),
            product("롯데리아", "불고기버거", 203, 5000, 5300, 24.6, 26.1, false),
            product("맥도날드", "빅맥", 224, 5500, 5800, 24.6, 25.9, false),
            product("KFC", "징거버거", 222, 5900, 6200, 26.6, 27.9, false),
            product("버거킹", "와퍼", 305, 7200, 7500, 23.6, 24.6, false),
        ],
        chicken_boneless: vec![
            product("맘스터치", "빅싸이순살맥스", 760, 19900, 21400, 26.2, 28.2, true),
            product("맘스터치", "빅싸이순살", 380, 11900, 12900, 31.3, 33.9, true),
            product("BHC", "콰삭킹 순살", 476, 23000, 24500, 48.3, 51.5, false),
            product("BBQ", "황금올리브 순살", 705, 25000, 26500, 35.5, 37.6, false),
            product("교촌", "후라이드 순살", 457, 22000, 23500, 48.1, 51.4, false),
        ],
    }
}

/// Quarterly gross-margin series, oldest first.
#[must_use]
pub fn quarterly_gross_margin() -> Vec<QuarterlyPoint> {
    [
        ("24.1Q", 35.82),
        ("24.2Q", 35.97),
        ("24.3Q", 35.33),
        ("24.4Q", 38.09),
        ("25.1Q", 38.68),
        ("25.2Q", 38.05),
        ("25.3Q", 36.84),
        ("25.4Q", 36.73),
    ]
    .into_iter()
    .map(|(period, gp_pct)| QuarterlyPoint { period, gp_pct })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prices_rise_for_every_product() {
        let table = competitors();
        for p in table.burger_single.iter().chain(&table.chicken_boneless) {
            assert!(p.after > p.current, "{} {}", p.brand, p.product);
            assert!(p.per_gram_after > p.per_gram_current);
        }
    }

    #[test]
    fn test_quarterly_series_has_eight_quarters() {
        let series = quarterly_gross_margin();
        assert_eq!(series.len(), 8);
        assert_eq!(series[0].period, "24.1Q");
        assert_eq!(series[7].period, "25.4Q");
    }
}
