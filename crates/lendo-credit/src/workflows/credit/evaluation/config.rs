use serde::{Deserialize, Serialize};

/// Hard thresholds of the credit policy rulebook.
///
/// Amounts are in SAR. `maximum_external_debt_to_sales` is a fraction of sales and
/// `recommendation_threshold_pct` a percentage of rules met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulebookConfig {
    pub version: String,
    pub minimum_revenue: f64,
    pub minimum_operating_profit: f64,
    pub minimum_dscr: f64,
    pub maximum_gearing_ratio: f64,
    pub maximum_leverage_ratio: f64,
    pub minimum_current_ratio: f64,
    pub maximum_external_debt_to_sales: f64,
    pub minimum_total_equity: f64,
    pub recommendation_threshold_pct: f64,
}

impl RulebookConfig {
    pub const STANDARD_VERSION: &'static str = "lendo-credit-policy/2025.1";

    pub fn standard() -> Self {
        Self {
            version: Self::STANDARD_VERSION.to_string(),
            minimum_revenue: 1_000_000.0,
            minimum_operating_profit: 0.0,
            minimum_dscr: 1.5,
            maximum_gearing_ratio: 1.7,
            maximum_leverage_ratio: 2.0,
            minimum_current_ratio: 1.2,
            maximum_external_debt_to_sales: 0.5,
            minimum_total_equity: 100_000.0,
            recommendation_threshold_pct: 60.0,
        }
    }
}

impl Default for RulebookConfig {
    fn default() -> Self {
        Self::standard()
    }
}
