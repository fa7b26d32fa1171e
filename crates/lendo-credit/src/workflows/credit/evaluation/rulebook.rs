use serde::Serialize;

use super::super::domain::{CreditBureauFlagSet, FinancialPeriodRecord};
use super::super::format::{group_thousands, ratio_threshold, trim_decimal};
use super::config::RulebookConfig;

/// The nine hard policy rules, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RulebookRule {
    Revenue,
    OperatingProfit,
    Dscr,
    GearingRatio,
    LeverageRatio,
    CurrentRatio,
    ExternalDebtToSales,
    TotalEquity,
    CreditHistory,
}

impl RulebookRule {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Revenue,
            Self::OperatingProfit,
            Self::Dscr,
            Self::GearingRatio,
            Self::LeverageRatio,
            Self::CurrentRatio,
            Self::ExternalDebtToSales,
            Self::TotalEquity,
            Self::CreditHistory,
        ]
    }

    pub fn label(self, config: &RulebookConfig) -> String {
        match self {
            Self::Revenue => format!("Revenue > {}", group_thousands(config.minimum_revenue)),
            Self::OperatingProfit => format!(
                "Operating Profit > {}",
                group_thousands(config.minimum_operating_profit)
            ),
            Self::Dscr => format!("DSCR \u{2265} {}", ratio_threshold(config.minimum_dscr)),
            Self::GearingRatio => format!(
                "Gearing Ratio \u{2264} {}",
                ratio_threshold(config.maximum_gearing_ratio)
            ),
            Self::LeverageRatio => format!(
                "Leverage Ratio \u{2264} {}",
                ratio_threshold(config.maximum_leverage_ratio)
            ),
            Self::CurrentRatio => format!(
                "Current Ratio \u{2265} {}",
                ratio_threshold(config.minimum_current_ratio)
            ),
            Self::ExternalDebtToSales => format!(
                "External Debt/Sales < {}%",
                trim_decimal(config.maximum_external_debt_to_sales * 100.0)
            ),
            Self::TotalEquity => format!(
                "Total Equity > {}",
                group_thousands(config.minimum_total_equity)
            ),
            Self::CreditHistory => "Credit History Green".to_string(),
        }
    }

    fn passes(
        self,
        period: &FinancialPeriodRecord,
        flags: &CreditBureauFlagSet,
        config: &RulebookConfig,
    ) -> bool {
        match self {
            Self::Revenue => period.revenue.value() > config.minimum_revenue,
            Self::OperatingProfit => period.net_profit.value() > config.minimum_operating_profit,
            Self::Dscr => period.dscr.value() >= config.minimum_dscr,
            Self::GearingRatio => period.gearing_ratio.value() <= config.maximum_gearing_ratio,
            Self::LeverageRatio => period.leverage_ratio.value() <= config.maximum_leverage_ratio,
            Self::CurrentRatio => period.current_ratio.value() >= config.minimum_current_ratio,
            Self::ExternalDebtToSales => {
                period.external_debt_sales_ratio.value() < config.maximum_external_debt_to_sales
            }
            Self::TotalEquity => period.total_equity.value() > config.minimum_total_equity,
            Self::CreditHistory => flags.all_clear(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOutcome {
    pub rule: RulebookRule,
    pub rule_name: String,
    pub passed: bool,
}

/// Evaluates every rule; never short-circuits.
pub fn evaluate(
    period: &FinancialPeriodRecord,
    flags: &CreditBureauFlagSet,
    config: &RulebookConfig,
) -> Vec<RuleOutcome> {
    RulebookRule::ordered()
        .into_iter()
        .map(|rule| RuleOutcome {
            rule,
            rule_name: rule.label(config),
            passed: rule.passes(period, flags, config),
        })
        .collect()
}
