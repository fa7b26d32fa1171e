mod grade;
pub(crate) mod tables;

pub use grade::Grade;
pub use tables::SCORECARD_VERSION;

use serde::Serialize;

use super::super::domain::{
    BureauChannel, BureauParameter, CreditBureauFlagSet, Figure, FinancialPeriodRecord,
};
use super::super::profile::{Categorical, QualitativeProfile};
use super::policy::round2;
use tables::BandTable;

/// Scorecard factors in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorecardFactor {
    YearsInBusiness,
    NitaqatColor,
    Market,
    Industry,
    TypeOfCustomer,
    InventoryLiquidity,
    AccessToFunds,
    ControlOverCashflow,
    RelationshipWithLendo,
    ReturnedChequesAndCourtCases,
    CreditBureauFlags,
    DefaultsAndPastDues,
    RevenueGrowth,
    GrossProfitMarginGrowth,
    NetProfitMargin,
    NetProfitMarginGrowth,
    CashFlowFromOperations,
    CurrentRatio,
    LeverageRatio,
    InterestCoverage,
    Dscr,
    DaysSalesOutstanding,
    ReceivablesToSales,
    ExternalDebtToSales,
    ChangeInOwnership,
    ChangeInManagement,
    BreachInFinancialCovenants,
    DelayedAuditedStatements,
    LegalStructure,
    SuccessionRisk,
    OwnersExperience,
    ManagementExperience,
    CreditHistoryCategory,
}

impl ScorecardFactor {
    pub const fn ordered() -> [Self; 33] {
        [
            Self::YearsInBusiness,
            Self::NitaqatColor,
            Self::Market,
            Self::Industry,
            Self::TypeOfCustomer,
            Self::InventoryLiquidity,
            Self::AccessToFunds,
            Self::ControlOverCashflow,
            Self::RelationshipWithLendo,
            Self::ReturnedChequesAndCourtCases,
            Self::CreditBureauFlags,
            Self::DefaultsAndPastDues,
            Self::RevenueGrowth,
            Self::GrossProfitMarginGrowth,
            Self::NetProfitMargin,
            Self::NetProfitMarginGrowth,
            Self::CashFlowFromOperations,
            Self::CurrentRatio,
            Self::LeverageRatio,
            Self::InterestCoverage,
            Self::Dscr,
            Self::DaysSalesOutstanding,
            Self::ReceivablesToSales,
            Self::ExternalDebtToSales,
            Self::ChangeInOwnership,
            Self::ChangeInManagement,
            Self::BreachInFinancialCovenants,
            Self::DelayedAuditedStatements,
            Self::LegalStructure,
            Self::SuccessionRisk,
            Self::OwnersExperience,
            Self::ManagementExperience,
            Self::CreditHistoryCategory,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::YearsInBusiness => "Years in Business",
            Self::NitaqatColor => "Nitaqat Color",
            Self::Market => "Market",
            Self::Industry => "Industry",
            Self::TypeOfCustomer => "Type of Customer",
            Self::InventoryLiquidity => "Inventory Liquidity",
            Self::AccessToFunds => "Access to Additional Funds",
            Self::ControlOverCashflow => "Control over Cash Flow",
            Self::RelationshipWithLendo => "Relationship with Lendo",
            Self::ReturnedChequesAndCourtCases => "Returned Cheques & Court Cases",
            Self::CreditBureauFlags => "Credit Bureau Flags",
            Self::DefaultsAndPastDues => "Defaults / PD",
            Self::RevenueGrowth => "Revenue Growth",
            Self::GrossProfitMarginGrowth => "GPM Growth",
            Self::NetProfitMargin => "Net Profit Margin",
            Self::NetProfitMarginGrowth => "NPM Growth",
            Self::CashFlowFromOperations => "Cash Flow from Operations",
            Self::CurrentRatio => "Current Ratio",
            Self::LeverageRatio => "Leverage Ratio",
            Self::InterestCoverage => "Interest Coverage",
            Self::Dscr => "DSCR",
            Self::DaysSalesOutstanding => "Days Sales Outstanding",
            Self::ReceivablesToSales => "Receivables % of Sales",
            Self::ExternalDebtToSales => "External Debt / Sales",
            Self::ChangeInOwnership => "Change in Ownership",
            Self::ChangeInManagement => "Change in Management",
            Self::BreachInFinancialCovenants => "Breach in Financial Covenants",
            Self::DelayedAuditedStatements => "Delayed AFS",
            Self::LegalStructure => "Legal Structure",
            Self::SuccessionRisk => "Succession Risk",
            Self::OwnersExperience => "Owners' Experience",
            Self::ManagementExperience => "Management Experience",
            Self::CreditHistoryCategory => "Credit History Category",
        }
    }
}

/// Input value a factor was scored on. `Missing` serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObservedValue {
    Number(f64),
    Text(String),
    Missing,
}

impl ObservedValue {
    pub fn display(&self) -> String {
        match self {
            Self::Number(value) => super::super::format::trim_decimal(*value),
            Self::Text(text) => text.clone(),
            Self::Missing => "n/a".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub factor: ScorecardFactor,
    pub factor_name: &'static str,
    pub observed_value: ObservedValue,
    /// `None` when the input matched no band; listed but contributes nothing.
    pub points: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub entries: Vec<ScoreEntry>,
    pub total_score: f64,
    pub grade: Grade,
}

/// Scores every factor in order, then sums the scored points and grades the total.
pub fn score(
    period: &FinancialPeriodRecord,
    flags: &CreditBureauFlagSet,
    profile: &QualitativeProfile,
) -> Scorecard {
    let entries: Vec<ScoreEntry> = ScorecardFactor::ordered()
        .into_iter()
        .map(|factor| {
            let (observed_value, points) = score_factor(factor, period, flags, profile);
            ScoreEntry {
                factor,
                factor_name: factor.label(),
                observed_value,
                points,
            }
        })
        .collect();

    let total_score = round2(entries.iter().filter_map(|entry| entry.points).sum());

    Scorecard {
        entries,
        total_score,
        grade: Grade::from_score(total_score),
    }
}

fn score_factor(
    factor: ScorecardFactor,
    period: &FinancialPeriodRecord,
    flags: &CreditBureauFlagSet,
    profile: &QualitativeProfile,
) -> (ObservedValue, Option<f64>) {
    use ScorecardFactor::*;
    match factor {
        YearsInBusiness => years_in_business(profile, period),
        NitaqatColor => categorical(profile.nitaqat_color, tables::nitaqat),
        Market => categorical(profile.market, tables::market),
        Industry => categorical(profile.industry, tables::industry),
        TypeOfCustomer => categorical(profile.customer_base(), tables::customer_base),
        InventoryLiquidity => {
            categorical(profile.inventory_liquidity, tables::inventory_liquidity)
        }
        AccessToFunds => categorical(profile.access_to_funds, tables::funding_access),
        ControlOverCashflow => {
            categorical(profile.control_over_cashflow, tables::cashflow_control)
        }
        RelationshipWithLendo => {
            categorical(profile.relationship_with_lendo, tables::lendo_relationship)
        }
        ReturnedChequesAndCourtCases => returned_cheques(flags),
        CreditBureauFlags => bureau_flags(flags),
        DefaultsAndPastDues => defaults_and_past_dues(flags, profile),
        RevenueGrowth => banded(period.revenue_growth, &tables::REVENUE_GROWTH),
        GrossProfitMarginGrowth => {
            banded(period.gross_profit_margin_growth, &tables::GROSS_MARGIN_GROWTH)
        }
        NetProfitMargin => banded(period.net_profit_margin, &tables::NET_PROFIT_MARGIN),
        NetProfitMarginGrowth => {
            banded(period.net_profit_margin_growth, &tables::NET_MARGIN_GROWTH)
        }
        CashFlowFromOperations => banded(
            period.cash_flow_from_operating_activities,
            &tables::OPERATING_CASH_FLOW,
        ),
        CurrentRatio => banded(period.current_ratio, &tables::CURRENT_RATIO),
        LeverageRatio => banded(period.leverage_ratio, &tables::LEVERAGE_RATIO),
        InterestCoverage => banded(period.interest_coverage, &tables::INTEREST_COVERAGE),
        Dscr => banded(period.dscr, &tables::DSCR),
        DaysSalesOutstanding => {
            banded(period.days_sales_outstanding, &tables::DAYS_SALES_OUTSTANDING)
        }
        ReceivablesToSales => banded(
            period.receivable_percentage_sales,
            &tables::RECEIVABLES_TO_SALES,
        ),
        ExternalDebtToSales => {
            let percent = period.external_debt_sales_ratio.value() * 100.0;
            (
                ObservedValue::Number(percent),
                tables::EXTERNAL_DEBT_TO_SALES.points_for(percent),
            )
        }
        ChangeInOwnership => categorical(profile.change_in_ownership, tables::adverse_event),
        ChangeInManagement => categorical(profile.change_in_management, tables::adverse_event),
        BreachInFinancialCovenants => {
            categorical(profile.breach_in_financial_covenant, tables::adverse_event)
        }
        DelayedAuditedStatements => categorical(profile.delayed_afs, tables::adverse_event),
        LegalStructure => categorical(profile.legal_structure, tables::legal_structure),
        SuccessionRisk => categorical(profile.succession_risk, tables::succession_risk),
        OwnersExperience => categorical(profile.owners_experience, tables::experience),
        ManagementExperience => categorical(profile.management_experience, tables::experience),
        CreditHistoryCategory => {
            categorical(profile.credit_history_category, tables::credit_history)
        }
    }
}

fn categorical<T: Categorical>(
    value: Option<T>,
    points: fn(T) -> f64,
) -> (ObservedValue, Option<f64>) {
    match value {
        Some(value) => (
            ObservedValue::Text(value.label().to_string()),
            Some(points(value)),
        ),
        None => (ObservedValue::Missing, None),
    }
}

fn banded(figure: Figure, table: &BandTable) -> (ObservedValue, Option<f64>) {
    let value = figure.value();
    (ObservedValue::Number(value), table.points_for(value))
}

fn years_in_business(
    profile: &QualitativeProfile,
    period: &FinancialPeriodRecord,
) -> (ObservedValue, Option<f64>) {
    let Some(years) = profile.years_in_business else {
        return (ObservedValue::Missing, None);
    };

    let points = if years < tables::YOUNG_BUSINESS_YEARS {
        if period.net_profit_margin_growth.value() > 0.0 {
            Some(tables::YOUNG_BUSINESS_GROWING)
        } else {
            Some(tables::YOUNG_BUSINESS)
        }
    } else {
        tables::YEARS_ESTABLISHED.points_for(years)
    };

    (ObservedValue::Number(years), points)
}

fn returned_cheques(flags: &CreditBureauFlagSet) -> (ObservedValue, Option<f64>) {
    let cheque = |channel: BureauChannel| flags.reading(channel, BureauParameter::BouncedCheques);
    let court = |channel: BureauChannel| flags.reading(channel, BureauParameter::CourtCases);
    let channels = BureauChannel::ordered();

    let both_cheques_green = channels.iter().all(|channel| cheque(*channel).is_green());
    let any_cheque_green = channels.iter().any(|channel| cheque(*channel).is_green());
    let any_cheque_red = channels.iter().any(|channel| cheque(*channel).is_red());
    let no_court_green = channels
        .iter()
        .all(|channel| court(*channel).is_red_or_unknown());
    let any_court_green = channels.iter().any(|channel| court(*channel).is_green());
    let both_court_green = channels.iter().all(|channel| court(*channel).is_green());

    let points = if both_cheques_green && no_court_green {
        tables::CHEQUES_CLEAR_COURT_FLAGGED
    } else if any_cheque_green && any_court_green {
        tables::CHEQUES_AND_COURT_CLEAR
    } else if any_cheque_red && both_court_green {
        tables::CHEQUES_FLAGGED_COURT_CLEAR
    } else {
        tables::CHEQUES_UNRESOLVED
    };

    let observed = [BureauParameter::BouncedCheques, BureauParameter::CourtCases]
        .into_iter()
        .flat_map(|parameter| {
            channels.into_iter().map(move |channel| {
                let flag = flags
                    .reading(channel, parameter)
                    .flag
                    .map_or("null", |flag| flag.label());
                format!("{}={flag}", parameter.flag_field(channel))
            })
        })
        .collect::<Vec<_>>()
        .join(", ");

    (ObservedValue::Text(observed), Some(points))
}

fn bureau_flags(flags: &CreditBureauFlagSet) -> (ObservedValue, Option<f64>) {
    if flags.all_clear() {
        (
            ObservedValue::Text("all flags green or unreported".to_string()),
            Some(tables::BUREAU_ALL_CLEAR),
        )
    } else {
        (
            ObservedValue::Text(format!("RED: {}", flags.red_flag_fields().join(", "))),
            Some(tables::BUREAU_FLAGGED),
        )
    }
}

fn defaults_and_past_dues(
    flags: &CreditBureauFlagSet,
    profile: &QualitativeProfile,
) -> (ObservedValue, Option<f64>) {
    let dpd = flags.max_value(BureauParameter::Dpd);
    let banded = dpd.and_then(|days| tables::DAYS_PAST_DUE.points_for(days));

    let points = banded.unwrap_or_else(|| {
        let established = profile
            .years_in_business
            .is_some_and(|years| years > tables::CLEAN_RECORD_MIN_YEARS);
        if established {
            tables::CLEAN_RECORD
        } else {
            0.0
        }
    });

    let observed = dpd.map_or(ObservedValue::Missing, ObservedValue::Number);
    (observed, Some(points))
}
