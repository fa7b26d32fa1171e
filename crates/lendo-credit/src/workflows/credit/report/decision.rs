use serde::Serialize;

use super::super::domain::{FinalRecommendation, FinancialPeriodRecord};
use super::super::evaluation::{
    Grade, PeriodEvaluation, RuleOutcome, RulebookConfig, ScoreEntry, SCORECARD_VERSION,
};
use super::super::extraction::ExtractedPeriod;
use super::justification;
use super::views::SummaryPayload;

/// Complete, self-describing decision for one company-year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResult {
    pub company_name: String,
    pub cr_number: String,
    pub organization_id: String,
    pub year: i32,
    pub rulebook_version: String,
    pub scorecard_version: &'static str,
    pub rule_outcomes: Vec<RuleOutcome>,
    pub met_rules: Vec<String>,
    pub failed_rules: Vec<String>,
    pub percent_met: f64,
    pub final_recommendation: FinalRecommendation,
    pub requires_ratio_review: bool,
    pub credit_history_override: bool,
    pub total_score: f64,
    pub grade: Grade,
    pub scorecard_table: Vec<ScoreEntry>,
    /// Statement figures absent from the source and scored at their declared default.
    pub defaulted_figures: Vec<&'static str>,
    pub justification_text: String,
    pub summary_payload: SummaryPayload,
}

impl DecisionResult {
    pub fn rules_met(&self) -> usize {
        self.met_rules.len()
    }

    pub fn rules_total(&self) -> usize {
        self.rule_outcomes.len()
    }
}

pub(crate) fn assemble(
    extracted: ExtractedPeriod,
    evaluation: PeriodEvaluation,
    config: &RulebookConfig,
) -> DecisionResult {
    let ExtractedPeriod { period, flags } = extracted;
    let PeriodEvaluation {
        outcomes,
        acceptance,
        scorecard,
    } = evaluation;

    let summary_payload = SummaryPayload::build(
        &period,
        &flags,
        &acceptance,
        scorecard.total_score,
        scorecard.grade,
    );

    let mut result = DecisionResult {
        company_name: period.company_name.clone(),
        cr_number: period.cr_number.clone(),
        organization_id: period.organization_id.clone(),
        year: period.year,
        rulebook_version: config.version.clone(),
        scorecard_version: SCORECARD_VERSION,
        rule_outcomes: outcomes,
        met_rules: acceptance.met_rules,
        failed_rules: acceptance.failed_rules,
        percent_met: acceptance.percent_met,
        final_recommendation: acceptance.final_recommendation,
        requires_ratio_review: acceptance.requires_ratio_review,
        credit_history_override: acceptance.credit_history_override,
        total_score: scorecard.total_score,
        grade: scorecard.grade,
        scorecard_table: scorecard.entries,
        defaulted_figures: defaulted_figures(&period),
        justification_text: String::new(),
        summary_payload,
    };

    result.justification_text = justification::render(&result);
    result
}

fn defaulted_figures(period: &FinancialPeriodRecord) -> Vec<&'static str> {
    [
        ("revenue", period.revenue),
        ("netProfit", period.net_profit),
        (
            "cashFlowFromOperatingActivities",
            period.cash_flow_from_operating_activities,
        ),
        ("currentRatio", period.current_ratio),
        ("dscr", period.dscr),
        ("debtRatio", period.debt_ratio),
        ("netProfitMargin", period.net_profit_margin),
        ("netProfitMarginGrowth", period.net_profit_margin_growth),
        ("grossProfitMarginGrowth", period.gross_profit_margin_growth),
        ("leverageRatio", period.leverage_ratio),
        ("gearingRatio", period.gearing_ratio),
        ("totalEquity", period.total_equity),
        ("revenueGrowth", period.revenue_growth),
        ("interestCoverage", period.interest_coverage),
        ("externalDebtSalesRatio", period.external_debt_sales_ratio),
        ("receivablePercentageSales", period.receivable_percentage_sales),
        ("daysSalesOutstanding", period.days_sales_outstanding),
    ]
    .into_iter()
    .filter(|(_, figure)| !figure.is_reported())
    .map(|(name, _)| name)
    .collect()
}
