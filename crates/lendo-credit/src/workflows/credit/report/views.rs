use serde::Serialize;

use super::super::domain::{
    BureauChannel, BureauParameter, CreditBureauFlagSet, FinalRecommendation,
    FinancialPeriodRecord,
};
use super::super::evaluation::{Grade, PartialAcceptance};
use super::super::format::{group_thousands, trim_decimal};

/// Headline figures consumed by the credit file generator and the notification body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPayload {
    pub company_name: String,
    pub cr_number: String,
    /// Scorecard total, carried under the name the credit file template expects.
    pub simah_score: f64,
    pub dpd: String,
    pub revenue: String,
    pub net_profit_margin: String,
    pub dscr: String,
    pub bounced_cheques: String,
    pub risk_rating: String,
    pub final_recommendation: String,
    pub final_decision: String,
}

impl SummaryPayload {
    pub(crate) fn build(
        period: &FinancialPeriodRecord,
        flags: &CreditBureauFlagSet,
        acceptance: &PartialAcceptance,
        total_score: f64,
        grade: Grade,
    ) -> Self {
        let met = acceptance.met_rules.len();
        let total = met + acceptance.failed_rules.len();

        Self {
            company_name: period.company_name.clone(),
            cr_number: period.cr_number.clone(),
            simah_score: total_score,
            dpd: days_past_due(flags),
            revenue: format!("{} SAR", group_thousands(period.revenue.value())),
            net_profit_margin: format!("{}%", trim_decimal(period.net_profit_margin.value())),
            dscr: trim_decimal(period.dscr.value()),
            bounced_cheques: bounced_cheques(flags),
            risk_rating: grade.risk_rating().to_string(),
            final_recommendation: acceptance.final_recommendation.financing_label().to_string(),
            final_decision: final_decision(acceptance, met, total, total_score, grade),
        }
    }
}

fn days_past_due(flags: &CreditBureauFlagSet) -> String {
    match flags.max_value(BureauParameter::Dpd) {
        Some(days) => format!("{} days", trim_decimal(days)),
        None => "None reported".to_string(),
    }
}

fn bounced_cheques(flags: &CreditBureauFlagSet) -> String {
    let red_channels: Vec<&str> = BureauChannel::ordered()
        .into_iter()
        .filter(|channel| {
            flags
                .reading(*channel, BureauParameter::BouncedCheques)
                .is_red()
        })
        .map(BureauChannel::label)
        .collect();

    if !red_channels.is_empty() {
        return format!("RED ({})", red_channels.join(", "));
    }

    match flags.max_value(BureauParameter::BouncedCheques) {
        Some(count) if count > 0.0 => trim_decimal(count),
        _ => "None".to_string(),
    }
}

fn final_decision(
    acceptance: &PartialAcceptance,
    met: usize,
    total: usize,
    total_score: f64,
    grade: Grade,
) -> String {
    let verdict = match acceptance.final_recommendation {
        FinalRecommendation::Recommended if acceptance.requires_ratio_review => {
            "Recommended for financing subject to manual ratio review"
        }
        FinalRecommendation::Recommended => "Recommended for financing",
        FinalRecommendation::NotRecommended if acceptance.credit_history_override => {
            "Not recommended for financing: credit bureau flags are not green"
        }
        FinalRecommendation::NotRecommended => "Not recommended for financing",
    };

    format!(
        "{verdict}. {met} of {total} credit rules met ({}%); scorecard {} ({}).",
        trim_decimal(acceptance.percent_met),
        trim_decimal(total_score),
        grade.label()
    )
}
