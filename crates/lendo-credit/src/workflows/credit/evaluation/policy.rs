use serde::Serialize;

use super::super::domain::FinalRecommendation;
use super::config::RulebookConfig;
use super::rulebook::{RuleOutcome, RulebookRule};

/// Aggregate view over the rulebook outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialAcceptance {
    pub met_rules: Vec<String>,
    pub failed_rules: Vec<String>,
    pub percent_met: f64,
    pub final_recommendation: FinalRecommendation,
    /// Recommended despite failed ratio rules; a credit officer reviews the ratios.
    pub requires_ratio_review: bool,
    pub credit_history_override: bool,
}

impl PartialAcceptance {
    pub fn summary(&self) -> String {
        if self.credit_history_override {
            return format!(
                "{} (credit history flags not green)",
                self.final_recommendation.label()
            );
        }

        if self.requires_ratio_review {
            format!(
                "{} with manual ratio review: {}",
                self.final_recommendation.label(),
                self.failed_rules.join(", ")
            )
        } else {
            self.final_recommendation.label().to_string()
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn aggregate(outcomes: &[RuleOutcome], config: &RulebookConfig) -> PartialAcceptance {
    let (met, failed): (Vec<&RuleOutcome>, Vec<&RuleOutcome>) =
        outcomes.iter().partition(|outcome| outcome.passed);

    let percent_met = if outcomes.is_empty() {
        0.0
    } else {
        round2(met.len() as f64 / outcomes.len() as f64 * 100.0)
    };

    let credit_history_override = failed
        .iter()
        .any(|outcome| outcome.rule == RulebookRule::CreditHistory);

    let final_recommendation =
        if !credit_history_override && percent_met >= config.recommendation_threshold_pct {
            FinalRecommendation::Recommended
        } else {
            FinalRecommendation::NotRecommended
        };

    let requires_ratio_review =
        final_recommendation == FinalRecommendation::Recommended && !failed.is_empty();

    PartialAcceptance {
        met_rules: met.iter().map(|outcome| outcome.rule_name.clone()).collect(),
        failed_rules: failed
            .iter()
            .map(|outcome| outcome.rule_name.clone())
            .collect(),
        percent_met,
        final_recommendation,
        requires_ratio_review,
        credit_history_override,
    }
}
