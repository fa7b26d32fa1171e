mod config;
mod policy;
mod rulebook;
pub mod scorecard;

pub use config::RulebookConfig;
pub use policy::{aggregate, PartialAcceptance};
pub use rulebook::{evaluate, RuleOutcome, RulebookRule};
pub use scorecard::{
    Grade, ObservedValue, ScoreEntry, Scorecard, ScorecardFactor, SCORECARD_VERSION,
};

pub(crate) use policy::round2;

use super::extraction::ExtractedPeriod;
use super::profile::QualitativeProfile;

/// Rulebook, aggregate and scorecard computed for one extracted period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodEvaluation {
    pub outcomes: Vec<RuleOutcome>,
    pub acceptance: PartialAcceptance,
    pub scorecard: Scorecard,
}

pub fn evaluate_period(
    extracted: &ExtractedPeriod,
    profile: &QualitativeProfile,
    config: &RulebookConfig,
) -> PeriodEvaluation {
    let outcomes = evaluate(&extracted.period, &extracted.flags, config);
    let acceptance = aggregate(&outcomes, config);
    let scorecard = scorecard::score(&extracted.period, &extracted.flags, profile);

    PeriodEvaluation {
        outcomes,
        acceptance,
        scorecard,
    }
}
