use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::warn;

use super::domain::FinalRecommendation;
use super::engine::CreditDecisionEngine;
use super::error::DecisionError;
use super::extraction::YearSelection;
use super::record::CompanyRecord;
use super::report::DecisionResult;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortfolioError {
    #[error(transparent)]
    Decision(#[from] DecisionError),
    #[error("assessment task did not complete: {0}")]
    Interrupted(String),
}

/// Outcome for one company of a portfolio run.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioEntry {
    pub company_name: String,
    pub cr_number: String,
    pub outcome: Result<DecisionResult, PortfolioError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub assessed: usize,
    pub recommended: usize,
    pub not_recommended: usize,
    pub failed: usize,
}

/// Evaluates every company on the blocking pool. Results keep the input order.
pub async fn assess_portfolio(
    engine: Arc<CreditDecisionEngine>,
    companies: Vec<CompanyRecord>,
    selection: YearSelection,
) -> Vec<PortfolioEntry> {
    let identities: Vec<(String, String)> = companies
        .iter()
        .map(|company| (company.display_name().to_string(), company.cr_number.clone()))
        .collect();

    let mut tasks = JoinSet::new();
    for (index, company) in companies.into_iter().enumerate() {
        let engine = Arc::clone(&engine);
        tasks.spawn_blocking(move || (index, engine.evaluate(&company, selection)));
    }

    let mut outcomes: Vec<Option<Result<DecisionResult, PortfolioError>>> =
        identities.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => outcomes[index] = Some(outcome.map_err(PortfolioError::from)),
            Err(err) => warn!(error = %err, "portfolio assessment task failed"),
        }
    }

    identities
        .into_iter()
        .zip(outcomes)
        .map(|((company_name, cr_number), outcome)| PortfolioEntry {
            company_name,
            cr_number,
            outcome: outcome.unwrap_or_else(|| {
                Err(PortfolioError::Interrupted(
                    "task panicked or was cancelled".to_string(),
                ))
            }),
        })
        .collect()
}

pub fn summarize(entries: &[PortfolioEntry]) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        assessed: entries.len(),
        recommended: 0,
        not_recommended: 0,
        failed: 0,
    };

    for entry in entries {
        match &entry.outcome {
            Ok(result) if result.final_recommendation == FinalRecommendation::Recommended => {
                summary.recommended += 1
            }
            Ok(_) => summary.not_recommended += 1,
            Err(_) => summary.failed += 1,
        }
    }

    summary
}
