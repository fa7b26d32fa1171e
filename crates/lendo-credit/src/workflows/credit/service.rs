use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::engine::CreditDecisionEngine;
use super::error::DecisionError;
use super::evaluation::RulebookConfig;
use super::extraction::YearSelection;
use super::notification::{
    validate_recipient, CreditFileNotice, NotificationError, NotificationSender,
};
use super::record::CompanyRecord;
use super::report::DecisionResult;
use super::source::{CompanySource, SourceError};

/// Service composing the company source, the decision engine and the notification hook.
pub struct CreditAssessmentService<S, N> {
    source: Arc<S>,
    notifier: Arc<N>,
    engine: Arc<CreditDecisionEngine>,
}

impl<S, N> CreditAssessmentService<S, N>
where
    S: CompanySource + 'static,
    N: NotificationSender + 'static,
{
    pub fn new(source: Arc<S>, notifier: Arc<N>, config: RulebookConfig) -> Self {
        Self {
            source,
            notifier,
            engine: Arc::new(CreditDecisionEngine::new(config)),
        }
    }

    pub fn engine(&self) -> Arc<CreditDecisionEngine> {
        Arc::clone(&self.engine)
    }

    pub fn companies(&self) -> Result<Vec<CompanyRecord>, CreditServiceError> {
        Ok(self.source.companies()?)
    }

    /// Decision for the company matching `query` (organization id or CR number).
    pub fn assess(
        &self,
        query: &str,
        selection: YearSelection,
    ) -> Result<DecisionResult, CreditServiceError> {
        let company = self.locate(query)?;
        self.assess_record(&company, selection)
    }

    pub fn assess_all_years(&self, query: &str) -> Result<Vec<DecisionResult>, CreditServiceError> {
        let company = self.locate(query)?;
        let results = self
            .engine
            .evaluate_all_years(&company)
            .inspect_err(|err| warn!(query, error = %err, "multi-year assessment failed"))?;

        info!(
            query,
            years = results.len(),
            "assessed all statement years"
        );
        Ok(results)
    }

    /// Decision for a caller-supplied record; the source is not consulted.
    pub fn assess_record(
        &self,
        company: &CompanyRecord,
        selection: YearSelection,
    ) -> Result<DecisionResult, CreditServiceError> {
        let result = self.engine.evaluate(company, selection).inspect_err(|err| {
            warn!(company = company.display_name(), error = %err, "assessment failed")
        })?;

        info!(
            company = %result.company_name,
            year = result.year,
            percent_met = result.percent_met,
            recommendation = result.final_recommendation.label(),
            grade = result.grade.label(),
            "credit decision produced"
        );
        Ok(result)
    }

    /// Assesses the selected year and hands the credit file to the notification sender.
    pub fn notify(
        &self,
        query: &str,
        selection: YearSelection,
        recipient: &str,
        today: NaiveDate,
    ) -> Result<CreditFileNotice, CreditServiceError> {
        let recipient = validate_recipient(recipient)?;
        let result = self.assess(query, selection)?;
        let notice = CreditFileNotice::compose(&result, recipient, today);

        self.notifier
            .send(notice.clone())
            .inspect_err(|err| warn!(query, error = %err, "credit file notification failed"))?;

        info!(
            query,
            recipient = %notice.recipient,
            subject = %notice.subject,
            "credit file sent"
        );
        Ok(notice)
    }

    fn locate(&self, query: &str) -> Result<CompanyRecord, CreditServiceError> {
        match self.source.find(query)? {
            Some(company) => Ok(company),
            None => {
                warn!(query, "no company matched query");
                Err(DecisionError::AmbiguousOrganization {
                    query: query.to_string(),
                }
                .into())
            }
        }
    }
}

/// Error raised by the credit assessment service.
#[derive(Debug, thiserror::Error)]
pub enum CreditServiceError {
    #[error(transparent)]
    Decision(#[from] DecisionError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
