use super::error::DecisionError;
use super::evaluation::{evaluate_period, RulebookConfig};
use super::extraction::{FinancialRecordExtractor, YearSelection};
use super::record::CompanyRecord;
use super::report::{assemble, DecisionResult};

/// Stateless pipeline: extract, apply the rulebook, aggregate, score, assemble.
#[derive(Debug, Clone)]
pub struct CreditDecisionEngine {
    config: RulebookConfig,
}

impl CreditDecisionEngine {
    pub fn new(config: RulebookConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RulebookConfig {
        &self.config
    }

    pub fn evaluate(
        &self,
        company: &CompanyRecord,
        selection: YearSelection,
    ) -> Result<DecisionResult, DecisionError> {
        let extracted = FinancialRecordExtractor::extract(company, selection)?;
        let evaluation = evaluate_period(&extracted, &company.qualitative, &self.config);
        Ok(assemble(extracted, evaluation, &self.config))
    }

    /// One decision per fiscal year present, oldest first.
    pub fn evaluate_all_years(
        &self,
        company: &CompanyRecord,
    ) -> Result<Vec<DecisionResult>, DecisionError> {
        let years = FinancialRecordExtractor::available_years(company)?;
        if years.is_empty() {
            return Err(DecisionError::PeriodNotFound { year: None });
        }

        years
            .into_iter()
            .map(|year| self.evaluate(company, YearSelection::Fiscal(year)))
            .collect()
    }
}

impl Default for CreditDecisionEngine {
    fn default() -> Self {
        Self::new(RulebookConfig::standard())
    }
}
