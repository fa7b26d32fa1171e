use std::io::Write;

use serde::Serialize;

use super::decision::DecisionResult;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write decision export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush decision export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct DecisionRow<'a> {
    company_name: &'a str,
    cr_number: &'a str,
    organization_id: &'a str,
    year: i32,
    percent_met: f64,
    rules_met: usize,
    rules_failed: usize,
    final_recommendation: &'static str,
    requires_ratio_review: bool,
    total_score: f64,
    grade: &'static str,
}

impl<'a> From<&'a DecisionResult> for DecisionRow<'a> {
    fn from(result: &'a DecisionResult) -> Self {
        Self {
            company_name: &result.company_name,
            cr_number: &result.cr_number,
            organization_id: &result.organization_id,
            year: result.year,
            percent_met: result.percent_met,
            rules_met: result.met_rules.len(),
            rules_failed: result.failed_rules.len(),
            final_recommendation: result.final_recommendation.label(),
            requires_ratio_review: result.requires_ratio_review,
            total_score: result.total_score,
            grade: result.grade.label(),
        }
    }
}

/// Writes one CSV row per decision, header first.
pub fn write_csv<W: Write>(writer: W, results: &[DecisionResult]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer.serialize(DecisionRow::from(result))?;
    }
    csv_writer.flush()?;
    Ok(())
}
