use chrono::NaiveDate;
use serde::Serialize;

use super::report::{DecisionResult, SummaryPayload};

/// Outbound hook for delivering a credit file (e-mail or similar transports).
pub trait NotificationSender: Send + Sync {
    fn send(&self, notice: CreditFileNotice) -> Result<(), NotificationError>;
}

/// Message handed to the transport: recipient, subject, rendered body and the summary payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditFileNotice {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub summary: SummaryPayload,
    pub generated_on: NaiveDate,
}

impl CreditFileNotice {
    pub(crate) fn compose(result: &DecisionResult, recipient: String, today: NaiveDate) -> Self {
        let subject = format!(
            "Credit file: {} (CR {}) FY{} - {}",
            result.company_name,
            result.cr_number,
            result.year,
            result.final_recommendation.financing_label()
        );

        let summary = &result.summary_payload;
        let body = [
            "Dear Credit Committee,".to_string(),
            String::new(),
            format!(
                "Please find below the credit assessment for {} prepared on {}.",
                result.company_name,
                today.format("%Y-%m-%d")
            ),
            String::new(),
            format!("Final decision: {}", summary.final_decision),
            format!("Risk rating: {}", summary.risk_rating),
            format!("Revenue: {}", summary.revenue),
            format!("Net profit margin: {}", summary.net_profit_margin),
            format!("DSCR: {}", summary.dscr),
            format!("Days past due: {}", summary.dpd),
            format!("Bounced cheques: {}", summary.bounced_cheques),
            String::new(),
            result.justification_text.clone(),
        ]
        .join("\n");

        Self {
            recipient,
            subject,
            body,
            summary: summary.clone(),
            generated_on: today,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("invalid recipient address `{0}`")]
    InvalidRecipient(String),
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Minimal structural check: one `@`, non-empty local part, dotted domain, no whitespace.
pub(crate) fn validate_recipient(raw: &str) -> Result<String, NotificationError> {
    let candidate = raw.trim();
    let invalid = || NotificationError::InvalidRecipient(candidate.to_string());

    if candidate.is_empty() || candidate.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = candidate.split_once('@').ok_or_else(invalid)?;
    let domain_ok = !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty());

    if local.is_empty() || !domain_ok {
        return Err(invalid());
    }

    Ok(candidate.to_string())
}
