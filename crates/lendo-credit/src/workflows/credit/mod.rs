//! Credit decision engine for SME financing applications.
//!
//! A company record flows through extraction, the hard-threshold rulebook, the partial
//! acceptance aggregate and the qualitative scorecard, and comes back as one
//! [`DecisionResult`]. The core is pure and synchronous; the service, router and portfolio
//! runner wrap it for callers.

pub mod domain;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod extraction;
mod format;
pub mod notification;
pub mod portfolio;
pub mod profile;
pub mod record;
pub mod report;
pub mod router;
pub mod service;
pub mod source;

#[cfg(test)]
mod tests;

pub use domain::{
    BureauChannel, BureauParameter, BureauReading, BureauValue, ChannelFlags,
    CreditBureauFlagSet, Figure, FinalRecommendation, FinancialPeriodRecord, FlagStatus,
};
pub use engine::CreditDecisionEngine;
pub use error::DecisionError;
pub use evaluation::{
    Grade, ObservedValue, PartialAcceptance, RuleOutcome, RulebookConfig, RulebookRule,
    ScoreEntry, Scorecard, ScorecardFactor,
};
pub use extraction::{ExtractedPeriod, FinancialRecordExtractor, YearSelection};
pub use notification::{CreditFileNotice, NotificationError, NotificationSender};
pub use portfolio::{assess_portfolio, PortfolioEntry, PortfolioError, PortfolioSummary};
pub use profile::QualitativeProfile;
pub use record::{BureauRule, BureauSection, CompanyRecord, StatementEntry};
pub use report::{write_csv, DecisionResult, ExportError, SummaryPayload};
pub use router::credit_router;
pub use service::{CreditAssessmentService, CreditServiceError};
pub use source::{CompanySource, SourceError};
