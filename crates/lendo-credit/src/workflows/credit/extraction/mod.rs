pub(crate) mod mapping;
pub(crate) mod normalizer;

use serde::{Deserialize, Serialize};

use super::domain::{
    BureauChannel, BureauReading, CreditBureauFlagSet, Figure, FinancialPeriodRecord,
};
use super::error::DecisionError;
use super::record::{BureauSection, CompanyRecord, StatementEntry};

/// Which fiscal year to evaluate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearSelection {
    #[default]
    Latest,
    Fiscal(i32),
}

impl From<Option<i32>> for YearSelection {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Self::Latest, Self::Fiscal)
    }
}

/// Typed figures and bureau flags for a single company-year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedPeriod {
    pub period: FinancialPeriodRecord,
    pub flags: CreditBureauFlagSet,
}

/// Flattens a raw company record into typed inputs for the rulebook and scorecard.
pub struct FinancialRecordExtractor;

impl FinancialRecordExtractor {
    pub fn extract(
        company: &CompanyRecord,
        selection: YearSelection,
    ) -> Result<ExtractedPeriod, DecisionError> {
        let statements = statements(company)?;
        let entry = select_entry(statements, selection)?;
        let year = entry.year.ok_or(DecisionError::PeriodNotFound { year: None })?;

        tracing::debug!(
            company = company.display_name(),
            requested = ?selection,
            year,
            "selected statement period"
        );

        Ok(ExtractedPeriod {
            period: period_record(company, entry, year),
            flags: bureau_flags(company),
        })
    }

    /// Distinct fiscal years present in the record, ascending.
    pub fn available_years(company: &CompanyRecord) -> Result<Vec<i32>, DecisionError> {
        let mut years: Vec<i32> = statements(company)?
            .iter()
            .filter_map(|entry| entry.year)
            .collect();
        years.sort_unstable();
        years.dedup();
        Ok(years)
    }
}

fn statements(company: &CompanyRecord) -> Result<&[StatementEntry], DecisionError> {
    company
        .financial_statement
        .as_deref()
        .ok_or(DecisionError::MalformedRecord {
            section: "financialStatement",
        })
}

fn select_entry(
    statements: &[StatementEntry],
    selection: YearSelection,
) -> Result<&StatementEntry, DecisionError> {
    match selection {
        YearSelection::Fiscal(year) => statements
            .iter()
            .find(|entry| entry.year == Some(year))
            .ok_or(DecisionError::PeriodNotFound { year: Some(year) }),
        YearSelection::Latest => {
            let mut latest: Option<&StatementEntry> = None;
            for entry in statements.iter().filter(|entry| entry.year.is_some()) {
                if latest.map_or(true, |current| entry.year > current.year) {
                    latest = Some(entry);
                }
            }
            latest.ok_or(DecisionError::PeriodNotFound { year: None })
        }
    }
}

fn period_record(company: &CompanyRecord, entry: &StatementEntry, year: i32) -> FinancialPeriodRecord {
    let spreading = &entry.ratios.financial_spreading;
    FinancialPeriodRecord {
        company_name: company.display_name().to_string(),
        organization_id: company.organization_id.clone(),
        cr_number: company.cr_number.clone(),
        year,
        revenue: Figure::from_source(entry.profit_and_loss.total_revenue),
        net_profit: Figure::from_source(entry.profit_and_loss.net_profit),
        cash_flow_from_operating_activities: Figure::from_source(
            entry
                .cashflow
                .net_cash_flows_from_used_in_operating_activities,
        ),
        current_ratio: Figure::from_source(spreading.current_ratio),
        dscr: Figure::from_source(spreading.dscr),
        debt_ratio: Figure::from_source(spreading.debt_ratio),
        net_profit_margin: Figure::from_source(spreading.net_profit_margin),
        net_profit_margin_growth: Figure::from_source(spreading.net_profit_margin_growth),
        gross_profit_margin_growth: Figure::from_source(spreading.gross_profit_margin_growth),
        leverage_ratio: Figure::from_source(spreading.leverage_ratio),
        gearing_ratio: Figure::from_source(spreading.gearing_ratio),
        total_equity: Figure::from_source(entry.total_equity),
        revenue_growth: Figure::from_source(spreading.revenue_growth),
        interest_coverage: Figure::from_source(spreading.interest_coverage),
        external_debt_sales_ratio: Figure::from_source(spreading.external_debt_sales_ratio),
        receivable_percentage_sales: Figure::from_source(spreading.receivable_percentage_sales),
        days_sales_outstanding: Figure::from_source(spreading.days_sales_outstanding),
    }
}

fn bureau_flags(company: &CompanyRecord) -> CreditBureauFlagSet {
    let mut flags = CreditBureauFlagSet::default();
    for channel in BureauChannel::ordered() {
        let section = match channel {
            BureauChannel::Commercial => company.commercial.as_ref(),
            BureauChannel::Consumer => company.consumer.as_ref(),
        };
        if let Some(section) = section {
            apply_section(&mut flags, channel, section);
        }
    }
    flags
}

fn apply_section(flags: &mut CreditBureauFlagSet, channel: BureauChannel, section: &BureauSection) {
    let mut seen = Vec::with_capacity(4);
    for rule in &section.rules {
        let Some(parameter) = mapping::parameter_for(&rule.parameter) else {
            continue;
        };
        if seen.contains(&parameter) {
            continue;
        }
        seen.push(parameter);
        *flags.channel_mut(channel).reading_mut(parameter) = BureauReading {
            value: rule.value.clone(),
            flag: rule.flag,
        };
    }
}
