//! File-backed company source reading the qawaem financial statement snapshot.

mod parser;

use crate::workflows::credit::domain::FinancialPeriodRecord;
use crate::workflows::credit::extraction::{FinancialRecordExtractor, YearSelection};
use crate::workflows::credit::record::CompanyRecord;
use crate::workflows::credit::source::{CompanySource, SourceError};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read qawaem snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid qawaem snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable in-memory copy of the snapshot.
#[derive(Debug, Clone, Default)]
pub struct QawaemDataset {
    companies: Vec<CompanyRecord>,
}

impl QawaemDataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let companies = parser::parse_snapshot(reader)?;
        tracing::debug!(companies = companies.len(), "loaded qawaem snapshot");
        Ok(Self { companies })
    }

    pub fn from_companies(companies: Vec<CompanyRecord>) -> Self {
        Self { companies }
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.companies
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// One typed row per company-year, companies in snapshot order and years ascending.
    /// Companies without a statement array are skipped.
    pub fn flattened_periods(&self) -> Vec<FinancialPeriodRecord> {
        self.companies
            .iter()
            .flat_map(|company| {
                let years = FinancialRecordExtractor::available_years(company).unwrap_or_default();
                years.into_iter().filter_map(move |year| {
                    FinancialRecordExtractor::extract(company, YearSelection::Fiscal(year))
                        .ok()
                        .map(|extracted| extracted.period)
                })
            })
            .collect()
    }
}

impl CompanySource for QawaemDataset {
    fn companies(&self) -> Result<Vec<CompanyRecord>, SourceError> {
        Ok(self.companies.clone())
    }

    fn find(&self, query: &str) -> Result<Option<CompanyRecord>, SourceError> {
        Ok(self
            .companies
            .iter()
            .find(|company| company.matches(query))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "data": [
            {
                "companyName": "Acme Trading",
                "commercialRegistrationNumber": "1010101010",
                "organizationId": "org-1",
                "financialStatement": [
                    { "year": 2023, "profitAndLoss": { "totalRevenue": 2500000 } },
                    { "year": 2022, "profitAndLoss": { "totalRevenue": 1800000 } }
                ]
            },
            { "companyName": "No Statements", "organizationId": "org-2" }
        ]
    }"#;

    #[test]
    fn flattens_periods_in_year_order() {
        let dataset = QawaemDataset::from_reader(SNAPSHOT.as_bytes()).expect("snapshot loads");
        let periods = dataset.flattened_periods();

        assert_eq!(dataset.len(), 2);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].year, 2022);
        assert_eq!(periods[0].revenue.value(), 1_800_000.0);
        assert_eq!(periods[1].year, 2023);
        assert!(!periods[1].dscr.is_reported());
    }

    #[test]
    fn find_matches_organization_or_registration_number() {
        let dataset = QawaemDataset::from_reader(SNAPSHOT.as_bytes()).expect("snapshot loads");

        let by_org = dataset.find("org-1").expect("lookup succeeds");
        let by_cr = dataset.find("1010101010").expect("lookup succeeds");
        let missing = dataset.find("org-9").expect("lookup succeeds");

        assert_eq!(by_org.map(|c| c.company_name), Some("Acme Trading".to_string()));
        assert!(by_cr.is_some());
        assert!(missing.is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = QawaemDataset::from_path("/nonexistent/qawaem_data.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
