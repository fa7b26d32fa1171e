use super::record::CompanyRecord;

/// Read-only snapshot of company records.
pub trait CompanySource: Send + Sync {
    fn companies(&self) -> Result<Vec<CompanyRecord>, SourceError>;

    /// First record whose organization id or CR number equals `query`.
    fn find(&self, query: &str) -> Result<Option<CompanyRecord>, SourceError> {
        Ok(self
            .companies()?
            .into_iter()
            .find(|company| company.matches(query)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("company source unavailable: {0}")]
    Unavailable(String),
}
