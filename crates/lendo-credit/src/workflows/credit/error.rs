/// Structured failure raised while producing a decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    #[error("no financial statement found for {}", describe_year(.year))]
    PeriodNotFound { year: Option<i32> },
    #[error("record is missing required section `{section}`")]
    MalformedRecord { section: &'static str },
    #[error("no matching company for `{query}`")]
    AmbiguousOrganization { query: String },
}

fn describe_year(year: &Option<i32>) -> String {
    match year {
        Some(year) => format!("year {year}"),
        None => "any year".to_string(),
    }
}
