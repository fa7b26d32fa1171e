//! Raw company record as delivered by the financial statement data source.
//!
//! Field parsing is deliberately lenient: numbers may arrive as strings, sections may be
//! `null`, and unknown values collapse to `None`. Required structure is enforced later by
//! the extractor, which knows which absences are errors.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::domain::{BureauValue, FlagStatus};
use super::profile::QualitativeProfile;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: String,
    #[serde(
        rename = "commercialRegistrationNumber",
        alias = "crNumber",
        default,
        deserialize_with = "lenient_text"
    )]
    pub cr_number: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub organization_id: String,
    #[serde(default)]
    pub financial_statement: Option<Vec<StatementEntry>>,
    #[serde(default)]
    pub commercial: Option<BureauSection>,
    #[serde(default)]
    pub consumer: Option<BureauSection>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub qualitative: QualitativeProfile,
}

impl CompanyRecord {
    /// Exact match on organization id or commercial registration number.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        !query.is_empty() && (self.organization_id == query || self.cr_number == query)
    }

    pub fn display_name(&self) -> &str {
        if self.company_name.trim().is_empty() {
            "Unknown"
        } else {
            &self.company_name
        }
    }
}

/// One fiscal year of statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementEntry {
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_equity: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ratios: StatementRatios,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profit_and_loss: ProfitAndLoss,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cashflow: CashflowStatement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementRatios {
    #[serde(default, deserialize_with = "null_as_default")]
    pub financial_spreading: FinancialSpreading,
}

/// Ratios computed by the spreading step. Growth, margin and receivable figures are
/// percentages; `external_debt_sales_ratio` is a fraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSpreading {
    #[serde(deserialize_with = "lenient_number")]
    pub current_ratio: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub dscr: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub debt_ratio: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub net_profit_margin: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub net_profit_margin_growth: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub gross_profit_margin_growth: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub leverage_ratio: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub gearing_ratio: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub revenue_growth: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub interest_coverage: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub external_debt_sales_ratio: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub receivable_percentage_sales: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub days_sales_outstanding: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfitAndLoss {
    #[serde(deserialize_with = "lenient_number")]
    pub net_profit: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub total_revenue: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CashflowStatement {
    #[serde(deserialize_with = "lenient_number")]
    pub net_cash_flows_from_used_in_operating_activities: Option<f64>,
}

/// Credit bureau section (`commercial` or `consumer`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BureauSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<BureauRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BureauRule {
    #[serde(default, deserialize_with = "lenient_text")]
    pub parameter: String,
    #[serde(default, deserialize_with = "lenient_bureau_value")]
    pub value: Option<BureauValue>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub flag: Option<FlagStatus>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| number_from_value(&value)))
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let cleaned = text.trim().trim_end_matches('%').replace(',', "");
            cleaned.trim().parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(number_from_value)
        .filter(|year| year.fract() == 0.0 && *year >= i32::MIN as f64 && *year <= i32::MAX as f64)
        .map(|year| year as i32))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => text.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    })
}

fn lenient_bureau_value<'de, D>(deserializer: D) -> Result<Option<BureauValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(number)) => number.as_f64().map(BureauValue::Number),
        Some(Value::String(text)) => Some(BureauValue::Text(text)),
        _ => None,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<FlagStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => FlagStatus::parse(&text),
        _ => None,
    })
}
