//! Qualitative business attributes consumed by the scorecard.
//!
//! Every attribute is a closed enumeration. Source text is matched case- and
//! whitespace-insensitively against a fixed alias list; anything else resolves to `None`,
//! which the scorecard reports as "no score" instead of guessing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::extraction::normalizer::normalize_label;
use super::record::lenient_number;

/// Closed enumeration parsed from free-form source labels.
pub trait Categorical: Copy + Sized + 'static {
    /// Normalized aliases. The first alias of each variant is its normalized label.
    const ALIASES: &'static [(&'static str, Self)];

    fn label(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize_label(raw);
        Self::ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, value)| *value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NitaqatColor {
    Red,
    Yellow,
    LowGreen,
    MediumGreen,
    HighGreen,
    Green,
    Platinum,
}

impl Categorical for NitaqatColor {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("red", Self::Red),
        ("yellow", Self::Yellow),
        ("low green", Self::LowGreen),
        ("low-green", Self::LowGreen),
        ("medium green", Self::MediumGreen),
        ("mid green", Self::MediumGreen),
        ("high green", Self::HighGreen),
        ("green", Self::Green),
        ("platinum", Self::Platinum),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Yellow => "Yellow",
            Self::LowGreen => "Low Green",
            Self::MediumGreen => "Medium Green",
            Self::HighGreen => "High Green",
            Self::Green => "Green",
            Self::Platinum => "Platinum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketReach {
    LocalIncludingGcc,
    OtherCountries,
    OtherCountriesExcludingGcc,
}

impl Categorical for MarketReach {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("local market including gcc", Self::LocalIncludingGcc),
        ("local market", Self::LocalIncludingGcc),
        ("local", Self::LocalIncludingGcc),
        (">25% of sales to other countries", Self::OtherCountries),
        (">25% of sales of other countries", Self::OtherCountries),
        ("other countries", Self::OtherCountries),
        (
            ">25% of sales to other countries excluding gcc",
            Self::OtherCountriesExcludingGcc,
        ),
        (
            ">25% of sales of other countries excluding gcc",
            Self::OtherCountriesExcludingGcc,
        ),
        ("other countries excluding gcc", Self::OtherCountriesExcludingGcc),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::LocalIncludingGcc => "Local market including GCC",
            Self::OtherCountries => ">25% of sales to other countries",
            Self::OtherCountriesExcludingGcc => ">25% of sales to other countries excluding GCC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Industry {
    InformationAndCommunication,
    ArtsAndRecreation,
    Mining,
    Utilities,
    Food,
    Finance,
    Education,
    ProfessionalServices,
    Health,
    Retail,
    MotorRepair,
    Agriculture,
    Forestry,
    Manufacturing,
    Transport,
    RealEstate,
    WaterSupply,
    WasteManagement,
    Defense,
    OtherServices,
    Households,
}

impl Categorical for Industry {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("information & communication", Self::InformationAndCommunication),
        ("information and communication", Self::InformationAndCommunication),
        ("ict", Self::InformationAndCommunication),
        ("arts & recreation", Self::ArtsAndRecreation),
        ("arts and recreation", Self::ArtsAndRecreation),
        ("mining", Self::Mining),
        ("utilities", Self::Utilities),
        ("food", Self::Food),
        ("finance", Self::Finance),
        ("education", Self::Education),
        ("professional services", Self::ProfessionalServices),
        ("prof. services", Self::ProfessionalServices),
        ("health", Self::Health),
        ("retail", Self::Retail),
        ("motor repair", Self::MotorRepair),
        ("agriculture", Self::Agriculture),
        ("forestry", Self::Forestry),
        ("manufacturing", Self::Manufacturing),
        ("transport", Self::Transport),
        ("real estate", Self::RealEstate),
        ("water supply", Self::WaterSupply),
        ("waste management", Self::WasteManagement),
        ("waste mgmt", Self::WasteManagement),
        ("defense", Self::Defense),
        ("other services", Self::OtherServices),
        ("households", Self::Households),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::InformationAndCommunication => "Information & Communication",
            Self::ArtsAndRecreation => "Arts & Recreation",
            Self::Mining => "Mining",
            Self::Utilities => "Utilities",
            Self::Food => "Food",
            Self::Finance => "Finance",
            Self::Education => "Education",
            Self::ProfessionalServices => "Professional Services",
            Self::Health => "Health",
            Self::Retail => "Retail",
            Self::MotorRepair => "Motor Repair",
            Self::Agriculture => "Agriculture",
            Self::Forestry => "Forestry",
            Self::Manufacturing => "Manufacturing",
            Self::Transport => "Transport",
            Self::RealEstate => "Real Estate",
            Self::WaterSupply => "Water Supply",
            Self::WasteManagement => "Waste Management",
            Self::Defense => "Defense",
            Self::OtherServices => "Other Services",
            Self::Households => "Households",
        }
    }
}

/// Number of customers the company sells to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerBase {
    UpToFive,
    SixToTwenty,
    MoreThanTwenty,
}

impl CustomerBase {
    pub fn from_count(count: f64) -> Self {
        if count <= 5.0 {
            Self::UpToFive
        } else if count <= 20.0 {
            Self::SixToTwenty
        } else {
            Self::MoreThanTwenty
        }
    }
}

impl Categorical for CustomerBase {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("<=5 customers", Self::UpToFive),
        ("<=5", Self::UpToFive),
        ("up to 5 customers", Self::UpToFive),
        ("1-5", Self::UpToFive),
        ("6-20 customers", Self::SixToTwenty),
        ("6-20", Self::SixToTwenty),
        ("between 6 and 20", Self::SixToTwenty),
        (">20 customers", Self::MoreThanTwenty),
        (">20", Self::MoreThanTwenty),
        ("more than 20", Self::MoreThanTwenty),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::UpToFive => "<=5 customers",
            Self::SixToTwenty => "6-20 customers",
            Self::MoreThanTwenty => ">20 customers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryLiquidity {
    Concerning,
    NotApplicable,
    Uncertain,
    ReadyForSale,
}

impl Categorical for InventoryLiquidity {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("inventory liquidity/management is concerning", Self::Concerning),
        ("concerning", Self::Concerning),
        ("n.a. (low inventory or service industry)", Self::NotApplicable),
        ("n.a.", Self::NotApplicable),
        ("n/a", Self::NotApplicable),
        ("not applicable", Self::NotApplicable),
        ("liquidity/management uncertain", Self::Uncertain),
        ("uncertain", Self::Uncertain),
        ("ready for sale w/ proper management system", Self::ReadyForSale),
        ("ready for sale", Self::ReadyForSale),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Concerning => "Inventory liquidity/management is concerning",
            Self::NotApplicable => "N.A. (Low inventory or service industry)",
            Self::Uncertain => "Liquidity/management uncertain",
            Self::ReadyForSale => "Ready for sale w/ proper management system",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundingAccess {
    NoAccess,
    FinancialInstitution,
    OwnerSupport,
}

impl Categorical for FundingAccess {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("no access", Self::NoAccess),
        ("none", Self::NoAccess),
        ("proven access to fi", Self::FinancialInstitution),
        ("proven access to financial institutions", Self::FinancialInstitution),
        ("proven support from owners/related parties", Self::OwnerSupport),
        ("proven support from owners", Self::OwnerSupport),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::NoAccess => "No access",
            Self::FinancialInstitution => "Proven access to FI",
            Self::OwnerSupport => "Proven support from owners/related parties",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CashflowControl {
    Full,
    PartialThirdParty,
    PartialClient,
    NoControl,
}

impl Categorical for CashflowControl {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("full control", Self::Full),
        ("full", Self::Full),
        (
            "partial control (cancelled by third party)",
            Self::PartialThirdParty,
        ),
        ("partial control (cancelled by client)", Self::PartialClient),
        ("no control", Self::NoControl),
        ("none", Self::NoControl),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Full => "Full control",
            Self::PartialThirdParty => "Partial control (cancelled by third party)",
            Self::PartialClient => "Partial control (cancelled by client)",
            Self::NoControl => "No control",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LendoRelationship {
    NoRelationship,
    FrequentPastDues,
    SomePastDues,
    TimelyRepayments,
}

impl Categorical for LendoRelationship {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("no relationship", Self::NoRelationship),
        ("new customer", Self::NoRelationship),
        (
            "frequent pds, unsatisfactory relationship",
            Self::FrequentPastDues,
        ),
        ("frequent pds", Self::FrequentPastDues),
        ("satisfactory relationship with some pds", Self::SomePastDues),
        (
            "satisfactory relationship with timely repayments",
            Self::TimelyRepayments,
        ),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::NoRelationship => "No relationship",
            Self::FrequentPastDues => "Frequent PDs, unsatisfactory relationship",
            Self::SomePastDues => "Satisfactory relationship with some PDs",
            Self::TimelyRepayments => "Satisfactory relationship with timely repayments",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YesNo {
    Yes,
    No,
}

impl Categorical for YesNo {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("yes", Self::Yes),
        ("y", Self::Yes),
        ("true", Self::Yes),
        ("no", Self::No),
        ("n", Self::No),
        ("false", Self::No),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegalStructure {
    JointStockCompany,
    LimitedLiabilityCompany,
    Partnership,
    SoleProprietorship,
}

impl Categorical for LegalStructure {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("joint stock company", Self::JointStockCompany),
        ("jsc", Self::JointStockCompany),
        ("limited liability company", Self::LimitedLiabilityCompany),
        ("llc", Self::LimitedLiabilityCompany),
        ("partnership", Self::Partnership),
        ("sole proprietorship", Self::SoleProprietorship),
        ("establishment", Self::SoleProprietorship),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::JointStockCompany => "Joint Stock Company",
            Self::LimitedLiabilityCompany => "Limited Liability Company",
            Self::Partnership => "Partnership",
            Self::SoleProprietorship => "Sole Proprietorship",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuccessionRisk {
    Low,
    Medium,
    High,
}

impl Categorical for SuccessionRisk {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("low", Self::Low),
        ("medium", Self::Medium),
        ("moderate", Self::Medium),
        ("high", Self::High),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Years of relevant experience, shared by owners and management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceBand {
    MoreThanTenYears,
    FiveToTenYears,
    LessThanFiveYears,
}

impl Categorical for ExperienceBand {
    const ALIASES: &'static [(&'static str, Self)] = &[
        (">10 years", Self::MoreThanTenYears),
        ("more than 10 years", Self::MoreThanTenYears),
        ("5-10 years", Self::FiveToTenYears),
        ("between 5 and 10 years", Self::FiveToTenYears),
        ("<5 years", Self::LessThanFiveYears),
        ("less than 5 years", Self::LessThanFiveYears),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::MoreThanTenYears => ">10 years",
            Self::FiveToTenYears => "5-10 years",
            Self::LessThanFiveYears => "<5 years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreditHistoryCategory {
    Clean,
    MinorDelays,
    SeriousDelinquency,
    NoHistory,
}

impl Categorical for CreditHistoryCategory {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("clean", Self::Clean),
        ("minor delays", Self::MinorDelays),
        ("serious delinquency", Self::SeriousDelinquency),
        ("delinquent", Self::SeriousDelinquency),
        ("no credit history", Self::NoHistory),
        ("no history", Self::NoHistory),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Clean => "Clean",
            Self::MinorDelays => "Minor delays",
            Self::SeriousDelinquency => "Serious delinquency",
            Self::NoHistory => "No credit history",
        }
    }
}

/// Qualitative business attributes for one company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualitativeProfile {
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub nitaqat_color: Option<NitaqatColor>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub market: Option<MarketReach>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub industry: Option<Industry>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub type_of_customer: Option<CustomerBase>,
    #[serde(deserialize_with = "lenient_number")]
    pub customer_concentration: Option<f64>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub inventory_liquidity: Option<InventoryLiquidity>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub access_to_funds: Option<FundingAccess>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub relationship_with_lendo: Option<LendoRelationship>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub control_over_cashflow: Option<CashflowControl>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub change_in_ownership: Option<YesNo>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub change_in_management: Option<YesNo>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub breach_in_financial_covenant: Option<YesNo>,
    #[serde(
        rename = "delayedAFS",
        deserialize_with = "categorical",
        serialize_with = "category_label"
    )]
    pub delayed_afs: Option<YesNo>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub legal_structure: Option<LegalStructure>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub succession_risk: Option<SuccessionRisk>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub owners_experience: Option<ExperienceBand>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub management_experience: Option<ExperienceBand>,
    #[serde(deserialize_with = "categorical", serialize_with = "category_label")]
    pub credit_history_category: Option<CreditHistoryCategory>,
    #[serde(deserialize_with = "lenient_number")]
    pub years_in_business: Option<f64>,
}

impl QualitativeProfile {
    /// Explicit band first, otherwise derived from the reported customer count.
    pub fn customer_base(&self) -> Option<CustomerBase> {
        self.type_of_customer.or_else(|| {
            self.customer_concentration
                .filter(|count| count.is_finite())
                .map(CustomerBase::from_count)
        })
    }
}

fn categorical<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Categorical,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        Value::String(text) => T::parse(&text),
        Value::Bool(true) => T::parse("yes"),
        Value::Bool(false) => T::parse("no"),
        Value::Number(number) => T::parse(&number.to_string()),
        _ => None,
    }))
}

fn category_label<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Categorical,
{
    match value {
        Some(value) => serializer.serialize_some(value.label()),
        None => serializer.serialize_none(),
    }
}
