use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric statement figure with an explicit default for values missing from the source.
///
/// Absent figures resolve to [`Figure::DEFAULT`] and remember that they were defaulted, so
/// the justification can tell a reported zero from a missing one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    value: f64,
    reported: bool,
}

impl Figure {
    pub const DEFAULT: f64 = 0.0;

    pub const fn reported(value: f64) -> Self {
        Self {
            value,
            reported: true,
        }
    }

    pub const fn defaulted() -> Self {
        Self {
            value: Self::DEFAULT,
            reported: false,
        }
    }

    pub fn from_source(value: Option<f64>) -> Self {
        match value {
            Some(value) => Self::reported(value),
            None => Self::defaulted(),
        }
    }

    pub const fn value(self) -> f64 {
        self.value
    }

    pub const fn is_reported(self) -> bool {
        self.reported
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::defaulted()
    }
}

impl From<f64> for Figure {
    fn from(value: f64) -> Self {
        Self::reported(value)
    }
}

impl Serialize for Figure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value)
    }
}

impl<'de> Deserialize<'de> for Figure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(Self::from_source(value))
    }
}

/// One company-year of normalized financial figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPeriodRecord {
    pub company_name: String,
    pub organization_id: String,
    pub cr_number: String,
    pub year: i32,
    pub revenue: Figure,
    pub net_profit: Figure,
    pub cash_flow_from_operating_activities: Figure,
    pub current_ratio: Figure,
    pub dscr: Figure,
    pub debt_ratio: Figure,
    pub net_profit_margin: Figure,
    pub net_profit_margin_growth: Figure,
    pub gross_profit_margin_growth: Figure,
    pub leverage_ratio: Figure,
    pub gearing_ratio: Figure,
    pub total_equity: Figure,
    pub revenue_growth: Figure,
    pub interest_coverage: Figure,
    pub external_debt_sales_ratio: Figure,
    pub receivable_percentage_sales: Figure,
    pub days_sales_outstanding: Figure,
}

/// Credit bureau indicator; `None` in a reading means the bureau had no information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagStatus {
    Green,
    Red,
}

impl FlagStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Red => "RED",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GREEN" => Some(Self::Green),
            "RED" => Some(Self::Red),
            _ => None,
        }
    }
}

/// Value reported next to a bureau flag. Bureaus send counts, amounts, or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BureauValue {
    Number(f64),
    Text(String),
}

impl BureauValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().replace(',', "").parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BureauChannel {
    Commercial,
    Consumer,
}

impl BureauChannel {
    pub const fn ordered() -> [Self; 2] {
        [Self::Commercial, Self::Consumer]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Commercial => "commercial",
            Self::Consumer => "consumer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BureauParameter {
    Dpd,
    BouncedCheques,
    UnsettledDefaults,
    CourtCases,
}

impl BureauParameter {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Dpd,
            Self::BouncedCheques,
            Self::UnsettledDefaults,
            Self::CourtCases,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dpd => "Days Past Due",
            Self::BouncedCheques => "Bounced Cheques",
            Self::UnsettledDefaults => "Unsettled Defaults",
            Self::CourtCases => "Court Cases",
        }
    }

    const fn flag_prefix(self) -> &'static str {
        match self {
            Self::Dpd => "dpd",
            Self::BouncedCheques => "bounced_cheque",
            Self::UnsettledDefaults => "unsettled",
            Self::CourtCases => "court_cases",
        }
    }

    /// Field name used by credit officers, e.g. `dpd_commercial_flag`.
    pub fn flag_field(self, channel: BureauChannel) -> String {
        format!("{}_{}_flag", self.flag_prefix(), channel.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BureauReading {
    pub value: Option<BureauValue>,
    pub flag: Option<FlagStatus>,
}

impl BureauReading {
    pub fn is_green(&self) -> bool {
        self.flag == Some(FlagStatus::Green)
    }

    pub fn is_red(&self) -> bool {
        self.flag == Some(FlagStatus::Red)
    }

    /// Red or missing. Used where "no information" must not count as a clean record.
    pub fn is_red_or_unknown(&self) -> bool {
        self.flag != Some(FlagStatus::Green)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelFlags {
    pub dpd: BureauReading,
    pub bounced_cheques: BureauReading,
    pub unsettled_defaults: BureauReading,
    pub court_cases: BureauReading,
}

impl ChannelFlags {
    pub fn reading(&self, parameter: BureauParameter) -> &BureauReading {
        match parameter {
            BureauParameter::Dpd => &self.dpd,
            BureauParameter::BouncedCheques => &self.bounced_cheques,
            BureauParameter::UnsettledDefaults => &self.unsettled_defaults,
            BureauParameter::CourtCases => &self.court_cases,
        }
    }

    pub(crate) fn reading_mut(&mut self, parameter: BureauParameter) -> &mut BureauReading {
        match parameter {
            BureauParameter::Dpd => &mut self.dpd,
            BureauParameter::BouncedCheques => &mut self.bounced_cheques,
            BureauParameter::UnsettledDefaults => &mut self.unsettled_defaults,
            BureauParameter::CourtCases => &mut self.court_cases,
        }
    }
}

/// Bureau flags for both channels of a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditBureauFlagSet {
    pub commercial: ChannelFlags,
    pub consumer: ChannelFlags,
}

impl CreditBureauFlagSet {
    pub fn channel(&self, channel: BureauChannel) -> &ChannelFlags {
        match channel {
            BureauChannel::Commercial => &self.commercial,
            BureauChannel::Consumer => &self.consumer,
        }
    }

    pub(crate) fn channel_mut(&mut self, channel: BureauChannel) -> &mut ChannelFlags {
        match channel {
            BureauChannel::Commercial => &mut self.commercial,
            BureauChannel::Consumer => &mut self.consumer,
        }
    }

    pub fn reading(&self, channel: BureauChannel, parameter: BureauParameter) -> &BureauReading {
        self.channel(channel).reading(parameter)
    }

    /// All eight readings in channel-major order.
    pub fn readings(&self) -> Vec<(BureauChannel, BureauParameter, &BureauReading)> {
        BureauChannel::ordered()
            .into_iter()
            .flat_map(|channel| {
                BureauParameter::ordered()
                    .into_iter()
                    .map(move |parameter| (channel, parameter, self.reading(channel, parameter)))
            })
            .collect()
    }

    /// True when every flag is GREEN or carries no information.
    pub fn all_clear(&self) -> bool {
        self.readings()
            .into_iter()
            .all(|(_, _, reading)| !reading.is_red())
    }

    pub fn red_flag_fields(&self) -> Vec<String> {
        self.readings()
            .into_iter()
            .filter(|(_, _, reading)| reading.is_red())
            .map(|(channel, parameter, _)| parameter.flag_field(channel))
            .collect()
    }

    /// Largest numeric value reported for a parameter across both channels.
    pub fn max_value(&self, parameter: BureauParameter) -> Option<f64> {
        BureauChannel::ordered()
            .into_iter()
            .filter_map(|channel| {
                self.reading(channel, parameter)
                    .value
                    .as_ref()
                    .and_then(BureauValue::as_number)
            })
            .reduce(f64::max)
    }
}

/// Final outcome of the partial acceptance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalRecommendation {
    Recommended,
    NotRecommended,
}

impl FinalRecommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recommended => "RECOMMENDED",
            Self::NotRecommended => "NOT RECOMMENDED",
        }
    }

    pub const fn financing_label(self) -> &'static str {
        match self {
            Self::Recommended => "Recommend for financing",
            Self::NotRecommended => "Not Recommend for financing",
        }
    }
}
