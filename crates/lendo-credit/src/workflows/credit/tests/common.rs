use std::sync::{Arc, Mutex};

use axum::Router;
use serde_json::{json, Value};

use crate::workflows::credit::domain::{
    BureauChannel, BureauParameter, BureauReading, BureauValue, CreditBureauFlagSet, Figure,
    FinancialPeriodRecord, FlagStatus,
};
use crate::workflows::credit::notification::{
    CreditFileNotice, NotificationError, NotificationSender,
};
use crate::workflows::credit::record::CompanyRecord;
use crate::workflows::credit::source::{CompanySource, SourceError};
use crate::workflows::credit::{credit_router, CreditAssessmentService, RulebookConfig};

pub(super) const ORGANIZATION_ID: &str = "org-1001";
pub(super) const CR_NUMBER: &str = "1010654321";

fn bureau_rules(flag: &str) -> Value {
    json!({
        "rules": [
            { "parameter": "Days Past Due", "value": 0, "flag": flag },
            { "parameter": "Bounced Cheques", "value": 0, "flag": flag },
            { "parameter": "Unsettled Defaults", "value": 0, "flag": flag },
            { "parameter": "Court Cases", "value": 0, "flag": flag }
        ]
    })
}

/// Two fiscal years: 2023 passes every rule, 2022 fails three ratio rules.
pub(super) fn company_json() -> Value {
    json!({
        "companyName": "Al Noor Trading Co.",
        "commercialRegistrationNumber": CR_NUMBER,
        "organizationId": ORGANIZATION_ID,
        "financialStatement": [
            {
                "year": 2022,
                "totalEquity": 600000,
                "ratios": { "financialSpreading": {
                    "currentRatio": 1.0,
                    "dscr": 1.4,
                    "debtRatio": 0.55,
                    "netProfitMargin": 8.3,
                    "netProfitMarginGrowth": -2.0,
                    "grossProfitMarginGrowth": 1.0,
                    "leverageRatio": 2.0,
                    "gearingRatio": 1.9,
                    "revenueGrowth": 4.0,
                    "interestCoverage": 2.5,
                    "externalDebtSalesRatio": 0.3,
                    "receivablePercentageSales": 60.0,
                    "daysSalesOutstanding": 150
                }},
                "profitAndLoss": { "netProfit": 150000, "totalRevenue": 1800000 },
                "cashflow": { "netCashFlowsFromUsedInOperatingActivities": 120000 }
            },
            {
                "year": 2023,
                "totalEquity": 800000,
                "ratios": { "financialSpreading": {
                    "currentRatio": 1.8,
                    "dscr": 2.1,
                    "debtRatio": 0.4,
                    "netProfitMargin": 12.0,
                    "netProfitMarginGrowth": 4.0,
                    "grossProfitMarginGrowth": 2.0,
                    "leverageRatio": 1.5,
                    "gearingRatio": 1.2,
                    "revenueGrowth": 18.0,
                    "interestCoverage": 5.0,
                    "externalDebtSalesRatio": 0.2,
                    "receivablePercentageSales": 45.0,
                    "daysSalesOutstanding": 90
                }},
                "profitAndLoss": { "netProfit": 300000, "totalRevenue": 2500000 },
                "cashflow": { "netCashFlowsFromUsedInOperatingActivities": 450000 }
            }
        ],
        "commercial": bureau_rules("GREEN"),
        "consumer": bureau_rules("GREEN"),
        "qualitative": {
            "yearsInBusiness": 12,
            "nitaqatColor": "Platinum",
            "market": "Local market including GCC",
            "industry": "Information & Communication",
            "typeOfCustomer": ">20 customers",
            "inventoryLiquidity": "Ready for sale",
            "accessToFunds": "Proven support from owners/related parties",
            "controlOverCashflow": "Full control",
            "relationshipWithLendo": "Satisfactory relationship with timely repayments",
            "changeInOwnership": "No",
            "changeInManagement": "No",
            "breachInFinancialCovenant": "No",
            "delayedAFS": "No",
            "legalStructure": "Limited Liability Company",
            "successionRisk": "Low",
            "ownersExperience": ">10 years",
            "managementExperience": "5-10 years",
            "creditHistoryCategory": "Clean"
        }
    })
}

pub(super) fn company() -> CompanyRecord {
    serde_json::from_value(company_json()).expect("fixture parses")
}

/// Scorecard total of the 2023 period of [`company`].
pub(super) const LATEST_TOTAL_SCORE: f64 = 78.9;

pub(super) fn company_with_flag(
    channel: BureauChannel,
    parameter: BureauParameter,
    flag: &str,
) -> CompanyRecord {
    let mut raw = company_json();
    let rules = raw[channel.label()]["rules"]
        .as_array_mut()
        .expect("fixture has rules");
    for rule in rules.iter_mut() {
        if rule["parameter"] == parameter.label() {
            rule["flag"] = json!(flag);
        }
    }
    serde_json::from_value(raw).expect("fixture parses")
}

pub(super) fn set_spreading(raw: &mut Value, year_index: usize, field: &str, value: Value) {
    raw["financialStatement"][year_index]["ratios"]["financialSpreading"][field] = value;
}

/// Period that passes every rulebook threshold.
pub(super) fn passing_period() -> FinancialPeriodRecord {
    FinancialPeriodRecord {
        company_name: "Al Noor Trading Co.".to_string(),
        organization_id: ORGANIZATION_ID.to_string(),
        cr_number: CR_NUMBER.to_string(),
        year: 2023,
        revenue: Figure::reported(2_500_000.0),
        net_profit: Figure::reported(300_000.0),
        cash_flow_from_operating_activities: Figure::reported(450_000.0),
        current_ratio: Figure::reported(1.8),
        dscr: Figure::reported(2.1),
        debt_ratio: Figure::reported(0.4),
        net_profit_margin: Figure::reported(12.0),
        net_profit_margin_growth: Figure::reported(4.0),
        gross_profit_margin_growth: Figure::reported(2.0),
        leverage_ratio: Figure::reported(1.5),
        gearing_ratio: Figure::reported(1.2),
        total_equity: Figure::reported(800_000.0),
        revenue_growth: Figure::reported(18.0),
        interest_coverage: Figure::reported(5.0),
        external_debt_sales_ratio: Figure::reported(0.2),
        receivable_percentage_sales: Figure::reported(45.0),
        days_sales_outstanding: Figure::reported(90.0),
    }
}

pub(super) fn green_flags() -> CreditBureauFlagSet {
    let mut flags = CreditBureauFlagSet::default();
    for channel in BureauChannel::ordered() {
        for parameter in BureauParameter::ordered() {
            *flags.channel_mut(channel).reading_mut(parameter) = BureauReading {
                value: Some(BureauValue::Number(0.0)),
                flag: Some(FlagStatus::Green),
            };
        }
    }
    flags
}

pub(super) fn build_service() -> (
    CreditAssessmentService<MemorySource, MemoryNotifier>,
    Arc<MemorySource>,
    Arc<MemoryNotifier>,
) {
    let source = Arc::new(MemorySource::with(vec![company()]));
    let notifier = Arc::new(MemoryNotifier::default());
    let service =
        CreditAssessmentService::new(source.clone(), notifier.clone(), RulebookConfig::standard());
    (service, source, notifier)
}

pub(super) fn router_with_service<S, N>(service: CreditAssessmentService<S, N>) -> Router
where
    S: CompanySource + 'static,
    N: NotificationSender + 'static,
{
    credit_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemorySource {
    companies: Arc<Mutex<Vec<CompanyRecord>>>,
}

impl MemorySource {
    pub(super) fn with(companies: Vec<CompanyRecord>) -> Self {
        Self {
            companies: Arc::new(Mutex::new(companies)),
        }
    }
}

impl CompanySource for MemorySource {
    fn companies(&self) -> Result<Vec<CompanyRecord>, SourceError> {
        Ok(self.companies.lock().expect("source mutex poisoned").clone())
    }
}

pub(super) struct UnavailableSource;

impl CompanySource for UnavailableSource {
    fn companies(&self) -> Result<Vec<CompanyRecord>, SourceError> {
        Err(SourceError::Unavailable("snapshot not mounted".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    sent: Arc<Mutex<Vec<CreditFileNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn sent(&self) -> Vec<CreditFileNotice> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

impl NotificationSender for MemoryNotifier {
    fn send(&self, notice: CreditFileNotice) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct OfflineNotifier;

impl NotificationSender for OfflineNotifier {
    fn send(&self, _notice: CreditFileNotice) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp relay offline".to_string()))
    }
}
