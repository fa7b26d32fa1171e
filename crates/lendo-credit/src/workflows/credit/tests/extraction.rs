use super::common::*;
use crate::workflows::credit::domain::{BureauChannel, BureauParameter, BureauValue, FlagStatus};
use crate::workflows::credit::record::CompanyRecord;
use crate::workflows::credit::{DecisionError, FinancialRecordExtractor, YearSelection};
use serde_json::json;

#[test]
fn latest_selection_picks_highest_year() {
    let extracted =
        FinancialRecordExtractor::extract(&company(), YearSelection::Latest).expect("extracts");

    assert_eq!(extracted.period.year, 2023);
    assert_eq!(extracted.period.revenue.value(), 2_500_000.0);
    assert_eq!(extracted.period.cr_number, CR_NUMBER);
    assert_eq!(extracted.period.organization_id, ORGANIZATION_ID);
    assert_eq!(
        extracted.period.cash_flow_from_operating_activities.value(),
        450_000.0
    );
}

#[test]
fn explicit_year_is_honored() {
    let extracted = FinancialRecordExtractor::extract(&company(), YearSelection::Fiscal(2022))
        .expect("extracts");

    assert_eq!(extracted.period.year, 2022);
    assert_eq!(extracted.period.gearing_ratio.value(), 1.9);
}

#[test]
fn unknown_year_is_period_not_found() {
    let err = FinancialRecordExtractor::extract(&company(), YearSelection::Fiscal(2019))
        .expect_err("2019 absent");
    assert_eq!(err, DecisionError::PeriodNotFound { year: Some(2019) });
}

#[test]
fn empty_statement_array_is_period_not_found() {
    let mut raw = company_json();
    raw["financialStatement"] = json!([]);
    let record: CompanyRecord = serde_json::from_value(raw).expect("parses");

    let err = FinancialRecordExtractor::extract(&record, YearSelection::Latest)
        .expect_err("no periods");
    assert_eq!(err, DecisionError::PeriodNotFound { year: None });
}

#[test]
fn missing_statement_array_is_malformed() {
    let mut raw = company_json();
    raw.as_object_mut()
        .expect("object fixture")
        .remove("financialStatement");
    let record: CompanyRecord = serde_json::from_value(raw).expect("parses");

    let err = FinancialRecordExtractor::extract(&record, YearSelection::Latest)
        .expect_err("malformed");
    assert_eq!(
        err,
        DecisionError::MalformedRecord {
            section: "financialStatement"
        }
    );
}

#[test]
fn absent_figures_default_to_zero_and_are_marked() {
    let mut raw = company_json();
    raw["financialStatement"][1]["ratios"]["financialSpreading"]
        .as_object_mut()
        .expect("spreading object")
        .remove("dscr");
    raw["financialStatement"][1]["profitAndLoss"]["netProfit"] = json!(null);
    let record: CompanyRecord = serde_json::from_value(raw).expect("parses");

    let extracted =
        FinancialRecordExtractor::extract(&record, YearSelection::Latest).expect("extracts");

    assert_eq!(extracted.period.dscr.value(), 0.0);
    assert!(!extracted.period.dscr.is_reported());
    assert_eq!(extracted.period.net_profit.value(), 0.0);
    assert!(!extracted.period.net_profit.is_reported());
    assert!(extracted.period.revenue.is_reported());
}

#[test]
fn bureau_flags_require_exact_parameter_names() {
    let mut raw = company_json();
    raw["consumer"] = json!({
        "rules": [
            { "parameter": "days past due", "value": 40, "flag": "RED" },
            { "parameter": "Court Cases", "value": "2", "flag": "RED" },
            { "parameter": "Court Cases", "value": 0, "flag": "GREEN" }
        ]
    });
    let record: CompanyRecord = serde_json::from_value(raw).expect("parses");

    let flags = FinancialRecordExtractor::extract(&record, YearSelection::Latest)
        .expect("extracts")
        .flags;

    let dpd = flags.reading(BureauChannel::Consumer, BureauParameter::Dpd);
    assert_eq!(dpd.flag, None);
    assert_eq!(dpd.value, None);

    let court = flags.reading(BureauChannel::Consumer, BureauParameter::CourtCases);
    assert_eq!(court.flag, Some(FlagStatus::Red));
    assert_eq!(court.value, Some(BureauValue::Text("2".to_string())));

    let commercial = flags.reading(BureauChannel::Commercial, BureauParameter::Dpd);
    assert_eq!(commercial.flag, Some(FlagStatus::Green));
}

#[test]
fn missing_bureau_section_leaves_flags_unknown() {
    let mut raw = company_json();
    raw.as_object_mut()
        .expect("object fixture")
        .remove("commercial");
    let record: CompanyRecord = serde_json::from_value(raw).expect("parses");

    let flags = FinancialRecordExtractor::extract(&record, YearSelection::Latest)
        .expect("extracts")
        .flags;

    assert!(flags
        .commercial
        .reading(BureauParameter::BouncedCheques)
        .flag
        .is_none());
    assert!(flags.all_clear());
}

#[test]
fn available_years_are_sorted_and_distinct() {
    let mut raw = company_json();
    let duplicate = raw["financialStatement"][0].clone();
    raw["financialStatement"]
        .as_array_mut()
        .expect("array")
        .push(duplicate);
    let record: CompanyRecord = serde_json::from_value(raw).expect("parses");

    let years = FinancialRecordExtractor::available_years(&record).expect("years");
    assert_eq!(years, vec![2022, 2023]);
}
