use std::sync::Arc;

use lendo_credit::workflows::credit::{
    assess_portfolio, write_csv, CompanySource, CreditDecisionEngine, DecisionError,
    FinalRecommendation, Grade, PortfolioError, YearSelection,
};
use lendo_credit::workflows::qawaem::QawaemDataset;

fn sample_dataset() -> QawaemDataset {
    let data = include_bytes!("../qawaem_sample.json");
    QawaemDataset::from_reader(&data[..]).expect("sample snapshot parses")
}

#[test]
fn sample_snapshot_loads_every_company() {
    let dataset = sample_dataset();

    assert_eq!(dataset.len(), 3);
    let periods = dataset.flattened_periods();
    assert_eq!(periods.len(), 3);
    assert!(periods
        .iter()
        .any(|period| period.company_name == "Red Sea Foods" && period.year == 2023));
}

#[test]
fn healthy_company_is_recommended() {
    let dataset = sample_dataset();
    let company = dataset
        .find("org-1001")
        .expect("source readable")
        .expect("company present");

    let result = CreditDecisionEngine::default()
        .evaluate(&company, YearSelection::Latest)
        .expect("decision");

    assert_eq!(result.year, 2023);
    assert_eq!(result.final_recommendation, FinalRecommendation::Recommended);
    assert_eq!(result.percent_met, 100.0);
    assert_eq!(result.grade, Grade::A);
}

#[test]
fn red_cheque_flag_blocks_recommendation() {
    let dataset = sample_dataset();
    let company = dataset
        .find("4030998877")
        .expect("source readable")
        .expect("company present");

    let result = CreditDecisionEngine::default()
        .evaluate(&company, YearSelection::Latest)
        .expect("decision");

    assert_eq!(result.percent_met, 88.89);
    assert_eq!(
        result.final_recommendation,
        FinalRecommendation::NotRecommended
    );
    assert!(result.credit_history_override);
    assert_eq!(result.summary_payload.revenue, "1,250,000 SAR");
    assert_eq!(result.summary_payload.net_profit_margin, "7.2%");
    assert_eq!(result.summary_payload.dpd, "12 days");
    assert_eq!(result.summary_payload.bounced_cheques, "RED (commercial)");
    assert_eq!(result.summary_payload.simah_score, result.total_score);
}

#[test]
fn company_without_statements_is_malformed() {
    let dataset = sample_dataset();
    let company = dataset
        .find("org-3090")
        .expect("source readable")
        .expect("company present");

    let err = CreditDecisionEngine::default()
        .evaluate(&company, YearSelection::Latest)
        .expect_err("no statements");
    assert_eq!(
        err,
        DecisionError::MalformedRecord {
            section: "financialStatement"
        }
    );
}

#[tokio::test]
async fn portfolio_run_exports_successful_decisions() {
    let dataset = sample_dataset();
    let entries = assess_portfolio(
        Arc::new(CreditDecisionEngine::default()),
        dataset.records().to_vec(),
        YearSelection::Latest,
    )
    .await;

    assert_eq!(entries.len(), 3);
    assert!(matches!(
        entries[2].outcome,
        Err(PortfolioError::Decision(DecisionError::MalformedRecord { .. }))
    ));

    let decisions: Vec<_> = entries
        .into_iter()
        .filter_map(|entry| entry.outcome.ok())
        .collect();
    let mut buffer = Vec::new();
    write_csv(&mut buffer, &decisions).expect("export succeeds");

    let text = String::from_utf8(buffer).expect("utf-8 export");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("company_name,cr_number,organization_id,year,percent_met"));
    assert!(lines[1].starts_with("Al Noor Trading Co.,1010654321,org-1001,2023,100"));
    assert!(lines[2].contains("NOT RECOMMENDED"));
}
