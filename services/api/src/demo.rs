use crate::decision::{print_json, render_decision};
use crate::infra::InMemoryNotificationSender;
use chrono::Local;
use clap::Args;
use lendo_credit::error::AppError;
use lendo_credit::workflows::credit::profile::{
    CashflowControl, CreditHistoryCategory, CustomerBase, ExperienceBand, FundingAccess, Industry,
    InventoryLiquidity, LegalStructure, LendoRelationship, MarketReach, NitaqatColor,
    SuccessionRisk, YesNo,
};
use lendo_credit::workflows::credit::record::{
    CashflowStatement, FinancialSpreading, ProfitAndLoss, StatementRatios,
};
use lendo_credit::workflows::credit::{
    BureauParameter, BureauRule, BureauSection, BureauValue, CompanyRecord,
    CreditAssessmentService, FlagStatus, QualitativeProfile, RulebookConfig, StatementEntry,
    YearSelection,
};
use lendo_credit::workflows::qawaem::QawaemDataset;
use std::sync::Arc;

const DEMO_ORGANIZATION_ID: &str = "org-7001";

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Fiscal year to assess (defaults to the latest year of the sample company)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// Print the full decision as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Recipient used for the credit file notification step
    #[arg(long, default_value = "credit-committee@lendo.sa")]
    pub(crate) recipient: String,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        year,
        json,
        recipient,
    } = args;

    let dataset = Arc::new(QawaemDataset::from_companies(vec![sample_company()]));
    let notifier = Arc::new(InMemoryNotificationSender::default());
    let service = CreditAssessmentService::new(
        dataset,
        notifier.clone(),
        RulebookConfig::standard(),
    );

    println!("Credit decision demo");
    let history = service.assess_all_years(DEMO_ORGANIZATION_ID)?;
    println!("Statement years on file");
    for result in &history {
        println!(
            "- FY{}: {}/{} rules met ({}%) | score {:.2} ({}) | {}",
            result.year,
            result.rules_met(),
            result.rules_total(),
            result.percent_met,
            result.total_score,
            result.grade.label(),
            result.final_recommendation.label()
        );
    }

    let selection = YearSelection::from(year);
    let result = service.assess(DEMO_ORGANIZATION_ID, selection)?;
    println!();
    if json {
        print_json(&result)?;
    } else {
        render_decision(&result);
    }

    match service.notify(
        DEMO_ORGANIZATION_ID,
        selection,
        &recipient,
        Local::now().date_naive(),
    ) {
        Ok(notice) => {
            println!("\nNotification");
            println!("  To: {}", notice.recipient);
            println!("  Subject: {}", notice.subject);
        }
        Err(err) => println!("\nNotification skipped: {}", err),
    }
    println!("  Notices queued: {}", notifier.notices().len());

    Ok(())
}

/// Sample company with two statement years; the latest passes every rulebook threshold.
pub(crate) fn sample_company() -> CompanyRecord {
    CompanyRecord {
        company_name: "Qimmah Digital Services".to_string(),
        cr_number: "1010778899".to_string(),
        organization_id: DEMO_ORGANIZATION_ID.to_string(),
        financial_statement: Some(vec![
            statement(
                2023,
                StatementFigures {
                    revenue: 3_400_000.0,
                    net_profit: 310_000.0,
                    operating_cash_flow: 280_000.0,
                    total_equity: 1_150_000.0,
                    current_ratio: 1.4,
                    dscr: 1.7,
                    gearing_ratio: 1.1,
                    leverage_ratio: 1.6,
                    net_profit_margin: 9.1,
                    net_profit_margin_growth: -1.5,
                    revenue_growth: 11.0,
                    external_debt_sales_ratio: 0.27,
                },
            ),
            statement(
                2024,
                StatementFigures {
                    revenue: 4_200_000.0,
                    net_profit: 520_000.0,
                    operating_cash_flow: 610_000.0,
                    total_equity: 1_500_000.0,
                    current_ratio: 2.2,
                    dscr: 2.4,
                    gearing_ratio: 0.9,
                    leverage_ratio: 1.3,
                    net_profit_margin: 12.4,
                    net_profit_margin_growth: 3.5,
                    revenue_growth: 22.0,
                    external_debt_sales_ratio: 0.18,
                },
            ),
        ]),
        commercial: Some(clear_bureau_section()),
        consumer: Some(clear_bureau_section()),
        qualitative: QualitativeProfile {
            nitaqat_color: Some(NitaqatColor::HighGreen),
            market: Some(MarketReach::LocalIncludingGcc),
            industry: Some(Industry::InformationAndCommunication),
            type_of_customer: Some(CustomerBase::SixToTwenty),
            customer_concentration: Some(14.0),
            inventory_liquidity: Some(InventoryLiquidity::NotApplicable),
            access_to_funds: Some(FundingAccess::FinancialInstitution),
            relationship_with_lendo: Some(LendoRelationship::TimelyRepayments),
            control_over_cashflow: Some(CashflowControl::Full),
            change_in_ownership: Some(YesNo::No),
            change_in_management: Some(YesNo::No),
            breach_in_financial_covenant: Some(YesNo::No),
            delayed_afs: Some(YesNo::No),
            legal_structure: Some(LegalStructure::LimitedLiabilityCompany),
            succession_risk: Some(SuccessionRisk::Medium),
            owners_experience: Some(ExperienceBand::MoreThanTenYears),
            management_experience: Some(ExperienceBand::FiveToTenYears),
            credit_history_category: Some(CreditHistoryCategory::Clean),
            years_in_business: Some(8.0),
        },
    }
}

struct StatementFigures {
    revenue: f64,
    net_profit: f64,
    operating_cash_flow: f64,
    total_equity: f64,
    current_ratio: f64,
    dscr: f64,
    gearing_ratio: f64,
    leverage_ratio: f64,
    net_profit_margin: f64,
    net_profit_margin_growth: f64,
    revenue_growth: f64,
    external_debt_sales_ratio: f64,
}

fn statement(year: i32, figures: StatementFigures) -> StatementEntry {
    StatementEntry {
        year: Some(year),
        total_equity: Some(figures.total_equity),
        ratios: StatementRatios {
            financial_spreading: FinancialSpreading {
                current_ratio: Some(figures.current_ratio),
                dscr: Some(figures.dscr),
                debt_ratio: Some(0.35),
                net_profit_margin: Some(figures.net_profit_margin),
                net_profit_margin_growth: Some(figures.net_profit_margin_growth),
                gross_profit_margin_growth: Some(1.8),
                leverage_ratio: Some(figures.leverage_ratio),
                gearing_ratio: Some(figures.gearing_ratio),
                revenue_growth: Some(figures.revenue_growth),
                interest_coverage: Some(6.1),
                external_debt_sales_ratio: Some(figures.external_debt_sales_ratio),
                receivable_percentage_sales: Some(38.0),
                days_sales_outstanding: Some(75.0),
            },
        },
        profit_and_loss: ProfitAndLoss {
            net_profit: Some(figures.net_profit),
            total_revenue: Some(figures.revenue),
        },
        cashflow: CashflowStatement {
            net_cash_flows_from_used_in_operating_activities: Some(figures.operating_cash_flow),
        },
    }
}

fn clear_bureau_section() -> BureauSection {
    BureauSection {
        rules: BureauParameter::ordered()
            .into_iter()
            .map(|parameter| BureauRule {
                parameter: parameter.label().to_string(),
                value: Some(BureauValue::Number(0.0)),
                flag: Some(FlagStatus::Green),
            })
            .collect(),
    }
}
