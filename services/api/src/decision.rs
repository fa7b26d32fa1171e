use crate::infra::{credit_config, load_dataset, LogNotificationSender};
use chrono::Local;
use clap::Args;
use lendo_credit::config::AppConfig;
use lendo_credit::error::AppError;
use lendo_credit::telemetry;
use lendo_credit::workflows::credit::portfolio::summarize;
use lendo_credit::workflows::credit::{
    assess_portfolio, write_csv, CreditAssessmentService, DecisionResult, YearSelection,
};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DecisionEvaluateArgs {
    /// Organization id or commercial registration number
    pub(crate) query: String,
    /// Fiscal year to assess (defaults to the latest year on file)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// Override the configured qawaem snapshot path
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Print the full decision as JSON instead of the justification text
    #[arg(long)]
    pub(crate) json: bool,
    /// Also send the credit file for the latest year to this address
    #[arg(long)]
    pub(crate) notify: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DecisionExportArgs {
    /// Destination CSV file (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Fiscal year to assess for every company (defaults to each company's latest year)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// Override the configured qawaem snapshot path
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DecisionListArgs {
    /// Override the configured qawaem snapshot path
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Print the listing as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct PeriodListing<'a> {
    company_name: &'a str,
    cr_number: &'a str,
    organization_id: &'a str,
    year: i32,
    revenue: f64,
    net_profit: f64,
}

pub(crate) fn run_decision_evaluate(args: DecisionEvaluateArgs) -> Result<(), AppError> {
    let DecisionEvaluateArgs {
        query,
        year,
        dataset,
        json,
        notify,
    } = args;

    let config = credit_config(dataset)?;
    let dataset = load_dataset(&config.dataset_path)?;
    let service = CreditAssessmentService::new(
        Arc::new(dataset),
        Arc::new(LogNotificationSender),
        config.rulebook,
    );

    let selection = YearSelection::from(year);
    let result = service.assess(&query, selection)?;
    if json {
        print_json(&result)?;
    } else {
        render_decision(&result);
    }

    if let Some(recipient) = notify {
        telemetry::init(&AppConfig::load()?.telemetry)?;
        let notice = service.notify(
            &query,
            selection,
            &recipient,
            Local::now().date_naive(),
        )?;
        println!("\nCredit file sent to {}: {}", notice.recipient, notice.subject);
    }

    Ok(())
}

pub(crate) async fn run_decision_export(args: DecisionExportArgs) -> Result<(), AppError> {
    let DecisionExportArgs {
        output,
        year,
        dataset,
    } = args;

    let config = credit_config(dataset)?;
    let dataset = load_dataset(&config.dataset_path)?;
    let service = CreditAssessmentService::new(
        Arc::new(dataset),
        Arc::new(LogNotificationSender),
        config.rulebook,
    );

    let entries = assess_portfolio(
        service.engine(),
        service.companies()?,
        YearSelection::from(year),
    )
    .await;
    let summary = summarize(&entries);

    let mut decisions = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.outcome {
            Ok(result) => decisions.push(result),
            Err(err) => eprintln!(
                "skipped {} (CR {}): {}",
                entry.company_name, entry.cr_number, err
            ),
        }
    }

    match output {
        Some(path) => {
            write_csv(File::create(&path)?, &decisions)?;
            println!(
                "Exported {} decisions to {} ({} recommended, {} not recommended, {} failed)",
                decisions.len(),
                path.display(),
                summary.recommended,
                summary.not_recommended,
                summary.failed
            );
        }
        None => write_csv(std::io::stdout().lock(), &decisions)?,
    }

    Ok(())
}

pub(crate) fn run_decision_list(args: DecisionListArgs) -> Result<(), AppError> {
    let config = credit_config(args.dataset)?;
    let dataset = load_dataset(&config.dataset_path)?;
    let periods = dataset.flattened_periods();

    if args.json {
        let listing: Vec<PeriodListing<'_>> = periods
            .iter()
            .map(|period| PeriodListing {
                company_name: &period.company_name,
                cr_number: &period.cr_number,
                organization_id: &period.organization_id,
                year: period.year,
                revenue: period.revenue.value(),
                net_profit: period.net_profit.value(),
            })
            .collect();
        return print_json(&listing);
    }

    println!(
        "{} companies, {} statement years",
        dataset.len(),
        periods.len()
    );
    for period in &periods {
        println!(
            "- {} | CR {} | {} | FY{} | revenue {:.0} | net profit {:.0}",
            period.company_name,
            period.cr_number,
            period.organization_id,
            period.year,
            period.revenue.value(),
            period.net_profit.value()
        );
    }
    Ok(())
}

pub(crate) fn render_decision(result: &DecisionResult) {
    println!("{}", result.justification_text);

    let summary = &result.summary_payload;
    println!("\nSummary");
    println!("- Final decision: {}", summary.final_decision);
    println!("- Risk rating: {}", summary.risk_rating);
    println!("- Revenue: {}", summary.revenue);
    println!("- Net profit margin: {}", summary.net_profit_margin);
    println!("- DSCR: {}", summary.dscr);
    println!("- Days past due: {}", summary.dpd);
    println!("- Bounced cheques: {}", summary.bounced_cheques);
    println!("- SIMAH score: {}", summary.simah_score);
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(std::io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}
