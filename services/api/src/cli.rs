use crate::decision::{
    run_decision_evaluate, run_decision_export, run_decision_list, DecisionEvaluateArgs,
    DecisionExportArgs, DecisionListArgs,
};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lendo_credit::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Lendo Credit Decision Engine",
    about = "Assess SME financing applications against the Lendo rulebook and scorecard",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Produce credit decisions from the qawaem snapshot
    Decision {
        #[command(subcommand)]
        command: DecisionCommand,
    },
    /// Walk a built-in sample company through the full decision pipeline
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DecisionCommand {
    /// Evaluate one company by organization id or CR number
    Evaluate(DecisionEvaluateArgs),
    /// Evaluate every company and write a CSV of the decisions
    Export(DecisionExportArgs),
    /// List the company-years present in the snapshot
    List(DecisionListArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured qawaem snapshot path
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Decision {
            command: DecisionCommand::Evaluate(args),
        } => run_decision_evaluate(args),
        Command::Decision {
            command: DecisionCommand::Export(args),
        } => run_decision_export(args).await,
        Command::Decision {
            command: DecisionCommand::List(args),
        } => run_decision_list(args),
        Command::Demo(args) => run_demo(args),
    }
}
