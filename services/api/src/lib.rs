mod cli;
mod decision;
mod demo;
mod infra;
mod routes;
mod server;

use lendo_credit::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
