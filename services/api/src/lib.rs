mod cli;
mod demo;
mod infra;
mod preview;
mod routes;
mod server;

use hireflow::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
