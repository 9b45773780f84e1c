mod assess;
mod cli;
mod infra;
mod routes;
mod server;

use fitness_levels::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
