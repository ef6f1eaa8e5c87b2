mod check;
mod cli;
mod demo;
mod infra;
mod render;

use citizenship::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
