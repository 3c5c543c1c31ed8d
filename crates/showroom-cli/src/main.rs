//! showroom CLI: seed fake data, query the inventory, draft sales emails.
//!
//! State lives in a JSON dataset file (default `showroom.json`, override
//! with `--data <path>`). Mailer settings come from `mailer.yaml` plus
//! `SHOWROOM_*` environment variables.
//!
//! Logging: set `RUST_LOG=showroom_store=debug` (or similar) to see logs
//! on stderr.

mod cli;
mod commands;
mod dataset;
mod seed;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Command::Seed {
            cars,
            customers,
            rng_seed,
        } => commands::run_seed(&cli.data, cars, customers, rng_seed),
        Command::Cars {
            query,
            make,
            model,
            min_price,
            max_price,
            min_year,
            max_year,
        } => commands::run_cars(
            &cli.data,
            &query,
            make.as_deref(),
            model.as_deref(),
            min_price.as_deref(),
            max_price.as_deref(),
            min_year.as_deref(),
            max_year.as_deref(),
        ),
        Command::Customers {
            query,
            gender,
            location,
            min_age,
            max_age,
            min_salary,
            max_salary,
        } => commands::run_customers(
            &cli.data,
            &query,
            gender.as_deref(),
            location.as_deref(),
            min_age.as_deref(),
            max_age.as_deref(),
            min_salary.as_deref(),
            max_salary.as_deref(),
        ),
        Command::AddCar {
            make,
            model,
            version,
            year,
            price,
        } => commands::run_add_car(&cli.data, make, model, version, year, price),
        Command::AddCustomer {
            name,
            email,
            age,
            gender,
            location,
            job,
            salary,
        } => commands::run_add_customer(
            &cli.data, name, email, age, gender, location, job, salary,
        ),
        Command::DeleteCar { id } => commands::run_delete_car(&cli.data, id),
        Command::DeleteCustomer { id } => commands::run_delete_customer(&cli.data, id),
        Command::Draft {
            customer_id,
            tone,
            length,
            settings,
        } => commands::run_draft(&cli.data, customer_id, tone, length, &settings).await,
    }
}
