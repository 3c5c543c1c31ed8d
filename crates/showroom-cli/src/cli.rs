use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "showroom")]
#[command(about = "Showroom dealership CRM: seed data, query the inventory, draft sales emails.")]
pub(crate) struct Cli {
    /// Dataset file (JSON), created by `seed`.
    #[arg(long, global = true, default_value = "showroom.json")]
    pub(crate) data: PathBuf,

    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Query flags shared by the `cars` and `customers` listings.
#[derive(Debug, Args)]
pub(crate) struct QueryArgs {
    /// Substring search across text fields (case-insensitive).
    #[arg(long)]
    pub(crate) search: Option<String>,

    /// Sort field (schema field name).
    #[arg(long)]
    pub(crate) sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long)]
    pub(crate) desc: bool,

    /// Page to show, 1-based (clamped to the available pages).
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,

    /// Rows per page.
    #[arg(long, default_value_t = 10)]
    pub(crate) page_size: usize,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate fake cars and customers and write the dataset file.
    Seed {
        /// Number of cars to generate.
        #[arg(long, default_value_t = 50)]
        cars: usize,

        /// Number of customers to generate.
        #[arg(long, default_value_t = 20)]
        customers: usize,

        /// RNG seed for reproducible datasets.
        #[arg(long)]
        rng_seed: Option<u64>,
    },
    /// List cars matching the given filters, one page at a time.
    Cars {
        #[command(flatten)]
        query: QueryArgs,

        /// Filter by make ("all" clears the filter).
        #[arg(long)]
        make: Option<String>,

        /// Filter by model substring (case-insensitive).
        #[arg(long)]
        model: Option<String>,

        /// Lower price bound, inclusive.
        #[arg(long)]
        min_price: Option<String>,

        /// Upper price bound, inclusive.
        #[arg(long)]
        max_price: Option<String>,

        /// Lower model-year bound, inclusive.
        #[arg(long)]
        min_year: Option<String>,

        /// Upper model-year bound, inclusive.
        #[arg(long)]
        max_year: Option<String>,
    },
    /// List customers matching the given filters, one page at a time.
    Customers {
        #[command(flatten)]
        query: QueryArgs,

        /// Filter by gender ("all" clears the filter).
        #[arg(long)]
        gender: Option<String>,

        /// Filter by location substring (case-insensitive).
        #[arg(long)]
        location: Option<String>,

        /// Lower age bound, inclusive.
        #[arg(long)]
        min_age: Option<String>,

        /// Upper age bound, inclusive.
        #[arg(long)]
        max_age: Option<String>,

        /// Lower salary bound, inclusive.
        #[arg(long)]
        min_salary: Option<String>,

        /// Upper salary bound, inclusive.
        #[arg(long)]
        max_salary: Option<String>,
    },
    /// Add a car to the inventory.
    AddCar {
        #[arg(long)]
        make: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        version: String,
        #[arg(long)]
        year: String,
        #[arg(long)]
        price: String,
    },
    /// Add a customer.
    AddCustomer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        job: String,
        #[arg(long)]
        salary: String,
    },
    /// Delete a car by id.
    DeleteCar {
        #[arg(long)]
        id: i64,
    },
    /// Delete a customer by id.
    DeleteCustomer {
        #[arg(long)]
        id: i64,
    },
    /// Stream a personalized sales email for a customer to stdout.
    Draft {
        /// Target customer id.
        #[arg(long)]
        customer_id: i64,

        /// Email tone (default comes from settings, "😊 Formal").
        #[arg(long)]
        tone: Option<String>,

        /// Email length in characters (default 1000).
        #[arg(long)]
        length: Option<usize>,

        /// Mailer settings file (yaml).
        #[arg(long, default_value = "mailer.yaml")]
        settings: PathBuf,
    },
}
