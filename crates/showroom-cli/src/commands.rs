//! Command implementations for the showroom binary.

use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use showroom_mailer::{
    EmailComposer, GenerationStatus, MailerSettings, OpenAiBackend, PromptContext,
};
use showroom_model::{Car, Collection as _, Customer, Entity, Validate};
use showroom_store::{EntityState, MemoryCollection, MutationError, MutationOutcome, RawInput};

use crate::cli::QueryArgs;
use crate::dataset::Dataset;
use crate::seed;

pub(crate) fn run_seed(
    data: &Path,
    cars: usize,
    customers: usize,
    rng_seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut rng = match rng_seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    // Route the generated rows through a collection so ids get assigned.
    let dataset = Dataset {
        cars: MemoryCollection::from_rows(seed::generate_cars(&mut rng, cars)).scan(),
        customers: MemoryCollection::from_rows(seed::generate_customers(&mut rng, customers))
            .scan(),
    };
    dataset.save(data)?;
    tracing::info!(
        cars = dataset.cars.len(),
        customers = dataset.customers.len(),
        path = %data.display(),
        "dataset seeded"
    );

    println!(
        "Seeded {} cars and {} customers into {}",
        dataset.cars.len(),
        dataset.customers.len(),
        data.display()
    );
    for car in dataset.cars.iter().take(5) {
        println!(
            "  - {} {} {} {}: ${}",
            car.year, car.make, car.model, car.version, car.price
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_cars(
    data: &Path,
    query: &QueryArgs,
    make: Option<&str>,
    model: Option<&str>,
    min_price: Option<&str>,
    max_price: Option<&str>,
    min_year: Option<&str>,
    max_year: Option<&str>,
) -> anyhow::Result<()> {
    let dataset = Dataset::load(data)?;
    let mut state = EntityState::<Car>::from_collection(dataset.car_collection());

    if let Some(search) = &query.search {
        state.search(search.clone());
    }
    if let Some(make) = make {
        state.set_equality_filter("make", make);
    }
    if let Some(model) = model {
        state.set_contains_filter("model", model);
    }
    if min_price.is_some() || max_price.is_some() {
        state.set_range_filter("price", min_price.unwrap_or(""), max_price.unwrap_or(""));
    }
    if min_year.is_some() || max_year.is_some() {
        state.set_range_filter("year", min_year.unwrap_or(""), max_year.unwrap_or(""));
    }
    apply_ordering(&mut state, query);

    let makes = state.facet_values();
    if !makes.is_empty() {
        println!("Makes on the lot: {}", makes.join(", "));
    }
    print_summary(&state);
    for car in &state.page().items {
        println!(
            "{:>4}  {} {} {} {}  ${}",
            car.id.unwrap_or_default(),
            car.year,
            car.make,
            car.model,
            car.version,
            car.price
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_customers(
    data: &Path,
    query: &QueryArgs,
    gender: Option<&str>,
    location: Option<&str>,
    min_age: Option<&str>,
    max_age: Option<&str>,
    min_salary: Option<&str>,
    max_salary: Option<&str>,
) -> anyhow::Result<()> {
    let dataset = Dataset::load(data)?;
    let mut state = EntityState::<Customer>::from_collection(dataset.customer_collection());

    if let Some(search) = &query.search {
        state.search(search.clone());
    }
    if let Some(gender) = gender {
        state.set_equality_filter("gender", gender);
    }
    if let Some(location) = location {
        state.set_contains_filter("location", location);
    }
    if min_age.is_some() || max_age.is_some() {
        state.set_range_filter("age", min_age.unwrap_or(""), max_age.unwrap_or(""));
    }
    if min_salary.is_some() || max_salary.is_some() {
        state.set_range_filter("salary", min_salary.unwrap_or(""), max_salary.unwrap_or(""));
    }
    apply_ordering(&mut state, query);

    print_summary(&state);
    for customer in &state.page().items {
        println!(
            "{:>4}  {} <{}>  {} {}, {}  {} (${}/yr)",
            customer.id.unwrap_or_default(),
            customer.customer_name,
            customer.email,
            customer.age,
            customer.gender,
            customer.location,
            customer.job,
            customer.salary
        );
    }
    Ok(())
}

pub(crate) fn run_add_car(
    data: &Path,
    make: String,
    model: String,
    version: String,
    year: String,
    price: String,
) -> anyhow::Result<()> {
    let raw: RawInput = [
        ("make".to_string(), make),
        ("model".to_string(), model),
        ("version".to_string(), version),
        ("year".to_string(), year),
        ("price".to_string(), price),
    ]
    .into_iter()
    .collect();

    let dataset = Dataset::load(data)?;
    let mut state = EntityState::<Car>::from_collection(dataset.car_collection());
    let outcome = report(state.create(&raw))?;
    Dataset {
        cars: state.collection().scan(),
        customers: dataset.customers,
    }
    .save(data)?;
    println!("{}", outcome.message);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_add_customer(
    data: &Path,
    name: String,
    email: String,
    age: String,
    gender: String,
    location: String,
    job: String,
    salary: String,
) -> anyhow::Result<()> {
    let raw: RawInput = [
        ("customer_name".to_string(), name),
        ("email".to_string(), email),
        ("age".to_string(), age),
        ("gender".to_string(), gender),
        ("location".to_string(), location),
        ("job".to_string(), job),
        ("salary".to_string(), salary),
    ]
    .into_iter()
    .collect();

    let dataset = Dataset::load(data)?;
    let mut state = EntityState::<Customer>::from_collection(dataset.customer_collection());
    let outcome = report(state.create(&raw))?;
    Dataset {
        cars: dataset.cars,
        customers: state.collection().scan(),
    }
    .save(data)?;
    println!("{}", outcome.message);
    Ok(())
}

pub(crate) fn run_delete_car(data: &Path, id: i64) -> anyhow::Result<()> {
    let dataset = Dataset::load(data)?;
    let mut state = EntityState::<Car>::from_collection(dataset.car_collection());
    let outcome = report(state.delete(id))?;
    Dataset {
        cars: state.collection().scan(),
        customers: dataset.customers,
    }
    .save(data)?;
    println!("{}", outcome.message);
    Ok(())
}

pub(crate) fn run_delete_customer(data: &Path, id: i64) -> anyhow::Result<()> {
    let dataset = Dataset::load(data)?;
    let mut state = EntityState::<Customer>::from_collection(dataset.customer_collection());
    let outcome = report(state.delete(id))?;
    Dataset {
        cars: dataset.cars,
        customers: state.collection().scan(),
    }
    .save(data)?;
    println!("{}", outcome.message);
    Ok(())
}

pub(crate) async fn run_draft(
    data: &Path,
    customer_id: i64,
    tone: Option<String>,
    length: Option<usize>,
    settings_path: &Path,
) -> anyhow::Result<()> {
    let dataset = Dataset::load(data)?;
    let customer = dataset
        .customer_collection()
        .find_by_id(customer_id)
        .with_context(|| format!("no customer with id {customer_id}"))?;

    let settings = MailerSettings::load(settings_path);
    let mut ctx = PromptContext::for_customer(customer);
    ctx.tone = tone.unwrap_or_else(|| settings.resolved_tone());
    ctx.length = length.unwrap_or_else(|| settings.resolved_length());

    let backend = Arc::new(OpenAiBackend::from_settings(&settings));
    let composer = EmailComposer::new(backend);
    tracing::debug!(
        customer_id,
        tone = %ctx.tone,
        length = ctx.length,
        "starting draft generation"
    );
    let handle = composer.start(&ctx).await?;

    // Mirror the UI: poll the session snapshot and print each new slice
    // of the buffer as it arrives.
    let mut printed = 0;
    loop {
        let (status, buffer) = composer.snapshot().await;
        if buffer.len() > printed {
            print!("{}", &buffer[printed..]);
            let _ = std::io::stdout().flush();
            printed = buffer.len();
        }
        match status {
            GenerationStatus::Done => {
                println!();
                break;
            }
            GenerationStatus::Failed(message) => {
                if printed > 0 {
                    println!();
                }
                anyhow::bail!("generation failed: {message}");
            }
            GenerationStatus::Idle | GenerationStatus::Streaming => {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }
    }
    handle.await.context("stream consumer task")?;
    Ok(())
}

fn apply_ordering<R>(state: &mut EntityState<R>, query: &QueryArgs)
where
    R: Entity + Validate + DeserializeOwned,
{
    if let Some(sort) = &query.sort {
        state.sort_by(sort);
        if query.desc {
            state.toggle_sort_direction();
        }
    }
    state.set_page_size(query.page_size);
    state.go_to_page(query.page);
}

fn print_summary<R>(state: &EntityState<R>)
where
    R: Entity + Validate + DeserializeOwned,
{
    let page = state.page();
    println!(
        "{} {}(s) total, page {}/{}",
        page.total_count,
        R::SCHEMA.entity_name,
        state.spec().page,
        page.page_count
    );
}

/// Surface every field error before failing, so the user sees more than
/// the primary message.
fn report<R>(result: Result<MutationOutcome<R>, MutationError>) -> anyhow::Result<MutationOutcome<R>> {
    match result {
        Ok(outcome) => Ok(outcome),
        Err(MutationError::Validation { errors, primary }) => {
            for error in &errors {
                eprintln!("  {}: {}", error.field, error.message);
            }
            anyhow::bail!("validation failed: {primary}");
        }
        Err(err) => Err(err.into()),
    }
}
