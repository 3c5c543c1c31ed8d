//! Integration tests for the mutation service and session state facade.

use std::collections::BTreeMap;

use showroom_model::{Car, Collection, Customer};
use showroom_store::{EntityState, MutationError, RawInput};

fn raw(entries: &[(&str, &str)]) -> RawInput {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect::<BTreeMap<_, _>>()
}

fn customer_input(name: &str, email: &str) -> RawInput {
    raw(&[
        ("customer_name", name),
        ("email", email),
        ("age", "34"),
        ("gender", "Female"),
        ("location", "Lisbon"),
        ("job", "Engineer"),
        ("salary", "72000"),
    ])
}

fn car_input(make: &str, model: &str, year: &str, price: &str) -> RawInput {
    raw(&[
        ("make", make),
        ("model", model),
        ("version", "Base"),
        ("year", year),
        ("price", price),
    ])
}

#[test]
fn create_with_bad_email_inserts_nothing() {
    let mut state = EntityState::<Customer>::new();
    let err = state
        .create(&customer_input("Jane Doe", "BAD"))
        .expect_err("bad email should be rejected");

    match err {
        MutationError::Validation { errors, primary } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "email");
            assert_eq!(primary, "Invalid email format");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(state.collection().len(), 0);
    assert_eq!(state.page().total_count, 0);
}

#[test]
fn primary_error_is_first_in_schema_field_order() {
    let mut state = EntityState::<Customer>::new();
    let mut input = customer_input("", "jane@example.com");
    input.insert("age".to_string(), "7".to_string());

    let err = state
        .create(&input)
        .expect_err("two invalid fields should be rejected");
    match err {
        MutationError::Validation { errors, primary } => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0].field, "customer_name");
            assert_eq!(primary, "Customer name is required");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn create_round_trips_through_find_by_id_normalized() {
    let mut state = EntityState::<Customer>::new();
    let outcome = state
        .create(&customer_input("  Jane Doe ", "Jane.Doe@Example.COM"))
        .expect("valid customer should be created");

    assert_eq!(outcome.message, "Customer Jane Doe has been added.");
    let id = outcome.record.id.expect("created record has an id");
    let fetched = state.find_by_id(id).expect("record is persisted");
    assert_eq!(fetched.customer_name, "Jane Doe");
    assert_eq!(fetched.email, "jane.doe@example.com");
    assert_eq!(fetched, outcome.record);
}

#[test]
fn duplicate_email_is_a_whole_record_conflict() {
    let mut state = EntityState::<Customer>::new();
    state
        .create(&customer_input("Jane Doe", "jane@example.com"))
        .expect("first create succeeds");

    let err = state
        .create(&customer_input("Other Jane", "JANE@example.com"))
        .expect_err("same email (normalized) must conflict");
    assert_eq!(
        err,
        MutationError::Conflict("Customer with this email already exists".to_string())
    );
    assert_eq!(state.collection().len(), 1);
}

#[test]
fn update_keeps_own_email_but_rejects_someone_elses() {
    let mut state = EntityState::<Customer>::new();
    let jane = state
        .create(&customer_input("Jane Doe", "jane@example.com"))
        .expect("create jane");
    state
        .create(&customer_input("Mark Roe", "mark@example.com"))
        .expect("create mark");

    let jane_id = jane.record.id.expect("id assigned");

    // Re-submitting her own email is not a conflict.
    state
        .update(jane_id, &customer_input("Jane Doe", "jane@example.com"))
        .expect("self-update succeeds");

    let err = state
        .update(jane_id, &customer_input("Jane Doe", "mark@example.com"))
        .expect_err("taking mark's email must conflict");
    assert!(matches!(err, MutationError::Conflict(_)));
}

#[test]
fn update_of_missing_id_reports_not_found_and_changes_nothing() {
    let mut state = EntityState::<Car>::new();
    state
        .create(&car_input("Toyota", "Camry", "2020", "28000"))
        .expect("create succeeds");

    let err = state
        .update(7, &car_input("Honda", "Civic", "2021", "25000"))
        .expect_err("id 7 does not exist");
    assert_eq!(err, MutationError::NotFound("Car".to_string()));
    assert_eq!(state.collection().len(), 1);
    assert_eq!(state.page().items[0].make, "Toyota");
}

#[test]
fn delete_of_missing_id_reports_not_found() {
    let mut state = EntityState::<Car>::new();
    let err = state.delete(1).expect_err("empty collection");
    assert_eq!(err, MutationError::NotFound("Car".to_string()));
}

#[test]
fn successful_create_refreshes_the_visible_page() {
    let mut state = EntityState::<Car>::new();
    assert_eq!(state.page().total_count, 0);

    let outcome = state
        .create(&car_input("Toyota", "Camry", "2020", "28000"))
        .expect("create succeeds");
    assert_eq!(outcome.message, "Car Toyota Camry has been added.");
    assert_eq!(state.page().total_count, 1);
    assert_eq!(state.page().items[0].id, outcome.record.id);
}

#[test]
fn unparsable_form_numbers_are_strict_field_errors() {
    let mut state = EntityState::<Car>::new();
    let err = state
        .create(&car_input("Toyota", "Camry", "soon", "28000"))
        .expect_err("bad year string");
    match err {
        MutationError::Validation { errors, .. } => {
            assert_eq!(errors[0].field, "year");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(state.collection().len(), 0);
}

#[test]
fn deleting_the_last_page_clamps_the_current_page() {
    let mut state = EntityState::<Car>::new();
    for i in 1..=11 {
        state
            .create(&car_input("Toyota", &format!("Model-{i:02}"), "2020", "10000"))
            .expect("seed car");
    }
    state.go_to_page(2);
    assert_eq!(state.spec().page, 2);
    assert_eq!(state.page().items.len(), 1);

    let id = state.page().items[0].id.expect("id assigned");
    state.delete(id).expect("delete succeeds");

    // Page 2 no longer exists; the state clamps back to page 1.
    assert_eq!(state.spec().page, 1);
    assert_eq!(state.page().page_count, 1);
    assert_eq!(state.page().items.len(), 10);
}

#[test]
fn filters_search_and_facets_drive_the_page() {
    let mut state = EntityState::<Car>::new();
    for (make, model, year, price) in [
        ("Toyota", "Camry", "2020", "28000"),
        ("Toyota", "Corolla", "2018", "20000"),
        ("Honda", "Civic", "2021", "25000"),
        ("Honda", "Accord", "2022", "30000"),
    ] {
        state
            .create(&car_input(make, model, year, price))
            .expect("seed car");
    }

    assert_eq!(state.facet_values(), ["Honda", "Toyota"]);

    state.set_equality_filter("make", "Toyota");
    assert_eq!(state.page().total_count, 2);

    state.set_range_filter("year", "2019", "");
    assert_eq!(state.page().total_count, 1);
    assert_eq!(state.page().items[0].model, "Camry");

    state.reset_filters();
    assert_eq!(state.page().total_count, 4);

    state.search("cI");
    let models: Vec<_> = state
        .page()
        .items
        .iter()
        .map(|c| c.model.as_str())
        .collect();
    assert_eq!(models, vec!["Civic"]);
}

#[test]
fn contains_filter_narrows_by_substring_and_clears_on_empty_input() {
    let mut state = EntityState::<Car>::new();
    for (make, model) in [
        ("Toyota", "Camry"),
        ("Toyota", "Corolla"),
        ("Honda", "Accord"),
    ] {
        state
            .create(&car_input(make, model, "2020", "20000"))
            .expect("seed car");
    }

    state.set_contains_filter("model", "co");
    let models: Vec<_> = state
        .page()
        .items
        .iter()
        .map(|c| c.model.as_str())
        .collect();
    assert_eq!(models, vec!["Corolla", "Accord"]);

    state.set_contains_filter("model", "");
    assert_eq!(state.page().total_count, 3);
}

#[test]
fn sort_direction_toggle_reverses_the_page() {
    let mut state = EntityState::<Car>::new();
    for (model, price) in [("Cheap", "10000"), ("Mid", "20000"), ("Dear", "30000")] {
        state
            .create(&car_input("Toyota", model, "2020", price))
            .expect("seed car");
    }
    state.sort_by("price");
    assert_eq!(state.page().items[0].model, "Cheap");
    state.toggle_sort_direction();
    assert_eq!(state.page().items[0].model, "Dear");
}
