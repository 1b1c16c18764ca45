//! End-to-end bind, validate and render scenarios.

mod common;
use common::*;

use formkit::{Form, FormError, IntegerInput, Request};

#[test]
fn integer_in_range_is_valid() {
    let form = submit_age("25");
    assert!(form.validate().is_ok());
    assert_eq!(form.values()["age"], "25");
}

#[test]
fn non_numeric_integer_is_a_parse_error() {
    let form = submit_age("abc");
    let errors = form.validate().unwrap_err();
    let error = errors.get("age").expect("age should fail");
    assert!(error.cause().is_parse());
    assert!(error.cause().to_string().contains("not a valid integer"));
    assert_eq!(form.values()["age"], "abc");
}

#[test]
fn integer_above_max_mentions_bound() {
    let form = submit_age("200");
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.get("age").unwrap().cause().to_string().contains("130"));
}

#[test]
fn text_field_binds_from_query_on_get() {
    let mut form = Form::new().add_input(text_field("name"));
    let request = Request::from_url("GET", "/people?name=Alice");

    form.load(Some(&request)).unwrap();
    assert_eq!(form.values()["name"], "Alice");
    assert!(form.validate().is_ok());
}

#[test]
fn render_contains_one_form_and_one_field() {
    let form = Form::new()
        .set_action("/submit")
        .set_method("POST")
        .add_input(IntegerInput::new().with_name("age"));

    let html = form.html().into_string();
    assert_eq!(html.matches("<form ").count(), 1);
    assert!(html.starts_with(r#"<form action="/submit" method="POST">"#));
    assert_eq!(html.matches(r#"name="age""#).count(), 1);
    assert!(html.ends_with("</form>"));
}

#[test]
fn missing_field_binds_empty_and_fails_integer_parse() {
    let mut form = age_form("POST").add_input(text_field("note"));
    let request = Request::post().form_body("note=hi");

    form.load(Some(&request)).unwrap();
    assert_eq!(form.values()["age"], "");
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.names().collect::<Vec<_>>(), vec!["age"]);
}

#[test]
fn malformed_submission_is_reported_not_swallowed() {
    let mut form = age_form("POST");
    let request = Request::post()
        .content_type("application/json")
        .body("{not json");

    assert!(form.load(Some(&request)).is_err());
    assert_eq!(form.values()["age"], "");
}

#[test]
fn json_submission_binds_values() {
    let mut form = age_form("PUT");
    let request = Request::new("PUT")
        .content_type("application/json; charset=utf-8")
        .body(r#"{"age": 42}"#);

    form.load(Some(&request)).unwrap();
    assert!(form.validate().is_ok());
    assert_eq!(form.values_json(), serde_json::json!({ "age": "42" }));
}

/// A handler that binds and validates in one `?` chain.
fn handle_age(body: &str) -> formkit::Result<String> {
    let mut form = age_form("POST");
    form.load(Some(&Request::post().form_body(body)))?;
    form.validate()?;
    Ok(form.values()["age"].clone())
}

#[test]
fn handler_propagates_load_and_validation_errors() {
    assert_eq!(handle_age("age=30").unwrap(), "30");

    match handle_age("age=200") {
        Err(FormError::Validation(errors)) => {
            assert_eq!(errors.names().collect::<Vec<_>>(), vec!["age"]);
            assert!(errors.get("age").unwrap().cause().is_bounds());
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    assert!(matches!(
        handle_age("age=%zz"),
        Err(FormError::InvalidEscape { .. })
    ));
}

#[test]
fn errors_serialize_for_api_responses() {
    let form = submit_age("-3");
    let errors = form.validate().unwrap_err();
    assert_eq!(
        serde_json::to_value(&errors).unwrap(),
        serde_json::json!({ "age": "age is less than 0" })
    );
}
