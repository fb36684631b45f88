mod common;

use common::{petstore_api, valid_pet};
use serde_json::json;
use std::collections::HashMap;
use swagmodel::codes;

fn headers(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[test]
fn test_undeclared_status_without_default() {
    let api = petstore_api();
    let operation = api.get_operation("/pet", "post").unwrap();

    let results = operation.validate_response(None, &HashMap::new(), None, None);
    assert_eq!(results.errors.len(), 1);
    assert_eq!(results.errors[0].code, codes::INVALID_RESPONSE_CODE);
    assert_eq!(
        results.errors[0].message,
        "This operation does not have a defined 'default' response code"
    );

    let results = operation.validate_response(Some(201), &HashMap::new(), None, None);
    assert_eq!(results.errors.len(), 1);
    assert_eq!(
        results.errors[0].message,
        "This operation does not have a defined '201' or 'default' response code"
    );
}

#[test]
fn test_undeclared_status_falls_back_to_default() {
    let api = petstore_api();
    let operation = api.get_operation("/pet/findByStatus", "get").unwrap();
    let results = operation.validate_response(Some(201), &HashMap::new(), None, None);
    assert!(results.errors.is_empty(), "errors: {:?}", results.errors);
}

#[test]
fn test_declared_status_is_preferred_over_default() {
    let api = petstore_api();
    let operation = api.get_operation("/pet/findByStatus", "get").unwrap();
    assert_eq!(
        operation.get_response(Some(200)).unwrap().status_code(),
        "200"
    );
    assert_eq!(
        operation.get_response(Some(500)).unwrap().status_code(),
        "default"
    );
    assert!(operation.get_response(None).unwrap().status_code() == "default");
}

#[test]
fn test_valid_response() {
    let api = petstore_api();
    let operation = api.get_operation("/pet/{petId}", "get").unwrap();
    let results = operation.validate_response(
        Some(200),
        &headers(&[
            ("content-type", "application/json"),
            ("x-rate-limit", "100"),
        ]),
        Some(&valid_pet()),
        None,
    );
    assert!(results.errors.is_empty(), "errors: {:?}", results.errors);
}

#[test]
fn test_response_content_type_is_negotiated() {
    let api = petstore_api();
    let operation = api.get_operation("/pet/{petId}", "get").unwrap();
    let results = operation.validate_response(
        Some(200),
        &headers(&[("content-type", "text/html")]),
        Some(&valid_pet()),
        None,
    );
    assert_eq!(results.errors.len(), 1);
    assert_eq!(results.errors[0].code, codes::INVALID_CONTENT_TYPE);
    assert_eq!(
        results.errors[0].message,
        "Invalid Content-Type (text/html). These are supported: \
         application/xml, application/json"
    );
}

#[test]
fn test_invalid_response_header() {
    let api = petstore_api();
    let operation = api.get_operation("/pet/{petId}", "get").unwrap();
    let results = operation.validate_response(
        Some(200),
        &headers(&[
            ("content-type", "application/json"),
            ("x-rate-limit", "plenty"),
        ]),
        Some(&valid_pet()),
        None,
    );
    assert_eq!(results.errors.len(), 1);
    let envelope = &results.errors[0];
    assert_eq!(envelope.code, codes::INVALID_RESPONSE_HEADER);
    assert_eq!(envelope.name.as_deref(), Some("X-Rate-Limit"));
    assert_eq!(
        envelope.message,
        "Invalid header (X-Rate-Limit): Expected type integer but found type string"
    );
    assert_eq!(envelope.errors.len(), 1);
    assert_eq!(envelope.errors[0].code, codes::INVALID_TYPE);
}

#[test]
fn test_header_lookup_is_case_insensitive() {
    let api = petstore_api();
    let operation = api.get_operation("/pet/{petId}", "get").unwrap();
    let results = operation.validate_response(
        Some(200),
        &headers(&[
            ("Content-Type", "application/json"),
            ("X-Rate-Limit", "100"),
        ]),
        Some(&valid_pet()),
        None,
    );
    assert!(results.errors.is_empty(), "errors: {:?}", results.errors);
}

#[test]
fn test_missing_declared_header_is_not_required() {
    let api = petstore_api();
    let operation = api.get_operation("/pet/{petId}", "get").unwrap();
    let results = operation.validate_response(
        Some(200),
        &headers(&[("content-type", "application/json")]),
        Some(&valid_pet()),
        None,
    );
    assert!(results.errors.is_empty(), "errors: {:?}", results.errors);
}

#[test]
fn test_invalid_response_body() {
    let api = petstore_api();
    let operation = api.get_operation("/pet/{petId}", "get").unwrap();
    let results = operation.validate_response(
        Some(200),
        &headers(&[("content-type", "application/json")]),
        Some(&json!({"id": 1})),
        None,
    );
    assert_eq!(results.errors.len(), 1);
    let envelope = &results.errors[0];
    assert_eq!(envelope.code, codes::INVALID_RESPONSE_BODY);
    assert_eq!(
        envelope.message,
        "Invalid body: Value failed JSON Schema validation"
    );
    assert_eq!(envelope.errors.len(), 2);
    assert_eq!(
        envelope.errors[0].code,
        codes::OBJECT_MISSING_REQUIRED_PROPERTY
    );
}

#[test]
fn test_body_supplied_as_wire_string_is_decoded() {
    let api = petstore_api();
    let operation = api.get_operation("/pet/{petId}", "get").unwrap();
    let wire = json!(valid_pet().to_string());
    let results = operation.validate_response(
        Some(200),
        &headers(&[("content-type", "application/json")]),
        Some(&wire),
        Some("utf-8"),
    );
    assert!(results.errors.is_empty(), "errors: {:?}", results.errors);
}

#[test]
fn test_204_skips_content_type_and_body_checks() {
    let api = petstore_api();
    let operation = api.get_operation("/pet/{petId}", "delete").unwrap();
    // The declared 204 response carries a schema, but 204 never has a
    // body: neither the bogus Content-Type nor the non-conforming body
    // may produce an error.
    let results = operation.validate_response(
        Some(204),
        &headers(&[("content-type", "application/x-yaml")]),
        Some(&json!({"unexpected": true})),
        None,
    );
    assert!(results.errors.is_empty(), "errors: {:?}", results.errors);
}

#[test]
fn test_response_sample_and_example() {
    let api = petstore_api();
    let operation = api.get_operation("/pet/{petId}", "get").unwrap();
    let response = operation.get_response(Some(200)).unwrap();
    assert!(response.get_example("application/json").is_none());
    let sample = response.get_sample();
    assert!(sample.is_object());
    assert_eq!(sample["name"], json!("example"));
}
