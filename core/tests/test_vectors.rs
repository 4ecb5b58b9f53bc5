//! Replay the JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes simulated responses and the outcome expected
//! from the pipeline. Successful bodies are compared as parsed JSON, not raw
//! strings, so field ordering never causes false negatives.

use std::sync::Arc;

use serde_json::Value;
use wp_rest_core::api::parse_discovery;
use wp_rest_core::{
    ApiError, ErrorKind, HttpResponse, MemorySink, ObjectSchema, ResponseHandler, Schema,
};

fn item_schema() -> Schema {
    ObjectSchema::new()
        .required("id", Schema::Integer)
        .required("name", Schema::String)
        .into()
}

/// Build an `HttpResponse` from a vector's `simulated_response`.
fn simulated(sim: &Value) -> HttpResponse {
    let mut response = HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap_or_default(),
    );
    for pair in sim["headers"].as_array().unwrap() {
        let pair = pair.as_array().unwrap();
        response = response.with_header(pair[0].as_str().unwrap(), pair[1].as_str().unwrap());
    }
    response
}

fn parse_kind(s: &str) -> ErrorKind {
    match s {
        "MalformedResponseBody" => ErrorKind::MalformedResponseBody,
        "RemoteApiError" => ErrorKind::RemoteApiError,
        "UnrecognizedErrorBody" => ErrorKind::UnrecognizedErrorBody,
        "SchemaValidationError" => ErrorKind::SchemaValidationError,
        "EndpointNotFound" => ErrorKind::EndpointNotFound,
        "RouteDiscoveryError" => ErrorKind::RouteDiscoveryError,
        other => panic!("unknown error kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

#[test]
fn response_handling_vectors() {
    let raw = include_str!("../../test-vectors/response_handling.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let schema = item_schema();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = simulated(&case["simulated_response"]);
        let sink = Arc::new(MemorySink::new());
        let handler = ResponseHandler::new(sink.clone());

        let result = handler.fetch_validated(&schema, || Ok(response.clone()));

        // The body stays readable whatever the outcome.
        assert_eq!(
            response.text(),
            case["simulated_response"]["body"].as_str().unwrap(),
            "{name}: raw body"
        );

        if let Some(expected) = case.get("expected_error") {
            let err = result.unwrap_err();
            let kind = parse_kind(expected["kind"].as_str().unwrap());
            assert_eq!(err.kind(), kind, "{name}: kind");
            let message = err.to_string();
            if let Some(exact) = expected["message"].as_str() {
                assert_eq!(message, exact, "{name}: message");
            }
            if let Some(prefix) = expected["message_prefix"].as_str() {
                assert!(message.starts_with(prefix), "{name}: {message}");
            }
            if let Some(suffix) = expected["message_suffix"].as_str() {
                assert!(message.ends_with(suffix), "{name}: {message}");
            }
            if let Some(code) = expected["code"].as_str() {
                assert_eq!(err.remote_code(), Some(code), "{name}: code");
            }
            if let Some(status) = expected.get("status") {
                match &err {
                    ApiError::RemoteApi { status: s, .. } => {
                        assert_eq!(s.map(u64::from), status.as_u64(), "{name}: status")
                    }
                    other => panic!("{name}: expected RemoteApi, got {other:?}"),
                }
            }
            if let Some(paths) = expected["paths"].as_array() {
                let ApiError::SchemaValidation(violations) = &err else {
                    panic!("{name}: expected SchemaValidation, got {err:?}");
                };
                for path in paths {
                    let path = path.as_str().unwrap();
                    assert!(violations.at(path).is_some(), "{name}: no violation at {path}");
                }
            }
        } else {
            let body = result.unwrap();
            assert_eq!(body, case["expected_result"], "{name}: result");
        }

        let emitted = case["expected_diagnostics"].as_u64().unwrap() as usize;
        assert_eq!(sink.records().len(), emitted, "{name}: diagnostics");
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[test]
fn discovery_vectors() {
    let raw = include_str!("../../test-vectors/discovery.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = simulated(&case["simulated_response"]);
        let result = parse_discovery(&response);

        if let Some(expected) = case.get("expected_error") {
            let kind = parse_kind(expected.as_str().unwrap());
            assert_eq!(result.unwrap_err().kind(), kind, "{name}: kind");
        } else {
            assert_eq!(
                result.unwrap(),
                case["expected_root"].as_str().unwrap(),
                "{name}: root"
            );
        }
    }
}
