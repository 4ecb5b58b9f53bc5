//! Response handling and schema-validated fetching.
//!
//! # Design
//! Every endpoint goes through the same two steps:
//!
//! 1. [`ResponseHandler::handle`] parses the body and splits success from
//!    failure. A 2xx body goes to the caller's `consume` callback. A failed
//!    response becomes `RemoteApi` when it carries a WordPress error envelope
//!    and `UnrecognizedErrorBody` otherwise. A body that is not JSON at all
//!    (usually PHP warnings printed ahead of the payload) becomes
//!    `MalformedResponseBody` regardless of status.
//! 2. [`ResponseHandler::fetch_validated`] issues the request through a
//!    deferred closure and uses a schema check as the `consume` step.
//!
//! Nothing here retries or caches. Each call owns its response exclusively.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::context::Resource;
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::{ApiError, Result};
use crate::http::HttpResponse;
use crate::schema::{ObjectSchema, Schema, Violation, Violations};

/// WordPress' failure body: `{code, message, data: {status}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub data: ErrorData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorData {
    /// Kept as sent. Plugins are not bound to valid HTTP codes here.
    pub status: Number,
    /// Route-specific extras such as `params` or `details`.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ErrorData {
    /// `status` as an HTTP status code, when it is a whole number in range.
    pub fn http_status(&self) -> Option<u16> {
        if let Some(n) = self.status.as_u64() {
            return u16::try_from(n).ok();
        }
        self.status
            .as_f64()
            .filter(|f| f.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(f))
            .map(|f| f as u16)
    }
}

impl ErrorEnvelope {
    pub fn schema() -> Schema {
        ObjectSchema::new()
            .required("code", Schema::String)
            .required("message", Schema::String)
            .required(
                "data",
                ObjectSchema::new().required("status", Schema::Number).into(),
            )
            .into()
    }

    /// Interpret `value` as an envelope, if it has the shape of one.
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::schema().validate(value).ok()?;
        serde_json::from_value(value.clone()).ok()
    }
}

/// Splits responses into parsed successes and typed failures.
#[derive(Clone)]
pub struct ResponseHandler {
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Default for ResponseHandler {
    fn default() -> Self {
        Self::new(Arc::new(LogSink))
    }
}

impl std::fmt::Debug for ResponseHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseHandler").finish_non_exhaustive()
    }
}

impl ResponseHandler {
    pub fn new(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self { diagnostics }
    }

    /// Parse `response` and hand a successful body to `consume`.
    ///
    /// Errors raised by `consume` are returned unchanged.
    pub fn handle<T, F>(&self, response: &HttpResponse, consume: F) -> Result<T>
    where
        F: FnOnce(Value) -> Result<T>,
    {
        let body = parse_body(response)?;
        if response.is_success() {
            return consume(body);
        }
        match ErrorEnvelope::from_value(&body) {
            Some(envelope) => {
                let status = envelope.data.http_status();
                Err(ApiError::RemoteApi {
                    code: envelope.code,
                    message: envelope.message,
                    status,
                })
            }
            None => {
                self.diagnostics.emit(
                    &format!("unrecognized error body (HTTP {})", response.status),
                    &body,
                );
                Err(ApiError::UnrecognizedErrorBody { body })
            }
        }
    }

    /// Issue `request`, then validate the parsed body against `schema`.
    pub fn fetch_validated<F>(&self, schema: &Schema, request: F) -> Result<Value>
    where
        F: FnOnce() -> Result<HttpResponse>,
    {
        let response = request()?;
        self.handle(&response, |body| {
            schema.validate(&body).map_err(ApiError::SchemaValidation)?;
            Ok(body)
        })
    }

    /// Issue `request` and decode the validated body into `T`.
    pub fn fetch_as<T, F>(&self, schema: &Schema, request: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Result<HttpResponse>,
    {
        let response = request()?;
        self.handle(&response, |body| decode_validated(schema, body))
    }

    /// Issue `request` and decode the body into the resource type `T`,
    /// validating against `T::schema()`.
    pub fn fetch<T, F>(&self, request: F) -> Result<T>
    where
        T: Resource,
        F: FnOnce() -> Result<HttpResponse>,
    {
        self.fetch_as(&T::schema(), request)
    }
}

/// Validate `body` against `schema`, then deserialize it.
///
/// A serde failure after a passing schema is still a validation failure from
/// the caller's point of view and is reported as one.
pub fn decode_validated<T: DeserializeOwned>(schema: &Schema, body: Value) -> Result<T> {
    schema.validate(&body).map_err(ApiError::SchemaValidation)?;
    serde_json::from_value(body).map_err(|e| {
        ApiError::SchemaValidation(Violations::single(Violation {
            path: "$".to_string(),
            expected: e.to_string(),
            found: "incompatible value",
            actual: None,
        }))
    })
}

/// [`ResponseHandler::handle`] with diagnostics going to the log.
pub fn handle_response<T, F>(response: &HttpResponse, consume: F) -> Result<T>
where
    F: FnOnce(Value) -> Result<T>,
{
    ResponseHandler::default().handle(response, consume)
}

/// [`ResponseHandler::fetch_validated`] with diagnostics going to the log.
pub fn fetch_validated<F>(schema: &Schema, request: F) -> Result<Value>
where
    F: FnOnce() -> Result<HttpResponse>,
{
    ResponseHandler::default().fetch_validated(schema, request)
}

fn parse_body(response: &HttpResponse) -> Result<Value> {
    response.json().map_err(|e| {
        let raw = response.text().replace('<', "&lt;");
        ApiError::MalformedResponseBody {
            message: format!("Unexpected response: invalid JSON ({e})\n{raw}"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::error::{ErrorKind, UNRECOGNIZED_ERROR_MESSAGE};
    use serde_json::json;

    fn recording() -> (ResponseHandler, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (ResponseHandler::new(sink.clone()), sink)
    }

    fn identity(body: Value) -> Result<Value> {
        Ok(body)
    }

    #[test]
    fn success_body_reaches_callback_unchanged() {
        let response = HttpResponse::new(200, r#"{"hello":"world"}"#);
        let result = handle_response(&response, identity).unwrap();
        assert_eq!(result, json!({"hello": "world"}));
    }

    #[test]
    fn callback_result_is_returned() {
        let response = HttpResponse::new(201, r#"{"id":5}"#);
        let id = handle_response(&response, |body| Ok(body["id"].as_u64())).unwrap();
        assert_eq!(id, Some(5));
    }

    #[test]
    fn callback_error_propagates_unchanged() {
        let response = HttpResponse::new(200, "{}");
        let err = handle_response::<(), _>(&response, |_| {
            Err(ApiError::Serialization("boom".to_string()))
        })
        .unwrap_err();
        assert_eq!(err, ApiError::Serialization("boom".to_string()));
    }

    #[test]
    fn empty_success_body_is_malformed() {
        let response = HttpResponse::new(200, "");
        let err = handle_response(&response, identity).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponseBody);
        let message = err.to_string();
        assert!(message.starts_with("Unexpected response: "));
        assert!(message.contains("JSON"));
    }

    #[test]
    fn malformed_body_escapes_markup() {
        let raw = "<br />\n<b>Warning</b>: Undefined index in plugin.php\n{\"id\":1}";
        let response = HttpResponse::new(200, raw);
        let err = handle_response(&response, identity).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("&lt;br />\n&lt;b>Warning&lt;/b>: Undefined index"));
        assert!(!message.contains('<'));
        let (_, body) = message.split_once('\n').unwrap();
        assert_eq!(body, raw.replace('<', "&lt;"));
    }

    #[test]
    fn malformed_failure_body_ignores_status() {
        for status in [400, 404, 500, 503] {
            let response = HttpResponse::new(status, "Service Unavailable");
            let err = handle_response(&response, identity).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedResponseBody, "status {status}");
            assert!(err.to_string().ends_with("\nService Unavailable"));
        }
    }

    #[test]
    fn envelope_message_is_surfaced_verbatim() {
        let (handler, sink) = recording();
        let response = HttpResponse::new(
            500,
            r#"{"code":"rest_error","message":"Error message from WP API","data":{"status":403}}"#,
        );
        let err = handler.handle(&response, identity).unwrap_err();
        assert_eq!(err.to_string(), "Error message from WP API");
        assert_eq!(
            err,
            ApiError::RemoteApi {
                code: "rest_error".to_string(),
                message: "Error message from WP API".to_string(),
                status: Some(403),
            }
        );
        assert!(sink.records().is_empty());
    }

    #[test]
    fn unrecognized_failure_body_is_emitted_once() {
        let (handler, sink) = recording();
        let response = HttpResponse::new(500, r#"{"error":true,"message":"Error message"}"#);
        let err = handler.handle(&response, identity).unwrap_err();
        assert_eq!(err.to_string(), UNRECOGNIZED_ERROR_MESSAGE);
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1, json!({"error": true, "message": "Error message"}));
    }

    #[test]
    fn envelope_requires_numeric_status() {
        let value = json!({"code": "x", "message": "y", "data": {"status": "403"}});
        assert!(ErrorEnvelope::from_value(&value).is_none());
        let value = json!({"code": "x", "message": "y", "data": {"status": 403, "params": {"id": "bad"}}});
        let envelope = ErrorEnvelope::from_value(&value).unwrap();
        assert_eq!(envelope.data.http_status(), Some(403));
        assert_eq!(envelope.data.details["params"]["id"], "bad");
    }

    #[test]
    fn envelope_with_unusual_numeric_status_keeps_its_message() {
        let (handler, sink) = recording();
        let response = HttpResponse::new(
            500,
            r#"{"code":"plugin_err","message":"Quota exceeded","data":{"status":70000}}"#,
        );
        let err = handler.handle(&response, identity).unwrap_err();
        assert_eq!(err.to_string(), "Quota exceeded");
        assert_eq!(
            err,
            ApiError::RemoteApi {
                code: "plugin_err".to_string(),
                message: "Quota exceeded".to_string(),
                status: None,
            }
        );

        let response = HttpResponse::new(
            500,
            r#"{"code":"plugin_err","message":"Quota exceeded","data":{"status":403.0}}"#,
        );
        let err = handler.handle(&response, identity).unwrap_err();
        assert_eq!(err.to_string(), "Quota exceeded");
        assert!(matches!(err, ApiError::RemoteApi { status: Some(403), .. }));
        assert!(sink.records().is_empty());
    }

    #[test]
    fn fetch_validated_defers_request_and_checks_schema() {
        let schema: Schema = ObjectSchema::new().required("id", Schema::Integer).into();
        let value = fetch_validated(&schema, || Ok(HttpResponse::new(200, r#"{"id":3}"#))).unwrap();
        assert_eq!(value["id"], 3);

        let err = fetch_validated(&schema, || Ok(HttpResponse::new(200, r#"{"id":"3"}"#))).unwrap_err();
        match err {
            ApiError::SchemaValidation(violations) => {
                let violation = violations.at("$.id").unwrap();
                assert_eq!(violation.expected, "integer");
                assert_eq!(violation.actual, Some(json!("3")));
            }
            other => panic!("expected SchemaValidation, got {other:?}"),
        }
    }

    #[test]
    fn fetch_validated_propagates_request_errors() {
        let err = fetch_validated(&Schema::Any, || {
            Err(ApiError::Transport("connection refused".to_string()))
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn unrelated_success_shape_is_a_validation_error() {
        let schema: Schema = ObjectSchema::new().required("id", Schema::Integer).into();
        let err = fetch_validated(&schema, || {
            Ok(HttpResponse::new(200, r#"{"code":"x","message":"y","data":{"status":200}}"#))
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaValidationError);
    }

    #[test]
    fn repeated_calls_yield_identical_outcomes() {
        let response = HttpResponse::new(502, "<html>Bad gateway</html>");
        let first = handle_response(&response, identity).unwrap_err();
        let second = handle_response(&response, identity).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn decode_mismatch_after_schema_is_reported_as_validation() {
        #[derive(Debug, Deserialize)]
        struct Small {
            #[allow(dead_code)]
            id: u8,
        }
        let schema: Schema = ObjectSchema::new().required("id", Schema::Integer).into();
        let err = decode_validated::<Small>(&schema, json!({"id": 1000})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaValidationError);
    }
}
