//! Turning arbitrary error values into one human-readable line.

use std::fmt;

use serde_json::Value;

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::ApiError;
use crate::schema::Violations;

/// Values that may carry a user-facing message.
pub trait ErrorMessage: fmt::Debug {
    fn error_message(&self) -> Option<String>;

    /// Representation handed to the diagnostic channel when there is no
    /// message to show.
    fn diagnostic_value(&self) -> Value {
        Value::String(format!("{self:?}"))
    }
}

impl ErrorMessage for ApiError {
    fn error_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ErrorMessage for Violations {
    fn error_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Objects with a string `message` member, such as a decoded error body.
impl ErrorMessage for Value {
    fn error_message(&self) -> Option<String> {
        self.get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    fn diagnostic_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ErrorMessage + ?Sized> ErrorMessage for &T {
    fn error_message(&self) -> Option<String> {
        (**self).error_message()
    }

    fn diagnostic_value(&self) -> Value {
        (**self).diagnostic_value()
    }
}

/// The message carried by `err`, or `fallback`. An unrecognized value is
/// logged so its shape is not lost.
pub fn error_message<E: ErrorMessage + ?Sized>(err: &E, fallback: &str) -> String {
    normalize(err, fallback, Some(&LogSink))
}

/// Like [`error_message`] but never emits diagnostics.
pub fn error_message_quiet<E: ErrorMessage + ?Sized>(err: &E, fallback: &str) -> String {
    normalize(err, fallback, None)
}

/// Like [`error_message`] with an explicit diagnostic sink.
pub fn error_message_with<E: ErrorMessage + ?Sized>(
    err: &E,
    fallback: &str,
    sink: &dyn DiagnosticSink,
) -> String {
    normalize(err, fallback, Some(sink))
}

fn normalize<E: ErrorMessage + ?Sized>(
    err: &E,
    fallback: &str,
    sink: Option<&dyn DiagnosticSink>,
) -> String {
    match err.error_message() {
        Some(message) => message,
        None => {
            if let Some(sink) = sink {
                sink.emit("unrecognized error value", &err.diagnostic_value());
            }
            fallback.to_string()
        }
    }
}
