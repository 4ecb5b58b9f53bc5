//! Error types for the WordPress REST client.
//!
//! # Design
//! Every failure a call can produce is a variant of one closed enum, so
//! callers `match` on the variant (or on [`ApiError::kind`]) instead of
//! probing the shape of an error at runtime. Variants carry only the payload
//! their kind needs: the envelope fields for `RemoteApi`, the field-level
//! violations for `SchemaValidation`, and so on.

use thiserror::Error;

use crate::schema::Violations;

/// Message used when a failed response carries a body that is not a
/// WordPress error envelope.
pub const UNRECOGNIZED_ERROR_MESSAGE: &str =
    "Unexpected response from server. Please consult the logs.";

/// Discriminant of [`ApiError`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedResponseBody,
    RemoteApiError,
    UnrecognizedErrorBody,
    SchemaValidationError,
    EndpointNotFound,
    RouteDiscoveryError,
    Transport,
    Serialization,
    InvalidConfig,
}

/// Errors returned by every client operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The body could not be parsed as JSON. The message embeds the parse
    /// error and the escaped raw body.
    #[error("{message}")]
    MalformedResponseBody { message: String },

    /// A non-2xx response carrying a WordPress error envelope.
    ///
    /// `status` is the envelope's `data.status` when it is a valid HTTP
    /// status code, and `None` when the plugin reported something else.
    #[error("{message}")]
    RemoteApi {
        code: String,
        message: String,
        status: Option<u16>,
    },

    /// A non-2xx response whose JSON body is not an error envelope.
    #[error("{}", UNRECOGNIZED_ERROR_MESSAGE)]
    UnrecognizedErrorBody { body: serde_json::Value },

    /// The body parsed but does not match the expected shape.
    #[error("{0}")]
    SchemaValidation(Violations),

    /// The requested site or route does not exist.
    #[error("endpoint not found: {0}")]
    EndpointNotFound(String),

    /// The site did not advertise its REST API root.
    #[error("REST API discovery failed: {0}")]
    RouteDiscovery(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::MalformedResponseBody { .. } => ErrorKind::MalformedResponseBody,
            ApiError::RemoteApi { .. } => ErrorKind::RemoteApiError,
            ApiError::UnrecognizedErrorBody { .. } => ErrorKind::UnrecognizedErrorBody,
            ApiError::SchemaValidation(_) => ErrorKind::SchemaValidationError,
            ApiError::EndpointNotFound(_) => ErrorKind::EndpointNotFound,
            ApiError::RouteDiscovery(_) => ErrorKind::RouteDiscoveryError,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Serialization(_) => ErrorKind::Serialization,
            ApiError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    /// The WordPress error code, for `RemoteApi` failures.
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            ApiError::RemoteApi { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_api_displays_envelope_message_verbatim() {
        let err = ApiError::RemoteApi {
            code: "rest_forbidden".to_string(),
            message: "Sorry, you are not allowed to do that.".to_string(),
            status: Some(401),
        };
        assert_eq!(err.to_string(), "Sorry, you are not allowed to do that.");
        assert_eq!(err.kind(), ErrorKind::RemoteApiError);
        assert_eq!(err.remote_code(), Some("rest_forbidden"));
    }

    #[test]
    fn unrecognized_body_uses_fixed_message() {
        let err = ApiError::UnrecognizedErrorBody {
            body: serde_json::json!({"error": true}),
        };
        assert_eq!(err.to_string(), UNRECOGNIZED_ERROR_MESSAGE);
        assert_eq!(err.remote_code(), None);
    }
}
