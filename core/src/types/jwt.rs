//! Tokens from the JWT authentication plugin (`jwt-auth/v1`).

use serde::{Deserialize, Serialize};

use crate::schema::{ObjectSchema, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtCredentials {
    pub username: String,
    pub password: String,
}

/// Successful response of `POST jwt-auth/v1/token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtToken {
    pub token: String,
    pub user_email: String,
    pub user_nicename: String,
    pub user_display_name: String,
}

impl JwtToken {
    pub fn schema() -> Schema {
        ObjectSchema::new()
            .required("token", Schema::String)
            .required("user_email", Schema::String)
            .required("user_nicename", Schema::String)
            .required("user_display_name", Schema::String)
            .into()
    }
}

/// Successful response of `POST jwt-auth/v1/token/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtValidation {
    pub code: String,
    pub data: JwtValidationData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtValidationData {
    pub status: u16,
}

impl JwtValidation {
    pub fn schema() -> Schema {
        ObjectSchema::new()
            .required("code", Schema::enumeration(["jwt_auth_valid_token"]))
            .required(
                "data",
                ObjectSchema::new().required("status", Schema::Integer).into(),
            )
            .into()
    }
}
