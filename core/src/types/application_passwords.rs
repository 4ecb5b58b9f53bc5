//! Application passwords (`wp/v2/users/<user>/application-passwords`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::{Context, Resource};
use crate::schema::{ObjectSchema, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPassword {
    pub uuid: Uuid,
    /// UUID chosen by the requesting application, or an empty string.
    pub app_id: String,
    pub name: String,
    pub created: String,
    pub last_used: Option<String>,
    pub last_ip: Option<String>,
    /// Plaintext password, returned only by the create call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

pub fn application_password_schema() -> Schema {
    ObjectSchema::new()
        .required("uuid", Schema::String)
        .required("app_id", Schema::String)
        .required("name", Schema::String)
        .required("created", Schema::String)
        .required("last_used", Schema::nullable(Schema::String))
        .required("last_ip", Schema::nullable(Schema::String))
        .optional("password", Schema::String)
        .into()
}

impl Resource for ApplicationPassword {
    const CONTEXT: Context = Context::Edit;

    fn schema() -> Schema {
        application_password_schema()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPasswordInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<Uuid>,
}

impl ApplicationPasswordInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            app_id: None,
        }
    }
}
