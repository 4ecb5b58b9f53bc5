//! Users (`wp/v2/users`).

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::meta_schema;
use crate::context::{Context, Resource};
use crate::schema::{ContextSchemas, ObjectSchema, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub description: String,
    pub link: String,
    pub slug: String,
    /// Keyed by pixel size. Absent when avatars are disabled.
    #[serde(default)]
    pub avatar_urls: BTreeMap<String, String>,
    pub meta: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmbed {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub description: String,
    pub link: String,
    pub slug: String,
    #[serde(default)]
    pub avatar_urls: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEdit {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub url: String,
    pub description: String,
    pub link: String,
    pub locale: String,
    pub nickname: String,
    pub slug: String,
    pub registered_date: DateTime<FixedOffset>,
    pub roles: Vec<String>,
    pub capabilities: BTreeMap<String, bool>,
    pub extra_capabilities: BTreeMap<String, bool>,
    #[serde(default)]
    pub avatar_urls: BTreeMap<String, String>,
    pub meta: Value,
}

pub trait AnyUser: Resource {}

impl AnyUser for UserView {}
impl AnyUser for UserEmbed {}
impl AnyUser for UserEdit {}

pub fn user_schemas() -> ContextSchemas {
    let embed = ObjectSchema::new()
        .required("id", Schema::Integer)
        .required("name", Schema::String)
        .required("url", Schema::String)
        .required("description", Schema::String)
        .required("link", Schema::String)
        .required("slug", Schema::String)
        .optional("avatar_urls", Schema::record(Schema::String));

    let view = embed.clone().required("meta", meta_schema());

    let edit = view
        .clone()
        .required("username", Schema::String)
        .required("first_name", Schema::String)
        .required("last_name", Schema::String)
        .required("email", Schema::String)
        .required("locale", Schema::String)
        .required("nickname", Schema::String)
        .required("registered_date", Schema::String)
        .required("roles", Schema::array(Schema::String))
        .required("capabilities", Schema::record(Schema::Boolean))
        .required("extra_capabilities", Schema::record(Schema::Boolean));

    ContextSchemas {
        view: view.into(),
        embed: embed.into(),
        edit: edit.into(),
    }
}

impl Resource for UserView {
    const CONTEXT: Context = Context::View;

    fn schema() -> Schema {
        user_schemas().into_context(Self::CONTEXT)
    }
}

impl Resource for UserEmbed {
    const CONTEXT: Context = Context::Embed;

    fn schema() -> Schema {
        user_schemas().into_context(Self::CONTEXT)
    }
}

impl Resource for UserEdit {
    const CONTEXT: Context = Context::Edit;

    fn schema() -> Schema {
        user_schemas().into_context(Self::CONTEXT)
    }
}

/// Fields for creating a user. `username`, `email` and `password` are
/// required by WordPress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}
