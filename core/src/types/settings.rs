//! Site settings (`wp/v2/settings`). Only readable in edit context.

use serde::{Deserialize, Serialize};

use super::common::{open_closed_schema, OpenClosed};
use crate::context::{Context, Resource};
use crate::schema::{ObjectSchema, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub title: String,
    pub description: String,
    pub url: String,
    pub email: String,
    pub timezone: String,
    pub date_format: String,
    pub time_format: String,
    pub start_of_week: u8,
    pub language: String,
    pub use_smilies: bool,
    pub default_category: u64,
    pub default_post_format: String,
    pub posts_per_page: u32,
    pub show_on_front: String,
    pub page_on_front: u64,
    pub page_for_posts: u64,
    pub default_ping_status: OpenClosed,
    pub default_comment_status: OpenClosed,
    #[serde(default)]
    pub site_logo: Option<u64>,
    #[serde(default)]
    pub site_icon: Option<u64>,
}

pub fn settings_schema() -> Schema {
    ObjectSchema::new()
        .required("title", Schema::String)
        .required("description", Schema::String)
        .required("url", Schema::String)
        .required("email", Schema::String)
        .required("timezone", Schema::String)
        .required("date_format", Schema::String)
        .required("time_format", Schema::String)
        .required("start_of_week", Schema::Integer)
        .required("language", Schema::String)
        .required("use_smilies", Schema::Boolean)
        .required("default_category", Schema::Integer)
        .required("default_post_format", Schema::String)
        .required("posts_per_page", Schema::Integer)
        .required("show_on_front", Schema::String)
        .required("page_on_front", Schema::Integer)
        .required("page_for_posts", Schema::Integer)
        .required("default_ping_status", open_closed_schema())
        .required("default_comment_status", open_closed_schema())
        .optional("site_logo", Schema::nullable(Schema::Integer))
        .optional("site_icon", Schema::nullable(Schema::Integer))
        .into()
}

impl Resource for Settings {
    const CONTEXT: Context = Context::Edit;

    fn schema() -> Schema {
        settings_schema()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_of_week: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_ping_status: Option<OpenClosed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_comment_status: Option<OpenClosed>,
}
