//! Posts (`wp/v2/posts`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{
    meta_schema, open_closed_schema, protected_raw_schema, protected_schema, rendered_raw_schema,
    rendered_schema, OpenClosed, Protected, ProtectedRaw, Rendered, RenderedRaw,
};
use crate::context::{Context, Resource};
use crate::schema::{ContextSchemas, ObjectSchema, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostStatus {
    Publish,
    Future,
    Draft,
    Pending,
    Private,
    Trash,
    AutoDraft,
}

impl PostStatus {
    pub const ALL: [PostStatus; 7] = [
        PostStatus::Publish,
        PostStatus::Future,
        PostStatus::Draft,
        PostStatus::Pending,
        PostStatus::Private,
        PostStatus::Trash,
        PostStatus::AutoDraft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Publish => "publish",
            PostStatus::Future => "future",
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Private => "private",
            PostStatus::Trash => "trash",
            PostStatus::AutoDraft => "auto-draft",
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostFormat {
    Standard,
    Aside,
    Chat,
    Gallery,
    Link,
    Image,
    Quote,
    Status,
    Video,
    Audio,
}

const POST_FORMATS: [&str; 10] = [
    "standard", "aside", "chat", "gallery", "link", "image", "quote", "status", "video", "audio",
];

/// Post as rendered for anonymous readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: u64,
    pub date: Option<NaiveDateTime>,
    pub date_gmt: Option<NaiveDateTime>,
    pub guid: Rendered,
    pub modified: NaiveDateTime,
    pub modified_gmt: NaiveDateTime,
    pub slug: String,
    pub status: PostStatus,
    #[serde(rename = "type")]
    pub post_type: String,
    pub link: String,
    pub title: Rendered,
    pub content: Protected,
    pub excerpt: Protected,
    pub author: u64,
    pub featured_media: u64,
    pub comment_status: OpenClosed,
    pub ping_status: OpenClosed,
    pub sticky: bool,
    pub template: String,
    pub format: PostFormat,
    pub meta: Value,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
}

/// Post as embedded in another resource's `_embedded`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostEmbed {
    pub id: u64,
    pub date: Option<NaiveDateTime>,
    pub slug: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub link: String,
    pub title: Rendered,
    pub author: u64,
    pub excerpt: Protected,
    pub featured_media: u64,
}

/// Post with raw fields, for users who can edit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostEdit {
    pub id: u64,
    pub date: Option<NaiveDateTime>,
    pub date_gmt: Option<NaiveDateTime>,
    pub guid: RenderedRaw,
    pub modified: NaiveDateTime,
    pub modified_gmt: NaiveDateTime,
    pub password: String,
    pub slug: String,
    pub generated_slug: String,
    pub status: PostStatus,
    #[serde(rename = "type")]
    pub post_type: String,
    pub link: String,
    pub permalink_template: String,
    pub title: RenderedRaw,
    pub content: ProtectedRaw,
    pub excerpt: ProtectedRaw,
    pub author: u64,
    pub featured_media: u64,
    pub comment_status: OpenClosed,
    pub ping_status: OpenClosed,
    pub sticky: bool,
    pub template: String,
    pub format: PostFormat,
    pub meta: Value,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
}

/// Any of the three post shapes.
pub trait AnyPost: Resource {}

impl AnyPost for PostView {}
impl AnyPost for PostEmbed {}
impl AnyPost for PostEdit {}

pub fn post_schemas() -> ContextSchemas {
    let nullable_date = || Schema::nullable(Schema::String);
    let status = Schema::enumeration(PostStatus::ALL.iter().map(PostStatus::as_str));

    let embed = ObjectSchema::new()
        .required("id", Schema::Integer)
        .required("date", nullable_date())
        .required("slug", Schema::String)
        .required("type", Schema::String)
        .required("link", Schema::String)
        .required("title", rendered_schema())
        .required("author", Schema::Integer)
        .required("excerpt", protected_schema())
        .required("featured_media", Schema::Integer);

    let view = embed
        .clone()
        .required("date_gmt", nullable_date())
        .required("guid", rendered_schema())
        .required("modified", Schema::String)
        .required("modified_gmt", Schema::String)
        .required("status", status)
        .required("content", protected_schema())
        .required("comment_status", open_closed_schema())
        .required("ping_status", open_closed_schema())
        .required("sticky", Schema::Boolean)
        .required("template", Schema::String)
        .required("format", Schema::enumeration(POST_FORMATS))
        .required("meta", meta_schema())
        .required("categories", Schema::array(Schema::Integer))
        .required("tags", Schema::array(Schema::Integer));

    let edit = view.clone().extend(
        ObjectSchema::new()
            .required("guid", rendered_raw_schema())
            .required("title", rendered_raw_schema())
            .required("content", protected_raw_schema())
            .required("excerpt", protected_raw_schema())
            .required("password", Schema::String)
            .required("generated_slug", Schema::String)
            .required("permalink_template", Schema::String),
    );

    ContextSchemas {
        view: view.into(),
        embed: embed.into(),
        edit: edit.into(),
    }
}

impl Resource for PostView {
    const CONTEXT: Context = Context::View;

    fn schema() -> Schema {
        post_schemas().into_context(Self::CONTEXT)
    }
}

impl Resource for PostEmbed {
    const CONTEXT: Context = Context::Embed;

    fn schema() -> Schema {
        post_schemas().into_context(Self::CONTEXT)
    }
}

impl Resource for PostEdit {
    const CONTEXT: Context = Context::Edit;

    fn schema() -> Schema {
        post_schemas().into_context(Self::CONTEXT)
    }
}

/// Fields accepted when creating or updating a post. Unset fields are left
/// out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_status: Option<OpenClosed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping_status: Option<OpenClosed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<PostFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
}
