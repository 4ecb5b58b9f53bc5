//! Media attachments (`wp/v2/media`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{
    meta_schema, open_closed_schema, rendered_raw_schema, rendered_schema, OpenClosed, Rendered,
    RenderedRaw,
};
use crate::context::{Context, Resource};
use crate::schema::{ContextSchemas, ObjectSchema, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaView {
    pub id: u64,
    pub date: Option<NaiveDateTime>,
    pub date_gmt: Option<NaiveDateTime>,
    pub guid: Rendered,
    pub modified: NaiveDateTime,
    pub modified_gmt: NaiveDateTime,
    pub slug: String,
    pub status: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub link: String,
    pub title: Rendered,
    pub author: u64,
    pub comment_status: OpenClosed,
    pub ping_status: OpenClosed,
    pub template: String,
    pub meta: Value,
    pub alt_text: String,
    pub caption: Rendered,
    pub description: Rendered,
    pub media_type: MediaType,
    pub mime_type: String,
    /// Sizes, dimensions and EXIF data; shape depends on the file type.
    pub media_details: Value,
    /// Parent post, if the file is attached to one.
    pub post: Option<u64>,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEmbed {
    pub id: u64,
    pub date: Option<NaiveDateTime>,
    pub slug: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub link: String,
    pub title: Rendered,
    pub author: u64,
    pub caption: Rendered,
    pub alt_text: String,
    pub media_type: MediaType,
    pub mime_type: String,
    pub media_details: Value,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEdit {
    pub id: u64,
    pub date: Option<NaiveDateTime>,
    pub date_gmt: Option<NaiveDateTime>,
    pub guid: RenderedRaw,
    pub modified: NaiveDateTime,
    pub modified_gmt: NaiveDateTime,
    pub slug: String,
    pub generated_slug: String,
    pub status: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub link: String,
    pub permalink_template: String,
    pub title: RenderedRaw,
    pub author: u64,
    pub comment_status: OpenClosed,
    pub ping_status: OpenClosed,
    pub template: String,
    pub meta: Value,
    pub alt_text: String,
    pub caption: RenderedRaw,
    pub description: RenderedRaw,
    pub media_type: MediaType,
    pub mime_type: String,
    pub media_details: Value,
    pub post: Option<u64>,
    pub source_url: String,
    #[serde(default)]
    pub missing_image_sizes: Vec<String>,
}

pub trait AnyMedia: Resource {}

impl AnyMedia for MediaView {}
impl AnyMedia for MediaEmbed {}
impl AnyMedia for MediaEdit {}

pub fn media_schemas() -> ContextSchemas {
    let nullable_date = || Schema::nullable(Schema::String);
    let details = || Schema::Union(vec![Schema::record(Schema::Any), Schema::array(Schema::Any)]);

    let embed = ObjectSchema::new()
        .required("id", Schema::Integer)
        .required("date", nullable_date())
        .required("slug", Schema::String)
        .required("type", Schema::String)
        .required("link", Schema::String)
        .required("title", rendered_schema())
        .required("author", Schema::Integer)
        .required("caption", rendered_schema())
        .required("alt_text", Schema::String)
        .required("media_type", Schema::enumeration(["image", "file"]))
        .required("mime_type", Schema::String)
        .required("media_details", details())
        .required("source_url", Schema::String);

    let view = embed
        .clone()
        .required("date_gmt", nullable_date())
        .required("guid", rendered_schema())
        .required("modified", Schema::String)
        .required("modified_gmt", Schema::String)
        .required("status", Schema::String)
        .required("comment_status", open_closed_schema())
        .required("ping_status", open_closed_schema())
        .required("template", Schema::String)
        .required("meta", meta_schema())
        .required("description", rendered_schema())
        .required("post", Schema::nullable(Schema::Integer));

    let edit = view.clone().extend(
        ObjectSchema::new()
            .required("guid", rendered_raw_schema())
            .required("title", rendered_raw_schema())
            .required("caption", rendered_raw_schema())
            .required("description", rendered_raw_schema())
            .required("generated_slug", Schema::String)
            .required("permalink_template", Schema::String)
            .optional("missing_image_sizes", Schema::array(Schema::String)),
    );

    ContextSchemas {
        view: view.into(),
        embed: embed.into(),
        edit: edit.into(),
    }
}

impl Resource for MediaView {
    const CONTEXT: Context = Context::View;

    fn schema() -> Schema {
        media_schemas().into_context(Self::CONTEXT)
    }
}

impl Resource for MediaEmbed {
    const CONTEXT: Context = Context::Embed;

    fn schema() -> Schema {
        media_schemas().into_context(Self::CONTEXT)
    }
}

impl Resource for MediaEdit {
    const CONTEXT: Context = Context::Edit;

    fn schema() -> Schema {
        media_schemas().into_context(Self::CONTEXT)
    }
}

/// Metadata that can be changed on an existing attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embed_shape_parses() {
        let body = json!({
            "id": 9,
            "date": "2024-05-01T12:00:00",
            "slug": "cat",
            "type": "attachment",
            "link": "http://wp.test/cat/",
            "title": {"rendered": "cat"},
            "author": 1,
            "caption": {"rendered": ""},
            "alt_text": "A cat",
            "media_type": "image",
            "mime_type": "image/jpeg",
            "media_details": {"width": 640, "height": 480, "sizes": {}},
            "source_url": "http://wp.test/wp-content/uploads/cat.jpg"
        });
        assert!(MediaEmbed::schema().validate(&body).is_ok());
        let media: MediaEmbed = serde_json::from_value(body).unwrap();
        assert_eq!(media.media_type, MediaType::Image);
        assert_eq!(media.media_details["width"], 640);
    }

    #[test]
    fn unknown_media_type_is_rejected() {
        let violations = MediaEmbed::schema()
            .validate(&json!({"media_type": "video"}))
            .unwrap_err();
        assert_eq!(
            violations.at("$.media_type").unwrap().expected,
            "one of [image, file]"
        );
    }
}
