//! Taxonomy terms: categories, tags and custom taxonomies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::meta_schema;
use crate::context::{Context, Resource};
use crate::schema::{ContextSchemas, ObjectSchema, Schema};

/// Which term collection a call targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermKind {
    Categories,
    Tags,
    /// A custom taxonomy, named by its `rest_base`.
    Custom(String),
}

impl TermKind {
    pub fn rest_base(&self) -> &str {
        match self {
            TermKind::Categories => "categories",
            TermKind::Tags => "tags",
            TermKind::Custom(base) => base,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermView {
    pub id: u64,
    pub count: u64,
    pub description: String,
    pub link: String,
    pub name: String,
    pub slug: String,
    pub taxonomy: String,
    /// Only present on hierarchical taxonomies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    pub meta: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEmbed {
    pub id: u64,
    pub link: String,
    pub name: String,
    pub slug: String,
    pub taxonomy: String,
}

/// Terms expose the same fields in edit context as in view context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermEdit {
    pub id: u64,
    pub count: u64,
    pub description: String,
    pub link: String,
    pub name: String,
    pub slug: String,
    pub taxonomy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    pub meta: Value,
}

pub trait AnyTerm: Resource {}

impl AnyTerm for TermView {}
impl AnyTerm for TermEmbed {}
impl AnyTerm for TermEdit {}

pub fn term_schemas() -> ContextSchemas {
    let embed = ObjectSchema::new()
        .required("id", Schema::Integer)
        .required("link", Schema::String)
        .required("name", Schema::String)
        .required("slug", Schema::String)
        .required("taxonomy", Schema::String);

    let view = embed
        .clone()
        .required("count", Schema::Integer)
        .required("description", Schema::String)
        .optional("parent", Schema::Integer)
        .required("meta", meta_schema());

    ContextSchemas {
        edit: view.clone().into(),
        view: view.into(),
        embed: embed.into(),
    }
}

impl Resource for TermView {
    const CONTEXT: Context = Context::View;

    fn schema() -> Schema {
        term_schemas().into_context(Self::CONTEXT)
    }
}

impl Resource for TermEmbed {
    const CONTEXT: Context = Context::Embed;

    fn schema() -> Schema {
        term_schemas().into_context(Self::CONTEXT)
    }
}

impl Resource for TermEdit {
    const CONTEXT: Context = Context::Edit;

    fn schema() -> Schema {
        term_schemas().into_context(Self::CONTEXT)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tags_have_no_parent() {
        let body = json!({
            "id": 4,
            "count": 2,
            "description": "",
            "link": "http://wp.test/tag/rust/",
            "name": "Rust",
            "slug": "rust",
            "taxonomy": "post_tag",
            "meta": []
        });
        assert!(TermView::schema().validate(&body).is_ok());
        let term: TermView = serde_json::from_value(body).unwrap();
        assert_eq!(term.parent, None);
    }

    #[test]
    fn custom_kind_uses_its_rest_base() {
        assert_eq!(TermKind::Custom("genres".to_string()).rest_base(), "genres");
        assert_eq!(TermKind::Tags.rest_base(), "tags");
    }
}
