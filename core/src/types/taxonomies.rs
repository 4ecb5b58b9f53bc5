//! Taxonomy definitions (`wp/v2/taxonomies`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::context::{Context, Resource};
use crate::schema::{ContextSchemas, ObjectSchema, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyView {
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Post types the taxonomy is registered for.
    pub types: Vec<String>,
    pub hierarchical: bool,
    pub rest_base: String,
    pub rest_namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEmbed {
    pub name: String,
    pub slug: String,
    pub rest_base: String,
    pub rest_namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEdit {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub types: Vec<String>,
    pub hierarchical: bool,
    pub rest_base: String,
    pub rest_namespace: String,
    pub capabilities: BTreeMap<String, String>,
    pub labels: BTreeMap<String, Option<String>>,
    pub show_cloud: bool,
    pub visibility: BTreeMap<String, bool>,
}

pub trait AnyTaxonomy: Resource {}

impl AnyTaxonomy for TaxonomyView {}
impl AnyTaxonomy for TaxonomyEmbed {}
impl AnyTaxonomy for TaxonomyEdit {}

pub fn taxonomy_schemas() -> ContextSchemas {
    let embed = ObjectSchema::new()
        .required("name", Schema::String)
        .required("slug", Schema::String)
        .required("rest_base", Schema::String)
        .required("rest_namespace", Schema::String);

    let view = embed
        .clone()
        .required("description", Schema::String)
        .required("types", Schema::array(Schema::String))
        .required("hierarchical", Schema::Boolean);

    let edit = view
        .clone()
        .required("capabilities", Schema::record(Schema::String))
        .required("labels", Schema::record(Schema::nullable(Schema::String)))
        .required("show_cloud", Schema::Boolean)
        .required("visibility", Schema::record(Schema::Boolean));

    ContextSchemas {
        view: view.into(),
        embed: embed.into(),
        edit: edit.into(),
    }
}

impl Resource for TaxonomyView {
    const CONTEXT: Context = Context::View;

    fn schema() -> Schema {
        taxonomy_schemas().into_context(Self::CONTEXT)
    }
}

impl Resource for TaxonomyEmbed {
    const CONTEXT: Context = Context::Embed;

    fn schema() -> Schema {
        taxonomy_schemas().into_context(Self::CONTEXT)
    }
}

impl Resource for TaxonomyEdit {
    const CONTEXT: Context = Context::Edit;

    fn schema() -> Schema {
        taxonomy_schemas().into_context(Self::CONTEXT)
    }
}
