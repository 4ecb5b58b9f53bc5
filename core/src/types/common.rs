//! Building blocks shared by several resources.

use serde::{Deserialize, Serialize};

use crate::context::{Context, Resource};
use crate::schema::{ObjectSchema, Schema};

/// `{"rendered": ...}`, e.g. `guid` or `caption` outside edit context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    pub rendered: String,
}

/// `{"raw": ..., "rendered": ...}` in edit context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRaw {
    pub raw: String,
    pub rendered: String,
}

/// Post content or excerpt, which may sit behind a post password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protected {
    pub rendered: String,
    pub protected: bool,
}

/// [`Protected`] with the raw source, in edit context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedRaw {
    pub raw: String,
    pub rendered: String,
    pub protected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_version: Option<u32>,
}

pub(crate) fn rendered_schema() -> Schema {
    ObjectSchema::new().required("rendered", Schema::String).into()
}

pub(crate) fn rendered_raw_schema() -> Schema {
    ObjectSchema::new()
        .required("raw", Schema::String)
        .required("rendered", Schema::String)
        .into()
}

pub(crate) fn protected_schema() -> Schema {
    ObjectSchema::new()
        .required("rendered", Schema::String)
        .required("protected", Schema::Boolean)
        .into()
}

pub(crate) fn protected_raw_schema() -> Schema {
    ObjectSchema::new()
        .required("raw", Schema::String)
        .required("rendered", Schema::String)
        .required("protected", Schema::Boolean)
        .optional("block_version", Schema::Integer)
        .into()
}

/// `meta` is an object when keys are registered and an empty array when
/// none are.
pub(crate) fn meta_schema() -> Schema {
    Schema::Union(vec![
        Schema::record(Schema::Any),
        Schema::array(Schema::Any),
    ])
}

/// `open` / `closed`, used by comment and ping status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenClosed {
    Open,
    Closed,
}

pub(crate) fn open_closed_schema() -> Schema {
    Schema::enumeration(["open", "closed"])
}

/// Response of a forced delete: `{"deleted": true, "previous": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deleted<T> {
    pub deleted: bool,
    pub previous: T,
}

impl<T: Resource> Resource for Deleted<T> {
    const CONTEXT: Context = T::CONTEXT;

    fn schema() -> Schema {
        ObjectSchema::new()
            .required("deleted", Schema::Boolean)
            .required("previous", T::schema())
            .into()
    }
}

/// Who an operation targets: the authenticated user or a user ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRef {
    Me,
    Id(u64),
}

impl std::fmt::Display for UserRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRef::Me => f.write_str("me"),
            UserRef::Id(id) => write!(f, "{id}"),
        }
    }
}
