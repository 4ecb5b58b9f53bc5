//! Resource contexts and the typed-resource trait.
//!
//! WordPress renders every resource in one of three contexts. `view` is the
//! public shape, `embed` a trimmed shape used inside `_embedded`, and `edit`
//! adds raw and capability-gated fields for authenticated editors. Each
//! context has its own Rust type per resource, so the context sent on the
//! wire is chosen by the type the caller asks for.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::schema::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    #[default]
    View,
    Embed,
    Edit,
}

impl Context {
    pub const ALL: [Context; 3] = [Context::View, Context::Embed, Context::Edit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Context::View => "view",
            Context::Embed => "embed",
            Context::Edit => "edit",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A response type bound to one resource context and its schema.
pub trait Resource: DeserializeOwned {
    /// Context requested on the wire when fetching this type.
    const CONTEXT: Context;

    /// Shape the parsed body must satisfy before deserialization.
    fn schema() -> Schema;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_serializes_lowercase() {
        for context in Context::ALL {
            let json = serde_json::to_value(context).unwrap();
            assert_eq!(json, context.as_str());
            let back: Context = serde_json::from_value(json).unwrap();
            assert_eq!(back, context);
        }
    }

    #[test]
    fn default_context_is_view() {
        assert_eq!(Context::default(), Context::View);
    }
}
