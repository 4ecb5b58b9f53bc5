//! Typed WordPress resources.
//!
//! # Design
//! Every resource exists as one Rust type per context (`PostView`,
//! `PostEmbed`, `PostEdit`, ...) and each type carries the schema its JSON
//! must satisfy through [`Resource`](crate::context::Resource). The
//! per-resource `*_schemas()` functions map a runtime
//! [`Context`](crate::context::Context) to the same schemas for callers that
//! only know the context at runtime.
//!
//! Timestamps use `chrono`; WordPress sends site-local times without an
//! offset, so those are `NaiveDateTime`.

pub mod application_passwords;
pub mod common;
pub mod jwt;
pub mod media;
pub mod posts;
pub mod settings;
pub mod taxonomies;
pub mod terms;
pub mod users;

pub use application_passwords::{ApplicationPassword, ApplicationPasswordInput};
pub use common::{Deleted, OpenClosed, Protected, ProtectedRaw, Rendered, RenderedRaw, UserRef};
pub use jwt::{JwtCredentials, JwtToken, JwtValidation};
pub use media::{AnyMedia, MediaEdit, MediaEmbed, MediaInput, MediaType, MediaView};
pub use posts::{AnyPost, PostEdit, PostEmbed, PostFormat, PostInput, PostStatus, PostView};
pub use settings::{Settings, SettingsUpdate};
pub use taxonomies::{AnyTaxonomy, TaxonomyEdit, TaxonomyEmbed, TaxonomyView};
pub use terms::{AnyTerm, TermEdit, TermEmbed, TermInput, TermKind, TermView};
pub use users::{AnyUser, UserEdit, UserEmbed, UserInput, UserView};
