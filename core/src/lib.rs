//! Typed client for the WordPress REST API.
//!
//! # Overview
//! Requests are built as plain `HttpRequest` values and executed by a
//! [`Transport`] carried in the [`ClientConfig`]. Every response goes through
//! the same pipeline ([`ResponseHandler`]): non-2xx bodies are classified
//! into WordPress error envelopes or unrecognized bodies, and 2xx bodies are
//! validated against the schema of the expected resource before they are
//! deserialized.
//!
//! # Design
//! - One closed error type, [`ApiError`], with a fieldless [`ErrorKind`] for
//!   matching.
//! - Each resource has one Rust type per [`Context`]; the context is chosen
//!   by the type parameter, e.g. `client.get_post::<PostEdit>(7)`.
//! - No global state: transport, credentials and the diagnostic sink all
//!   live in the configuration.
//!
//! ```no_run
//! use wp_rest_core::{Auth, ClientConfig, PostView, WpClient};
//!
//! let config = ClientConfig::builder("https://example.com")
//!     .auth(Auth::application_password("admin", "abcd efgh ijkl mnop"))
//!     .build()?;
//! let client = WpClient::new(config);
//! let post: PostView = client.get_post(1)?;
//! println!("{}", post.title.rendered);
//! # Ok::<(), wp_rest_core::ApiError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod http;
pub mod message;
pub mod pipeline;
pub mod query;
pub mod schema;
pub mod transport;
pub mod types;

pub use api::{ListMediaArgs, ListPostsArgs, ListTermsArgs, ListUsersArgs, Upload};
pub use client::{Page, WpClient};
pub use config::{Auth, ClientConfig, ClientConfigBuilder, RestRoot};
pub use context::{Context, Resource};
pub use diagnostics::{DiagnosticSink, LogSink, MemorySink};
pub use error::{ApiError, ErrorKind, Result, UNRECOGNIZED_ERROR_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use message::{error_message, error_message_quiet, error_message_with, ErrorMessage};
pub use pipeline::{fetch_validated, handle_response, ErrorEnvelope, ResponseHandler};
pub use query::{path_segment, Order, Paging, Query};
pub use schema::{ContextSchemas, ObjectSchema, Schema, Violation, Violations};
pub use transport::{NoTransport, Transport};
#[cfg(feature = "ureq")]
pub use transport::{UreqTransport, DEFAULT_BODY_LIMIT};
pub use types::{
    AnyMedia, AnyPost, AnyTaxonomy, AnyTerm, AnyUser, ApplicationPassword,
    ApplicationPasswordInput, Deleted, JwtToken, JwtValidation, MediaEdit, MediaEmbed,
    MediaInput, MediaView, PostEdit, PostEmbed, PostInput, PostStatus, PostView, Settings,
    SettingsUpdate, TaxonomyEdit, TaxonomyEmbed, TaxonomyView, TermEdit, TermEmbed, TermInput,
    TermKind, TermView, UserEdit, UserEmbed, UserInput, UserRef, UserView,
};
