//! WordPress REST routes as methods on [`WpClient`](crate::client::WpClient).
//!
//! Every route has a `build_*` method that returns the `HttpRequest` and an
//! executing method of the same name without the prefix. Methods that read a
//! resource are generic over its context type, so the context query argument
//! and the validating schema always agree.

pub mod application_passwords;
pub mod discovery;
pub mod jwt;
pub mod media;
pub mod posts;
pub mod settings;
pub mod taxonomies;
pub mod terms;
pub mod users;

pub use discovery::{build_discovery_request, discover, parse_discovery, API_LINK_REL};
pub use media::{ListMediaArgs, Upload};
pub use posts::ListPostsArgs;
pub use terms::ListTermsArgs;
pub use users::ListUsersArgs;
