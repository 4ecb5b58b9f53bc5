//! Client configuration.
//!
//! # Design
//! Everything a call needs besides its own arguments lives here: where the
//! REST API is, how to authenticate, which transport executes requests and
//! where diagnostics go. Each configuration owns its transport; there is no
//! process-wide default to override.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use url::Url;

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::{ApiError, Result};
use crate::transport::Transport;

/// Credentials attached to every request.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Auth {
    #[default]
    None,
    /// Core application passwords, sent as HTTP Basic.
    ApplicationPassword { username: String, password: String },
    /// A bearer token, e.g. one issued by the JWT authentication plugin.
    Bearer(String),
}

impl Auth {
    pub fn application_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Auth::ApplicationPassword {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Auth::Bearer(token.into())
    }

    /// Value of the `Authorization` header, if any.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Auth::None => None,
            Auth::ApplicationPassword { username, password } => {
                // WordPress displays application passwords in groups of four
                // separated by spaces; it accepts them with or without.
                let credentials = format!("{username}:{password}");
                let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
                Some(format!("Basic {encoded}"))
            }
            Auth::Bearer(token) => Some(format!("Bearer {token}")),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::None => f.write_str("None"),
            Auth::ApplicationPassword { username, .. } => f
                .debug_struct("ApplicationPassword")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Auth::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
        }
    }
}

/// Location of the REST API root.
///
/// Sites with pretty permalinks serve routes under a path (`/wp-json/`);
/// sites without them route through the `rest_route` query parameter.
/// Any other query the root carries (a language switch, say) is kept in
/// `query` and sent ahead of each call's own arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestRoot {
    /// Root URL ending in `/`, without query; routes are appended to the path.
    Path {
        root: String,
        query: Vec<(String, String)>,
    },
    /// Site URL without query; routes travel in `?rest_route=`.
    Query {
        site: String,
        query: Vec<(String, String)>,
    },
}

impl RestRoot {
    pub fn parse(root: &str) -> Result<Self> {
        let mut url = parse_http_url(root)?;
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let routed = pairs.iter().any(|(key, _)| key == "rest_route");
        let query = pairs
            .into_iter()
            .filter(|(key, _)| key != "rest_route")
            .collect();
        url.set_query(None);
        url.set_fragment(None);
        if routed {
            return Ok(RestRoot::Query {
                site: url.to_string(),
                query,
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(RestRoot::Path {
            root: url.to_string(),
            query,
        })
    }

    /// Full URL of `route` (e.g. `wp/v2/posts/5`) with an encoded query.
    pub fn url(&self, route: &str, query: &[(String, String)]) -> String {
        let route = route.trim_start_matches('/');
        match self {
            RestRoot::Path { root, query: base } => {
                let mut url = format!("{root}{route}");
                if !base.is_empty() || !query.is_empty() {
                    url.push('?');
                    url.push_str(&encode_pairs(base.iter().chain(query.iter())));
                }
                url
            }
            RestRoot::Query { site, query: base } => {
                let rest_route = ("rest_route".to_string(), format!("/{route}"));
                let pairs = std::iter::once(&rest_route)
                    .chain(base.iter())
                    .chain(query.iter());
                format!("{site}?{}", encode_pairs(pairs))
            }
        }
    }
}

fn encode_pairs<'a>(pairs: impl Iterator<Item = &'a (String, String)>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidConfig(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::InvalidConfig(format!(
            "{raw}: unsupported scheme `{other}`"
        ))),
    }
}

/// Immutable client configuration. Build with [`ClientConfig::builder`].
#[derive(Clone)]
pub struct ClientConfig {
    site_url: String,
    rest_root: RestRoot,
    auth: Auth,
    user_agent: String,
    transport: Arc<dyn Transport>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl ClientConfig {
    pub fn builder(site_url: &str) -> ClientConfigBuilder {
        ClientConfigBuilder {
            site_url: site_url.to_string(),
            rest_root: None,
            auth: Auth::None,
            user_agent: None,
            transport: None,
            diagnostics: None,
        }
    }

    /// Configuration from the environment.
    ///
    /// - `WP_BASE_URL` (required): site URL.
    /// - `WP_REST_ROOT`: REST root, when it is not `<site>/wp-json/`.
    /// - `WP_USERNAME` + `WP_APPLICATION_PASSWORD`: Basic auth.
    /// - `WP_JWT_TOKEN`: bearer auth, used when no application password is set.
    pub fn from_env() -> Result<Self> {
        Self::builder_from_lookup(|key| std::env::var(key).ok())?.build()
    }

    fn builder_from_lookup<F>(lookup: F) -> Result<ClientConfigBuilder>
    where
        F: Fn(&str) -> Option<String>,
    {
        let site_url = lookup("WP_BASE_URL")
            .ok_or_else(|| ApiError::InvalidConfig("WP_BASE_URL is not set".to_string()))?;
        let mut builder = Self::builder(&site_url);
        if let Some(root) = lookup("WP_REST_ROOT") {
            builder = builder.rest_root(&root);
        }
        let app_password = lookup("WP_USERNAME").zip(lookup("WP_APPLICATION_PASSWORD"));
        if let Some((username, password)) = app_password {
            builder = builder.auth(Auth::application_password(username, password));
        } else if let Some(token) = lookup("WP_JWT_TOKEN") {
            builder = builder.auth(Auth::bearer(token));
        }
        Ok(builder)
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn rest_root(&self) -> &RestRoot {
        &self.rest_root
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn diagnostics(&self) -> Arc<dyn DiagnosticSink> {
        Arc::clone(&self.diagnostics)
    }

    /// Same configuration with different credentials.
    pub fn with_auth(&self, auth: Auth) -> Self {
        Self {
            auth,
            ..self.clone()
        }
    }

    /// Same configuration pointed at another REST root.
    pub fn with_rest_root(&self, root: &str) -> Result<Self> {
        Ok(Self {
            rest_root: RestRoot::parse(root)?,
            ..self.clone()
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("site_url", &self.site_url)
            .field("rest_root", &self.rest_root)
            .field("auth", &self.auth)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

pub struct ClientConfigBuilder {
    site_url: String,
    rest_root: Option<String>,
    auth: Auth,
    user_agent: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl ClientConfigBuilder {
    /// Override the REST root, e.g. with the result of discovery.
    pub fn rest_root(mut self, root: &str) -> Self {
        self.rest_root = Some(root.to_string());
        self
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let site = parse_http_url(&self.site_url)?;
        let rest_root = match &self.rest_root {
            Some(root) => RestRoot::parse(root)?,
            None => {
                let site = site.as_str().trim_end_matches('/');
                RestRoot::parse(&format!("{site}/wp-json/"))?
            }
        };
        Ok(ClientConfig {
            site_url: site.to_string(),
            rest_root,
            auth: self.auth,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("wp-rest-core/{}", env!("CARGO_PKG_VERSION"))),
            transport: self.transport.unwrap_or_else(default_transport),
            diagnostics: self.diagnostics.unwrap_or_else(|| Arc::new(LogSink)),
        })
    }
}

#[cfg(feature = "ureq")]
fn default_transport() -> Arc<dyn Transport> {
    Arc::new(crate::transport::UreqTransport::new())
}

#[cfg(not(feature = "ureq"))]
fn default_transport() -> Arc<dyn Transport> {
    Arc::new(crate::transport::NoTransport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    #[test]
    fn default_rest_root_is_wp_json() {
        let config = ClientConfig::builder("https://example.com").build().unwrap();
        assert_eq!(
            config.rest_root(),
            &RestRoot::Path {
                root: "https://example.com/wp-json/".to_string(),
                query: Vec::new(),
            }
        );
    }

    #[test]
    fn subdirectory_installs_keep_their_path() {
        let config = ClientConfig::builder("https://example.com/blog/").build().unwrap();
        assert_eq!(
            config.rest_root().url("wp/v2/posts", &[]),
            "https://example.com/blog/wp-json/wp/v2/posts"
        );
    }

    #[test]
    fn plain_permalink_root_routes_through_query() {
        let root = RestRoot::parse("https://example.com/?rest_route=/").unwrap();
        assert_eq!(
            root,
            RestRoot::Query {
                site: "https://example.com/".to_string(),
                query: Vec::new(),
            }
        );
        let url = root.url(
            "wp/v2/posts",
            &[("context".to_string(), "edit".to_string())],
        );
        assert_eq!(
            url,
            "https://example.com/?rest_route=%2Fwp%2Fv2%2Fposts&context=edit"
        );
    }

    #[test]
    fn root_query_is_carried_ahead_of_call_arguments() {
        let root = RestRoot::parse("https://example.com/wp-json/?lang=en#top").unwrap();
        assert_eq!(
            root,
            RestRoot::Path {
                root: "https://example.com/wp-json/".to_string(),
                query: vec![("lang".to_string(), "en".to_string())],
            }
        );
        assert_eq!(
            root.url("wp/v2/posts", &[]),
            "https://example.com/wp-json/wp/v2/posts?lang=en"
        );
        assert_eq!(
            root.url("wp/v2/posts/5", &[("context".to_string(), "view".to_string())]),
            "https://example.com/wp-json/wp/v2/posts/5?lang=en&context=view"
        );

        let root = RestRoot::parse("https://example.com/?lang=fr&rest_route=/").unwrap();
        assert_eq!(
            root.url("wp/v2/posts", &[]),
            "https://example.com/?rest_route=%2Fwp%2Fv2%2Fposts&lang=fr"
        );
    }

    #[test]
    fn query_values_are_encoded() {
        let root = RestRoot::parse("https://example.com/wp-json").unwrap();
        let url = root.url(
            "/wp/v2/posts",
            &[("search".to_string(), "fish & chips".to_string())],
        );
        assert_eq!(url, "https://example.com/wp-json/wp/v2/posts?search=fish+%26+chips");
    }

    #[test]
    fn rejects_non_http_urls() {
        let err = ClientConfig::builder("ftp://example.com").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        let err = ClientConfig::builder("not a url").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn application_password_is_basic_auth() {
        let auth = Auth::application_password("admin", "abcd efgh");
        assert_eq!(
            auth.header_value().as_deref(),
            Some("Basic YWRtaW46YWJjZCBlZmdo")
        );
        assert_eq!(Auth::bearer("t0k3n").header_value().as_deref(), Some("Bearer t0k3n"));
        assert_eq!(Auth::None.header_value(), None);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let rendered = format!("{:?}", Auth::application_password("admin", "hunter2"));
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
        assert!(!format!("{:?}", Auth::bearer("secret-token")).contains("secret-token"));
    }

    #[test]
    fn env_lookup_prefers_application_passwords() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("WP_BASE_URL", "https://example.com"),
            ("WP_USERNAME", "editor"),
            ("WP_APPLICATION_PASSWORD", "xxxx yyyy"),
            ("WP_JWT_TOKEN", "ignored"),
        ]);
        let config = ClientConfig::builder_from_lookup(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.auth(), &Auth::application_password("editor", "xxxx yyyy"));
    }

    #[test]
    fn env_lookup_requires_base_url() {
        let err = ClientConfig::builder_from_lookup(|_| None).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }
}
