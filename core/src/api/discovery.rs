//! REST API discovery.
//!
//! WordPress advertises its REST root on every front-end response with a
//! header such as
//!
//! ```text
//! Link: <https://example.com/wp-json/>; rel="https://api.w.org/"
//! ```
//!
//! Sites without pretty permalinks advertise `?rest_route=/` instead, which
//! [`RestRoot::parse`](crate::config::RestRoot::parse) understands.

use log::debug;

use crate::client::WpClient;
use crate::config::{ClientConfig, ClientConfigBuilder};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Link relation WordPress uses for its REST root.
pub const API_LINK_REL: &str = "https://api.w.org/";

pub fn build_discovery_request(site_url: &str) -> HttpRequest {
    HttpRequest::new(HttpMethod::Head, site_url).with_header("accept", "text/html")
}

/// Extract the REST root from the response to a discovery request.
pub fn parse_discovery(response: &HttpResponse) -> Result<String> {
    if response.status == 404 {
        return Err(ApiError::EndpointNotFound(
            "site returned HTTP 404 for the discovery request".to_string(),
        ));
    }
    if !response.is_success() {
        return Err(ApiError::RouteDiscovery(format!(
            "site returned HTTP {} for the discovery request",
            response.status
        )));
    }
    response
        .header_values("link")
        .flat_map(parse_link_header)
        .find(|link| link.has_rel(API_LINK_REL))
        .map(|link| link.target)
        .ok_or_else(|| {
            ApiError::RouteDiscovery(format!(
                "no Link header with rel=\"{API_LINK_REL}\" in the response"
            ))
        })
}

/// HEAD `site_url` through `transport` and return the advertised REST root.
pub fn discover(transport: &dyn Transport, site_url: &str) -> Result<String> {
    let request = build_discovery_request(site_url);
    debug!("discovering REST root of {site_url}");
    let root = parse_discovery(&transport.send(request)?)?;
    debug!("REST root of {site_url} is {root}");
    Ok(root)
}

impl ClientConfigBuilder {
    /// Build, then replace the REST root with the one the site advertises.
    pub fn discover(self) -> Result<ClientConfig> {
        let config = self.build()?;
        let root = discover(config.transport(), config.site_url())?;
        config.with_rest_root(&root)
    }
}

impl WpClient {
    pub fn build_discovery_request(&self) -> HttpRequest {
        build_discovery_request(self.config().site_url())
            .with_header("user-agent", self.config().user_agent())
    }

    /// The REST root advertised by the configured site.
    pub fn discover_rest_root(&self) -> Result<String> {
        parse_discovery(&self.execute(self.build_discovery_request())?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Link {
    target: String,
    rels: Vec<String>,
}

impl Link {
    fn has_rel(&self, rel: &str) -> bool {
        self.rels.iter().any(|r| r == rel)
    }
}

/// Parse one `Link` header value; several links may share a header,
/// separated by commas.
fn parse_link_header(value: &str) -> Vec<Link> {
    let mut links = Vec::new();
    let mut rest = value;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else { break };
        let target = after[..close].trim().to_string();
        let params_and_more = &after[close + 1..];
        let end = params_and_more.find('<').unwrap_or(params_and_more.len());
        let params = &params_and_more[..end];
        let mut rels = Vec::new();
        for param in params.split([';', ',']) {
            let Some((name, value)) = param.split_once('=') else { continue };
            if name.trim().eq_ignore_ascii_case("rel") {
                rels.extend(
                    value
                        .trim()
                        .trim_matches('"')
                        .split_ascii_whitespace()
                        .map(str::to_string),
                );
            }
        }
        links.push(Link { target, rels });
        rest = &params_and_more[end..];
    }
    links
}
