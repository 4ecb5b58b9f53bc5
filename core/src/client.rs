//! The WordPress REST client.
//!
//! # Design
//! `WpClient` holds an immutable [`ClientConfig`] and a [`ResponseHandler`]
//! and nothing else, so it can be shared across threads and every call is
//! independent. Each operation is split the same way: a `build_*` method
//! produces the `HttpRequest` as plain data, and the executing method sends
//! it through the configured transport and the validating pipeline. The
//! builders are public so a host that performs its own I/O can use them
//! directly together with [`ResponseHandler`].
//!
//! Route groups live in `crate::api`, one module per resource.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::context::Resource;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::pipeline::{decode_validated, ResponseHandler};
use crate::query::Query;
use crate::schema::Schema;

/// One page of a collection plus the totals WordPress reports in headers.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `X-WP-Total`.
    pub total: Option<u64>,
    /// `X-WP-TotalPages`.
    pub total_pages: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct WpClient {
    config: ClientConfig,
    handler: ResponseHandler,
}

impl WpClient {
    pub fn new(config: ClientConfig) -> Self {
        let handler = ResponseHandler::new(config.diagnostics());
        Self { config, handler }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn handler(&self) -> &ResponseHandler {
        &self.handler
    }

    /// Request for `route` relative to the REST root, with auth and default
    /// headers applied.
    pub fn build_request(&self, method: HttpMethod, route: &str, query: &Query) -> HttpRequest {
        let url = self.config.rest_root().url(route, query.pairs());
        let mut request = HttpRequest::new(method, url)
            .with_header("accept", "application/json")
            .with_header("user-agent", self.config.user_agent());
        if let Some(value) = self.config.auth().header_value() {
            request.set_header("authorization", value);
        }
        request
    }

    pub(crate) fn build_json_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        route: &str,
        query: &Query,
        body: &B,
    ) -> Result<HttpRequest> {
        self.build_request(method, route, query).with_json(body)
    }

    /// Send `request` through the configured transport without interpreting
    /// the response.
    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!("{} {}", request.method, request.url);
        let response = self.config.transport().send(request)?;
        debug!("-> HTTP {}", response.status);
        Ok(response)
    }

    /// Execute `request` and decode the body as the resource `T`.
    pub fn fetch<T: Resource>(&self, request: HttpRequest) -> Result<T> {
        self.handler.fetch(|| self.execute(request))
    }

    /// Execute `request` and decode a body matching `schema` as `T`.
    pub fn fetch_as<T: DeserializeOwned>(&self, schema: &Schema, request: HttpRequest) -> Result<T> {
        self.handler.fetch_as(schema, || self.execute(request))
    }

    /// Execute a collection request and decode one page of `T`.
    pub fn fetch_page<T: Resource>(&self, request: HttpRequest) -> Result<Page<T>> {
        let response = self.execute(request)?;
        let schema = Schema::array(T::schema());
        let items = self
            .handler
            .handle(&response, |body| decode_validated(&schema, body))?;
        Ok(Page {
            items,
            total: header_number(&response, "x-wp-total"),
            total_pages: header_number(&response, "x-wp-totalpages"),
        })
    }
}

fn header_number(response: &HttpResponse, name: &str) -> Option<u64> {
    response.header(name).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Auth;
    use crate::error::ApiError;
    use crate::types::posts::PostEmbed;

    fn client_with<F>(transport: F) -> WpClient
    where
        F: Fn(HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
    {
        let config = ClientConfig::builder("http://wp.test")
            .auth(Auth::bearer("tok"))
            .user_agent("tests")
            .transport(transport)
            .build()
            .unwrap();
        WpClient::new(config)
    }

    #[test]
    fn build_request_applies_default_headers() {
        let client = client_with(|_| Err(ApiError::Transport("unused".to_string())));
        let req = client.build_request(HttpMethod::Get, "wp/v2/posts", &Query::new());
        assert_eq!(req.url, "http://wp.test/wp-json/wp/v2/posts");
        assert_eq!(req.header("Accept"), Some("application/json"));
        assert_eq!(req.header("User-Agent"), Some("tests"));
        assert_eq!(req.header("Authorization"), Some("Bearer tok"));
        assert!(req.body.is_none());
    }

    #[test]
    fn fetch_page_reads_total_headers() {
        let client = client_with(|_| {
            Ok(HttpResponse::new(
                200,
                r#"[{"id":1,"date":"2024-01-01T00:00:00","slug":"a","type":"post","link":"http://wp.test/a","title":{"rendered":"A"},"author":1,"excerpt":{"rendered":"","protected":false},"featured_media":0}]"#,
            )
            .with_header("X-WP-Total", "41")
            .with_header("X-WP-TotalPages", "5"))
        });
        let req = client.build_request(HttpMethod::Get, "wp/v2/posts", &Query::new());
        let page: Page<PostEmbed> = client.fetch_page(req).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].slug, "a");
        assert_eq!(page.total, Some(41));
        assert_eq!(page.total_pages, Some(5));
    }

    #[test]
    fn transport_errors_reach_the_caller() {
        let client = client_with(|_| Err(ApiError::Transport("connection refused".to_string())));
        let req = client.build_request(HttpMethod::Get, "wp/v2/posts/1", &Query::new());
        let err = client.fetch::<PostEmbed>(req).unwrap_err();
        assert_eq!(err, ApiError::Transport("connection refused".to_string()));
    }
}
