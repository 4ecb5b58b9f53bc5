//! Pluggable request execution.
//!
//! # Design
//! The client never opens sockets itself. It hands each `HttpRequest` to a
//! [`Transport`] held by its configuration and gets an `HttpResponse` back.
//! Non-2xx statuses are returned as data; only failures that prevent a
//! response altogether map to `ApiError::Transport`.
//!
//! Any `Fn(HttpRequest) -> Result<HttpResponse>` closure is a transport,
//! which is how tests replace the network.

use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse> + Send + Sync,
{
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self(request)
    }
}

/// Transport that refuses every request. Used when no real transport is
/// compiled in and none was configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTransport;

impl Transport for NoTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        Err(ApiError::Transport(format!(
            "no transport configured for {} {}",
            request.method, request.url
        )))
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::{UreqTransport, DEFAULT_BODY_LIMIT};

#[cfg(feature = "ureq")]
mod blocking {
    use std::time::Duration;

    use crate::error::{ApiError, Result};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    use super::Transport;

    /// Largest response body [`UreqTransport`] reads by default: 64 MiB.
    pub const DEFAULT_BODY_LIMIT: u64 = 64 * 1024 * 1024;

    /// Blocking transport backed by `ureq`.
    ///
    /// Status codes are never turned into errors, so the response pipeline
    /// sees every 4xx/5xx body. Bodies are read as bytes and decoded lossily,
    /// so text in a legacy charset still reaches the pipeline. A body longer
    /// than the configured limit (see [`UreqTransport::body_limit`]) fails
    /// with `ApiError::Transport`.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
        body_limit: u64,
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::build(None)
        }

        /// Abort any request that takes longer than `timeout` end to end.
        pub fn with_timeout(timeout: Duration) -> Self {
            Self::build(Some(timeout))
        }

        fn build(timeout: Option<Duration>) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build()
                .new_agent();
            Self {
                agent,
                body_limit: DEFAULT_BODY_LIMIT,
            }
        }

        /// Refuse response bodies longer than `bytes`.
        pub fn body_limit(mut self, bytes: u64) -> Self {
            self.body_limit = bytes;
            self
        }
    }

    impl Transport for UreqTransport {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            let HttpRequest {
                method,
                url,
                headers,
                body,
            } = request;

            let result = match method {
                HttpMethod::Get | HttpMethod::Head | HttpMethod::Delete => {
                    let mut builder = match method {
                        HttpMethod::Get => self.agent.get(&url),
                        HttpMethod::Head => self.agent.head(&url),
                        _ => self.agent.delete(&url),
                    };
                    for (name, value) in &headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    builder.call()
                }
                HttpMethod::Post | HttpMethod::Put => {
                    let mut builder = match method {
                        HttpMethod::Post => self.agent.post(&url),
                        _ => self.agent.put(&url),
                    };
                    for (name, value) in &headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    match body {
                        Some(bytes) => builder.send(&bytes[..]),
                        None => builder.send_empty(),
                    }
                }
            };

            let mut response =
                result.map_err(|e| ApiError::Transport(format!("{method} {url}: {e}")))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = if method == HttpMethod::Head {
                Vec::new()
            } else {
                response
                    .body_mut()
                    .with_config()
                    .limit(self.body_limit)
                    .read_to_vec()
                    .map_err(|e| ApiError::Transport(format!("{method} {url}: {e}")))?
            };

            let mut response = HttpResponse::from_bytes(status, &body);
            response.headers = headers;
            Ok(response)
        }
    }
}
