//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! The client never owns a global HTTP agent. Callers hand it a `Transport`,
//! which is where timeouts, proxies or test doubles live. A transport only
//! fails when the exchange itself fails; any status code the server sends is
//! returned as data.

use std::sync::Arc;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// One blocking request/response round-trip.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use std::time::{Duration, Instant};

    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    use super::Transport;

    /// Blocking transport backed by a `ureq` agent.
    ///
    /// The agent is configured so 4xx/5xx responses come back as data rather
    /// than `Err`. Response bodies are read in full, whatever their size.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::build(None)
        }

        /// Fail any exchange that takes longer than `timeout` end to end.
        pub fn with_timeout(timeout: Duration) -> Self {
            Self::build(Some(timeout))
        }

        fn build(timeout: Option<Duration>) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            tracing::debug!(
                method = request.method.as_str(),
                url = %request.url,
                has_body = request.body.is_some(),
                "loklak.transport.send"
            );
            let t0 = Instant::now();

            let sent = match request.method {
                HttpMethod::Get => {
                    let mut rb = self.agent.get(&request.url);
                    for (k, v) in &request.headers {
                        rb = rb.header(k.as_str(), v.as_str());
                    }
                    rb.call()
                }
                HttpMethod::Post => {
                    let mut rb = self.agent.post(&request.url);
                    for (k, v) in &request.headers {
                        rb = rb.header(k.as_str(), v.as_str());
                    }
                    match request.body.as_deref() {
                        Some(body) => rb.send(body.as_bytes()),
                        None => rb.send_empty(),
                    }
                }
            };

            let mut response = sent.map_err(|e| {
                tracing::warn!(url = %request.url, error = %e, "loklak.transport.send_error");
                ApiError::Connection(e.to_string())
            })?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
                .collect();
            // ureq caps bodies at 10 MiB unless told otherwise.
            let body = response
                .body_mut()
                .with_config()
                .limit(u64::MAX)
                .read_to_vec()
                .map_err(|e| {
                    tracing::warn!(url = %request.url, error = %e, "loklak.transport.body_error");
                    ApiError::Connection(e.to_string())
                })?;

            tracing::debug!(
                status,
                body_len = body.len(),
                duration_ms = t0.elapsed().as_millis() as u64,
                "loklak.transport.recv"
            );
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
