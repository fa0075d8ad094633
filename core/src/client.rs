//! Stateless HTTP request builder and response parser for the Loklak API.
//!
//! # Design
//! `LoklakClient` holds only a `ServerConfig` and carries no mutable state
//! between calls. Every endpoint goes through the same two steps:
//! `build_request` turns an `Endpoint` plus `QueryOptions` into an
//! `HttpRequest`, and `parse_response` turns the `HttpResponse` into an
//! `ApiResponse`. Whoever sits in between performs the round-trip, which
//! keeps this layer deterministic and free of I/O.

use crate::config::ServerConfig;
use crate::decode::{self, ApiResponse};
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, FORM_CONTENT_TYPE};
use crate::query;
use crate::types::QueryOptions;

/// Synchronous, stateless client for the Loklak API.
#[derive(Debug, Clone)]
pub struct LoklakClient {
    config: ServerConfig,
}

impl LoklakClient {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Shorthand for `LoklakClient::new(ServerConfig::new(base_url)?)`.
    pub fn from_base_url(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::new(ServerConfig::new(base_url)?))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the request for `endpoint`. Parameters left empty in `options`
    /// are omitted; with none left the URL carries no query string.
    pub fn build_request(
        &self,
        endpoint: Endpoint,
        options: &QueryOptions,
    ) -> Result<HttpRequest, ApiError> {
        let spec = endpoint.spec();
        let mut url = self.config.resolve(spec.path, spec.local_only)?;
        let params = query::build_params(endpoint, options);
        if !params.is_empty() {
            url.set_query(Some(&query::encode_pairs(&params)));
        }

        tracing::debug!(
            endpoint = spec.name,
            method = spec.method.as_str(),
            url = %url,
            params = params.len(),
            local_only = spec.local_only,
            "loklak.request.build"
        );
        Ok(HttpRequest {
            method: spec.method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        })
    }

    /// Build a form POST to `api/<call>` carrying `form` as its body.
    ///
    /// `call` must stay beneath `api/`: names that are empty, contain `?` or
    /// `#`, or have a `.`/`..` path segment are `ApiError::Config`.
    pub fn build_call<K, V>(&self, call: &str, form: &[(K, V)]) -> Result<HttpRequest, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let call = call.trim_start_matches('/');
        check_call_name(call)?;
        let url = self.config.resolve(&format!("api/{call}"), false)?;

        tracing::debug!(call, url = %url, fields = form.len(), "loklak.request.build_call");
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: url.into(),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body: Some(query::encode_pairs(form)),
        })
    }

    /// Decode a response body as JSON. The status code is recorded but not
    /// interpreted; a non-2xx body that is valid JSON still decodes.
    pub fn parse_response(&self, response: HttpResponse) -> Result<ApiResponse, ApiError> {
        if !response.is_success() {
            tracing::warn!(
                status = response.status,
                body_snippet = %decode::snip_body(&response.body),
                "loklak.response.non_success"
            );
        }
        decode::decode_with_status(Some(response.status), response.body)
    }
}

fn check_call_name(call: &str) -> Result<(), ApiError> {
    if call.is_empty() {
        return Err(ApiError::Config("empty API call name".to_string()));
    }
    if call.contains(['?', '#', '\\']) {
        return Err(ApiError::Config(format!("invalid API call name: {call}")));
    }
    // URL joining treats `%2e` like `.`.
    let dot_segment = call.split('/').any(|segment| {
        let segment = segment.to_ascii_lowercase().replace("%2e", ".");
        segment == "." || segment == ".."
    });
    if dot_segment {
        return Err(ApiError::Config(format!("invalid API call name: {call}")));
    }
    Ok(())
}
