//! Server addressing for the client.
//!
//! # Design
//! Loklak serves its admin routes (settings, account) only on the local
//! address, so a config carries two bases: the public server and the local
//! admin base. The local base defaults to `http://localhost:9000/` and is
//! only overridden when the admin port differs, as in tests against a mock.

use url::Url;

use crate::error::ApiError;

pub const DEFAULT_LOCAL_BASE: &str = "http://localhost:9000/";

/// Immutable base URLs used to resolve endpoint paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    base: Url,
    local_base: Url,
}

impl ServerConfig {
    /// Parse `base` as the server URL. Fails with `ApiError::Config` if it is
    /// not an absolute http(s) URL.
    pub fn new(base: &str) -> Result<Self, ApiError> {
        Self::with_local_base(base, DEFAULT_LOCAL_BASE)
    }

    pub fn with_local_base(base: &str, local_base: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base: parse_base(base)?,
            local_base: parse_base(local_base)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn local_base(&self) -> &Url {
        &self.local_base
    }

    /// Resolve a relative path such as `api/hello.json` against the server
    /// base, or against the local base when `local_only` is set.
    pub fn resolve(&self, path: &str, local_only: bool) -> Result<Url, ApiError> {
        let base = if local_only { &self.local_base } else { &self.base };
        Ok(base.join(path)?)
    }
}

/// Parse and normalise a base URL so it always ends with `/`; `Url::join`
/// would otherwise replace the last path segment.
fn parse_base(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!("not an http(s) base URL: {raw}")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
