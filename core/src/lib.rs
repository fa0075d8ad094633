//! Synchronous client for the Loklak social-media aggregation API.
//!
//! # Overview
//! One call per server endpoint (hello, peers, status, apps, settings,
//! search, user, account, suggest). Each call renders `QueryOptions` into
//! query parameters, performs a GET, and returns the JSON body
//! pretty-printed.
//!
//! # Design
//! - `LoklakClient` is stateless. It builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network (host-does-IO).
//! - `Loklak<T: Transport>` wires a client to a transport and exposes one
//!   method per endpoint. Enable the default `ureq` feature for a blocking
//!   transport.
//! - Routes live in a static catalog (`Endpoint::spec`), including which
//!   ones are served only on the local admin address.
//! - Errors are returned, never acted on: nothing here logs-and-exits.

pub mod api;
pub mod client;
pub mod config;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;
pub mod types;

pub use api::Loklak;
pub use client::LoklakClient;
pub use config::{ServerConfig, DEFAULT_LOCAL_BASE};
pub use decode::{decode, pretty_print, ApiResponse};
pub use endpoint::{Endpoint, EndpointSpec, Param};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{build_params, composite_search_term};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{Field, QueryOptions};
