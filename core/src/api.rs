//! One method per Loklak endpoint, each returning pretty-printed JSON.
//!
//! `Loklak` pairs a `LoklakClient` with a `Transport` and runs
//! build → execute → parse for the caller. It holds no mutable state, so a
//! single value can be shared across threads when its transport allows it.

use serde::de::DeserializeOwned;

use crate::client::LoklakClient;
use crate::config::ServerConfig;
use crate::decode::{self, ApiResponse};
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::QueryOptions;

#[derive(Debug, Clone)]
pub struct Loklak<T> {
    client: LoklakClient,
    transport: T,
}

impl<T: Transport> Loklak<T> {
    pub fn new(config: ServerConfig, transport: T) -> Self {
        Self {
            client: LoklakClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &LoklakClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run `endpoint` and return the decoded response.
    pub fn fetch(&self, endpoint: Endpoint, options: QueryOptions) -> Result<ApiResponse, ApiError> {
        let request = self.client.build_request(endpoint, &options)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_response(response)
    }

    /// Run `endpoint` and return its body as indented JSON text.
    pub fn invoke(&self, endpoint: Endpoint, options: QueryOptions) -> Result<String, ApiError> {
        self.fetch(endpoint, options)?.pretty()
    }

    pub fn hello(&self) -> Result<String, ApiError> {
        self.invoke(Endpoint::Hello, QueryOptions::default())
    }

    pub fn peers(&self) -> Result<String, ApiError> {
        self.invoke(Endpoint::Peers, QueryOptions::default())
    }

    pub fn status(&self) -> Result<String, ApiError> {
        self.invoke(Endpoint::Status, QueryOptions::default())
    }

    pub fn apps(&self) -> Result<String, ApiError> {
        self.invoke(Endpoint::Apps, QueryOptions::default())
    }

    /// Served only on the local admin base.
    pub fn settings(&self) -> Result<String, ApiError> {
        self.invoke(Endpoint::Settings, QueryOptions::default())
    }

    /// Reads query, since, until, from_user, count and source.
    pub fn search(&self, options: QueryOptions) -> Result<String, ApiError> {
        self.invoke(Endpoint::Search, options)
    }

    /// Reads screen_name, following and followers.
    pub fn user(&self, options: QueryOptions) -> Result<String, ApiError> {
        self.invoke(Endpoint::User, options)
    }

    /// Served only on the local admin base. Reads screen_name.
    pub fn account(&self, options: QueryOptions) -> Result<String, ApiError> {
        self.invoke(Endpoint::Account, options)
    }

    /// Reads query, count, source, order, order_by, since and until.
    pub fn suggest(&self, options: QueryOptions) -> Result<String, ApiError> {
        self.invoke(Endpoint::Suggest, options)
    }

    /// POST `form` to `api/<call>` and return the undecoded body.
    pub fn call_raw<K, V>(&self, call: &str, form: &[(K, V)]) -> Result<Vec<u8>, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let request = self.client.build_call(call, form)?;
        Ok(self.transport.execute(&request)?.body)
    }

    /// POST `form` to `api/<call>` and decode the body into `R`.
    pub fn call<R, K, V>(&self, call: &str, form: &[(K, V)]) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = self.call_raw(call, form)?;
        decode::decode_as(&body)
    }
}

#[cfg(feature = "ureq")]
impl Loklak<crate::transport::UreqTransport> {
    /// A client for `base_url` over a default `UreqTransport`.
    pub fn connect(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::new(
            ServerConfig::new(base_url)?,
            crate::transport::UreqTransport::new(),
        ))
    }
}
