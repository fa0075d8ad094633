//! Static catalog of Loklak API routes.
//!
//! Each `Endpoint` maps to one `EndpointSpec`: method, path relative to the
//! base URL, which `QueryOptions` fields become which query parameters, and
//! whether the route is served only on the local admin address.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::http::HttpMethod;
use crate::types::Field;

/// One query parameter an endpoint may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// `key` carries the value of `field` verbatim.
    Field { key: &'static str, field: Field },
    /// `q` carries the composite search term built from query, since, until and from_user.
    SearchTerm,
}

/// Catalog metadata for a single route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub params: &'static [Param],
    /// Resolved against `ServerConfig::local_base` instead of the server base.
    pub local_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Hello,
    Peers,
    Status,
    Apps,
    Settings,
    Search,
    User,
    Account,
    Suggest,
}

const fn get(name: &'static str, path: &'static str, params: &'static [Param]) -> EndpointSpec {
    EndpointSpec {
        name,
        method: HttpMethod::Get,
        path,
        params,
        local_only: false,
    }
}

const fn local(name: &'static str, path: &'static str, params: &'static [Param]) -> EndpointSpec {
    EndpointSpec {
        name,
        method: HttpMethod::Get,
        path,
        params,
        local_only: true,
    }
}

const SEARCH_PARAMS: &[Param] = &[
    Param::SearchTerm,
    Param::Field { key: "count", field: Field::Count },
    Param::Field { key: "source", field: Field::Source },
];

const USER_PARAMS: &[Param] = &[
    Param::Field { key: "screen_name", field: Field::ScreenName },
    Param::Field { key: "following", field: Field::Following },
    Param::Field { key: "followers", field: Field::Followers },
];

const ACCOUNT_PARAMS: &[Param] = &[Param::Field { key: "screen_name", field: Field::ScreenName }];

const SUGGEST_PARAMS: &[Param] = &[
    Param::Field { key: "q", field: Field::Query },
    Param::Field { key: "count", field: Field::Count },
    Param::Field { key: "source", field: Field::Source },
    Param::Field { key: "order", field: Field::Order },
    Param::Field { key: "orderby", field: Field::OrderBy },
    Param::Field { key: "since", field: Field::Since },
    Param::Field { key: "until", field: Field::Until },
];

static HELLO: EndpointSpec = get("hello", "api/hello.json", &[]);
static PEERS: EndpointSpec = get("peers", "api/peers.json", &[]);
static STATUS: EndpointSpec = get("status", "api/status.json", &[]);
static APPS: EndpointSpec = get("apps", "api/apps.json", &[]);
static SETTINGS: EndpointSpec = local("settings", "api/settings.json", &[]);
static SEARCH: EndpointSpec = get("search", "api/search.json", SEARCH_PARAMS);
static USER: EndpointSpec = get("user", "api/user.json", USER_PARAMS);
static ACCOUNT: EndpointSpec = local("account", "api/account.json", ACCOUNT_PARAMS);
static SUGGEST: EndpointSpec = get("suggest", "api/suggest.json", SUGGEST_PARAMS);

impl Endpoint {
    pub const ALL: [Endpoint; 9] = [
        Endpoint::Hello,
        Endpoint::Peers,
        Endpoint::Status,
        Endpoint::Apps,
        Endpoint::Settings,
        Endpoint::Search,
        Endpoint::User,
        Endpoint::Account,
        Endpoint::Suggest,
    ];

    pub fn spec(self) -> &'static EndpointSpec {
        match self {
            Endpoint::Hello => &HELLO,
            Endpoint::Peers => &PEERS,
            Endpoint::Status => &STATUS,
            Endpoint::Apps => &APPS,
            Endpoint::Settings => &SETTINGS,
            Endpoint::Search => &SEARCH,
            Endpoint::User => &USER,
            Endpoint::Account => &ACCOUNT,
            Endpoint::Suggest => &SUGGEST,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no catalogued endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown endpoint: {0}")]
pub struct UnknownEndpoint(pub String);

impl FromStr for Endpoint {
    type Err = UnknownEndpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| UnknownEndpoint(s.to_string()))
    }
}
