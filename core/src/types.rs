//! Caller-facing option types for the Loklak API.
//!
//! # Design
//! A single flat `QueryOptions` serves every endpoint. Each endpoint reads
//! only the fields its catalog entry lists, so there is no per-endpoint
//! struct. Values are passed through as strings; the server validates them.

use serde::{Deserialize, Serialize};

/// Optional search and filter parameters shared by every endpoint.
///
/// `None` and `Some("")` both mean "leave this parameter out".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub name: Option<String>,
    pub followers: Option<String>,
    pub following: Option<String>,
    pub query: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub source: Option<String>,
    pub count: Option<String>,
    pub fields: Option<String>,
    pub from_user: Option<String>,
    pub limit: Option<String>,
    pub screen_name: Option<String>,
    pub order: Option<String>,
    pub order_by: Option<String>,
}

/// Names one field of `QueryOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Followers,
    Following,
    Query,
    Since,
    Until,
    Source,
    Count,
    Fields,
    FromUser,
    Limit,
    ScreenName,
    Order,
    OrderBy,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of `field`, or `None` when it is unset or empty.
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Name => &self.name,
            Field::Followers => &self.followers,
            Field::Following => &self.following,
            Field::Query => &self.query,
            Field::Since => &self.since,
            Field::Until => &self.until,
            Field::Source => &self.source,
            Field::Count => &self.count,
            Field::Fields => &self.fields,
            Field::FromUser => &self.from_user,
            Field::Limit => &self.limit,
            Field::ScreenName => &self.screen_name,
            Field::Order => &self.order,
            Field::OrderBy => &self.order_by,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Set `field` to `value`. An empty value clears the field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value: String = value.into();
        let value = Some(value).filter(|v| !v.is_empty());
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Followers => &mut self.followers,
            Field::Following => &mut self.following,
            Field::Query => &mut self.query,
            Field::Since => &mut self.since,
            Field::Until => &mut self.until,
            Field::Source => &mut self.source,
            Field::Count => &mut self.count,
            Field::Fields => &mut self.fields,
            Field::FromUser => &mut self.from_user,
            Field::Limit => &mut self.limit,
            Field::ScreenName => &mut self.screen_name,
            Field::Order => &mut self.order,
            Field::OrderBy => &mut self.order_by,
        };
        *slot = value;
    }

    /// Builder-style `set`.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

impl Field {
    /// Parse the snake_case field name used in test vectors and the C binding.
    pub fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "name" => Field::Name,
            "followers" => Field::Followers,
            "following" => Field::Following,
            "query" => Field::Query,
            "since" => Field::Since,
            "until" => Field::Until,
            "source" => Field::Source,
            "count" => Field::Count,
            "fields" => Field::Fields,
            "from_user" => Field::FromUser,
            "limit" => Field::Limit,
            "screen_name" => Field::ScreenName,
            "order" => Field::Order,
            "order_by" => Field::OrderBy,
            _ => return None,
        };
        Some(field)
    }
}
