//! Renders `QueryOptions` into request parameters for a catalogued endpoint.

use url::form_urlencoded;

use crate::endpoint::{Endpoint, Param};
use crate::types::{Field, QueryOptions};

/// Build the `q` value for the search endpoint.
///
/// Returns `None` when `query` is empty. Modifiers are appended in the fixed
/// order since, until, from.
pub fn composite_search_term(options: &QueryOptions) -> Option<String> {
    let mut term = options.get(Field::Query)?.to_string();
    if let Some(since) = options.get(Field::Since) {
        term.push_str(" since:");
        term.push_str(since);
    }
    if let Some(until) = options.get(Field::Until) {
        term.push_str(" until:");
        term.push_str(until);
    }
    if let Some(from) = options.get(Field::FromUser) {
        term.push_str(" from:");
        term.push_str(from);
    }
    tracing::debug!(term = %term, "loklak.query.search_term");
    Some(term)
}

/// Parameters `endpoint` sends for `options`, in catalog order.
///
/// Empty fields never appear in the result.
pub fn build_params(endpoint: Endpoint, options: &QueryOptions) -> Vec<(&'static str, String)> {
    endpoint
        .spec()
        .params
        .iter()
        .filter_map(|param| match *param {
            Param::SearchTerm => composite_search_term(options).map(|term| ("q", term)),
            Param::Field { key, field } => options.get(field).map(|v| (key, v.to_string())),
        })
        .collect()
}

/// `application/x-www-form-urlencoded` serialization of `pairs`.
pub fn encode_pairs<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish()
}
