//! In-process stand-in for a Loklak server, used by the client's tests.
//!
//! Every catalogued GET route answers with an `Echo` describing what it
//! received, and `POST /api/<call>.json` echoes the decoded form. Each
//! instance carries a name so tests running two servers (public and local
//! admin) can tell which one answered.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Route stems served under `/api/<stem>.json`.
pub const ENDPOINTS: &[&str] = &[
    "hello", "peers", "status", "apps", "settings", "search", "user", "account", "suggest",
];

/// Body returned by every GET route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub served_by: String,
    pub endpoint: String,
    pub raw_query: Option<String>,
    pub params: Vec<(String, String)>,
}

/// Body returned by form calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEcho {
    pub served_by: String,
    pub call: String,
    pub form: Vec<(String, String)>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Clone)]
struct ServerState {
    name: Arc<str>,
}

pub fn app() -> Router {
    app_named("loklak")
}

/// A router whose responses report `name` in `served_by`.
pub fn app_named(name: &str) -> Router {
    let state = ServerState { name: Arc::from(name) };
    Router::new()
        .route("/api/{route}", get(api_get).post(api_call))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_named(listener: TcpListener, name: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_named(name)).await
}

fn not_found(route: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: format!("no such route: {route}"),
        }),
    )
        .into_response()
}

async fn api_get(
    State(state): State<ServerState>,
    Path(route): Path<String>,
    RawQuery(raw_query): RawQuery,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let Some(endpoint) = route
        .strip_suffix(".json")
        .filter(|stem| ENDPOINTS.contains(stem))
    else {
        tracing::info!(%route, "mock.get.not_found");
        return not_found(&route);
    };
    tracing::info!(served_by = %state.name, endpoint, params = params.len(), "mock.get");
    Json(Echo {
        served_by: state.name.to_string(),
        endpoint: endpoint.to_string(),
        raw_query,
        params,
    })
    .into_response()
}

async fn api_call(
    State(state): State<ServerState>,
    Path(route): Path<String>,
    Form(form): Form<Vec<(String, String)>>,
) -> Response {
    if !route.ends_with(".json") {
        tracing::info!(%route, "mock.call.not_found");
        return not_found(&route);
    }
    tracing::info!(served_by = %state.name, call = %route, fields = form.len(), "mock.call");
    Json(FormEcho {
        served_by: state.name.to_string(),
        call: route,
        form,
    })
    .into_response()
}
