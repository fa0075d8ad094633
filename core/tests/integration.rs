//! Every endpoint over real HTTP against the mock server.
//!
//! # Design
//! Two mock instances run on random ports: one stands in for the public
//! server, the other for the local admin address. Requests go through the
//! crate's own `UreqTransport`, so this covers request building, the
//! transport, and decoding end to end.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use loklak_core::{ApiError, Endpoint, Loklak, QueryOptions, ServerConfig, UreqTransport};
use mock_server::{Echo, ErrorBody, FormEcho};

/// Start a named mock server on a random port in a background thread.
fn spawn_server(name: &'static str) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_named(listener, name).await
        })
        .unwrap();
    });

    addr
}

fn connect() -> Loklak<UreqTransport> {
    let public = spawn_server("public");
    let local = spawn_server("local");
    let config =
        ServerConfig::with_local_base(&format!("http://{public}"), &format!("http://{local}")).unwrap();
    Loklak::new(config, UreqTransport::new())
}

/// Parse pretty output back into the mock's echo.
fn echo(pretty: &str) -> Echo {
    serde_json::from_str(pretty).unwrap()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn parameterless_endpoints() {
    let api = connect();

    let hello = api.hello().unwrap();
    assert!(hello.contains('\n'), "expected indented output: {hello}");
    let hello = echo(&hello);
    assert_eq!(hello.endpoint, "hello");
    assert_eq!(hello.served_by, "public");
    assert!(hello.raw_query.is_none(), "no query string expected");

    assert_eq!(echo(&api.peers().unwrap()).endpoint, "peers");
    assert_eq!(echo(&api.status().unwrap()).endpoint, "status");
    assert_eq!(echo(&api.apps().unwrap()).endpoint, "apps");
}

#[test]
fn local_admin_endpoints_hit_local_base() {
    let api = connect();

    let settings = echo(&api.settings().unwrap());
    assert_eq!(settings.endpoint, "settings");
    assert_eq!(settings.served_by, "local");

    let opts = QueryOptions {
        screen_name: Some("admin".to_string()),
        ..Default::default()
    };
    let account = echo(&api.account(opts).unwrap());
    assert_eq!(account.served_by, "local");
    assert_eq!(account.params, pairs(&[("screen_name", "admin")]));
}

#[test]
fn search_composite_term_reaches_server() {
    let api = connect();
    let opts = QueryOptions {
        query: Some("climate".to_string()),
        since: Some("2024-01-01".to_string()),
        until: Some("2024-02-01".to_string()),
        from_user: Some("alice".to_string()),
        count: Some("25".to_string()),
        source: Some("cache".to_string()),
        ..Default::default()
    };

    let search = echo(&api.search(opts).unwrap());
    assert_eq!(search.endpoint, "search");
    assert_eq!(
        search.params,
        pairs(&[
            ("q", "climate since:2024-01-01 until:2024-02-01 from:alice"),
            ("count", "25"),
            ("source", "cache"),
        ])
    );
}

#[test]
fn user_and_suggest_params() {
    let api = connect();

    let user = echo(
        &api.user(QueryOptions {
            screen_name: Some("loklak_app".to_string()),
            following: Some("10".to_string()),
            followers: Some("".to_string()),
            ..Default::default()
        })
        .unwrap(),
    );
    assert_eq!(
        user.params,
        pairs(&[("screen_name", "loklak_app"), ("following", "10")])
    );

    let suggest = echo(
        &api.suggest(QueryOptions {
            query: Some("fossasia".to_string()),
            count: Some("5".to_string()),
            order: Some("desc".to_string()),
            order_by: Some("query_count".to_string()),
            until: Some("2024-02-01".to_string()),
            ..Default::default()
        })
        .unwrap(),
    );
    assert_eq!(
        suggest.params,
        pairs(&[
            ("q", "fossasia"),
            ("count", "5"),
            ("order", "desc"),
            ("orderby", "query_count"),
            ("until", "2024-02-01"),
        ])
    );
}

#[test]
fn invoke_by_endpoint_matches_named_methods() {
    let api = connect();
    for endpoint in Endpoint::ALL {
        let out = echo(&api.invoke(endpoint, QueryOptions::default()).unwrap());
        assert_eq!(out.endpoint, endpoint.name());
        assert!(out.params.is_empty(), "{endpoint}");
    }
}

#[test]
fn concurrent_calls_do_not_share_params() {
    let api = Arc::new(connect());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let api = Arc::clone(&api);
            thread::spawn(move || {
                let opts = QueryOptions {
                    query: Some(format!("topic{i}")),
                    count: Some(i.to_string()),
                    ..Default::default()
                };
                (i, echo(&api.search(opts).unwrap()))
            })
        })
        .collect();

    for handle in handles {
        let (i, out) = handle.join().unwrap();
        assert_eq!(
            out.params,
            vec![
                ("q".to_string(), format!("topic{i}")),
                ("count".to_string(), i.to_string()),
            ]
        );
    }
}

#[test]
fn form_calls() {
    let api = connect();

    let echoed: FormEcho = api
        .call("push.json", &[("data", "{\"statuses\":[]}"), ("source", "api")])
        .unwrap();
    assert_eq!(echoed.call, "push.json");
    assert_eq!(echoed.served_by, "public");
    assert_eq!(
        echoed.form,
        pairs(&[("data", "{\"statuses\":[]}"), ("source", "api")])
    );

    // Non-2xx bodies come back untouched.
    let raw = api.call_raw("push", &[("data", "1")]).unwrap();
    let err: ErrorBody = serde_json::from_slice(&raw).unwrap();
    assert!(err.error.contains("push"));
}

#[test]
fn unreachable_server_is_connection_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let api = Loklak::connect(&format!("http://{addr}")).unwrap();
    assert!(matches!(api.hello(), Err(ApiError::Connection(_))));
}
