//! Verify request building and decoding against JSON vectors in `test-vectors/`.
//!
//! Each request case names an endpoint and its options and lists the exact
//! URL and decoded parameters expected. Decode cases compare parsed JSON
//! values, not raw strings, so indentation details do not matter.

use loklak_core::{
    pretty_print, ApiError, Endpoint, HttpMethod, LoklakClient, QueryOptions,
};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = LoklakClient::from_base_url(vectors["base_url"].as_str().unwrap()).unwrap();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let endpoint: Endpoint = case["endpoint"].as_str().unwrap().parse().unwrap();
        let options: QueryOptions = serde_json::from_value(case["options"].clone()).unwrap();
        let expected = &case["expected_request"];

        let req = client.build_request(endpoint, &options).unwrap();
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert!(req.body.is_none(), "{name}: body");

        let expected_params: Vec<(String, String)> = expected["params"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| {
                let arr = p.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.query_pairs(), expected_params, "{name}: params");
        assert!(
            req.query_pairs().iter().all(|(_, v)| !v.is_empty()),
            "{name}: empty-valued param sent"
        );
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[test]
fn decode_test_vectors() {
    let raw = include_str!("../../test-vectors/decode.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let body = case["body"].as_str().unwrap();
        let result = pretty_print(body.as_bytes());

        match case.get("error").and_then(|e| e.as_str()) {
            Some("decode") => {
                assert!(matches!(result, Err(ApiError::Decode(_))), "{name}: expected decode error");
            }
            Some(other) => panic!("{name}: unknown error kind {other}"),
            None => {
                let pretty = result.unwrap();
                let reparsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
                assert_eq!(reparsed, case["expected"], "{name}: value");
            }
        }
    }
}
