//! End-to-end exercise of both facades, the way a serving layer drives them.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use serde_json::json;
use std::collections::HashMap;

use http_facade::{Message, RequestFacade, ResponseFacade};

#[test]
fn test_request_facade_end_to_end() {
    let mut facade = RequestFacade::new(common::sample_request());

    // Read everything the serving layer populated.
    assert_eq!(facade.method(), Method::POST);
    assert_eq!(facade.request_target(), "/orders?page=2");
    assert_eq!(facade.query_params()["page"], "2");
    assert_eq!(facade.cookie_params()["session"], "abc123");
    assert_eq!(facade.server_params()["REMOTE_ADDR"], "10.0.0.1");
    assert_eq!(facade.header_line("Content-Type"), "application/json");

    // Middleware-style mutation chain, all on one instance.
    facade
        .set_attribute("route", json!("orders.index"))
        .set_header("X-Request-Id", "req-1")
        .unwrap()
        .set_uri(Uri::try_from("http://backend.internal:8080/orders").unwrap(), false)
        .unwrap();

    assert_eq!(facade.attribute("route"), Some(&json!("orders.index")));
    assert_eq!(facade.header_line("Host"), "backend.internal:8080");

    // Handoff keeps every mutation.
    let request = facade.into_inner();
    assert_eq!(request.uri().host(), Some("backend.internal"));
    assert_eq!(request.headers()["X-Request-Id"], "req-1");
}

#[tokio::test]
async fn test_response_facade_end_to_end() {
    let mut facade = ResponseFacade::new(200, HeaderMap::new(), "Hello").unwrap();
    facade
        .set_status(201, None)
        .unwrap()
        .set_headers([("Content-Type", "text/plain"), ("X-Request-Id", "req-1")])
        .unwrap();

    let response = facade.into_inner();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["Content-Type"], "text/plain");

    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(body.as_ref(), b"Hello");
}

#[tokio::test]
async fn test_json_response_handoff() {
    let mut facade = ResponseFacade::default();
    facade
        .json(&json!({"items": [1, 2, 3], "total": 3}))
        .unwrap();

    let response = facade.into_inner();
    assert_eq!(response.headers()["Content-Type"], "application/json");

    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    let decoded: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(decoded["total"], json!(3));
    assert_eq!(decoded["items"], json!([1, 2, 3]));
}

#[tokio::test]
async fn test_request_body_replacement() {
    let mut facade = RequestFacade::new(common::sample_request());
    facade.set_body(Body::from(r#"{"sku":"x-1"}"#));
    facade.set_parsed_body(json!({"sku": "x-1"}));

    assert_eq!(facade.parsed_body(), Some(&json!({"sku": "x-1"})));

    let body = to_bytes(facade.into_inner().into_body(), 1024).await.unwrap();
    assert_eq!(body.as_ref(), br#"{"sku":"x-1"}"#);
}

#[test]
fn test_error_propagation_matches_underlying_types() {
    let mut facade = ResponseFacade::default();

    let err = facade.set_status(1000, None).unwrap_err();
    assert!(matches!(err, http_facade::MessageError::InvalidStatusCode(_)));

    let err = facade.set_header("bad header", "v").unwrap_err();
    assert!(matches!(err, http_facade::MessageError::InvalidHeaderName(_)));

    let err = facade.set_protocol_version("9.9").unwrap_err();
    assert!(matches!(
        err,
        http_facade::MessageError::UnsupportedProtocolVersion(_)
    ));

    // Failed mutations leave the held response untouched.
    assert_eq!(facade.status(), StatusCode::OK);
    assert!(facade.headers().is_empty());
}

#[test]
fn test_query_override_survives_handoff_round_trip() {
    let mut facade = RequestFacade::new(common::sample_request());
    facade.set_query_params(HashMap::from([("only".to_string(), "this".to_string())]));

    // Re-wrapping the inner request sees the same override.
    let rewrapped = RequestFacade::new(facade.into_inner());
    assert_eq!(rewrapped.query_params()["only"], "this");
    assert_eq!(rewrapped.query_params().len(), 1);
}
