//! Integration tests for the HTTP transport
//!
//! These tests run the transport against a local mock server instead of a
//! real Esper tenant.

use mockito::{Matcher, Server};
use rstest::rstest;
use serde_json::json;

use esper_transport::{ErrorBody, Transport, TransportConfig, TransportError};

fn transport_for(server: &Server) -> Transport {
    Transport::new(TransportConfig::new(server.url(), "ent-42", "test-token"))
}

#[test]
fn test_get_attaches_auth_and_tenant_headers() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/enterprise/ent-42/device/")
        .match_header("authorization", "Bearer test-token")
        .match_header("content-type", "application/json")
        .match_header("x-caller-id", "Esper-sdk")
        .match_header("x-tenant-id", "ent-42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"count":0,"results":[]}"#)
        .create();

    let response = transport_for(&server)
        .get("/api/enterprise/ent-42/device/", &[])
        .expect("request should succeed");

    mock.assert();
    assert_eq!(response.status(), 200);
    assert_eq!(response.get("count"), Some(&json!(0)));
}

#[test]
fn test_get_encodes_query_parameters() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/enterprise/ent-42/device/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "Front Desk #1".into()),
            Matcher::UrlEncoded("state".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body("{}")
        .create();

    transport_for(&server)
        .get(
            "/api/enterprise/ent-42/device/",
            &[("name", "Front Desk #1"), ("state", "1")],
        )
        .expect("request should succeed");

    mock.assert();
}

#[test]
fn test_post_serializes_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/v0/enterprise/ent-42/command/")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::Json(json!({"command": "REBOOT", "devices": ["d1"]})))
        .with_status(201)
        .with_body(r#"{"id":"cmd-1","state":"Command Initiated"}"#)
        .create();

    let response = transport_for(&server)
        .post(
            "/api/v0/enterprise/ent-42/command/",
            &json!({"command": "REBOOT", "devices": ["d1"]}),
        )
        .expect("request should succeed");

    mock.assert();
    assert_eq!(response.status(), 201);
    assert_eq!(response.get("id"), Some(&json!("cmd-1")));
}

#[test]
fn test_server_error_with_json_body() {
    let mut server = Server::new();
    server
        .mock("POST", "/command/")
        .with_status(500)
        .with_body(r#"{"error":"boom"}"#)
        .create();

    let err = transport_for(&server)
        .post("/command/", &json!({}))
        .expect_err("500 must not be a success");

    match err {
        TransportError::Api { status, ref body } => {
            assert_eq!(status, 500);
            assert_eq!(body.message(), Some("boom".to_string()));
        }
        other => panic!("Expected TransportError::Api, got {:?}", other),
    }
}

#[rstest]
#[case(400, "Bad Request")]
#[case(404, "<html>Not Found</html>")]
#[case(502, "upstream unavailable")]
fn test_error_status_with_raw_body(#[case] status: usize, #[case] body: &str) {
    let mut server = Server::new();
    server
        .mock("GET", "/device/")
        .with_status(status)
        .with_body(body)
        .create();

    let err = transport_for(&server).get("/device/", &[]).unwrap_err();

    assert_eq!(err.status(), Some(status as u16));
    match err {
        TransportError::Api { body: ErrorBody::Raw(text), .. } => assert_eq!(text, body),
        other => panic!("Expected raw API error body, got {:?}", other),
    }
}

#[test]
fn test_unreadable_error_body_is_reported() {
    let mut server = Server::new();
    server
        .mock("GET", "/device/")
        .with_status(502)
        .with_body([0xff, 0xfe, 0xfd])
        .create();

    let err = transport_for(&server).get("/device/", &[]).unwrap_err();

    assert_eq!(err.status(), Some(502));
    match err {
        TransportError::Api { body: ErrorBody::Raw(text), .. } => {
            assert!(text.starts_with("failed to read response body"), "got {:?}", text)
        }
        other => panic!("Expected raw API error body, got {:?}", other),
    }
}

#[test]
fn test_malformed_success_body_is_decode_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/device/")
        .with_status(200)
        .with_body("{\"results\": [")
        .create();

    let err = transport_for(&server).get("/device/", &[]).unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)), "got {:?}", err);
}

#[test]
fn test_empty_success_body_is_empty_mapping() {
    let mut server = Server::new();
    server.mock("POST", "/command/").with_status(204).create();

    let response = transport_for(&server).post("/command/", &json!({})).unwrap();
    assert_eq!(response.status(), 204);
    assert!(response.data().is_empty());
}

#[test]
fn test_unreachable_host_is_network_error() {
    // Port 1 is reserved and refuses connections on loopback.
    let transport = Transport::new(TransportConfig::new("http://127.0.0.1:1", "e", "t"));

    let err = transport.get("/device/", &[]).unwrap_err();
    assert!(matches!(err, TransportError::Network(_)), "got {:?}", err);
}

#[test]
fn test_invalid_base_url_is_request_error() {
    let transport = Transport::new(TransportConfig::new("not a url", "e", "t"));

    let err = transport.get("/device/", &[]).unwrap_err();
    assert!(matches!(err, TransportError::Request(_)), "got {:?}", err);
}
