//! End-to-end tests of the client facade against a local mock server

use std::time::Duration;

use mockito::{Matcher, Server};
use rstest::rstest;
use serde_json::json;

use esper_sdk::{ApiError, ConfigError, DeviceFilters, EsperClient, SdkError};

const ENTERPRISE_ID: &str = "ent-42";
const TOKEN: &str = "test-token";

fn client_for(server: &Server) -> EsperClient {
    EsperClient::builder()
        .base_url(server.url())
        .enterprise_id(ENTERPRISE_ID)
        .token(TOKEN)
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build")
}

#[test]
fn test_facade_routes_commands_and_devices_through_one_transport() {
    let mut server = Server::new();
    let command = server
        .mock("POST", "/api/v0/enterprise/ent-42/command/")
        .match_header("authorization", "Bearer test-token")
        .match_header("x-caller-id", "Esper-sdk")
        .match_header("x-tenant-id", ENTERPRISE_ID)
        .match_body(Matcher::Json(json!({
            "command_type": "DEVICE",
            "devices": ["dev-1"],
            "command": "LOCK",
            "schedule": "IMMEDIATE"
        })))
        .with_status(201)
        .with_body(r#"{"id": "cmd-1", "state": "Command Initiated"}"#)
        .create();
    let list = server
        .mock("GET", "/api/enterprise/ent-42/device/")
        .match_header("authorization", "Bearer test-token")
        .match_query(Matcher::UrlEncoded("name".into(), "Lobby".into()))
        .with_status(200)
        .with_body(r#"{"count": 1, "results": [{"id": "dev-1"}]}"#)
        .create();

    let client = client_for(&server);

    let response = client.commands().lock(["dev-1"]).unwrap();
    assert_eq!(response.get("id"), Some(&json!("cmd-1")));

    let response = client.device().list(&DeviceFilters::new().name("Lobby")).unwrap();
    assert_eq!(response.get("count"), Some(&json!(1)));

    command.assert();
    list.assert();
}

#[test]
fn test_custom_caller_id_is_sent() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/enterprise/ent-42/device/dev-1/")
        .match_header("x-caller-id", "fleet-dashboard")
        .with_status(200)
        .with_body(r#"{"id": "dev-1"}"#)
        .create();

    let client = EsperClient::builder()
        .base_url(server.url())
        .enterprise_id(ENTERPRISE_ID)
        .token(TOKEN)
        .caller_id("fleet-dashboard")
        .build()
        .unwrap();

    client.device().get("dev-1").unwrap();
    mock.assert();
}

#[test]
fn test_api_errors_convert_into_sdk_errors() {
    let mut server = Server::new();
    server
        .mock("POST", "/api/v0/enterprise/ent-42/command/")
        .with_status(403)
        .with_body(r#"{"detail": "You do not have permission to perform this action."}"#)
        .create();

    let client = client_for(&server);
    let err: SdkError = client.commands().wipe(["dev-1"]).unwrap_err().into();

    assert_eq!(err.status(), Some(403));
    match err {
        SdkError::Api(api) => assert_eq!(
            api.api_message().as_deref(),
            Some("You do not have permission to perform this action.")
        ),
        other => panic!("Expected an API error, got {:?}", other),
    }
}

#[rstest]
#[case::no_enterprise(EsperClient::builder().tenant("acme").token(TOKEN), "enterprise_id")]
#[case::no_token(EsperClient::builder().tenant("acme").enterprise_id(ENTERPRISE_ID), "token")]
#[case::blank_token(EsperClient::builder().tenant("acme").enterprise_id(ENTERPRISE_ID).token(" "), "token")]
#[case::no_location(EsperClient::builder().enterprise_id(ENTERPRISE_ID).token(TOKEN), "tenant or base_url")]
fn test_incomplete_builder_is_rejected(
    #[case] builder: esper_sdk::EsperClientBuilder,
    #[case] missing: &str,
) {
    match builder.build() {
        Err(SdkError::Config(ConfigError::Missing(field))) => assert_eq!(field, missing),
        other => panic!("Expected a missing-field error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_validation_errors_surface_before_dispatch() {
    let mut server = Server::new();
    let guard = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create();

    let client = client_for(&server);
    let err = client.commands().set_brightness(["dev-1"], 0).unwrap_err();

    assert!(matches!(err, ApiError::InvalidParameter(_)));
    guard.assert();
}
