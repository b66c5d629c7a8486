//! Test helpers for mock-server integration tests

#![allow(dead_code)]

use std::sync::Arc;

use mockito::{Matcher, Mock, Server};
use serde_json::Value;

use esper_api::{Commands, Device, Endpoint, Transport, TransportConfig};

pub const ENTERPRISE_ID: &str = "ent-42";
pub const TOKEN: &str = "test-token";
pub const DEVICE_ID: &str = "d774ae8c-7466-42df-a472-6f04b39b8907";

/// Body the mock command endpoint answers with
pub const COMMAND_ACCEPTED: &str = r#"{"id":"3f1e8a2c","state":"Command Initiated"}"#;

pub fn transport_for(server: &Server) -> Arc<Transport> {
    Arc::new(Transport::new(TransportConfig::new(server.url(), ENTERPRISE_ID, TOKEN)))
}

pub fn commands_for(server: &Server) -> Commands {
    Commands::new(transport_for(server))
}

pub fn devices_for(server: &Server) -> Device {
    Device::new(transport_for(server))
}

/// A client whose requests can never reach a server
///
/// Anything that gets dispatched fails with a network error, so a validation
/// error from this client proves the call stopped before the network.
pub fn offline_commands() -> Commands {
    Commands::new(Arc::new(Transport::new(TransportConfig::new(
        "http://127.0.0.1:1",
        ENTERPRISE_ID,
        TOKEN,
    ))))
}

pub fn command_path() -> String {
    Endpoint::Commands.path(ENTERPRISE_ID)
}

/// Expect exactly one command POST whose JSON body equals `expected`
pub fn mock_command(server: &mut Server, expected: Value) -> Mock {
    server
        .mock("POST", command_path().as_str())
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .match_header("content-type", "application/json")
        .match_header("x-tenant-id", ENTERPRISE_ID)
        .match_body(Matcher::Json(expected))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(COMMAND_ACCEPTED)
        .create()
}

/// Fail the test if any request at all reaches the server
pub fn mock_no_requests(server: &mut Server) -> Vec<Mock> {
    ["GET", "POST"]
        .into_iter()
        .map(|method| server.mock(method, Matcher::Any).expect(0).create())
        .collect()
}
