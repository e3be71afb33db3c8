use super::super::*;
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::Request;
use rmcp::model::RawContent;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sp_api_client::{AuthError, ClientStatus, SellingPartner, UnconfiguredClient};
use std::sync::Arc;
use wiremock::MockServer;

/// Ready capability that sends every request to the mock server with a fixed token.
struct MockSeller {
    endpoint: String,
}

#[async_trait]
impl SellingPartner for MockSeller {
    async fn authorize(&self, request: &mut Request) -> Result<(), AuthError> {
        request
            .headers_mut()
            .insert("x-amz-access-token", HeaderValue::from_static("Atza|test"));
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn status(&self) -> ClientStatus {
        ClientStatus::ready()
    }
}

fn identity() -> ServerIdentity {
    ServerIdentity::new("Selling Partner MCP Server", "0.1.0")
}

pub(super) fn service(server: &MockServer) -> SellingPartnerService {
    let engine = Engine::new(Arc::new(MockSeller {
        endpoint: server.uri(),
    }))
    .expect("engine");
    SellingPartnerService::new(engine, identity())
}

pub(super) fn unconfigured_service() -> SellingPartnerService {
    let engine = Engine::new(Arc::new(UnconfiguredClient::new(
        "https://sellingpartnerapi-na.amazon.com",
    )))
    .expect("engine");
    SellingPartnerService::new(engine, identity())
}

pub(super) fn request<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("tool arguments")
}

pub(super) fn text(result: &CallToolResult) -> &str {
    match result.content.first().map(|content| &content.raw) {
        Some(RawContent::Text(text)) => text.text.as_str(),
        _ => panic!("expected text content"),
    }
}

pub(super) fn structured(result: &CallToolResult) -> &Value {
    result
        .structured_content
        .as_ref()
        .expect("structured content")
}

pub(super) fn error_code(result: &CallToolResult) -> Option<&str> {
    structured(result)["error"]["code"].as_str()
}

/// Query string of the n-th request the mock server received.
pub(super) async fn received_query(server: &MockServer, n: usize) -> Vec<(String, String)> {
    let requests = server.received_requests().await.expect("recording enabled");
    requests[n]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
