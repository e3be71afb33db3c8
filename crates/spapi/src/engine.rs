use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use sp_api_protocol::{classify, Envelope, RawResponse};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::client::SellingPartner;
use crate::error::{CallFailure, ClientError};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const REQUEST_ID_HEADER: &str = "X-Amzn-Requestid";
const NOT_READY_FALLBACK: &str = "Selling Partner API client is not ready";

/// One upstream call, described declaratively: the tool it belongs to, method, path and parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub tool: &'static str,
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Operation {
    pub fn get<I, S>(tool: &'static str, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tool,
            method: Method::GET,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post<I, S>(tool: &'static str, segments: I, body: serde_json::Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::get(tool, segments)
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn param_opt(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Lists travel comma separated; an empty list adds nothing.
    pub fn param_list(self, key: &str, values: &[String]) -> Self {
        if values.is_empty() {
            self
        } else {
            self.param(key, values.join(","))
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn url(&self, endpoint: &str) -> Result<Url, ClientError> {
        let mut url = Url::parse(endpoint)
            .map_err(|err| ClientError::InvalidEndpoint(format!("{endpoint}: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidEndpoint(endpoint.to_string()))?
            .pop_if_empty()
            .extend(self.segments.iter());
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}

/// A decoded, classified, non-empty payload plus the continuation token of its envelope.
#[derive(Debug)]
pub struct Fetched<P> {
    pub payload: P,
    pub next_token: Option<String>,
}

/// Executes operations against the upstream and runs every response through decode and classify.
#[derive(Clone)]
pub struct Engine {
    client: Arc<dyn SellingPartner>,
    http: Client,
}

impl Engine {
    pub fn new(client: Arc<dyn SellingPartner>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, http })
    }

    pub fn client(&self) -> &dyn SellingPartner {
        self.client.as_ref()
    }

    /// Readiness precondition checked before any argument is looked at.
    pub fn ensure_ready(&self) -> Result<(), CallFailure> {
        let status = self.client.status();
        if status.ready {
            return Ok(());
        }
        let message = status.message.trim();
        Err(CallFailure::NotReady(if message.is_empty() {
            NOT_READY_FALLBACK.to_string()
        } else {
            message.to_string()
        }))
    }

    /// Send the request and return its envelope once it has been classified as a success.
    pub async fn execute(&self, op: &Operation) -> Result<Envelope, CallFailure> {
        let tool = op.tool;
        let url = op
            .url(self.client.endpoint())
            .map_err(|err| CallFailure::request(tool, err))?;

        let request_id = Uuid::new_v4().to_string();
        let mut builder = self
            .http
            .request(op.method.clone(), url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(REQUEST_ID_HEADER, request_id.as_str());
        if let Some(body) = op.body.as_ref() {
            builder = builder.json(body);
        }
        let mut request = builder
            .build()
            .map_err(|err| CallFailure::request(tool, err))?;
        self.client
            .authorize(&mut request)
            .await
            .map_err(|err| CallFailure::request(tool, err))?;

        log::debug!(
            "[{tool}] {} {} (request id {request_id})",
            request.method(),
            request.url().path()
        );

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|err| CallFailure::request(tool, err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| CallFailure::request(tool, err))?;

        let raw = RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default(),
            body: &body,
        };

        match Envelope::decode(&body) {
            Ok(envelope) => {
                classify(tool, Some(&raw), &envelope.errors)?;
                Ok(envelope)
            }
            Err(err) => {
                // An undecodable error response is still described by its status first.
                classify(tool, Some(&raw), &[])?;
                Err(CallFailure::decode(tool, err))
            }
        }
    }

    /// [`Engine::execute`], then require and decode the payload as `P`.
    pub async fn fetch<P: DeserializeOwned>(
        &self,
        op: &Operation,
    ) -> Result<Fetched<P>, CallFailure> {
        let envelope = self.execute(op).await?;
        let payload = envelope
            .payload::<P>()
            .map_err(|err| CallFailure::decode(op.tool, err))?
            .ok_or_else(|| CallFailure::empty_payload(op.tool))?;
        Ok(Fetched {
            payload,
            next_token: envelope.next_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientStatus, UnconfiguredClient};
    use crate::error::AuthError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use reqwest::Request;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct StaticToken {
        endpoint: String,
    }

    #[async_trait]
    impl SellingPartner for StaticToken {
        async fn authorize(&self, request: &mut Request) -> Result<(), AuthError> {
            request
                .headers_mut()
                .insert("x-amz-access-token", HeaderValue::from_static("test-token"));
            Ok(())
        }

        fn endpoint(&self) -> &str {
            &self.endpoint
        }

        fn status(&self) -> ClientStatus {
            ClientStatus::ready()
        }
    }

    fn engine(server: &MockServer) -> Engine {
        Engine::new(Arc::new(StaticToken {
            endpoint: server.uri(),
        }))
        .expect("engine")
    }

    #[test]
    fn url_encodes_segments_and_lists() {
        let op = Operation::get("orders.getOrderItems", ["orders", "v0", "orders", "111-2/3"])
            .param_list("MarketplaceIds", &["A".to_string(), "B".to_string()])
            .param_opt("NextToken", None::<String>);
        let url = op.url("https://sellingpartnerapi-na.amazon.com/").expect("url");
        assert_eq!(
            url.as_str(),
            "https://sellingpartnerapi-na.amazon.com/orders/v0/orders/111-2%2F3?MarketplaceIds=A%2CB"
        );
    }

    #[test]
    fn not_ready_uses_capability_message() {
        let engine = Engine::new(Arc::new(UnconfiguredClient::new("https://x.test"))).expect("engine");
        let err = engine.ensure_ready().expect_err("not ready");
        assert_eq!(err.to_string(), "selling partner credentials are not configured");
        assert_eq!(err.code(), "not_ready");
    }

    #[tokio::test]
    async fn sends_correlation_and_accept_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sales/v1/orderMetrics"))
            .and(query_param("granularity", "Day"))
            .and(header("accept", "application/json"))
            .and(header("x-amz-access-token", "test-token"))
            .and(header_exists("x-amzn-requestid"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"payload": []})))
            .expect(1)
            .mount(&server)
            .await;

        let op = Operation::get("sales.getOrderMetrics", ["sales", "v1", "orderMetrics"])
            .param("granularity", "Day");
        let fetched: Fetched<Vec<Value>> = engine(&server).fetch(&op).await.expect("fetch");
        assert!(fetched.payload.is_empty());
        assert_eq!(fetched.next_token, None);
    }

    #[tokio::test]
    async fn structured_errors_fail_a_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payload": {"Orders": []},
                "errors": [{"code": "InvalidInput", "message": "Invalid MarketplaceId"}]
            })))
            .mount(&server)
            .await;

        let op = Operation::get("orders.listOrders", ["orders", "v0", "orders"]);
        let err = engine(&server).execute(&op).await.expect_err("errors");
        assert_eq!(err.code(), "upstream");
        assert_eq!(
            err.to_string(),
            "orders.listOrders: Invalid MarketplaceId (InvalidInput)"
        );
    }

    #[tokio::test]
    async fn undecodable_error_body_is_classified_by_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let op = Operation::get("reports.getReport", ["reports", "2020-09-04", "reports", "1"]);
        let err = engine(&server).execute(&op).await.expect_err("502");
        assert_eq!(
            err.to_string(),
            "reports.getReport: request failed with status 502 Bad Gateway: <html>bad gateway</html>"
        );
    }

    #[tokio::test]
    async fn undecodable_success_body_is_a_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let op = Operation::get("reports.getReport", ["reports", "2020-09-04", "reports", "1"]);
        let err = engine(&server).execute(&op).await.expect_err("empty");
        assert_eq!(
            err.to_string(),
            "failed to decode reports.getReport response: response body is empty"
        );
    }

    #[tokio::test]
    async fn missing_payload_is_reported_as_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let op = Operation::get("orders.getOrder", ["orders", "v0", "orders", "1"]);
        let err = engine(&server)
            .fetch::<Value>(&op)
            .await
            .expect_err("empty payload");
        assert_eq!(err.to_string(), "orders.getOrder response payload is empty");
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reports/2020-09-04/reports"))
            .and(wiremock::matchers::body_json(json!({"reportType": "GET_X"})))
            .respond_with(
                ResponseTemplate::new(202).set_body_json(json!({"payload": {"reportId": "42"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let op = Operation::post(
            "reports.createReport",
            ["reports", "2020-09-04", "reports"],
            json!({"reportType": "GET_X"}),
        );
        let fetched: Fetched<Value> = engine(&server).fetch(&op).await.expect("created");
        assert_eq!(fetched.payload, json!({"reportId": "42"}));
    }

    #[tokio::test]
    async fn transport_failure_names_the_tool() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let endpoint = format!("http://{}", listener.local_addr().expect("addr"));
        drop(listener);

        let engine = Engine::new(Arc::new(StaticToken { endpoint })).expect("engine");
        let op = Operation::get("orders.getOrder", ["orders", "v0", "orders", "1"]);
        let err = engine.execute(&op).await.expect_err("connection refused");
        assert_eq!(err.code(), "transport");
        assert!(err.to_string().starts_with("orders.getOrder request failed: "));
    }
}
