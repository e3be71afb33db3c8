use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::{Client, Request};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::error::{AuthError, ClientError};

pub const DEFAULT_ENDPOINT: &str = "https://sellingpartnerapi-na.amazon.com";
pub const DEFAULT_LWA_ENDPOINT: &str = "https://api.amazon.com/auth/o2/token";
pub const ACCESS_TOKEN_HEADER: &str = "x-amz-access-token";

/// Refresh this long before the access token actually expires.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);
const TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientStatus {
    pub ready: bool,
    pub message: String,
}

impl ClientStatus {
    pub fn ready() -> Self {
        Self {
            ready: true,
            message: "ready".to_string(),
        }
    }

    pub fn not_ready(message: impl Into<String>) -> Self {
        Self {
            ready: false,
            message: message.into(),
        }
    }
}

/// The upstream capability every tool talks through.
///
/// Implementations must be safe to share between concurrent tool calls.
#[async_trait]
pub trait SellingPartner: Send + Sync {
    /// Attach authorization to an outgoing request.
    async fn authorize(&self, request: &mut Request) -> Result<(), AuthError>;

    /// Base URL of the regional endpoint (no trailing slash).
    fn endpoint(&self) -> &str;

    fn status(&self) -> ClientStatus;
}

/// Login With Amazon refresh-token credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Stand-in used when no credentials are configured: never ready, refuses to authorize.
pub struct UnconfiguredClient {
    endpoint: String,
}

impl UnconfiguredClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint.into()),
        }
    }
}

#[async_trait]
impl SellingPartner for UnconfiguredClient {
    async fn authorize(&self, _request: &mut Request) -> Result<(), AuthError> {
        Err(AuthError::NotConfigured)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn status(&self) -> ClientStatus {
        ClientStatus::not_ready(AuthError::NotConfigured.to_string())
    }
}

struct AccessToken {
    value: String,
    refresh_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Authorizes requests with an LWA access token obtained from a refresh token.
///
/// The token is cached and shared; concurrent callers wait on one exchange instead of racing.
pub struct LwaClient {
    endpoint: String,
    token_url: String,
    credentials: Credentials,
    http: Client,
    cached: Mutex<Option<AccessToken>>,
}

impl LwaClient {
    pub fn new(
        endpoint: impl Into<String>,
        token_url: impl Into<String>,
        credentials: Credentials,
    ) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(TOKEN_TIMEOUT).build()?;
        Ok(Self {
            endpoint: normalize_endpoint(endpoint.into()),
            token_url: token_url.into(),
            credentials,
            http,
            cached: Mutex::new(None),
        })
    }

    async fn access_token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        log::debug!("exchanging LWA refresh token at {}", self.token_url);
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.credentials.refresh_token.as_str()),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(AuthError::Exchange)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                detail: body.trim().to_string(),
            });
        }

        let token: TokenResponse = response.json().await.map_err(AuthError::Exchange)?;
        let lifetime = token
            .expires_in
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME);
        let value = token.access_token;
        *cached = Some(AccessToken {
            value: value.clone(),
            refresh_at: Instant::now() + lifetime.saturating_sub(REFRESH_MARGIN),
        });
        Ok(value)
    }
}

#[async_trait]
impl SellingPartner for LwaClient {
    async fn authorize(&self, request: &mut Request) -> Result<(), AuthError> {
        let token = self.access_token().await?;
        let value = HeaderValue::from_str(&token).map_err(|_| AuthError::InvalidToken)?;
        request.headers_mut().insert(ACCESS_TOKEN_HEADER, value);
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn status(&self) -> ClientStatus {
        ClientStatus::ready()
    }
}

/// Pick the capability matching the configured credentials.
pub fn connect(
    endpoint: &str,
    token_url: &str,
    credentials: Option<Credentials>,
) -> Result<Arc<dyn SellingPartner>, ClientError> {
    match credentials {
        Some(credentials) => Ok(Arc::new(LwaClient::new(endpoint, token_url, credentials)?)),
        None => Ok(Arc::new(UnconfiguredClient::new(endpoint))),
    }
}

fn normalize_endpoint(endpoint: String) -> String {
    endpoint.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials {
            client_id: "amzn1.application-oa2-client.test".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "Atzr|refresh".to_string(),
        }
    }

    fn outgoing_request() -> Request {
        Client::new()
            .get("https://sellingpartnerapi-na.amazon.com/orders/v0/orders")
            .build()
            .expect("request")
    }

    #[tokio::test]
    async fn unconfigured_client_is_never_ready() {
        let client = UnconfiguredClient::new("https://example.test/");
        let status = client.status();
        assert!(!status.ready);
        assert_eq!(status.message, "selling partner credentials are not configured");
        assert_eq!(client.endpoint(), "https://example.test");

        let mut request = outgoing_request();
        assert!(matches!(
            client.authorize(&mut request).await,
            Err(AuthError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn lwa_client_exchanges_once_and_reuses_the_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/o2/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"access_token": "Atza|access", "token_type": "bearer", "expires_in": 3600}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = LwaClient::new(
            "https://sellingpartnerapi-na.amazon.com",
            format!("{}/auth/o2/token", server.uri()),
            credentials(),
        )
        .expect("client");
        assert!(client.status().ready);

        for _ in 0..2 {
            let mut request = outgoing_request();
            client.authorize(&mut request).await.expect("authorize");
            assert_eq!(
                request
                    .headers()
                    .get(ACCESS_TOKEN_HEADER)
                    .and_then(|v| v.to_str().ok()),
                Some("Atza|access")
            );
        }
    }

    #[tokio::test]
    async fn lwa_rejection_is_reported_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error": "invalid_grant"}"#),
            )
            .mount(&server)
            .await;

        let client = LwaClient::new(DEFAULT_ENDPOINT, server.uri(), credentials()).expect("client");
        let mut request = outgoing_request();
        let err = client.authorize(&mut request).await.expect_err("rejected");
        assert_eq!(
            err.to_string(),
            r#"access token exchange rejected with status 400: {"error": "invalid_grant"}"#
        );
    }

    #[test]
    fn credentials_debug_hides_secrets() {
        let rendered = format!("{:?}", credentials());
        assert!(!rendered.contains("Atzr|refresh"));
        assert!(!rendered.contains("\"secret\""));
    }
}
