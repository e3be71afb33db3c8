use sp_api_protocol::{DecodeError, UpstreamFailure};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures of the "authorize a request" capability.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("selling partner credentials are not configured")]
    NotConfigured,

    #[error("access token exchange failed: {0}")]
    Exchange(#[source] reqwest::Error),

    #[error("access token exchange rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("access token is not a valid header value")]
    InvalidToken,
}

/// Failures that happen before or while talking to the upstream, without a usable response.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid endpoint {0}")]
    InvalidEndpoint(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Everything that can end one tool call without a result. `Display` is the caller-facing text.
#[derive(Error, Debug)]
pub enum CallFailure {
    #[error("{0}")]
    NotReady(String),

    #[error("{tool} request failed: {source}")]
    Request {
        tool: String,
        #[source]
        source: ClientError,
    },

    #[error(transparent)]
    Upstream(#[from] UpstreamFailure),

    #[error("{tool} response payload is empty")]
    EmptyPayload { tool: String },

    #[error("failed to decode {tool} response: {source}")]
    Decode {
        tool: String,
        #[source]
        source: DecodeError,
    },
}

impl CallFailure {
    pub fn request(tool: &str, source: impl Into<ClientError>) -> Self {
        Self::Request {
            tool: tool.to_string(),
            source: source.into(),
        }
    }

    pub fn decode(tool: &str, source: DecodeError) -> Self {
        Self::Decode {
            tool: tool.to_string(),
            source,
        }
    }

    pub fn empty_payload(tool: &str) -> Self {
        Self::EmptyPayload {
            tool: tool.to_string(),
        }
    }

    /// Stable machine-readable category.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotReady(_) => "not_ready",
            Self::Request { .. } => "transport",
            Self::Upstream(_) => "upstream",
            Self::EmptyPayload { .. } => "empty_payload",
            Self::Decode { .. } => "decode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_tool_name() {
        let empty = CallFailure::empty_payload("orders.listOrders");
        assert_eq!(empty.to_string(), "orders.listOrders response payload is empty");
        assert_eq!(empty.code(), "empty_payload");

        let decode = CallFailure::decode("reports.getReport", DecodeError::EmptyBody);
        assert_eq!(
            decode.to_string(),
            "failed to decode reports.getReport response: response body is empty"
        );

        let request = CallFailure::request("sales.getOrderMetrics", AuthError::NotConfigured);
        assert_eq!(
            request.to_string(),
            "sales.getOrderMetrics request failed: selling partner credentials are not configured"
        );
    }
}
