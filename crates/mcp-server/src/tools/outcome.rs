use serde::Serialize;
use sp_api_client::CallFailure;
use thiserror::Error;

/// Why a tool call ended without a result. `Display` is the declared error text.
#[derive(Error, Debug)]
pub(crate) enum ToolFailure {
    /// Rejected arguments; the upstream was never contacted.
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Call(#[from] CallFailure),
}

impl ToolFailure {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "invalid_request",
            Self::Call(failure) => failure.code(),
        }
    }
}

impl From<String> for ToolFailure {
    fn from(message: String) -> Self {
        Self::Invalid(message)
    }
}

/// A projected tool result: serialized as structured content, rendered as one summary line.
pub(crate) trait Summarize: Serialize {
    fn summary(&self) -> String;
}

/// Append `, more available via nextToken` when a continuation token is present.
pub(crate) fn with_more(mut summary: String, next_token: Option<&str>) -> String {
    if next_token.is_some_and(|token| !token.is_empty()) {
        summary.push_str(", more available via nextToken");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn more_marker_only_for_real_tokens() {
        assert_eq!(with_more("Retrieved 2 orders".into(), None), "Retrieved 2 orders");
        assert_eq!(with_more("Retrieved 2 orders".into(), Some("")), "Retrieved 2 orders");
        assert_eq!(
            with_more("Retrieved 2 orders".into(), Some("tok")),
            "Retrieved 2 orders, more available via nextToken"
        );
    }

    #[test]
    fn validation_messages_are_invalid_requests() {
        let failure = ToolFailure::from("amazonOrderId is required".to_string());
        assert_eq!(failure.code(), "invalid_request");
        assert_eq!(failure.to_string(), "amazonOrderId is required");
    }
}
