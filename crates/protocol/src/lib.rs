//! Wire-level building blocks shared by every Selling Partner API tool.
//!
//! - [`Envelope`] decodes the uniform `payload` / `errors` / pagination wrapper.
//! - [`classify`] turns an HTTP status plus structured errors into one failure.
//! - [`walk_pages`] follows continuation tokens until a result set is exhausted.
//! - [`DecimalString`] keeps monetary amounts exact whether they arrive as numbers or strings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod amount;
pub mod classify;
pub mod envelope;
pub mod pagination;

pub use amount::{DecimalString, ExactJson, Money};
pub use classify::{classify, RawResponse, UpstreamFailure, BODY_SNIPPET_LIMIT};
pub use envelope::{render_errors, DecodeError, Envelope, UpstreamError};
pub use pagination::{continuation, walk_pages, Page};

/// Structured body attached to every declared tool error.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        if !hint.trim().is_empty() {
            self.hint = Some(hint);
        }
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
