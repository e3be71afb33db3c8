use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use thiserror::Error;

use crate::pagination::continuation;

pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("response body is empty")]
    EmptyBody,

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Structured error reported by the upstream API next to (or instead of) a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpstreamError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl UpstreamError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// `<message> (<code>): <details>`, dropping the parts that are blank.
    pub fn render(&self) -> String {
        let mut out = self.message.trim().to_string();
        let code = self.code.trim();
        if !code.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push('(');
            out.push_str(code);
            out.push(')');
        }
        if let Some(details) = self.details.as_deref().map(str::trim) {
            if !details.is_empty() {
                out.push_str(": ");
                out.push_str(details);
            }
        }
        out
    }
}

pub fn render_errors(errors: &[UpstreamError]) -> String {
    errors
        .iter()
        .map(UpstreamError::render)
        .filter(|rendered| !rendered.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Deserialize)]
struct WirePagination {
    #[serde(default, rename = "nextToken")]
    next_token: Option<String>,
}

#[derive(Deserialize)]
struct WireEnvelope {
    #[serde(default)]
    payload: Option<Box<RawValue>>,
    #[serde(default)]
    errors: Option<Vec<UpstreamError>>,
    #[serde(default)]
    pagination: Option<WirePagination>,
    #[serde(default, rename = "nextToken")]
    next_token: Option<String>,
    #[serde(default, rename = "NextToken")]
    next_token_pascal: Option<String>,
}

/// The uniform `payload` / `errors` / pagination wrapper of an upstream response.
///
/// The payload is kept as raw JSON until a caller asks for it with a concrete type, so one decoder
/// serves every resource family.
#[derive(Debug, Default)]
pub struct Envelope {
    payload: Option<Box<RawValue>>,
    pub errors: Vec<UpstreamError>,
    pub next_token: Option<String>,
}

impl Envelope {
    pub fn decode(body: &[u8]) -> Result<Self> {
        let trimmed = body.trim_ascii();
        if trimmed.is_empty() {
            return Err(DecodeError::EmptyBody);
        }

        let wire: WireEnvelope = serde_json::from_slice(trimmed)?;
        let next_token = wire
            .pagination
            .and_then(|pagination| continuation(pagination.next_token))
            .or_else(|| continuation(wire.next_token))
            .or_else(|| continuation(wire.next_token_pascal));

        Ok(Self {
            payload: wire.payload,
            errors: wire.errors.unwrap_or_default(),
            next_token,
        })
    }

    pub fn payload_present(&self) -> bool {
        self.payload.is_some()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Decode the payload into the resource-specific shape. `Ok(None)` when it was absent.
    pub fn payload<P: DeserializeOwned>(&self) -> Result<Option<P>> {
        self.payload
            .as_deref()
            .map(|raw| serde_json::from_str::<P>(raw.get()))
            .transpose()
            .map_err(DecodeError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Money;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_errors_with_optional_parts() {
        let errors = vec![
            UpstreamError {
                code: "InvalidInput".to_string(),
                message: "Invalid request".to_string(),
                details: Some("Start date is after end date".to_string()),
            },
            UpstreamError::new("Unauthorized", "Access denied"),
        ];
        assert_eq!(
            render_errors(&errors),
            "Invalid request (InvalidInput): Start date is after end date; Access denied (Unauthorized)"
        );
    }

    #[test]
    fn empty_body_is_a_decode_failure() {
        let err = Envelope::decode(b"  \n ").expect_err("empty body");
        assert_eq!(err.to_string(), "response body is empty");
    }

    #[test]
    fn malformed_body_is_a_decode_failure() {
        assert!(matches!(
            Envelope::decode(b"{\"payload\":"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn missing_payload_and_errors_is_not_a_decode_failure() {
        let envelope = Envelope::decode(b"{}").expect("decode");
        assert!(!envelope.payload_present());
        assert!(!envelope.has_errors());
        assert_eq!(envelope.payload::<serde_json::Value>().expect("payload"), None);
    }

    #[test]
    fn null_payload_counts_as_absent() {
        let envelope = Envelope::decode(br#"{"payload": null}"#).expect("decode");
        assert!(!envelope.payload_present());
    }

    #[test]
    fn errors_without_payload_are_kept() {
        let envelope =
            Envelope::decode(br#"{"errors": [{"code": "InvalidInput", "message": "bad"}]}"#)
                .expect("decode");
        assert!(!envelope.payload_present());
        assert_eq!(envelope.errors, vec![UpstreamError::new("InvalidInput", "bad")]);
    }

    #[test]
    fn continuation_token_is_read_from_every_location() {
        let pagination =
            Envelope::decode(br#"{"payload": {}, "pagination": {"nextToken": "p"}}"#).expect("a");
        let camel = Envelope::decode(br#"{"payload": {}, "nextToken": "c"}"#).expect("b");
        let pascal = Envelope::decode(br#"{"payload": {}, "NextToken": "P"}"#).expect("c");
        let blank = Envelope::decode(br#"{"payload": {}, "nextToken": "  "}"#).expect("d");

        assert_eq!(pagination.next_token.as_deref(), Some("p"));
        assert_eq!(camel.next_token.as_deref(), Some("c"));
        assert_eq!(pascal.next_token.as_deref(), Some("P"));
        assert_eq!(blank.next_token, None);
    }

    #[test]
    fn payload_decodes_lazily_with_exact_amounts() {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Metric {
            total_sales: Money,
        }

        let body = br#"{"payload": [
            {"totalSales": {"amount": 12.34, "currencyCode": "USD"}},
            {"totalSales": {"amount": "12.34", "currencyCode": "USD"}}
        ]}"#;
        let envelope = Envelope::decode(body).expect("decode");
        let metrics: Vec<Metric> = envelope.payload().expect("payload").expect("present");

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].total_sales.amount.as_str(), "12.34");
        assert_eq!(metrics[0].total_sales, metrics[1].total_sales);
    }
}
