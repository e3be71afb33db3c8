use thiserror::Error;

use crate::envelope::{render_errors, UpstreamError};

/// Raw bodies are quoted in failures up to this many characters.
pub const BODY_SNIPPET_LIMIT: usize = 512;

/// What arrived on the wire for one call, before any decoding.
#[derive(Debug, Clone, Copy)]
pub struct RawResponse<'a> {
    pub status: u16,
    pub status_text: &'a str,
    pub body: &'a [u8],
}

impl RawResponse<'_> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFailure {
    #[error("{operation}: no HTTP response returned")]
    NoResponse { operation: String },

    #[error("{operation}: request failed with status {status}: {detail}")]
    Status {
        operation: String,
        status: String,
        detail: String,
    },

    #[error("{operation}: {detail}")]
    Structured { operation: String, detail: String },
}

/// Decide whether a response failed, and how to describe it.
///
/// Order matters: a missing response wins, then a failing status (structured errors preferred
/// over the raw body), then structured errors under a success status.
pub fn classify(
    operation: &str,
    response: Option<&RawResponse<'_>>,
    errors: &[UpstreamError],
) -> Result<(), UpstreamFailure> {
    let Some(response) = response else {
        return Err(UpstreamFailure::NoResponse {
            operation: operation.to_string(),
        });
    };

    let structured = render_errors(errors);

    if !response.is_success() {
        let detail = if structured.is_empty() {
            body_snippet(response.body)
        } else {
            structured
        };
        let status = if response.status_text.is_empty() {
            response.status.to_string()
        } else {
            format!("{} {}", response.status, response.status_text)
        };
        return Err(UpstreamFailure::Status {
            operation: operation.to_string(),
            status,
            detail,
        });
    }

    if !structured.is_empty() {
        return Err(UpstreamFailure::Structured {
            operation: operation.to_string(),
            detail: structured,
        });
    }

    Ok(())
}

fn body_snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return "no response body".to_string();
    }
    match text.char_indices().nth(BODY_SNIPPET_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response<'a>(status: u16, status_text: &'a str, body: &'a [u8]) -> RawResponse<'a> {
        RawResponse {
            status,
            status_text,
            body,
        }
    }

    fn errors() -> Vec<UpstreamError> {
        vec![
            UpstreamError::new("InvalidInput", "Invalid marketplace"),
            UpstreamError {
                code: "QuotaExceeded".to_string(),
                message: "Slow down".to_string(),
                details: Some("retry later".to_string()),
            },
        ]
    }

    #[test]
    fn missing_response_has_fixed_wording() {
        let err = classify("orders.getOrder", None, &[]).expect_err("no response");
        assert_eq!(err.to_string(), "orders.getOrder: no HTTP response returned");
    }

    #[test]
    fn success_status_does_not_mask_structured_errors() {
        let ok = response(200, "OK", b"{}");
        let err = classify("sales.getOrderMetrics", Some(&ok), &errors()).expect_err("errors");
        let message = err.to_string();
        assert!(message.contains("Invalid marketplace"));
        assert!(message.contains("Slow down"));
        assert_eq!(
            message,
            "sales.getOrderMetrics: Invalid marketplace (InvalidInput); Slow down (QuotaExceeded): retry later"
        );
    }

    #[test]
    fn failing_status_prefers_structured_errors_over_body() {
        let bad = response(400, "Bad Request", b"{\"errors\": \"ignored raw text\"}");
        let err = classify("reports.getReport", Some(&bad), &errors()).expect_err("status");
        let message = err.to_string();
        assert!(message.starts_with("reports.getReport: request failed with status 400 Bad Request: "));
        assert!(message.contains("Invalid marketplace (InvalidInput)"));
        assert!(!message.contains("ignored raw text"));
    }

    #[test]
    fn failing_status_falls_back_to_truncated_body() {
        let body = "x".repeat(BODY_SNIPPET_LIMIT + 40);
        let bad = response(503, "Service Unavailable", body.as_bytes());
        let err = classify("fbaInventory.getInventorySummaries", Some(&bad), &[]).expect_err("503");
        let expected = format!(
            "fbaInventory.getInventorySummaries: request failed with status 503 Service Unavailable: {}...",
            "x".repeat(BODY_SNIPPET_LIMIT)
        );
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn failing_status_with_blank_body() {
        let bad = response(500, "Internal Server Error", b"   ");
        let err = classify("orders.listOrders", Some(&bad), &[]).expect_err("500");
        assert_eq!(
            err.to_string(),
            "orders.listOrders: request failed with status 500 Internal Server Error: no response body"
        );
    }

    #[test]
    fn snippet_truncation_respects_char_boundaries() {
        let body = "é".repeat(BODY_SNIPPET_LIMIT + 1);
        let snippet = body_snippet(body.as_bytes());
        assert_eq!(snippet.chars().count(), BODY_SNIPPET_LIMIT + 3);
        assert!(snippet.ends_with("é..."));
    }

    #[test]
    fn clean_success_passes() {
        let ok = response(204, "No Content", b"");
        assert_eq!(classify("reports.createReport", Some(&ok), &[]), Ok(()));
    }
}
