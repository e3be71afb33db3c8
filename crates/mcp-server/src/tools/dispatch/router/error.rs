use super::super::{CallToolResult, Content, ErrorEnvelope, McpError};
use crate::tools::outcome::{Summarize, ToolFailure};
use serde_json::json;

/// Declared error: the message as text content, the envelope as structured content.
pub(in crate::tools::dispatch) fn tool_error_envelope(error: ErrorEnvelope) -> CallToolResult {
    let mut text = error.message.clone();
    if let Some(hint) = error.hint.as_deref() {
        text.push_str("\nhint: ");
        text.push_str(hint);
    }
    let mut result = CallToolResult::error(vec![Content::text(text)]);
    result.structured_content = Some(json!({ "error": error }));
    result
}

pub(in crate::tools::dispatch) fn tool_error(
    code: &'static str,
    message: impl Into<String>,
) -> CallToolResult {
    tool_error_envelope(ErrorEnvelope::new(code, message))
}

/// Render one tool outcome: summary text plus typed result, or a declared error.
pub(in crate::tools::dispatch) fn respond<R: Summarize>(
    tool: &str,
    outcome: Result<R, ToolFailure>,
) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(result) => {
            let structured = serde_json::to_value(&result).map_err(|err| {
                McpError::internal_error(format!("{tool}: failed to encode result: {err}"), None)
            })?;
            let mut call = CallToolResult::success(vec![Content::text(result.summary())]);
            call.structured_content = Some(structured);
            Ok(call)
        }
        Err(failure) => {
            let message = failure.to_string();
            log::error!("[{tool}] {message}");
            Ok(tool_error(failure.code(), message))
        }
    }
}
