use rmcp::handler::server::tool::{ToolCallContext, ToolRouter};
use rmcp::model::{CallToolResult, Content, ErrorCode, JsonObject, Tool};
use rmcp::ErrorData;
use serde_json::{json, Map, Value};
use sp_api_protocol::ErrorEnvelope;
use std::future::Future;
use std::sync::Arc;

use super::router::error::{tool_error, tool_error_envelope};
use super::SellingPartnerService;
use crate::tools::catalog::{self, PLACEHOLDERS};

const MAX_MESSAGE_CHARS: usize = 900;

/// Tool router that also serves the placeholder catalog, turns argument decoding failures into
/// declared errors with a schema hint, and honours request cancellation.
#[derive(Clone)]
pub(super) struct ToolRouterWithParamHints<S> {
    inner: ToolRouter<S>,
}

impl<S> ToolRouterWithParamHints<S>
where
    S: Send + Sync + 'static,
{
    pub(super) fn new(inner: ToolRouter<S>) -> Self {
        Self { inner }
    }

    pub(super) fn list_all(&self) -> Vec<Tool> {
        let mut tools = self.inner.list_all();
        tools.extend(PLACEHOLDERS.iter().map(|placeholder| {
            Tool::new(
                placeholder.name,
                placeholder.description,
                Arc::new(placeholder.input_schema()),
            )
        }));
        tools
    }
}

impl ToolRouterWithParamHints<SellingPartnerService> {
    pub(super) async fn call(
        &self,
        context: ToolCallContext<'_, SellingPartnerService>,
    ) -> Result<CallToolResult, ErrorData> {
        let tool_name = context.name.to_string();
        let args = context.arguments.clone();
        let ct = context.request_context.ct.clone();

        if let Some(placeholder) = catalog::placeholder(&tool_name) {
            return Ok(CallToolResult::success(vec![Content::text(
                placeholder.response(args.as_ref()),
            )]));
        }

        let outcome = unless_cancelled(&tool_name, self.inner.call(context), ct.cancelled()).await;

        match outcome {
            Ok(result) => Ok(result),
            Err(err) if err.code == ErrorCode::INVALID_PARAMS => {
                let envelope = invalid_params(&self.inner, &tool_name, args.as_ref(), &err);
                log::error!("[{tool_name}] {}", envelope.message);
                Ok(tool_error_envelope(envelope))
            }
            Err(err) => Err(err),
        }
    }
}

/// Runs `call` until it finishes or `cancelled` fires. Dropping the call aborts any in-flight
/// request and every page still to be fetched.
pub(super) async fn unless_cancelled<F, C>(
    tool_name: &str,
    call: F,
    cancelled: C,
) -> Result<CallToolResult, ErrorData>
where
    F: Future<Output = Result<CallToolResult, ErrorData>>,
    C: Future<Output = ()>,
{
    tokio::select! {
        outcome = call => outcome,
        () = cancelled => {
            log::warn!("[{tool_name}] cancelled by the client");
            Ok(tool_error("cancelled", format!("{tool_name} was cancelled")))
        }
    }
}

fn invalid_params<S>(
    router: &ToolRouter<S>,
    tool_name: &str,
    args: Option<&JsonObject>,
    err: &ErrorData,
) -> ErrorEnvelope {
    let schema = router
        .map
        .get(tool_name)
        .map(|route| route.attr.input_schema.as_ref());
    let hint = schema.and_then(|schema| build_schema_hint(schema, args, err.message.as_ref()));

    let mut message = format!("Invalid parameters for tool '{tool_name}': {}", err.message);
    if let Some(hint) = hint.as_deref() {
        message.push_str(" Hint: ");
        message.push_str(hint);
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        message = message.chars().take(MAX_MESSAGE_CHARS).collect();
        message.push('…');
    }

    let mut envelope = ErrorEnvelope::new("invalid_params", message);
    if let Some(required) = schema.map(required_fields).filter(|r| !r.is_empty()) {
        envelope = envelope.with_details(json!({
            "tool": tool_name,
            "required": required,
        }));
    }
    envelope
}

fn required_fields(schema: &Map<String, Value>) -> Vec<String> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn build_schema_hint(
    schema: &Map<String, Value>,
    args: Option<&JsonObject>,
    err_message: &str,
) -> Option<String> {
    let missing = extract_serde_field(err_message, "missing field `");
    let unknown = extract_serde_field(err_message, "unknown field `");
    let invalid = extract_serde_field(err_message, "invalid type: ");
    let required = required_fields(schema);

    let mut out = String::new();
    if let Some(missing) = missing.as_deref() {
        out.push_str(&format!("missing required field `{missing}`. "));
    }
    if let Some(unknown) = unknown.as_deref() {
        out.push_str(&format!("unknown field `{unknown}`. "));
    }
    if invalid.is_some() {
        if let Some(expected) = expected_types(schema, args) {
            out.push_str(&expected);
            out.push(' ');
        }
    }
    if !required.is_empty() {
        let required_list = required
            .iter()
            .take(6)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("Required: {required_list}."));
        if let Some(example) = build_required_example(schema, &required) {
            out.push_str(&format!(" Example: {example}"));
        }
    }

    let out = out.trim_end().to_string();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Names the declared type of every supplied argument whose JSON type does not match the schema.
fn expected_types(schema: &Map<String, Value>, args: Option<&JsonObject>) -> Option<String> {
    let props = schema.get("properties").and_then(Value::as_object)?;
    let args = args?;
    let mismatched: Vec<String> = args
        .iter()
        .filter_map(|(key, value)| {
            let expected = props.get(key).and_then(declared_type)?;
            (!value_matches(value, expected)).then(|| format!("`{key}` expects {expected}"))
        })
        .collect();
    if mismatched.is_empty() {
        None
    } else {
        Some(format!("{}.", mismatched.join(", ")))
    }
}

fn declared_type(prop: &Value) -> Option<&str> {
    match prop.get("type")? {
        Value::String(ty) => Some(ty.as_str()),
        // Optional fields come out as ["string", "null"].
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|ty| *ty != "null"),
        _ => None,
    }
}

fn value_matches(value: &Value, expected: &str) -> bool {
    match (expected, value) {
        (_, Value::Null) => true,
        ("string", Value::String(_)) => true,
        ("integer", Value::Number(n)) => n.is_i64() || n.is_u64(),
        ("number", Value::Number(_)) => true,
        ("boolean", Value::Bool(_)) => true,
        ("array", Value::Array(_)) => true,
        ("object", Value::Object(_)) => true,
        _ => false,
    }
}

fn extract_serde_field(message: &str, prefix: &str) -> Option<String> {
    let start = message.find(prefix)? + prefix.len();
    let rest = &message[start..];
    let end = rest.find('`').unwrap_or(rest.len());
    let field = rest[..end].trim();
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

fn build_required_example(schema: &Map<String, Value>, required: &[String]) -> Option<String> {
    let props = schema.get("properties").and_then(Value::as_object);
    let mut out = Map::new();

    for field in required.iter().take(4) {
        let prop_schema = props.and_then(|m| m.get(field));
        out.insert(field.clone(), placeholder_value(prop_schema));
    }

    serde_json::to_string(&Value::Object(out)).ok()
}

fn placeholder_value(schema: Option<&Value>) -> Value {
    let Some(schema) = schema else {
        return Value::String("...".to_string());
    };
    if let Some(value) = schema.get("default") {
        return value.clone();
    }
    if let Some(value) = schema
        .get("enum")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    {
        return value.clone();
    }
    match declared_type(schema) {
        Some("integer" | "number") => Value::Number(0.into()),
        Some("boolean") => Value::Bool(false),
        Some("array") => json!(["..."]),
        Some("object") => Value::Object(Map::new()),
        _ => Value::String("...".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schema(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("schema literal must be an object"),
        }
    }

    #[test]
    fn hint_names_the_missing_field_and_an_example() {
        let schema = schema(json!({
            "type": "object",
            "properties": {
                "reportType": {"type": "string"},
                "marketplaceIds": {"type": "array", "items": {"type": "string"}}
            },
            "required": ["reportType", "marketplaceIds"]
        }));
        let hint = build_schema_hint(&schema, None, "missing field `reportType`").expect("hint");
        assert!(hint.starts_with(
            "missing required field `reportType`. Required: reportType, marketplaceIds. Example: "
        ));
        let example = hint.split("Example: ").nth(1).expect("example");
        assert_eq!(
            serde_json::from_str::<Value>(example).expect("json example"),
            json!({"reportType": "...", "marketplaceIds": ["..."]})
        );
    }

    #[test]
    fn hint_points_at_mistyped_arguments() {
        let schema = schema(json!({
            "type": "object",
            "properties": {
                "marketplaceIds": {"type": ["array", "null"], "items": {"type": "string"}},
                "maxResultsPerPage": {"type": ["integer", "null"]}
            }
        }));
        let args = json!({"marketplaceIds": "ATVPDKIKX0DER", "maxResultsPerPage": 10});
        let hint = build_schema_hint(
            &schema,
            args.as_object(),
            "invalid type: string \"ATVPDKIKX0DER\", expected a sequence",
        )
        .expect("hint");
        assert_eq!(hint, "`marketplaceIds` expects array.");
    }

    #[test]
    fn no_hint_without_anything_to_say() {
        let schema = schema(json!({"type": "object", "properties": {}}));
        assert_eq!(build_schema_hint(&schema, None, "expected a map"), None);
    }
}
