use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Monetary amount kept as the exact decimal text the upstream sent.
///
/// Upstream resources disagree on whether `amount` is a JSON number or a JSON string. Both are
/// accepted and normalized to the same string without passing through a float, so `12.34` and
/// `"12.34"` decode identically. `null` decodes to an empty amount.
///
/// Deserialization reads the raw JSON token, so this type must be decoded straight from text
/// (`serde_json::from_str` / `from_slice`), not from an already-parsed `serde_json::Value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct DecimalString(String);

impl DecimalString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_raw(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw == "null" {
            return Ok(Self::default());
        }
        if raw.starts_with('"') {
            let text: String =
                serde_json::from_str(raw).map_err(|err| format!("invalid amount string: {err}"))?;
            return Ok(Self::new(text));
        }
        if is_json_number(raw) {
            return Ok(Self(raw.to_string()));
        }
        Err(format!("amount must be a JSON number or string, got {raw}"))
    }
}

fn is_json_number(raw: &str) -> bool {
    let first = raw.chars().next();
    matches!(first, Some(c) if c == '-' || c.is_ascii_digit())
        && raw
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
}

impl<'de> Deserialize<'de> for DecimalString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Box<RawValue> = Deserialize::deserialize(deserializer)?;
        Self::from_raw(raw.get()).map_err(D::Error::custom)
    }
}

impl fmt::Display for DecimalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DecimalString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// `{ amount, currencyCode }` as used by sales metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    #[serde(default)]
    pub amount: DecimalString,
    #[serde(default)]
    pub currency_code: String,
}

/// An upstream object passed through to clients, with every `Amount` / `amount` member rewritten
/// to the exact decimal string [`DecimalString`] would produce.
///
/// Other numbers are left as parsed. Like [`DecimalString`], this must be decoded from text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct ExactJson(Value);

impl ExactJson {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl<'de> Deserialize<'de> for ExactJson {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Box<RawValue> = Deserialize::deserialize(deserializer)?;
        exact_value(&raw).map(Self).map_err(D::Error::custom)
    }
}

fn exact_value(raw: &RawValue) -> Result<Value, serde_json::Error> {
    match raw.get().trim_start().as_bytes().first() {
        Some(b'{') => {
            let members: BTreeMap<String, Box<RawValue>> = serde_json::from_str(raw.get())?;
            let mut object = Map::new();
            for (key, member) in members {
                let value = match amount_text(&key, &member) {
                    Some(text) => Value::String(text),
                    None => exact_value(&member)?,
                };
                object.insert(key, value);
            }
            Ok(Value::Object(object))
        }
        Some(b'[') => {
            let elements: Vec<Box<RawValue>> = serde_json::from_str(raw.get())?;
            elements
                .iter()
                .map(|element| exact_value(element))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        _ => serde_json::from_str(raw.get()),
    }
}

/// Scalar `amount` members only; `null` and nested shapes are kept as they are.
fn amount_text(key: &str, raw: &RawValue) -> Option<String> {
    if !key.eq_ignore_ascii_case("amount") {
        return None;
    }
    let text = raw.get().trim();
    if !text.starts_with('"') && !is_json_number(text) {
        return None;
    }
    DecimalString::from_raw(text).ok().map(|amount| amount.0)
}
