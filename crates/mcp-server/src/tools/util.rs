use chrono::{DateTime, SecondsFormat, Utc};

/// Trimmed value, or `None` when absent or blank.
pub(super) fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Trimmed entries with blanks removed.
pub(super) fn trimmed_list(values: Option<&[String]>) -> Vec<String> {
    values
        .unwrap_or_default()
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub(super) fn required(value: Option<&str>, field: &str) -> Result<String, String> {
    trimmed(value).ok_or_else(|| format!("{field} is required"))
}

/// Keep `value` only inside `min..=max`; anything else is dropped rather than rejected.
pub(super) fn within(value: Option<i64>, min: i64, max: i64) -> Option<i64> {
    value.filter(|v| (min..=max).contains(v))
}

/// Validate an RFC 3339 timestamp, returning the trimmed text unchanged.
pub(super) fn rfc3339(value: Option<&str>, field: &str) -> Result<Option<String>, String> {
    match trimmed(value) {
        None => Ok(None),
        Some(text) => DateTime::parse_from_rfc3339(&text)
            .map(|_| Some(text))
            .map_err(|_| format!("{field} must be in ISO 8601 format")),
    }
}

/// Like [`rfc3339`], but an unparsable value is silently dropped.
pub(super) fn rfc3339_lenient(value: Option<&str>) -> Option<String> {
    trimmed(value).filter(|text| DateTime::parse_from_rfc3339(text).is_ok())
}

pub(super) fn retrieved_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_absent() {
        assert_eq!(trimmed(Some("  ")), None);
        assert_eq!(trimmed(Some(" a ")), Some("a".to_string()));
        let list = vec![" A ".to_string(), " ".to_string(), "B".to_string()];
        assert_eq!(trimmed_list(Some(list.as_slice())), vec!["A", "B"]);
        assert!(trimmed_list(None).is_empty());
    }

    #[test]
    fn out_of_range_values_are_dropped() {
        assert_eq!(within(Some(0), 1, 100), None);
        assert_eq!(within(Some(101), 1, 100), None);
        assert_eq!(within(Some(100), 1, 100), Some(100));
        assert_eq!(within(None, 1, 100), None);
    }

    #[test]
    fn timestamps_must_be_rfc3339() {
        assert_eq!(
            rfc3339(Some(" 2024-01-01T00:00:00Z "), "startDateTime"),
            Ok(Some("2024-01-01T00:00:00Z".to_string()))
        );
        assert_eq!(
            rfc3339(Some("yesterday"), "startDateTime"),
            Err("startDateTime must be in ISO 8601 format".to_string())
        );
        assert_eq!(rfc3339_lenient(Some("2024-13-01")), None);
    }
}
