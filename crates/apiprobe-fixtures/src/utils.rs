use crate::error::{HelperError, HelperResult};
use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, NaiveDateTime, Utc};
use serde_json::{Map, Value as JsonValue};

/// RFC 3339 / ISO 8601 text, defaulting to now
pub fn format_timestamp(dt: Option<DateTime<Utc>>) -> String {
    dt.unwrap_or_else(Utc::now).to_rfc3339()
}

/// Parse an ISO 8601 timestamp. A trailing `Z` is accepted, and a
/// timestamp without an offset is read as UTC.
pub fn parse_timestamp(timestamp: &str) -> HelperResult<DateTime<FixedOffset>> {
    let trimmed = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|e| HelperError::InvalidTimestamp {
            input: timestamp.to_string(),
            reason: e.to_string(),
        })
}

/// `(now - days, now)`
pub fn date_range(days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = Utc::now();
    (end - ChronoDuration::days(days), end)
}

/// Copy of `data` with the named fields masked. Values longer than four
/// characters keep their first and last two characters.
pub fn mask_sensitive_data(data: &Map<String, JsonValue>, fields: &[&str]) -> Map<String, JsonValue> {
    let mut masked = data.clone();
    for field in fields {
        if let Some(value) = masked.get_mut(*field) {
            let text = match &*value {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            *value = JsonValue::String(mask(&text));
        }
    }
    masked
}

fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();
    if len > 4 {
        let mut out: String = chars[..2].iter().collect();
        out.push_str(&"*".repeat(len - 4));
        out.extend(&chars[len - 2..]);
        out
    } else {
        "*".repeat(len)
    }
}

/// Percentage rounded to two decimals; zero when `total` is zero
pub fn calculate_percentage(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    ((part / total) * 100.0 * 100.0).round() / 100.0
}

/// Recursively merge `overlay` into a copy of `base`. Nested objects merge,
/// anything else in `overlay` replaces the base value.
pub fn deep_merge(base: &JsonValue, overlay: &JsonValue) -> JsonValue {
    match (base, overlay) {
        (JsonValue::Object(base_map), JsonValue::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in overlay_map {
                let next = match merged.get(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value)
                    }
                    _ => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            JsonValue::Object(merged)
        }
        _ => overlay.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_timestamp_round_trip_with_z() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let text = format_timestamp(Some(dt));
        assert_eq!(parse_timestamp(&text).unwrap(), dt);

        let parsed = parse_timestamp("2024-03-01T12:30:00Z").unwrap();
        assert_eq!(parsed, dt);

        let naive = parse_timestamp("2024-03-01T12:30:00.250").unwrap();
        assert_eq!(naive.day(), 1);
        assert_eq!(naive.minute(), 30);

        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(HelperError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_date_range() {
        let (start, end) = date_range(7);
        assert_eq!(end - start, ChronoDuration::days(7));
    }

    #[test]
    fn test_mask_sensitive_data() {
        let data = json!({"password": "secret123", "pin": "1234", "id": 42, "name": "x"});
        let masked = mask_sensitive_data(data.as_object().unwrap(), &["password", "pin", "missing"]);
        assert_eq!(masked["password"], "se*****23");
        assert_eq!(masked["pin"], "****");
        assert_eq!(masked["id"], 42);
        assert_eq!(masked["name"], "x");
    }

    #[test]
    fn test_mask_sensitive_data_stringifies_non_strings() {
        let data = json!({"card": 4111222233334444u64, "flag": true, "token": null});
        let masked = mask_sensitive_data(data.as_object().unwrap(), &["card", "flag", "token"]);
        assert_eq!(masked["card"], "41************44");
        assert_eq!(masked["flag"], "****");
        assert_eq!(masked["token"], "****");
        // The input map is left alone
        assert_eq!(data["card"], 4111222233334444u64);
    }

    #[test]
    fn test_calculate_percentage() {
        assert_eq!(calculate_percentage(1.0, 3.0), 33.33);
        assert_eq!(calculate_percentage(5.0, 0.0), 0.0);
        assert_eq!(calculate_percentage(10.0, 10.0), 100.0);
    }

    #[test]
    fn test_deep_merge() {
        let base = json!({"a": 1, "nested": {"x": 1, "y": 2}, "list": [1]});
        let overlay = json!({"b": 2, "nested": {"y": 3, "z": 4}, "list": [2]});
        assert_eq!(
            deep_merge(&base, &overlay),
            json!({"a": 1, "b": 2, "nested": {"x": 1, "y": 3, "z": 4}, "list": [2]})
        );
    }
}
