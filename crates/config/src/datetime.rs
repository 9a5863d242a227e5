// Fixed-pattern timestamps
//
// Every config document shares one timestamp pattern for both writing and
// parsing. Input that does not match the pattern exactly is a parse error.

use chrono::NaiveDateTime;

/// The single timestamp pattern used across all config documents.
pub const DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Format a timestamp with the fixed pattern.
pub fn format(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Parse a timestamp, requiring an exact match of the fixed pattern.
pub fn parse(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
}

fn mismatch_error<E: serde::de::Error>(text: &str, err: chrono::ParseError) -> E {
    E::custom(format!(
        "timestamp {text:?} does not match pattern {DATETIME_FORMAT}: {err}"
    ))
}

/// Serde adapter for `NaiveDateTime` fields, in the style of `chrono::serde`.
///
/// ```ignore
/// #[serde(with = "lumina_config::datetime::timestamp")]
/// pub created: NaiveDateTime,
/// ```
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse(&text).map_err(|e| super::mismatch_error(&text, e))
    }
}

/// Serde adapter for `Option<NaiveDateTime>` fields. `None` maps to `null`
/// on write (and is normally omitted entirely via `skip_serializing_if`).
pub mod timestamp_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&super::format(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => super::parse(&text)
                .map(Some)
                .map_err(|e| super::mismatch_error(&text, e)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn format_uses_fixed_pattern() {
        assert_eq!(format(&sample()), "2024/03/15 14:30:00");
    }

    #[test]
    fn parse_roundtrip() {
        let texts = [
            "1970/01/01 00:00:00",
            "2024/03/15 14:30:00",
            "2024/12/31 23:59:59",
        ];
        for text in texts {
            let parsed = parse(text).unwrap();
            assert_eq!(format(&parsed), text, "roundtrip failed for {text}");
        }
    }

    #[test]
    fn parse_expected_timestamp() {
        assert_eq!(parse("2024/03/15 14:30:00").unwrap(), sample());
    }

    #[test]
    fn parse_rejects_other_patterns() {
        // ISO 8601, date-only, wrong separators, trailing garbage
        assert!(parse("2024-03-15T14:30:00").is_err());
        assert!(parse("2024/03/15").is_err());
        assert!(parse("15/03/2024 14:30:00").is_err());
        assert!(parse("2024/03/15 14:30:00Z").is_err());
        assert!(parse("not a timestamp").is_err());
    }
}
