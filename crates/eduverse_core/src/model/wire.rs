//! Lenient serde helpers for server payloads.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Decodes `null` as the type default, same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamps arrive either as RFC 3339 or as a naive ISO-8601 datetime.
///
/// Naive values carry no offset and are interpreted as UTC.
pub(crate) mod timestamp {
    use super::*;

    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub(crate) fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(raw.as_str()).map_err(serde::de::Error::custom)
    }

    pub(crate) fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        let trimmed = raw.trim();
        if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(value.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(trimmed, NAIVE_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|err| format!("invalid timestamp `{trimmed}`: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::timestamp::parse;
    use chrono::{TimeZone, Utc};

    #[test]
    fn parse_accepts_rfc3339_with_offset() {
        let value = parse("2024-01-10T15:00:00+03:00").expect("offset timestamp should parse");
        assert_eq!(value, Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap());
    }

    #[test]
    fn parse_treats_naive_isoformat_as_utc() {
        let value = parse("2024-01-10T12:00:00.123456").expect("naive timestamp should parse");
        assert_eq!(value.timestamp(), 1_704_888_000);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse("yesterday").expect_err("garbage must not parse");
        assert!(err.contains("invalid timestamp"));
    }
}
