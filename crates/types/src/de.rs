//! Serde helpers for the loosely-typed JSON the persistence layer emits.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serializer};

/// Accepts `2025-03-03` as well as full RFC 3339 timestamps such as
/// `2025-03-03T00:00:00.000Z`. Only the calendar date is kept.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    // Timestamps without an offset, e.g. `2025-03-03T08:00:00`.
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

pub mod date {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date '{}'", raw)))
    }

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }
}

/// Treats an explicit `null` the same as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_timestamped_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 3);
        assert_eq!(parse_date("2025-03-03"), expected);
        assert_eq!(parse_date("2025-03-03T00:00:00.000Z"), expected);
        assert_eq!(parse_date("2025-03-03T08:15:00"), expected);
        assert_eq!(parse_date("not a date"), None);
    }
}
