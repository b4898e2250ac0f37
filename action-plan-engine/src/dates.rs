//! Calendar date parsing
//!
//! Date fields arrive as free text from spreadsheets, forms and the record
//! file. A value that is present but not a valid calendar date is treated as
//! absent, so a single bad cell never stops status derivation.

use crate::types::{EngineError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Accepted date-only layouts, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];

/// Accepted date-time layouts; only the date part is kept
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// Parse a date leniently
///
/// Returns `None` for blank input and for anything that is not a real
/// calendar date (e.g. `2024-02-30`).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }

    log::warn!("Ignoring malformed date {:?}", text);
    None
}

/// Parse a date, reporting malformed input instead of coercing it
///
/// Used where the caller typed the value and should be told it was wrong.
pub fn parse_date_strict(text: &str) -> Result<NaiveDate> {
    parse_date(text).ok_or_else(|| EngineError::InvalidDate(text.to_string()))
}

/// Whole days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Serde adapter for `Option<NaiveDate>` fields
///
/// Writes ISO dates; reads any layout `parse_date` accepts and maps
/// malformed strings and non-string values to `None`.
pub mod lenient {
    use chrono::NaiveDate;
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientDateVisitor)
    }

    struct LenientDateVisitor;

    impl<'de> Visitor<'de> for LenientDateVisitor {
        type Value = Option<NaiveDate>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a date string or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(super::parse_date(v))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(LenientDateVisitor)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            log::warn!("Ignoring numeric date value {}", v);
            Ok(None)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            log::warn!("Ignoring numeric date value {}", v);
            Ok(None)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            log::warn!("Ignoring numeric date value {}", v);
            Ok(None)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            log::warn!("Ignoring boolean date value {}", v);
            Ok(None)
        }
    }
}
