//! Order timestamps.
//!
//! The backend stores order dates as ISO-8601 text. Seeded rows carry no
//! offset (`2026-01-10T10:00:00`) while rows written by other clients may
//! (`2026-01-10T10:00:00+02:00`), so both forms are accepted, as is a bare
//! date (`2026-01-10`). Naive values are interpreted as UTC; a bare date is
//! midnight UTC.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Naive formats accepted in addition to RFC 3339.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur when parsing an [`OrderTimestamp`].
#[derive(Debug, Clone, Error)]
pub enum TimestampError {
    /// The input string is empty.
    #[error("timestamp cannot be empty")]
    Empty,
    /// The input is not a recognised ISO-8601 timestamp.
    #[error("invalid ISO-8601 timestamp: {0}")]
    Invalid(String),
}

/// The moment an order was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderTimestamp(DateTime<FixedOffset>);

impl OrderTimestamp {
    /// Date and time for table display (e.g., "2026-01-10 10:00").
    #[must_use]
    pub fn display_short(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl FromStr for OrderTimestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TimestampError::Empty);
        }

        if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(value));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(|naive| Self(naive.and_utc().fixed_offset()))
            .ok_or_else(|| TimestampError::Invalid(trimmed.to_string()))
    }
}

impl fmt::Display for OrderTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

impl Serialize for OrderTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for OrderTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_timestamp_is_read_as_utc() {
        let ts: OrderTimestamp = "2026-01-10T10:00:00".parse().unwrap();
        assert_eq!(ts.to_string(), "2026-01-10T10:00:00+00:00");
        assert_eq!(ts.display_short(), "2026-01-10 10:00");
    }

    #[test]
    fn test_offset_is_preserved() {
        let ts: OrderTimestamp = "2026-02-01T11:20:00+02:00".parse().unwrap();
        assert_eq!(ts.to_string(), "2026-02-01T11:20:00+02:00");
        assert_eq!(ts.display_short(), "2026-02-01 11:20");
    }

    #[test]
    fn test_space_separated_and_fractional_seconds() {
        assert!("2026-01-12 14:30:00".parse::<OrderTimestamp>().is_ok());
        assert!("2026-01-12T14:30:00.125".parse::<OrderTimestamp>().is_ok());
        assert!("2026-01-12T14:30".parse::<OrderTimestamp>().is_ok());
    }

    #[test]
    fn test_date_only_is_accepted() {
        let ts: OrderTimestamp = "2026-01-10".parse().unwrap();
        assert_eq!(ts.to_string(), "2026-01-10T00:00:00+00:00");
        assert_eq!(ts.display_short(), "2026-01-10 00:00");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            "".parse::<OrderTimestamp>(),
            Err(TimestampError::Empty)
        ));
        assert!(matches!(
            "yesterday".parse::<OrderTimestamp>(),
            Err(TimestampError::Invalid(_))
        ));
        assert!(matches!(
            "2026-13-40".parse::<OrderTimestamp>(),
            Err(TimestampError::Invalid(_))
        ));
    }

    #[test]
    fn test_serde_uses_rfc3339() {
        let ts: OrderTimestamp = serde_json::from_str(r#""2026-01-15T09:15:00""#).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, r#""2026-01-15T09:15:00+00:00""#);
    }
}
