//! Unix timestamp utilities for payment deadlines and charge expiry.
//!
//! The processor supplies deadlines as RFC-3339 strings while on-chain calls
//! require integer seconds since the Unix epoch. [`UnixTimestamp`] is the
//! single conversion point: parsing happens once, and everything downstream
//! works with integers. No floating point is involved at any step.

use std::fmt::{Display, Formatter};
use std::ops::Add;
use std::time::SystemTime;

use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seconds since the Unix epoch (1970-01-01T00:00:00Z).
///
/// Used for transfer-intent deadlines and Permit2 signature expiry.
///
/// # Serialization
///
/// Serialized as a stringified integer to avoid loss of precision in JSON,
/// since JavaScript consumers cannot safely represent all 64-bit integers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct UnixTimestamp(u64);

impl UnixTimestamp {
    /// Creates a timestamp from raw seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Parses an RFC-3339 / ISO-8601 string (e.g. `"2030-01-01T00:00:00Z"`)
    /// into Unix seconds.
    ///
    /// Returns `None` for unparsable input or dates before the epoch.
    #[must_use]
    pub fn parse_rfc3339(s: &str) -> Option<Self> {
        let parsed = DateTime::parse_from_rfc3339(s).ok()?;
        let secs = parsed.timestamp();
        u64::try_from(secs).ok().map(Self)
    }

    /// Returns the current system time.
    ///
    /// # Panics
    ///
    /// Panics if the system clock is set before the Unix epoch, which should
    /// never happen on properly configured systems.
    #[must_use]
    pub fn now() -> Self {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("SystemTime before UNIX epoch?!?")
            .as_secs();
        Self(now)
    }

    /// Returns raw seconds since the Unix epoch.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }
}

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add<u64> for UnixTimestamp {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Serialize for UnixTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for UnixTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let ts = s
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom("timestamp must be a non-negative integer"))?;
        Ok(Self(ts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_utc() {
        let ts = UnixTimestamp::parse_rfc3339("2030-01-01T00:00:00Z").unwrap();
        assert_eq!(ts.as_secs(), 1_893_456_000);
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        // Same instant expressed in a non-UTC offset.
        let ts = UnixTimestamp::parse_rfc3339("2030-01-01T02:00:00+02:00").unwrap();
        assert_eq!(ts.as_secs(), 1_893_456_000);
    }

    #[test]
    fn test_parse_rfc3339_rejects_garbage() {
        assert!(UnixTimestamp::parse_rfc3339("not-a-date").is_none());
        assert!(UnixTimestamp::parse_rfc3339("1893456000").is_none());
    }

    #[test]
    fn test_parse_rfc3339_rejects_pre_epoch() {
        assert!(UnixTimestamp::parse_rfc3339("1969-12-31T23:59:59Z").is_none());
    }

    #[test]
    fn test_serde_stringified() {
        let ts = UnixTimestamp::from_secs(1_893_456_000);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"1893456000\"");
        let back: UnixTimestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
