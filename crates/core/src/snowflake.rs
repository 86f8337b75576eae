//! Snowflake identifiers — 64-bit IDs embedding a creation timestamp.
//!
//! Snowflakes cross the wire as decimal strings; the top 42 bits carry
//! milliseconds since the platform epoch (2015-01-01T00:00:00Z).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EntityError;
use crate::value::Value;

/// Milliseconds between the Unix epoch and the platform epoch.
pub const EPOCH_MS: u64 = 1_420_070_400_000;

/// A 64-bit remote-entity identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Snowflake(u64);

impl Snowflake {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which this ID was minted.
    pub const fn timestamp_ms(self) -> u64 {
        (self.0 >> 22) + EPOCH_MS
    }

    /// The creation instant embedded in the ID.
    pub fn created_at(self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp_ms() as i64).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Snowflake {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| EntityError::InvalidSnowflake(s.to_string()))
    }
}

impl From<u64> for Snowflake {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Map keys carry the ID's raw 8 bytes.
impl From<Snowflake> for Value {
    fn from(id: Snowflake) -> Self {
        Value::Int64(id.0 as i64)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct SnowflakeVisitor;

impl Visitor<'_> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a snowflake as a decimal string or integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Snowflake, E> {
        v.parse::<u64>().map(Snowflake).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Snowflake, E> {
        Ok(Snowflake(v))
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_strings() {
        let id: Snowflake = "175928847299117063".parse().unwrap();
        assert_eq!(id.get(), 175_928_847_299_117_063);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        let err = "not-an-id".parse::<Snowflake>().unwrap_err();
        assert!(matches!(err, EntityError::InvalidSnowflake(_)));
    }

    #[test]
    fn embeds_creation_timestamp() {
        // Reference vector from the platform docs.
        let id = Snowflake::new(175_928_847_299_117_063);
        assert_eq!(id.timestamp_ms(), 1_462_015_105_796);
        assert_eq!(
            id.created_at().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "2016-04-30T11:18:25.796Z"
        );
    }

    #[test]
    fn serializes_as_string() {
        let id = Snowflake::new(80_351_110_224_678_912);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"80351110224678912\"");
    }

    #[test]
    fn deserializes_from_string_or_integer() {
        let from_str: Snowflake = serde_json::from_str("\"42\"").unwrap();
        let from_int: Snowflake = serde_json::from_str("42").unwrap();
        assert_eq!(from_str, from_int);
        assert_eq!(from_str.get(), 42);
    }
}
