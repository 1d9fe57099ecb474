//! Internal implementation of scenario identifiers.

use crate::{UuidError, UuidResult};
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Literal prefix of every scenario identifier.
pub const SCENARIO_ID_PREFIX: &str = "scenario";

/// Number of base-36 characters in the random suffix.
pub const SUFFIX_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A time-prefixed scenario identifier.
///
/// Format:
/// `scenario_<unix-millis>_<9 base-36 chars>`
///
/// This identifier is:
/// - Unique per allocation (random suffix taken from a v4 UUID)
/// - Human-readable
/// - Ordered by creation time at millisecond resolution
///
/// Once constructed the value is guaranteed to be in canonical form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScenarioId {
    millis: i64,
    suffix: String,
}

impl ScenarioId {
    /// Allocate a fresh identifier stamped with the current time.
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    /// Allocate a fresh identifier stamped with `now`.
    ///
    /// The suffix is always random; two calls with the same `now` produce different identifiers.
    pub fn generate_at(now: DateTime<Utc>) -> Self {
        Self {
            millis: now.timestamp_millis(),
            suffix: random_suffix(),
        }
    }

    /// Validates and parses an identifier that must already be in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not a canonical scenario identifier.
    pub fn parse(input: &str) -> UuidResult<Self> {
        let invalid = || {
            UuidError::InvalidInput(format!(
                "scenario id must look like '{SCENARIO_ID_PREFIX}_<millis>_<{SUFFIX_LEN} base-36 chars>', got: '{input}'"
            ))
        };

        let rest = input
            .strip_prefix(SCENARIO_ID_PREFIX)
            .and_then(|r| r.strip_prefix('_'))
            .ok_or_else(invalid)?;
        let (millis_str, suffix) = rest.split_once('_').ok_or_else(invalid)?;

        if millis_str.is_empty() || !millis_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let millis: i64 = millis_str.parse().map_err(|_| invalid())?;
        if DateTime::<Utc>::from_timestamp_millis(millis).is_none() {
            return Err(invalid());
        }

        if suffix.len() != SUFFIX_LEN
            || !suffix
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z'))
        {
            return Err(invalid());
        }

        Ok(Self {
            millis,
            suffix: suffix.to_owned(),
        })
    }

    /// Returns true if `input` is a canonical scenario identifier.
    pub fn is_canonical(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Creation time encoded in the identifier (millisecond precision).
    pub fn timestamp(&self) -> DateTime<Utc> {
        // parse() and generate_at() only ever store representable millis
        DateTime::<Utc>::from_timestamp_millis(self.millis).unwrap_or_default()
    }

    /// The random base-36 suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

fn random_suffix() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        out.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    out
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", SCENARIO_ID_PREFIX, self.millis, self.suffix)
    }
}

impl FromStr for ScenarioId {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ScenarioId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ScenarioId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ScenarioId::parse(&s).map_err(serde::de::Error::custom)
    }
}
