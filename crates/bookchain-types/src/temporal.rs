use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Block creation time in RFC3339 form (UTC, microsecond precision, `Z` suffix).
///
/// Stored as the exact text that was hashed. Re-rendering a parsed
/// `DateTime` could change the text and break hash verification, so the
/// string is never regenerated after capture.
///
/// Deserialization goes through [`Timestamp::parse`], so a block read from
/// JSON cannot carry a timestamp that is not RFC3339.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(String);

impl Timestamp {
    /// Capture the current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    /// Wrap an existing RFC3339 string after checking that it parses.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        Self::try_from(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        DateTime::parse_from_rfc3339(&s).map_err(|e| TypeError::InvalidTimestamp(e.to_string()))?;
        Ok(Self(s))
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
