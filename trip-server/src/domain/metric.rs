//! Edge-weight selector for route search.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Error returned when a weight key is not one of the supported metrics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid weight key {key:?}: expected \"duration\" or \"cost\"")]
pub struct InvalidKey {
    key: String,
}

impl InvalidKey {
    /// The key that was rejected.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Which canonical weight a search minimises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Elapsed travel time in minutes.
    Duration,
    /// Price after discount.
    Cost,
}

impl Metric {
    /// Returns the key used for this metric on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Duration => "duration",
            Metric::Cost => "cost",
        }
    }
}

impl FromStr for Metric {
    type Err = InvalidKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duration" => Ok(Metric::Duration),
            "cost" => Ok(Metric::Cost),
            other => Err(InvalidKey {
                key: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
