//! Location identifier types.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid location identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location: {reason}")]
pub struct InvalidLocation {
    reason: &'static str,
}

/// A location a deal departs from or arrives at (e.g. "London").
///
/// Locations are compared by their exact text, and order lexicographically,
/// which is how the departure and arrival lists are sorted. Surrounding
/// whitespace is stripped on parse and an empty name is rejected.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Location;
///
/// let london = Location::parse(" London ").unwrap();
/// assert_eq!(london.as_str(), "London");
///
/// assert!(Location::parse("").is_err());
/// assert!(Location::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Parse a location identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidLocation> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidLocation {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidLocation {
                reason: "must not contain control characters",
            });
        }

        Ok(Location(trimmed.to_string()))
    }

    /// Returns the location name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
