//! Deal types.
//!
//! A `Deal` is one purchasable travel leg: a directed edge between two
//! locations, carrying its source fields and the canonical weights derived
//! from them.

use std::fmt;

use chrono::Duration;
use serde::Serialize;

use super::{DataError, Location, Metric};

/// Unique identifier of a deal (e.g. "TLP0130").
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    /// Creates a reference, rejecting blank identifiers.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| Reference(trimmed.to_string()))
    }

    /// Returns the reference text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reference({})", self.0)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mode of transport tag (e.g. "bus", "train", "car").
///
/// Only used to tell deals apart for display; the search never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Transport(String);

impl Transport {
    /// Creates a transport tag.
    pub fn new(s: impl Into<String>) -> Self {
        Transport(s.into())
    }

    /// Returns the tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Elapsed time of a deal as listed: hours plus minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TravelTime {
    pub hours: u32,
    pub minutes: u32,
}

impl TravelTime {
    /// Creates a travel time.
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Total length in minutes, or `None` if it does not fit in a `u32`.
    pub fn checked_total_minutes(&self) -> Option<u32> {
        self.hours.checked_mul(60)?.checked_add(self.minutes)
    }

    /// Total length in minutes, saturating at `u32::MAX`.
    pub fn total_minutes(&self) -> u32 {
        self.checked_total_minutes().unwrap_or(u32::MAX)
    }

    /// Total length as a `Duration`.
    pub fn as_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.total_minutes()))
    }
}

/// Canonical weights of a deal, derived only from its source fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    /// `hours * 60 + minutes`
    pub duration_minutes: u32,
    /// `cost * (1 - discount / 100)`
    pub effective_cost: f64,
}

impl Weights {
    /// Computes the canonical weights for the given source fields.
    pub fn canonical(duration: TravelTime, cost: f64, discount_percent: u8) -> Self {
        Self {
            duration_minutes: duration.total_minutes(),
            effective_cost: cost * f64::from(100 - discount_percent) / 100.0,
        }
    }

    /// Returns the weight selected by `metric`.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Duration => f64::from(self.duration_minutes),
            Metric::Cost => self.effective_cost,
        }
    }
}

/// One directed, weighted travel leg.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    reference: Reference,
    departure: Location,
    arrival: Location,
    transport: Transport,
    duration: TravelTime,
    cost: f64,
    discount_percent: u8,
    weights: Weights,
}

impl Deal {
    /// Creates a deal, computing its canonical weights.
    ///
    /// # Errors
    ///
    /// Returns `DataError::InvalidField` if the cost is negative or not
    /// finite, if the discount exceeds 100 percent, or if the duration in
    /// minutes overflows.
    pub fn new(
        reference: Reference,
        departure: Location,
        arrival: Location,
        transport: Transport,
        duration: TravelTime,
        cost: f64,
        discount_percent: u32,
    ) -> Result<Self, DataError> {
        if duration.checked_total_minutes().is_none() {
            return Err(DataError::InvalidField {
                deal: reference.to_string(),
                field: "duration",
                reason: format!(
                    "{}h{:02} is too long to count in minutes",
                    duration.hours, duration.minutes
                ),
            });
        }

        if !cost.is_finite() || cost < 0.0 {
            return Err(DataError::InvalidField {
                deal: reference.to_string(),
                field: "cost",
                reason: format!("must be a non-negative number, got {cost}"),
            });
        }

        let discount_percent = u8::try_from(discount_percent)
            .ok()
            .filter(|d| *d <= 100)
            .ok_or_else(|| DataError::InvalidField {
                deal: reference.to_string(),
                field: "discount",
                reason: format!("must be between 0 and 100, got {discount_percent}"),
            })?;

        Ok(Self {
            weights: Weights::canonical(duration, cost, discount_percent),
            reference,
            departure,
            arrival,
            transport,
            duration,
            cost,
            discount_percent,
        })
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn departure(&self) -> &Location {
        &self.departure
    }

    pub fn arrival(&self) -> &Location {
        &self.arrival
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn duration(&self) -> TravelTime {
        self.duration
    }

    /// Listed price before discount.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn discount_percent(&self) -> u8 {
        self.discount_percent
    }

    /// Current canonical weights.
    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Weight of this deal under `metric`.
    pub fn weight(&self, metric: Metric) -> f64 {
        self.weights.get(metric)
    }

    /// Recomputes the canonical weights from the source fields.
    pub(crate) fn reset_weights(&mut self) {
        self.weights = Weights::canonical(self.duration, self.cost, self.discount_percent);
    }

    #[cfg(test)]
    pub(crate) fn weights_mut(&mut self) -> &mut Weights {
        &mut self.weights
    }
}
