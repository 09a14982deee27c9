//! Itinerary types.
//!
//! An `Itinerary` is the result of a route search: the ordered deals that
//! take a traveller from the start location to the end location.

use chrono::Duration;

use super::{Deal, Location, Metric};

/// An ordered sequence of deals forming a journey.
///
/// # Invariants
///
/// - Consecutive legs connect (arrival of one = departure of the next)
/// - An empty itinerary means start and end are the same location
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    metric: Metric,
    legs: Vec<Deal>,
}

impl Itinerary {
    /// Constructs an itinerary from legs in travel order.
    pub(crate) fn new(metric: Metric, legs: Vec<Deal>) -> Self {
        debug_assert!(
            legs.windows(2).all(|w| w[0].arrival() == w[1].departure()),
            "itinerary legs must connect"
        );
        Self { metric, legs }
    }

    /// An itinerary with no legs.
    pub fn empty(metric: Metric) -> Self {
        Self {
            metric,
            legs: Vec::new(),
        }
    }

    /// The metric this itinerary was optimised for.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> &[Deal] {
        &self.legs
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Departure location of the first leg.
    pub fn origin(&self) -> Option<&Location> {
        self.legs.first().map(Deal::departure)
    }

    /// Arrival location of the last leg.
    pub fn destination(&self) -> Option<&Location> {
        self.legs.last().map(Deal::arrival)
    }

    /// Number of changes between legs.
    pub fn change_count(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }

    /// Sum of leg durations.
    pub fn total_duration(&self) -> Duration {
        self.legs
            .iter()
            .map(|leg| leg.duration().as_duration())
            .fold(Duration::zero(), |acc, d| acc + d)
    }

    /// Sum of discounted leg prices.
    pub fn total_cost(&self) -> f64 {
        self.legs.iter().map(|leg| leg.weights().effective_cost).sum()
    }

    /// Sum of leg weights under the searched metric.
    pub fn total_weight(&self) -> f64 {
        self.legs.iter().map(|leg| leg.weight(self.metric)).sum()
    }
}
