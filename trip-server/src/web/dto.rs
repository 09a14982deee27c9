//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Deal, Itinerary, Location, Metric};

/// Query for a route search.
///
/// Fields are optional so that a missing one is reported as a bad request
/// naming the field.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Start location
    pub start: Option<String>,

    /// End location
    pub end: Option<String>,

    /// Weight key: "duration" or "cost"
    pub key: Option<String>,
}

/// Locations for populating start/end pickers.
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    /// Currency all prices are in
    pub currency: String,

    /// Locations deals depart from, sorted
    pub departures: Vec<Location>,

    /// Locations deals arrive at, sorted
    pub arrivals: Vec<Location>,
}

/// One leg of a route.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Deal reference
    pub reference: String,

    /// Mode of transport
    pub transport: String,

    /// Departure location
    pub departure: String,

    /// Arrival location
    pub arrival: String,

    /// Duration in minutes
    pub duration_mins: u32,

    /// Duration for display (e.g. "4h15")
    pub duration: String,

    /// Listed price before discount
    pub cost: f64,

    /// Discount percentage
    pub discount: u8,

    /// Price after discount
    pub effective_cost: f64,
}

/// A route between two locations.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Metric the route was optimised for
    pub key: Metric,

    /// Currency all prices are in
    pub currency: String,

    /// Legs in travel order (empty when start and end are the same)
    pub legs: Vec<LegResult>,

    /// Total duration in minutes
    pub total_duration_mins: i64,

    /// Total duration for display (e.g. "6h05")
    pub total_duration: String,

    /// Total price after discounts
    pub total_cost: f64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl LegResult {
    /// Create from a domain Deal.
    pub fn from_deal(deal: &Deal) -> Self {
        let duration_mins = deal.duration().total_minutes();

        Self {
            reference: deal.reference().to_string(),
            transport: deal.transport().to_string(),
            departure: deal.departure().to_string(),
            arrival: deal.arrival().to_string(),
            duration_mins,
            duration: format_duration(i64::from(duration_mins)),
            cost: deal.cost(),
            discount: deal.discount_percent(),
            effective_cost: deal.weights().effective_cost,
        }
    }
}

impl RouteResponse {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary, currency: &str) -> Self {
        let total_duration_mins = itinerary.total_duration().num_minutes();

        Self {
            key: itinerary.metric(),
            currency: currency.to_string(),
            legs: itinerary.legs().iter().map(LegResult::from_deal).collect(),
            total_duration_mins,
            total_duration: format_duration(total_duration_mins),
            total_cost: itinerary.total_cost(),
        }
    }
}

/// Format minutes as hours and zero-padded minutes, e.g. `125` → `"2h05"`.
fn format_duration(mins: i64) -> String {
    format!("{}h{:02}", mins / 60, mins % 60)
}
