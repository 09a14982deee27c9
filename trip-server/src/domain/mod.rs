//! Domain types for the trip planner.
//!
//! This module contains the core domain model types that represent
//! validated deal data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod deal;
mod error;
mod itinerary;
mod location;
mod metric;

pub use deal::{Deal, Reference, Transport, TravelTime, Weights};
pub use error::DataError;
pub use itinerary::Itinerary;
pub use location::{InvalidLocation, Location};
pub use metric::{InvalidKey, Metric};
