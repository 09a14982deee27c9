//! Route planner over the deal graph.
//!
//! This module implements the search that answers: "what is the fastest, or
//! the cheapest, way to get from here to there using these deals?"

mod search;

pub use search::{RouteOutcome, RouteSearch, find_route};
