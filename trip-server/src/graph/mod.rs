//! Deal graph.
//!
//! Builds the adjacency structure the route search runs over: every deal is
//! a directed edge from its departure to its arrival. Deals are stored once
//! and the adjacency lists refer to them by index, so there is a single
//! authoritative instance of each deal.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{DataError, Deal, Location};

/// Index of a deal within a `GraphModel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DealIndex(pub(crate) usize);

/// Adjacency structure over a fixed set of deals.
#[derive(Debug, Clone)]
pub struct GraphModel {
    deals: Vec<Deal>,
    departures: Vec<Location>,
    arrivals: Vec<Location>,
    adjacency: HashMap<Location, Vec<DealIndex>>,
}

impl GraphModel {
    /// Builds the graph from deals in source order.
    ///
    /// # Errors
    ///
    /// Returns `DataError::DuplicateReference` if two deals share a
    /// reference, since the search identifies edges by reference.
    pub fn new(deals: Vec<Deal>) -> Result<Self, DataError> {
        let mut seen = HashSet::with_capacity(deals.len());
        for deal in &deals {
            if !seen.insert(deal.reference()) {
                return Err(DataError::DuplicateReference(deal.reference().to_string()));
            }
        }

        let departures = distinct_sorted(deals.iter().map(Deal::departure));
        let arrivals = distinct_sorted(deals.iter().map(Deal::arrival));

        let mut adjacency: HashMap<Location, Vec<DealIndex>> =
            HashMap::with_capacity(departures.len());
        for (idx, deal) in deals.iter().enumerate() {
            adjacency
                .entry(deal.departure().clone())
                .or_default()
                .push(DealIndex(idx));
        }

        debug!(
            deals = deals.len(),
            departures = departures.len(),
            arrivals = arrivals.len(),
            "Built deal graph"
        );

        Ok(Self {
            deals,
            departures,
            arrivals,
            adjacency,
        })
    }

    /// Distinct departure locations, sorted ascending.
    pub fn departures(&self) -> &[Location] {
        &self.departures
    }

    /// Distinct arrival locations, sorted ascending.
    pub fn arrivals(&self) -> &[Location] {
        &self.arrivals
    }

    /// Deals leaving `from`, in source order.
    pub fn outgoing(&self, from: &Location) -> &[DealIndex] {
        self.adjacency.get(from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the deal at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` did not come from this graph.
    pub fn deal(&self, idx: DealIndex) -> &Deal {
        &self.deals[idx.0]
    }

    /// All deals in source order.
    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn len(&self) -> usize {
        self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    pub fn is_departure(&self, location: &Location) -> bool {
        self.adjacency.contains_key(location)
    }

    pub fn is_arrival(&self, location: &Location) -> bool {
        self.arrivals.binary_search(location).is_ok()
    }

    /// True if any deal starts or ends at `location`.
    pub fn contains(&self, location: &Location) -> bool {
        self.is_departure(location) || self.is_arrival(location)
    }

    /// Restores every deal's canonical weights from its source fields.
    ///
    /// Searches keep their working state outside the graph, so this is only
    /// needed after something has edited weights directly. Idempotent.
    pub fn reset(&mut self) {
        for deal in &mut self.deals {
            deal.reset_weights();
        }
    }

    #[cfg(test)]
    pub(crate) fn deal_mut(&mut self, idx: DealIndex) -> &mut Deal {
        &mut self.deals[idx.0]
    }
}

/// Deduplicates keeping the first occurrence, then sorts ascending.
fn distinct_sorted<'a>(locations: impl Iterator<Item = &'a Location>) -> Vec<Location> {
    let mut seen = HashSet::new();
    let mut distinct: Vec<Location> = locations
        .filter(|loc| seen.insert(*loc))
        .cloned()
        .collect();
    distinct.sort();
    distinct
}
