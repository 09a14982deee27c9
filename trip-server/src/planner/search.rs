//! Single-source route search over the deal graph.
//!
//! The search is label-correcting over edges: each frontier entry is a deal
//! together with the best known weight of a path that ends with that deal.
//! Every round settles the lightest unsettled entry (scanning the whole
//! frontier, ties to the earliest entry) and relaxes the deals leaving its
//! arrival location.
//!
//! Working weights and parent links live in the frontier, never in the
//! deals themselves, so the graph stays read-only and can be shared between
//! concurrent searches.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::domain::{InvalidKey, Itinerary, Location, Metric, Reference};
use crate::graph::{DealIndex, GraphModel};

/// Outcome of a route search.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// The optimal itinerary for the requested metric.
    Found(Itinerary),
    /// The end cannot be reached from the start.
    NoRoute,
}

impl RouteOutcome {
    pub fn is_no_route(&self) -> bool {
        matches!(self, RouteOutcome::NoRoute)
    }

    /// Returns the itinerary, if one was found.
    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            RouteOutcome::Found(itinerary) => Some(itinerary),
            RouteOutcome::NoRoute => None,
        }
    }

    pub fn into_itinerary(self) -> Option<Itinerary> {
        match self {
            RouteOutcome::Found(itinerary) => Some(itinerary),
            RouteOutcome::NoRoute => None,
        }
    }
}

/// A discovered path candidate ending with `deal`.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    deal: DealIndex,
    weight: f64,
    parent: Option<usize>,
    settled: bool,
}

/// Per-search working state.
///
/// Holds exactly one entry per deal reference, so an entry's `settled` flag
/// is settlement by reference.
struct Frontier<'g> {
    graph: &'g GraphModel,
    entries: Vec<FrontierEntry>,
    by_reference: HashMap<&'g Reference, usize>,
}

impl<'g> Frontier<'g> {
    /// Seeds the frontier with the deals leaving `start` at their own weight.
    fn seed(graph: &'g GraphModel, start: &Location, metric: Metric) -> Self {
        let mut frontier = Self {
            graph,
            entries: Vec::new(),
            by_reference: HashMap::new(),
        };
        for &idx in graph.outgoing(start) {
            frontier.push(idx, graph.deal(idx).weight(metric), None);
        }
        frontier
    }

    fn push(&mut self, deal: DealIndex, weight: f64, parent: Option<usize>) {
        self.by_reference
            .insert(self.graph.deal(deal).reference(), self.entries.len());
        self.entries.push(FrontierEntry {
            deal,
            weight,
            parent,
            settled: false,
        });
    }

    /// Records a path of weight `candidate` ending with `deal`, reached via
    /// the entry at `parent`. Keeps the existing entry unless the candidate
    /// is strictly lighter.
    fn relax(&mut self, deal: DealIndex, candidate: f64, parent: usize) {
        let reference = self.graph.deal(deal).reference();
        match self.by_reference.get(reference).copied() {
            None => self.push(deal, candidate, Some(parent)),
            Some(existing) => {
                let entry = &mut self.entries[existing];
                if !entry.settled && entry.weight > candidate {
                    entry.weight = candidate;
                    entry.parent = Some(parent);
                }
            }
        }
    }

    /// Index of the lightest unsettled entry, earliest first on ties.
    fn lightest_unsettled(&self) -> Option<usize> {
        lightest(self.entries.iter().enumerate().filter(|(_, e)| !e.settled))
    }

    /// Index of the lightest entry arriving at `end`, earliest first on ties.
    fn lightest_arriving_at(&self, end: &Location) -> Option<usize> {
        lightest(
            self.entries
                .iter()
                .enumerate()
                .filter(|(_, e)| self.graph.deal(e.deal).arrival() == end),
        )
    }

    /// Deals on the path ending at entry `idx`, in travel order.
    fn path_to(&self, idx: usize) -> Vec<DealIndex> {
        let mut path = Vec::new();
        let mut step = Some(idx);
        while let Some(current) = step {
            let entry = &self.entries[current];
            path.push(entry.deal);
            step = entry.parent;
        }
        path.reverse();
        path
    }
}

fn lightest<'a>(entries: impl Iterator<Item = (usize, &'a FrontierEntry)>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, entry) in entries {
        if best.is_none_or(|(_, weight)| entry.weight < weight) {
            best = Some((idx, entry.weight));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Route search over a deal graph.
pub struct RouteSearch<'g> {
    graph: &'g GraphModel,
}

impl<'g> RouteSearch<'g> {
    /// Create a new search over `graph`.
    pub fn new(graph: &'g GraphModel) -> Self {
        Self { graph }
    }

    /// Find the itinerary from `start` to `end` minimising `metric`.
    ///
    /// Returns an empty itinerary when `start == end` and the location is
    /// in the graph. Unknown locations and unreachable ends give
    /// `RouteOutcome::NoRoute`.
    pub fn run(&self, start: &Location, end: &Location, metric: Metric) -> RouteOutcome {
        if start == end {
            return if self.graph.contains(start) {
                RouteOutcome::Found(Itinerary::empty(metric))
            } else {
                RouteOutcome::NoRoute
            };
        }

        if !self.graph.is_departure(start) || !self.graph.is_arrival(end) {
            debug!(%start, %end, "Start or end not in graph");
            return RouteOutcome::NoRoute;
        }

        let mut frontier = Frontier::seed(self.graph, start, metric);
        let mut settled: usize = 0;

        while let Some(current) = frontier.lightest_unsettled() {
            let entry = frontier.entries[current];
            let via = self.graph.deal(entry.deal);

            trace!(
                reference = %via.reference(),
                at = %via.arrival(),
                weight = entry.weight,
                "Settling deal"
            );

            for &next in self.graph.outgoing(via.arrival()) {
                let candidate = entry.weight + self.graph.deal(next).weight(metric);
                frontier.relax(next, candidate, current);
            }

            frontier.entries[current].settled = true;
            settled += 1;
        }

        let Some(best) = frontier.lightest_arriving_at(end) else {
            debug!(%start, %end, %metric, settled, "No route found");
            return RouteOutcome::NoRoute;
        };

        let legs = frontier
            .path_to(best)
            .into_iter()
            .map(|idx| self.graph.deal(idx).clone())
            .collect();
        let itinerary = Itinerary::new(metric, legs);

        debug!(
            %start,
            %end,
            %metric,
            legs = itinerary.len(),
            total = itinerary.total_weight(),
            settled,
            "Route found"
        );

        RouteOutcome::Found(itinerary)
    }

    /// Like [`run`](Self::run), with the metric given as a key string.
    ///
    /// The key is checked before any search work. Blank locations cannot be
    /// in the graph and give `NoRoute`.
    pub fn run_by_key(
        &self,
        start: &str,
        end: &str,
        key: &str,
    ) -> Result<RouteOutcome, InvalidKey> {
        let metric: Metric = key.parse()?;
        let (Ok(start), Ok(end)) = (Location::parse(start), Location::parse(end)) else {
            return Ok(RouteOutcome::NoRoute);
        };
        Ok(self.run(&start, &end, metric))
    }
}

/// Find the optimal itinerary from `start` to `end` in `graph`.
pub fn find_route(
    graph: &GraphModel,
    start: &Location,
    end: &Location,
    metric: Metric,
) -> RouteOutcome {
    RouteSearch::new(graph).run(start, end, metric)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
