//! Unit tests for the route search.

use super::*;
use crate::domain::{Deal, Transport, TravelTime, Weights};

fn loc(s: &str) -> Location {
    Location::parse(s).unwrap()
}

/// (from, to, transport, hours, minutes, cost, discount, reference)
type DealRow<'a> = (&'a str, &'a str, &'a str, u32, u32, f64, u32, &'a str);

fn make_graph(rows: &[DealRow]) -> GraphModel {
    let deals = rows
        .iter()
        .map(|(from, to, transport, h, m, cost, discount, r)| {
            Deal::new(
                Reference::parse(r).unwrap(),
                loc(from),
                loc(to),
                Transport::new(*transport),
                TravelTime::new(*h, *m),
                *cost,
                *discount,
            )
            .unwrap()
        })
        .collect();
    GraphModel::new(deals).unwrap()
}

fn references(outcome: &RouteOutcome) -> Vec<&str> {
    outcome
        .itinerary()
        .expect("expected a route")
        .legs()
        .iter()
        .map(|leg| leg.reference().as_str())
        .collect()
}

fn weights(graph: &GraphModel) -> Vec<Weights> {
    graph.deals().iter().map(Deal::weights).collect()
}

/// A→B bus, B→C train, A→C plane.
fn three_deals() -> GraphModel {
    make_graph(&[
        ("A", "B", "bus", 1, 30, 100.0, 0, "1"),
        ("B", "C", "train", 2, 0, 50.0, 10, "2"),
        ("A", "C", "plane", 5, 0, 200.0, 50, "3"),
    ])
}

#[test]
fn fastest_route_takes_two_legs() {
    let graph = three_deals();
    let outcome = find_route(&graph, &loc("A"), &loc("C"), Metric::Duration);

    assert_eq!(references(&outcome), vec!["1", "2"]);
    let itinerary = outcome.itinerary().unwrap();
    assert_eq!(itinerary.total_weight(), 210.0);
    assert_eq!(itinerary.total_duration(), chrono::Duration::minutes(210));
    assert_eq!(itinerary.total_cost(), 145.0);
}

#[test]
fn cheapest_route_takes_direct_leg() {
    let graph = three_deals();
    let outcome = find_route(&graph, &loc("A"), &loc("C"), Metric::Cost);

    assert_eq!(references(&outcome), vec!["3"]);
    assert_eq!(outcome.itinerary().unwrap().total_weight(), 100.0);
}

#[test]
fn metrics_do_not_interfere_across_queries() {
    let graph = three_deals();
    let search = RouteSearch::new(&graph);

    for _ in 0..3 {
        let by_time = search.run(&loc("A"), &loc("C"), Metric::Duration);
        let by_cost = search.run(&loc("A"), &loc("C"), Metric::Cost);
        assert_eq!(references(&by_time), vec!["1", "2"]);
        assert_eq!(references(&by_cost), vec!["3"]);
    }
}

#[test]
fn search_leaves_canonical_weights_untouched() {
    let graph = three_deals();
    let before = weights(&graph);

    find_route(&graph, &loc("A"), &loc("C"), Metric::Duration);
    find_route(&graph, &loc("A"), &loc("C"), Metric::Cost);

    assert_eq!(weights(&graph), before);
}

#[test]
fn same_start_and_end_is_empty_itinerary() {
    let graph = three_deals();

    for metric in [Metric::Duration, Metric::Cost] {
        for place in ["A", "B", "C"] {
            let outcome = find_route(&graph, &loc(place), &loc(place), metric);
            let itinerary = outcome.itinerary().expect("empty itinerary");
            assert!(itinerary.is_empty());
            assert_eq!(itinerary.metric(), metric);
        }
    }
}

#[test]
fn same_unknown_start_and_end_is_no_route() {
    let graph = three_deals();
    let outcome = find_route(&graph, &loc("Z"), &loc("Z"), Metric::Cost);
    assert!(outcome.is_no_route());
}

#[test]
fn unknown_locations_are_no_route() {
    let graph = three_deals();

    assert!(find_route(&graph, &loc("Z"), &loc("C"), Metric::Cost).is_no_route());
    assert!(find_route(&graph, &loc("A"), &loc("Z"), Metric::Cost).is_no_route());
    // C is only ever an arrival, A only ever a departure
    assert!(find_route(&graph, &loc("C"), &loc("B"), Metric::Cost).is_no_route());
    assert!(find_route(&graph, &loc("B"), &loc("A"), Metric::Cost).is_no_route());
}

#[test]
fn disconnected_is_no_route_repeatedly() {
    let graph = make_graph(&[
        ("A", "B", "bus", 1, 0, 10.0, 0, "1"),
        ("C", "D", "bus", 1, 0, 10.0, 0, "2"),
    ]);
    let before = weights(&graph);

    for _ in 0..3 {
        for metric in [Metric::Duration, Metric::Cost] {
            let outcome = find_route(&graph, &loc("A"), &loc("D"), metric);
            assert_eq!(outcome, RouteOutcome::NoRoute);
        }
    }
    assert_eq!(weights(&graph), before);
}

#[test]
fn equal_parallel_deals_pick_first_enumerated() {
    let graph = make_graph(&[
        ("A", "B", "bus", 2, 0, 30.0, 0, "first"),
        ("A", "B", "car", 2, 0, 30.0, 0, "second"),
    ]);

    for _ in 0..5 {
        for metric in [Metric::Duration, Metric::Cost] {
            let outcome = find_route(&graph, &loc("A"), &loc("B"), metric);
            assert_eq!(references(&outcome), vec!["first"]);
        }
    }
}

#[test]
fn enumeration_order_decides_ties() {
    let graph = make_graph(&[
        ("A", "B", "car", 2, 0, 30.0, 0, "second"),
        ("A", "B", "bus", 2, 0, 30.0, 0, "first"),
    ]);

    let outcome = find_route(&graph, &loc("A"), &loc("B"), Metric::Cost);
    assert_eq!(references(&outcome), vec!["second"]);
}

#[test]
fn tied_paths_pick_earliest_discovered() {
    // Both A→B→D and A→C→D cost 20; the route via the first-listed deal wins
    let graph = make_graph(&[
        ("A", "B", "bus", 1, 0, 10.0, 0, "ab"),
        ("A", "C", "bus", 1, 0, 10.0, 0, "ac"),
        ("C", "D", "bus", 1, 0, 10.0, 0, "cd"),
        ("B", "D", "bus", 1, 0, 10.0, 0, "bd"),
    ]);

    let outcome = find_route(&graph, &loc("A"), &loc("D"), Metric::Cost);
    assert_eq!(references(&outcome), vec!["ab", "bd"]);
}

#[test]
fn same_arrival_and_transport_are_distinct_edges() {
    // Two B→C trains: identity is the reference, so the cheaper one is used
    let graph = make_graph(&[
        ("A", "B", "bus", 1, 0, 10.0, 0, "ab"),
        ("B", "C", "train", 1, 0, 90.0, 0, "bc-dear"),
        ("B", "C", "train", 1, 0, 90.0, 50, "bc-cheap"),
        ("C", "D", "train", 1, 0, 10.0, 0, "cd"),
    ]);

    let outcome = find_route(&graph, &loc("A"), &loc("D"), Metric::Cost);
    assert_eq!(references(&outcome), vec!["ab", "bc-cheap", "cd"]);
    assert_eq!(outcome.itinerary().unwrap().total_cost(), 65.0);
}

#[test]
fn many_cheap_legs_beat_one_dear_leg() {
    let graph = make_graph(&[
        ("A", "E", "plane", 1, 0, 500.0, 0, "direct"),
        ("A", "B", "bus", 3, 0, 20.0, 0, "ab"),
        ("B", "C", "bus", 3, 0, 20.0, 0, "bc"),
        ("C", "D", "bus", 3, 0, 20.0, 0, "cd"),
        ("D", "E", "bus", 3, 0, 20.0, 0, "de"),
    ]);

    let cheapest = find_route(&graph, &loc("A"), &loc("E"), Metric::Cost);
    assert_eq!(references(&cheapest), vec!["ab", "bc", "cd", "de"]);
    assert_eq!(cheapest.itinerary().unwrap().change_count(), 3);

    let fastest = find_route(&graph, &loc("A"), &loc("E"), Metric::Duration);
    assert_eq!(references(&fastest), vec!["direct"]);
}

#[test]
fn cycles_terminate() {
    let graph = make_graph(&[
        ("A", "B", "bus", 1, 0, 10.0, 0, "ab"),
        ("B", "A", "bus", 1, 0, 10.0, 0, "ba"),
        ("B", "B", "bus", 0, 5, 1.0, 0, "bb"),
        ("B", "C", "bus", 1, 0, 10.0, 0, "bc"),
        ("C", "A", "bus", 1, 0, 10.0, 0, "ca"),
    ]);

    let outcome = find_route(&graph, &loc("A"), &loc("C"), Metric::Duration);
    assert_eq!(references(&outcome), vec!["ab", "bc"]);

    let outcome = find_route(&graph, &loc("C"), &loc("B"), Metric::Cost);
    assert_eq!(references(&outcome), vec!["ca", "ab"]);
}

#[test]
fn zero_weight_legs() {
    let graph = make_graph(&[
        ("A", "B", "walk", 0, 0, 0.0, 0, "ab"),
        ("B", "C", "walk", 0, 0, 100.0, 100, "bc"),
    ]);

    let outcome = find_route(&graph, &loc("A"), &loc("C"), Metric::Cost);
    assert_eq!(references(&outcome), vec!["ab", "bc"]);
    assert_eq!(outcome.itinerary().unwrap().total_weight(), 0.0);
}

#[test]
fn run_by_key_parses_key() {
    let graph = three_deals();
    let search = RouteSearch::new(&graph);

    let outcome = search.run_by_key("A", "C", "cost").unwrap();
    assert_eq!(references(&outcome), vec!["3"]);

    let outcome = search.run_by_key("A", "C", "duration").unwrap();
    assert_eq!(references(&outcome), vec!["1", "2"]);
}

#[test]
fn run_by_key_rejects_unknown_key_without_touching_graph() {
    let graph = three_deals();
    let before = weights(&graph);

    let err = RouteSearch::new(&graph)
        .run_by_key("A", "C", "distance")
        .unwrap_err();

    assert_eq!(err.key(), "distance");
    assert_eq!(weights(&graph), before);
}

#[test]
fn run_by_key_blank_location_is_no_route() {
    let graph = three_deals();
    let search = RouteSearch::new(&graph);

    assert!(search.run_by_key("", "C", "cost").unwrap().is_no_route());
    assert!(search.run_by_key("A", "  ", "cost").unwrap().is_no_route());
}

#[test]
fn reset_then_run_then_reset() {
    let mut graph = three_deals();
    let canonical = weights(&graph);

    graph.reset();
    let outcome = find_route(&graph, &loc("A"), &loc("C"), Metric::Duration);
    assert_eq!(references(&outcome), vec!["1", "2"]);
    graph.reset();

    assert_eq!(weights(&graph), canonical);
    assert_eq!(
        canonical,
        vec![
            Weights {
                duration_minutes: 90,
                effective_cost: 100.0
            },
            Weights {
                duration_minutes: 120,
                effective_cost: 45.0
            },
            Weights {
                duration_minutes: 300,
                effective_cost: 100.0
            },
        ]
    );
}

#[test]
fn outcome_accessors() {
    let graph = three_deals();
    let found = find_route(&graph, &loc("A"), &loc("C"), Metric::Cost);
    assert!(!found.is_no_route());
    assert_eq!(found.clone().into_itinerary().unwrap().len(), 1);

    assert!(RouteOutcome::NoRoute.itinerary().is_none());
    assert!(RouteOutcome::NoRoute.into_itinerary().is_none());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const PLACES: [&str; 5] = ["A", "B", "C", "D", "E"];

    type Row = (usize, usize, u32, u32, u32, u32);

    fn rows() -> impl Strategy<Value = Vec<Row>> {
        proptest::collection::vec(
            (
                0..PLACES.len(),
                0..PLACES.len(),
                0u32..4,
                0u32..60,
                0u32..300,
                0u32..=100,
            ),
            0..10,
        )
    }

    fn graph_from(rows: &[Row]) -> GraphModel {
        let deals = rows
            .iter()
            .enumerate()
            .map(|(i, (from, to, h, m, cost, discount))| {
                Deal::new(
                    Reference::parse(&format!("R{i}")).unwrap(),
                    loc(PLACES[*from]),
                    loc(PLACES[*to]),
                    Transport::new("bus"),
                    TravelTime::new(*h, *m),
                    f64::from(*cost),
                    *discount,
                )
                .unwrap()
            })
            .collect();
        GraphModel::new(deals).unwrap()
    }

    /// Lightest total over all paths that never revisit a location.
    ///
    /// With non-negative weights a lightest path never needs a cycle.
    fn brute_force(
        graph: &GraphModel,
        at: &Location,
        end: &Location,
        metric: Metric,
        visited: &mut Vec<Location>,
    ) -> Option<f64> {
        if at == end {
            return Some(0.0);
        }
        visited.push(at.clone());
        let mut best: Option<f64> = None;
        for &idx in graph.outgoing(at) {
            let deal = graph.deal(idx);
            if visited.contains(deal.arrival()) {
                continue;
            }
            if let Some(rest) = brute_force(graph, deal.arrival(), end, metric, visited) {
                let total = deal.weight(metric) + rest;
                if best.is_none_or(|b| total < b) {
                    best = Some(total);
                }
            }
        }
        visited.pop();
        best
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
    }

    proptest! {
        /// Found routes are connected, start and end where asked, and are
        /// no heavier than any other route
        #[test]
        fn routes_are_optimal(
            rows in rows(),
            start in 0..PLACES.len(),
            end in 0..PLACES.len(),
            duration in any::<bool>(),
        ) {
            let graph = graph_from(&rows);
            let metric = if duration { Metric::Duration } else { Metric::Cost };
            let (start, end) = (loc(PLACES[start]), loc(PLACES[end]));

            let outcome = find_route(&graph, &start, &end, metric);

            if start == end {
                prop_assert_eq!(outcome.is_no_route(), !graph.contains(&start));
                if let Some(itinerary) = outcome.itinerary() {
                    prop_assert!(itinerary.is_empty());
                }
                return Ok(());
            }

            let expected = brute_force(&graph, &start, &end, metric, &mut Vec::new());
            match (outcome.itinerary(), expected) {
                (None, None) => {}
                (Some(itinerary), Some(best)) => {
                    let legs = itinerary.legs();
                    prop_assert_eq!(legs.first().unwrap().departure(), &start);
                    prop_assert_eq!(legs.last().unwrap().arrival(), &end);
                    for pair in legs.windows(2) {
                        prop_assert_eq!(pair[0].arrival(), pair[1].departure());
                    }

                    let sum: f64 = legs.iter().map(|leg| leg.weight(metric)).sum();
                    prop_assert!(close(sum, itinerary.total_weight()));
                    prop_assert!(close(itinerary.total_weight(), best),
                        "found {} but best is {}", itinerary.total_weight(), best);
                }
                (found, expected) => {
                    prop_assert!(false, "found {:?} but expected total {:?}", found, expected);
                }
            }
        }

        /// Repeated searches give identical answers and never alter weights
        #[test]
        fn searches_are_repeatable(
            rows in rows(),
            start in 0..PLACES.len(),
            end in 0..PLACES.len(),
        ) {
            let graph = graph_from(&rows);
            let before = weights(&graph);
            let (start, end) = (loc(PLACES[start]), loc(PLACES[end]));

            let first = find_route(&graph, &start, &end, Metric::Cost);
            let _ = find_route(&graph, &start, &end, Metric::Duration);
            let second = find_route(&graph, &start, &end, Metric::Cost);

            prop_assert_eq!(first, second);
            prop_assert_eq!(weights(&graph), before);
        }

        /// Reset always restores the canonical weights
        #[test]
        fn reset_restores_canonical(rows in rows()) {
            let mut graph = graph_from(&rows);
            graph.reset();
            for deal in graph.deals() {
                let d = deal.duration();
                prop_assert_eq!(deal.weights().duration_minutes, d.hours * 60 + d.minutes);
                let expected = deal.cost() * (1.0 - f64::from(deal.discount_percent()) / 100.0);
                prop_assert!(close(deal.weights().effective_cost, expected));
            }
        }
    }
}
