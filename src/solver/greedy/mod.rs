pub mod pool;
pub mod selection;

use chrono::Utc;
use tracing::debug;

use crate::config::constant::AVERAGE_SPEED_KMH;
use crate::distance::geodesic::haversine_km;
use crate::domain::types::{generate_id, Depot, DistanceSource, Rank, Route, Strategy};

use pool::UnvisitedPool;
use selection::{next_by_score, next_nearest};

/// Minutes to drive `distance_km` at the assumed average speed.
///
/// Placeholder estimate; superseded by road-network timing when enrichment
/// succeeds.
pub fn estimate_minutes(distance_km: f64) -> f64 {
    (distance_km / AVERAGE_SPEED_KMH) * 60.0
}

/// Greedy route construction shared by both strategies.
///
/// Starts at the depot, repeatedly picks the next stop per the strategy's
/// selection rule from a shrinking pool, then adds the return leg. An empty
/// rank list yields an empty route with zero distance and time.
///
/// Pure in its inputs: the same (depot, ranks, strategy) always produces
/// the same stop order and totals. The rank list itself is never mutated;
/// the returned route owns copies of its stops.
pub fn construct_route(depot: &Depot, ranks: &[Rank], strategy: Strategy) -> Route {
    let mut pool = UnvisitedPool::new(ranks);
    let mut stops: Vec<Rank> = Vec::with_capacity(ranks.len());
    let mut current = depot.coordinate;
    let mut total_km = 0.0;

    while let Some((pos, leg_km)) = match strategy {
        Strategy::NearestNeighbour => next_nearest(current, &pool),
        Strategy::PriorityWeighted => next_by_score(current, &pool),
    } {
        let chosen = pool.take(pos);
        total_km += leg_km;
        current = chosen.coordinate;
        stops.push(chosen.clone());
    }

    // Closing leg back to the depot; skipped for the degenerate empty route.
    if !stops.is_empty() {
        total_km += haversine_km(current, depot.coordinate);
    }

    debug!(
        "{} route: {} stops, {:.2} km straight-line",
        strategy.label(),
        stops.len(),
        total_km
    );

    Route {
        id: generate_id(),
        strategy,
        stops,
        depot: depot.clone(),
        total_distance_km: total_km,
        estimated_time_min: estimate_minutes(total_km),
        distance_source: DistanceSource::StraightLine,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Coordinate, Priority};
    use std::collections::HashSet;

    fn depot() -> Depot {
        Depot::new("Central Depot", Coordinate::new(-17.8292, 31.0522))
    }

    fn rank_at(name: &str, lat: f64, lng: f64, priority: Priority, fill: f64) -> Rank {
        Rank::new(name, Coordinate::new(lat, lng), priority, fill, 2.0, 240.0)
    }

    fn sample_ranks() -> Vec<Rank> {
        vec![
            rank_at("Market Square", -17.8350, 31.0480, Priority::Medium, 60.0),
            rank_at("Fourth Street", -17.8270, 31.0600, Priority::High, 85.0),
            rank_at("Copacabana", -17.8310, 31.0400, Priority::Low, 30.0),
            rank_at("Rezende", -17.8330, 31.0550, Priority::High, 95.0),
        ]
    }

    #[test]
    fn empty_input_yields_empty_route() {
        for strategy in [Strategy::NearestNeighbour, Strategy::PriorityWeighted] {
            let route = construct_route(&depot(), &[], strategy);
            assert!(route.stops.is_empty());
            assert_eq!(route.total_distance_km, 0.0);
            assert_eq!(route.estimated_time_min, 0.0);
            assert_eq!(route.distance_source, DistanceSource::StraightLine);
        }
    }

    #[test]
    fn both_strategies_return_a_permutation() {
        let ranks = sample_ranks();
        let input_ids: HashSet<String> = ranks.iter().map(|r| r.id.clone()).collect();

        for strategy in [Strategy::NearestNeighbour, Strategy::PriorityWeighted] {
            let route = construct_route(&depot(), &ranks, strategy);
            assert_eq!(route.stops.len(), ranks.len());
            let output_ids: HashSet<String> = route.stops.iter().map(|r| r.id.clone()).collect();
            assert_eq!(output_ids, input_ids, "{} dropped or duplicated stops", strategy.label());
        }
    }

    #[test]
    fn nearest_neighbour_is_deterministic() {
        let ranks = sample_ranks();
        let a = construct_route(&depot(), &ranks, Strategy::NearestNeighbour);
        let b = construct_route(&depot(), &ranks, Strategy::NearestNeighbour);

        let order_a: Vec<&str> = a.stops.iter().map(|r| r.name.as_str()).collect();
        let order_b: Vec<&str> = b.stops.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order_a, order_b);
        assert_eq!(a.total_distance_km, b.total_distance_km);
    }

    #[test]
    fn single_stop_route_is_out_and_back() {
        let d = depot();
        // 0.01 degrees of latitude north of the depot, ~1.11 km away.
        let rank = rank_at("Kopje", -17.8192, 31.0522, Priority::Medium, 50.0);
        let leg = haversine_km(d.coordinate, rank.coordinate);

        let route = construct_route(&d, &[rank], Strategy::NearestNeighbour);
        assert!((route.total_distance_km - 2.0 * leg).abs() < 1e-12);
        assert!(
            (route.estimated_time_min - (2.0 * leg / 30.0) * 60.0).abs() < 1e-12,
            "time estimate should assume 30 km/h"
        );
    }

    #[test]
    fn nearest_neighbour_visits_nearest_first() {
        let ranks = vec![
            rank_at("far", -17.90, 31.05, Priority::High, 100.0),
            rank_at("near", -17.835, 31.05, Priority::Low, 0.0),
        ];
        let route = construct_route(&depot(), &ranks, Strategy::NearestNeighbour);
        assert_eq!(route.stops[0].name, "near");
    }

    #[test]
    fn priority_weighted_pulls_urgent_rank_forward() {
        // The high-priority full rank sits co-located with a low empty one;
        // the weighted strategy must take it first.
        let ranks = vec![
            rank_at("low-empty", -17.84, 31.05, Priority::Low, 0.0),
            rank_at("high-full", -17.84, 31.05, Priority::High, 100.0),
        ];
        let route = construct_route(&depot(), &ranks, Strategy::PriorityWeighted);
        assert_eq!(route.stops[0].name, "high-full");
    }

    #[test]
    fn input_ranks_are_not_mutated() {
        let ranks = sample_ranks();
        let snapshot = ranks.clone();
        construct_route(&depot(), &ranks, Strategy::PriorityWeighted);
        assert_eq!(ranks, snapshot);
    }

    #[test]
    fn total_matches_pairwise_route_distance() {
        let ranks = sample_ranks();
        let d = depot();
        let route = construct_route(&d, &ranks, Strategy::NearestNeighbour);

        let coords: Vec<Coordinate> = route.stops.iter().map(|r| r.coordinate).collect();
        let recomputed = crate::distance::geodesic::route_distance_km(d.coordinate, &coords);
        assert!((route.total_distance_km - recomputed).abs() < 1e-9);
    }
}
