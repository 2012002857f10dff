use crate::config::constant::{
    FILL_WEIGHT_FACTOR, PRIORITY_WEIGHT_FACTOR, SCORE_DISTANCE_OFFSET_KM,
};
use crate::distance::geodesic::haversine_km;
use crate::domain::types::{Coordinate, Rank};

use super::pool::UnvisitedPool;

/// Composite score for the priority-weighted strategy.
///
/// Higher is better: high priority and high fill push a rank up, distance
/// pulls it down. The offset in the denominator caps the influence of
/// extreme proximity as the distance approaches zero.
pub fn weighted_score(rank: &Rank, distance_km: f64) -> f64 {
    (rank.priority.weight() * PRIORITY_WEIGHT_FACTOR
        + (rank.fill_level / 100.0) * FILL_WEIGHT_FACTOR)
        / (distance_km + SCORE_DISTANCE_OFFSET_KM)
}

/// Live position and leg distance of the unvisited rank nearest to
/// `current`. Strict `<` keeps the first-encountered rank on ties.
pub fn next_nearest(current: Coordinate, pool: &UnvisitedPool) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (pos, rank) in pool.candidates() {
        let d = haversine_km(current, rank.coordinate);
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((pos, d));
        }
    }

    best
}

/// Live position and leg distance of the unvisited rank with the highest
/// weighted score from `current`. Strict `>` keeps the first-encountered
/// rank on ties.
pub fn next_by_score(current: Coordinate, pool: &UnvisitedPool) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    let mut best_score = f64::NEG_INFINITY;

    for (pos, rank) in pool.candidates() {
        let d = haversine_km(current, rank.coordinate);
        let score = weighted_score(rank, d);
        if score > best_score {
            best_score = score;
            best = Some((pos, d));
        }
    }

    best
}
