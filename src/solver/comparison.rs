use tracing::info;

use crate::domain::types::{Depot, Rank, Route, Strategy};

use super::greedy::construct_route;

/// Both strategies run over the identical input, side by side.
#[derive(Debug, Clone)]
pub struct StrategyComparison {
    pub nearest_neighbour: Route,
    pub priority_weighted: Route,
}

/// Run both greedy strategies over the same (depot, ranks) input.
///
/// The input is not mutated; each route owns its own stop permutation.
/// Interpretation of the trade-off (shorter path vs. urgent stops first)
/// is left to the caller.
pub fn compare_strategies(depot: &Depot, ranks: &[Rank]) -> StrategyComparison {
    let nearest_neighbour = construct_route(depot, ranks, Strategy::NearestNeighbour);
    let priority_weighted = construct_route(depot, ranks, Strategy::PriorityWeighted);

    info!(
        "strategy comparison: {} {:.2} km vs {} {:.2} km",
        nearest_neighbour.strategy.label(),
        nearest_neighbour.total_distance_km,
        priority_weighted.strategy.label(),
        priority_weighted.total_distance_km
    );

    StrategyComparison {
        nearest_neighbour,
        priority_weighted,
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

    fn sample_ranks() -> Vec<Rank> {
        vec![
            Rank::new("A", Coordinate::new(-17.8350, 31.0480), Priority::Low, 20.0, 1.0, 240.0),
            Rank::new("B", Coordinate::new(-17.8270, 31.0600), Priority::High, 90.0, 3.0, 240.0),
            Rank::new("C", Coordinate::new(-17.8310, 31.0400), Priority::Medium, 55.0, 2.0, 240.0),
            Rank::new("D", Coordinate::new(-17.8330, 31.0550), Priority::High, 75.0, 2.5, 240.0),
        ]
    }

    #[test]
    fn both_routes_cover_the_full_input_set() {
        let ranks = sample_ranks();
        let input_ids: HashSet<String> = ranks.iter().map(|r| r.id.clone()).collect();

        let comparison = compare_strategies(&depot(), &ranks);

        for route in [&comparison.nearest_neighbour, &comparison.priority_weighted] {
            let ids: HashSet<String> = route.stops.iter().map(|r| r.id.clone()).collect();
            assert_eq!(ids, input_ids);
        }
    }

    #[test]
    fn routes_carry_their_strategy() {
        let comparison = compare_strategies(&depot(), &sample_ranks());
        assert_eq!(
            comparison.nearest_neighbour.strategy,
            Strategy::NearestNeighbour
        );
        assert_eq!(
            comparison.priority_weighted.strategy,
            Strategy::PriorityWeighted
        );
    }

    #[test]
    fn input_is_left_untouched() {
        let ranks = sample_ranks();
        let snapshot = ranks.clone();
        compare_strategies(&depot(), &ranks);
        assert_eq!(ranks, snapshot);
    }
}
