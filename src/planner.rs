use std::env;
use std::error::Error;

use colored::Colorize;
use csv::Writer;
use dotenv::dotenv;
use reqwest::Client;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::osrm::{apply_road_metrics, enrich_route, RoadRoute, RoutingUnavailable};
use crate::config::constant::RANK_COUNT;
use crate::domain::types::{DistanceSource, Route};
use crate::fixtures::data_generator::{default_depot, load_ranks};
use crate::solver::comparison::compare_strategies;

/// Initialize tracing and environment
fn init_tracing_and_env() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .init();

    dotenv().ok();
    Ok(())
}

/// Demo entry point: build both routes over the fixture ranks, enrich them
/// with road-network figures where the provider is reachable, report the
/// comparison and export it to CSV.
pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env()?;

    let depot = default_depot();
    let ranks = load_ranks(RANK_COUNT);
    info!(
        "Planning collection routes from '{}' over {} ranks",
        depot.name,
        ranks.len()
    );

    let mut comparison = compare_strategies(&depot, &ranks);

    // ROAD_ENRICHMENT=off skips the external provider entirely.
    let enrichment_enabled = env::var("ROAD_ENRICHMENT")
        .map(|v| v != "off")
        .unwrap_or(true);

    if enrichment_enabled {
        let client = Client::new();
        // Two independent requests, one per strategy; no ordering dependency.
        let (nn_outcome, pw_outcome) = futures::join!(
            enrich_route(&client, &depot, &comparison.nearest_neighbour.stops),
            enrich_route(&client, &depot, &comparison.priority_weighted.stops),
        );
        apply_or_fall_back(&mut comparison.nearest_neighbour, nn_outcome);
        apply_or_fall_back(&mut comparison.priority_weighted, pw_outcome);
    } else {
        info!("Road enrichment disabled, keeping straight-line estimates");
    }

    let shorter = comparison
        .nearest_neighbour
        .total_distance_km
        .min(comparison.priority_weighted.total_distance_km);
    println!("============================== ROUTE COMPARISON ==============================\n");
    print_route(&comparison.nearest_neighbour, shorter);
    println!();
    print_route(&comparison.priority_weighted, shorter);

    save_comparison_csv(
        &[&comparison.nearest_neighbour, &comparison.priority_weighted],
        "route_comparison.csv",
    )?;

    Ok(())
}

/// Apply road figures on success; on any unavailable outcome the geodesic
/// route stands unchanged.
fn apply_or_fall_back(route: &mut Route, outcome: Result<RoadRoute, RoutingUnavailable>) {
    match outcome {
        Ok(road) => apply_road_metrics(route, &road),
        Err(reason) => warn!(
            "Road enrichment unavailable for {} route ({}); keeping straight-line estimate",
            route.strategy.label(),
            reason
        ),
    }
}

fn print_route(route: &Route, shorter_km: f64) {
    let distance = format!("{:.2} km", route.total_distance_km);
    let distance = if route.total_distance_km <= shorter_km {
        distance.green()
    } else {
        distance.normal()
    };
    let source_tag = match route.distance_source {
        DistanceSource::StraightLine => "straight-line estimate".yellow(),
        DistanceSource::RoadNetwork => "road network".green(),
    };

    println!(
        "{}: {} stops, {} , {:.0} min ({})",
        route.strategy.label(),
        route.stops.len(),
        distance,
        route.estimated_time_min,
        source_tag
    );
    let order: Vec<&str> = route.stops.iter().map(|r| r.name.as_str()).collect();
    println!("  {}", order.join(" -> "));
}

fn save_comparison_csv(routes: &[&Route], filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    // Write header
    wtr.write_record([
        "strategy",
        "stops",
        "total_distance_km",
        "estimated_time_min",
        "distance_source",
    ])?;

    for route in routes {
        let stops: Vec<&str> = route.stops.iter().map(|r| r.name.as_str()).collect();
        let source = match route.distance_source {
            DistanceSource::StraightLine => "straight-line",
            DistanceSource::RoadNetwork => "road-network",
        };
        wtr.write_record([
            route.strategy.label().to_string(),
            stops.join("|"),
            format!("{:.3}", route.total_distance_km),
            format!("{:.1}", route.estimated_time_min),
            source.to_string(),
        ])?;
    }

    wtr.flush()?; // Ensure data is written
    info!("Saved comparison to {}", filename);
    Ok(())
}
