use std::env;
use std::time::Duration;

use itertools::Itertools;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::domain::types::{Coordinate, Depot, DistanceSource, Rank, Route};

const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org/route/v1/driving";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_URL_LEN: usize = 8000;

/// Why road-network enrichment did not produce a route.
///
/// Every failure mode of the external provider maps to one of these; the
/// caller keeps its geodesic route as the fallback in all cases.
#[derive(Debug, Error)]
pub enum RoutingUnavailable {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    BadStatus(StatusCode),

    #[error("request URL too long ({0} chars), too many waypoints")]
    RequestTooLarge(usize),

    #[error("provider status '{0}' is not Ok")]
    ProviderStatus(String),

    #[error("no route found for the given waypoints")]
    NoRoute,

    #[error("malformed provider response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Road-following path with authoritative distance and duration.
///
/// Ephemeral: consumed once to decide whether to overwrite a route's
/// geodesic estimate. The geometry describes the literal path driven, not
/// the rank visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadRoute {
    pub distance_km: f64,
    pub duration_min: f64,
    pub geometry: Vec<Coordinate>,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// (longitude, latitude) pairs.
    coordinates: Vec<[f64; 2]>,
}

// OSRM wants "lng,lat;lng,lat;..." as a path segment.
fn waypoint_path(waypoints: &[Coordinate]) -> String {
    waypoints
        .iter()
        .map(|c| format!("{},{}", c.lng, c.lat))
        .join(";")
}

fn parse_route_response(text: &str) -> Result<RoadRoute, RoutingUnavailable> {
    let body: OsrmResponse = serde_json::from_str(text)?;

    if body.code != "Ok" {
        return Err(RoutingUnavailable::ProviderStatus(body.code));
    }
    let Some(route) = body.routes.into_iter().next() else {
        return Err(RoutingUnavailable::NoRoute);
    };

    Ok(RoadRoute {
        distance_km: route.distance / 1000.0,
        duration_min: route.duration / 60.0,
        geometry: route
            .geometry
            .coordinates
            .iter()
            .map(|[lng, lat]| Coordinate::new(*lat, *lng))
            .collect(),
    })
}

/// Fetch a driving route through the given waypoints in order.
///
/// Exactly one round-trip per call: the waypoints are batched into a single
/// request rather than queried leg by leg. No retries at this layer.
pub async fn fetch_road_route(
    client: &Client,
    waypoints: &[Coordinate],
) -> Result<RoadRoute, RoutingUnavailable> {
    let base_url = env::var("OSRM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let is_public_osrm = base_url.contains("router.project-osrm.org");

    let url = format!(
        "{}/{}?overview=full&geometries=geojson",
        base_url,
        waypoint_path(waypoints)
    );
    if url.len() > MAX_URL_LEN {
        warn!(
            "OSRM URL too long ({} chars), consider self-hosted OSRM",
            url.len()
        );
        return Err(RoutingUnavailable::RequestTooLarge(url.len()));
    }
    debug!("Built OSRM URL: {} ({} chars)", url, url.len());

    info!("Sending GET request to OSRM ({} waypoints)", waypoints.len());
    let mut request_builder = client.get(&url).timeout(REQUEST_TIMEOUT);
    if is_public_osrm {
        let user_agent = env::var("OSRM_CONTACT_EMAIL")
            .map(|email| format!("waste-route/1.0 ({})", email.trim()))
            .unwrap_or_else(|_| "waste-route/1.0 (no-email-configured@example.com)".to_string());
        request_builder = request_builder.header("User-Agent", &user_agent);
        debug!("Using public OSRM — added User-Agent: {}", &user_agent);
    }

    let response = request_builder.send().await?;
    let status = response.status();
    debug!(
        "Received response: HTTP {} ({} bytes)",
        status,
        response.content_length().unwrap_or(0)
    );
    if !status.is_success() {
        return Err(RoutingUnavailable::BadStatus(status));
    }

    let text = response.text().await?;
    trace!("Response size: {} bytes", text.len());

    parse_route_response(&text)
}

/// Request road-network distance/time for an ordered visiting sequence.
///
/// Waypoints are depot, each stop in order, then the depot again for the
/// return leg.
pub async fn enrich_route(
    client: &Client,
    depot: &Depot,
    ordered_ranks: &[Rank],
) -> Result<RoadRoute, RoutingUnavailable> {
    let mut waypoints = Vec::with_capacity(ordered_ranks.len() + 2);
    waypoints.push(depot.coordinate);
    waypoints.extend(ordered_ranks.iter().map(|r| r.coordinate));
    waypoints.push(depot.coordinate);

    fetch_road_route(client, &waypoints).await
}

/// Overwrite a route's geodesic figures with road-network ones.
///
/// This is the one designed-in mutation of a constructed route: same stops,
/// same identity, different measurement source. When enrichment is
/// unavailable the caller must leave the route untouched instead.
pub fn apply_road_metrics(route: &mut Route, road: &RoadRoute) {
    debug!(
        "replacing straight-line estimate {:.2} km / {:.1} min with road figures {:.2} km / {:.1} min",
        route.total_distance_km, route.estimated_time_min, road.distance_km, road.duration_min
    );
    route.total_distance_km = road.distance_km;
    route.estimated_time_min = road.duration_min;
    route.distance_source = DistanceSource::RoadNetwork;
}
