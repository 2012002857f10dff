use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A point on the map in decimal degrees.
///
/// No range validation is performed; callers are responsible for passing
/// sensible latitudes/longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Weight used by the priority-weighted selection score.
    pub fn weight(self) -> f64 {
        match self {
            Priority::High => 3.0,
            Priority::Medium => 2.0,
            Priority::Low => 1.0,
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A waste-collection point.
///
/// `fill_level` is a percentage of capacity (0-100) and `fill_rate` is in
/// percent per hour. Neither is clamped here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rank {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub priority: Priority,
    pub fill_level: f64,
    pub fill_rate: f64,
    /// Nominal capacity in litres.
    pub capacity: f64,
}

impl Rank {
    /// Create a rank at an explicit coordinate (e.g. one picked on a map
    /// and handed over by the UI layer).
    pub fn new(
        name: impl Into<String>,
        coordinate: Coordinate,
        priority: Priority,
        fill_level: f64,
        fill_rate: f64,
        capacity: f64,
    ) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            coordinate,
            priority,
            fill_level,
            fill_rate,
            capacity,
        }
    }
}

/// The fixed start/end location of every route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
}

impl Depot {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            coordinate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    NearestNeighbour,
    PriorityWeighted,
}

impl Strategy {
    pub fn label(self) -> &'static str {
        match self {
            Strategy::NearestNeighbour => "Nearest Neighbour",
            Strategy::PriorityWeighted => "Priority-Weighted",
        }
    }
}

/// Where a route's distance/time figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceSource {
    /// Haversine estimate at an assumed average speed.
    StraightLine,
    /// Authoritative figures from the road-routing provider.
    RoadNetwork,
}

/// An ordered visiting sequence with its distance/time estimate.
///
/// `stops` is an owned permutation of the input ranks, so later edits to
/// the caller's rank list cannot corrupt a generated route. The only
/// designed-in mutation after construction is the road-network overwrite
/// of `total_distance_km` / `estimated_time_min` (see `api::osrm`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub strategy: Strategy,
    pub stops: Vec<Rank>,
    pub depot: Depot,
    pub total_distance_km: f64,
    pub estimated_time_min: f64,
    pub distance_source: DistanceSource,
    pub generated_at: DateTime<Utc>,
}

/// Unique id: millisecond timestamp plus a random hex suffix.
pub fn generate_id() -> String {
    let suffix: u32 = rand::thread_rng().gen();
    format!("{}-{:08x}", Utc::now().timestamp_millis(), suffix)
}
