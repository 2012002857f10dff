pub mod constant {
    /// Assumed average speed (km/h) for the geodesic time estimate.
    pub const AVERAGE_SPEED_KMH: f64 = 30.0;
    /// Score weight applied to the priority class (high=3, medium=2, low=1).
    pub const PRIORITY_WEIGHT_FACTOR: f64 = 10.0;
    /// Score weight applied to the fill fraction (fill_level / 100).
    pub const FILL_WEIGHT_FACTOR: f64 = 20.0;
    /// Denominator offset (km) so co-located ranks don't blow up the score.
    pub const SCORE_DISTANCE_OFFSET_KM: f64 = 0.1;

    pub const SEED: usize = 64;
    pub const RANK_COUNT: usize = 12;
    pub const RANKS_CSV_PATH: &str = "ranks.csv";

    /// Harare CBD depot used by the demo runner.
    pub const DEPOT_NAME: &str = "Central Depot";
    pub const DEPOT_LAT: f64 = -17.8292;
    pub const DEPOT_LNG: f64 = 31.0522;
}
