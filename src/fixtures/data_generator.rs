use std::io::Read;

use csv::ReaderBuilder;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::config::constant::{DEPOT_LAT, DEPOT_LNG, DEPOT_NAME, RANKS_CSV_PATH, SEED};
use crate::domain::types::{Coordinate, Depot, Priority, Rank};

/// Common bin sizes in litres.
const CAPACITIES: [f64; 4] = [240.0, 360.0, 660.0, 1100.0];

/// The demo depot (Harare CBD).
pub fn default_depot() -> Depot {
    Depot::new(DEPOT_NAME, Coordinate::new(DEPOT_LAT, DEPOT_LNG))
}

/// Reads ranks from CSV rows of
/// `name,lat,lng,priority,fill_level,fill_rate,capacity`.
/// Accepts files with or without a header and keeps at most `max_count` rows.
fn read_ranks_from_reader<R: Read>(
    reader: R,
    max_count: usize,
) -> Result<Vec<Rank>, Box<dyn std::error::Error>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut ranks = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let record = row?;

        // Treat a first row whose latitude doesn't parse as a header.
        let lat_field = record.get(1).unwrap_or("");
        if idx == 0 && lat_field.parse::<f64>().is_err() {
            continue;
        }

        match parse_rank_record(&record) {
            Ok(rank) => ranks.push(rank),
            Err(err) => {
                warn!("Skipping malformed rank row {}: {}", idx + 1, err);
            }
        }

        if ranks.len() >= max_count {
            break;
        }
    }

    Ok(ranks)
}

fn parse_rank_record(record: &csv::StringRecord) -> Result<Rank, String> {
    let field = |i: usize| record.get(i).ok_or_else(|| format!("missing column {i}"));

    let name = field(0)?.to_string();
    let lat: f64 = field(1)?.parse().map_err(|e| format!("lat: {e}"))?;
    let lng: f64 = field(2)?.parse().map_err(|e| format!("lng: {e}"))?;
    let priority: Priority = field(3)?.parse()?;
    let fill_level: f64 = field(4)?.parse().map_err(|e| format!("fill_level: {e}"))?;
    let fill_rate: f64 = field(5)?.parse().map_err(|e| format!("fill_rate: {e}"))?;
    let capacity: f64 = field(6)?.parse().map_err(|e| format!("capacity: {e}"))?;

    Ok(Rank::new(
        name,
        Coordinate::new(lat, lng),
        priority,
        fill_level,
        fill_rate,
        capacity,
    ))
}

/// Generates `count` ranks scattered around the default depot.
/// Seeded, so repeat runs produce the same coordinates and attributes.
fn generate_random_ranks(count: usize) -> Vec<Rank> {
    let seed: u64 = SEED as u64;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ranks = Vec::with_capacity(count);

    for i in 1..=count {
        let lat = DEPOT_LAT + rng.gen_range(-0.05..=0.05);
        let lng = DEPOT_LNG + rng.gen_range(-0.05..=0.05);
        let priority = match rng.gen_range(0..3) {
            0 => Priority::High,
            1 => Priority::Medium,
            _ => Priority::Low,
        };
        let fill_level = rng.gen_range(0.0..=100.0);
        let fill_rate = rng.gen_range(0.5..=5.0);
        let capacity = CAPACITIES[rng.gen_range(0..CAPACITIES.len())];

        ranks.push(Rank::new(
            format!("Rank {}", i),
            Coordinate::new(lat, lng),
            priority,
            fill_level,
            fill_rate,
            capacity,
        ));
    }

    ranks
}

/// Loads ranks from CSV with deterministic random fallback for missing entries.
pub fn load_ranks(count: usize) -> Vec<Rank> {
    let mut ranks = match std::fs::File::open(RANKS_CSV_PATH)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|file| read_ranks_from_reader(file, count))
    {
        Ok(list) => {
            info!("Loaded {} ranks from {}", list.len(), RANKS_CSV_PATH);
            list
        }
        Err(err) => {
            warn!(
                "Failed to read rank CSV at {}: {}. Falling back to random generation.",
                RANKS_CSV_PATH, err
            );
            Vec::new()
        }
    };

    if ranks.len() < count {
        let missing = count - ranks.len();
        info!("Generating {} random ranks to fill the demo set", missing);
        ranks.extend(generate_random_ranks(count).into_iter().take(missing));
    }

    ranks.truncate(count);
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ranks_are_deterministic() {
        let a = generate_random_ranks(8);
        let b = generate_random_ranks(8);

        assert_eq!(a.len(), 8);
        for (x, y) in a.iter().zip(&b) {
            // Ids are freshly generated, everything else repeats.
            assert_eq!(x.name, y.name);
            assert_eq!(x.coordinate, y.coordinate);
            assert_eq!(x.priority, y.priority);
            assert_eq!(x.fill_level, y.fill_level);
        }
    }

    #[test]
    fn random_fill_levels_are_percentages() {
        for rank in generate_random_ranks(50) {
            assert!((0.0..=100.0).contains(&rank.fill_level));
        }
    }

    #[test]
    fn csv_rows_parse_with_header() {
        let csv = "\
name,lat,lng,priority,fill_level,fill_rate,capacity
Market Square,-17.8350,31.0480,high,80,2.5,660
Copacabana,-17.8310,31.0400,low,30,1.0,240
";
        let ranks = read_ranks_from_reader(csv.as_bytes(), 10).unwrap();
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks[0].name, "Market Square");
        assert_eq!(ranks[0].priority, Priority::High);
        assert_eq!(ranks[1].capacity, 240.0);
    }

    #[test]
    fn csv_rows_parse_without_header() {
        let csv = "Market Square,-17.8350,31.0480,high,80,2.5,660\n";
        let ranks = read_ranks_from_reader(csv.as_bytes(), 10).unwrap();
        assert_eq!(ranks.len(), 1);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let csv = "\
Market Square,-17.8350,31.0480,high,80,2.5,660
Broken,not-a-lat,31.0400,low,30,1.0,240
Copacabana,-17.8310,31.0400,low,30,1.0,240
";
        let ranks = read_ranks_from_reader(csv.as_bytes(), 10).unwrap();
        assert_eq!(ranks.len(), 2);
    }

    #[test]
    fn max_count_is_respected() {
        let csv = "\
A,-17.83,31.04,high,80,2.5,660
B,-17.84,31.05,low,20,1.0,240
C,-17.85,31.06,medium,50,2.0,360
";
        let ranks = read_ranks_from_reader(csv.as_bytes(), 2).unwrap();
        assert_eq!(ranks.len(), 2);
    }
}
