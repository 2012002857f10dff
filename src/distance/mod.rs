pub mod geodesic;
