pub mod api;
pub mod config;
pub mod distance;
pub mod domain;
pub mod fixtures;
pub mod planner;
pub mod solver;
