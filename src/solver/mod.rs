pub mod comparison;
pub mod greedy;
