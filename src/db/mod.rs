pub mod aggregates;
pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod sessions;
pub mod stats;
