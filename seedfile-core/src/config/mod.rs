pub mod config;

pub use config::{SeedfileConfig, WriteMode};
