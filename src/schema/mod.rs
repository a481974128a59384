//! Configuration types for the optimizer.

mod config;

pub use config::{ConfigError, OptimizerConfig};
