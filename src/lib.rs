//! pareto-evo - Multi-objective evolutionary optimization.
//!
//! This crate provides an NSGA-II-style generation manager: a population of
//! candidate solutions is ranked by Pareto dominance across several
//! simultaneously-optimized objectives, diversified through crowding-distance
//! bookkeeping, and evolved by tournament selection and uniform crossover.
//!
//! Fitness itself is a capability the caller supplies: domain code implements
//! the [`Solution`] trait (evaluate genes into objective values, define the
//! dominance direction per objective) and the optimizer never looks inside.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: serde-backed configuration types
//! - `evolution`: the optimizer core (individuals, generations, driver)
//!
//! # Example
//!
//! ```rust,no_run
//! use pareto_evo::{EvolutionDriver, OptimizerConfig, Zdt1Solution};
//!
//! let config = OptimizerConfig {
//!     population_size: 40,
//!     iterations: 50,
//!     random_seed: Some(1),
//!     ..OptimizerConfig::default()
//! };
//! config.validate().expect("invalid config");
//!
//! let mut driver = EvolutionDriver::new(config);
//! let mut result = driver.optimize(|rng| Box::new(Zdt1Solution::random(30, rng)));
//!
//! for individual in result.pareto_front(1) {
//!     println!("{}", individual.format_values(true));
//! }
//! ```

pub mod evolution;
pub mod schema;

// Re-export commonly used types
pub use evolution::{EvolutionDriver, Generation, Individual, Solution, Zdt1Solution};
pub use schema::{ConfigError, OptimizerConfig};
