//! Multi-objective evolutionary optimizer core.
//!
//! # Overview
//!
//! The optimizer consists of:
//!
//! - **Solutions** (`individual`): the [`Solution`] capability trait that
//!   domain code implements, and the [`Individual`] wrapper carrying Pareto
//!   rank and crowding distance
//! - **Generations** (`generation`): a population plus Pareto ranking,
//!   crowding distances, tournament selection, and uniform crossover
//! - **Driver** (`driver`): the generation-replacement loop
//! - **Problems** (`problems`): a built-in benchmark solution
//!
//! # Example
//!
//! ```rust,no_run
//! use pareto_evo::evolution::{EvolutionDriver, Zdt1Solution};
//! use pareto_evo::schema::OptimizerConfig;
//!
//! let config = OptimizerConfig::default();
//! let mut driver = EvolutionDriver::new(config);
//! let mut result = driver.optimize(|rng| Box::new(Zdt1Solution::random(30, rng)));
//!
//! // Front 1 is the non-dominated set of the final population
//! result.print_front(1);
//! ```

mod driver;
mod generation;
mod individual;
mod problems;

pub use driver::EvolutionDriver;
pub use generation::{Generation, ReportError};
pub use individual::{Individual, Solution};
pub use problems::Zdt1Solution;
