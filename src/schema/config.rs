//! Optimizer configuration parameters.

use serde::{Deserialize, Serialize};

/// Scalar parameters feeding selection and crossover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Probability that a breeding pair undergoes crossover at all.
    pub breeding_prob: f64,
    /// Number of adversaries drawn per tournament selection.
    pub tournament_size: usize,
    /// Individuals per generation.
    pub population_size: usize,
    /// Number of generation-replacement iterations to run.
    pub iterations: usize,
    /// RNG seed for reproducible runs. `None` seeds from entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            breeding_prob: 0.5,
            tournament_size: 2,
            population_size: 50,
            iterations: 100,
            random_seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.breeding_prob.is_finite() || !(0.0..=1.0).contains(&self.breeding_prob) {
            return Err(ConfigError::InvalidBreedingProb(self.breeding_prob));
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::InvalidTournamentSize);
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Breeding probability {0} must lie in [0, 1]")]
    InvalidBreedingProb(f64),
    #[error("Tournament size must be at least 1")]
    InvalidTournamentSize,
    #[error("Population size must be at least 2")]
    PopulationTooSmall,
}
