use super::traits::ConfigSection;
use crate::error::FitnessError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Fitness assigned to any genome rejected on at least one case.
    pub floor_fitness: f64,
    /// Evaluate batches on the rayon thread pool.
    pub parallel: bool,
    /// Number of resolved task case sets kept in memory.
    pub cache_capacity: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            floor_fitness: 1e-9,
            parallel: true,
            cache_capacity: 16,
        }
    }
}

impl ConfigSection for ScoringConfig {
    fn section_name() -> &'static str {
        "scoring"
    }

    fn validate(&self) -> Result<(), FitnessError> {
        if !(self.floor_fitness > 0.0 && self.floor_fitness < 1.0) {
            return Err(FitnessError::Configuration(
                "Floor fitness must be strictly between 0 and 1".to_string()
            ));
        }
        if self.cache_capacity == 0 {
            return Err(FitnessError::Configuration(
                "Case cache capacity must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}
