use super::traits::ConfigSection;
use crate::data::tasks::DEFAULT_TASK;
use crate::error::FitnessError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub task: String,
    pub population_size: usize,
    pub generations: usize,
    /// Probability that an offspring receives one structural mutation.
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub tournament_size: usize,
    pub elitism_count: usize,
    pub min_genome_len: usize,
    pub max_genome_len: usize,
    /// Hard cap enforced after mutation and crossover.
    pub abs_max_genome_len: usize,
    /// PUSH constants are drawn from and clamped to `[-constant_range, constant_range]`.
    pub constant_range: f64,
    pub hall_of_fame_size: usize,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            task: DEFAULT_TASK.to_string(),
            population_size: 200,
            generations: 50,
            mutation_rate: 0.3,
            crossover_rate: 0.5,
            tournament_size: 3,
            elitism_count: 1,
            min_genome_len: 8,
            max_genome_len: 32,
            abs_max_genome_len: 64,
            constant_range: 10.0,
            hall_of_fame_size: 10,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), FitnessError> {
        if self.task.trim().is_empty() {
            return Err(FitnessError::Configuration(
                "Task must be non-empty".to_string()
            ));
        }
        if !(1..=5000).contains(&self.population_size) {
            return Err(FitnessError::Configuration(
                "Population size must be between 1 and 5000".to_string()
            ));
        }
        if self.generations == 0 {
            return Err(FitnessError::Configuration(
                "Generations must be at least 1".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(FitnessError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(FitnessError::Configuration(
                "Crossover rate must be between 0 and 1".to_string()
            ));
        }
        if self.tournament_size == 0 {
            return Err(FitnessError::Configuration(
                "Tournament size must be at least 1".to_string()
            ));
        }
        if self.elitism_count > self.population_size {
            return Err(FitnessError::Configuration(
                "Elitism count cannot exceed population size".to_string()
            ));
        }
        if self.min_genome_len == 0
            || self.min_genome_len > self.max_genome_len
            || self.max_genome_len > self.abs_max_genome_len
        {
            return Err(FitnessError::Configuration(
                "Genome lengths must satisfy 1 <= min <= max <= absolute max".to_string()
            ));
        }
        if !(self.constant_range.is_finite() && self.constant_range > 0.0) {
            return Err(FitnessError::Configuration(
                "Constant range must be a positive finite number".to_string()
            ));
        }
        if self.hall_of_fame_size == 0 {
            return Err(FitnessError::Configuration(
                "Hall of fame size must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_lengths() {
        let config = EvolutionConfig {
            min_genome_len: 40,
            max_genome_len: 32,
            ..EvolutionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_rate_out_of_range() {
        let config = EvolutionConfig {
            mutation_rate: 1.5,
            ..EvolutionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
