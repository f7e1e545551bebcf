use super::traits::ConfigSection;
use crate::error::FitnessError;
use serde::{Deserialize, Serialize};

/// Limits applied to a single execution of a genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmConfig {
    /// Instructions executed before the run is rejected.
    pub max_steps: usize,
    /// Divisors with a smaller magnitude are rejected.
    pub div_epsilon: f64,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            max_steps: 256,
            div_epsilon: 1e-12,
        }
    }
}

impl VmConfig {
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self {
            max_steps,
            ..Self::default()
        }
    }
}

impl ConfigSection for VmConfig {
    fn section_name() -> &'static str {
        "vm"
    }

    fn validate(&self) -> Result<(), FitnessError> {
        if self.max_steps == 0 {
            return Err(FitnessError::Configuration(
                "Step budget must be at least 1".to_string()
            ));
        }
        if !self.div_epsilon.is_finite() || self.div_epsilon < 0.0 {
            return Err(FitnessError::Configuration(
                "Division epsilon must be a finite, non-negative number".to_string()
            ));
        }
        Ok(())
    }
}
