use super::traits::ConfigSection;
use crate::error::AutolError;
use serde::{Deserialize, Serialize};

/// Settings for sampling random pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub min_length: usize,
    pub max_length: usize,
    pub population_size: usize,
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 3,
            population_size: 50,
            seed: None,
        }
    }
}

impl ConfigSection for GenerationConfig {
    fn section_name() -> &'static str {
        "generation"
    }

    fn validate(&self) -> Result<(), AutolError> {
        if self.min_length < 1 {
            return Err(AutolError::Configuration(
                "Minimum pipeline length must be at least 1".to_string()
            ));
        }
        if self.max_length < self.min_length {
            return Err(AutolError::Configuration(format!(
                "Maximum pipeline length {} is smaller than minimum {}",
                self.max_length, self.min_length
            )));
        }
        if self.population_size < 1 {
            return Err(AutolError::Configuration(
                "Population size must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}
