use super::{generation::GenerationConfig, traits::ConfigSection};
use crate::error::AutolError;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix of environment variables overriding settings, e.g. `AUTOL_GENERATION__MAX_LENGTH=5`.
pub const ENV_PREFIX: &str = "AUTOL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AutolError> {
        self.generation.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load defaults overridden by a TOML file and then by `AUTOL_` environment variables.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AutolError> {
        self.load_layered(Some(path.as_ref()))
    }

    /// Load defaults overridden by `AUTOL_` environment variables only.
    pub fn load_from_env(&self) -> Result<(), AutolError> {
        self.load_layered(None)
    }

    fn load_layered(&self, path: Option<&Path>) -> Result<(), AutolError> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);
        if let Some(path) = path {
            builder = builder.add_source(
                File::new(&path.to_string_lossy(), FileFormat::Toml).required(true),
            );
        }
        let config: AppConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!("Loaded [{}] settings: {:?}", GenerationConfig::section_name(), config.generation);

        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AutolError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| AutolError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| AutolError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Apply `f` and keep the result only if it validates.
    pub fn update<F>(&self, f: F) -> Result<(), AutolError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
