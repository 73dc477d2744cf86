//! Layered configuration loading.

use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering the TOML file and environment
    /// variables (prefix `RANKBOARD_`, `__` as the section separator)
    /// over the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file or environment cannot
    /// be parsed.
    pub fn load(path: &str) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("RANKBOARD_").split("__"))
            .extract()?;

        Ok(config)
    }
}
