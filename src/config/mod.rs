mod basic;
mod seed;

pub use basic::BasicConfig;
pub use seed::{SeedActivity, SeedConfig};

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Startup fixtures (see `seed` table in config.toml).
    #[serde(default)]
    pub seed: SeedConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Builds a Figment that merges defaults and a config TOML file.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        }
    }

    /// Loads configuration by merging defaults and `config.toml` if present.
    pub fn from_optional_toml() -> Self {
        Self::figment().extract().unwrap_or_else(|err| {
            panic!("failed to extract configuration (defaults + optional config.toml): {err}")
        })
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_optional_toml);
