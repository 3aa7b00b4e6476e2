//! Server configuration read from the environment at startup.

use std::{fmt::Display, str::FromStr};

use anyhow::Context;
use common::search_const::MAX_PAGE_SIZE;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub seed_sample_data: bool,
    pub default_per_page: u32,
    pub max_per_page: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            seed_sample_data: true,
            default_per_page: 20,
            max_per_page: MAX_PAGE_SIZE,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Config::default();
        let config = Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| {
                info!("BIND_ADDRESS not set, using default: {}", defaults.bind_address);
                defaults.bind_address.clone()
            }),
            port: try_load(&lookup, "PORT", defaults.port)?,
            cors_origins: lookup("FRONTEND_URL")
                .map(|urls| {
                    urls.split(',')
                        .map(str::trim)
                        .filter(|u| !u.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_else(|| {
                    info!("FRONTEND_URL not set, using default: {:?}", defaults.cors_origins);
                    defaults.cors_origins.clone()
                }),
            seed_sample_data: try_load(&lookup, "SEED_SAMPLE_DATA", defaults.seed_sample_data)?,
            default_per_page: try_load(&lookup, "DEFAULT_PER_PAGE", defaults.default_per_page)?,
            max_per_page: try_load(&lookup, "MAX_PER_PAGE", defaults.max_per_page)?,
        };
        anyhow::ensure!(config.default_per_page > 0, "DEFAULT_PER_PAGE must be positive");
        anyhow::ensure!(
            config.max_per_page >= config.default_per_page,
            "MAX_PER_PAGE must not be below DEFAULT_PER_PAGE"
        );
        Ok(config)
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value.trim().parse().with_context(|| format!("Invalid {key} value: {value:?}")),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
