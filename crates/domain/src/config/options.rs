use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::errors::ConfigError;
use super::nameserver::NameserverAddr;

/// Nameservers used when none are configured explicitly.
pub const DEFAULT_NAMESERVERS: [&str; 4] = ["1.1.1.1:53", "1.0.0.1:53", "8.8.8.8:53", "8.8.4.4:53"];

const DEFAULT_CONFIG_FILE: &str = "resolvercache.toml";

/// Construction-time configuration for the query client, cache and dialer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResolverOptions {
    #[serde(default = "default_nameservers")]
    pub nameservers: Vec<String>,

    /// Maximum number of cached hostnames (entry count, not bytes).
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Expiration applied to answers that report a TTL of 0.
    #[serde(default = "default_expiration_secs")]
    pub default_expiration_secs: u32,

    /// Attempts per resolution against the selected nameserver.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-attempt deadline.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    #[serde(default = "default_dial_timeout_ms")]
    pub dial_timeout_ms: u64,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            nameservers: default_nameservers(),
            cache_capacity: default_cache_capacity(),
            default_expiration_secs: default_expiration_secs(),
            max_retries: default_max_retries(),
            query_timeout_ms: default_query_timeout_ms(),
            sweep_interval_secs: default_sweep_interval_secs(),
            dial_timeout_ms: default_dial_timeout_ms(),
        }
    }
}

impl ResolverOptions {
    /// Load options from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. resolvercache.toml in current directory
    /// 3. Default options
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let options = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        options.validate()?;
        Ok(options)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parses the configured endpoints, failing on the first invalid one.
    pub fn nameserver_addrs(&self) -> Result<Vec<NameserverAddr>, ConfigError> {
        if self.nameservers.is_empty() {
            return Err(ConfigError::EmptyNameserverPool);
        }

        self.nameservers
            .iter()
            .map(|s| {
                s.parse::<NameserverAddr>()
                    .map_err(ConfigError::InvalidNameserver)
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.nameserver_addrs()?;

        if self.cache_capacity == 0 {
            return Err(ConfigError::Validation(
                "cache_capacity must be at least 1".to_string(),
            ));
        }

        if self.default_expiration_secs == 0 {
            return Err(ConfigError::Validation(
                "default_expiration_secs must be greater than 0".to_string(),
            ));
        }

        if self.max_retries == 0 {
            return Err(ConfigError::Validation(
                "max_retries must be at least 1".to_string(),
            ));
        }

        if self.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "sweep_interval_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn dial_timeout(&self) -> Duration {
        Duration::from_millis(self.dial_timeout_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

fn default_nameservers() -> Vec<String> {
    DEFAULT_NAMESERVERS.iter().map(|s| s.to_string()).collect()
}

fn default_cache_capacity() -> usize {
    10_000
}

fn default_expiration_secs() -> u32 {
    300
}

fn default_max_retries() -> u32 {
    5
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_sweep_interval_secs() -> u64 {
    300
}

fn default_dial_timeout_ms() -> u64 {
    30_000
}
