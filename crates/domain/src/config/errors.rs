#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("No nameservers configured")]
    EmptyNameserverPool,

    #[error("Invalid nameserver: {0}")]
    InvalidNameserver(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
