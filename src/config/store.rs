use serde::Deserialize;

/// Which key-value backend holds the links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map; lost on restart
    Memory,
    /// Redis server shared by every instance
    Redis,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Key-value store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Selected backend
    pub backend: StoreBackend,

    /// Redis connection URL
    pub redis_url: String,

    /// Maximum number of Redis connections in the pool
    pub max_connections: u32,

    /// Prefix prepended to every key written to Redis
    pub key_prefix: String,
}

impl StoreConfig {
    /// Validate store configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.backend == StoreBackend::Redis && self.max_connections == 0 {
            return Err("REDIS_MAX_CONNECTIONS must be greater than 0".to_string());
        }

        // Listing scans by prefix; an empty one would sweep the whole database
        if self.backend == StoreBackend::Redis && self.key_prefix.is_empty() {
            return Err("STORE_KEY_PREFIX must not be empty for the redis backend".to_string());
        }

        Ok(())
    }
}
