/// Configuration management for Publisher Service
///
/// This module handles loading and managing configuration from environment
/// variables.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Due-post scheduler configuration
    pub scheduler: SchedulerConfig,
    /// Platform integration configuration
    pub platforms: PlatformsConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
    /// Connection acquisition timeout
    pub acquire_timeout_secs: u64,
}

/// Due-post scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between due-post scans
    pub poll_interval_secs: u64,
}

/// Platform integration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformsConfig {
    /// Platform types whose mock client should simulate an outage
    /// (comma-separated in MOCK_PLATFORM_FAILURES)
    pub simulate_failures: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig { env: app_env },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/publisher".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
                acquire_timeout_secs: std::env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            scheduler: SchedulerConfig {
                poll_interval_secs: std::env::var("SCHEDULER_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            },
            platforms: PlatformsConfig {
                simulate_failures: std::env::var("MOCK_PLATFORM_FAILURES")
                    .unwrap_or_default()
                    .split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_env().expect("config should load with defaults");
        assert_eq!(config.scheduler.poll_interval_secs, 60);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_mock_failure_list_parsing() {
        std::env::set_var("MOCK_PLATFORM_FAILURES", "Twitter, linkedin ,");
        let config = Config::from_env().expect("config should load");
        std::env::remove_var("MOCK_PLATFORM_FAILURES");

        assert_eq!(config.platforms.simulate_failures, vec!["twitter", "linkedin"]);
    }
}
