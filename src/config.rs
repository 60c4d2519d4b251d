//! Configuration management

use anyhow::{Context, Result};

use crate::defaults::DEFAULT_ANALYSIS_WINDOW_WEEKS;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// NATS server URL
    pub nats_url: String,

    /// PostgreSQL connection string
    pub database_url: String,

    /// Analysis window length in weeks
    pub analysis_window_weeks: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let nats_url =
            std::env::var("NATS_URL").unwrap_or_else(|_| "nats://localhost:4222".to_string());

        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let analysis_window_weeks = match std::env::var("ANALYSIS_WINDOW_WEEKS") {
            Ok(raw) => {
                let weeks: i64 = raw
                    .parse()
                    .with_context(|| format!("ANALYSIS_WINDOW_WEEKS is not a number: {}", raw))?;
                if weeks < 1 {
                    anyhow::bail!("ANALYSIS_WINDOW_WEEKS must be at least 1 (got {})", weeks);
                }
                weeks
            }
            Err(_) => DEFAULT_ANALYSIS_WINDOW_WEEKS,
        };

        Ok(Self {
            nats_url,
            database_url,
            analysis_window_weeks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_analysis_window_defaults_to_four_weeks() {
        std::env::remove_var("ANALYSIS_WINDOW_WEEKS");
        std::env::set_var("DATABASE_URL", "postgres://test");

        let config = Config::from_env().unwrap();
        assert_eq!(config.analysis_window_weeks, 4);
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_analysis_window_from_env() {
        std::env::set_var("ANALYSIS_WINDOW_WEEKS", "6");
        std::env::set_var("DATABASE_URL", "postgres://test");

        let config = Config::from_env().unwrap();
        assert_eq!(config.analysis_window_weeks, 6);

        // Cleanup
        std::env::remove_var("ANALYSIS_WINDOW_WEEKS");
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_rejects_zero_window() {
        std::env::set_var("ANALYSIS_WINDOW_WEEKS", "0");
        std::env::set_var("DATABASE_URL", "postgres://test");

        assert!(Config::from_env().is_err());

        std::env::remove_var("ANALYSIS_WINDOW_WEEKS");
    }
}
