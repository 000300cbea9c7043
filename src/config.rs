// src/config.rs
// =============================================================================
// Tunables for a crawl. Every field is also exposed as a CLI flag (see
// src/cli.rs), the defaults below are what you get when no flag is passed.
// =============================================================================

use std::time::Duration;

use thiserror::Error;

/// Default number of link hops; the base page and its direct children are fetched.
pub const DEFAULT_MAX_DEPTH: usize = 2;
/// Default wait between two child submissions of the same page.
pub const DEFAULT_POLITENESS_DELAY_MS: u64 = 100;
/// Default cap on fetches running at the same time, across all sessions.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 256;
/// Default per-page fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
/// Default deadline for a whole crawl session.
pub const DEFAULT_CRAWL_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Pages at this depth or deeper are never fetched (root is depth 0).
    pub max_depth: usize,
    /// Minimum gap between successive child submissions from one page.
    pub politeness_delay: Duration,
    /// Maximum concurrent fetches shared by every session of a `Crawler`.
    pub max_in_flight: usize,
    pub fetch_timeout: Duration,
    pub crawl_timeout: Duration,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            politeness_delay: Duration::from_millis(DEFAULT_POLITENESS_DELAY_MS),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            crawl_timeout: Duration::from_secs(DEFAULT_CRAWL_TIMEOUT_SECS),
            user_agent: format!("image-finder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_depth must be at least 1, depth 0 would not even fetch the base page")]
    ZeroDepth,

    #[error("max_in_flight must be at least 1")]
    NoFetchSlots,

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

impl CrawlConfig {
    /// Rejects settings that would make every crawl hang or fail instantly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::NoFetchSlots);
        }
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout { field: "fetch_timeout" });
        }
        if self.crawl_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout { field: "crawl_timeout" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.politeness_delay, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = CrawlConfig {
            max_depth: 0,
            ..CrawlConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDepth));
    }

    #[test]
    fn test_depth_one_is_valid() {
        let config = CrawlConfig {
            max_depth: 1,
            ..CrawlConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_in_flight_rejected() {
        let config = CrawlConfig {
            max_in_flight: 0,
            ..CrawlConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoFetchSlots));
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let config = CrawlConfig {
            crawl_timeout: Duration::ZERO,
            ..CrawlConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroTimeout { field: "crawl_timeout" })
        );
    }
}
