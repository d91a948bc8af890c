//! Finder configuration with sensible defaults.
//!
//! [`FinderConfig`] controls the catalog endpoint, timeouts, retry and
//! rate-limit behaviour, and selection thresholds. The defaults are tuned
//! for polite scraping of Difford's Guide.

use crate::error::FinderError;
use url::Url;

/// Default catalog origin.
pub const DEFAULT_BASE_URL: &str = "https://www.diffordsguide.com";

/// Configuration for search and scrape operations.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Catalog origin used for the search endpoint and to absolutise
    /// relative recipe links.
    pub base_url: String,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Minimum spacing between consecutive requests from one fetcher,
    /// in milliseconds.
    pub request_delay_ms: u64,
    /// Maximum number of fetch attempts per URL.
    pub max_retries: u32,
    /// Base backoff delay in milliseconds; doubles after each failed
    /// attempt.
    pub retry_delay_ms: u64,
    /// Maximum number of search candidates to return after ranking.
    pub max_results: usize,
    /// Minimum relevance score for automatic best-match selection.
    pub match_threshold: f64,
    /// Number of candidates shown per page during interactive selection.
    pub page_size: usize,
    /// Custom User-Agent string. If `None`, a fixed browser User-Agent
    /// is used.
    pub user_agent: Option<String>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 10,
            request_delay_ms: 1000,
            max_retries: 3,
            retry_delay_ms: 2000,
            max_results: 10,
            match_threshold: 0.8,
            page_size: 5,
            user_agent: None,
        }
    }
}

impl FinderConfig {
    /// Validates this configuration, returning an error if any field is
    /// invalid.
    ///
    /// Checks:
    /// - `base_url` must parse as an absolute URL
    /// - `timeout_seconds`, `max_retries`, `max_results` and `page_size`
    ///   must be greater than 0
    /// - `match_threshold` must lie in `[0, 1]`
    pub fn validate(&self) -> Result<(), FinderError> {
        if Url::parse(&self.base_url).is_err() {
            return Err(FinderError::Config(format!(
                "base_url is not a valid URL: {}",
                self.base_url
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(FinderError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_retries == 0 {
            return Err(FinderError::Config(
                "max_retries must be greater than 0".into(),
            ));
        }
        if self.max_results == 0 {
            return Err(FinderError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.page_size == 0 {
            return Err(FinderError::Config(
                "page_size must be greater than 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(FinderError::Config(
                "match_threshold must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = FinderConfig::default();
        assert_eq!(config.base_url, "https://www.diffordsguide.com");
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.request_delay_ms, 1000);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_ms, 2000);
        assert_eq!(config.max_results, 10);
        assert!((config.match_threshold - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.page_size, 5);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(FinderConfig::default().validate().is_ok());
    }

    #[test]
    fn invalid_base_url_rejected() {
        let config = FinderConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = FinderConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_max_retries_rejected() {
        let config = FinderConfig {
            max_retries: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_retries"));
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = FinderConfig {
            max_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn zero_page_size_rejected() {
        let config = FinderConfig {
            page_size: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let config = FinderConfig {
            match_threshold: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("match_threshold"));
    }

    #[test]
    fn zero_delay_valid() {
        let config = FinderConfig {
            request_delay_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_user_agent_valid() {
        let config = FinderConfig {
            user_agent: Some("TestBot/1.0".into()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
