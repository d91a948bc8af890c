//! Rate-limited, retrying HTTP fetcher.
//!
//! [`Fetcher`] owns one blocking [`reqwest`] client configured with a fixed
//! browser header set. Each instance keeps its own last-request marker, so
//! two engines fetching side by side pace themselves independently.
//!
//! Diagnostics flow through a caller-suppliable [`DiagnosticSink`] instead
//! of process-wide logger state; the default sink forwards events to
//! [`tracing`].

use crate::config::FinderConfig;
use crate::error::{FinderError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::thread;
use std::time::{Duration, Instant};

/// Fixed browser User-Agent sent when the config does not override it.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

/// A structured diagnostic event emitted during a fetch.
#[derive(Debug)]
pub enum FetchEvent<'a> {
    /// About to issue attempt `attempt` (0-based) of `max_attempts`.
    Attempt {
        url: &'a str,
        attempt: u32,
        max_attempts: u32,
    },
    /// Sleeping to honour the minimum inter-request spacing.
    RateLimited { wait: Duration },
    /// An attempt failed; `error` is the transport or status error text.
    Failed {
        url: &'a str,
        attempt: u32,
        error: &'a str,
    },
    /// Sleeping before the next retry attempt.
    Retrying { wait: Duration },
    /// The fetch succeeded with a body of `bytes` bytes.
    Succeeded { url: &'a str, bytes: usize },
}

/// Receiver for [`FetchEvent`]s.
///
/// Supplied at fetcher construction so callers decide where diagnostics go;
/// the crate never touches global logging state.
pub trait DiagnosticSink: Send {
    /// Handle one event. Called synchronously on the fetching thread.
    fn event(&mut self, event: &FetchEvent<'_>);
}

/// Default sink: maps fetch events onto `tracing` at conventional levels.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn event(&mut self, event: &FetchEvent<'_>) {
        match event {
            FetchEvent::Attempt {
                url,
                attempt,
                max_attempts,
            } => {
                tracing::debug!(url, attempt = attempt + 1, max_attempts, "fetching");
            }
            FetchEvent::RateLimited { wait } => {
                tracing::trace!(wait_ms = wait.as_millis() as u64, "rate limiting");
            }
            FetchEvent::Failed {
                url,
                attempt,
                error,
            } => {
                tracing::warn!(url, attempt = attempt + 1, error, "request failed");
            }
            FetchEvent::Retrying { wait } => {
                tracing::debug!(wait_ms = wait.as_millis() as u64, "retrying");
            }
            FetchEvent::Succeeded { url, bytes } => {
                tracing::debug!(url, bytes, "fetched");
            }
        }
    }
}

/// HTTP GET with timeout, retry/backoff and inter-request spacing.
pub struct Fetcher {
    client: reqwest::blocking::Client,
    delay: Duration,
    max_retries: u32,
    retry_base: Duration,
    last_request: Option<Instant>,
    sink: Box<dyn DiagnosticSink>,
}

impl Fetcher {
    /// Build a fetcher from config, reporting diagnostics via [`TracingSink`].
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Network`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &FinderConfig) -> Result<Self> {
        Self::with_sink(config, Box::new(TracingSink))
    }

    /// Build a fetcher that reports diagnostics through `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Network`] if the HTTP client cannot be
    /// constructed.
    pub fn with_sink(config: &FinderConfig, sink: Box<dyn DiagnosticSink>) -> Result<Self> {
        let ua = config.user_agent.as_deref().unwrap_or(USER_AGENT);

        let client = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(ua)
            .default_headers(browser_headers())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| FinderError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            delay: Duration::from_millis(config.request_delay_ms),
            max_retries: config.max_retries,
            retry_base: Duration::from_millis(config.retry_delay_ms),
            last_request: None,
            sink,
        })
    }

    /// Fetch `url`, returning the response body.
    ///
    /// Sleeps first if less than the configured spacing has elapsed since
    /// this fetcher's previous attempt. On a transport error or non-2xx
    /// status, retries up to the configured attempt count with exponential
    /// backoff (`retry_delay_ms * 2^attempt`), never sleeping after the
    /// final attempt or after success. The last-request marker advances on
    /// every attempt, so spacing holds across retries.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Network`] carrying the last underlying error
    /// once all attempts are exhausted.
    pub fn fetch(&mut self, url: &str) -> Result<String> {
        self.pace();

        let mut last_error = String::new();
        for attempt in 0..self.max_retries {
            self.sink.event(&FetchEvent::Attempt {
                url,
                attempt,
                max_attempts: self.max_retries,
            });
            self.last_request = Some(Instant::now());

            match self.try_get(url) {
                Ok(body) => {
                    self.sink.event(&FetchEvent::Succeeded {
                        url,
                        bytes: body.len(),
                    });
                    return Ok(body);
                }
                Err(error) => {
                    self.sink.event(&FetchEvent::Failed {
                        url,
                        attempt,
                        error: &error,
                    });
                    last_error = error;
                }
            }

            if attempt + 1 < self.max_retries {
                let wait = backoff_delay(self.retry_base, attempt);
                self.sink.event(&FetchEvent::Retrying { wait });
                thread::sleep(wait);
            }
        }

        Err(FinderError::Network(format!(
            "failed to fetch {url} after {} attempts: {last_error}",
            self.max_retries
        )))
    }

    /// One GET attempt: send, check status, read the body.
    fn try_get(&self, url: &str) -> std::result::Result<String, String> {
        self.client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(|e| e.to_string())
    }

    /// Sleep off whatever remains of the minimum inter-request spacing.
    fn pace(&mut self) {
        if let Some(previous) = self.last_request {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                let wait = self.delay - elapsed;
                self.sink.event(&FetchEvent::RateLimited { wait });
                thread::sleep(wait);
            }
        }
    }
}

/// Exponential backoff: `base * 2^attempt`, with `attempt` 0-based.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// The fixed header set sent with every request, beyond the User-Agent.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(
        "Upgrade-Insecure-Requests",
        HeaderValue::from_static("1"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Sink that records event kinds for assertions.
    struct RecordingSink(Arc<Mutex<Vec<String>>>);

    impl DiagnosticSink for RecordingSink {
        fn event(&mut self, event: &FetchEvent<'_>) {
            let kind = match event {
                FetchEvent::Attempt { .. } => "attempt",
                FetchEvent::RateLimited { .. } => "rate_limited",
                FetchEvent::Failed { .. } => "failed",
                FetchEvent::Retrying { .. } => "retrying",
                FetchEvent::Succeeded { .. } => "succeeded",
            };
            self.0.lock().expect("sink lock").push(kind.to_string());
        }
    }

    fn fast_config() -> FinderConfig {
        FinderConfig {
            timeout_seconds: 2,
            request_delay_ms: 0,
            max_retries: 2,
            retry_delay_ms: 1,
            ..Default::default()
        }
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let base = Duration::from_millis(2000);
        assert_eq!(backoff_delay(base, 0), Duration::from_millis(2000));
        assert_eq!(backoff_delay(base, 1), Duration::from_millis(4000));
        assert_eq!(backoff_delay(base, 2), Duration::from_millis(8000));
    }

    #[test]
    fn backoff_saturates_instead_of_overflowing() {
        let base = Duration::from_secs(u64::MAX / 2);
        let wait = backoff_delay(base, 10);
        assert!(wait >= base);
    }

    #[test]
    fn browser_headers_include_accept() {
        let headers = browser_headers();
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
        assert!(headers.contains_key("Upgrade-Insecure-Requests"));
    }

    #[test]
    fn fetcher_builds_with_default_config() {
        let fetcher = Fetcher::new(&FinderConfig::default());
        assert!(fetcher.is_ok());
    }

    #[test]
    fn fetcher_builds_with_custom_user_agent() {
        let config = FinderConfig {
            user_agent: Some("TestBot/1.0".into()),
            ..Default::default()
        };
        assert!(Fetcher::new(&config).is_ok());
    }

    #[test]
    fn unreachable_host_exhausts_retries_and_reports_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut fetcher = Fetcher::with_sink(
            &fast_config(),
            Box::new(RecordingSink(Arc::clone(&events))),
        )
        .expect("fetcher");

        // Reserved TEST-NET-1 address; connections fail fast.
        let result = fetcher.fetch("http://192.0.2.1:9/");
        assert!(matches!(result, Err(FinderError::Network(_))));

        let recorded = events.lock().expect("events lock").clone();
        assert_eq!(
            recorded.iter().filter(|k| k.as_str() == "attempt").count(),
            2
        );
        assert_eq!(
            recorded.iter().filter(|k| k.as_str() == "failed").count(),
            2
        );
        // One backoff sleep between the two attempts, none after the last.
        assert_eq!(
            recorded.iter().filter(|k| k.as_str() == "retrying").count(),
            1
        );
        assert!(!recorded.iter().any(|k| k == "succeeded"));
    }

    #[test]
    fn network_error_mentions_url_and_attempts() {
        let mut fetcher = Fetcher::new(&fast_config()).expect("fetcher");
        let err = fetcher.fetch("http://192.0.2.1:9/").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("192.0.2.1"), "missing url: {msg}");
        assert!(msg.contains("2 attempts"), "missing attempts: {msg}");
    }
}
