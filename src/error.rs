//! Error types for the mixfinder crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. User cancellation is not an error — it is
//! modelled as [`crate::types::Selection::Cancelled`].

/// Errors that can occur while searching for or scraping a recipe.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// Transport error or non-success HTTP status after exhausting retries.
    #[error("network error: {0}")]
    Network(String),

    /// The search page yielded zero candidates. A normal negative outcome,
    /// not a failure: orchestration surfaces it as "no matches".
    #[error("no recipes found for '{0}'")]
    NoResults(String),

    /// None of the recognised ingredients table shapes is present on the
    /// page. Terminal — refetching would return the same markup.
    #[error("could not locate an ingredients table on the page")]
    StructureNotFound,

    /// A recipe page was fetched but could not be turned into a
    /// [`crate::types::Recipe`]. Preserves the original cause.
    #[error("scrape failed: {context}")]
    Scrape {
        /// What the scraper was doing when the failure occurred.
        context: String,
        /// The underlying failure.
        #[source]
        source: Box<FinderError>,
    },

    /// Failed to parse markup or build a selector.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid finder configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl FinderError {
    /// Wrap an error as a scrape failure with context.
    pub fn scrape(context: impl Into<String>, source: FinderError) -> Self {
        Self::Scrape {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// True for the "zero candidates" outcome, which orchestration treats
    /// as an empty result rather than a hard failure.
    pub fn is_no_results(&self) -> bool {
        matches!(self, Self::NoResults(_))
    }
}

/// Convenience type alias for mixfinder results.
pub type Result<T> = std::result::Result<T, FinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network() {
        let err = FinderError::Network("connection refused".into());
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[test]
    fn display_no_results() {
        let err = FinderError::NoResults("Daiquiri".into());
        assert_eq!(err.to_string(), "no recipes found for 'Daiquiri'");
    }

    #[test]
    fn display_structure_not_found() {
        let err = FinderError::StructureNotFound;
        assert_eq!(
            err.to_string(),
            "could not locate an ingredients table on the page"
        );
    }

    #[test]
    fn scrape_preserves_source() {
        use std::error::Error;
        let err = FinderError::scrape(
            "failed to fetch recipe page",
            FinderError::Network("timed out".into()),
        );
        assert_eq!(err.to_string(), "scrape failed: failed to fetch recipe page");
        let source = err.source().expect("scrape error should carry a source");
        assert_eq!(source.to_string(), "network error: timed out");
    }

    #[test]
    fn is_no_results_distinguishes_variants() {
        assert!(FinderError::NoResults("x".into()).is_no_results());
        assert!(!FinderError::Network("x".into()).is_no_results());
        assert!(!FinderError::StructureNotFound.is_no_results());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FinderError>();
    }
}
