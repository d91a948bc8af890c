//! Recipe scraping: fetch a recipe page and assemble a [`Recipe`] from
//! its ingredients table plus caller-supplied hints.

pub mod extract;

use crate::config::FinderConfig;
use crate::error::{FinderError, Result};
use crate::http::Fetcher;
use crate::types::Recipe;
use scraper::Html;

/// Caller-supplied context for a scrape: a known title, the originating
/// query, and the match confidence of the chosen candidate.
#[derive(Debug, Clone)]
pub struct ScrapeHints {
    /// Recipe title, when already known from search. Extracted from the
    /// page when `None`.
    pub name: Option<String>,
    /// The search query that led here, if any.
    pub search_query: Option<String>,
    /// Relevance score of the chosen candidate.
    pub match_confidence: f64,
}

impl Default for ScrapeHints {
    fn default() -> Self {
        Self {
            name: None,
            search_query: None,
            match_confidence: 1.0,
        }
    }
}

/// Scrapes recipe pages into structured [`Recipe`] values.
///
/// Owns its [`Fetcher`] with an independent rate-limit clock, so a
/// searcher and a scraper pace their requests separately.
pub struct RecipeScraper {
    fetcher: Fetcher,
}

impl RecipeScraper {
    /// Build a scraper, validating `config` first.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] for an invalid config and
    /// [`FinderError::Network`] if the HTTP client cannot be built.
    pub fn new(config: FinderConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = Fetcher::new(&config)?;
        Ok(Self { fetcher })
    }

    /// Fetch `url` and extract its recipe.
    ///
    /// # Errors
    ///
    /// A fetch failure is wrapped as [`FinderError::Scrape`] with the
    /// network error as its source. [`FinderError::StructureNotFound`]
    /// propagates as itself — the page was fetched fine but holds no
    /// recognisable ingredients table, so a retry cannot help.
    pub fn scrape(&mut self, url: &str, hints: ScrapeHints) -> Result<Recipe> {
        let html = self
            .fetcher
            .fetch(url)
            .map_err(|e| FinderError::scrape("failed to fetch recipe page", e))?;

        let document = Html::parse_document(&html);

        let name = hints
            .name
            .unwrap_or_else(|| extract::extract_title(&document));
        let ingredients = extract::extract_ingredients(&document)?;

        tracing::debug!(
            recipe = %name,
            ingredients = ingredients.len(),
            url,
            "recipe scraped"
        );

        Ok(Recipe::from_scrape(
            name,
            url.to_string(),
            ingredients,
            hints.search_query,
            hints.match_confidence,
        ))
    }
}
