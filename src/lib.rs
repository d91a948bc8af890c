//! # mixfinder
//!
//! Fuzzy cocktail recipe search and ingredient scraping for Difford's
//! Guide.
//!
//! Given a cocktail name, this crate searches the catalog's full-text
//! search page, ranks the candidate recipes by fuzzy relevance,
//! disambiguates (automatically against a threshold, or via an
//! interactive paginated prompt), then fetches the chosen recipe page and
//! parses its ingredients table into a structured [`Recipe`].
//!
//! ## Design
//!
//! - Synchronous, blocking I/O throughout — one fetch at a time, with
//!   per-instance rate limiting and exponential retry backoff
//! - Tolerant HTML extraction: several known table/container shapes are
//!   tried in priority order
//! - Interactive selection is driven by an injectable [`Console`], so the
//!   pagination protocol is testable without a terminal
//! - Fetch diagnostics flow through a caller-suppliable sink; the crate
//!   never installs a global logger
//!
//! ## Example
//!
//! ```no_run
//! # fn example() -> mixfinder::Result<()> {
//! let config = mixfinder::FinderConfig::default();
//! if let Some(recipe) = mixfinder::find_recipe("Daiquiri", false, &config)? {
//!     for ingredient in &recipe.ingredients {
//!         println!("{ingredient}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod scrape;
pub mod search;
pub mod types;

pub use config::FinderConfig;
pub use error::{FinderError, Result};
pub use http::{DiagnosticSink, FetchEvent, Fetcher, TracingSink};
pub use scrape::{RecipeScraper, ScrapeHints};
pub use search::{Console, RecipeSearcher, StdConsole};
pub use types::{Ingredient, Recipe, SearchCandidate, Selection};

/// Resolve a cocktail name to a recipe URL and match confidence.
///
/// Runs the search half of the pipeline only. In interactive mode the
/// user is prompted on stdin/stdout; otherwise the top-ranked candidate
/// is accepted when it clears the configured threshold. Returns `None`
/// when nothing acceptable was found or the user cancelled.
///
/// # Errors
///
/// Returns [`FinderError::Network`] if the search page cannot be fetched
/// after retries, or [`FinderError::Config`] for an invalid config.
pub fn resolve_recipe_url(
    name: &str,
    interactive: bool,
    config: &FinderConfig,
) -> Result<Option<(String, f64)>> {
    let mut searcher = RecipeSearcher::new(config.clone())?;
    let mut console = StdConsole;
    let selection = searcher.resolve(name, interactive, &mut console)?;
    Ok(selection
        .into_candidate()
        .map(|candidate| (candidate.url, candidate.score)))
}

/// Full pipeline: resolve a cocktail name to a recipe page, scrape it,
/// and return the structured [`Recipe`].
///
/// Returns `None` when no acceptable match was found or the user
/// cancelled selection. The chosen candidate's title, the original
/// query, and the match confidence are threaded through to the recipe.
///
/// # Errors
///
/// Network failures from either stage propagate;
/// [`FinderError::StructureNotFound`] is returned when the chosen page
/// has no recognisable ingredients table.
///
/// # Examples
///
/// ```no_run
/// # fn example() -> mixfinder::Result<()> {
/// let config = mixfinder::FinderConfig::default();
/// let recipe = mixfinder::find_recipe("Old Fashioned", false, &config)?;
/// if let Some(recipe) = recipe {
///     println!("{} ({} ingredients)", recipe.name, recipe.ingredients.len());
/// }
/// # Ok(())
/// # }
/// ```
pub fn find_recipe(
    name: &str,
    interactive: bool,
    config: &FinderConfig,
) -> Result<Option<Recipe>> {
    let candidate = {
        let mut searcher = RecipeSearcher::new(config.clone())?;
        let mut console = StdConsole;
        match searcher.resolve(name, interactive, &mut console)?.into_candidate() {
            Some(c) => c,
            None => return Ok(None),
        }
        // searcher and its connection pool drop here, before the scraper
        // opens its own.
    };

    let mut scraper = RecipeScraper::new(config.clone())?;
    let hints = ScrapeHints {
        name: Some(candidate.title),
        search_query: Some(name.to_string()),
        match_confidence: candidate.score,
    };
    let recipe = scraper.scrape(&candidate.url, hints)?;
    Ok(Some(recipe))
}
