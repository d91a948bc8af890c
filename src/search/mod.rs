//! Recipe search: fetch the catalog search page, extract and rank
//! candidates, and resolve one choice automatically or interactively.

pub mod extract;
pub mod scoring;
pub mod select;

use crate::config::FinderConfig;
use crate::error::{FinderError, Result};
use crate::http::Fetcher;
use crate::types::{SearchCandidate, Selection};
use url::Url;

pub use select::{Console, StdConsole};

/// Searches the catalog for recipes by name.
///
/// Owns its [`Fetcher`] (and with it an HTTP connection pool and
/// rate-limit clock); two searcher instances never share state.
pub struct RecipeSearcher {
    fetcher: Fetcher,
    config: FinderConfig,
}

impl RecipeSearcher {
    /// Build a searcher, validating `config` first.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] for an invalid config and
    /// [`FinderError::Network`] if the HTTP client cannot be built.
    pub fn new(config: FinderConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = Fetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }

    /// Search the catalog, returning ranked candidates (best first),
    /// truncated to the configured maximum.
    ///
    /// # Errors
    ///
    /// [`FinderError::NoResults`] when the search page yields zero
    /// candidates; [`FinderError::Network`] when the fetch fails after
    /// retries.
    pub fn search(&mut self, name: &str) -> Result<Vec<SearchCandidate>> {
        tracing::trace!(query = name, "searching catalog");

        let search_url = self.search_url(name)?;
        let html = self.fetcher.fetch(search_url.as_str())?;

        let mut candidates = extract::extract_candidates(&html, name, &self.config.base_url)?;
        if candidates.is_empty() {
            return Err(FinderError::NoResults(name.to_string()));
        }

        candidates.truncate(self.config.max_results);
        tracing::debug!(query = name, count = candidates.len(), "search complete");
        Ok(candidates)
    }

    /// Automatic resolution: the top-ranked candidate when its score
    /// clears the configured threshold.
    ///
    /// A [`FinderError::NoResults`] outcome maps to
    /// [`Selection::NoMatch`]; network failures still propagate.
    pub fn find_best_match(&mut self, name: &str) -> Result<Selection> {
        let candidates = match self.search(name) {
            Ok(c) => c,
            Err(e) if e.is_no_results() => return Ok(Selection::NoMatch),
            Err(e) => return Err(e),
        };
        Ok(select::find_best_match(
            &candidates,
            self.config.match_threshold,
        ))
    }

    /// Interactive resolution: an exact title match short-circuits the
    /// prompt; otherwise the user picks from paginated candidates.
    ///
    /// A [`FinderError::NoResults`] outcome is reported on the console
    /// and maps to [`Selection::NoMatch`]; network failures propagate.
    pub fn interactive_search(
        &mut self,
        name: &str,
        console: &mut dyn Console,
    ) -> Result<Selection> {
        let candidates = match self.search(name) {
            Ok(c) => c,
            Err(e) if e.is_no_results() => {
                console.show(&format!("No cocktails found for '{name}'"));
                return Ok(Selection::NoMatch);
            }
            Err(e) => return Err(e),
        };

        if let Some(exact) = exact_match(&candidates, name) {
            return Ok(Selection::Picked(exact.clone()));
        }

        console.show(&format!("\nMultiple cocktails found for '{name}':"));
        Ok(select::select_interactively(
            &candidates,
            self.config.page_size,
            console,
        ))
    }

    /// Resolve a query to one candidate, dispatching on mode.
    pub fn resolve(
        &mut self,
        name: &str,
        interactive: bool,
        console: &mut dyn Console,
    ) -> Result<Selection> {
        if interactive {
            self.interactive_search(name, console)
        } else {
            self.find_best_match(name)
        }
    }

    /// Build `<base>/search?q=<name>` with percent-encoding.
    fn search_url(&self, name: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| FinderError::Config(format!("invalid base_url: {e}")))?;
        url.set_path("/search");
        url.query_pairs_mut().append_pair("q", name);
        Ok(url)
    }
}

/// First candidate whose trimmed, lowercased title equals the query.
fn exact_match<'a>(candidates: &'a [SearchCandidate], query: &str) -> Option<&'a SearchCandidate> {
    let wanted = query.trim().to_lowercase();
    candidates
        .iter()
        .find(|c| c.title.trim().to_lowercase() == wanted)
}
