//! Candidate extraction from a catalog search-results page.
//!
//! Finds recipe links, deduplicates by raw target path, derives a title
//! per link, scores each candidate against the query, and returns the
//! list ranked by descending relevance.

use crate::error::{FinderError, Result};
use crate::types::SearchCandidate;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use super::scoring::relevance;

/// Path fragment identifying recipe links on the search page.
const RECIPE_LINK_SELECTOR: &str = r#"a[href*="/cocktails/recipe/"]"#;

/// Fallback elements consulted when a link carries no text of its own.
const TITLE_FALLBACK_SELECTOR: &str = "h2, h3, h4, span, div";

/// Extract ranked search candidates from a search-results page.
///
/// Links are deduplicated by raw href before any title work: a repeated
/// target is skipped entirely, so the first occurrence supplies both the
/// title and the document position used for tie-breaking. Links yielding
/// no usable title are dropped. Relative hrefs are absolutised against
/// `base_url`.
///
/// The returned list is sorted by score descending; candidates with equal
/// scores keep their document order. An empty list is a valid outcome —
/// the caller decides whether that is [`FinderError::NoResults`].
///
/// # Errors
///
/// Returns [`FinderError::Parse`] if a selector cannot be built.
pub fn extract_candidates(
    html: &str,
    query: &str,
    base_url: &str,
) -> Result<Vec<SearchCandidate>> {
    let document = Html::parse_document(html);

    let link_sel = Selector::parse(RECIPE_LINK_SELECTOR)
        .map_err(|e| FinderError::Parse(format!("invalid link selector: {e:?}")))?;
    let fallback_sel = Selector::parse(TITLE_FALLBACK_SELECTOR)
        .map_err(|e| FinderError::Parse(format!("invalid title selector: {e:?}")))?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for link in document.select(&link_sel) {
        let href = match link.value().attr("href") {
            Some(h) if !h.is_empty() => h,
            _ => continue,
        };
        if !seen.insert(href.to_string()) {
            continue;
        }

        let title = match candidate_title(link, &fallback_sel) {
            Some(t) => t,
            None => continue,
        };

        let url = absolutise(href, base_url);
        let score = relevance(query, &title);
        candidates.push(SearchCandidate { title, url, score });
    }

    rank(&mut candidates);
    tracing::debug!(count = candidates.len(), "search candidates extracted");
    Ok(candidates)
}

/// Sort candidates by score descending. The sort is stable, so equal
/// scores preserve document order.
pub fn rank(candidates: &mut [SearchCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Title for one link: its own subtree text, falling back to the first
/// descendant heading/label-like element with non-empty text.
fn candidate_title(link: ElementRef<'_>, fallback: &Selector) -> Option<String> {
    let own = element_text(link);
    if !own.is_empty() {
        return Some(own);
    }
    link.select(fallback)
        .map(element_text)
        .find(|text| !text.is_empty())
}

/// Whitespace-normalised text of an element's subtree.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prefix the catalog origin onto relative hrefs.
fn absolutise(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}
