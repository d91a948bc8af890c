//! Core types for search candidates, selection outcomes and scraped recipes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single search result from the catalog, before selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// The recipe title as shown on the search page.
    pub title: String,
    /// Absolute URL of the recipe page.
    pub url: String,
    /// Relevance score against the originating query, in `[0, 1]`.
    pub score: f64,
}

/// The outcome of resolving a ranked candidate list to one choice.
///
/// Cancellation and "nothing good enough" are distinguished values, not
/// errors — the CLI layer maps them to their own exit statuses.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A candidate was chosen, automatically or by the user.
    Picked(SearchCandidate),
    /// No candidate met the acceptance threshold, or there were none.
    NoMatch,
    /// The user declined to choose, or the input source ran out.
    Cancelled,
}

impl Selection {
    /// The chosen candidate, if any.
    pub fn into_candidate(self) -> Option<SearchCandidate> {
        match self {
            Self::Picked(candidate) => Some(candidate),
            Self::NoMatch | Self::Cancelled => None,
        }
    }

    /// True when a candidate was chosen.
    pub fn is_picked(&self) -> bool {
        matches!(self, Self::Picked(_))
    }
}

/// One ingredient line of a recipe: a name with a measure/unit pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name, e.g. `"White rum"`.
    pub name: String,
    /// First whitespace token of the raw quantity, e.g. `"2"`.
    pub measure: String,
    /// Remainder of the raw quantity, e.g. `"oz"`. May be empty.
    pub unit: String,
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{} {}", self.measure, self.name)
        } else {
            write!(f, "{} {} {}", self.measure, self.unit, self.name)
        }
    }
}

/// A complete scraped recipe.
///
/// `ingredients` preserves source row order. Names are unique: when the
/// source repeats a name, the later row overwrites the earlier entry's
/// measure and unit in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe title, extracted from the page or supplied by the caller.
    pub name: String,
    /// The recipe page URL this was scraped from.
    pub url: String,
    /// Ordered ingredient entries.
    pub ingredients: Vec<Ingredient>,
    /// The query that led to this recipe, when it came from a search.
    pub search_query: Option<String>,
    /// Relevance score of the chosen candidate. 1.0 for direct URLs.
    pub match_confidence: f64,
    /// When the page was scraped.
    pub scraped_at: DateTime<Utc>,
}

impl Recipe {
    /// Assemble a recipe from extracted ingredients plus caller hints,
    /// stamping the scrape time.
    pub fn from_scrape(
        name: String,
        url: String,
        ingredients: Vec<Ingredient>,
        search_query: Option<String>,
        match_confidence: f64,
    ) -> Self {
        Self {
            name,
            url,
            ingredients,
            search_query,
            match_confidence,
            scraped_at: Utc::now(),
        }
    }

    /// Look up an ingredient by exact name.
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.name == name)
    }
}
