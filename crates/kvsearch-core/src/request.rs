//! Request helper — turns a raw search keyword into a listing-style response.
//!
//! The keyword arrives as the tail of a wildcard path (`search/<keyword>`), so
//! it may carry stray separators. [`search_keys`] trims them, runs the engine,
//! and packages the matches as a [`ListResponse`] whether or not the search
//! completed.

use serde::{Deserialize, Serialize};

use crate::lister::{Lister, SEPARATOR};
use crate::search::{PathSearchEngine, SearchError};

/// One-line description of the search operation.
pub const HELP_SYNOPSIS: &str = "List all paths and keys that match the given keyword";

/// Longer description of the search operation.
pub const HELP_DESCRIPTION: &str = "Searches every folder of the key-value store, depth-first, \
and returns the full path of each folder or key whose own name contains the keyword.";

/// Listing-style response body. `keys` is omitted when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
}

impl ListResponse {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }
}

/// The response plus the error that cut the search short, if any. On error
/// `response.keys` holds the partial matches.
#[derive(Debug)]
pub struct SearchOutcome<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    pub response: ListResponse,
    pub error: Option<SearchError<E>>,
}

impl<E> SearchOutcome<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Convert to a `Result`, discarding partial matches on error.
    pub fn into_result(self) -> Result<ListResponse, SearchError<E>> {
        match self.error {
            None => Ok(self.response),
            Some(error) => Err(error),
        }
    }
}

/// Strip leading and trailing separators from a raw keyword.
pub fn normalize_keyword(raw: &str) -> &str {
    raw.trim_matches(SEPARATOR)
}

/// Trim `raw_keyword`, search `lister`, and shape the result as a response.
pub async fn search_keys<L>(
    engine: &PathSearchEngine,
    raw_keyword: &str,
    lister: &L,
) -> SearchOutcome<L::Error>
where
    L: Lister + ?Sized,
{
    let keyword = normalize_keyword(raw_keyword);
    match engine.search(keyword, lister).await {
        Ok(keys) => SearchOutcome {
            response: ListResponse::new(keys),
            error: None,
        },
        Err(failure) => {
            let (error, partial) = failure.into_parts();
            SearchOutcome {
                response: ListResponse::new(partial),
                error: Some(error),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
