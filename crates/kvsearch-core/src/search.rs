//! Search layer — keyword path search over a [`Lister`].
//!
//! The engine walks the hierarchy depth-first, starting at [`ROOT`], and
//! collects every full path whose last segment contains the keyword. Folder
//! entries are matched on their own name and then descended into before the
//! next sibling is visited, so results come out in traversal order.
//!
//! A listing failure at any depth ends the search. The failure carries the
//! matches gathered before the failing call; callers may show them next to the
//! error.

use crate::config::SearchConfig;
use crate::lister::{is_folder, Lister, ROOT, SEPARATOR};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a search stopped early.
#[derive(Debug, thiserror::Error)]
pub enum SearchError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// The lister failed. `source` is the lister's own error, untouched.
    #[error("listing {prefix:?} failed")]
    Listing {
        prefix: String,
        #[source]
        source: E,
    },
    /// Descending into `prefix` would exceed the configured depth ceiling.
    #[error("folder {prefix:?} is deeper than the limit of {limit} levels")]
    DepthLimit { prefix: String, limit: usize },
    /// Listing `prefix` would exceed the configured listing-call ceiling.
    #[error("listing {prefix:?} would exceed the limit of {limit} listing calls")]
    ListingLimit { prefix: String, limit: usize },
}

impl<E> SearchError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// The prefix that was being listed (or about to be) when the search stopped.
    pub fn prefix(&self) -> &str {
        match self {
            Self::Listing { prefix, .. }
            | Self::DepthLimit { prefix, .. }
            | Self::ListingLimit { prefix, .. } => prefix,
        }
    }
}

/// A failed search: the error plus every match found before it.
#[derive(Debug, thiserror::Error)]
#[error("search aborted after {} match(es): {error}", .partial.len())]
pub struct SearchFailure<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[source]
    pub error: SearchError<E>,
    pub partial: Vec<String>,
}

impl<E> SearchFailure<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// Split into the error and the partial matches.
    pub fn into_parts(self) -> (SearchError<E>, Vec<String>) {
        (self.error, self.partial)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Keyword path-search engine.
///
/// Stateless apart from its limits: every call to [`search`](Self::search)
/// works on a fresh accumulator, so one engine can serve concurrent searches.
#[derive(Debug, Clone, Default)]
pub struct PathSearchEngine {
    config: SearchConfig,
}

/// One level of the walk: the prefix that was listed and the entries still
/// to visit.
struct Frame {
    prefix: String,
    depth: usize,
    entries: std::vec::IntoIter<String>,
}

impl PathSearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Return every full path whose last segment contains `keyword`.
    ///
    /// Leading and trailing separators are trimmed from `keyword` first. The
    /// empty keyword matches every entry. Matching is a case-sensitive
    /// substring test. Listing calls are issued one at a time.
    #[tracing::instrument(level = "debug", skip(self, lister), fields(matches))]
    pub async fn search<L>(
        &self,
        keyword: &str,
        lister: &L,
    ) -> Result<Vec<String>, SearchFailure<L::Error>>
    where
        L: Lister + ?Sized,
    {
        let keyword = keyword.trim_matches(SEPARATOR);
        let mut matches = Vec::new();
        let mut listings = 0usize;

        let root = match self.list(lister, ROOT, &mut listings).await {
            Ok(entries) => entries,
            Err(error) => return Err(self.fail(error, matches)),
        };

        let mut stack = vec![Frame {
            prefix: ROOT.to_string(),
            depth: 0,
            entries: root.into_iter(),
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(entry) = frame.entries.next() else {
                stack.pop();
                continue;
            };

            let full_path = format!("{}{}", frame.prefix, entry);
            if entry.trim_end_matches(SEPARATOR).contains(keyword) {
                matches.push(full_path.clone());
            }

            if !is_folder(&entry) {
                continue;
            }

            let depth = frame.depth + 1;
            if let Some(limit) = self.config.max_depth {
                if depth > limit {
                    let error = SearchError::DepthLimit {
                        prefix: full_path,
                        limit,
                    };
                    return Err(self.fail(error, matches));
                }
            }

            match self.list(lister, &full_path, &mut listings).await {
                Ok(entries) => stack.push(Frame {
                    prefix: full_path,
                    depth,
                    entries: entries.into_iter(),
                }),
                Err(error) => return Err(self.fail(error, matches)),
            }
        }

        tracing::Span::current().record("matches", matches.len());
        tracing::debug!(listings, matches = matches.len(), "search complete");
        Ok(matches)
    }

    async fn list<L>(
        &self,
        lister: &L,
        prefix: &str,
        listings: &mut usize,
    ) -> Result<Vec<String>, SearchError<L::Error>>
    where
        L: Lister + ?Sized,
    {
        if let Some(limit) = self.config.max_listings {
            if *listings >= limit {
                return Err(SearchError::ListingLimit {
                    prefix: prefix.to_string(),
                    limit,
                });
            }
        }
        *listings += 1;

        let entries = lister
            .list(prefix)
            .await
            .map_err(|source| SearchError::Listing {
                prefix: prefix.to_string(),
                source,
            })?;
        tracing::debug!(prefix, entries = entries.len(), "listed");
        Ok(entries)
    }

    fn fail<E>(&self, error: SearchError<E>, partial: Vec<String>) -> SearchFailure<E>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        tracing::warn!(
            prefix = error.prefix(),
            partial = partial.len(),
            error = %error,
            "search aborted"
        );
        SearchFailure { error, partial }
    }
}

/// Search with an unlimited default engine.
pub async fn search<L>(keyword: &str, lister: &L) -> Result<Vec<String>, SearchFailure<L::Error>>
where
    L: Lister + ?Sized,
{
    PathSearchEngine::default().search(keyword, lister).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
