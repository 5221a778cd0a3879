//! Listing abstraction — the only capability the search engine needs from a
//! key-value store.
//!
//! A [`Lister`] enumerates the direct children of a prefix. Entries that
//! denote further sub-folders end with [`SEPARATOR`]; leaf entries do not.
//! [`MemoryLister`] is an in-memory implementation over a flat set of key
//! paths, used by the CLI and the test harnesses.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::future::Future;

use tokio::sync::RwLock;

/// Path separator. A trailing separator marks a folder entry.
pub const SEPARATOR: char = '/';

/// The root prefix every search starts from.
pub const ROOT: &str = "/";

/// One-level listing over a hierarchical store.
///
/// Implementations must return only the direct children of `prefix`, suffix
/// folder entries with [`SEPARATOR`], and return an empty vector (not an
/// error) when the prefix has no children. Errors are opaque to the engine and
/// are handed back to the caller unchanged. Implementations must not retry
/// internally.
pub trait Lister: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn list(&self, prefix: &str) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}

/// Returns `true` when `entry` names a sub-folder.
pub fn is_folder(entry: &str) -> bool {
    entry.ends_with(SEPARATOR)
}

// ---------------------------------------------------------------------------
// MemoryLister
// ---------------------------------------------------------------------------

/// In-memory [`Lister`] over a set of leaf key paths such as `a/b/foo`.
///
/// Folders are implied by the paths: `a/b/foo` makes `a/` visible at the
/// root and `b/` under `/a/`. Removing the last key under a folder makes the
/// folder disappear from subsequent listings.
#[derive(Debug, Default)]
pub struct MemoryLister {
    keys: RwLock<BTreeSet<String>>,
}

impl MemoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lister from key paths. Leading separators are ignored and
    /// empty paths are skipped.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = paths
            .into_iter()
            .filter_map(|p| normalize_key(p.as_ref()))
            .collect();
        Self {
            keys: RwLock::new(keys),
        }
    }

    /// Insert a leaf key. Returns `false` if it was already present or the
    /// path is empty.
    pub async fn insert(&self, path: &str) -> bool {
        match normalize_key(path) {
            Some(key) => self.keys.write().await.insert(key),
            None => false,
        }
    }

    /// Remove a leaf key. Returns `true` if it was present.
    pub async fn remove(&self, path: &str) -> bool {
        match normalize_key(path) {
            Some(key) => self.keys.write().await.remove(&key),
            None => false,
        }
    }

    /// Number of leaf keys held.
    pub async fn len(&self) -> usize {
        self.keys.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keys.read().await.is_empty()
    }
}

impl Lister for MemoryLister {
    type Error = Infallible;

    async fn list(&self, prefix: &str) -> Result<Vec<String>, Infallible> {
        let prefix = prefix.trim_start_matches(SEPARATOR);
        let keys = self.keys.read().await;

        let mut children: Vec<String> = Vec::new();
        for key in keys.range(prefix.to_string()..) {
            let Some(rest) = key.strip_prefix(prefix) else {
                break;
            };
            if rest.is_empty() {
                continue;
            }
            let child = match rest.find(SEPARATOR) {
                Some(idx) => &rest[..=idx],
                None => rest,
            };
            // Keys under one folder are contiguous in the set, so a folder
            // only ever repeats its immediate predecessor.
            if children.last().map(String::as_str) != Some(child) {
                children.push(child.to_string());
            }
        }
        Ok(children)
    }
}

fn normalize_key(path: &str) -> Option<String> {
    let key = path.trim().trim_start_matches(SEPARATOR);
    if key.is_empty() || key.ends_with(SEPARATOR) {
        None
    } else {
        Some(key.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
