//! Scripted fake [`Lister`] for integration tests.
//!
//! Wraps a real [`MemoryLister`] and lets a test make chosen prefixes fail,
//! while recording every prefix the engine asks for. Tracking the in-flight
//! count lets harnesses prove listings are never issued concurrently.
//!
//! # Example
//!
//! ```rust,no_run
//! let lister = FakeLister::from_paths(["a/b/foo", "c/d"]).fail_at("/c/");
//! let failure = kvsearch_core::search("", &lister).await.unwrap_err();
//! assert_eq!(lister.calls(), vec!["/", "/a/", "/a/b/", "/c/"]);
//! ```

use kvsearch_core::{Lister, MemoryLister};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Error returned for scripted failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("backend unavailable while listing {0}")]
pub struct BackendUnavailable(pub String);

pub struct FakeLister {
    inner: MemoryLister,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeLister {
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            inner: MemoryLister::from_paths(paths),
            failing: HashSet::new(),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Make listings of `prefix` fail with [`BackendUnavailable`].
    pub fn fail_at(mut self, prefix: &str) -> Self {
        self.failing.insert(prefix.to_string());
        self
    }

    pub fn memory(&self) -> &MemoryLister {
        &self.inner
    }

    /// Every prefix listed so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Highest number of listings observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Lister for FakeLister {
    type Error = BackendUnavailable;

    async fn list(&self, prefix: &str) -> Result<Vec<String>, BackendUnavailable> {
        self.calls.lock().unwrap().push(prefix.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Give any would-be concurrent caller a chance to overlap.
        tokio::task::yield_now().await;

        let result = if self.failing.contains(prefix) {
            Err(BackendUnavailable(prefix.to_string()))
        } else {
            match self.inner.list(prefix).await {
                Ok(entries) => Ok(entries),
                Err(never) => match never {},
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
