//! kvsearch-core — keyword path search over hierarchical key-value stores.
//!
//! This crate holds the search engine and the narrow listing capability it
//! consumes, plus the configuration and request helpers shared with the CLI.
//!
//! # Architecture
//!
//! ```text
//! keyword ──► request ──► search ──► Lister::list(prefix) ──► store
//!                            │
//!                            └──► ListResponse { keys }
//! ```
//!
//! The engine never touches storage directly; everything it knows about the
//! store comes through [`Lister`].

pub mod config;
pub mod lister;
pub mod request;
pub mod search;

pub use lister::{Lister, MemoryLister, ROOT, SEPARATOR};
pub use request::{normalize_keyword, search_keys, ListResponse, SearchOutcome};
pub use search::{search, PathSearchEngine, SearchError, SearchFailure};
