//! Domain-specific assertion macros for kvsearch harnesses.
//!
//! These add context-rich failure messages that make it clear *which* search
//! invariant was violated.

/// Last path segment of a full path, trailing separator removed.
pub fn last_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Assert that every result matched on its own last segment.
///
/// ```rust
/// assert_matched_on_last_segment!(results, "db");
/// ```
#[macro_export]
macro_rules! assert_matched_on_last_segment {
    ($results:expr, $keyword:expr) => {{
        let results: &[String] = &$results;
        let keyword: &str = $keyword;
        let failing: Vec<&String> = results
            .iter()
            .filter(|p| !$crate::common::last_segment(p).contains(keyword))
            .collect();
        if !failing.is_empty() {
            panic!(
                "assert_matched_on_last_segment! failed: {} of {} results do not contain {:?} in their last segment:\n  {:?}",
                failing.len(),
                results.len(),
                keyword,
                failing
            );
        }
    }};
}

/// Assert that no path appears twice in a result set.
#[macro_export]
macro_rules! assert_no_duplicates {
    ($results:expr) => {{
        let results: &[String] = &$results;
        let mut seen = std::collections::HashSet::new();
        for path in results {
            if !seen.insert(path) {
                panic!(
                    "assert_no_duplicates! failed: {:?} appears more than once in {:?}",
                    path, results
                );
            }
        }
    }};
}
