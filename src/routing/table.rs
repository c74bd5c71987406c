//! Redirect table: request path to target URL.
//!
//! # Design Decisions
//! - Built once per source, immutable afterwards
//! - Exact, case-sensitive path match (no prefix or pattern matching)
//! - Duplicate paths: last record wins

use std::collections::HashMap;

use crate::routing::record::RedirectRecord;

/// Mapping from request path to redirect target for one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectTable {
    entries: HashMap<String, String>,
}

impl RedirectTable {
    /// Fold records into a table. Later records overwrite earlier ones.
    pub fn build(records: impl IntoIterator<Item = RedirectRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| (record.path, record.url))
            .collect();
        Self { entries }
    }

    /// Stored target for `path`, exactly as decoded.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Target to redirect `path` to.
    ///
    /// An empty stored URL counts as no entry.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.get(path).filter(|url| !url.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<RedirectRecord> for RedirectTable {
    fn from_iter<I: IntoIterator<Item = RedirectRecord>>(iter: I) -> Self {
        Self::build(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let table = RedirectTable::build(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.lookup("/"), None);
    }

    #[test]
    fn test_last_record_wins() {
        let table = RedirectTable::build(vec![
            RedirectRecord::new("/a", "http://first"),
            RedirectRecord::new("/b", "http://b"),
            RedirectRecord::new("/a", "http://second"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/a"), Some("http://second"));
        assert_eq!(table.get("/b"), Some("http://b"));
    }

    #[test]
    fn test_exact_match_only() {
        let table: RedirectTable = vec![RedirectRecord::new("/docs", "http://d")]
            .into_iter()
            .collect();
        assert_eq!(table.lookup("/docs"), Some("http://d"));
        assert_eq!(table.lookup("/docs/"), None);
        assert_eq!(table.lookup("/DOCS"), None);
        assert_eq!(table.lookup("docs"), None);
    }

    #[test]
    fn test_empty_url_is_kept_but_not_redirected() {
        let table = RedirectTable::build(vec![RedirectRecord::new("/blank", "")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("/blank"), Some(""));
        assert_eq!(table.lookup("/blank"), None);
    }
}
