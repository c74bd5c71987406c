//! Redirect record linting.
//!
//! # Responsibilities
//! - Flag records that can never match or never redirect
//! - Flag targets that are neither absolute URLs nor absolute paths
//! - Flag duplicate paths within one source
//!
//! # Design Decisions
//! - Issues are reported, never enforced: the table keeps every record
//! - Returns all issues, not just the first

use std::collections::HashSet;
use std::fmt;

use crate::routing::RedirectRecord;

/// A suspicious record, identified by its position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub index: usize,
    pub path: String,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Request paths always start with `/`.
    PathNotAbsolute,
    /// Empty targets never redirect.
    EmptyUrl,
    InvalidUrl(String),
    /// An earlier record with the same path is shadowed.
    DuplicatePath,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {} ({}): ", self.index, self.path)?;
        match &self.kind {
            IssueKind::PathNotAbsolute => {
                write!(f, "path does not start with '/' and will never match")
            }
            IssueKind::EmptyUrl => write!(f, "empty url, requests will fall through"),
            IssueKind::InvalidUrl(reason) => write!(f, "url is not absolute: {}", reason),
            IssueKind::DuplicatePath => write!(f, "duplicate path, overrides an earlier record"),
        }
    }
}

/// Inspect decoded records for likely mistakes.
pub fn lint_records(records: &[RedirectRecord]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let mut push = |kind| {
            issues.push(ValidationIssue {
                index,
                path: record.path.clone(),
                kind,
            })
        };

        if !record.path.starts_with('/') {
            push(IssueKind::PathNotAbsolute);
        }

        if record.url.is_empty() {
            push(IssueKind::EmptyUrl);
        } else if !record.url.starts_with('/') {
            if let Err(e) = url::Url::parse(&record.url) {
                push(IssueKind::InvalidUrl(e.to_string()));
            }
        }

        if !seen.insert(record.path.as_str()) {
            push(IssueKind::DuplicatePath);
        }
    }

    issues
}
