//! Identifiers already present in the target system.
//!
//! The list is a flat text file, one identifier per line. Lines are trimmed
//! and blank lines ignored.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipList {
    identifiers: BTreeSet<String>,
}

impl SkipList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a newline-separated identifier list.
    pub fn from_lines(contents: &str) -> Self {
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SkipList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            identifiers: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Load a skip list from disk.
pub fn load_skip_list(path: &Path) -> Result<SkipList> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::io(path, source))?;
    let list = SkipList::from_lines(&contents);
    debug!(path = %path.display(), identifiers = list.len(), "loaded skip list");
    Ok(list)
}
