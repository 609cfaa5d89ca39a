//! Decide whether a record is emitted.

use marc_ingest::SkipList;
use marc_model::SkipReason;

/// Emission decision for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    Accept,
    Skip(SkipReason),
}

impl Acceptance {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Acceptance::Accept)
    }
}

/// Filters applied to derived identifiers.
///
/// With neither a prefix nor a skip list every record is accepted. When both
/// are configured a record must pass both.
#[derive(Debug, Clone, Default)]
pub struct AcceptancePolicy {
    skip_list: SkipList,
    prefix: Option<String>,
}

impl AcceptancePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_list(mut self, skip_list: SkipList) -> Self {
        self.skip_list = skip_list;
        self
    }

    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix.filter(|value| !value.is_empty());
        self
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn decide(&self, identifier: &str) -> Acceptance {
        if let Some(prefix) = &self.prefix
            && !identifier.starts_with(prefix.as_str())
        {
            return Acceptance::Skip(SkipReason::PrefixMismatch);
        }
        if self.skip_list.contains(identifier) {
            return Acceptance::Skip(SkipReason::AlreadyProcessed);
        }
        Acceptance::Accept
    }
}
