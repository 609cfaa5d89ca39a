use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A structural change made by the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleAction {
    /// A placeholder extent field was appended.
    PlaceholderExtent,
    /// A title-part subfield was moved into a new general note.
    TitlePartRelocated { value: String },
    /// A general material designation subfield was deleted.
    MaterialDesignationRemoved { tag: String },
    /// A repeated extent subfield was moved into a new extent field.
    ExtentSplit { value: String },
    /// A parenthetical extent was moved into a new extent field.
    ParentheticalExtent { value: String },
    /// `undated` was appended to a title field.
    Undated,
    /// `fix circa date` was appended to a title field.
    CircaDate,
    /// A source-of-term subfield was appended.
    SourceAdded { tag: String },
    /// A field was removed for lacking a source.
    FieldDropped { tag: String },
}

impl RuleAction {
    /// Stable label used for summary counts.
    pub fn label(&self) -> &'static str {
        match self {
            RuleAction::PlaceholderExtent => "placeholder extent",
            RuleAction::TitlePartRelocated { .. } => "title part relocated",
            RuleAction::MaterialDesignationRemoved { .. } => "material designation removed",
            RuleAction::ExtentSplit { .. } => "extent split",
            RuleAction::ParentheticalExtent { .. } => "parenthetical extent",
            RuleAction::Undated => "undated",
            RuleAction::CircaDate => "fix circa date",
            RuleAction::SourceAdded { .. } => "source added",
            RuleAction::FieldDropped { .. } => "field dropped",
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleAction::TitlePartRelocated { value }
            | RuleAction::ExtentSplit { value }
            | RuleAction::ParentheticalExtent { value } => {
                write!(f, "{}: {value}", self.label())
            }
            RuleAction::MaterialDesignationRemoved { tag }
            | RuleAction::SourceAdded { tag }
            | RuleAction::FieldDropped { tag } => write!(f, "{} ({tag})", self.label()),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// Why a record was not emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The identifier is already present in the target system.
    AlreadyProcessed,
    /// The identifier does not start with the configured prefix.
    PrefixMismatch,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::AlreadyProcessed => "already processed",
            SkipReason::PrefixMismatch => "prefix mismatch",
        }
    }
}

/// A record that could not be written and needs manual reprocessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub index: usize,
    pub identifier: String,
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Result of processing one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordOutcome {
    Written { identifier: String, path: PathBuf },
    Skipped { identifier: String, reason: SkipReason },
    Failed(RecordFailure),
}

/// Totals for one batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub source: PathBuf,
    pub records_read: usize,
    pub written: Vec<PathBuf>,
    pub skipped: BTreeMap<String, usize>,
    pub failures: Vec<RecordFailure>,
    pub rule_counts: BTreeMap<String, usize>,
}

impl RunReport {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Fold one record's outcome and rule actions into the totals.
    pub fn record(&mut self, outcome: RecordOutcome, actions: &[RuleAction]) {
        self.records_read += 1;
        match outcome {
            RecordOutcome::Written { path, .. } => self.written.push(path),
            RecordOutcome::Skipped { reason, .. } => {
                *self.skipped.entry(reason.as_str().to_string()).or_default() += 1;
            }
            RecordOutcome::Failed(failure) => self.failures.push(failure),
        }
        for action in actions {
            *self.rule_counts.entry(action.label().to_string()).or_default() += 1;
        }
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
