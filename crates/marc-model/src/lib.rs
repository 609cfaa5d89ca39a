//! MARCXML record model shared by the ingest, transform, validate and output crates.

pub mod enums;
pub mod error;
pub mod processing;
pub mod record;

pub use enums::{
    FieldCategory, SubfieldCode, TAG_CORPORATE_NAME, TAG_DATE_CONTROL, TAG_EXTENT,
    TAG_GENERAL_NOTE, TAG_GENRE_FORM, TAG_HIERARCHICAL_PLACE, TAG_LOCATION, TAG_PROVENANCE,
    TAG_TAXONOMIC, TAG_TITLE, parse_indicator, parse_tag,
};
pub use error::ModelError;
pub use processing::{RecordFailure, RecordOutcome, RuleAction, RunReport, SkipReason};
pub use record::{ControlField, DataField, Field, Record, Subfield};
