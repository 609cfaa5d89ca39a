//! Output generation for normalized records.
//!
//! - **common**: namespaces and output directory helpers
//! - **document**: one record wrapped in the MARCXML collection envelope
//! - **sink**: where serialized documents go (a directory, or memory)

pub mod common;
pub mod document;
pub mod sink;

pub use common::{MARC_NS, SCHEMA_LOCATION, XSI_NS, ensure_output_dir, file_name_for};
pub use document::{render_record_document, write_record_document};
pub use sink::{DirectorySink, MemorySink, RecordSink, emit_record};
