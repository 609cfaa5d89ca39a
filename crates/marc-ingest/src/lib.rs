//! Record source for the normalizer.
//!
//! - **reader**: streaming MARCXML reader yielding one [`marc_model::Record`] at a time
//! - **skip_list**: identifiers already present in the target system

pub mod error;
pub mod reader;
pub mod skip_list;

pub use error::{IngestError, Result};
pub use reader::MarcXmlReader;
pub use skip_list::{SkipList, load_skip_list};
