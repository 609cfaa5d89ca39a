//! Record validation: identifier derivation and emission filtering.

mod acceptance;
mod error;
mod identifier;

pub use acceptance::{Acceptance, AcceptancePolicy};
pub use error::{Result, ValidateError};
pub use identifier::{SOURCE_CODE, TARGET_CODE, call_number, derive_identifier, resolve_identifier};

use marc_model::Record;
use tracing::debug;

/// Identifier and emission decision for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub identifier: String,
    pub acceptance: Acceptance,
}

/// Resolve the record's identifier and decide whether it is emitted.
///
/// A record without a call number cannot be named on disk, so it is an error
/// rather than a skip.
pub fn validate_record(
    record: &mut Record,
    index: usize,
    policy: &AcceptancePolicy,
) -> Result<Validation> {
    let identifier = resolve_identifier(record, index)?;
    let acceptance = policy.decide(&identifier);
    if let Acceptance::Skip(reason) = acceptance {
        debug!(identifier = %identifier, reason = reason.as_str(), "skipping record");
    }
    Ok(Validation {
        identifier,
        acceptance,
    })
}
