//! Call number lookup and output identifier derivation.

use marc_model::{Record, SubfieldCode, TAG_LOCATION};

use crate::error::{Result, ValidateError};

/// Subfield holding the call number in the export.
pub const SOURCE_CODE: SubfieldCode = SubfieldCode::J;
/// Subfield the target system reads the call number from.
pub const TARGET_CODE: SubfieldCode = SubfieldCode::K;

/// Derive the output identifier from a raw call number.
///
/// Trailing periods are stripped first, then colons become hyphens.
///
/// # Examples
///
/// ```
/// use marc_validate::derive_identifier;
///
/// assert_eq!(derive_identifier("MS. 100:1."), "MS. 100-1");
/// assert_eq!(derive_identifier("MS 100"), "MS 100");
/// ```
pub fn derive_identifier(raw: &str) -> String {
    raw.trim_end_matches('.').replace(':', "-")
}

/// The raw call number, if the record has one.
pub fn call_number(record: &Record) -> Option<&str> {
    record.subfield_value(TAG_LOCATION, SOURCE_CODE)
}

/// Locate the call number, move it to the target subfield code and rewrite it
/// to the derived identifier, which is returned.
pub fn resolve_identifier(record: &mut Record, index: usize) -> Result<String> {
    let subfield = record
        .subfield_mut(TAG_LOCATION, SOURCE_CODE)
        .ok_or(ValidateError::MissingIdentifier { index })?;
    let identifier = derive_identifier(&subfield.value);
    if identifier.trim().is_empty() {
        return Err(ValidateError::EmptyIdentifier { index });
    }
    subfield.code = TARGET_CODE;
    subfield.value = identifier.clone();
    Ok(identifier)
}
