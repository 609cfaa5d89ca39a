use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid field tag {tag:?}: expected three ASCII alphanumeric characters")]
    InvalidTag { tag: String },
    #[error("invalid subfield code {code:?}: expected a single character")]
    InvalidSubfieldCode { code: String },
    #[error("invalid indicator {value:?}: expected at most one character")]
    InvalidIndicator { value: String },
}
