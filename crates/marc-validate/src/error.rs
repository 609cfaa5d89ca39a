use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("record {index} has no call number (852 $j)")]
    MissingIdentifier { index: usize },
    #[error("record {index} has an empty call number")]
    EmptyIdentifier { index: usize },
}

pub type Result<T> = std::result::Result<T, ValidateError>;
