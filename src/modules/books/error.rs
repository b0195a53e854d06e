use thiserror::Error;

/// Input rejected before any record is created or changed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("book name is required")]
    MissingName,

    #[error("readPage must not be greater than pageCount")]
    ReadPageExceedsPageCount,
}

impl ValidationError {
    /// Stable machine-readable code, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "missing_name",
            ValidationError::ReadPageExceedsPageCount => "read_page_exceeds_page_count",
        }
    }
}

/// Failure of a book store operation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("book '{0}' not found")]
    NotFound(String),
}
