use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AtlasError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Rectangle {id} ({width}x{height} padded) exceeds the maximum page size {max}")]
    OversizedRectangle {
        id: String,
        width: u32,
        height: u32,
        max: u32,
    },
    #[error("Invalid request {id}: {reason}")]
    InvalidRequest { id: String, reason: String },
    #[error("Duplicate request id: {id}")]
    DuplicateId { id: String },
}

pub type Result<T> = std::result::Result<T, AtlasError>;
