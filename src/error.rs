use crate::domain::error::DomainError;
use crate::domain::order::OrderId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
    #[error("Domain error: {0}")]
    DomainError(#[from] DomainError),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Unknown order: {0}")]
    UnknownOrder(OrderId),
    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, AppError>;
