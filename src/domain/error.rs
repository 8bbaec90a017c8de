use super::order::LineId;
use thiserror::Error;

/// Validation and state errors raised by the order aggregate and its value objects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("amount cannot be negative or non-finite: {0}")]
    InvalidAmount(String),
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: String, found: String },
    #[error("amount overflow")]
    AmountOverflow,
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(u32),
    #[error("order line {0} not found")]
    LineNotFound(LineId),
    #[error("order is already paid")]
    OrderAlreadyPaid,
    #[error("cannot pay an empty order")]
    EmptyOrder,
    #[error("order is cancelled")]
    OrderCancelled,
}
