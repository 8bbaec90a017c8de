use crate::domain::error::DomainError;
use crate::domain::money::Money;
use crate::domain::order::OrderId;
use thiserror::Error;

pub const PAYMENT_SUCCEEDED: &str = "payment completed successfully";

/// Why a payment attempt did not go through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentFailure {
    #[error("order not found")]
    OrderNotFound,
    /// The order itself refused the payment (already paid, empty, cancelled).
    #[error("{0}")]
    Rejected(DomainError),
    #[error("payment declined")]
    Declined,
}

/// Outcome of a single payment attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentResult {
    pub success: bool,
    pub order_id: OrderId,
    pub amount: Money,
    pub message: String,
    pub failure: Option<PaymentFailure>,
}

impl PaymentResult {
    pub fn succeeded(order_id: OrderId, amount: Money) -> Self {
        Self {
            success: true,
            order_id,
            amount,
            message: PAYMENT_SUCCEEDED.to_string(),
            failure: None,
        }
    }

    pub fn failed(order_id: OrderId, amount: Money, failure: PaymentFailure) -> Self {
        Self {
            success: false,
            order_id,
            amount,
            message: failure.to_string(),
            failure: Some(failure),
        }
    }
}
