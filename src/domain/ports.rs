use super::money::Money;
use super::order::{Order, OrderId};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Lookup and persistence of orders by identifier.
///
/// `get_by_id` hands out a detached copy: changes to it are only visible to
/// other callers once passed back to `save`.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>>;
    async fn save(&self, order: Order) -> Result<()>;
}

/// A service able to charge money against an order.
///
/// `Ok(false)` means the charge was declined; `Err` is reserved for failures
/// of the gateway itself.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, order_id: &OrderId, amount: &Money) -> Result<bool>;
}

pub type OrderRepositoryRef = Arc<dyn OrderRepository>;
pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
