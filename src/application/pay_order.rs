use super::payment_result::{PaymentFailure, PaymentResult};
use crate::domain::money::{DEFAULT_CURRENCY, Money};
use crate::domain::order::OrderId;
use crate::domain::ports::{OrderRepositoryRef, PaymentGatewayRef};
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, warn};

/// Pays an order: load it, let the aggregate accept the payment, charge the
/// gateway and persist the paid order.
///
/// Business outcomes (unknown order, order refusing payment, declined charge)
/// come back as a failed `PaymentResult`. Errors from the repository or the
/// gateway, and validation errors from a corrupted stored order, are returned
/// as `Err`.
///
/// A declined charge leaves the stored order untouched: the paid copy is
/// dropped instead of saved, so the order stays `New` and can be paid later.
pub struct PayOrderUseCase {
    order_repository: OrderRepositoryRef,
    payment_gateway: PaymentGatewayRef,
    locks: Arc<OrderLocks>,
}

impl PayOrderUseCase {
    pub fn new(order_repository: OrderRepositoryRef, payment_gateway: PaymentGatewayRef) -> Self {
        Self::with_locks(order_repository, payment_gateway, Arc::default())
    }

    /// Builds the use case on a lock set shared with other writers of the
    /// same repository, so they never interleave with a payment.
    pub fn with_locks(
        order_repository: OrderRepositoryRef,
        payment_gateway: PaymentGatewayRef,
        locks: Arc<OrderLocks>,
    ) -> Self {
        Self {
            order_repository,
            payment_gateway,
            locks,
        }
    }

    #[tracing::instrument(skip_all, fields(order_id = %order_id))]
    pub async fn execute(&self, order_id: &OrderId) -> Result<PaymentResult> {
        let _guard = self.locks.acquire(order_id).await;

        let Some(mut order) = self.order_repository.get_by_id(order_id).await? else {
            info!("order not found");
            return Ok(PaymentResult::failed(
                order_id.clone(),
                Money::zero(DEFAULT_CURRENCY),
                PaymentFailure::OrderNotFound,
            ));
        };

        let amount = order.total()?;
        if let Err(err) = order.pay() {
            info!(%err, "order refused payment");
            return Ok(PaymentResult::failed(
                order_id.clone(),
                amount,
                PaymentFailure::Rejected(err),
            ));
        }

        if !self.payment_gateway.charge(order_id, &amount).await? {
            warn!(%amount, "payment declined, order left unpaid");
            return Ok(PaymentResult::failed(
                order_id.clone(),
                amount,
                PaymentFailure::Declined,
            ));
        }

        self.order_repository.save(order).await?;
        info!(%amount, "order paid");
        Ok(PaymentResult::succeeded(order_id.clone(), amount))
    }
}

/// One async mutex per order id. Whoever holds the guard owns the order's
/// read-modify-save cycle until the guard is dropped.
#[derive(Default)]
pub struct OrderLocks {
    locks: Mutex<HashMap<OrderId, Arc<Mutex<()>>>>,
}

impl OrderLocks {
    pub async fn acquire(&self, order_id: &OrderId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Only the map holds idle locks.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(order_id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
