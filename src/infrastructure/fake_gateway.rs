use crate::domain::money::Money;
use crate::domain::order::OrderId;
use crate::domain::ports::PaymentGateway;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// A payment gateway stub that never talks to a real provider.
///
/// Each charge takes the next scripted outcome if one is queued, otherwise the
/// default outcome. Approved charges are recorded per order so tests can
/// inspect what was taken.
#[derive(Clone)]
pub struct FakePaymentGateway {
    always_succeed: bool,
    script: Arc<Mutex<VecDeque<bool>>>,
    payments: Arc<RwLock<HashMap<OrderId, Money>>>,
}

impl Default for FakePaymentGateway {
    fn default() -> Self {
        Self::approving()
    }
}

impl FakePaymentGateway {
    pub fn new(always_succeed: bool) -> Self {
        Self {
            always_succeed,
            script: Arc::default(),
            payments: Arc::default(),
        }
    }

    pub fn approving() -> Self {
        Self::new(true)
    }

    pub fn declining() -> Self {
        Self::new(false)
    }

    /// Queues outcomes for the next charges, consumed in order.
    pub fn scripted(outcomes: impl IntoIterator<Item = bool>, then: bool) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into_iter().collect())),
            ..Self::new(then)
        }
    }

    /// The amount charged for an order, if a charge was approved.
    pub async fn payment(&self, order_id: &OrderId) -> Option<Money> {
        self.payments.read().await.get(order_id).cloned()
    }

    pub async fn payment_count(&self) -> usize {
        self.payments.read().await.len()
    }
}

#[async_trait]
impl PaymentGateway for FakePaymentGateway {
    async fn charge(&self, order_id: &OrderId, amount: &Money) -> Result<bool> {
        let approved = self
            .script
            .lock()
            .await
            .pop_front()
            .unwrap_or(self.always_succeed);

        if approved {
            self.payments
                .write()
                .await
                .insert(order_id.clone(), amount.clone());
            tracing::debug!(%order_id, %amount, "charge approved");
        } else {
            tracing::debug!(%order_id, %amount, "charge declined");
        }
        Ok(approved)
    }
}
