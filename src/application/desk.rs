use super::command::{CommandType, OrderCommand};
use super::pay_order::{OrderLocks, PayOrderUseCase};
use super::payment_result::PaymentResult;
use crate::domain::money::{DEFAULT_CURRENCY, Money};
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{OrderRepositoryRef, PaymentGatewayRef};
use crate::error::{AppError, Result};
use std::sync::Arc;

/// Applies a stream of order commands.
///
/// `add` creates the order on first use and appends a line, `cancel` cancels
/// an existing order and `pay` runs the payment use case. Orders are loaded
/// and saved through the repository for every command, so the desk keeps no
/// state of its own beyond the per-order locks it shares with the payment
/// use case.
pub struct OrderDesk {
    order_repository: OrderRepositoryRef,
    pay_order: PayOrderUseCase,
    locks: Arc<OrderLocks>,
}

impl OrderDesk {
    pub fn new(order_repository: OrderRepositoryRef, payment_gateway: PaymentGatewayRef) -> Self {
        let locks = Arc::new(OrderLocks::default());
        let pay_order =
            PayOrderUseCase::with_locks(order_repository.clone(), payment_gateway, locks.clone());
        Self {
            order_repository,
            pay_order,
            locks,
        }
    }

    /// Processes a single command. Only `pay` produces a result.
    pub async fn process_command(&self, command: OrderCommand) -> Result<Option<PaymentResult>> {
        match command.r#type {
            CommandType::Add => {
                self.add_line(command).await?;
                Ok(None)
            }
            CommandType::Cancel => {
                self.cancel(command.order).await?;
                Ok(None)
            }
            CommandType::Pay => Ok(Some(self.pay_order.execute(&command.order).await?)),
        }
    }

    async fn add_line(&self, command: OrderCommand) -> Result<()> {
        let product = command
            .product
            .filter(|product| !product.is_empty())
            .ok_or_else(|| missing_field("product"))?;
        let quantity = command.quantity.ok_or_else(|| missing_field("quantity"))?;
        let amount = command.price.ok_or_else(|| missing_field("price"))?;
        let currency = command
            .currency
            .filter(|currency| !currency.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let price = Money::new(amount, currency)?;

        let _guard = self.locks.acquire(&command.order).await;
        let mut order = self
            .order_repository
            .get_by_id(&command.order)
            .await?
            .unwrap_or_else(|| Order::with_id(command.order.clone()));
        order.add_line(product, quantity, price)?;
        self.order_repository.save(order).await
    }

    async fn cancel(&self, order_id: OrderId) -> Result<()> {
        let _guard = self.locks.acquire(&order_id).await;
        let Some(mut order) = self.order_repository.get_by_id(&order_id).await? else {
            return Err(AppError::UnknownOrder(order_id));
        };
        order.cancel()?;
        self.order_repository.save(order).await
    }
}

fn missing_field(field: &str) -> AppError {
    AppError::InvalidCommand(format!("add requires a {field}"))
}
