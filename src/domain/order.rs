use super::error::DomainError;
use super::money::{DEFAULT_CURRENCY, Money};
use super::order_line::OrderLine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of an order. Generated orders carry a UUID, but any
/// caller-supplied reference is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a line within its order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(Uuid);

impl LineId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Paid,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::New => "new",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Aggregate root for a customer order.
///
/// All changes go through the methods below, which enforce the order's
/// lifecycle: lines can be edited while the order is not paid, `pay` moves a
/// non-empty `New` order to `Paid`, and `cancel` moves any unpaid order to
/// `Cancelled`. A paid order is frozen.
///
/// Every line shares the currency of the first line added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrderRecord")]
pub struct Order {
    id: OrderId,
    lines: Vec<OrderLine>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Unvalidated shape used when reading an `Order` back from storage.
#[derive(Deserialize)]
struct OrderRecord {
    id: OrderId,
    lines: Vec<OrderLine>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = DomainError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        if let Some((first, rest)) = record.lines.split_first() {
            for line in rest {
                first.price().ensure_same_currency(line.price())?;
            }
        }
        Ok(Self {
            id: record.id,
            lines: record.lines,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl Order {
    /// Creates an empty `New` order with a generated identifier.
    pub fn new() -> Self {
        Self::with_id(OrderId::generate())
    }

    pub fn with_id(id: OrderId) -> Self {
        let now = Utc::now();
        Self {
            id,
            lines: Vec::new(),
            status: OrderStatus::New,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sum of all line totals. An order without lines totals zero in the
    /// default currency.
    pub fn total(&self) -> Result<Money, DomainError> {
        let Some(first) = self.lines.first() else {
            return Ok(Money::zero(DEFAULT_CURRENCY));
        };

        let mut total = Money::zero(first.price().currency());
        for line in &self.lines {
            total = total.add(&line.total()?)?;
        }
        Ok(total)
    }

    /// Appends a line and returns its new identifier.
    ///
    /// Nothing changes when the line is rejected.
    pub fn add_line(
        &mut self,
        product_id: impl Into<String>,
        quantity: u32,
        price: Money,
    ) -> Result<LineId, DomainError> {
        self.ensure_not_paid()?;
        if let Some(first) = self.lines.first() {
            first.price().ensure_same_currency(&price)?;
        }

        let mut line = OrderLine::new(product_id, quantity, price)?;
        let id = LineId::generate();
        line.assign_id(id);
        self.lines.push(line);
        self.touch();
        Ok(id)
    }

    /// Removes the line with the given id. Unknown ids are ignored.
    pub fn remove_line(&mut self, line_id: &LineId) -> Result<(), DomainError> {
        self.ensure_not_paid()?;
        self.lines.retain(|line| line.id() != Some(line_id));
        self.touch();
        Ok(())
    }

    pub fn change_line_quantity(
        &mut self,
        line_id: &LineId,
        quantity: u32,
    ) -> Result<(), DomainError> {
        self.ensure_not_paid()?;
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id() == Some(line_id))
            .ok_or(DomainError::LineNotFound(*line_id))?;
        line.change_quantity(quantity)?;
        self.touch();
        Ok(())
    }

    /// Marks the order as paid. This is the only place that decides whether an
    /// order may be paid.
    pub fn pay(&mut self) -> Result<(), DomainError> {
        self.ensure_not_paid()?;
        if self.status == OrderStatus::Cancelled {
            return Err(DomainError::OrderCancelled);
        }
        if self.lines.is_empty() {
            return Err(DomainError::EmptyOrder);
        }

        self.status = OrderStatus::Paid;
        self.touch();
        Ok(())
    }

    /// Cancels an unpaid order. Cancelling twice is allowed.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.ensure_not_paid()?;
        self.status = OrderStatus::Cancelled;
        self.touch();
        Ok(())
    }

    fn ensure_not_paid(&self) -> Result<(), DomainError> {
        if self.status == OrderStatus::Paid {
            Err(DomainError::OrderAlreadyPaid)
        } else {
            Ok(())
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::usd(amount).unwrap()
    }

    #[test]
    fn test_create_order() {
        let order = Order::new();
        assert_eq!(order.status(), OrderStatus::New);
        assert!(order.lines().is_empty());
        assert_eq!(order.created_at(), order.updated_at());
        assert_eq!(order.total().unwrap(), Money::zero("USD"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(Order::new().id(), Order::new().id());
    }

    #[test]
    fn test_add_line_to_order() {
        let mut order = Order::new();
        let line_id = order.add_line("prod_1", 2, usd(dec!(100))).unwrap();

        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.lines()[0].id(), Some(&line_id));
        assert_eq!(order.total().unwrap().amount(), dec!(200));
        assert!(order.updated_at() >= order.created_at());
    }

    #[test]
    fn test_order_total_calculation() {
        let mut order = Order::new();
        order.add_line("prod_1", 2, usd(dec!(100))).unwrap();
        order.add_line("prod_2", 3, usd(dec!(50))).unwrap();
        order.add_line("prod_3", 1, usd(dec!(75))).unwrap();

        assert_eq!(order.total().unwrap(), usd(dec!(425)));
    }

    #[test]
    fn test_total_keeps_line_currency() {
        let mut order = Order::new();
        order
            .add_line("prod_1", 2, Money::new(dec!(10), "EUR").unwrap())
            .unwrap();
        assert_eq!(order.total().unwrap(), Money::new(dec!(20), "EUR").unwrap());
    }

    #[test]
    fn test_mixed_currency_line_rejected_atomically() {
        let mut order = Order::new();
        order.add_line("prod_1", 1, usd(dec!(100))).unwrap();
        let before = order.clone();

        let result = order.add_line("prod_2", 1, Money::new(dec!(5), "EUR").unwrap());

        assert!(matches!(result, Err(DomainError::CurrencyMismatch { .. })));
        assert_eq!(order, before);
    }

    #[test]
    fn test_zero_quantity_line_rejected_atomically() {
        let mut order = Order::new();
        let before = order.clone();
        assert_eq!(
            order.add_line("prod_1", 0, usd(dec!(1))),
            Err(DomainError::InvalidQuantity(0))
        );
        assert_eq!(order, before);
    }

    #[test]
    fn test_remove_line() {
        let mut order = Order::new();
        let keep = order.add_line("prod_1", 1, usd(dec!(10))).unwrap();
        let drop = order.add_line("prod_2", 1, usd(dec!(20))).unwrap();

        order.remove_line(&drop).unwrap();

        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.lines()[0].id(), Some(&keep));
    }

    #[test]
    fn test_remove_unknown_line_is_noop() {
        let mut order = Order::new();
        order.add_line("prod_1", 1, usd(dec!(10))).unwrap();
        let mut other = Order::new();
        let foreign = other.add_line("prod_9", 1, usd(dec!(1))).unwrap();

        order.remove_line(&foreign).unwrap();
        assert_eq!(order.lines().len(), 1);
    }

    #[test]
    fn test_change_line_quantity() {
        let mut order = Order::new();
        let line_id = order.add_line("prod_1", 1, usd(dec!(10))).unwrap();

        order.change_line_quantity(&line_id, 4).unwrap();
        assert_eq!(order.total().unwrap().amount(), dec!(40));

        assert_eq!(
            order.change_line_quantity(&line_id, 0),
            Err(DomainError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_change_quantity_of_unknown_line() {
        let mut order = Order::new();
        let mut other = Order::new();
        let foreign = other.add_line("prod_9", 1, usd(dec!(1))).unwrap();

        assert_eq!(
            order.change_line_quantity(&foreign, 2),
            Err(DomainError::LineNotFound(foreign))
        );
    }

    #[test]
    fn test_cannot_pay_empty_order() {
        let mut order = Order::new();
        let err = order.pay().unwrap_err();
        assert_eq!(err, DomainError::EmptyOrder);
        assert_eq!(err.to_string(), "cannot pay an empty order");
        assert_eq!(order.status(), OrderStatus::New);
    }

    #[test]
    fn test_cannot_pay_already_paid_order() {
        let mut order = Order::new();
        order.add_line("prod_1", 1, usd(dec!(100))).unwrap();
        order.pay().unwrap();

        let err = order.pay().unwrap_err();
        assert_eq!(err, DomainError::OrderAlreadyPaid);
        assert!(err.to_string().contains("already paid"));
    }

    #[test]
    fn test_paid_order_is_frozen() {
        let mut order = Order::new();
        let line_id = order.add_line("prod_1", 2, usd(dec!(100))).unwrap();
        order.pay().unwrap();
        let before = order.clone();

        assert_eq!(
            order.add_line("prod_2", 1, usd(dec!(1))),
            Err(DomainError::OrderAlreadyPaid)
        );
        assert_eq!(
            order.remove_line(&line_id),
            Err(DomainError::OrderAlreadyPaid)
        );
        assert_eq!(
            order.change_line_quantity(&line_id, 3),
            Err(DomainError::OrderAlreadyPaid)
        );
        assert_eq!(order.cancel(), Err(DomainError::OrderAlreadyPaid));
        assert_eq!(order, before);
    }

    #[test]
    fn test_paid_order_rejects_foreign_currency_as_already_paid() {
        let mut order = Order::new();
        order.add_line("prod_1", 1, usd(dec!(1))).unwrap();
        order.pay().unwrap();
        assert_eq!(
            order.add_line("prod_2", 1, Money::new(dec!(1), "EUR").unwrap()),
            Err(DomainError::OrderAlreadyPaid)
        );
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut order = Order::new();
        order.cancel().unwrap();
        order.cancel().unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancelled_order_cannot_be_paid() {
        let mut order = Order::new();
        order.add_line("prod_1", 1, usd(dec!(1))).unwrap();
        order.cancel().unwrap();
        assert_eq!(order.pay(), Err(DomainError::OrderCancelled));
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_order_serialization_round_trip() {
        let mut order = Order::with_id(OrderId::from("A-1"));
        order.add_line("prod_1", 2, usd(dec!(9.99))).unwrap();
        order.pay().unwrap();

        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains(r#""status":"paid""#));
        let restored: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, order);
    }

    #[test]
    fn test_total_reports_mixed_currencies() {
        let mut order = Order::new();
        order.add_line("prod_1", 1, usd(dec!(10))).unwrap();
        order
            .lines
            .push(OrderLine::new("prod_2", 1, Money::new(dec!(5), "EUR").unwrap()).unwrap());

        assert_eq!(
            order.total(),
            Err(DomainError::CurrencyMismatch {
                expected: "USD".to_string(),
                found: "EUR".to_string(),
            })
        );
    }

    #[test]
    fn test_stored_order_with_mixed_currencies_is_rejected() {
        let mut order = Order::with_id(OrderId::from("A-1"));
        order.add_line("prod_1", 1, usd(dec!(10))).unwrap();
        order.add_line("prod_2", 2, usd(dec!(5))).unwrap();

        let mut stored = serde_json::to_value(&order).unwrap();
        stored["lines"][1]["price"]["currency"] = serde_json::json!("EUR");

        let err = serde_json::from_value::<Order>(stored).unwrap_err();
        assert!(err.to_string().contains("currency mismatch"), "{err}");
    }

    #[test]
    fn test_stored_order_with_zero_quantity_line_is_rejected() {
        let mut order = Order::with_id(OrderId::from("A-1"));
        order.add_line("prod_1", 3, usd(dec!(10))).unwrap();

        let mut stored = serde_json::to_value(&order).unwrap();
        stored["lines"][0]["quantity"] = serde_json::json!(0);

        assert!(serde_json::from_value::<Order>(stored).is_err());
    }
}
