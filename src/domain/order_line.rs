use super::error::DomainError;
use super::money::Money;
use super::order::LineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single purchasable line of an order.
///
/// Lines are owned by their `Order`; the identifier stays `None` until the
/// owning order assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrderLineRecord")]
pub struct OrderLine {
    id: Option<LineId>,
    product_id: String,
    quantity: u32,
    price: Money,
}

#[derive(Deserialize)]
struct OrderLineRecord {
    id: Option<LineId>,
    product_id: String,
    quantity: u32,
    price: Money,
}

impl TryFrom<OrderLineRecord> for OrderLine {
    type Error = DomainError;

    fn try_from(record: OrderLineRecord) -> Result<Self, Self::Error> {
        validate_quantity(record.quantity)?;
        Ok(Self {
            id: record.id,
            product_id: record.product_id,
            quantity: record.quantity,
            price: record.price,
        })
    }
}

impl OrderLine {
    pub fn new(
        product_id: impl Into<String>,
        quantity: u32,
        price: Money,
    ) -> Result<Self, DomainError> {
        validate_quantity(quantity)?;
        Ok(Self {
            id: None,
            product_id: product_id.into(),
            quantity,
            price,
        })
    }

    pub fn id(&self) -> Option<&LineId> {
        self.id.as_ref()
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> &Money {
        &self.price
    }

    /// Price times quantity, in the price's currency.
    pub fn total(&self) -> Result<Money, DomainError> {
        self.price.multiply(Decimal::from(self.quantity))
    }

    pub fn change_quantity(&mut self, new_quantity: u32) -> Result<(), DomainError> {
        validate_quantity(new_quantity)?;
        self.quantity = new_quantity;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: LineId) {
        self.id = Some(id);
    }
}

fn validate_quantity(quantity: u32) -> Result<(), DomainError> {
    if quantity == 0 {
        Err(DomainError::InvalidQuantity(quantity))
    } else {
        Ok(())
    }
}
