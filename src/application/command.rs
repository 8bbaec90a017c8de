use crate::domain::order::OrderId;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Add,
    Pay,
    Cancel,
}

/// One row of a command batch. Only `add` uses the line fields.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OrderCommand {
    pub r#type: CommandType,
    pub order: OrderId,
    pub product: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
}
