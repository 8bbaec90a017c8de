//! Order aggregate, its value objects and the ports it is persisted and paid through.

pub mod error;
pub mod money;
pub mod order;
pub mod order_line;
pub mod ports;
