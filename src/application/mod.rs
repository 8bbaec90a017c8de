//! Application layer orchestrating the order aggregate.
//!
//! `PayOrderUseCase` is the single business operation of the crate: it pays
//! one order through the repository and gateway ports. `OrderDesk` drives
//! batches of order commands on top of it.

pub mod command;
pub mod desk;
pub mod pay_order;
pub mod payment_result;
