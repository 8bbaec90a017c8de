//! CSV input and output for order command batches.

pub mod command_reader;
pub mod result_writer;
