use crate::application::payment_result::PaymentResult;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct PaymentRecord<'a> {
    order: &'a str,
    success: bool,
    amount: Decimal,
    currency: &'a str,
    message: &'a str,
}

impl<'a> From<&'a PaymentResult> for PaymentRecord<'a> {
    fn from(result: &'a PaymentResult) -> Self {
        Self {
            order: result.order_id.as_str(),
            success: result.success,
            amount: result.amount.amount().normalize(),
            currency: result.amount.currency(),
            message: &result.message,
        }
    }
}

/// Writes payment results as CSV, one row per payment attempt.
pub struct PaymentResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes all results and flushes the sink. The header is written even
    /// when there are no results.
    pub fn write_results<'a>(
        &mut self,
        results: impl IntoIterator<Item = &'a PaymentResult>,
    ) -> Result<()> {
        let mut wrote_any = false;
        for result in results {
            self.writer.serialize(PaymentRecord::from(result))?;
            wrote_any = true;
        }
        if !wrote_any {
            self.writer
                .write_record(["order", "success", "amount", "currency", "message"])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
