use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 6] = ["type", "order", "product", "quantity", "price", "currency"];

/// Writes a command batch with one `add` row per order followed by a `pay` row
/// for each of them.
pub fn generate_csv(path: &Path, orders: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;

    for i in 1..=orders {
        let order = format!("order-{i}");
        wtr.write_record(["add", &order, "prod_1", "1", "1.0", "USD"])?;
    }
    for i in 1..=orders {
        let order = format!("order-{i}");
        wtr.write_record(["pay", &order, "", "", "", ""])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the given rows after the header.
pub fn write_commands(path: &Path, rows: &[[&str; 6]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
