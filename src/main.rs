use clap::Parser;
use miette::{IntoDiagnostic, Result};
use orderpay::application::desk::OrderDesk;
use orderpay::domain::ports::{OrderRepositoryRef, PaymentGatewayRef};
use orderpay::infrastructure::fake_gateway::FakePaymentGateway;
use orderpay::infrastructure::in_memory::InMemoryOrderRepository;
use orderpay::interfaces::csv::command_reader::OrderCommandReader;
use orderpay::interfaces::csv::result_writer::PaymentResultWriter;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input order commands CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Make the payment gateway decline every charge.
    #[arg(long)]
    decline_payments: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let repository = open_repository(cli.db_path.as_deref())?;
    let gateway: PaymentGatewayRef = Arc::new(FakePaymentGateway::new(!cli.decline_payments));
    let desk = OrderDesk::new(repository, gateway);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = OrderCommandReader::new(file);
    let mut results = Vec::new();
    for command in reader.commands() {
        match command {
            Ok(command) => match desk.process_command(command).await {
                Ok(Some(result)) => results.push(result),
                Ok(None) => {}
                Err(e) => tracing::warn!("Error processing command: {}", e),
            },
            Err(e) => tracing::warn!("Error reading command: {}", e),
        }
    }

    let stdout = io::stdout();
    let mut writer = PaymentResultWriter::new(stdout.lock());
    writer.write_results(&results).into_diagnostic()?;

    Ok(())
}

/// Logs go to stderr so stdout only carries the CSV report.
/// Verbosity is controlled with `RUST_LOG` and defaults to `info`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

#[cfg(feature = "storage-rocksdb")]
fn open_repository(db_path: Option<&Path>) -> Result<OrderRepositoryRef> {
    use orderpay::infrastructure::rocksdb::RocksDbOrderRepository;

    let repository: OrderRepositoryRef = match db_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "using RocksDB order store");
            Arc::new(RocksDbOrderRepository::open(path).into_diagnostic()?)
        }
        None => Arc::new(InMemoryOrderRepository::new()),
    };
    Ok(repository)
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_repository(db_path: Option<&Path>) -> Result<OrderRepositoryRef> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    let repository: OrderRepositoryRef = Arc::new(InMemoryOrderRepository::new());
    Ok(repository)
}
