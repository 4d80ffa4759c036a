use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paysettle::application::service::PaymentService;
use paysettle::domain::ports::{CardVaultRef, PaymentStoreRef};
use paysettle::domain::settlement::SettlementResponse;
use paysettle::infrastructure::in_memory::InMemoryPaymentStore;
use paysettle::infrastructure::vault::{InMemoryCardVault, PassthroughVault};
use paysettle::interfaces::csv::command_reader::{CommandReader, PaymentCommand};
use paysettle::interfaces::json::response_writer::ResponseWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input commands CSV file (type, id, amount, card, timestamp)
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "PAYSETTLE_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Store opaque tokens instead of card numbers on paid payments.
    #[arg(long, env = "PAYSETTLE_TOKENIZE_CARDS")]
    tokenize_cards: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "PAYSETTLE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_store(db_path: Option<PathBuf>) -> Result<PaymentStoreRef> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = paysettle::infrastructure::rocksdb::RocksDBStore::open(path)
                .into_diagnostic()?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            tracing::warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
            );
            Ok(Arc::new(InMemoryPaymentStore::new()))
        }
        None => Ok(Arc::new(InMemoryPaymentStore::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let store = open_store(cli.db_path)?;
    let vault: CardVaultRef = if cli.tokenize_cards {
        Arc::new(InMemoryCardVault::new())
    } else {
        Arc::new(PassthroughVault)
    };
    let service = PaymentService::with_vault(store, vault);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    for command in reader.commands() {
        match command {
            Ok(PaymentCommand::Register(request)) => match service.register(request).await {
                Ok(payment) => writer.write_record(&payment).into_diagnostic()?,
                Err(e) => error!(error = %e, "Error registering payment"),
            },
            Ok(PaymentCommand::Settle(request)) => match service.settle(request).await {
                Ok(result) => writer
                    .write_record(&SettlementResponse::from(result))
                    .into_diagnostic()?,
                Err(e) => error!(error = %e, "Error settling payment"),
            },
            Err(e) => error!(error = %e, "Error reading command"),
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
