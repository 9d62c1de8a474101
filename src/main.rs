use clap::Parser;
use miette::{IntoDiagnostic, Result};
use mock_payments::application::engine::PaymentEngine;
use mock_payments::domain::ports::RandomSourceRef;
use mock_payments::infrastructure::random::{SeededRandom, ThreadRandom};
use mock_payments::interfaces::rpc::RpcServer;
use std::sync::Arc;
use tokio::io::{self, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the payment outcome draws. Omit for OS-seeded randomness.
    #[arg(long)]
    seed: Option<u64>,

    /// Default log filter, used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries protocol responses, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .into_diagnostic()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let random: RandomSourceRef = match cli.seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    };
    let engine = Arc::new(PaymentEngine::in_memory(random));
    let server = RpcServer::new(engine);

    server
        .serve(BufReader::new(io::stdin()), io::stdout())
        .await
        .into_diagnostic()?;

    Ok(())
}
