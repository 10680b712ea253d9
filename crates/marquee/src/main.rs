//! Marquee - marketing copy suggestions from the command line.
//!
//! Prints JSON to stdout; logs go to stderr.

use clap::Parser;
use marquee::cli::{Cli, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    #[cfg(feature = "metrics")]
    marquee::observability::init_metrics(
        "marquee",
        std::time::Duration::from_secs(60),
        &marquee::observability::MetricsExporter::from_env()?,
    )?;

    let cli = Cli::parse();
    let output = run(cli).await;

    #[cfg(feature = "metrics")]
    marquee::observability::shutdown_metrics();

    println!("{}", output?);
    Ok(())
}
