use anyhow::Result;
use clap::Parser;
use fxfetch::core::{Config, log::init_logging};

/// Fetch one currency exchange rate and save it as JSON.
///
/// Configuration is read from EXCHANGE_API_KEY, FROM_CURRENCY, TO_CURRENCY
/// and OUT_PATH.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = fetch_and_save().await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Exchange rate update failed");
    }
    result
}

async fn fetch_and_save() -> Result<()> {
    let config = Config::from_env()?;
    let record = fxfetch::run(&config).await?;

    println!(
        "Updated {}: {}->{} = {}",
        config.out_path.display(),
        record.from_currency,
        record.to_currency,
        record.rate
    );
    Ok(())
}
