pub mod core;
pub mod providers;
pub mod store;

use crate::core::{Config, ExchangeRateRecord, RateProvider, Result};
use providers::AlphaVantageProvider;
use tracing::info;

/// Fetches the configured pair from Alpha Vantage and saves it.
pub async fn run(config: &Config) -> Result<ExchangeRateRecord> {
    let provider = AlphaVantageProvider::new(&config.base_url, &config.api_key);
    run_with_provider(&provider, config).await
}

/// Fetches one rate from `provider` and writes it to the configured path.
///
/// Nothing is written unless the provider returned a valid record.
pub async fn run_with_provider(
    provider: &dyn RateProvider,
    config: &Config,
) -> Result<ExchangeRateRecord> {
    info!(
        from = %config.from_currency,
        to = %config.to_currency,
        "Fetching exchange rate"
    );

    let record = provider
        .fetch_rate(&config.from_currency, &config.to_currency)
        .await?;
    store::write_record(&config.out_path, &record)?;

    info!(path = %config.out_path.display(), rate = record.rate, "Exchange rate updated");
    Ok(record)
}
