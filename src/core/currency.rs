//! Exchange rate source abstraction

use async_trait::async_trait;

use super::error::Result;
use super::record::ExchangeRateRecord;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Performs exactly one lookup of the `from`->`to` rate.
    async fn fetch_rate(&self, from: &str, to: &str) -> Result<ExchangeRateRecord>;
}
