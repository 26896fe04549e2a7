//! The persisted exchange rate observation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One validated exchange rate, as written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExchangeRateRecord {
    pub provider: String,
    #[serde(rename = "from")]
    pub from_currency: String,
    #[serde(rename = "to")]
    pub to_currency: String,
    /// Price of one unit of `from_currency` in `to_currency`.
    pub rate: f64,
    /// Provider's own refresh timestamp, in whatever format it uses.
    pub as_of: Option<String>,
    pub fetched_at_utc: DateTime<Utc>,
}

impl ExchangeRateRecord {
    /// Stamps the record with the current time.
    pub fn observed_now(
        provider: &str,
        from: &str,
        to: &str,
        rate: f64,
        as_of: Option<String>,
    ) -> Self {
        Self {
            provider: provider.to_string(),
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            rate,
            as_of,
            fetched_at_utc: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let record = ExchangeRateRecord::observed_now("AlphaVantage", "USD", "KRW", 1385.5, None);
        let value = serde_json::to_value(&record).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();

        assert_eq!(
            keys,
            ["as_of", "fetched_at_utc", "from", "provider", "rate", "to"]
        );
        assert!(value["as_of"].is_null());
        assert!(value["fetched_at_utc"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_observed_now_uses_current_time() {
        let before = Utc::now();
        let record = ExchangeRateRecord::observed_now(
            "AlphaVantage",
            "EUR",
            "JPY",
            161.2,
            Some("2025-01-02 10:00:01".to_string()),
        );
        assert!(record.fetched_at_utc >= before);
        assert!(record.fetched_at_utc <= Utc::now());
        assert_eq!(record.as_of.as_deref(), Some("2025-01-02 10:00:01"));
    }
}
