use std::path::PathBuf;
use tracing::debug;

use super::error::{Error, Result};

pub const API_KEY_VAR: &str = "EXCHANGE_API_KEY";
pub const FROM_CURRENCY_VAR: &str = "FROM_CURRENCY";
pub const TO_CURRENCY_VAR: &str = "TO_CURRENCY";
pub const OUT_PATH_VAR: &str = "OUT_PATH";
pub const BASE_URL_VAR: &str = "EXCHANGE_API_BASE_URL";

pub const DEFAULT_FROM_CURRENCY: &str = "USD";
pub const DEFAULT_TO_CURRENCY: &str = "KRW";
pub const DEFAULT_OUT_PATH: &str = "data/exchange_rates.json";
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub from_currency: String,
    pub to_currency: String,
    pub out_path: PathBuf,
    pub base_url: String,
}

// Keeps the API key out of `{:?}` output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("from_currency", &self.from_currency)
            .field("to_currency", &self.to_currency)
            .field("out_path", &self.out_path)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading config from environment");
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from `lookup`. Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let api_key = get(API_KEY_VAR).ok_or(Error::MissingCredential { var: API_KEY_VAR })?;

        let config = Config {
            api_key,
            from_currency: get(FROM_CURRENCY_VAR)
                .unwrap_or_else(|| DEFAULT_FROM_CURRENCY.to_string()),
            to_currency: get(TO_CURRENCY_VAR).unwrap_or_else(|| DEFAULT_TO_CURRENCY.to_string()),
            out_path: PathBuf::from(
                get(OUT_PATH_VAR).unwrap_or_else(|| DEFAULT_OUT_PATH.to_string()),
            ),
            base_url: get(BASE_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };
        debug!(config = ?config, "Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_only_key_is_set() {
        let config = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "demo")])).unwrap();
        assert_eq!(config.api_key, "demo");
        assert_eq!(config.from_currency, "USD");
        assert_eq!(config.to_currency, "KRW");
        assert_eq!(config.out_path, PathBuf::from("data/exchange_rates.json"));
        assert_eq!(config.base_url, "https://www.alphavantage.co");
    }

    #[test]
    fn test_missing_api_key() {
        let result = Config::from_lookup(lookup_from(&[(FROM_CURRENCY_VAR, "EUR")]));
        assert!(matches!(
            result,
            Err(Error::MissingCredential {
                var: "EXCHANGE_API_KEY"
            })
        ));
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let result = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "")]));
        assert!(matches!(result, Err(Error::MissingCredential { .. })));

        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "demo"),
            (TO_CURRENCY_VAR, ""),
        ]))
        .unwrap();
        assert_eq!(config.to_currency, "KRW");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "demo"),
            (FROM_CURRENCY_VAR, "EUR"),
            (TO_CURRENCY_VAR, "JPY"),
            (OUT_PATH_VAR, "/tmp/rates/eur_jpy.json"),
            (BASE_URL_VAR, "http://127.0.0.1:9000/"),
        ]))
        .unwrap();
        assert_eq!(config.from_currency, "EUR");
        assert_eq!(config.to_currency, "JPY");
        assert_eq!(config.out_path, PathBuf::from("/tmp/rates/eur_jpy.json"));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_debug_output_hides_api_key() {
        let config = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "secret-key")])).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret-key"));
        assert!(printed.contains("<redacted>"));
    }
}
