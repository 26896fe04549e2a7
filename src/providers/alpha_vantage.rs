use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::core::currency::RateProvider;
use crate::core::error::{Error, ProtocolError, Result};
use crate::core::record::ExchangeRateRecord;

pub const PROVIDER_NAME: &str = "AlphaVantage";

const USER_AGENT: &str = concat!("fxfetch/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const EXCHANGE_RATE_FUNCTION: &str = "CURRENCY_EXCHANGE_RATE";

// Keys the upstream uses instead of data when a request is rejected or throttled.
const UPSTREAM_ERROR_KEYS: [&str; 3] = ["Error Message", "Information", "Note"];
const RATE_BLOCK_KEY: &str = "Realtime Currency Exchange Rate";

#[derive(Debug, Deserialize)]
struct RateBlock {
    #[serde(rename = "5. Exchange Rate")]
    exchange_rate: RateValue,
    #[serde(rename = "6. Last Refreshed", default)]
    last_refreshed: Option<String>,
}

// Alpha Vantage quotes numbers as strings; accept plain numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RateValue {
    Text(String),
    Number(f64),
}

impl RateValue {
    fn to_rate(&self) -> std::result::Result<f64, ProtocolError> {
        let (parsed, raw) = match self {
            RateValue::Text(text) => (text.trim().parse::<f64>().ok(), text.clone()),
            RateValue::Number(number) => (Some(*number), number.to_string()),
        };
        parsed
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or(ProtocolError::InvalidRate { value: raw })
    }
}

#[derive(Debug, PartialEq)]
struct Quote {
    rate: f64,
    last_refreshed: Option<String>,
}

/// Validates a response body and extracts the quote from it.
fn decode_quote(body: &str) -> Result<Quote> {
    let payload: Value =
        serde_json::from_str(body).map_err(|source| ProtocolError::InvalidJson {
            body: body.to_string(),
            source,
        })?;

    let unexpected = || ProtocolError::UnexpectedShape {
        body: body.to_string(),
    };
    let fields = payload.as_object().ok_or_else(unexpected)?;

    if let Some(key) = UPSTREAM_ERROR_KEYS
        .into_iter()
        .find(|key| fields.contains_key(*key))
    {
        return Err(Error::Upstream {
            key,
            body: body.to_string(),
        });
    }

    let block = match fields.get(RATE_BLOCK_KEY) {
        Some(block @ Value::Object(entries)) if !entries.is_empty() => block,
        _ => return Err(unexpected().into()),
    };
    let block =
        RateBlock::deserialize(block).map_err(|source| ProtocolError::MalformedRateBlock {
            body: body.to_string(),
            source,
        })?;

    Ok(Quote {
        rate: block.exchange_rate.to_rate()?,
        last_refreshed: block.last_refreshed,
    })
}

pub struct AlphaVantageProvider {
    base_url: String,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        AlphaVantageProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn request_url(&self, from: &str, to: &str) -> Result<Url> {
        let endpoint = format!("{}/query", self.base_url);
        Url::parse_with_params(
            &endpoint,
            &[
                ("function", EXCHANGE_RATE_FUNCTION),
                ("from_currency", from),
                ("to_currency", to),
                ("apikey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| Error::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl RateProvider for AlphaVantageProvider {
    #[instrument(
        name = "AlphaVantageRateFetch",
        skip(self),
        fields(from = %from, to = %to)
    )]
    async fn fetch_rate(&self, from: &str, to: &str) -> Result<ExchangeRateRecord> {
        let url = self.request_url(from, to)?;
        debug!(base_url = %self.base_url, "Requesting exchange rate");

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::transport(from, to, e))?;

        let response = client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::transport(from, to, e))?;
        debug!(status = %response.status(), "Received exchange rate response");

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport(from, to, e))?;
        let body = String::from_utf8(bytes.to_vec()).map_err(ProtocolError::InvalidUtf8)?;

        let quote = match decode_quote(&body) {
            Ok(quote) => quote,
            Err(e) => {
                error!(error = %e, "Rejected exchange rate response");
                return Err(e);
            }
        };

        Ok(ExchangeRateRecord::observed_now(
            PROVIDER_NAME,
            from,
            to,
            quote.rate,
            quote.last_refreshed,
        ))
    }
}
