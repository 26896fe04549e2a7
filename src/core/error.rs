//! Failure taxonomy for a single fetch-and-save run

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required configuration was not supplied. Raised before any I/O.
    #[error("Missing {var} environment variable")]
    MissingCredential { var: &'static str },

    #[error("Invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Connection failure, timeout or a non-2xx status.
    ///
    /// The wrapped error has its URL stripped since the URL carries the API key.
    #[error("Request failed for currency pair {pair}: {source}")]
    Transport {
        pair: String,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with one of its error or throttling markers.
    #[error("API error/limit ({key}): {body}")]
    Upstream { key: &'static str, body: String },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Failed to serialize exchange rate record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The response body did not have the shape of an exchange rate quote.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[source] std::string::FromUtf8Error),

    #[error("Response is not valid JSON ({source}): {body}")]
    InvalidJson {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected response: {body}")]
    UnexpectedShape { body: String },

    #[error("Malformed rate block ({source}): {body}")]
    MalformedRateBlock {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid exchange rate value: {value:?}")]
    InvalidRate { value: String },
}

impl Error {
    pub(crate) fn transport(from: &str, to: &str, source: reqwest::Error) -> Self {
        Error::Transport {
            pair: format!("{from}->{to}"),
            source: source.without_url(),
        }
    }
}
