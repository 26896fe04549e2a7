//! Core types shared by the provider and the writer

pub mod config;
pub mod currency;
pub mod error;
pub mod log;
pub mod record;

// Re-export main types for cleaner imports
pub use config::Config;
pub use currency::RateProvider;
pub use error::{Error, ProtocolError, Result};
pub use record::ExchangeRateRecord;
