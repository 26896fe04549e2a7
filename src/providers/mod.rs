pub mod alpha_vantage;

pub use alpha_vantage::AlphaVantageProvider;
