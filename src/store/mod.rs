//! Persistence of exchange rate records

pub mod disk;

pub use disk::write_record;
