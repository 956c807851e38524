//! Core business logic abstractions

pub mod config;
pub mod error;
pub mod history;
pub mod log;
pub mod quote;
pub mod range;
pub mod symbol;

// Re-export main types for cleaner imports
pub use error::FetchError;
pub use history::{HistoryProvider, PricePoint, PriceSeries, fetch_history_in_range};
pub use quote::{Quote, QuoteProvider};
pub use range::RangeSelection;
pub use symbol::normalize_symbol;
