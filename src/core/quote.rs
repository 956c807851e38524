//! Real-time quote abstractions

use super::error::FetchError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    /// Percent change exactly as reported by the provider, e.g. `"-0.4512%"`.
    pub change_percent: String,
    pub latest_trading_day: Option<NaiveDate>,
}

pub trait QuoteProvider: Send + Sync {
    /// Fetches the current quote for an already normalized symbol.
    fn fetch_quote(&self, symbol: &str) -> Result<Quote, FetchError>;
}
