//! Error taxonomy for market-data fetches.

use thiserror::Error;

/// The single failure outcome of one quote or history request.
///
/// Every variant is terminal for the request that produced it; nothing is
/// retried internally.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The symbol was empty or contained characters no ticker uses.
    #[error("Invalid symbol '{0}'")]
    Validation(String),

    /// Network-level failure: connect, timeout, DNS or a non-2xx status.
    #[error("Request failed for {symbol}: {source}")]
    Transport {
        symbol: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not have the expected JSON shape.
    #[error("Unexpected response for {symbol}: {reason}")]
    Parse { symbol: String, reason: String },

    /// Well-formed response without data for the symbol.
    #[error("No data found for {symbol}{}", suffix(.detail))]
    NoData {
        symbol: String,
        detail: Option<String>,
    },
}

fn suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

impl FetchError {
    pub(crate) fn parse(symbol: &str, reason: impl Into<String>) -> Self {
        FetchError::Parse {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn no_data(symbol: &str, detail: Option<String>) -> Self {
        FetchError::NoData {
            symbol: symbol.to_string(),
            detail,
        }
    }

    /// Short label for the error kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Validation(_) => "validation",
            FetchError::Transport { .. } => "transport",
            FetchError::Parse { .. } => "parse",
            FetchError::NoData { .. } => "no_data",
        }
    }
}
