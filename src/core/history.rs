//! Daily closing-price history and its ordering/filtering rules.

use super::error::FetchError;
use super::range::{self, RangeSelection};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// Closing prices for one symbol, strictly ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from points in any order: sorts ascending, collapses
    /// repeated dates and drops everything strictly before `from`.
    pub fn from_unordered(symbol: &str, mut points: Vec<PricePoint>, from: NaiveDate) -> Self {
        let received = points.len();

        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        points.retain(|p| p.date >= from);

        debug!(
            symbol,
            received,
            kept = points.len(),
            %from,
            "Filtered daily series"
        );

        PriceSeries {
            symbol: symbol.to_string(),
            points,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn low(&self) -> Option<Decimal> {
        self.points.iter().map(|p| p.close).min()
    }

    pub fn high(&self) -> Option<Decimal> {
        self.points.iter().map(|p| p.close).max()
    }

    /// Change from the first to the last close, in percent. `None` when the
    /// first close is zero or the result does not fit in a `Decimal`.
    pub fn change_percent(&self) -> Option<Decimal> {
        let start = self.first()?.close;
        let end = self.last()?.close;
        if start.is_zero() {
            return None;
        }
        end.checked_sub(start)?
            .checked_div(start)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

pub trait HistoryProvider: Send + Sync {
    /// Fetches daily closes for `symbol` on or after `from`, ascending.
    fn fetch_history(&self, symbol: &str, from: NaiveDate) -> Result<PriceSeries, FetchError>;
}

/// Resolves `range` against `today` and fetches the matching window.
pub fn fetch_history_in_range(
    provider: &dyn HistoryProvider,
    symbol: &str,
    range: Option<RangeSelection>,
    today: NaiveDate,
) -> Result<PriceSeries, FetchError> {
    let from = range::resolve(range, today);
    provider.fetch_history(symbol, from)
}
