use super::{ui, worker};
use crate::core::{
    HistoryProvider, PriceSeries, RangeSelection, fetch_history_in_range, normalize_symbol, range,
};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use tracing::warn;

const BAR_WIDTH: usize = 40;

/// Parses a user-supplied range, falling back to the six-month window (with
/// a warning) when it is not recognised.
pub fn parse_range(raw: Option<&str>) -> Option<RangeSelection> {
    let raw = raw?;
    match raw.parse::<RangeSelection>() {
        Ok(selection) => Some(selection),
        Err(e) => {
            warn!(range = raw, error = %e, "Unrecognised range, using {}", RangeSelection::DEFAULT);
            None
        }
    }
}

fn bar_len(close: Decimal, low: Decimal, high: Decimal, width: usize) -> usize {
    let span = high - low;
    if span.is_zero() {
        return width;
    }
    (close - low)
        .checked_div(span)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(width)))
        .and_then(|len| len.round().to_usize())
        .unwrap_or(0)
        .max(1)
}

/// Renders the series as a date-ordered table with one bar per close,
/// scaled between the series low and high.
pub fn render_series(series: &PriceSeries, from: NaiveDate) -> String {
    let (Some(low), Some(high)) = (series.low(), series.high()) else {
        return format!(
            "No price points for {} since {from}",
            series.symbol()
        );
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Close (USD)"),
        ui::header_cell("Chart"),
    ]);

    for point in series.points() {
        table.add_row(vec![
            comfy_table::Cell::new(point.date.to_string()),
            ui::price_cell(point.close.to_string()),
            ui::bar_cell(bar_len(point.close, low, high, BAR_WIDTH)),
        ]);
    }

    let change = series
        .change_percent()
        .map_or("N/A".to_string(), |c| format!("{:.2}%", c));

    format!(
        "History: {}\n\n{table}\n\n{} points since {from} | low {low} | high {high} | change {change}",
        ui::style_text(series.symbol(), ui::StyleType::Title),
        series.len(),
    )
}

pub fn run<P>(
    provider: Arc<P>,
    raw_symbol: &str,
    raw_range: Option<&str>,
    today: NaiveDate,
    as_json: bool,
) -> Result<()>
where
    P: HistoryProvider + 'static,
{
    let symbol = normalize_symbol(raw_symbol)?;
    let selection = parse_range(raw_range);
    let from = range::resolve(selection, today);

    let message = format!("Fetching daily history for {symbol}...");
    let job_symbol = symbol.clone();
    let result = worker::run_in_background(&message, move || {
        fetch_history_in_range(provider.as_ref(), &job_symbol, selection, today)
    })?;

    match result {
        Ok(series) if as_json => println!("{}", serde_json::to_string_pretty(&series)?),
        Ok(series) => println!("{}", render_series(&series, from)),
        Err(e) => {
            warn!(symbol = %symbol, kind = e.kind(), "History fetch failed");
            return Err(e.into());
        }
    }
    Ok(())
}
