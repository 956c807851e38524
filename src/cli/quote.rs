use super::{ui, worker};
use crate::core::{Quote, QuoteProvider, normalize_symbol};
use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

/// One-line summary, e.g. `IBM → 169.1200 USD (0.6068%)`.
pub fn quote_summary(quote: &Quote) -> String {
    let mut line = format!(
        "{} → {} USD ({})",
        quote.symbol, quote.price, quote.change_percent
    );
    if let Some(day) = quote.latest_trading_day {
        line.push_str(&format!(" as of {day}"));
    }
    line
}

pub fn run<P>(provider: Arc<P>, raw_symbol: &str, as_json: bool) -> Result<()>
where
    P: QuoteProvider + 'static,
{
    let symbol = normalize_symbol(raw_symbol)?;

    let message = format!("Fetching quote for {symbol}...");
    let job_symbol = symbol.clone();
    let result =
        worker::run_in_background(&message, move || provider.fetch_quote(&job_symbol))?;

    match result {
        Ok(quote) if as_json => println!("{}", serde_json::to_string_pretty(&quote)?),
        Ok(quote) => println!(
            "{}",
            ui::style_text(&quote_summary(&quote), ui::change_style(&quote.change_percent))
        ),
        Err(e) => {
            warn!(symbol = %symbol, kind = e.kind(), "Quote fetch failed");
            return Err(e.into());
        }
    }
    Ok(())
}
