use super::http::ApiClient;
use crate::core::config::AppConfig;
use crate::core::{
    FetchError, HistoryProvider, PricePoint, PriceSeries, Quote, QuoteProvider,
};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, instrument};

const QUOTE_FUNCTION: &str = "GLOBAL_QUOTE";
const DAILY_FUNCTION: &str = "TIME_SERIES_DAILY";

const QUOTE_KEY: &str = "Global Quote";
const PRICE_FIELD: &str = "05. price";
const LATEST_DAY_FIELD: &str = "07. latest trading day";
const CHANGE_PERCENT_FIELD: &str = "10. change percent";

const SERIES_KEY: &str = "Time Series (Daily)";
const CLOSE_FIELD: &str = "4. close";

const DATE_FORMAT: &str = "%Y-%m-%d";

// Bodies the API sends in place of data (bad symbol, rate limit, bad key).
const NOTICE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

pub struct AlphaVantageProvider {
    client: ApiClient,
}

impl AlphaVantageProvider {
    pub fn new(client: ApiClient) -> Self {
        AlphaVantageProvider { client }
    }

    pub fn from_config(config: &AppConfig, api_key: String) -> Result<Self> {
        let client = ApiClient::new(
            &config.providers.alpha_vantage.base_url,
            api_key,
            Duration::from_secs(config.timeout_secs()),
        )?;
        Ok(Self::new(client))
    }
}

impl QuoteProvider for AlphaVantageProvider {
    #[instrument(name = "AlphaVantageQuote", skip(self), fields(symbol = %symbol))]
    fn fetch_quote(&self, symbol: &str) -> Result<Quote, FetchError> {
        if symbol.is_empty() {
            return Err(FetchError::Validation(symbol.to_string()));
        }
        let root = self
            .client
            .get_json(symbol, &[("function", QUOTE_FUNCTION)])?;
        parse_quote(symbol, &root)
    }
}

impl HistoryProvider for AlphaVantageProvider {
    #[instrument(name = "AlphaVantageHistory", skip(self), fields(symbol = %symbol, from = %from))]
    fn fetch_history(&self, symbol: &str, from: NaiveDate) -> Result<PriceSeries, FetchError> {
        if symbol.is_empty() {
            return Err(FetchError::Validation(symbol.to_string()));
        }
        let root = self.client.get_json(
            symbol,
            &[("function", DAILY_FUNCTION), ("outputsize", "compact")],
        )?;
        let points = parse_daily_closes(symbol, &root)?;
        Ok(PriceSeries::from_unordered(symbol, points, from))
    }
}

fn as_object<'a>(symbol: &str, root: &'a Value) -> Result<&'a Map<String, Value>, FetchError> {
    root.as_object()
        .ok_or_else(|| FetchError::parse(symbol, "response is not a JSON object"))
}

fn provider_notice(root: &Map<String, Value>) -> Option<String> {
    NOTICE_KEYS
        .iter()
        .find_map(|key| root.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Reads a decimal that the API may send either as a string or a number.
fn decimal_field(symbol: &str, obj: &Map<String, Value>, field: &str) -> Result<Decimal, FetchError> {
    let raw = match obj.get(field) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            return Err(FetchError::parse(
                symbol,
                format!("field '{field}' is not a number"),
            ));
        }
        None => return Err(FetchError::parse(symbol, format!("missing field '{field}'"))),
    };

    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|e| FetchError::parse(symbol, format!("field '{field}' = '{raw}': {e}")))
}

/// Extracts a [`Quote`] from a `GLOBAL_QUOTE` response.
pub fn parse_quote(symbol: &str, root: &Value) -> Result<Quote, FetchError> {
    let root = as_object(symbol, root)?;

    let quote = match root.get(QUOTE_KEY) {
        Some(Value::Object(quote)) if !quote.is_empty() => quote,
        Some(Value::Object(_)) | None => {
            return Err(FetchError::no_data(symbol, provider_notice(root)));
        }
        Some(_) => {
            return Err(FetchError::parse(
                symbol,
                format!("'{QUOTE_KEY}' is not an object"),
            ));
        }
    };

    let price = decimal_field(symbol, quote, PRICE_FIELD)?;
    let change_percent = quote
        .get(CHANGE_PERCENT_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            FetchError::parse(symbol, format!("missing field '{CHANGE_PERCENT_FIELD}'"))
        })?
        .to_string();
    let latest_trading_day = quote
        .get(LATEST_DAY_FIELD)
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok());

    debug!(%price, %change_percent, "Parsed quote");

    Ok(Quote {
        symbol: symbol.to_string(),
        price,
        change_percent,
        latest_trading_day,
    })
}

/// Extracts every `(date, close)` pair from a `TIME_SERIES_DAILY` response,
/// in payload order. Any malformed entry fails the whole response.
pub fn parse_daily_closes(symbol: &str, root: &Value) -> Result<Vec<PricePoint>, FetchError> {
    let root = as_object(symbol, root)?;

    let series = match root.get(SERIES_KEY) {
        Some(Value::Object(series)) => series,
        None => return Err(FetchError::no_data(symbol, provider_notice(root))),
        Some(_) => {
            return Err(FetchError::parse(
                symbol,
                format!("'{SERIES_KEY}' is not an object"),
            ));
        }
    };

    series
        .iter()
        .map(|(day, entry)| {
            let date = NaiveDate::parse_from_str(day, DATE_FORMAT)
                .map_err(|e| FetchError::parse(symbol, format!("invalid date '{day}': {e}")))?;
            let entry = entry.as_object().ok_or_else(|| {
                FetchError::parse(symbol, format!("entry for {day} is not an object"))
            })?;
            let close = decimal_field(symbol, entry, CLOSE_FIELD)?;
            if close.is_sign_negative() && !close.is_zero() {
                return Err(FetchError::parse(
                    symbol,
                    format!("negative close {close} on {day}"),
                ));
            }
            Ok(PricePoint { date, close })
        })
        .collect()
}
