//! Raw provider payloads → canonical records.
//!
//! Normalization is deliberately lenient about malformed numeric fields
//! (they default to 0 for OHLCV, `None` for fundamentals metrics) and
//! strict about missing containers: no time series or no `Symbol` field
//! means no record.

use serde_json::Value;

use crate::directory::CompanyDirectory;
use crate::{FundamentalsRecord, StockQuote, Symbol, UtcDateTime};

const TIME_SERIES_KEY: &str = "Time Series (5min)";
const DESCRIPTION_LIMIT: usize = 400;

/// Extract the most recent sample from an intraday response.
///
/// "Most recent" is the lexicographically greatest series key; the
/// provider's `YYYY-MM-DD HH:MM:SS` keys sort correctly as strings.
/// Returns `None` when the series container is absent, malformed or empty.
pub fn latest_quote(
    raw: &Value,
    symbol: &Symbol,
    directory: &CompanyDirectory,
) -> Option<StockQuote> {
    let series = raw.get(TIME_SERIES_KEY)?.as_object()?;
    let (timestamp, sample) = series.iter().max_by(|(a, _), (b, _)| a.cmp(b))?;

    let open = sample_f64(sample, "1. open");
    let high = sample_f64(sample, "2. high");
    let low = sample_f64(sample, "3. low");
    let close = sample_f64(sample, "4. close");
    let volume = sample_u64(sample, "5. volume");

    let (change, change_percent) = StockQuote::change_fields(open, close);

    let company = directory.get(symbol.as_str());

    Some(StockQuote {
        symbol: symbol.clone(),
        timestamp: timestamp.clone(),
        price: close,
        volume,
        open,
        high,
        low,
        close,
        change,
        change_percent,
        name: company.map(|c| c.name.clone()).unwrap_or_default(),
        sector: company.map(|c| c.sector.clone()).unwrap_or_default(),
        industry: company.map(|c| c.industry.clone()).unwrap_or_default(),
    })
}

/// Normalize a company overview payload.
///
/// A missing `Symbol` field is the provider's "no data for this ticker"
/// signal and yields `None`.
pub fn overview(raw: &Value) -> Option<FundamentalsRecord> {
    let symbol = raw.get("Symbol")?.as_str()?;

    Some(FundamentalsRecord {
        symbol: symbol.to_owned(),
        name: text_field(raw, "Name"),
        description: truncate_description(text_field(raw, "Description")),
        sector: text_field(raw, "Sector"),
        industry: text_field(raw, "Industry"),
        exchange: text_field(raw, "Exchange"),
        currency: text_field(raw, "Currency"),
        country: text_field(raw, "Country"),
        market_cap: metric(raw, "MarketCapitalization"),
        pe_ratio: metric(raw, "PERatio"),
        dividend_yield: metric(raw, "DividendYield"),
        roe: metric(raw, "ReturnOnEquityTTM"),
        revenue_ttm: metric(raw, "RevenueTTM"),
        gross_profit_ttm: metric(raw, "GrossProfitTTM"),
        profit_margin: metric(raw, "ProfitMargin"),
        operating_margin: metric(raw, "OperatingMarginTTM"),
        eps: metric(raw, "EPS"),
        beta: metric(raw, "Beta"),
        week_52_high: metric(raw, "52WeekHigh"),
        week_52_low: metric(raw, "52WeekLow"),
        day_50_moving_avg: metric(raw, "50DayMovingAverage"),
        day_200_moving_avg: metric(raw, "200DayMovingAverage"),
        shares_outstanding: metric(raw, "SharesOutstanding"),
        analyst_target_price: metric(raw, "AnalystTargetPrice"),
        analyst_rating: text_field(raw, "AnalystRating"),
        last_updated: UtcDateTime::now(),
    })
}

/// Coerce a provider value to a number, mapping the provider's
/// none-sentinels (`""`, `"None"`, `"N/A"`, `"-"`) and unparseable input
/// to `None`. Thousands separators are stripped before parsing.
pub fn safe_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() || matches!(trimmed, "None" | "N/A" | "-") {
                return None;
            }
            trimmed.replace(',', "").parse().ok()
        }
        _ => None,
    }
}

fn metric(raw: &Value, key: &str) -> Option<f64> {
    raw.get(key).and_then(safe_number)
}

fn text_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

// OHLCV fields arrive as strings; a malformed field becomes 0 rather than
// dropping the record.
fn sample_f64(sample: &Value, key: &str) -> f64 {
    match sample.get(key) {
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0.0),
        Some(other) => other.as_f64().unwrap_or(0.0),
        None => 0.0,
    }
}

fn sample_u64(sample: &Value, key: &str) -> u64 {
    match sample.get(key) {
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        Some(other) => other.as_u64().unwrap_or(0),
        None => 0,
    }
}

fn truncate_description(text: String) -> String {
    if text.chars().count() > DESCRIPTION_LIMIT {
        let head: String = text.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{head}...")
    } else {
        text
    }
}
