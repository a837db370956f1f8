use serde::{Deserialize, Serialize};

use crate::{Symbol, UtcDateTime};

/// Latest intraday snapshot for a single symbol, one per collection pass.
///
/// `timestamp` is the provider's series key for the selected sample, kept
/// verbatim (the provider formats it as `YYYY-MM-DD HH:MM:SS`, which is not
/// RFC3339). `change` and `change_percent` are only present when the open
/// price is positive; when absent they are omitted from the serialized
/// record entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: Symbol,
    pub timestamp: String,
    pub price: f64,
    pub volume: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
    pub name: String,
    pub sector: String,
    pub industry: String,
}

impl StockQuote {
    /// Derived day-change fields, both present iff `open > 0`.
    pub fn change_fields(open: f64, close: f64) -> (Option<f64>, Option<f64>) {
        if open > 0.0 {
            let change = close - open;
            (Some(change), Some(change / open * 100.0))
        } else {
            (None, None)
        }
    }
}

/// Company overview snapshot, collected at most once per calendar day.
///
/// Each numeric metric is independently nullable: the provider reports
/// missing values as `"None"`, `"N/A"` or `"-"`, and those coerce to `None`
/// rather than failing the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsRecord {
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub sector: String,
    pub industry: String,
    pub exchange: String,
    pub currency: String,
    pub country: String,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub roe: Option<f64>,
    pub revenue_ttm: Option<f64>,
    pub gross_profit_ttm: Option<f64>,
    pub profit_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub eps: Option<f64>,
    pub beta: Option<f64>,
    #[serde(rename = "52_week_high")]
    pub week_52_high: Option<f64>,
    #[serde(rename = "52_week_low")]
    pub week_52_low: Option<f64>,
    #[serde(rename = "50_day_moving_avg")]
    pub day_50_moving_avg: Option<f64>,
    #[serde(rename = "200_day_moving_avg")]
    pub day_200_moving_avg: Option<f64>,
    pub shares_outstanding: Option<f64>,
    pub analyst_target_price: Option<f64>,
    pub analyst_rating: String,
    pub last_updated: UtcDateTime,
}
