use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use tickdrop_core::{FundamentalsRecord, StockQuote, UtcDateTime};

pub const PIPELINE_VERSION: &str = "1.0";
pub const QUOTES_DATA_TYPE: &str = "stock_quotes";
pub const FUNDAMENTALS_DATA_TYPE: &str = "company_fundamentals";
pub const QUOTE_SOURCE: &str = "alpha_vantage";

/// Metadata block stamped into every persisted payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetadata {
    pub pipeline_version: String,
    pub execution_timestamp: UtcDateTime,
    pub total_count: usize,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// On-store payload shape: metadata envelope plus the record list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBatch<T> {
    pub metadata: BatchMetadata,
    pub date: String,
    pub records: Vec<T>,
}

impl StoredBatch<StockQuote> {
    pub fn quotes(records: Vec<StockQuote>, executed_at: UtcDateTime) -> Self {
        Self {
            metadata: BatchMetadata {
                pipeline_version: String::from(PIPELINE_VERSION),
                execution_timestamp: executed_at,
                total_count: records.len(),
                data_type: String::from(QUOTES_DATA_TYPE),
                source: Some(String::from(QUOTE_SOURCE)),
            },
            date: executed_at.date_key(),
            records,
        }
    }
}

impl StoredBatch<FundamentalsRecord> {
    pub fn fundamentals(records: Vec<FundamentalsRecord>, executed_at: UtcDateTime) -> Self {
        Self {
            metadata: BatchMetadata {
                pipeline_version: String::from(PIPELINE_VERSION),
                execution_timestamp: executed_at,
                total_count: records.len(),
                data_type: String::from(FUNDAMENTALS_DATA_TYPE),
                source: None,
            },
            date: executed_at.date_key(),
            records,
        }
    }
}

/// First 8 hex characters of the payload's SHA-256 digest. Used both for
/// key uniqueness within a second and as an integrity fingerprint for
/// downstream consumers.
pub fn content_hash8(payload: &[u8]) -> String {
    let digest = Sha256::digest(payload);
    digest
        .iter()
        .take(4)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
