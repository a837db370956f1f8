use std::sync::Arc;

use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use tickdrop_core::{FundamentalsRecord, StockQuote, UtcDateTime};

use crate::batch::{content_hash8, StoredBatch, PIPELINE_VERSION};
use crate::error::StoreError;

/// Writes collected batches to durable object storage.
#[derive(Clone)]
pub struct BatchWriter {
    store: Arc<dyn ObjectStore>,
    location: String,
}

impl BatchWriter {
    pub fn new(store: Arc<dyn ObjectStore>, location: impl Into<String>) -> Self {
        Self {
            store,
            location: location.into(),
        }
    }

    /// Production writer against an S3 bucket; credentials and region come
    /// from the environment, matching the host's execution role.
    pub fn s3(bucket: &str) -> Result<Self, StoreError> {
        let store = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .build()?;
        Ok(Self::new(Arc::new(store), format!("s3://{bucket}")))
    }

    /// In-memory writer for tests and dry runs.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()), "memory")
    }

    pub fn store(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.store)
    }

    /// Persist a quote batch under a timestamped, content-hashed key.
    ///
    /// Returns `false` for an empty batch (nothing is written) and for any
    /// storage failure; failures are logged, never propagated.
    pub async fn save_quotes(&self, quotes: &[StockQuote]) -> bool {
        if quotes.is_empty() {
            tracing::warn!("no quotes to save");
            return false;
        }

        match self.write_quotes(quotes).await {
            Ok(key) => {
                tracing::info!(
                    location = %self.location,
                    %key,
                    count = quotes.len(),
                    "saved quote batch"
                );
                true
            }
            Err(error) => {
                tracing::error!(%error, "failed to save quote batch");
                false
            }
        }
    }

    /// Persist the daily fundamentals batch under its fixed per-day key.
    /// A second same-day write overwrites the first (last-writer-wins).
    pub async fn save_fundamentals(&self, records: &[FundamentalsRecord]) -> bool {
        if records.is_empty() {
            return false;
        }

        match self.write_fundamentals(records).await {
            Ok(key) => {
                tracing::info!(
                    location = %self.location,
                    %key,
                    count = records.len(),
                    "saved fundamentals batch"
                );
                true
            }
            Err(error) => {
                tracing::error!(%error, "failed to save fundamentals batch");
                false
            }
        }
    }

    async fn write_quotes(&self, quotes: &[StockQuote]) -> Result<Path, StoreError> {
        let executed_at = UtcDateTime::now();
        let batch = StoredBatch::quotes(quotes.to_vec(), executed_at);
        // Compact serialization: the hash is computed over exactly the
        // bytes that land in the store.
        let payload = serde_json::to_vec(&batch)?;
        let hash = content_hash8(&payload);

        let key = Path::from(format!(
            "quotes/{}/stock-quotes-{}-{}.json",
            executed_at.date_key(),
            executed_at.compact_key(),
            hash
        ));

        let options = PutOptions {
            attributes: batch_attributes(quotes.len(), Some(&hash)),
            ..Default::default()
        };
        self.store
            .put_opts(&key, PutPayload::from(payload), options)
            .await?;
        Ok(key)
    }

    async fn write_fundamentals(
        &self,
        records: &[FundamentalsRecord],
    ) -> Result<Path, StoreError> {
        let executed_at = UtcDateTime::now();
        let batch = StoredBatch::fundamentals(records.to_vec(), executed_at);
        let payload = serde_json::to_vec_pretty(&batch)?;

        let key = Path::from(format!(
            "fundamentals/{}/company-fundamentals.json",
            executed_at.date_key()
        ));

        let options = PutOptions {
            attributes: batch_attributes(records.len(), None),
            ..Default::default()
        };
        self.store
            .put_opts(&key, PutPayload::from(payload), options)
            .await?;
        Ok(key)
    }
}

fn batch_attributes(count: usize, hash: Option<&str>) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(Attribute::ContentType, "application/json".into());
    attributes.insert(
        Attribute::Metadata("total-count".into()),
        count.to_string().into(),
    );
    attributes.insert(
        Attribute::Metadata("pipeline-version".into()),
        PIPELINE_VERSION.into(),
    );
    if let Some(hash) = hash {
        attributes.insert(Attribute::Metadata("data-hash".into()), hash.to_owned().into());
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use tickdrop_core::Symbol;

    fn quote(symbol: &str, close: f64) -> StockQuote {
        StockQuote {
            symbol: Symbol::parse(symbol).expect("valid symbol"),
            timestamp: String::from("2024-01-02 09:35:00"),
            price: close,
            volume: 1000,
            open: close - 1.0,
            high: close + 0.5,
            low: close - 1.5,
            close,
            change: Some(1.0),
            change_percent: Some(1.0 / (close - 1.0) * 100.0),
            name: String::new(),
            sector: String::new(),
            industry: String::new(),
        }
    }

    async fn list_keys(store: &Arc<dyn ObjectStore>) -> Vec<String> {
        store
            .list(None)
            .try_collect::<Vec<_>>()
            .await
            .expect("listing must succeed")
            .into_iter()
            .map(|meta| meta.location.to_string())
            .collect()
    }

    #[tokio::test]
    async fn empty_quote_batch_is_rejected_without_a_write() {
        let writer = BatchWriter::in_memory();
        assert!(!writer.save_quotes(&[]).await);
        assert!(list_keys(&writer.store()).await.is_empty());
    }

    #[tokio::test]
    async fn empty_fundamentals_batch_is_rejected_without_a_write() {
        let writer = BatchWriter::in_memory();
        assert!(!writer.save_fundamentals(&[]).await);
        assert!(list_keys(&writer.store()).await.is_empty());
    }

    #[tokio::test]
    async fn quote_key_carries_date_timestamp_and_hash() {
        let writer = BatchWriter::in_memory();
        assert!(writer.save_quotes(&[quote("AAPL", 184.9)]).await);

        let keys = list_keys(&writer.store()).await;
        assert_eq!(keys.len(), 1);

        let key = &keys[0];
        let date = UtcDateTime::now().date_key();
        assert!(key.starts_with(&format!("quotes/{date}/stock-quotes-")));
        assert!(key.ends_with(".json"));

        let name = key.rsplit('/').next().expect("key has a file name");
        let hash = name
            .trim_end_matches(".json")
            .rsplit('-')
            .next()
            .expect("key has a hash suffix");
        assert_eq!(hash.len(), 8);
        assert!(hash.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn same_second_batches_with_different_payloads_get_distinct_keys() {
        let writer = BatchWriter::in_memory();
        assert!(writer.save_quotes(&[quote("AAPL", 184.9)]).await);
        assert!(writer.save_quotes(&[quote("MSFT", 402.2)]).await);

        let keys = list_keys(&writer.store()).await;
        assert_eq!(keys.len(), 2, "both writes must land under distinct keys");
    }

    #[tokio::test]
    async fn fundamentals_key_is_fixed_per_day_and_overwritten() {
        let writer = BatchWriter::in_memory();
        let record = FundamentalsRecord {
            symbol: String::from("AAPL"),
            name: String::from("Apple Inc."),
            description: String::new(),
            sector: String::new(),
            industry: String::new(),
            exchange: String::new(),
            currency: String::new(),
            country: String::new(),
            market_cap: Some(2.9e12),
            pe_ratio: None,
            dividend_yield: None,
            roe: None,
            revenue_ttm: None,
            gross_profit_ttm: None,
            profit_margin: None,
            operating_margin: None,
            eps: None,
            beta: None,
            week_52_high: None,
            week_52_low: None,
            day_50_moving_avg: None,
            day_200_moving_avg: None,
            shares_outstanding: None,
            analyst_target_price: None,
            analyst_rating: String::new(),
            last_updated: UtcDateTime::now(),
        };

        assert!(writer.save_fundamentals(std::slice::from_ref(&record)).await);
        assert!(writer.save_fundamentals(&[record.clone(), record]).await);

        let keys = list_keys(&writer.store()).await;
        assert_eq!(keys.len(), 1, "same-day rewrite must reuse the fixed key");
        let date = UtcDateTime::now().date_key();
        assert_eq!(
            keys[0],
            format!("fundamentals/{date}/company-fundamentals.json")
        );
    }

    #[tokio::test]
    async fn stored_batch_round_trips_with_attached_attributes() {
        let writer = BatchWriter::in_memory();
        assert!(writer.save_quotes(&[quote("AAPL", 184.9)]).await);

        let keys = list_keys(&writer.store()).await;
        let result = writer
            .store()
            .get(&Path::from(keys[0].clone()))
            .await
            .expect("object must exist");

        assert_eq!(
            result
                .attributes
                .get(&Attribute::ContentType)
                .map(|value| &**value),
            Some("application/json")
        );
        assert_eq!(
            result
                .attributes
                .get(&Attribute::Metadata("total-count".into()))
                .map(|value| &**value),
            Some("1")
        );

        let payload = result.bytes().await.expect("body must read");
        let batch: StoredBatch<StockQuote> =
            serde_json::from_slice(&payload).expect("payload must deserialize");
        assert_eq!(batch.metadata.total_count, 1);
        assert_eq!(batch.records[0].symbol.as_str(), "AAPL");
    }
}
