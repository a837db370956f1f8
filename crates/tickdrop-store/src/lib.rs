//! # Tickdrop Store
//!
//! Serializes collected batches and writes them to an S3-compatible object
//! store. Quote batches get a content-hashed, timestamped key so concurrent
//! or retried writes never collide; the daily fundamentals batch uses a
//! fixed per-day key where last-writer-wins is intentional.
//!
//! Storage failures are contained: save operations report `false` and log,
//! they never abort the run that produced the batch.

mod batch;
mod error;
mod writer;

pub use batch::{
    content_hash8, BatchMetadata, StoredBatch, FUNDAMENTALS_DATA_TYPE, PIPELINE_VERSION,
    QUOTES_DATA_TYPE, QUOTE_SOURCE,
};
pub use error::StoreError;
pub use writer::BatchWriter;
