//! Startup configuration. Validation failures here are fatal: no partial
//! collection pass ever runs against a bad credential or bucket.

use thiserror::Error;

pub const API_KEY_VAR: &str = "ALPHA_VANTAGE_API_KEY";
pub const BUCKET_VAR: &str = "S3_BUCKET_NAME";

const PLACEHOLDER_KEY: &str = "demo";
const MIN_BUCKET_LEN: usize = 3;
const MAX_BUCKET_LEN: usize = 63;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },

    #[error("{var} is set to the '{PLACEHOLDER_KEY}' placeholder; a real credential is required")]
    PlaceholderCredential { var: &'static str },

    #[error("bucket name must be {MIN_BUCKET_LEN}-{MAX_BUCKET_LEN} characters, got {len}")]
    InvalidBucketLength { len: usize },
}

/// Validated pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub api_key: String,
    pub bucket: String,
}

impl PipelineConfig {
    pub fn new(api_key: impl Into<String>, bucket: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        let bucket = bucket.into();

        if api_key.is_empty() {
            return Err(ConfigError::Missing { var: API_KEY_VAR });
        }
        if api_key == PLACEHOLDER_KEY {
            return Err(ConfigError::PlaceholderCredential { var: API_KEY_VAR });
        }
        if api_key.len() < 10 {
            tracing::warn!(len = api_key.len(), "API key looks unusually short");
        }

        if bucket.is_empty() {
            return Err(ConfigError::Missing { var: BUCKET_VAR });
        }
        let bucket_len = bucket.chars().count();
        if !(MIN_BUCKET_LEN..=MAX_BUCKET_LEN).contains(&bucket_len) {
            return Err(ConfigError::InvalidBucketLength { len: bucket_len });
        }

        let config = Self { api_key, bucket };
        tracing::info!(api_key = %config.masked_api_key(), bucket = %config.bucket, "configuration validated");
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| ConfigError::Missing { var: API_KEY_VAR })?;
        let bucket =
            std::env::var(BUCKET_VAR).map_err(|_| ConfigError::Missing { var: BUCKET_VAR })?;
        Self::new(api_key, bucket)
    }

    /// Credential rendered safe for log lines: `ABCD...WXYZ`, or `***` when
    /// too short to mask meaningfully.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() > 8 {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}...{tail}")
        } else {
            String::from("***")
        }
    }
}
