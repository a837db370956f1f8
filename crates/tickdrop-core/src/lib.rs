//! # Tickdrop Core
//!
//! Domain types and provider plumbing for the tickdrop quote-collection
//! pipeline.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Rate-paced Alpha Vantage client |
//! | [`directory`] | Static company directory (symbol metadata) |
//! | [`domain`] | Canonical records (StockQuote, FundamentalsRecord) |
//! | [`error`] | Validation and fetch error types |
//! | [`http`] | HTTP transport seam |
//! | [`normalize`] | Raw payload → canonical record transforms |
//! | [`pacing`] | Minimum inter-request interval enforcement |
//!
//! ## Error Handling
//!
//! Provider calls return [`FetchError`] values rather than panicking so a
//! single symbol's failure never aborts a collection pass:
//!
//! ```rust
//! use tickdrop_core::{FetchError, FetchErrorKind};
//!
//! fn record(error: &FetchError) -> bool {
//!     // transient kinds are worth retrying on a later run
//!     matches!(
//!         error.kind(),
//!         FetchErrorKind::Timeout | FetchErrorKind::Connection
//!     )
//! }
//! ```

pub mod client;
pub mod directory;
pub mod domain;
pub mod error;
pub mod http;
pub mod normalize;
pub mod pacing;

pub use client::QuoteClient;
pub use directory::{CapTier, CompanyDirectory, CompanyRecord};
pub use domain::{FundamentalsRecord, StockQuote, Symbol, UtcDateTime};
pub use error::{FetchError, FetchErrorKind, ValidationError};
pub use http::{HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use pacing::RequestPacer;
