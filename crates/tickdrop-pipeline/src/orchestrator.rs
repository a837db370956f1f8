//! Per-symbol collection loop and end-of-pass persistence.

use tickdrop_core::normalize;
use tickdrop_core::{CompanyDirectory, FundamentalsRecord, QuoteClient, StockQuote, Symbol, UtcDateTime};
use tickdrop_store::BatchWriter;

use crate::gate::fundamentals_window_open;
use crate::summary::{round_seconds, RunSummary, StoreResults};

const PROGRESS_EVERY: usize = 5;

/// Drives one full pass over the company directory.
pub struct Orchestrator {
    client: QuoteClient,
    directory: CompanyDirectory,
    writer: BatchWriter,
}

impl Orchestrator {
    pub fn new(client: QuoteClient, directory: CompanyDirectory, writer: BatchWriter) -> Self {
        Self {
            client,
            directory,
            writer,
        }
    }

    /// Run a pass gated on the current wall clock.
    pub async fn run(&self) -> RunSummary {
        self.run_at(UtcDateTime::now()).await
    }

    /// Run a pass as if invoked at `now`; the fundamentals gate and the
    /// summary timestamp both derive from it.
    pub async fn run_at(&self, now: UtcDateTime) -> RunSummary {
        let started = tokio::time::Instant::now();
        let symbols = self.directory.symbols();
        let total = symbols.len();
        let collect_fundamentals = fundamentals_window_open(now);

        tracing::info!(total, "starting collection pass");
        if collect_fundamentals {
            tracing::info!("fundamentals window open; collecting overview data this run");
        }

        let mut quotes: Vec<StockQuote> = Vec::with_capacity(total);
        let mut fundamentals: Vec<FundamentalsRecord> = Vec::new();
        let mut failed_symbols: Vec<String> = Vec::new();

        for (index, symbol) in symbols.iter().enumerate() {
            tracing::info!(%symbol, position = index + 1, total, "processing symbol");

            // Symbol boundary: any failure below is recorded for this
            // symbol only and the loop moves on.
            match self.collect_quote(symbol).await {
                Ok(quote) => {
                    tracing::info!(
                        %symbol,
                        price = quote.price,
                        change_percent = quote.change_percent,
                        "quote collected"
                    );
                    quotes.push(quote);
                }
                Err(reason) => {
                    tracing::warn!(%symbol, %reason, "quote collection failed");
                    failed_symbols.push(symbol.to_string());
                }
            }

            // Fundamentals collection is independent of the quote outcome
            // and its failures are logged, not tracked per symbol.
            if collect_fundamentals {
                if let Some(record) = self.collect_fundamentals(symbol).await {
                    fundamentals.push(record);
                }
            }

            if (index + 1) % PROGRESS_EVERY == 0 {
                let percent = (index + 1) as f64 / total as f64 * 100.0;
                tracing::info!(done = index + 1, total, percent, "progress");
            }
        }

        let mut store_results = StoreResults::default();
        if !quotes.is_empty() {
            store_results.quotes_saved = self.writer.save_quotes(&quotes).await;
        }
        if collect_fundamentals && !fundamentals.is_empty() {
            store_results.fundamentals_saved = self.writer.save_fundamentals(&fundamentals).await;
        }

        let execution_time_seconds = round_seconds(started.elapsed().as_secs_f64());
        let summary = RunSummary {
            status: String::from("completed"),
            execution_time_seconds,
            companies_total: total,
            quotes_successful: quotes.len(),
            fundamentals_successful: fundamentals.len(),
            failed_symbols,
            store_results,
            timestamp: now,
        };

        tracing::info!(
            quotes = summary.quotes_successful,
            fundamentals = summary.fundamentals_successful,
            failed = summary.failed_symbols.len(),
            quotes_saved = summary.store_results.quotes_saved,
            fundamentals_saved = summary.store_results.fundamentals_saved,
            elapsed_secs = summary.execution_time_seconds,
            "collection pass finished"
        );

        summary
    }

    async fn collect_quote(&self, symbol: &Symbol) -> Result<StockQuote, String> {
        let raw = self
            .client
            .fetch_quote(symbol)
            .await
            .map_err(|error| error.to_string())?;

        normalize::latest_quote(&raw, symbol, &self.directory)
            .ok_or_else(|| String::from("no usable time series in response"))
    }

    async fn collect_fundamentals(&self, symbol: &Symbol) -> Option<FundamentalsRecord> {
        match self.client.fetch_overview(symbol).await {
            Ok(raw) => {
                let record = normalize::overview(&raw);
                if record.is_none() {
                    tracing::warn!(%symbol, "overview response carried no fundamentals");
                }
                record
            }
            Err(error) => {
                tracing::warn!(%symbol, %error, "fundamentals fetch failed");
                None
            }
        }
    }
}
