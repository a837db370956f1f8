//! Rate-paced client for the Alpha Vantage query API.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::http::{HttpClient, HttpError, HttpErrorKind, HttpRequest, ReqwestHttpClient};
use crate::pacing::RequestPacer;
use crate::{FetchError, Symbol};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BODY_EXCERPT_LEN: usize = 100;

/// Provider client enforcing the free-tier request spacing.
///
/// All calls return [`FetchError`] values instead of panicking; the caller
/// records the failure and moves on to the next symbol.
#[derive(Clone)]
pub struct QuoteClient {
    http: Arc<dyn HttpClient>,
    pacer: RequestPacer,
    base_url: String,
    api_key: String,
}

impl QuoteClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), api_key)
    }

    pub fn with_http_client(http: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            pacer: RequestPacer::free_tier(),
            base_url: String::from(DEFAULT_BASE_URL),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn pacer(&self) -> &RequestPacer {
        &self.pacer
    }

    /// Latest intraday series for one symbol (5min interval, compact window).
    pub async fn fetch_quote(&self, symbol: &Symbol) -> Result<Value, FetchError> {
        self.request(&[
            ("function", "TIME_SERIES_INTRADAY"),
            ("symbol", symbol.as_str()),
            ("interval", "5min"),
            ("outputsize", "compact"),
            ("datatype", "json"),
        ])
        .await
    }

    /// Company overview (fundamentals) for one symbol.
    pub async fn fetch_overview(&self, symbol: &Symbol) -> Result<Value, FetchError> {
        self.request(&[("function", "OVERVIEW"), ("symbol", symbol.as_str())])
            .await
    }

    async fn request(&self, params: &[(&str, &str)]) -> Result<Value, FetchError> {
        self.pacer.pace().await;

        let url = self.build_url(params);
        let request = HttpRequest::get(url).with_timeout(REQUEST_TIMEOUT);
        let response = self
            .http
            .execute(request)
            .await
            .map_err(transport_to_fetch)?;

        if !response.is_success() {
            return Err(FetchError::http(
                response.status,
                excerpt(&response.body),
            ));
        }

        let body: Value = serde_json::from_str(&response.body)
            .map_err(|_| FetchError::parse("response body is not valid JSON"))?;

        if let Some(message) = body.get("Error Message").and_then(Value::as_str) {
            return Err(FetchError::provider(message));
        }

        // A rate-limit notice still carries data; escalate spacing and
        // hand the body back.
        if let Some(note) = body.get("Note").and_then(Value::as_str) {
            if note.to_ascii_lowercase().contains("rate limit") {
                tracing::warn!(note, "provider rate limit notice");
                self.pacer.escalate();
            } else {
                tracing::info!(note, "provider note");
            }
        }

        Ok(body)
    }

    fn build_url(&self, params: &[(&str, &str)]) -> String {
        let mut url = String::from(&self.base_url);
        let mut separator = '?';
        for (name, value) in params {
            url.push(separator);
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            separator = '&';
        }
        url.push_str(&format!("{separator}apikey={}", self.api_key));
        url
    }
}

fn transport_to_fetch(error: HttpError) -> FetchError {
    match error.kind() {
        HttpErrorKind::Timeout => FetchError::timeout(error.message()),
        HttpErrorKind::Connect => FetchError::connection(error.message()),
        HttpErrorKind::Transport => FetchError::connection(error.message()),
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::pacing::ESCALATED_INTERVAL;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    struct ScriptedHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedHttpClient {
        fn returning(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn recorded(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for ScriptedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    #[tokio::test(start_paused = true)]
    async fn quote_url_carries_function_symbol_and_api_key() {
        let http = ScriptedHttpClient::returning(Ok(HttpResponse::ok_json("{}")));
        let client = QuoteClient::with_http_client(http.clone(), "secret-key");

        client
            .fetch_quote(&symbol("AAPL"))
            .await
            .expect("fetch should succeed");

        let requests = http.recorded();
        assert_eq!(requests.len(), 1);
        let url = &requests[0].url;
        assert!(url.contains("function=TIME_SERIES_INTRADAY"));
        assert!(url.contains("symbol=AAPL"));
        assert!(url.contains("interval=5min"));
        assert!(url.ends_with("apikey=secret-key"));
        assert_eq!(requests[0].timeout, Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn provider_error_field_maps_to_provider_failure() {
        let http = ScriptedHttpClient::returning(Ok(HttpResponse::ok_json(
            r#"{"Error Message": "Invalid API call for symbol FOO"}"#,
        )));
        let client = QuoteClient::with_http_client(http, "secret-key");

        let error = client
            .fetch_quote(&symbol("FOO"))
            .await
            .expect_err("must fail");
        assert_eq!(error.kind(), crate::FetchErrorKind::Provider);
        assert!(error.message().contains("Invalid API call"));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_note_returns_data_and_escalates_spacing() {
        let http = ScriptedHttpClient::returning(Ok(HttpResponse::ok_json(
            r#"{"Note": "Thank you! Our standard API rate limit is 5 requests per minute.", "Time Series (5min)": {}}"#,
        )));
        let client = QuoteClient::with_http_client(http, "secret-key");

        let body = client
            .fetch_quote(&symbol("AAPL"))
            .await
            .expect("note is not a failure");
        assert!(body.get("Time Series (5min)").is_some());
        assert_eq!(client.pacer().min_interval(), ESCALATED_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn non_2xx_status_maps_to_http_failure() {
        let http = ScriptedHttpClient::returning(Ok(HttpResponse {
            status: 503,
            body: String::from("service unavailable"),
        }));
        let client = QuoteClient::with_http_client(http, "secret-key");

        let error = client
            .fetch_overview(&symbol("AAPL"))
            .await
            .expect_err("must fail");
        assert_eq!(error.kind(), crate::FetchErrorKind::Http);
        assert!(error.retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_body_maps_to_parse_failure() {
        let http = ScriptedHttpClient::returning(Ok(HttpResponse::ok_json("<html>oops</html>")));
        let client = QuoteClient::with_http_client(http, "secret-key");

        let error = client
            .fetch_quote(&symbol("AAPL"))
            .await
            .expect_err("must fail");
        assert_eq!(error.kind(), crate::FetchErrorKind::Parse);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_timeout_maps_to_timeout_failure() {
        let http = ScriptedHttpClient::returning(Err(HttpError::new(
            HttpErrorKind::Timeout,
            "request timeout: 30s elapsed",
        )));
        let client = QuoteClient::with_http_client(http, "secret-key");

        let error = client
            .fetch_quote(&symbol("AAPL"))
            .await
            .expect_err("must fail");
        assert_eq!(error.kind(), crate::FetchErrorKind::Timeout);
        assert!(error.retryable());
    }
}
