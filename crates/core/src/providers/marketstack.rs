use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::market::{EodPrice, Ticker};
use super::traits::MarketDataProvider;

pub const DEFAULT_BASE_URL: &str = "http://api.marketstack.com/v1";
pub const EOD_LIMIT: u32 = 30;
pub const TICKER_LIMIT: u32 = 100;

const PROVIDER: &str = "Marketstack";

/// Marketstack API provider for end-of-day stock data.
///
/// - **Requires**: access key (`MARKETSTACK_API_KEY` on the server).
/// - **Endpoints**: `/eod` for daily bars, `/tickers` for the symbol list.
/// - Failures are reported in the body as `{"error": {"code", "message"}}`.
pub struct MarketstackProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl MarketstackProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point at another deployment (or a local mock).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, CoreError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let mut params: Vec<(&str, String)> = vec![("access_key", self.api_key.clone())];
        params.extend(query.iter().cloned());

        let resp = self.client.get(&url).query(&params).send().await?;
        let status = resp.status();
        let body: Envelope<T> = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse /{endpoint} response ({status}): {e}"),
        })?;

        if let Some(err) = body.error {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: err.message,
            });
        }
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("/{endpoint} returned {status}"),
            });
        }
        Ok(body.data.unwrap_or_default())
    }
}

// ── Marketstack API response types ──────────────────────────────────

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<Vec<T>>,
    error: Option<UpstreamError>,
}

#[derive(Deserialize)]
struct UpstreamError {
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct TickerRecord {
    name: String,
    symbol: String,
    #[serde(default)]
    stock_exchange: Option<StockExchange>,
}

#[derive(Deserialize)]
struct StockExchange {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    acronym: Option<String>,
    #[serde(default)]
    mic: Option<String>,
}

impl From<TickerRecord> for Ticker {
    fn from(record: TickerRecord) -> Self {
        let exchange = record
            .stock_exchange
            .and_then(|ex| ex.acronym.or(ex.mic).or(ex.name));
        Ticker {
            name: record.name,
            symbol: record.symbol,
            exchange,
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for MarketstackProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn end_of_day(&self, symbol: &str) -> Result<Vec<EodPrice>, CoreError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CoreError::ValidationError("Symbol is required".into()));
        }
        log::debug!("Fetching end-of-day prices for {symbol}");
        self.fetch(
            "eod",
            &[("symbols", symbol), ("limit", EOD_LIMIT.to_string())],
        )
        .await
    }

    async fn tickers(&self) -> Result<Vec<Ticker>, CoreError> {
        let records: Vec<TickerRecord> = self
            .fetch("tickers", &[("limit", TICKER_LIMIT.to_string())])
            .await?;
        Ok(records.into_iter().map(Ticker::from).collect())
    }
}
