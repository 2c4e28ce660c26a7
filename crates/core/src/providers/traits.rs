use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::chat::ChatMessage;
use crate::models::market::{EodPrice, Ticker};

/// Source of end-of-day prices and the list of tradable instruments.
///
/// The HTTP layer and any client depend on this trait only. Swapping the
/// upstream vendor means writing one new implementation.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Up to 30 most recent end-of-day records for `symbol`, newest first.
    async fn end_of_day(&self, symbol: &str) -> Result<Vec<EodPrice>, CoreError>;

    /// Up to 100 listed instruments.
    async fn tickers(&self) -> Result<Vec<Ticker>, CoreError>;
}

/// A hosted language model that answers a conversation with one message.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChatCompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, CoreError>;
}
