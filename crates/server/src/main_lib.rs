use std::sync::Arc;

use finance_dashboard_core::providers::chat::OpenAiCompatibleProvider;
use finance_dashboard_core::providers::marketstack::MarketstackProvider;
use finance_dashboard_core::providers::traits::{ChatCompletionProvider, MarketDataProvider};
use finance_dashboard_core::services::chat_service::ChatService;
use finance_dashboard_core::services::currency_service::CurrencyService;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub market_data: Arc<dyn MarketDataProvider>,
    pub chat_service: ChatService,
    pub currency_service: CurrencyService,
}

impl AppState {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider>,
        chat_provider: Arc<dyn ChatCompletionProvider>,
    ) -> Self {
        Self {
            market_data,
            chat_service: ChatService::new(chat_provider),
            currency_service: CurrencyService::new(),
        }
    }
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let market_data = MarketstackProvider::with_base_url(
        config.marketstack_api_key.clone(),
        config.marketstack_base_url.clone(),
    );
    let chat = OpenAiCompatibleProvider::with_options(
        config.llm_api_key.clone(),
        config.llm_base_url.clone(),
        config.llm_model.clone(),
        config.llm_temperature,
    );
    tracing::info!(
        "Market data via {} ({}), chat model {}",
        market_data.name(),
        config.marketstack_base_url,
        chat.model()
    );
    Ok(Arc::new(AppState::new(Arc::new(market_data), Arc::new(chat))))
}
