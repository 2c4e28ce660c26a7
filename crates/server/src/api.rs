use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use finance_dashboard_core::models::chat::{ChatMessage, ChatRequest};
use finance_dashboard_core::models::market::{EodPrice, Ticker};
use finance_dashboard_core::services::currency_service::{Rates, BASE_CURRENCY};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub const RATES_SOURCE: &str = "Latest market data from major financial institutions";

pub async fn healthz() -> &'static str {
    "ok"
}

// ── Market data ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SymbolQuery {
    symbol: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

async fn end_of_day(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SymbolQuery>,
) -> ApiResult<Json<DataResponse<EodPrice>>> {
    let symbol = query
        .symbol
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Symbol is required".into()))?;

    let data = state.market_data.end_of_day(&symbol).await.map_err(|e| {
        tracing::error!("Error fetching stock data for {symbol}: {e}");
        ApiError::Core(e)
    })?;
    Ok(Json(DataResponse { data }))
}

async fn list_tickers(State(state): State<Arc<AppState>>) -> ApiResult<Json<DataResponse<Ticker>>> {
    let data = state.market_data.tickers().await.map_err(|e| {
        tracing::error!("Error fetching stock symbols: {e}");
        ApiError::Core(e)
    })?;
    Ok(Json(DataResponse { data }))
}

// ── Currency ────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct BaseQuery {
    base: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct RatesResponse {
    pub success: bool,
    pub base: String,
    pub date: String,
    pub rates: Rates,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<String>,
}

async fn currency_rates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BaseQuery>,
) -> ApiResult<Json<RatesResponse>> {
    let base = query
        .base
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| BASE_CURRENCY.to_string());
    let rates = state.currency_service.rates_for_base(&base)?;

    let source = (base != BASE_CURRENCY).then(|| RATES_SOURCE.to_string());
    Ok(Json(RatesResponse {
        success: true,
        base,
        date: Utc::now().to_rfc3339(),
        rates,
        source,
    }))
}

// ── Chat ────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: ChatMessage,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    if request.user_data.is_none() {
        return Err(ApiError::BadRequest("User data is required".into()));
    }
    let response = state.chat_service.respond(request).await.map_err(|e| {
        tracing::error!("Error in chat completion: {e}");
        ApiError::Internal("Failed to generate response".into())
    })?;
    Ok(Json(ChatResponse { response }))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {o}");
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };
    let cors = cors.allow_methods(Any).allow_headers(Any);

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/stocks", get(end_of_day).post(list_tickers))
        .route("/currency", get(currency_rates))
        .route("/chat", post(chat));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
