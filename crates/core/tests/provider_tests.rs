// ═══════════════════════════════════════════════════════════════════
// Provider Tests: market data and chat-completion traits, Marketstack
// and OpenAI-compatible clients, ChatService prompt assembly
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use std::sync::{Arc, Mutex};

use finance_dashboard_core::errors::CoreError;
use finance_dashboard_core::models::chat::{ChatMessage, ChatRequest, ChatRole, UserDataSnapshot};
use finance_dashboard_core::models::expense::NewExpense;
use finance_dashboard_core::models::history::HistorySample;
use finance_dashboard_core::models::holding::Holding;
use finance_dashboard_core::models::market::{EodPrice, StockQuote, Ticker};
use finance_dashboard_core::providers::chat::{
    OpenAiCompatibleProvider, DEFAULT_MODEL,
};
use finance_dashboard_core::providers::marketstack::MarketstackProvider;
use finance_dashboard_core::providers::traits::{ChatCompletionProvider, MarketDataProvider};
use finance_dashboard_core::services::chat_service::{build_system_prompt, ChatService, ANSWER_RULES};

/// Nothing listens here, so every request fails at connect time.
const CLOSED_PORT_URL: &str = "http://127.0.0.1:9";

/// Answer one HTTP request on a local port with a canned JSON body.
/// Returns the base URL to point a provider at.
async fn serve_once(status: &'static str, body: serde_json::Value) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = vec![0u8; 8192];
        let _ = socket.read(&mut request).await;
        let body = body.to_string();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}")
}

// ═══════════════════════════════════════════════════════════════════
// Test Helpers: Mock Providers
// ═══════════════════════════════════════════════════════════════════

struct MockMarket;

#[async_trait]
impl MarketDataProvider for MockMarket {
    fn name(&self) -> &str {
        "MockMarket"
    }

    async fn end_of_day(&self, symbol: &str) -> Result<Vec<EodPrice>, CoreError> {
        Ok(["2025-01-16", "2025-01-15"]
            .iter()
            .zip([190.0, 185.0])
            .map(|(date, close)| EodPrice {
                symbol: symbol.to_string(),
                date: format!("{date}T00:00:00+0000"),
                open: None,
                high: None,
                low: None,
                close,
                volume: None,
            })
            .collect())
    }

    async fn tickers(&self) -> Result<Vec<Ticker>, CoreError> {
        Ok(vec![Ticker {
            name: "Microsoft Corp".into(),
            symbol: "MSFT".into(),
            exchange: Some("NASDAQ".into()),
        }])
    }
}

/// Echoes the number of messages it saw and keeps a copy of them.
#[derive(Default)]
struct RecordingChat {
    seen: Mutex<Vec<ChatMessage>>,
}

#[async_trait]
impl ChatCompletionProvider for RecordingChat {
    fn name(&self) -> &str {
        "RecordingChat"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage, CoreError> {
        *self.seen.lock().unwrap() = messages.to_vec();
        Ok(ChatMessage::assistant(format!("{} messages", messages.len())))
    }
}

fn snapshot() -> UserDataSnapshot {
    let purchased = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
    UserDataSnapshot {
        expenses: vec![NewExpense {
            amount: 1234.5,
            category: "Housing".into(),
            currency: "USD".into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            description: "Rent".into(),
        }
        .into_expense()],
        stock_portfolio: vec![Holding::new("AAPL", "Apple Inc.", 2.0, 100.0, purchased)],
        stock_history: vec![HistorySample::new(purchased, 200.0)],
        crypto_portfolio: Vec::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trait objects
// ═══════════════════════════════════════════════════════════════════

mod trait_objects {
    use super::*;

    #[tokio::test]
    async fn market_provider_behind_arc_dyn() {
        let provider: Arc<dyn MarketDataProvider> = Arc::new(MockMarket);
        let prices = provider.end_of_day("AAPL").await.unwrap();
        assert_eq!(prices.len(), 2);

        let quote = StockQuote::from_latest(&prices).unwrap();
        assert_eq!(quote.close, 190.0);

        let tickers = provider.tickers().await.unwrap();
        assert_eq!(tickers[0].symbol, "MSFT");
    }

    #[test]
    fn providers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn MarketDataProvider>();
        assert_send_sync::<dyn ChatCompletionProvider>();
        assert_send_sync::<MarketstackProvider>();
        assert_send_sync::<OpenAiCompatibleProvider>();
    }
}

// ═══════════════════════════════════════════════════════════════════
// MarketstackProvider
// ═══════════════════════════════════════════════════════════════════

mod marketstack {
    use super::*;

    #[test]
    fn name() {
        assert_eq!(MarketstackProvider::new("key".into()).name(), "Marketstack");
    }

    #[tokio::test]
    async fn blank_symbol_is_rejected_before_any_request() {
        let provider = MarketstackProvider::with_base_url("key".into(), CLOSED_PORT_URL.into());
        let err = provider.end_of_day("   ").await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_network_error_without_key() {
        let provider =
            MarketstackProvider::with_base_url("super-secret-key".into(), format!("{CLOSED_PORT_URL}/"));
        let err = provider.end_of_day("AAPL").await.unwrap_err();
        match err {
            CoreError::Network(msg) => assert!(!msg.contains("super-secret-key"), "{msg}"),
            other => panic!("expected Network, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn eod_response_is_decoded() {
        let url = serve_once(
            "200 OK",
            json!({
                "pagination": {"limit": 30, "offset": 0, "count": 2, "total": 2},
                "data": [
                    {"symbol": "AAPL", "date": "2025-01-16T00:00:00+0000", "open": 186.0, "close": 190.0, "volume": 1000.0},
                    {"symbol": "AAPL", "date": "2025-01-15T00:00:00+0000", "close": 185.0}
                ]
            }),
        )
        .await;
        let provider = MarketstackProvider::with_base_url("key".into(), url);

        let prices = provider.end_of_day("aapl").await.unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].close, 190.0);
        assert_eq!(prices[0].open, Some(186.0));
        assert!(prices[1].open.is_none());
    }

    #[tokio::test]
    async fn tickers_response_is_mapped() {
        let url = serve_once(
            "200 OK",
            json!({
                "data": [{
                    "name": "Microsoft Corp",
                    "symbol": "MSFT",
                    "stock_exchange": {"name": "NASDAQ Stock Exchange", "acronym": "NASDAQ", "mic": "XNAS"}
                }]
            }),
        )
        .await;
        let provider = MarketstackProvider::with_base_url("key".into(), url);

        let tickers = provider.tickers().await.unwrap();
        assert_eq!(tickers[0].symbol, "MSFT");
        assert_eq!(tickers[0].exchange.as_deref(), Some("NASDAQ"));
    }

    #[tokio::test]
    async fn body_error_is_surfaced() {
        let url = serve_once(
            "401 Unauthorized",
            json!({"error": {"code": "invalid_access_key", "message": "You have not supplied a valid API Access Key."}}),
        )
        .await;
        let provider = MarketstackProvider::with_base_url("bad".into(), url);

        match provider.end_of_day("AAPL").await.unwrap_err() {
            CoreError::Api { provider, message } => {
                assert_eq!(provider, "Marketstack");
                assert_eq!(message, "You have not supplied a valid API Access Key.");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_data_is_empty() {
        let url = serve_once("200 OK", json!({"pagination": {"count": 0}})).await;
        let provider = MarketstackProvider::with_base_url("key".into(), url);
        assert!(provider.end_of_day("AAPL").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_upstream_for_tickers() {
        let provider = MarketstackProvider::with_base_url("k".into(), CLOSED_PORT_URL.into());
        assert!(matches!(
            provider.tickers().await,
            Err(CoreError::Network(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// OpenAiCompatibleProvider
// ═══════════════════════════════════════════════════════════════════

mod openai_compatible {
    use super::*;

    #[test]
    fn defaults() {
        let provider = OpenAiCompatibleProvider::new("key".into());
        assert_eq!(provider.model(), DEFAULT_MODEL);
        assert_eq!(provider.name(), "OpenAI-compatible");
    }

    #[test]
    fn custom_model() {
        let provider = OpenAiCompatibleProvider::with_options(
            "key".into(),
            "http://localhost:8080/v1/".into(),
            "tiny-model".into(),
            0.2,
        );
        assert_eq!(provider.model(), "tiny-model");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let provider = OpenAiCompatibleProvider::with_options(
            "key".into(),
            CLOSED_PORT_URL.into(),
            DEFAULT_MODEL.into(),
            0.7,
        );
        let err = provider
            .complete(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChatService
// ═══════════════════════════════════════════════════════════════════

mod chat_service {
    use super::*;

    #[test]
    fn prompt_embeds_records_and_totals() {
        let prompt = build_system_prompt(&snapshot()).unwrap();
        assert!(prompt.starts_with("You are a helpful financial advisor chatbot."));
        assert!(prompt.contains(r#""category":"Housing""#));
        assert!(prompt.contains(r#""symbol":"AAPL""#));
        assert!(prompt.contains("Crypto Portfolio: []"));
        assert!(prompt.contains("Total Expenses: $1234.50"));
        // Stock cost basis
        assert!(prompt.contains("Portfolio Value: $200.00"));
    }

    #[test]
    fn prompt_numbers_every_rule() {
        let prompt = build_system_prompt(&UserDataSnapshot::default()).unwrap();
        for (i, rule) in ANSWER_RULES.iter().enumerate() {
            assert!(prompt.contains(&format!("{}. {rule}", i + 1)), "missing rule {rule}");
        }
        assert!(prompt.contains("Total Expenses: $0.00"));
        assert!(prompt.ends_with("based ONLY on the actual data shown above."));
    }

    #[tokio::test]
    async fn respond_prepends_system_message() {
        let provider = Arc::new(RecordingChat::default());
        let service = ChatService::new(provider.clone());

        let reply = service
            .respond(ChatRequest {
                messages: vec![
                    ChatMessage::user("How much rent did I pay?"),
                    ChatMessage::assistant("Let me check."),
                    ChatMessage::user("Well?"),
                ],
                user_data: Some(snapshot()),
            })
            .await
            .unwrap();

        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.content, "4 messages");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].role, ChatRole::System);
        assert!(seen[0].content.contains("Rent"));
        assert_eq!(seen[3].content, "Well?");
    }

    #[tokio::test]
    async fn respond_requires_user_data() {
        let provider = Arc::new(RecordingChat::default());
        let service = ChatService::new(provider.clone());

        let err = service
            .respond(ChatRequest {
                messages: vec![ChatMessage::user("hi")],
                user_data: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: User data is required");
        assert!(provider.seen.lock().unwrap().is_empty());
    }
}
