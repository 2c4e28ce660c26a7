// ═══════════════════════════════════════════════════════════════════
// Model Tests: Holding, TimeRange, Frequency, goals, market data,
// notifications, chat snapshots, import mapping, serde shapes
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

use finance_dashboard_core::models::chart::{Interval, TimeRange, TIME_RANGES};
use finance_dashboard_core::models::chat::{ChatMessage, ChatRequest, ChatRole, UserDataSnapshot};
use finance_dashboard_core::models::expense::{default_categories, Expense, NewExpense};
use finance_dashboard_core::models::goal::{NewGoal, TimeRemaining};
use finance_dashboard_core::models::history::{HistorySample, PortfolioState};
use finance_dashboard_core::models::holding::Holding;
use finance_dashboard_core::models::import::ColumnMapping;
use finance_dashboard_core::models::market::{EodPrice, StockQuote};
use finance_dashboard_core::models::notification::{
    AlertKind, Notification, NotificationKind, NotificationPreferences,
};
use finance_dashboard_core::models::recurring::{Frequency, NewRecurringExpense};
use finance_dashboard_core::models::report::{FinancialReport, ReportSection, ReportTable};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ts(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Holding
// ═══════════════════════════════════════════════════════════════════

mod holding {
    use super::*;

    #[test]
    fn new_uppercases_and_trims_symbol() {
        let h = Holding::new(" aapl ", "Apple Inc.", 2.0, 100.0, ts(2025, 1, 1));
        assert_eq!(h.symbol, "AAPL");
        assert!(h.current_price.is_none());
    }

    #[test]
    fn new_assigns_distinct_ids() {
        let a = Holding::new("AAPL", "Apple", 1.0, 1.0, ts(2025, 1, 1));
        let b = Holding::new("AAPL", "Apple", 1.0, 1.0, ts(2025, 1, 1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn value_falls_back_to_purchase_price() {
        let h = Holding::new("AAPL", "Apple", 2.0, 100.0, ts(2025, 1, 1));
        assert_eq!(h.cost_basis(), 200.0);
        assert_eq!(h.current_value(), 200.0);
        assert_eq!(h.gain_loss(), 0.0);
    }

    #[test]
    fn value_uses_current_price() {
        let h = Holding::new("AAPL", "Apple", 2.0, 100.0, ts(2025, 1, 1)).with_current_price(150.0);
        assert_eq!(h.current_value(), 300.0);
        assert_eq!(h.gain_loss(), 100.0);
    }

    #[test]
    fn serializes_camel_case() {
        let h = Holding::new("BTC", "Bitcoin", 0.5, 40000.0, ts(2025, 1, 1)).with_current_price(42000.0);
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(v["purchasePrice"], 40000.0);
        assert_eq!(v["currentPrice"], 42000.0);
        assert!(v.get("purchaseDate").is_some());
    }

    #[test]
    fn deserializes_without_price() {
        let h: Holding = serde_json::from_value(json!({
            "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
            "symbol": "ETH",
            "name": "Ethereum",
            "quantity": 3.0,
            "purchasePrice": 2500.0,
            "purchaseDate": "2025-01-15T00:00:00Z"
        }))
        .unwrap();
        assert!(h.current_price.is_none());
        assert_eq!(h.cost_basis(), 7500.0);
    }

    #[test]
    fn accepts_snake_case_current_price() {
        let h: Holding = serde_json::from_value(json!({
            "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
            "symbol": "ETH",
            "name": "Ethereum",
            "quantity": 1.0,
            "purchasePrice": 2500.0,
            "current_price": 2600.0,
            "purchaseDate": "2025-01-15T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(h.current_price, Some(2600.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
// History
// ═══════════════════════════════════════════════════════════════════

mod history {
    use super::*;

    #[test]
    fn sample_serializes_timestamp_as_date() {
        let s = HistorySample::new(ts(2025, 3, 1), 1234.5);
        let v = serde_json::to_value(s).unwrap();
        assert_eq!(v["value"], 1234.5);
        assert!(v["date"].as_str().unwrap().starts_with("2025-03-01"));
    }

    #[test]
    fn state_defaults_missing_fields() {
        let state: PortfolioState = serde_json::from_value(json!({})).unwrap();
        assert!(state.holdings.is_empty());
        assert!(state.history.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// TimeRange
// ═══════════════════════════════════════════════════════════════════

mod time_range {
    use super::*;

    #[test]
    fn predefined_table() {
        assert_eq!(TIME_RANGES.len(), 8);
        let all = TimeRange::all();
        assert_eq!(all.first().unwrap().label, "1D");
        assert_eq!(all.last().unwrap().label, "10Y");
        assert!(all.windows(2).all(|w| w[0].days < w[1].days));
    }

    #[test]
    fn from_label_is_case_insensitive() {
        let r = TimeRange::from_label("3m");
        assert_eq!(r.label, "3M");
        assert_eq!(r.days, 90);
        assert_eq!(r.interval, Interval::Weekly);
    }

    #[test]
    fn label_intervals() {
        assert_eq!(TimeRange::from_label("1D").interval, Interval::Hourly);
        assert_eq!(TimeRange::from_label("1W").interval, Interval::Daily);
        assert_eq!(TimeRange::from_label("1M").interval, Interval::Daily);
        assert_eq!(TimeRange::from_label("6M").interval, Interval::Weekly);
        assert_eq!(TimeRange::from_label("1Y").interval, Interval::Monthly);
        assert_eq!(TimeRange::from_label("5Y").days, 1825);
        assert_eq!(TimeRange::from_label("10Y").interval, Interval::Yearly);
    }

    #[test]
    fn unknown_label_falls_back_to_one_day() {
        let r = TimeRange::from_label("2W");
        assert_eq!(r.label, "1D");
        assert_eq!(r.days, 1);
    }

    #[test]
    fn custom_range() {
        let r = TimeRange::custom(90, Interval::Monthly);
        assert_eq!(r.days, 90);
        assert_eq!(r.interval, Interval::Monthly);
        assert_eq!(r.label, "90D/monthly");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Expenses
// ═══════════════════════════════════════════════════════════════════

mod expense {
    use super::*;

    #[test]
    fn default_category_list() {
        let cats = default_categories();
        assert_eq!(cats.len(), 8);
        assert!(cats.contains(&"Food".to_string()));
        assert_eq!(cats.last().unwrap(), "Other");
    }

    #[test]
    fn into_expense_normalizes() {
        let e = NewExpense {
            amount: 12.5,
            category: " Food ".into(),
            currency: "eur".into(),
            date: day(2025, 2, 3),
            description: "Lunch".into(),
        }
        .into_expense();
        assert_eq!(e.category, "Food");
        assert_eq!(e.currency, "EUR");
    }

    #[test]
    fn date_serializes_as_iso_day() {
        let e = NewExpense {
            amount: 1.0,
            category: "Food".into(),
            currency: "USD".into(),
            date: day(2025, 2, 3),
            description: String::new(),
        }
        .into_expense();
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["date"], "2025-02-03");
        let back: Expense = serde_json::from_value(v).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn date_accepts_full_timestamp() {
        let e: Expense = serde_json::from_value(json!({
            "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
            "amount": 15.99,
            "category": "Entertainment",
            "currency": "USD",
            "date": "2025-02-03T00:00:00.000Z",
            "description": "[Recurring] Streaming"
        }))
        .unwrap();
        assert_eq!(e.date, day(2025, 2, 3));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = serde_json::from_value::<Expense>(json!({
            "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
            "amount": 1.0,
            "category": "Food",
            "currency": "USD",
            "date": "03/02/2025"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Frequency / recurring
// ═══════════════════════════════════════════════════════════════════

mod frequency {
    use super::*;

    #[test]
    fn advance_daily_and_weekly() {
        assert_eq!(Frequency::Daily.advance(day(2024, 12, 31)), Some(day(2025, 1, 1)));
        assert_eq!(Frequency::Weekly.advance(day(2025, 1, 28)), Some(day(2025, 2, 4)));
    }

    #[test]
    fn monthly_clamps_to_month_end() {
        assert_eq!(Frequency::Monthly.advance(day(2025, 1, 31)), Some(day(2025, 2, 28)));
        assert_eq!(Frequency::Monthly.advance(day(2024, 1, 31)), Some(day(2024, 2, 29)));
    }

    #[test]
    fn yearly_from_leap_day() {
        assert_eq!(Frequency::Yearly.advance(day(2024, 2, 29)), Some(day(2025, 2, 28)));
    }

    #[test]
    fn monthly_factors() {
        assert_eq!(Frequency::Daily.monthly_factor(), 30.0);
        assert_eq!(Frequency::Weekly.monthly_factor(), 4.33);
        assert_eq!(Frequency::Monthly.monthly_factor(), 1.0);
        assert!((Frequency::Yearly.monthly_factor() * 12.0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_value(Frequency::Weekly).unwrap(), "weekly");
        assert_eq!(Frequency::Weekly.to_string(), "Weekly");
    }

    #[test]
    fn into_recurring_starts_enabled_and_due_on_start() {
        let r = NewRecurringExpense {
            description: "Rent".into(),
            amount: 1200.0,
            category: "Housing".into(),
            currency: "usd".into(),
            frequency: Frequency::Monthly,
            start_date: day(2025, 1, 1),
        }
        .into_recurring();
        assert!(r.enabled);
        assert_eq!(r.next_due_date, day(2025, 1, 1));
        assert_eq!(r.currency, "USD");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Goals
// ═══════════════════════════════════════════════════════════════════

mod goal {
    use super::*;

    #[test]
    fn into_goal_fills_defaults() {
        let g = NewGoal {
            name: " Vacation ".into(),
            target_amount: 3000.0,
            saved_amount: 0.0,
            category: None,
            deadline: day(2025, 8, 1),
            currency: None,
            color: None,
        }
        .into_goal();
        assert_eq!(g.name, "Vacation");
        assert_eq!(g.category, "savings");
        assert_eq!(g.currency, "USD");
        assert_eq!(g.color, "green");
    }

    #[test]
    fn time_remaining_display() {
        assert_eq!(TimeRemaining::Overdue.to_string(), "Overdue");
        assert_eq!(TimeRemaining::DueToday.to_string(), "Due today");
        assert_eq!(TimeRemaining::DaysRemaining(1).to_string(), "1 day remaining");
        assert_eq!(TimeRemaining::DaysRemaining(12).to_string(), "12 days remaining");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Market data
// ═══════════════════════════════════════════════════════════════════

mod market {
    use super::*;

    fn eod(date: &str, close: f64) -> EodPrice {
        EodPrice {
            symbol: "AAPL".into(),
            date: date.into(),
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }

    #[test]
    fn trading_day_parses_upstream_timestamp() {
        assert_eq!(eod("2025-01-15T00:00:00+0000", 1.0).trading_day(), Some(day(2025, 1, 15)));
        assert_eq!(eod("garbage", 1.0).trading_day(), None);
    }

    #[test]
    fn quote_from_latest_ignores_order() {
        let prices = vec![
            eod("2025-01-14T00:00:00+0000", 180.0),
            eod("2025-01-16T00:00:00+0000", 190.0),
            eod("2025-01-15T00:00:00+0000", 185.0),
        ];
        let quote = StockQuote::from_latest(&prices).unwrap();
        assert_eq!(quote.close, 190.0);
    }

    #[test]
    fn quote_from_empty_is_none() {
        assert!(StockQuote::from_latest(&[]).is_none());
    }

    #[test]
    fn eod_optional_fields_default() {
        let p: EodPrice = serde_json::from_value(json!({
            "symbol": "AAPL",
            "date": "2025-01-15T00:00:00+0000",
            "close": 185.0
        }))
        .unwrap();
        assert!(p.open.is_none() && p.volume.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Notifications
// ═══════════════════════════════════════════════════════════════════

mod notification {
    use super::*;

    #[test]
    fn new_is_unread_and_kind_serializes_as_type() {
        let n = Notification::new("Budget", "80% used", NotificationKind::Warning, ts(2025, 1, 1));
        assert!(!n.read);
        let v = serde_json::to_value(&n).unwrap();
        assert_eq!(v["type"], "warning");
    }

    #[test]
    fn preferences_default_all_enabled() {
        let prefs = NotificationPreferences::default();
        for alert in [
            AlertKind::Expense,
            AlertKind::Investment,
            AlertKind::Goal,
            AlertKind::Market,
            AlertKind::Budget,
        ] {
            assert!(prefs.is_enabled(alert));
        }
    }

    #[test]
    fn toggle_flips_one_flag() {
        let mut prefs = NotificationPreferences::default();
        prefs.toggle(AlertKind::Market);
        assert!(!prefs.is_enabled(AlertKind::Market));
        assert!(prefs.is_enabled(AlertKind::Budget));
        prefs.toggle(AlertKind::Market);
        assert!(prefs.is_enabled(AlertKind::Market));
    }

    #[test]
    fn preferences_serialize_camel_case() {
        let v = serde_json::to_value(NotificationPreferences::default()).unwrap();
        assert_eq!(v["expenseAlerts"], true);
        assert_eq!(v["budgetAlerts"], true);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Chat
// ═══════════════════════════════════════════════════════════════════

mod chat {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let v = serde_json::to_value(ChatMessage::assistant("hi")).unwrap();
        assert_eq!(v, json!({"role": "assistant", "content": "hi"}));
    }

    #[test]
    fn snapshot_totals() {
        let snapshot = UserDataSnapshot {
            expenses: vec![
                NewExpense {
                    amount: 20.0,
                    category: "Food".into(),
                    currency: "USD".into(),
                    date: day(2025, 1, 1),
                    description: String::new(),
                }
                .into_expense(),
                NewExpense {
                    amount: 22.0,
                    category: "Food".into(),
                    currency: "USD".into(),
                    date: day(2025, 1, 2),
                    description: String::new(),
                }
                .into_expense(),
            ],
            stock_portfolio: vec![
                Holding::new("AAPL", "Apple", 2.0, 100.0, ts(2025, 1, 1)).with_current_price(500.0),
            ],
            ..Default::default()
        };
        assert_eq!(snapshot.total_expenses(), 42.0);
        // cost basis, not market value
        assert_eq!(snapshot.portfolio_value(), 200.0);
    }

    #[test]
    fn empty_snapshot_totals_are_positive_zero() {
        let snapshot = UserDataSnapshot::default();
        assert!(snapshot.total_expenses().is_sign_positive());
        assert!(snapshot.portfolio_value().is_sign_positive());
    }

    #[test]
    fn request_reads_camel_case_user_data() {
        let req: ChatRequest = serde_json::from_value(json!({
            "messages": [{"role": "user", "content": "hello"}],
            "userData": {"expenses": []}
        }))
        .unwrap();
        assert_eq!(req.messages[0].role, ChatRole::User);
        assert!(req.user_data.is_some());
    }

    #[test]
    fn request_without_user_data() {
        let req: ChatRequest = serde_json::from_value(json!({"messages": []})).unwrap();
        assert!(req.user_data.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Import mapping
// ═══════════════════════════════════════════════════════════════════

mod import {
    use super::*;

    #[test]
    fn detect_common_headers() {
        let headers: Vec<String> = ["Transaction Date", "Memo", "Amount", "Category"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let m = ColumnMapping::detect(&headers);
        assert_eq!(m.date, "Transaction Date");
        assert_eq!(m.description, "Memo");
        assert_eq!(m.amount, "Amount");
        assert_eq!(m.category.as_deref(), Some("Category"));
        assert!(m.currency.is_none());
    }

    #[test]
    fn detect_leaves_unknown_empty() {
        let m = ColumnMapping::detect(&["foo".to_string(), "bar".to_string()]);
        assert!(m.date.is_empty() && m.amount.is_empty() && m.description.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Report
// ═══════════════════════════════════════════════════════════════════

mod report {
    use super::*;

    #[test]
    fn table_rows_and_section_lookup() {
        let mut table = ReportTable::new(&["Metric", "Value"]);
        table.push_row(vec!["Health Score".into(), "70/100".into()]);
        let report = FinancialReport {
            title: "Financial Report".into(),
            generated_on: day(2025, 1, 1),
            sections: vec![
                ReportSection::with_table("Financial Health Summary", Vec::new(), table),
                ReportSection::empty("Financial Goals", "No financial goals available"),
            ],
        };

        let health = report.section("Financial Health Summary").unwrap();
        assert_eq!(health.table.as_ref().unwrap().rows.len(), 1);
        let goals = report.section("Financial Goals").unwrap();
        assert!(goals.table.is_none());
        assert_eq!(goals.empty_message.as_deref(), Some("No financial goals available"));
        assert!(report.section("Missing").is_none());
    }
}
