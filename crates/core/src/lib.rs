pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{DateTime, Utc};
use models::{
    analytics::FinancialHealth, chat::UserDataSnapshot, report::FinancialReport,
    report::ReportOptions,
};
use services::{
    analytics_service::AnalyticsService,
    budget_service::BudgetService,
    expense_service::ExpenseService,
    goal_service::GoalService,
    import_service::ImportService,
    notification_service::NotificationService,
    portfolio_service::{PortfolioKind, PortfolioService},
    recurring_service::RecurringExpenseService,
    report_service::ReportService,
};
use storage::store::Store;

use errors::CoreError;

/// Main entry point for the finance dashboard core library.
///
/// Built over one `Store`; every service it hands out owns exactly the
/// records it works on, so two services never share a storage key by
/// accident.
#[must_use]
pub struct FinanceDashboard {
    store: Store,
    stocks: PortfolioService,
    crypto: PortfolioService,
    expenses: ExpenseService,
    budgets: BudgetService,
    recurring: RecurringExpenseService,
    goals: GoalService,
    notifications: NotificationService,
    importer: ImportService,
    reports: ReportService,
    analytics: AnalyticsService,
}

impl std::fmt::Debug for FinanceDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceDashboard")
            .field("store", &self.store)
            .finish()
    }
}

impl FinanceDashboard {
    pub fn new(store: Store) -> Self {
        Self {
            stocks: PortfolioService::new(store.clone(), PortfolioKind::Stock),
            crypto: PortfolioService::new(store.clone(), PortfolioKind::Crypto),
            expenses: ExpenseService::new(store.clone()),
            budgets: BudgetService::new(store.clone()),
            recurring: RecurringExpenseService::new(store.clone()),
            goals: GoalService::new(store.clone()),
            notifications: NotificationService::new(store.clone()),
            importer: ImportService::new(store.clone()),
            reports: ReportService::new(store.clone()),
            analytics: AnalyticsService::new(),
            store,
        }
    }

    /// A dashboard whose records live only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(Store::in_memory())
    }

    /// A dashboard persisted as JSON files in `dir` (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_dir(dir: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        Ok(Self::new(Store::open_dir(dir)?))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // ── Services ────────────────────────────────────────────────────

    pub fn stocks(&self) -> &PortfolioService {
        &self.stocks
    }

    pub fn crypto(&self) -> &PortfolioService {
        &self.crypto
    }

    pub fn expenses(&self) -> &ExpenseService {
        &self.expenses
    }

    pub fn budgets(&self) -> &BudgetService {
        &self.budgets
    }

    pub fn recurring(&self) -> &RecurringExpenseService {
        &self.recurring
    }

    pub fn goals(&self) -> &GoalService {
        &self.goals
    }

    pub fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    pub fn importer(&self) -> &ImportService {
        &self.importer
    }

    pub fn reports(&self) -> &ReportService {
        &self.reports
    }

    // ── Cross-record views ──────────────────────────────────────────

    /// The records a chat question is answered from.
    #[must_use]
    pub fn user_data_snapshot(&self) -> UserDataSnapshot {
        let stocks = self.stocks.state();
        UserDataSnapshot {
            expenses: self.expenses.list(),
            stock_portfolio: stocks.holdings,
            stock_history: stocks.history,
            crypto_portfolio: self.crypto.holdings(),
        }
    }

    #[must_use]
    pub fn financial_health(&self, now: DateTime<Utc>) -> FinancialHealth {
        self.analytics.financial_health(
            &self.expenses.list(),
            &self.stocks.holdings(),
            &self.crypto.holdings(),
            &self.goals.list(),
            now,
        )
    }

    /// Report with every section included.
    #[must_use]
    pub fn report(&self, now: DateTime<Utc>) -> FinancialReport {
        self.reports.generate(&ReportOptions::default(), now)
    }
}
