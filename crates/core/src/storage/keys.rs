/// Logical record types, each persisted under one fixed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Expenses,
    ExpenseCategories,
    StockPortfolio,
    StockPortfolioHistory,
    CryptoPortfolio,
    CurrencyPreferences,
    Budgets,
    RecurringExpenses,
    FinancialGoals,
    Notifications,
    NotificationPreferences,
}

impl StorageKey {
    pub const ALL: [StorageKey; 11] = [
        StorageKey::Expenses,
        StorageKey::ExpenseCategories,
        StorageKey::StockPortfolio,
        StorageKey::StockPortfolioHistory,
        StorageKey::CryptoPortfolio,
        StorageKey::CurrencyPreferences,
        StorageKey::Budgets,
        StorageKey::RecurringExpenses,
        StorageKey::FinancialGoals,
        StorageKey::Notifications,
        StorageKey::NotificationPreferences,
    ];

    /// The string the record is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Expenses => "expenses",
            StorageKey::ExpenseCategories => "expense-categories",
            StorageKey::StockPortfolio => "stock-portfolio",
            StorageKey::StockPortfolioHistory => "stock-portfolio-history",
            StorageKey::CryptoPortfolio => "crypto-portfolio",
            StorageKey::CurrencyPreferences => "currency-preferences",
            StorageKey::Budgets => "budgets",
            StorageKey::RecurringExpenses => "recurring-expenses",
            StorageKey::FinancialGoals => "financial-goals",
            StorageKey::Notifications => "notifications",
            StorageKey::NotificationPreferences => "notification-preferences",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
