use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::expense::{default_categories, Expense, NewExpense, DEFAULT_CURRENCY};
use crate::storage::keys::StorageKey;
use crate::storage::repository::Repository;
use crate::storage::store::Store;

use super::chart_service::lookback_start;
use super::currency_service::{CurrencyService, Rates};

/// Expense records, the category list and the display-currency preference.
pub struct ExpenseService {
    expenses: Repository<Vec<Expense>>,
    categories: Repository<Vec<String>>,
    currency: Repository<String>,
    currency_service: CurrencyService,
}

impl ExpenseService {
    pub fn new(store: Store) -> Self {
        Self {
            expenses: Repository::new(store.clone(), StorageKey::Expenses),
            categories: Repository::new(store.clone(), StorageKey::ExpenseCategories),
            currency: Repository::new(store, StorageKey::CurrencyPreferences),
            currency_service: CurrencyService::new(),
        }
    }

    /// Validate and store a new expense.
    pub fn add(&self, new: NewExpense) -> Result<Expense, CoreError> {
        let expense = new.into_expense();
        Self::validate(&expense)?;
        let added = expense.clone();
        self.expenses.update(|list| list.push(expense));
        Ok(added)
    }

    /// Append several already-built expenses in one write.
    pub fn append_all(&self, items: Vec<Expense>) -> usize {
        let count = items.len();
        if count > 0 {
            self.expenses.update(|list| list.extend(items));
        }
        count
    }

    /// Replace the expense with the same id.
    pub fn update(&self, expense: Expense) -> Result<(), CoreError> {
        Self::validate(&expense)?;
        self.expenses.try_update(|list| {
            let slot = list
                .iter_mut()
                .find(|e| e.id == expense.id)
                .ok_or_else(|| CoreError::RecordNotFound(format!("expense {}", expense.id)))?;
            *slot = expense;
            Ok(())
        })
    }

    pub fn delete(&self, id: Uuid) -> Result<(), CoreError> {
        self.expenses.try_update(|list| {
            let before = list.len();
            list.retain(|e| e.id != id);
            if list.len() == before {
                return Err(CoreError::RecordNotFound(format!("expense {id}")));
            }
            Ok(())
        })
    }

    /// All expenses, newest first.
    pub fn list(&self) -> Vec<Expense> {
        let mut list = self.expenses.load();
        list.sort_by(|a, b| b.date.cmp(&a.date));
        list
    }

    // ── Categories ──────────────────────────────────────────────────

    pub fn categories(&self) -> Vec<String> {
        self.categories.load_or(default_categories())
    }

    pub fn add_category(&self, name: &str) -> Result<Vec<String>, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError("Category name is required".into()));
        }
        let mut categories = self.categories();
        if categories.iter().any(|c| c.eq_ignore_ascii_case(name)) {
            return Err(CoreError::ValidationError(format!(
                "Category '{name}' already exists"
            )));
        }
        categories.push(name.to_string());
        self.categories.save(&categories);
        Ok(categories)
    }

    // ── Display currency ────────────────────────────────────────────

    pub fn display_currency(&self) -> String {
        self.currency.load_or(DEFAULT_CURRENCY.to_string())
    }

    pub fn set_display_currency(&self, code: &str) -> Result<(), CoreError> {
        let code = code.trim().to_uppercase();
        if !self.currency_service.is_supported(&code) {
            return Err(CoreError::UnsupportedCurrency(code));
        }
        self.currency.save(&code);
        Ok(())
    }

    // ── Aggregates ──────────────────────────────────────────────────

    /// Sum of expenses dated strictly after `now - days`, converted to
    /// `display_currency`.
    pub fn total_since(
        &self,
        days: i64,
        display_currency: &str,
        rates: &Rates,
        now: DateTime<Utc>,
    ) -> f64 {
        let cutoff = lookback_start(now, days).date_naive();
        self.expenses
            .load()
            .iter()
            .filter(|e| e.date > cutoff)
            .map(|e| {
                self.currency_service
                    .convert(e.amount, &e.currency, display_currency, rates)
            })
            .fold(0.0, |acc, v| acc + v)
    }

    /// Category → total, for pie charts.
    pub fn totals_by_category(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for expense in self.expenses.load() {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        totals
    }

    /// "YYYY-MM" → total, ascending by month.
    pub fn totals_by_month(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for expense in self.expenses.load() {
            let month = format!("{:04}-{:02}", expense.date.year(), expense.date.month());
            *totals.entry(month).or_insert(0.0) += expense.amount;
        }
        totals
    }

    fn validate(expense: &Expense) -> Result<(), CoreError> {
        if !expense.amount.is_finite() || expense.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be positive, got {}",
                expense.amount
            )));
        }
        if expense.category.trim().is_empty() {
            return Err(CoreError::ValidationError("Category is required".into()));
        }
        Ok(())
    }
}
