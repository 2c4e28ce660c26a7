use chrono::Datelike;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::budget::{Budget, BudgetLine, BudgetOverview, NewBudget};
use crate::models::expense::Expense;
use crate::storage::keys::StorageKey;
use crate::storage::repository::Repository;
use crate::storage::store::Store;

/// Monthly spending limits per category.
pub struct BudgetService {
    budgets: Repository<Vec<Budget>>,
}

impl BudgetService {
    pub fn new(store: Store) -> Self {
        Self {
            budgets: Repository::new(store, StorageKey::Budgets),
        }
    }

    pub fn list(&self) -> Vec<Budget> {
        self.budgets.load()
    }

    /// Insert a budget, replacing any existing one for the same
    /// (category, month, year). The replaced budget keeps its id.
    pub fn upsert(&self, new: NewBudget) -> Result<Budget, CoreError> {
        let category = new.category.trim().to_string();
        if category.is_empty() {
            return Err(CoreError::ValidationError("Category is required".into()));
        }
        if !(1..=12).contains(&new.month) {
            return Err(CoreError::ValidationError(format!(
                "Month must be 1-12, got {}",
                new.month
            )));
        }
        if !new.amount.is_finite() || new.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Budget amount must be positive, got {}",
                new.amount
            )));
        }

        Ok(self.budgets.update(|list| {
            match list
                .iter_mut()
                .find(|b| b.category == category && b.month == new.month && b.year == new.year)
            {
                Some(existing) => {
                    existing.amount = new.amount;
                    existing.clone()
                }
                None => {
                    let budget = Budget {
                        id: Uuid::new_v4(),
                        category,
                        amount: new.amount,
                        month: new.month,
                        year: new.year,
                    };
                    list.push(budget.clone());
                    budget
                }
            }
        }))
    }

    pub fn remove(&self, id: Uuid) -> Result<(), CoreError> {
        self.budgets.try_update(|list| {
            let before = list.len();
            list.retain(|b| b.id != id);
            if list.len() == before {
                return Err(CoreError::RecordNotFound(format!("budget {id}")));
            }
            Ok(())
        })
    }

    /// Sum of `category` expenses dated within the calendar month.
    pub fn category_spending(&self, expenses: &[Expense], category: &str, month: u32, year: i32) -> f64 {
        expenses
            .iter()
            .filter(|e| e.category == category && e.date.month() == month && e.date.year() == year)
            .map(|e| e.amount)
            .fold(0.0, |acc, v| acc + v)
    }

    /// Share of the budget used, capped at 100. A budget of 0 or less
    /// counts as fully used.
    pub fn spending_percentage(&self, spent: f64, budgeted: f64) -> u32 {
        if budgeted <= 0.0 {
            return 100;
        }
        let pct = (spent / budgeted * 100.0).round();
        pct.clamp(0.0, 100.0) as u32
    }

    pub fn month_overview(&self, expenses: &[Expense], month: u32, year: i32) -> BudgetOverview {
        let lines: Vec<BudgetLine> = self
            .budgets
            .load()
            .into_iter()
            .filter(|b| b.month == month && b.year == year)
            .map(|budget| {
                let spent = self.category_spending(expenses, &budget.category, month, year);
                BudgetLine {
                    remaining: budget.amount - spent,
                    percentage: self.spending_percentage(spent, budget.amount),
                    spent,
                    budget,
                }
            })
            .collect();

        BudgetOverview {
            month,
            year,
            total_budgeted: lines.iter().map(|l| l.budget.amount).fold(0.0, |acc, v| acc + v),
            total_spent: lines.iter().map(|l| l.spent).fold(0.0, |acc, v| acc + v),
            lines,
        }
    }
}
