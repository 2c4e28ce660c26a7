use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::expense::Expense;
use crate::models::recurring::{NewRecurringExpense, RecurringExpense};
use crate::storage::keys::StorageKey;
use crate::storage::repository::Repository;
use crate::storage::store::Store;

pub const RECURRING_PREFIX: &str = "[Recurring] ";

/// Recurring expense templates and their materialization into expenses.
pub struct RecurringExpenseService {
    items: Repository<Vec<RecurringExpense>>,
    expenses: Repository<Vec<Expense>>,
}

impl RecurringExpenseService {
    pub fn new(store: Store) -> Self {
        Self {
            items: Repository::new(store.clone(), StorageKey::RecurringExpenses),
            expenses: Repository::new(store, StorageKey::Expenses),
        }
    }

    pub fn list(&self) -> Vec<RecurringExpense> {
        self.items.load()
    }

    pub fn add(&self, new: NewRecurringExpense) -> Result<RecurringExpense, CoreError> {
        if new.description.trim().is_empty() {
            return Err(CoreError::ValidationError("Description is required".into()));
        }
        if !new.amount.is_finite() || new.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be positive, got {}",
                new.amount
            )));
        }
        let item = new.into_recurring();
        let added = item.clone();
        self.items.update(|list| list.push(item));
        Ok(added)
    }

    /// Flip `enabled`; returns the new state.
    pub fn toggle(&self, id: Uuid) -> Result<bool, CoreError> {
        self.items.try_update(|list| {
            let item = list
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| CoreError::RecordNotFound(format!("recurring expense {id}")))?;
            item.enabled = !item.enabled;
            Ok(item.enabled)
        })
    }

    pub fn delete(&self, id: Uuid) -> Result<(), CoreError> {
        self.items.try_update(|list| {
            let before = list.len();
            list.retain(|r| r.id != id);
            if list.len() == before {
                return Err(CoreError::RecordNotFound(format!("recurring expense {id}")));
            }
            Ok(())
        })
    }

    /// Materialize every occurrence due on or before `today`.
    ///
    /// Each enabled item produces one expense per missed due date and its
    /// `next_due_date` moves past `today`. Returns the new expenses, which
    /// are also appended to the expense store.
    ///
    /// Expenses are written before the schedule. If that write fails the
    /// schedule is left as it was and nothing is returned.
    pub fn process_due(&self, today: NaiveDate) -> Vec<Expense> {
        let mut items = self.items.load();
        let mut created = Vec::new();

        for item in items.iter_mut().filter(|r| r.enabled) {
            while item.next_due_date <= today {
                created.push(Expense {
                    id: Uuid::new_v4(),
                    amount: item.amount,
                    category: item.category.clone(),
                    currency: item.currency.clone(),
                    date: item.next_due_date,
                    description: format!("{RECURRING_PREFIX}{}", item.description),
                });
                match item.frequency.advance(item.next_due_date) {
                    Some(next) => item.next_due_date = next,
                    None => {
                        log::warn!("Recurring expense {} ran past the calendar", item.id);
                        item.enabled = false;
                        break;
                    }
                }
            }
        }

        if created.is_empty() {
            return created;
        }

        let mut expenses = self.expenses.load();
        expenses.extend(created.iter().cloned());
        if let Err(e) = self.expenses.try_save(&expenses) {
            log::error!(
                "Dropped {} due recurring expense(s), schedule unchanged: {e}",
                created.len()
            );
            return Vec::new();
        }

        self.items.save(&items);
        log::info!("Processed {} due recurring expense(s)", created.len());
        created
    }

    pub fn monthly_equivalent(&self, item: &RecurringExpense) -> f64 {
        item.amount * item.frequency.monthly_factor()
    }

    /// Monthly cost of all enabled items.
    pub fn monthly_total(&self) -> f64 {
        self.items
            .load()
            .iter()
            .filter(|r| r.enabled)
            .map(|r| self.monthly_equivalent(r))
            .fold(0.0, |acc, v| acc + v)
    }
}
