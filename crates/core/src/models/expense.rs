use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categories offered before the user adds any of their own.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food",
    "Transportation",
    "Housing",
    "Utilities",
    "Entertainment",
    "Healthcare",
    "Shopping",
    "Other",
];

/// Display currency used when no preference has been stored.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A single spending record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub category: String,
    pub currency: String,
    #[serde(deserialize_with = "super::date_input::deserialize")]
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

/// Form input for a new expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub currency: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

impl NewExpense {
    pub fn into_expense(self) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            amount: self.amount,
            category: self.category.trim().to_string(),
            currency: self.currency.trim().to_uppercase(),
            date: self.date,
            description: self.description,
        }
    }
}

/// Default category list as owned strings.
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}
