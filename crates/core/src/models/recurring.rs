use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a recurring expense falls due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// The next due date after `date`, using calendar arithmetic.
    ///
    /// Monthly and yearly steps clamp to the last day of a shorter month
    /// (Jan 31 → Feb 28). Returns `None` only past chrono's date range.
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => date.checked_add_days(Days::new(1)),
            Frequency::Weekly => date.checked_add_days(Days::new(7)),
            Frequency::Monthly => date.checked_add_months(Months::new(1)),
            Frequency::Yearly => date.checked_add_months(Months::new(12)),
        }
    }

    /// Multiplier that turns one occurrence into a monthly amount.
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Frequency::Daily => 30.0,
            Frequency::Weekly => 4.33,
            Frequency::Monthly => 1.0,
            Frequency::Yearly => 1.0 / 12.0,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "Daily"),
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::Monthly => write!(f, "Monthly"),
            Frequency::Yearly => write!(f, "Yearly"),
        }
    }
}

/// A template that materializes an expense every time it falls due.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub currency: String,
    pub frequency: Frequency,
    #[serde(deserialize_with = "super::date_input::deserialize")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "super::date_input::deserialize")]
    pub next_due_date: NaiveDate,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurringExpense {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub currency: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
}

impl NewRecurringExpense {
    pub fn into_recurring(self) -> RecurringExpense {
        RecurringExpense {
            id: Uuid::new_v4(),
            description: self.description,
            amount: self.amount,
            category: self.category,
            currency: self.currency.trim().to_uppercase(),
            frequency: self.frequency,
            start_date: self.start_date,
            next_due_date: self.start_date,
            enabled: true,
        }
    }
}
