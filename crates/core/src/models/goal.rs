use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings target with a deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialGoal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub saved_amount: f64,
    pub category: String,
    #[serde(deserialize_with = "super::date_input::deserialize")]
    pub deadline: NaiveDate,
    pub currency: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub saved_amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewGoal {
    pub fn into_goal(self) -> FinancialGoal {
        FinancialGoal {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            target_amount: self.target_amount,
            saved_amount: self.saved_amount,
            category: self.category.unwrap_or_else(|| "savings".to_string()),
            deadline: self.deadline,
            currency: self.currency.unwrap_or_else(|| "USD".to_string()),
            color: self.color.unwrap_or_else(|| "green".to_string()),
        }
    }
}

/// How far a goal's deadline is from a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRemaining {
    Overdue,
    DueToday,
    DaysRemaining(i64),
}

impl std::fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRemaining::Overdue => write!(f, "Overdue"),
            TimeRemaining::DueToday => write!(f, "Due today"),
            TimeRemaining::DaysRemaining(1) => write!(f, "1 day remaining"),
            TimeRemaining::DaysRemaining(n) => write!(f, "{n} days remaining"),
        }
    }
}
