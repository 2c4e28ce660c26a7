use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            kind,
            date,
            read: false,
        }
    }
}

/// Which alert families the user wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub expense_alerts: bool,
    pub investment_alerts: bool,
    pub goal_alerts: bool,
    pub market_alerts: bool,
    pub budget_alerts: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            expense_alerts: true,
            investment_alerts: true,
            goal_alerts: true,
            market_alerts: true,
            budget_alerts: true,
        }
    }
}

/// Selector for a single preference flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Expense,
    Investment,
    Goal,
    Market,
    Budget,
}

impl NotificationPreferences {
    pub fn is_enabled(&self, alert: AlertKind) -> bool {
        match alert {
            AlertKind::Expense => self.expense_alerts,
            AlertKind::Investment => self.investment_alerts,
            AlertKind::Goal => self.goal_alerts,
            AlertKind::Market => self.market_alerts,
            AlertKind::Budget => self.budget_alerts,
        }
    }

    pub fn toggle(&mut self, alert: AlertKind) {
        let flag = match alert {
            AlertKind::Expense => &mut self.expense_alerts,
            AlertKind::Investment => &mut self.investment_alerts,
            AlertKind::Goal => &mut self.goal_alerts,
            AlertKind::Market => &mut self.market_alerts,
            AlertKind::Budget => &mut self.budget_alerts,
        };
        *flag = !*flag;
    }
}
