use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::goal::{FinancialGoal, NewGoal, TimeRemaining};
use crate::storage::keys::StorageKey;
use crate::storage::repository::Repository;
use crate::storage::store::Store;

/// Savings goals with deposits and progress tracking.
pub struct GoalService {
    goals: Repository<Vec<FinancialGoal>>,
}

impl GoalService {
    pub fn new(store: Store) -> Self {
        Self {
            goals: Repository::new(store, StorageKey::FinancialGoals),
        }
    }

    pub fn list(&self) -> Vec<FinancialGoal> {
        self.goals.load()
    }

    pub fn add(&self, new: NewGoal) -> Result<FinancialGoal, CoreError> {
        let goal = new.into_goal();
        Self::validate(&goal)?;
        let added = goal.clone();
        self.goals.update(|list| list.push(goal));
        Ok(added)
    }

    pub fn update(&self, goal: FinancialGoal) -> Result<(), CoreError> {
        Self::validate(&goal)?;
        self.goals.try_update(|list| {
            let slot = list
                .iter_mut()
                .find(|g| g.id == goal.id)
                .ok_or_else(|| CoreError::RecordNotFound(format!("goal {}", goal.id)))?;
            *slot = goal;
            Ok(())
        })
    }

    pub fn delete(&self, id: Uuid) -> Result<(), CoreError> {
        self.goals.try_update(|list| {
            let before = list.len();
            list.retain(|g| g.id != id);
            if list.len() == before {
                return Err(CoreError::RecordNotFound(format!("goal {id}")));
            }
            Ok(())
        })
    }

    /// Add `amount` to the saved total, never beyond the target.
    pub fn deposit(&self, id: Uuid, amount: f64) -> Result<FinancialGoal, CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Deposit must be positive, got {amount}"
            )));
        }
        self.goals.try_update(|list| {
            let goal = list
                .iter_mut()
                .find(|g| g.id == id)
                .ok_or_else(|| CoreError::RecordNotFound(format!("goal {id}")))?;
            goal.saved_amount = (goal.saved_amount + amount).min(goal.target_amount);
            Ok(goal.clone())
        })
    }

    /// 0–100
    pub fn progress_pct(&self, goal: &FinancialGoal) -> u32 {
        if goal.target_amount <= 0.0 {
            return 0;
        }
        let pct = (goal.saved_amount / goal.target_amount * 100.0).round();
        pct.clamp(0.0, 100.0) as u32
    }

    pub fn time_remaining(&self, goal: &FinancialGoal, today: NaiveDate) -> TimeRemaining {
        let days = (goal.deadline - today).num_days();
        match days {
            d if d < 0 => TimeRemaining::Overdue,
            0 => TimeRemaining::DueToday,
            d => TimeRemaining::DaysRemaining(d),
        }
    }

    fn validate(goal: &FinancialGoal) -> Result<(), CoreError> {
        if goal.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Goal name is required".into()));
        }
        if !goal.target_amount.is_finite() || goal.target_amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Target amount must be positive, got {}",
                goal.target_amount
            )));
        }
        if !goal.saved_amount.is_finite() || goal.saved_amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Saved amount must not be negative, got {}",
                goal.saved_amount
            )));
        }
        Ok(())
    }
}
