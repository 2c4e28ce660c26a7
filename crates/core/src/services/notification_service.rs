use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::notification::{AlertKind, Notification, NotificationPreferences};
use crate::storage::keys::StorageKey;
use crate::storage::repository::Repository;
use crate::storage::store::Store;

/// In-app notifications and the user's alert preferences.
pub struct NotificationService {
    notifications: Repository<Vec<Notification>>,
    preferences: Repository<NotificationPreferences>,
}

impl NotificationService {
    pub fn new(store: Store) -> Self {
        Self {
            notifications: Repository::new(store.clone(), StorageKey::Notifications),
            preferences: Repository::new(store, StorageKey::NotificationPreferences),
        }
    }

    pub fn push(&self, notification: Notification) -> Notification {
        let pushed = notification.clone();
        self.notifications.update(|list| list.push(notification));
        pushed
    }

    pub fn mark_read(&self, id: Uuid) -> Result<(), CoreError> {
        self.notifications.try_update(|list| {
            let n = list
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| CoreError::RecordNotFound(format!("notification {id}")))?;
            n.read = true;
            Ok(())
        })
    }

    pub fn mark_all_read(&self) {
        self.notifications
            .update(|list| list.iter_mut().for_each(|n| n.read = true));
    }

    pub fn delete(&self, id: Uuid) -> Result<(), CoreError> {
        self.notifications.try_update(|list| {
            let before = list.len();
            list.retain(|n| n.id != id);
            if list.len() == before {
                return Err(CoreError::RecordNotFound(format!("notification {id}")));
            }
            Ok(())
        })
    }

    pub fn clear(&self) {
        self.notifications.save(&Vec::new());
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.load().iter().filter(|n| !n.read).count()
    }

    /// Newest first.
    pub fn list(&self, unread_only: bool) -> Vec<Notification> {
        let mut list: Vec<Notification> = self
            .notifications
            .load()
            .into_iter()
            .filter(|n| !unread_only || !n.read)
            .collect();
        list.sort_by(|a, b| b.date.cmp(&a.date));
        list
    }

    pub fn preferences(&self) -> NotificationPreferences {
        self.preferences.load()
    }

    /// Flip one alert family; returns the updated preferences.
    pub fn toggle_preference(&self, alert: AlertKind) -> NotificationPreferences {
        self.preferences.update(|prefs| {
            prefs.toggle(alert);
            *prefs
        })
    }
}
