//! Notification channel
//!
//! Single publish/subscribe channel through which every operation reports
//! its outcome. Views and front ends subscribe; operations only publish.

use studio_core::{Notification, NotificationKey};
use tokio::sync::broadcast;
use tracing::{debug, warn};

const DEFAULT_CAPACITY: usize = 64;

/// Broadcast channel for [`Notification`]s
#[derive(Debug, Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<Notification>,
}

impl NotificationBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to notifications published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Publish a notification to all current subscribers
    pub fn send(&self, notification: Notification) {
        if notification.is_failure() {
            warn!(key = %notification.key, message = ?notification.message, "Notification");
        } else {
            debug!(key = %notification.key, "Notification");
        }
        // No subscribers is fine
        let _ = self.tx.send(notification);
    }

    /// Shorthand for a keyed notification about an application
    pub fn send_app(&self, key: NotificationKey, title: &str, message: Option<String>) {
        self.send(Notification::new(key).title(title).message(message));
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_subscribers_receive() {
        let bus = NotificationBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.send_app(NotificationKey::DeleteAppSuccess, "Pet Store", None);

        let n1 = rx1.recv().await.unwrap();
        let n2 = rx2.recv().await.unwrap();
        assert_eq!(n1, n2);
        assert_eq!(n1.key, NotificationKey::DeleteAppSuccess);
        assert_eq!(n1.title.as_deref(), Some("Pet Store"));
    }

    #[test]
    fn test_send_without_subscribers() {
        let bus = NotificationBus::default();
        bus.send(Notification::new(NotificationKey::AppSettingsSaveSuccess));
    }

    #[test]
    fn test_late_subscriber_misses_earlier_notifications() {
        let bus = NotificationBus::default();
        bus.send(Notification::new(NotificationKey::AppDeployedSuccess));

        let mut rx = bus.subscribe();
        assert!(rx.try_recv().is_err());
    }
}
