//! Action handlers: UpdateAction dispatch and background saves

use studio_core::prelude::*;
use tokio::task::JoinHandle;

use crate::handler::UpdateAction;
use crate::notifications::NotificationBus;
use crate::services::AppCollection;

/// Execute an action returned by [`crate::handler::update`].
///
/// The notification is published right away; the save runs in the
/// background and only logs on failure.
pub fn handle_action<A>(action: UpdateAction, apps: A, bus: &NotificationBus) -> JoinHandle<()>
where
    A: AppCollection + Sync + 'static,
{
    match action {
        UpdateAction::SaveApp { app, notification } => {
            bus.send(notification);
            tokio::spawn(async move {
                if let Err(e) = apps.save(&app).await {
                    error!("Failed to save application {}: {}", app.id, e);
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture_view::{CaptureViewState, INBOUND_REQUEST};
    use crate::handler::update;
    use crate::message::Message;
    use crate::services::MemoryAppCollection;
    use studio_core::{AppId, AppModel, NotificationKey};

    #[tokio::test]
    async fn test_submit_persists_and_notifies() {
        let mut app = AppModel::new("a1", "One");
        let apps = MemoryAppCollection::new(vec![app.clone()]);
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();
        let mut state = CaptureViewState::render(&app).unwrap();

        update(
            &mut state,
            &mut app,
            Message::ToggleCapture {
                name: INBOUND_REQUEST.into(),
            },
        );
        let action = update(&mut state, &mut app, Message::SubmitCapture)
            .action
            .unwrap();
        handle_action(action, apps.clone(), &bus).await.unwrap();

        let stored = apps.by_id(&AppId::new("a1")).await.unwrap().unwrap();
        assert_eq!(stored.capture().flags(), [true, false, false, false]);
        assert_eq!(
            rx.try_recv().unwrap().key,
            NotificationKey::AppSettingsSaveSuccess
        );
    }

    #[tokio::test]
    async fn test_failed_save_still_notifies() {
        let temp = tempfile::tempdir().unwrap();
        // Store path below a regular file: every write fails
        std::fs::write(temp.path().join("blocker"), "").unwrap();
        let apps = MemoryAppCollection::open(temp.path().join("blocker").join("apps.json"))
            .unwrap();
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();
        let action = UpdateAction::SaveApp {
            app: AppModel::new("a1", "One"),
            notification: studio_core::Notification::new(NotificationKey::AppSettingsSaveSuccess),
        };

        handle_action(action, apps, &bus).await.unwrap();

        assert!(rx.try_recv().is_ok());
    }
}
