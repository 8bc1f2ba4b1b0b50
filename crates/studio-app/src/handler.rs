//! Handler module - TEA update function for the capture view
//!
//! `update` mutates the view state (and, on submit, the application model)
//! and returns an [`UpdateAction`] for the caller to execute. Saving is
//! fire-and-forget; see [`crate::actions::handle_action`].

use studio_core::prelude::*;
use studio_core::{AppModel, Notification, NotificationKey};

use crate::capture_view::{CaptureViewState, CAPTURE_TITLE_KEY};
use crate::message::Message;

/// Actions that the caller should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Persist the application and publish the notification
    SaveApp {
        app: AppModel,
        notification: Notification,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional action for the caller to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            action: Some(action),
        }
    }
}

/// Process a message against the capture view of `app`
pub fn update(state: &mut CaptureViewState, app: &mut AppModel, message: Message) -> UpdateResult {
    match message {
        Message::ToggleCapture { name } => {
            if let Err(e) = state.controls.toggle(&name) {
                warn!("Ignoring capture toggle: {}", e);
                return UpdateResult::none();
            }
            state.refresh_submit();
            UpdateResult::none()
        }

        Message::SubmitCapture => {
            if state.submit_disabled {
                debug!("Capture submit ignored, form unchanged");
                return UpdateResult::none();
            }

            let capture = state.current();
            app.set_capture(capture);
            state.stored = capture;
            state.submit_disabled = true;

            UpdateResult::action(UpdateAction::SaveApp {
                app: app.clone(),
                notification: Notification::new(NotificationKey::AppSettingsSaveSuccess)
                    .filter(CAPTURE_TITLE_KEY),
            })
        }

        Message::CancelCapture => {
            match CaptureViewState::render(app) {
                Ok(fresh) => *state = fresh,
                Err(e) => error!("Failed to re-render capture view: {}", e),
            }
            UpdateResult::none()
        }
    }
}
