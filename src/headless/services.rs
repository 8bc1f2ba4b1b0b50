//! Dialog and router implementations for headless runs
//!
//! Confirmations are answered from the command line (`--yes`), and every
//! dialog, modal and navigation is reported as a [`HeadlessEvent`].

use studio_app::services::{ConfirmRequest, DialogService, ModalDialog, Router};
use tracing::info;

use super::HeadlessEvent;

/// Answers every confirmation with a fixed value
#[derive(Debug, Clone, Copy)]
pub struct HeadlessDialogs {
    assume_yes: bool,
}

impl HeadlessDialogs {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl DialogService for HeadlessDialogs {
    async fn confirm(&self, request: ConfirmRequest) -> bool {
        info!(
            "Confirm '{}' for '{}': {}",
            request.message_key, request.title, self.assume_yes
        );
        HeadlessEvent::confirm_requested(&request.message_key, &request.title, self.assume_yes)
            .emit();
        self.assume_yes
    }

    async fn show_modal(&self, modal: ModalDialog) {
        HeadlessEvent::modal(&modal.title_key, &modal.template, modal.json_content).emit();
    }
}

/// Reports navigation as events
#[derive(Debug, Default)]
pub struct StdoutRouter;

impl Router for StdoutRouter {
    fn navigate(&self, path: &str) {
        info!("Navigate to {}", path);
        HeadlessEvent::navigate(path).emit();
    }
}
