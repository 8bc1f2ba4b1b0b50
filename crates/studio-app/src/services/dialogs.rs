//! Dialog and navigation services.
//!
//! Dialog content is passed as translation keys plus interpolation values;
//! rendering and translation belong to the front end.

use serde::Serialize;

/// Template used for the configuration export modal
pub const MODAL_MESSAGE_TEMPLATE: &str = "modals/ModalMessageTemplate";

/// Translation key of the configuration export modal title
pub const CONFIG_EXPORT_TITLE: &str = "common.modalWindow.title.configExport";

/// Visual severity of a confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Danger,
    Warning,
    Info,
}

/// A yes/no question for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmRequest {
    /// Translation key of the question (e.g. `templates.apps.deleteDialog`)
    pub message_key: String,
    /// Application title interpolated into the question
    pub title: String,
    pub severity: Severity,
}

impl ConfirmRequest {
    pub fn danger(message_key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            message_key: message_key.into(),
            title: title.into(),
            severity: Severity::Danger,
        }
    }
}

/// A modal window showing preformatted content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalDialog {
    /// Translation key of the window title
    pub title_key: String,
    pub template: String,
    /// Preformatted JSON body
    pub json_content: String,
    pub close_by_backdrop: bool,
    pub draggable: bool,
}

impl ModalDialog {
    /// Export window for a route configuration
    pub fn config_export(json_content: String) -> Self {
        Self {
            title_key: CONFIG_EXPORT_TITLE.to_string(),
            template: MODAL_MESSAGE_TEMPLATE.to_string(),
            json_content,
            close_by_backdrop: false,
            draggable: true,
        }
    }
}

/// Confirmation and modal dialogs
#[trait_variant::make(DialogService: Send)]
pub trait LocalDialogService {
    /// Ask the user; resolves `true` when confirmed
    async fn confirm(&self, request: ConfirmRequest) -> bool;

    /// Display a modal window
    async fn show_modal(&self, modal: ModalDialog);
}

/// Client-side navigation
pub trait Router: Send + Sync {
    fn navigate(&self, path: &str);
}
