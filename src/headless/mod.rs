//! Headless mode - JSON event output
//!
//! Every command reports what happened as NDJSON (newline-delimited JSON)
//! on stdout, one event per line. Each event has an "event" field naming
//! its type. Logs go to the log file, never to stdout.
//!
//! # Example Output
//!
//! ```json
//! {"event":"confirm_requested","message_key":"templates.apps.deployDialog","title":"Pet Store","answer":true,"timestamp":1704700001000}
//! {"event":"notification","key":"appDeployedSuccess","title":"Pet Store","timestamp":1704700002000}
//! {"event":"operation_finished","operation":"deploy","outcome":"completed","timestamp":1704700002000}
//! ```

pub mod runner;
pub mod services;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use studio_core::{AppModel, Notification};
use tracing::error;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// One entry of `list`
    AppListed {
        id: String,
        name: String,
        deployed: bool,
        pending_changes: bool,
        timestamp: i64,
    },

    /// Result of a name check
    NameChecked {
        id: String,
        name: String,
        valid: bool,
        error_key: Option<String>,
        timestamp: i64,
    },

    /// Filter chain after an insertion
    FilterAdded {
        id: String,
        filters: Vec<String>,
        timestamp: i64,
    },

    /// Capture form state after the requested toggles
    CaptureUpdated {
        id: String,
        inbound_request: bool,
        inbound_response: bool,
        outbound_request: bool,
        outbound_response: bool,
        submitted: bool,
        timestamp: i64,
    },

    /// A confirmation dialog was shown and answered
    ConfirmRequested {
        message_key: String,
        title: String,
        answer: bool,
        timestamp: i64,
    },

    /// A modal window was shown
    Modal {
        title_key: String,
        template: String,
        content: String,
        timestamp: i64,
    },

    /// Navigation requested by an operation
    Navigate { path: String, timestamp: i64 },

    /// Notification published by an operation
    Notification {
        #[serde(flatten)]
        notification: Notification,
        timestamp: i64,
    },

    /// A dialog flow ended
    OperationFinished {
        operation: String,
        outcome: String,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn app_listed(app: &AppModel) -> Self {
        Self::AppListed {
            id: app.id.to_string(),
            name: app.name().to_string(),
            deployed: app.deployed_date.is_some(),
            pending_changes: app.pending_changes,
            timestamp: Self::now(),
        }
    }

    pub fn name_checked(app: &AppModel, error_key: Option<&str>) -> Self {
        Self::NameChecked {
            id: app.id.to_string(),
            name: app.name().to_string(),
            valid: error_key.is_none(),
            error_key: error_key.map(str::to_string),
            timestamp: Self::now(),
        }
    }

    pub fn filter_added(app: &AppModel) -> Self {
        Self::FilterAdded {
            id: app.id.to_string(),
            filters: app
                .content
                .filters
                .iter()
                .map(|f| f.type_name().to_string())
                .collect(),
            timestamp: Self::now(),
        }
    }

    pub fn capture_updated(id: &str, flags: [bool; 4], submitted: bool) -> Self {
        let [inbound_request, inbound_response, outbound_request, outbound_response] = flags;
        Self::CaptureUpdated {
            id: id.to_string(),
            inbound_request,
            inbound_response,
            outbound_request,
            outbound_response,
            submitted,
            timestamp: Self::now(),
        }
    }

    pub fn confirm_requested(message_key: &str, title: &str, answer: bool) -> Self {
        Self::ConfirmRequested {
            message_key: message_key.to_string(),
            title: title.to_string(),
            answer,
            timestamp: Self::now(),
        }
    }

    pub fn modal(title_key: &str, template: &str, content: String) -> Self {
        Self::Modal {
            title_key: title_key.to_string(),
            template: template.to_string(),
            content,
            timestamp: Self::now(),
        }
    }

    pub fn navigate(path: &str) -> Self {
        Self::Navigate {
            path: path.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn notification(notification: Notification) -> Self {
        Self::Notification {
            notification,
            timestamp: Self::now(),
        }
    }

    pub fn operation_finished(operation: &str, outcome: &str) -> Self {
        Self::OperationFinished {
            operation: operation.to_string(),
            outcome: outcome.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}
