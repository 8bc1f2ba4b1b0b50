//! User-facing notifications.
//!
//! Every operation outcome the console reports (saves, deploys, failures)
//! is a [`Notification`] identified by a message key, plus optional
//! interpolation values for the message template.

use serde::{Serialize, Serializer};

/// Message keys understood by the notification templates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKey {
    AppSettingsSaveSuccess,
    AppDeployedSuccess,
    AppDeployedFailed,
    AppUndeployedSuccess,
    AppUndeployedFailed,
    DeleteAppSuccess,
    ModelTransformationFailed,
    /// Key supplied by a collaborator (e.g. a transform error type)
    Other(String),
}

impl NotificationKey {
    pub fn as_str(&self) -> &str {
        match self {
            Self::AppSettingsSaveSuccess => "appSettingsSaveSuccess",
            Self::AppDeployedSuccess => "appDeployedSuccess",
            Self::AppDeployedFailed => "appDeployedFailed",
            Self::AppUndeployedSuccess => "appUndeployedSuccess",
            Self::AppUndeployedFailed => "appUndeployedFailed",
            Self::DeleteAppSuccess => "deleteAppSuccess",
            Self::ModelTransformationFailed => "modelTransformationFailed",
            Self::Other(key) => key,
        }
    }

    /// Whether the key reports a failure
    pub fn is_failure(&self) -> bool {
        match self {
            Self::AppDeployedFailed
            | Self::AppUndeployedFailed
            | Self::ModelTransformationFailed => true,
            _ => false,
        }
    }
}

impl Serialize for NotificationKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for NotificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message for the notification channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub key: NotificationKey,

    /// Application title interpolated into the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Failure details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Translation key of the settings section that was saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Set by the publisher for failures under a free-form key
    #[serde(skip)]
    pub failed: bool,
}

impl Notification {
    pub fn new(key: NotificationKey) -> Self {
        Self {
            key,
            title: None,
            message: None,
            filter: None,
            failed: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Mark as a failure regardless of the key
    pub fn failed(mut self) -> Self {
        self.failed = true;
        self
    }

    pub fn is_failure(&self) -> bool {
        self.failed || self.key.is_failure()
    }
}
