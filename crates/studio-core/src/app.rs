//! Application model
//!
//! An application is the unit the console manages: a named gateway route
//! with an ordered filter chain, optional capture settings and deployment
//! metadata. The serialized shape matches the store format
//! (`_id`, `content`, `deployedDate`, `pendingChanges`).

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::capture::{effective_capture, CaptureConfig};
use crate::filter::{insert_ordered, FilterEntry, FilterOrder};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Application identifier (`_id` in the store)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AppId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Editable configuration of an application
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct AppContent {
    #[serde(default)]
    pub name: String,

    /// Base URI of the protected application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Route condition expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(default)]
    pub filters: Vec<FilterEntry>,

    /// Present only when at least one capture flag is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<CaptureConfig>,

    /// Any other content keys, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A managed application
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppModel {
    #[serde(rename = "_id")]
    pub id: AppId,

    pub content: AppContent,

    #[serde(default)]
    pub deployed_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub pending_changes: bool,
}

impl AppModel {
    pub fn new(id: impl Into<AppId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: AppContent {
                name: name.into(),
                ..AppContent::default()
            },
            deployed_date: None,
            pending_changes: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.content.name
    }

    /// Effective capture configuration (default when no block is stored)
    pub fn capture(&self) -> CaptureConfig {
        effective_capture(self.content.capture.as_ref())
    }

    /// Record a content edit. A deployed application now has pending changes.
    pub fn mark_changed(&mut self) {
        if self.deployed_date.is_some() {
            self.pending_changes = true;
        }
    }

    /// Store the capture block, removing it when no flag is set
    pub fn set_capture(&mut self, capture: CaptureConfig) {
        self.content.capture = capture.into_stored();
        self.mark_changed();
    }

    /// Insert a filter at its ordered position in the chain
    pub fn add_filter(&mut self, filter: FilterEntry, order: &FilterOrder) {
        self.content.filters = insert_ordered(&self.content.filters, filter, order);
        self.mark_changed();
    }

    /// Deployment metadata after a successful deploy.
    ///
    /// `up_to_date` is false when the model was edited while the deploy
    /// was in flight, in which case the pending flag stays set.
    pub fn mark_deployed(&mut self, at: DateTime<Utc>, up_to_date: bool) {
        self.deployed_date = Some(at);
        self.pending_changes = !up_to_date;
    }

    /// Deployment metadata after a successful undeploy
    pub fn mark_undeployed(&mut self) {
        self.deployed_date = None;
        self.pending_changes = false;
    }
}

/// Normalize a user-supplied application name.
///
/// Leading/trailing whitespace is removed and internal whitespace runs
/// collapse to a single space.
pub fn clean_app_name(name: &str) -> String {
    WHITESPACE_RUN.replace_all(name.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureDirection;
    use serde_json::json;

    #[test]
    fn test_deserialize_store_format() {
        let raw = json!({
            "_id": "petstore",
            "content": {
                "name": "Pet Store",
                "url": "http://petstore:8080",
                "filters": [{"type": "ThrottlingFilter"}],
                "capture": {"inbound": {"request": true, "response": false},
                            "outbound": {"request": false, "response": false}},
                "description": "kept as-is"
            },
            "deployedDate": "2026-03-01T10:00:00Z",
            "pendingChanges": true
        });

        let app: AppModel = serde_json::from_value(raw).unwrap();

        assert_eq!(app.id.as_str(), "petstore");
        assert_eq!(app.name(), "Pet Store");
        assert_eq!(app.content.filters.len(), 1);
        assert!(app.capture().inbound.request);
        assert_eq!(app.content.extra["description"], json!("kept as-is"));
        assert!(app.deployed_date.is_some());
        assert!(app.pending_changes);
    }

    #[test]
    fn test_serialize_omits_absent_capture() {
        let app = AppModel::new("a1", "One");
        let value = serde_json::to_value(&app).unwrap();
        assert!(value["content"].get("capture").is_none());
        assert_eq!(value["_id"], json!("a1"));
        assert_eq!(value["pendingChanges"], json!(false));
    }

    #[test]
    fn test_set_capture_removes_disabled_block() {
        let mut app = AppModel::new("a1", "One");
        app.set_capture(CaptureConfig::new(
            CaptureDirection::new(true, false),
            CaptureDirection::default(),
        ));
        assert!(app.content.capture.is_some());

        app.set_capture(CaptureConfig::default());
        assert!(app.content.capture.is_none());
    }

    #[test]
    fn test_mark_changed_sets_pending_only_when_deployed() {
        let mut app = AppModel::new("a1", "One");
        app.mark_changed();
        assert!(!app.pending_changes);

        app.mark_deployed(Utc::now(), true);
        assert!(!app.pending_changes);
        app.mark_changed();
        assert!(app.pending_changes);
    }

    #[test]
    fn test_mark_undeployed_clears_metadata() {
        let mut app = AppModel::new("a1", "One");
        app.mark_deployed(Utc::now(), false);
        assert!(app.pending_changes);

        app.mark_undeployed();
        assert!(app.deployed_date.is_none());
        assert!(!app.pending_changes);
    }

    #[test]
    fn test_clean_app_name() {
        assert_eq!(clean_app_name("  Pet   Store \t"), "Pet Store");
        assert_eq!(clean_app_name("plain"), "plain");
        assert_eq!(clean_app_name("   "), "");
    }
}
