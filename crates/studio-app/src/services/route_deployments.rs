//! Route deployment collection
//!
//! Deploying an application pushes its generated route JSON to the
//! gateway; undeploying removes it. The transport is up to the
//! implementation; failures carry whatever the remote side reported.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use studio_core::prelude::*;
use studio_core::AppId;
use thiserror::Error;
use tokio::sync::RwLock;

use super::app_collection::write_atomic;

/// Nested cause of a remote failure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteCause {
    pub message: String,
}

/// Failure reported by a deploy/undeploy call
#[derive(Debug, Clone, PartialEq, Eq, Default, Error, Deserialize, Serialize)]
#[error("{}", describe(.cause, .status_text))]
#[serde(rename_all = "camelCase")]
pub struct RemoteError {
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub cause: Option<RemoteCause>,
}

fn describe<'a>(cause: &'a Option<RemoteCause>, status_text: &'a Option<String>) -> &'a str {
    match cause {
        Some(cause) => &cause.message,
        None => status_text.as_deref().unwrap_or("remote operation failed"),
    }
}

impl RemoteError {
    pub fn status(status_text: impl Into<String>) -> Self {
        Self {
            status_text: Some(status_text.into()),
            cause: None,
        }
    }

    pub fn with_cause(status_text: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_text: Some(status_text.into()),
            cause: Some(RemoteCause {
                message: message.into(),
            }),
        }
    }

    /// Best-effort message: the cause's message, else the status text
    pub fn message(&self) -> Option<&str> {
        match &self.cause {
            Some(cause) => Some(cause.message.as_str()),
            None => self.status_text.as_deref(),
        }
    }
}

impl From<RemoteError> for Error {
    fn from(err: RemoteError) -> Self {
        Error::remote(err.message().map(str::to_string))
    }
}

/// Route deployment operations
#[trait_variant::make(RouteDeployments: Send)]
pub trait LocalRouteDeployments {
    /// Deploy (or re-deploy) the route generated for an application
    async fn deploy(&self, id: &AppId, route: Value) -> std::result::Result<(), RemoteError>;

    /// Remove an application's route from the gateway
    async fn undeploy(&self, id: &AppId) -> std::result::Result<(), RemoteError>;

    /// Whether a route is currently deployed for the application
    async fn is_deployed(&self, id: &AppId) -> bool;
}

/// In-memory deployments, optionally persisted to a JSON file
#[derive(Debug, Clone, Default)]
pub struct MemoryRouteDeployments {
    routes: Arc<RwLock<BTreeMap<AppId, Value>>>,
    store_path: Option<PathBuf>,
}

impl MemoryRouteDeployments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON object file (`{ app id: route }`); missing file is empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let routes = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| Error::store(format!("Failed to read {:?}: {}", path, e)))?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            routes: Arc::new(RwLock::new(routes)),
            store_path: Some(path),
        })
    }

    /// Deployed route for an application
    pub async fn route(&self, id: &AppId) -> Option<Value> {
        self.routes.read().await.get(id).cloned()
    }

    async fn persist(&self, routes: &BTreeMap<AppId, Value>) -> std::result::Result<(), RemoteError> {
        let Some(path) = &self.store_path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(routes)
            .map_err(|e| RemoteError::with_cause("Internal Error", e.to_string()))?;
        write_atomic(path, content)
            .await
            .map_err(|e| RemoteError::with_cause("Internal Error", e.to_string()))
    }
}

impl RouteDeployments for MemoryRouteDeployments {
    async fn deploy(&self, id: &AppId, route: Value) -> std::result::Result<(), RemoteError> {
        let mut routes = self.routes.write().await;
        let mut updated = routes.clone();
        updated.insert(id.clone(), route);
        self.persist(&updated).await?;
        *routes = updated;
        info!("Deployed route for {}", id);
        Ok(())
    }

    async fn undeploy(&self, id: &AppId) -> std::result::Result<(), RemoteError> {
        let mut routes = self.routes.write().await;
        if !routes.contains_key(id) {
            return Err(RemoteError::with_cause(
                "Not Found",
                format!("No route deployed for '{}'", id),
            ));
        }
        let mut updated = routes.clone();
        updated.remove(id);
        self.persist(&updated).await?;
        *routes = updated;
        info!("Undeployed route for {}", id);
        Ok(())
    }

    async fn is_deployed(&self, id: &AppId) -> bool {
        self.routes.read().await.contains_key(id)
    }
}
