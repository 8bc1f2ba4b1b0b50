//! Configuration types for Gateway Studio

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use studio_core::FilterOrder;

/// Application settings (.studio/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub filters: FilterSettings,

    #[serde(default)]
    pub deploy: DeploySettings,
}

impl Settings {
    /// Filter priority table: built-in order plus configured overrides
    pub fn filter_order(&self) -> FilterOrder {
        FilterOrder::with_overrides(
            self.filters
                .order
                .iter()
                .map(|(name, priority)| (name.clone(), *priority)),
        )
    }
}

/// Where applications and deployed routes are persisted
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoreSettings {
    /// Application store, relative paths resolve against the project directory
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Deployed routes store
    #[serde(default = "default_routes_path")]
    pub routes_path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            routes_path: default_routes_path(),
        }
    }
}

impl StoreSettings {
    pub fn resolve_apps(&self, project_path: &Path) -> PathBuf {
        project_path.join(&self.path)
    }

    pub fn resolve_routes(&self, project_path: &Path) -> PathBuf {
        project_path.join(&self.routes_path)
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("apps.json")
}

fn default_routes_path() -> PathBuf {
    PathBuf::from("routes.json")
}

/// Filter ordering overrides
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FilterSettings {
    /// Filter type -> priority (lower runs earlier)
    #[serde(default)]
    pub order: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeploySettings {
    /// Ask before re-deploying an application that is already deployed
    #[serde(default = "default_true")]
    pub confirm_redeploy: bool,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            confirm_redeploy: true,
        }
    }
}

fn default_true() -> bool {
    true
}
