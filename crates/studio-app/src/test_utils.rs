//! Test utilities for application operations
//!
//! Recording fakes for the dialog, router and deployment services plus
//! application fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use studio_core::{AppId, AppModel, CaptureConfig, FilterEntry};

use crate::services::{ConfirmRequest, DialogService, ModalDialog, RemoteError, RouteDeployments, Router};

/// Dialog service that answers every confirmation the same way and records
/// what was asked and shown.
#[derive(Debug, Clone, Default)]
pub struct RecordingDialogs {
    answer: bool,
    asked: Arc<Mutex<Vec<ConfirmRequest>>>,
    modals: Arc<Mutex<Vec<ModalDialog>>>,
}

impl RecordingDialogs {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    /// Confirmation requests, oldest first
    pub fn asked(&self) -> Vec<ConfirmRequest> {
        self.asked.lock().unwrap().clone()
    }

    /// Modals shown, oldest first
    pub fn modals(&self) -> Vec<ModalDialog> {
        self.modals.lock().unwrap().clone()
    }
}

impl DialogService for RecordingDialogs {
    async fn confirm(&self, request: ConfirmRequest) -> bool {
        self.asked.lock().unwrap().push(request);
        self.answer
    }

    async fn show_modal(&self, modal: ModalDialog) {
        self.modals.lock().unwrap().push(modal);
    }
}

/// Router that records navigation paths
#[derive(Debug, Default)]
pub struct RecordingRouter {
    paths: Mutex<Vec<String>>,
}

impl RecordingRouter {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Router for RecordingRouter {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

#[derive(Debug, Clone)]
enum Script {
    Fail(RemoteError),
    Hang,
}

/// Deployments that fail with a fixed error or never complete.
/// Clones share the call counter.
#[derive(Debug, Clone)]
pub struct ScriptedRoutes {
    script: Script,
    deployed: bool,
    calls: Arc<AtomicUsize>,
}

impl ScriptedRoutes {
    /// Every deploy/undeploy fails with `err`
    pub fn failing(err: RemoteError) -> Self {
        Self {
            script: Script::Fail(err),
            deployed: false,
            calls: Arc::default(),
        }
    }

    /// Every deploy/undeploy stays pending forever
    pub fn pending() -> Self {
        Self {
            script: Script::Hang,
            deployed: false,
            calls: Arc::default(),
        }
    }

    /// Report every application as already deployed
    pub fn reporting_deployed(mut self) -> Self {
        self.deployed = true;
        self
    }

    /// Number of deploy/undeploy calls started so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn run(&self) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Fail(err) => Err(err.clone()),
            Script::Hang => std::future::pending().await,
        }
    }
}

impl RouteDeployments for ScriptedRoutes {
    async fn deploy(&self, _id: &AppId, _route: Value) -> Result<(), RemoteError> {
        self.run().await
    }

    async fn undeploy(&self, _id: &AppId) -> Result<(), RemoteError> {
        self.run().await
    }

    async fn is_deployed(&self, _id: &AppId) -> bool {
        self.deployed
    }
}

/// An application with a URL, two filters and inbound request capture
pub fn test_app(id: &str, name: &str) -> AppModel {
    let mut app = AppModel::new(id, name);
    app.content.url = Some(format!("http://{}.internal:8080", id));
    app.content.filters = vec![
        FilterEntry::new("ThrottlingFilter"),
        FilterEntry::new("PolicyEnforcementFilter"),
    ];
    app.content.capture = Some(CaptureConfig::from_flags([true, false, false, false]));
    app
}
