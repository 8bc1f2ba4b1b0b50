//! Application operations
//!
//! Name validation, filter insertion and the confirmation flows behind the
//! application list actions (duplicate, export, deploy, undeploy, delete).
//! Every outcome is reported on the [`NotificationBus`]; the returned value
//! only tells the caller how the flow ended.

use std::sync::Arc;

use chrono::Utc;
use studio_core::prelude::*;
use studio_core::{AppId, AppModel, FilterEntry, FilterOrder, NotificationKey};
use tokio_util::sync::CancellationToken;

use crate::notifications::NotificationBus;
use crate::services::{
    AppCollection, ConfirmRequest, DialogService, ModalDialog, RouteDeployments, RouteTransformer,
    Router,
};

pub const DUPLICATE_NAME_ERROR: &str = "templates.apps.duplicateNameError";
pub const DUPLICATE_DIALOG: &str = "templates.apps.duplicateDialog";
pub const DEPLOY_DIALOG: &str = "templates.apps.deployDialog";
pub const UNDEPLOY_DIALOG: &str = "templates.apps.undeployDialog";
pub const DELETE_DIALOG: &str = "templates.apps.deleteDialog";

/// Callback run after an application was deleted
pub type DeletedCallback = Box<dyn FnOnce() + Send>;

/// Result of validating an application name against its siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck {
    Valid,
    Duplicate,
}

impl NameCheck {
    /// Translation key of the validation error, if any
    pub fn error_key(&self) -> Option<&'static str> {
        match self {
            NameCheck::Valid => None,
            NameCheck::Duplicate => Some(DUPLICATE_NAME_ERROR),
        }
    }
}

/// How a dialog flow ended (failures are returned as errors)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The user answered "no"
    Declined,
    /// No application with that id
    NotFound,
}

/// Check that no *other* application already uses the candidate's name
pub async fn check_name<A: AppCollection>(apps: &A, candidate: &AppModel) -> Result<NameCheck> {
    let duplicate = apps
        .available_apps()
        .await?
        .iter()
        .any(|a| a.name() == candidate.name() && a.id != candidate.id);

    if duplicate {
        debug!("Name '{}' already used by another application", candidate.name());
        Ok(NameCheck::Duplicate)
    } else {
        Ok(NameCheck::Valid)
    }
}

/// Insert a filter into the application's chain at its ordered position
pub fn add_filter_into_model(app: &mut AppModel, filter: FilterEntry, order: &FilterOrder) {
    app.add_filter(filter, order);
}

/// Collaborators shared by the dialog flows
pub struct AppsContext<A, R, D> {
    pub apps: A,
    pub routes: R,
    pub dialogs: D,
    pub router: Arc<dyn Router>,
    pub transformer: Arc<dyn RouteTransformer>,
    pub bus: NotificationBus,
    /// Ask before re-deploying an already deployed application
    pub confirm_redeploy: bool,
}

impl<A, R, D> AppsContext<A, R, D>
where
    A: AppCollection + Sync,
    R: RouteDeployments + Sync,
    D: DialogService + Sync,
{
    pub fn new(
        apps: A,
        routes: R,
        dialogs: D,
        router: Arc<dyn Router>,
        transformer: Arc<dyn RouteTransformer>,
        bus: NotificationBus,
    ) -> Self {
        Self {
            apps,
            routes,
            dialogs,
            router,
            transformer,
            bus,
            confirm_redeploy: true,
        }
    }

    /// Confirm, then open the duplicate form for the application
    pub async fn duplicate_app_dlg(&self, id: &AppId, title: &str) -> Outcome {
        if !self
            .dialogs
            .confirm(ConfirmRequest::danger(DUPLICATE_DIALOG, title))
            .await
        {
            return Outcome::Declined;
        }
        self.router.navigate(&format!("apps/duplicate/{}", id));
        Outcome::Completed
    }

    /// Show the generated route JSON of an application in a modal
    pub async fn export_config_dlg(&self, id: &AppId) -> Result<Outcome> {
        let Some(app) = self.apps.by_id(id).await? else {
            debug!("Export requested for unknown application {}", id);
            return Ok(Outcome::NotFound);
        };

        let json = self
            .transformer
            .transform_application(&app)
            .map_err(Error::from)
            .and_then(|route| serde_json::to_string_pretty(&route).map_err(Error::from));

        match json {
            Ok(json) => {
                self.dialogs
                    .show_modal(ModalDialog::config_export(json))
                    .await;
                Ok(Outcome::Completed)
            }
            Err(err) => {
                let (key, message) = match &err {
                    Error::Transform {
                        error_type,
                        message,
                    } => (error_type.clone(), message.clone()),
                    other => ("modelTransformationFailed".to_string(), other.to_string()),
                };
                self.bus.send(
                    studio_core::Notification::new(key_for(&key))
                        .message(Some(message))
                        .failed(),
                );
                Err(err)
            }
        }
    }

    /// Transform and deploy a model, then record the deployment.
    ///
    /// On failure nothing is mutated. A cancelled deploy returns
    /// [`Error::Cancelled`] without notifying.
    pub async fn deploy_application_model(
        &self,
        app: &AppModel,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let title = app.name();

        let route = match self.transformer.transform_application(app) {
            Ok(route) => route,
            Err(err) => {
                self.bus.send_app(
                    NotificationKey::AppDeployedFailed,
                    title,
                    Some(err.message.clone()),
                );
                return Err(err.into());
            }
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Deploy of {} cancelled", app.id);
                return Err(Error::Cancelled);
            }
            result = self.routes.deploy(&app.id, route) => result,
        };

        match result {
            Ok(()) => {
                self.bus
                    .send_app(NotificationKey::AppDeployedSuccess, title, None);
                self.record_deployment(app).await
            }
            Err(err) => {
                let message = err.message().map(str::to_string);
                self.bus
                    .send_app(NotificationKey::AppDeployedFailed, title, message);
                Err(err.into())
            }
        }
    }

    /// Update deployment metadata of the stored model, if it still exists
    async fn record_deployment(&self, deployed: &AppModel) -> Result<()> {
        let Some(mut current) = self.apps.by_id(&deployed.id).await? else {
            warn!(
                "Application {} was removed while deploying, skipping metadata update",
                deployed.id
            );
            return Ok(());
        };

        // The route only reflects what was deployed; a newer stored edit stays pending
        let up_to_date = current.content == deployed.content;
        if !up_to_date {
            info!(
                "Application {} changed during deploy, keeping pending changes",
                deployed.id
            );
        }
        current.mark_deployed(Utc::now(), up_to_date);
        self.apps.save(&current).await
    }

    /// Deploy an application, asking first when it is already deployed
    pub async fn deploy_application_dlg(
        &self,
        id: &AppId,
        title: &str,
        cancel: &CancellationToken,
    ) -> Result<Outcome> {
        let Some(app) = self.apps.by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        if self.confirm_redeploy
            && self.routes.is_deployed(id).await
            && !self
                .dialogs
                .confirm(ConfirmRequest::danger(DEPLOY_DIALOG, title))
                .await
        {
            return Ok(Outcome::Declined);
        }

        self.deploy_application_model(&app, cancel).await?;
        Ok(Outcome::Completed)
    }

    /// Confirm, then remove the application's route from the gateway
    pub async fn undeploy_application_dlg(
        &self,
        id: &AppId,
        title: &str,
        cancel: &CancellationToken,
    ) -> Result<Outcome> {
        if !self
            .dialogs
            .confirm(ConfirmRequest::danger(UNDEPLOY_DIALOG, title))
            .await
        {
            return Ok(Outcome::Declined);
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Undeploy of {} cancelled", id);
                return Err(Error::Cancelled);
            }
            result = self.routes.undeploy(id) => result,
        };

        match result {
            Ok(()) => {
                self.bus
                    .send_app(NotificationKey::AppUndeployedSuccess, title, None);
                match self.apps.by_id(id).await? {
                    Some(mut app) => {
                        app.mark_undeployed();
                        self.apps.save(&app).await?;
                    }
                    None => warn!("Application {} was removed while undeploying", id),
                }
                Ok(Outcome::Completed)
            }
            Err(err) => {
                let message = err.message().map(str::to_string);
                self.bus
                    .send_app(NotificationKey::AppUndeployedFailed, title, message);
                Err(err.into())
            }
        }
    }

    /// Confirm, then delete the application
    pub async fn delete_application_dlg(
        &self,
        id: &AppId,
        title: &str,
        on_deleted: Option<DeletedCallback>,
    ) -> Result<Outcome> {
        if !self
            .dialogs
            .confirm(ConfirmRequest::danger(DELETE_DIALOG, title))
            .await
        {
            return Ok(Outcome::Declined);
        }

        if !self.apps.remove_by_id(id).await? {
            debug!("Delete of {} found nothing to remove", id);
        }
        self.bus
            .send_app(NotificationKey::DeleteAppSuccess, title, None);

        if let Some(callback) = on_deleted {
            callback();
        }
        Ok(Outcome::Completed)
    }
}

fn key_for(raw: &str) -> NotificationKey {
    match raw {
        "modelTransformationFailed" => NotificationKey::ModelTransformationFailed,
        other => NotificationKey::Other(other.to_string()),
    }
}
