//! Headless mode runner - executes one command against the project stores

use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};
use studio_app::config::{init_config_dir, load_settings, Settings};
use studio_app::services::{
    AppCollection, DefaultTransformer, MemoryAppCollection, MemoryRouteDeployments,
};
use studio_app::{
    add_filter_into_model, check_name, handle_action, update, AppsContext, CaptureViewState,
    Message, NotificationBus, Outcome,
};
use studio_core::prelude::*;
use studio_core::{clean_app_name, AppId, AppModel, FilterEntry};
use tokio_util::sync::CancellationToken;

use super::services::{HeadlessDialogs, StdoutRouter};
use super::HeadlessEvent;
use crate::commands::Command;

type HeadlessContext = AppsContext<MemoryAppCollection, MemoryRouteDeployments, HeadlessDialogs>;

/// Run a single command in headless mode
pub async fn run_command(
    project_path: &Path,
    command: Command,
    assume_yes: bool,
    cancel: CancellationToken,
) -> Result<()> {
    info!("Project: {}", project_path.display());
    info!("Command: {:?}", command);

    if command == Command::Init {
        return init_config_dir(project_path);
    }

    let settings = load_settings(project_path);
    let apps = MemoryAppCollection::open(settings.store.resolve_apps(project_path))
        .context("Failed to open application store")?;
    let routes = MemoryRouteDeployments::open(settings.store.resolve_routes(project_path))
        .context("Failed to open route store")?;
    let bus = NotificationBus::default();
    let mut notifications = bus.subscribe();

    let mut ctx = AppsContext::new(
        apps,
        routes,
        HeadlessDialogs::new(assume_yes),
        Arc::new(StdoutRouter),
        Arc::new(DefaultTransformer),
        bus,
    );
    ctx.confirm_redeploy = settings.deploy.confirm_redeploy;

    let result = execute(&ctx, &settings, command, &cancel).await;

    // Everything published while the command ran
    while let Ok(notification) = notifications.try_recv() {
        HeadlessEvent::notification(notification).emit();
    }

    result
}

async fn execute(
    ctx: &HeadlessContext,
    settings: &Settings,
    command: Command,
    cancel: &CancellationToken,
) -> Result<()> {
    let operation = command.name();

    let outcome = match command {
        Command::Init => return Ok(()),

        Command::List => {
            for app in ctx.apps.available_apps().await? {
                HeadlessEvent::app_listed(&app).emit();
            }
            return Ok(());
        }

        Command::CheckName { id, name } => {
            let id = AppId::new(id);
            let mut candidate = ctx
                .apps
                .by_id(&id)
                .await?
                .unwrap_or_else(|| AppModel::new(id, ""));
            candidate.content.name = clean_app_name(&name);

            let check = check_name(&ctx.apps, &candidate).await?;
            HeadlessEvent::name_checked(&candidate, check.error_key()).emit();
            return Ok(());
        }

        Command::AddFilter {
            id,
            filter_type,
            config,
        } => {
            let mut app = require_app(ctx, &AppId::new(id)).await?;
            let config = match config {
                Some(raw) => serde_json::from_str::<Map<String, Value>>(&raw)?,
                None => Map::new(),
            };
            let filter = FilterEntry {
                filter_type: Some(filter_type),
                config,
            };

            add_filter_into_model(&mut app, filter, &settings.filter_order());
            ctx.apps.save(&app).await?;
            HeadlessEvent::filter_added(&app).emit();
            return Ok(());
        }

        Command::Capture {
            id,
            toggles,
            dry_run,
        } => {
            let mut app = require_app(ctx, &AppId::new(id)).await?;
            let mut state = CaptureViewState::render(&app)?;
            for name in toggles {
                update(&mut state, &mut app, Message::ToggleCapture { name });
            }

            let flags = state.current().flags();
            let mut submitted = false;
            if !dry_run {
                if let Some(action) = update(&mut state, &mut app, Message::SubmitCapture).action {
                    handle_action(action, ctx.apps.clone(), &ctx.bus)
                        .await
                        .map_err(|e| Error::store(format!("Save task failed: {}", e)))?;
                    submitted = true;
                }
            }
            HeadlessEvent::capture_updated(app.id.as_str(), flags, submitted).emit();
            return Ok(());
        }

        Command::Duplicate { id } => {
            let app = require_app(ctx, &AppId::new(id)).await?;
            ctx.duplicate_app_dlg(&app.id, app.name()).await
        }

        Command::Export { id } => ctx.export_config_dlg(&AppId::new(id)).await?,

        Command::Deploy { id } => {
            let app = require_app(ctx, &AppId::new(id)).await?;
            ctx.deploy_application_dlg(&app.id, app.name(), cancel)
                .await?
        }

        Command::Undeploy { id } => {
            let app = require_app(ctx, &AppId::new(id)).await?;
            ctx.undeploy_application_dlg(&app.id, app.name(), cancel)
                .await?
        }

        Command::Delete { id } => {
            let app = require_app(ctx, &AppId::new(id)).await?;
            let deleted = app.id.clone();
            ctx.delete_application_dlg(
                &app.id,
                app.name(),
                Some(Box::new(move || info!("Deleted application {}", deleted))),
            )
            .await?
        }
    };

    HeadlessEvent::operation_finished(operation, outcome_name(outcome)).emit();
    Ok(())
}

async fn require_app(ctx: &HeadlessContext, id: &AppId) -> Result<AppModel> {
    ctx.apps
        .by_id(id)
        .await?
        .ok_or_else(|| Error::app_not_found(id.as_str()))
}

fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Completed => "completed",
        Outcome::Declined => "declined",
        Outcome::NotFound => "not_found",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_app::config::STUDIO_DIR;
    use tempfile::tempdir;

    async fn seed(project: &Path, apps: Vec<AppModel>) {
        let store = MemoryAppCollection::open(project.join("apps.json")).unwrap();
        for app in apps {
            store.save(&app).await.unwrap();
        }
    }

    async fn stored(project: &Path, id: &str) -> Option<AppModel> {
        MemoryAppCollection::open(project.join("apps.json"))
            .unwrap()
            .by_id(&AppId::new(id))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_init_writes_config() {
        let temp = tempdir().unwrap();
        run_command(temp.path(), Command::Init, false, CancellationToken::new())
            .await
            .unwrap();
        assert!(temp.path().join(STUDIO_DIR).join("config.toml").exists());
    }

    #[tokio::test]
    async fn test_add_filter_persists_ordered_chain() {
        let temp = tempdir().unwrap();
        let mut app = AppModel::new("petstore", "Pet Store");
        app.content.filters = vec![FilterEntry::new("PolicyEnforcementFilter")];
        seed(temp.path(), vec![app]).await;

        run_command(
            temp.path(),
            Command::AddFilter {
                id: "petstore".into(),
                filter_type: "ThrottlingFilter".into(),
                config: Some(r#"{"rate": {"numberOfRequests": 10}}"#.into()),
            },
            false,
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let app = stored(temp.path(), "petstore").await.unwrap();
        assert_eq!(app.content.filters[0].type_name(), "ThrottlingFilter");
        assert_eq!(
            app.content.filters[0].config["rate"]["numberOfRequests"],
            serde_json::json!(10)
        );
    }

    #[tokio::test]
    async fn test_capture_toggles_are_saved() {
        let temp = tempdir().unwrap();
        seed(temp.path(), vec![AppModel::new("petstore", "Pet Store")]).await;

        run_command(
            temp.path(),
            Command::Capture {
                id: "petstore".into(),
                toggles: vec!["outboundResponse".into()],
                dry_run: false,
            },
            false,
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let app = stored(temp.path(), "petstore").await.unwrap();
        assert_eq!(app.capture().flags(), [false, false, false, true]);
    }

    #[tokio::test]
    async fn test_capture_dry_run_saves_nothing() {
        let temp = tempdir().unwrap();
        seed(temp.path(), vec![AppModel::new("petstore", "Pet Store")]).await;

        run_command(
            temp.path(),
            Command::Capture {
                id: "petstore".into(),
                toggles: vec!["inboundRequest".into()],
                dry_run: true,
            },
            false,
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let app = stored(temp.path(), "petstore").await.unwrap();
        assert!(app.content.capture.is_none());
    }

    #[tokio::test]
    async fn test_deploy_then_delete() {
        let temp = tempdir().unwrap();
        seed(temp.path(), vec![AppModel::new("petstore", "Pet Store")]).await;

        run_command(
            temp.path(),
            Command::Deploy {
                id: "petstore".into(),
            },
            false,
            CancellationToken::new(),
        )
        .await
        .unwrap();
        let app = stored(temp.path(), "petstore").await.unwrap();
        assert!(app.deployed_date.is_some());
        assert!(temp.path().join("routes.json").exists());

        // Declined without --yes
        run_command(
            temp.path(),
            Command::Delete {
                id: "petstore".into(),
            },
            false,
            CancellationToken::new(),
        )
        .await
        .unwrap();
        assert!(stored(temp.path(), "petstore").await.is_some());

        run_command(
            temp.path(),
            Command::Delete {
                id: "petstore".into(),
            },
            true,
            CancellationToken::new(),
        )
        .await
        .unwrap();
        assert!(stored(temp.path(), "petstore").await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_app_is_an_error() {
        let temp = tempdir().unwrap();
        let err = run_command(
            temp.path(),
            Command::Deploy { id: "ghost".into() },
            true,
            CancellationToken::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::AppNotFound { .. }));
    }
}
