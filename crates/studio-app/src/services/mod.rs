//! Service layer for Gateway Studio
//!
//! Service traits abstract every collaborator the console talks to, so the
//! operations in [`crate::apps`] and the views receive their dependencies
//! explicitly instead of reaching for globals.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │ Capture view│     │ Apps ops    │
//! └──────┬──────┘     └──────┬──────┘
//!        │                   │
//!        └─────────┬─────────┘
//!                  │
//!           ┌──────▼──────┐
//!           │  Services   │
//!           │  (traits)   │
//!           └──────┬──────┘
//!                  │
//!      ┌───────────┼────────────┐
//!  ┌───▼───┐  ┌────▼────┐  ┌────▼────┐
//!  │ Apps  │  │ Routes  │  │ Dialogs │
//!  │ store │  │ deploy  │  │ router  │
//!  └───────┘  └─────────┘  └─────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`AppCollection`]: application lookup, listing, removal and save
//! - [`RouteDeployments`]: deploy/undeploy generated routes
//! - [`DialogService`]: confirmation and modal dialogs
//! - [`Router`]: client-side navigation
//! - [`RouteTransformer`]: application model to route JSON

mod app_collection;
mod dialogs;
mod route_deployments;
mod transform;

pub use app_collection::{AppCollection, LocalAppCollection, MemoryAppCollection};
pub use dialogs::{
    ConfirmRequest, DialogService, LocalDialogService, ModalDialog, Router, Severity,
    CONFIG_EXPORT_TITLE, MODAL_MESSAGE_TEMPLATE,
};
pub use route_deployments::{
    LocalRouteDeployments, MemoryRouteDeployments, RemoteCause, RemoteError, RouteDeployments,
};
pub use transform::{DefaultTransformer, RouteTransformer, TransformError};
