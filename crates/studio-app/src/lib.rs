//! # studio-app - Application State and Operations
//!
//! View state, service seams and application operations for Gateway
//! Studio. Depends on `studio-core` for the domain types.
//!
//! ## Public API
//!
//! ### Operations (`apps`)
//! - [`AppsContext`] - Duplicate/export/deploy/undeploy/delete dialog flows
//! - [`check_name()`] - Reject names already used by another application
//! - [`add_filter_into_model()`] - Ordered filter insertion
//!
//! ### Capture View (TEA)
//! - [`CaptureViewState`] - Capture settings form and submit state
//! - [`Message`] - Messages the view reacts to
//! - [`update()`] - Update function
//! - [`UpdateAction`], [`UpdateResult`] - What the caller does next
//! - [`handle_action()`] - Execute an [`UpdateAction`]
//!
//! ### Services (`services`)
//! - [`services::AppCollection`] - Application store
//! - [`services::RouteDeployments`] - Gateway route deployment
//! - [`services::DialogService`], [`services::Router`] - User interaction
//! - [`services::RouteTransformer`] - Model to route JSON
//!
//! ### Notifications
//! - [`NotificationBus`] - Broadcast channel of operation outcomes
//!
//! ### Configuration (`config`)
//! - [`config::Settings`] - `.studio/config.toml`

pub mod actions;
pub mod apps;
pub mod capture_view;
pub mod config;
pub mod handler;
pub mod message;
pub mod notifications;
pub mod services;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use actions::handle_action;
pub use apps::{
    add_filter_into_model, check_name, AppsContext, DeletedCallback, NameCheck, Outcome,
    DELETE_DIALOG, DEPLOY_DIALOG, DUPLICATE_DIALOG, DUPLICATE_NAME_ERROR, UNDEPLOY_DIALOG,
};
pub use capture_view::{CaptureViewState, CAPTURE_FIELDS_PATH, CAPTURE_TITLE_KEY};
pub use config::Settings;
pub use handler::{update, UpdateAction, UpdateResult};
pub use message::Message;
pub use notifications::NotificationBus;
