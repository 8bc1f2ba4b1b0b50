//! # studio-core - Core Domain Types
//!
//! Foundation crate for Gateway Studio. Provides the application model,
//! capture settings, filter ordering, declarative form controls,
//! notifications, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Application Model (`app`)
//! - [`AppModel`] - A managed application (`_id`, `content`, deployment metadata)
//! - [`AppContent`] - Editable configuration: name, filters, capture, ...
//! - [`clean_app_name()`] - Normalize a user-supplied name
//!
//! ### Capture (`capture`)
//! - [`CaptureConfig`] - Inbound/outbound request/response capture flags
//!
//! ### Filters (`filter`)
//! - [`FilterEntry`] - A filter in the application's chain
//! - [`FilterOrder`] - Priority table keyed on filter type
//! - [`insert_ordered()`] - Stable ordered insertion into a filter list
//!
//! ### Controls (`controls`)
//! - [`Control`], [`ControlKind`] - Tagged-variant form control descriptors
//! - [`ControlSet`] - Validated control tree
//! - [`FormValues`] - Values read back from a form
//!
//! ### Notifications (`notification`)
//! - [`Notification`], [`NotificationKey`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use studio_core::prelude::*;
//! ```

pub mod app;
pub mod capture;
pub mod controls;
pub mod error;
pub mod filter;
pub mod logging;
pub mod notification;

/// Prelude for common imports used throughout all Gateway Studio crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use app::{clean_app_name, AppContent, AppId, AppModel};
pub use capture::{effective_capture, is_capture_enabled, CaptureConfig, CaptureDirection};
pub use controls::{get_bool_value, Control, ControlKind, ControlSet, ControlSettings, FormValues};
pub use error::{Error, Result, ResultExt};
pub use filter::{
    insert_ordered, FilterEntry, FilterOrder, DEFAULT_FILTERS_ORDER, UNKNOWN_FILTER_PRIORITY,
    UNKNOWN_FILTER_TYPE,
};
pub use notification::{Notification, NotificationKey};
