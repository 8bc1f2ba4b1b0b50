//! Configuration file parsing for Gateway Studio
//!
//! Supports:
//! - `.studio/config.toml` - Store locations, filter ordering, deploy behavior

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings, save_settings, CONFIG_FILENAME, STUDIO_DIR};
pub use types::*;
