//! Settings parser for .studio/config.toml

use super::types::Settings;
use std::path::Path;
use studio_core::prelude::*;

pub const CONFIG_FILENAME: &str = "config.toml";
pub const STUDIO_DIR: &str = ".studio";

const DEFAULT_CONFIG: &str = r#"# Gateway Studio Configuration

[store]
path = "apps.json"          # Application store (relative to the project directory)
routes_path = "routes.json" # Deployed routes

[filters.order]
# Extra or overridden filter priorities (lower runs earlier)
# HeaderFilter = 150

[deploy]
confirm_redeploy = true     # Ask before re-deploying a deployed application
"#;

/// Load settings from .studio/config.toml
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = project_path.join(STUDIO_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create .studio/config.toml with commented defaults if missing
pub fn init_config_dir(project_path: &Path) -> Result<()> {
    let studio_dir = project_path.join(STUDIO_DIR);

    if !studio_dir.exists() {
        std::fs::create_dir_all(&studio_dir)
            .map_err(|e| Error::config(format!("Failed to create .studio dir: {}", e)))?;
    }

    let config_path = studio_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
    }

    Ok(())
}

/// Save settings to .studio/config.toml
///
/// Uses atomic write (temp file + rename).
pub fn save_settings(project_path: &Path, settings: &Settings) -> Result<()> {
    let studio_dir = project_path.join(STUDIO_DIR);

    if !studio_dir.exists() {
        std::fs::create_dir_all(&studio_dir)
            .map_err(|e| Error::config(format!("Failed to create .studio dir: {}", e)))?;
    }

    let config_path = studio_dir.join(CONFIG_FILENAME);
    let temp_path = studio_dir.join(".config.toml.tmp");

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    let full_content = format!("# Gateway Studio Configuration\n\n{}", content);

    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

    std::fs::rename(&temp_path, &config_path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved settings to {:?}", config_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(temp.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let studio_dir = temp.path().join(".studio");
        std::fs::create_dir_all(&studio_dir).unwrap();

        let config = r#"
[store]
path = "data/apps.json"

[filters.order]
HeaderFilter = 150

[deploy]
confirm_redeploy = false
"#;
        std::fs::write(studio_dir.join("config.toml"), config).unwrap();

        let settings = load_settings(temp.path());

        assert_eq!(settings.store.path, PathBuf::from("data/apps.json"));
        assert_eq!(settings.store.routes_path, PathBuf::from("routes.json"));
        assert_eq!(settings.filters.order.get("HeaderFilter"), Some(&150));
        assert!(!settings.deploy.confirm_redeploy);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let studio_dir = temp.path().join(".studio");
        std::fs::create_dir_all(&studio_dir).unwrap();
        std::fs::write(studio_dir.join("config.toml"), "not valid toml {{{{").unwrap();

        let settings = load_settings(temp.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_init_config_dir_writes_parseable_defaults() {
        let temp = tempdir().unwrap();

        init_config_dir(temp.path()).unwrap();

        assert!(temp.path().join(".studio/config.toml").exists());
        assert_eq!(load_settings(temp.path()), Settings::default());
    }

    #[test]
    fn test_init_config_dir_keeps_existing_file() {
        let temp = tempdir().unwrap();
        let studio_dir = temp.path().join(".studio");
        std::fs::create_dir_all(&studio_dir).unwrap();
        std::fs::write(studio_dir.join("config.toml"), "[deploy]\nconfirm_redeploy = false\n")
            .unwrap();

        init_config_dir(temp.path()).unwrap();

        assert!(!load_settings(temp.path()).deploy.confirm_redeploy);
    }

    #[test]
    fn test_save_settings_roundtrip() {
        let temp = tempdir().unwrap();

        let mut settings = Settings::default();
        settings.filters.order.insert("HeaderFilter".into(), 150);
        settings.deploy.confirm_redeploy = false;

        save_settings(temp.path(), &settings).unwrap();
        let loaded = load_settings(temp.path());

        assert_eq!(loaded, settings);
        assert!(!temp.path().join(".studio/.config.toml.tmp").exists());
    }
}
