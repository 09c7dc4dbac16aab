use crate::model::{PartialSettings, Settings};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project config directory, relative to the project root
pub const CONFIG_DIR: &str = ".codeowners";

/// Load settings for the current directory.
///
/// See [`load_settings_from`].
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("."))
}

/// Load settings with precedence:
/// 1. User config (~/.codeowners/config.toml) - lowest priority
/// 2. Project config (.codeowners/config.toml) - medium priority
/// 3. Local config (.codeowners/config.local.toml) - highest priority
///
/// Every layer is optional. Later layers override earlier ones field by field.
pub fn load_settings_from(project_root: &Path) -> Result<Settings> {
    let mut layers = Vec::new();

    // 1. Try user config
    if let Some(home_dir) = dirs::home_dir() {
        let user_config = home_dir.join(CONFIG_DIR).join("config.toml");
        if user_config.exists() {
            match load_single_config(&user_config) {
                Ok(cfg) => layers.push(cfg),
                Err(e) => tracing::warn!("Failed to load user config: {:#}", e),
            }
        }
    }

    // 2. Project config; a broken project file is an error
    let project_config = project_config_path(project_root);
    if project_config.exists() {
        layers.push(load_single_config(&project_config)?);
    }

    // 3. Try local config (optional override)
    let local_config = project_root.join(CONFIG_DIR).join("config.local.toml");
    if local_config.exists() {
        match load_single_config(&local_config) {
            Ok(cfg) => layers.push(cfg),
            Err(e) => tracing::warn!("Failed to load local config: {:#}", e),
        }
    }

    Ok(merge_layers(layers))
}

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.toml")
}

/// Load a single config file as a partial layer
fn load_single_config(path: &Path) -> Result<PartialSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: PartialSettings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

/// Apply layers in order (later overrides earlier) on top of the defaults
pub fn merge_layers(layers: Vec<PartialSettings>) -> Settings {
    let mut settings = Settings::default();

    for layer in layers {
        if let Some(append) = layer.append {
            if let Some(v) = append.insert_at_cursor {
                settings.append.insert_at_cursor = v;
            }
            if let Some(v) = append.ignore_duplicates {
                settings.append.ignore_duplicates = v;
            }
            if let Some(v) = append.ignore_comments {
                settings.append.ignore_comments = v;
            }
        }

        if let Some(file) = layer.file {
            if let Some(name) = file.name.filter(|n| !n.trim().is_empty()) {
                settings.file.name = name;
            }
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PartialAppend, PartialFile};
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config() {
        let tmp = TempDir::new().unwrap();
        let settings = load_settings_from(tmp.path()).unwrap();
        assert_eq!(settings.file.name, "CODEOWNERS");
        assert!(!settings.append.ignore_duplicates);
    }

    #[test]
    fn test_local_overrides_project() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.toml"),
            "[append]\nignoreDuplicates = true\nignoreComments = true\n",
        )
        .unwrap();
        fs::write(dir.join("config.local.toml"), "[append]\nignoreComments = false\n").unwrap();

        let settings = load_settings_from(tmp.path()).unwrap();
        assert!(settings.append.ignore_duplicates);
        assert!(!settings.append.ignore_comments);
    }

    #[test]
    fn test_broken_project_config_is_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "[append\n").unwrap();

        let err = load_settings_from(tmp.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }

    #[test]
    fn test_broken_local_config_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "[file]\nname = \"OWNERS\"\n").unwrap();
        fs::write(dir.join("config.local.toml"), "not toml at all [").unwrap();

        let settings = load_settings_from(tmp.path()).unwrap();
        assert_eq!(settings.file.name, "OWNERS");
    }

    #[test]
    fn test_merge_layers_ignores_blank_file_name() {
        let layers = vec![
            PartialSettings {
                append: Some(PartialAppend { insert_at_cursor: Some(true), ..Default::default() }),
                file: Some(PartialFile { name: Some("OWNERS".to_string()) }),
            },
            PartialSettings {
                append: None,
                file: Some(PartialFile { name: Some("  ".to_string()) }),
            },
        ];
        let settings = merge_layers(layers);
        assert!(settings.append.insert_at_cursor);
        assert_eq!(settings.file.name, "OWNERS");
    }
}
