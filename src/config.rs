use crate::domain::error::{DomainError, DomainResult};
use crate::domain::flatten::{DEFAULT_PATH_SEPARATOR, DEFAULT_ROOT_FOLDERS};
use crate::domain::repositories::store::DEFAULT_PARENT_ID;
use crate::domain::view_state::SortKey;
use crate::util::validation::DEFAULT_MAX_TITLE_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace, warn};

pub const ENV_STORE_PATH: &str = "BOOKMARKX_STORE_PATH";
pub const ENV_DEFAULT_SORT: &str = "BOOKMARKX_DEFAULT_SORT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the JSON bookmark snapshot
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Folder titles that do not show up in folder paths
    #[serde(default = "default_root_folders")]
    pub root_folders: Vec<String>,

    #[serde(default = "default_path_separator")]
    pub path_separator: String,

    /// Sort order the list starts with (default: dateDesc)
    #[serde(default)]
    pub default_sort: SortKey,

    /// Folder new bookmarks are created in when no parent is given
    #[serde(default = "default_parent_id")]
    pub default_parent_id: String,

    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
}

fn default_store_path() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/bookmarkx/bookmarks.json")
        .to_string_lossy()
        .to_string()
}

fn default_root_folders() -> Vec<String> {
    DEFAULT_ROOT_FOLDERS.iter().map(ToString::to_string).collect()
}

fn default_path_separator() -> String {
    DEFAULT_PATH_SEPARATOR.to_string()
}

fn default_parent_id() -> String {
    DEFAULT_PARENT_ID.to_string()
}

fn default_max_title_length() -> usize {
    DEFAULT_MAX_TITLE_LENGTH
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            root_folders: default_root_folders(),
            path_separator: default_path_separator(),
            default_sort: SortKey::default(),
            default_parent_id: default_parent_id(),
            max_title_length: default_max_title_length(),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config/bookmarkx/config.toml"))
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let config_text = std::fs::read_to_string(path).map_err(|e| {
        DomainError::Other(format!("Cannot read config file {}: {}", path.display(), e))
    })?;
    toml::from_str::<Settings>(&config_text).map_err(|e| {
        DomainError::DeserializationError(format!(
            "Invalid config file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Load settings: defaults, then the config file, then environment variables.
///
/// An explicitly given `config_file` must exist and parse. The default location
/// `~/.config/bookmarkx/config.toml` is used only if present; a broken default file is
/// reported and ignored.
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_file {
        Some(path) => {
            debug!("Loading config from: {:?}", path);
            read_config_file(path)?
        }
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => read_config_file(&path).unwrap_or_else(|e| {
                warn!("Ignoring config file: {}", e);
                Settings::default()
            }),
            None => Settings::default(),
        },
    };

    // Override with environment variables
    if let Ok(store_path) = std::env::var(ENV_STORE_PATH) {
        trace!("Using {} from environment: {}", ENV_STORE_PATH, store_path);
        settings.store_path = store_path;
    }

    if let Ok(sort) = std::env::var(ENV_DEFAULT_SORT) {
        trace!("Using {} from environment: {}", ENV_DEFAULT_SORT, sort);
        settings.default_sort = sort.parse()?;
    }

    settings.store_path = shellexpand::tilde(&settings.store_path).to_string();

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
