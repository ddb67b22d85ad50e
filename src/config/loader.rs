use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Config files picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["apiprof.toml", "apiprof.json"];

/// Serialization format of a config file, chosen by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub(crate) fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(ext) => Err(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }),
            None => Err(ConfigError::MissingExtension),
        }
    }

    fn parse(self, path: &Path, content: &str) -> Result<ConfigFile, ConfigError> {
        let path = path.to_path_buf();
        match self {
            Self::Toml => {
                toml::from_str(content).map_err(|source| ConfigError::ParseToml { path, source })
            }
            Self::Json => serde_json::from_str(content)
                .map_err(|source| ConfigError::ParseJson { path, source }),
        }
    }
}

/// First default config file present in the working directory.
pub(crate) fn default_config_path() -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Loads the config named by `--config`, else the first default file found.
///
/// # Errors
///
/// Returns an error when the chosen file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let chosen = path.map(PathBuf::from).or_else(default_config_path);
    chosen.map(|path| load_config_file(&path)).transpose()
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let format = ConfigFormat::from_path(path).map_err(AppError::config)?;
    let content = std::fs::read_to_string(path).map_err(|source| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })
    })?;
    format.parse(path, &content).map_err(AppError::config)
}
