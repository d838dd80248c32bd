//! Database options loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::DatabaseConfig;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("config file does not exist: {}", .0.display())]
    MissingConfigFile(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    MalformedConfig(#[from] serde_json::Error),
}

/// Location of the database options file inside a server directory.
pub fn database_options_path(server_dir: &Path) -> PathBuf {
    server_dir.join("profiles").join("DatabaseOptions.json")
}

/// Check that the server directory and its database options file exist.
///
/// Returns the path of the options file.
pub fn validate_layout(server_dir: &Path) -> Result<PathBuf, ConfigError> {
    if !server_dir.is_dir() {
        return Err(ConfigError::MissingDirectory(server_dir.to_path_buf()));
    }

    let path = database_options_path(server_dir);
    if !path.is_file() {
        return Err(ConfigError::MissingConfigFile(path));
    }

    Ok(path)
}

/// Load the database options for a server directory.
pub fn load_database_config(server_dir: &Path) -> Result<DatabaseConfig, ConfigError> {
    let path = validate_layout(server_dir)?;
    load_database_config_at(&path)
}

/// Read and parse an options file whose location was already validated.
pub fn load_database_config_at(path: &Path) -> Result<DatabaseConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: DatabaseConfig = serde_json::from_str(&content)?;

    tracing::debug!(
        path = %path.display(),
        database_port = config.database_server_port,
        "Database options loaded"
    );

    Ok(config)
}
