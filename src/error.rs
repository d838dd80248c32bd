//! Bootstrap error taxonomy.
//!
//! Every fatal startup condition maps onto one variant here, and every
//! variant terminates the process with the same exit code.

use std::path::PathBuf;

use crate::config::loader::ConfigError;
use crate::services::ServiceError;

/// Exit code used for every fatal startup failure.
pub const FATAL_EXIT_CODE: u8 = 255;

/// Fatal errors raised while driving the startup sequence.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Process arguments could not be parsed.
    #[error("invalid arguments: {0}")]
    Configuration(String),

    /// The game-server directory does not exist.
    #[error("server directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// `profiles/DatabaseOptions.json` is absent.
    #[error("'DatabaseOptions.json' file does not exist: {}", .0.display())]
    MissingConfigFile(PathBuf),

    /// The database options file exists but could not be read or parsed.
    #[error("malformed database options: {0}")]
    MalformedConfig(String),

    /// The access gate denied startup or could not be reached.
    #[error("access check failed: {0}")]
    AccessDenied(String),

    /// A network service could not bind its listener.
    #[error("service failed to start: {0}")]
    ServiceBind(#[from] ServiceError),
}

impl BootstrapError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        FATAL_EXIT_CODE
    }

    /// Operator-facing message logged once before exiting.
    pub fn fatal_message(&self) -> String {
        match self {
            BootstrapError::Configuration(e) => format!("Invalid command line: {}", e),
            BootstrapError::MissingDirectory(_) => {
                "DayZ Server directory not exists (Please check 'serverdir' argument).".to_string()
            }
            BootstrapError::MissingConfigFile(_) => "'DatabaseOptions.json' file not exists.".to_string(),
            BootstrapError::MalformedConfig(e) => format!("'DatabaseOptions.json' is malformed: {}", e),
            BootstrapError::AccessDenied(_) => {
                "Failed to communicate with master server. Please check internet connection and try again later..."
                    .to_string()
            }
            BootstrapError::ServiceBind(e) => format!("Failed to start service: {}", e),
        }
    }

    /// Emit the single fatal log line for this failure.
    pub fn log_fatal(&self) {
        tracing::error!(fatal = true, error = %self, "{}", self.fatal_message());
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingDirectory(path) => BootstrapError::MissingDirectory(path),
            ConfigError::MissingConfigFile(path) => BootstrapError::MissingConfigFile(path),
            other => BootstrapError::MalformedConfig(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_exits_with_255() {
        let errors = vec![
            BootstrapError::Configuration("bad".into()),
            BootstrapError::MissingDirectory(PathBuf::from("/nope")),
            BootstrapError::MissingConfigFile(PathBuf::from("/nope/profiles/DatabaseOptions.json")),
            BootstrapError::MalformedConfig("eof".into()),
            BootstrapError::AccessDenied("Denied".into()),
            BootstrapError::ServiceBind(ServiceError::AlreadyStarted("data-api")),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 255, "{:?}", err);
            assert!(!err.fatal_message().is_empty());
        }
    }

    #[test]
    fn test_config_error_mapping() {
        let err: BootstrapError = ConfigError::MissingDirectory(PathBuf::from("/x")).into();
        assert!(matches!(err, BootstrapError::MissingDirectory(_)));

        let err: BootstrapError = ConfigError::MissingConfigFile(PathBuf::from("/x")).into();
        assert!(matches!(err, BootstrapError::MissingConfigFile(_)));
    }
}
