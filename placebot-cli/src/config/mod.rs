//! Configuration loading for the placebot CLI.
//!
//! Settings come from a TOML file (`settings/config.toml` by default). The
//! API credential is never part of the file; it is read from
//! `OPENAI_API_KEY`, which may also be set in a `.env` file.

mod schema;

pub use schema::AppConfig;

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "settings/config.toml";

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Dotenv file read at startup, relative to the working directory.
pub const DOTENV_PATH: &str = ".env";

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// TOML parsing error.
    #[error("invalid config {path}: {source}")]
    TomlParse {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },
    /// The credential environment variable is unset or empty.
    #[error("missing credential: set OPENAI_API_KEY")]
    MissingCredential,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load configuration from a specific path.
pub async fn load_config_from(path: &Path) -> ConfigResult<AppConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Load `KEY=value` pairs from a dotenv file into the process environment.
///
/// Variables already set in the environment keep their value. A missing
/// file is not an error.
pub fn load_dotenv(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => debug!(path = %path.display(), "loaded dotenv file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(path = %path.display(), error = %e, "ignoring unreadable dotenv file"),
    }
}

/// Read the API credential from the environment.
pub fn api_key_from_env() -> ConfigResult<String> {
    api_key_from(std::env::var(API_KEY_VAR).ok())
}

fn api_key_from(value: Option<String>) -> ConfigResult<String> {
    value
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingCredential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    #[tokio::test]
    async fn test_load_config_from_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("config.toml");
        file.write_str("[openai]\nmodel = \"gpt-4o-mini\"\nmax_tokens = 1024\n")
            .unwrap();

        let config = load_config_from(file.path()).await.unwrap();
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.openai.max_tokens, 1024);
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config_from(&temp.path().join("absent.toml"))
            .await
            .unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[tokio::test]
    async fn test_invalid_toml_is_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("config.toml");
        file.write_str("[openai\nmodel = ").unwrap();

        let err = load_config_from(file.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
    }

    #[tokio::test]
    async fn test_shipped_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../settings/config.toml");
        let config = load_config_from(&path).await.unwrap();
        assert!(!config.openai.model.is_empty());
    }

    #[test]
    fn test_dotenv_does_not_override_environment() {
        let original_path = std::env::var("PATH").unwrap();
        let temp = TempDir::new().unwrap();
        let file = temp.child(".env");
        file.write_str("PATH=/from/dotenv\nPLACEBOT_DOTENV_MARKER=loaded\n")
            .unwrap();

        load_dotenv(file.path());

        assert_eq!(std::env::var("PATH").unwrap(), original_path);
        assert_eq!(std::env::var("PLACEBOT_DOTENV_MARKER").unwrap(), "loaded");
    }

    #[test]
    fn test_missing_dotenv_is_ignored() {
        let temp = TempDir::new().unwrap();
        load_dotenv(&temp.path().join(".env"));
        assert!(std::env::var_os("PLACEBOT_MISSING_DOTENV").is_none());
    }

    #[test]
    fn test_credential_required() {
        assert!(matches!(
            api_key_from(None),
            Err(ConfigError::MissingCredential)
        ));
        assert!(api_key_from(Some("  ".to_owned())).is_err());
        assert_eq!(api_key_from(Some("sk-test".to_owned())).unwrap(), "sk-test");
    }

    #[test]
    fn test_credential_error_does_not_echo_value() {
        let message = ConfigError::MissingCredential.to_string();
        assert_eq!(message, "missing credential: set OPENAI_API_KEY");
    }
}
