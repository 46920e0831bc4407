#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

/// Loads the settings file if one is given, otherwise the defaults, and validates the result.
pub fn load_settings(path: Option<&Path>) -> Result<TomlConfig> {
    let config = match path {
        Some(path) => {
            tracing::debug!("Loading settings from {}", path.display());
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = load_settings(None).unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_settings(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, crate::utils::error::ResumeError::IoError(_)));
    }
}
