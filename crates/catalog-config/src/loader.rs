//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use catalog_core::{CatalogError, CatalogResult};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable selecting the configuration environment.
pub const ENVIRONMENT_VAR: &str = "CATALOG_ENVIRONMENT";

/// Prefix for environment variable overrides (`CATALOG__DATABASE__URL`).
pub const ENV_PREFIX: &str = "CATALOG";

/// Default configuration directory.
pub const DEFAULT_CONFIG_DIR: &str = "./config";

/// Builds the application configuration once at startup.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration found in `config_dir`.
    ///
    /// Sources are layered in order:
    /// 1. `default.toml` - Default values
    /// 2. `{environment}.toml` - Environment-specific overrides
    /// 3. `local.toml` - Local overrides
    /// 4. Environment variables with `CATALOG__` prefix
    pub fn load(config_dir: impl AsRef<Path>) -> CatalogResult<AppConfig> {
        Self::load_config(config_dir.as_ref())
    }

    /// Loads configuration from the default location (`./config`).
    pub fn load_default() -> CatalogResult<AppConfig> {
        Self::load(DEFAULT_CONFIG_DIR)
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &Path) -> CatalogResult<AppConfig> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{}.toml", name));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_catalog_error)?;

        let mut app_config: AppConfig = config.try_deserialize().map_err(config_error_to_catalog_error)?;
        app_config.app.environment = environment;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| CatalogError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

fn config_error_to_catalog_error(err: ConfigError) -> CatalogError {
    CatalogError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_loads_file_layers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 9000\n\n[catalog]\nproduct_name_max_length = 64\n",
        )
        .unwrap();
        fs::write(dir.path().join("local.toml"), "[server]\nport = 9100\n").unwrap();

        let config = ConfigLoader::load(dir.path()).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.catalog.product_name_max_length, 64);
        assert_eq!(config.catalog.description_max_length, 500);
    }

    #[test]
    fn test_missing_directory_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load(dir.path().join("absent")).unwrap();
        assert_eq!(config.database.query_timeout_secs, 300);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[database]\nurl = \"mysql://nope\"\n").unwrap();

        let result = ConfigLoader::load(dir.path());
        assert!(matches!(result, Err(CatalogError::Configuration(_))));
    }
}
