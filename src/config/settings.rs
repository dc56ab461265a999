#![forbid(unsafe_code)]

//! Runtime configuration threaded through search and sheet management

use super::catalog::{SheetSource, default_catalog};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the storage root
pub const HOME_ENV: &str = "CRYPTIC_RESOLVER_HOME";

/// Storage root directory name under the user's home directory
pub const HOME_DIR_NAME: &str = ".cryptic-resolver";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot determine the home directory; set CRYPTIC_RESOLVER_HOME or pass --home")]
    NoHomeDirectory,

    #[error("Default sheet `{name}` has no usable directory name in {url}")]
    InvalidCatalogEntry { name: String, url: String },
}

/// Where sheets live and which sheets are built in
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage root holding one directory per sheet
    pub home: PathBuf,
    /// Default sheets, cloned on first run and listed when nothing is found
    pub catalog: Vec<SheetSource>,
    /// Directory name of the sheet searched before all others
    pub primary_sheet: String,
}

impl Config {
    /// Builds a config with the default catalog rooted at `home`
    pub fn with_home(home: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::with_catalog(home, default_catalog())
    }

    /// Builds a config whose primary sheet is the first catalog entry
    pub fn with_catalog(
        home: impl Into<PathBuf>,
        catalog: Vec<SheetSource>,
    ) -> Result<Self, ConfigError> {
        for source in &catalog {
            if source.dir_name().is_none() {
                return Err(ConfigError::InvalidCatalogEntry {
                    name: source.name.clone(),
                    url: source.url.clone(),
                });
            }
        }
        let primary_sheet = catalog
            .first()
            .and_then(SheetSource::dir_name)
            .unwrap_or_default();

        Ok(Config {
            home: home.into(),
            catalog,
            primary_sheet,
        })
    }

    /// Resolves the storage root from the command line, environment and
    /// home directory, in that order
    pub fn resolve(home_override: Option<&Path>) -> Result<Self, ConfigError> {
        let home = resolve_home(
            home_override,
            std::env::var_os(HOME_ENV),
            dirs::home_dir(),
        )?;
        tracing::debug!(home = %home.display(), "resolved storage root");
        Self::with_home(home)
    }
}

fn resolve_home(
    home_override: Option<&Path>,
    env_home: Option<OsString>,
    user_home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = home_override {
        return Ok(path.to_path_buf());
    }
    if let Some(value) = env_home.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(value));
    }
    user_home
        .map(|home| home.join(HOME_DIR_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}
