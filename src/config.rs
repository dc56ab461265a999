//! Storage root resolution and the default sheet catalog

pub mod catalog;
pub mod settings;

pub use catalog::{SheetSource, default_catalog, sheet_dir_name};
pub use settings::{Config, ConfigError, HOME_DIR_NAME, HOME_ENV};
