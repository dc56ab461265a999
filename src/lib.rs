#![forbid(unsafe_code)]

//! Cryptic Resolver: explain cryptic commands and acronyms
//!
//! Definitions live in "sheets", git repositories of TOML dictionaries
//! cloned under a local storage root. A lookup searches every sheet, the
//! primary sheet first, and follows synonym redirects between entries.

pub mod cli;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod output;
pub mod sheets;
pub mod types;

pub use cli::run;
pub use error::{ResolverError, Result};
