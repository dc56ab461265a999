//! Local sheet repositories: listing, bootstrap, clone and pull

pub mod git;
pub mod manager;

pub use git::{GIT_ENV, GitCli, GitError, VersionControl};
pub use manager::{SheetError, SheetManager, SyncReport};
