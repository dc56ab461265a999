#![forbid(unsafe_code)]

//! Sheet repository management
//!
//! Keeps the storage root populated: clones the default catalog on first
//! use, pulls updates and adds extra sheets. A failing clone or pull is
//! reported and the remaining sheets are still processed.

use super::git::{GitError, VersionControl};
use crate::config::{Config, SheetSource, sheet_dir_name};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Failed to create storage root {}: {source}", path.display())]
    CreateHome {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to list sheets in {}: {source}", path.display())]
    ListHome {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot derive a sheet name from `{0}`")]
    InvalidUrl(String),

    #[error("Failed to write progress: {0}")]
    Output(#[from] io::Error),
}

/// What a batch of clone or pull operations did
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Sheets cloned or pulled successfully
    pub succeeded: Vec<String>,
    /// Sheets whose git operation failed
    pub failed: Vec<(String, GitError)>,
    /// Sheets left alone because they already exist
    pub skipped: Vec<String>,
    /// True when the default catalog was cloned by this operation
    pub bootstrapped: bool,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn merge(&mut self, other: SyncReport) {
        self.succeeded.extend(other.succeeded);
        self.failed.extend(other.failed);
        self.skipped.extend(other.skipped);
        self.bootstrapped |= other.bootstrapped;
    }
}

/// Manages sheet directories under the storage root
pub struct SheetManager<V> {
    home: PathBuf,
    catalog: Vec<SheetSource>,
    vcs: V,
}

impl<V: VersionControl> SheetManager<V> {
    pub fn new(config: &Config, vcs: V) -> Self {
        SheetManager {
            home: config.home.clone(),
            catalog: config.catalog.clone(),
            vcs,
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Sheet directory names in directory-listing order
    ///
    /// A missing storage root has no sheets. Files and hidden entries are
    /// not sheets.
    pub fn list_sheet_names(&self) -> Result<Vec<String>, SheetError> {
        let entries = match std::fs::read_dir(&self.home) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(SheetError::ListHome {
                    path: self.home.clone(),
                    source,
                });
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SheetError::ListHome {
                path: self.home.clone(),
                source,
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str()
                && !name.starts_with('.')
            {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// Creates the storage root if it does not exist
    pub fn ensure_home(&self) -> Result<(), SheetError> {
        std::fs::create_dir_all(&self.home).map_err(|source| SheetError::CreateHome {
            path: self.home.clone(),
            source,
        })
    }

    /// Clones every default sheet when no sheet is installed
    pub fn ensure_bootstrapped<W: Write>(&self, out: &mut W) -> Result<SyncReport, SheetError> {
        self.ensure_home()?;
        if !self.list_sheet_names()?.is_empty() {
            return Ok(SyncReport::default());
        }

        writeln!(out, "cr: Adding default sheets...")?;
        let mut report = SyncReport {
            bootstrapped: true,
            ..SyncReport::default()
        };

        for source in &self.catalog {
            let Some(dir) = source.dir_name() else {
                continue;
            };
            writeln!(out, "cr: Cloning {} ({})...", source.name, source.url)?;
            match self.vcs.clone_repo(&source.url, &self.home.join(&dir)) {
                Ok(()) => report.succeeded.push(dir),
                Err(e) => {
                    tracing::warn!(sheet = dir.as_str(), error = %e, "clone failed");
                    writeln!(out, "cr: git clone failed for {}: {e}", source.name)?;
                    report.failed.push((dir, e));
                }
            }
        }

        writeln!(out, "cr: Add done")?;
        Ok(report)
    }

    /// Pulls every installed sheet, bootstrapping instead when none exist
    pub fn update_all<W: Write>(&self, out: &mut W) -> Result<SyncReport, SheetError> {
        let bootstrap = self.ensure_bootstrapped(out)?;
        if bootstrap.bootstrapped {
            return Ok(bootstrap);
        }

        writeln!(out, "cr: Updating all sheets...")?;
        let mut report = SyncReport::default();
        for sheet in self.list_sheet_names()? {
            writeln!(out, "cr: Wait to update {sheet}...")?;
            match self.vcs.pull(&self.home.join(&sheet)) {
                Ok(()) => report.succeeded.push(sheet),
                Err(e) => {
                    tracing::warn!(sheet = sheet.as_str(), error = %e, "pull failed");
                    writeln!(out, "cr: Failed to update {sheet}: {e}")?;
                    report.failed.push((sheet, e));
                }
            }
        }
        writeln!(out, "cr: Update done")?;
        Ok(report)
    }

    /// Clones one more sheet; an existing sheet is left untouched
    pub fn add<W: Write>(&self, url: &str, out: &mut W) -> Result<SyncReport, SheetError> {
        let dir = sheet_dir_name(url).ok_or_else(|| SheetError::InvalidUrl(url.to_string()))?;
        let mut report = self.ensure_bootstrapped(out)?;

        let dest = self.home.join(&dir);
        if dest.exists() {
            writeln!(out, "cr: Already added before")?;
            report.skipped.push(dir);
            return Ok(report);
        }

        let mut added = SyncReport::default();
        match self.vcs.clone_repo(url, &dest) {
            Ok(()) => {
                writeln!(out, "cr: Add new sheet done")?;
                added.succeeded.push(dir);
            }
            Err(e) => {
                writeln!(out, "cr: git clone failed for {url}: {e}")?;
                added.failed.push((dir, e));
            }
        }
        report.merge(added);
        Ok(report)
    }
}
