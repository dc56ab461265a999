#![forbid(unsafe_code)]

//! `cr -u [URL]`

use crate::error::{ResolverError, Result};
use crate::sheets::{SheetManager, VersionControl};
use std::io;

/// Pulls every sheet, or adds the sheet at `url`
///
/// Failed clones or pulls do not stop the batch but make the command fail.
pub fn run<V: VersionControl>(manager: &SheetManager<V>, url: Option<&str>) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let report = match url {
        Some(url) => manager.add(url, &mut stdout)?,
        None => manager.update_all(&mut stdout)?,
    };

    if report.is_success() {
        Ok(())
    } else {
        Err(ResolverError::SyncFailed {
            failed: report.failed.len(),
        })
    }
}
