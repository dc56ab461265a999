#![forbid(unsafe_code)]

//! The built-in catalog of sheets cloned on first run

/// A sheet that can be cloned from a remote repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSource {
    /// Short name shown to users, e.g. `computer`
    pub name: String,
    pub url: String,
}

impl SheetSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        SheetSource {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Local directory the sheet is cloned into, e.g. `cryptic_computer`
    pub fn dir_name(&self) -> Option<String> {
        sheet_dir_name(&self.url)
    }
}

const DEFAULT_SHEETS: [(&str, &str); 5] = [
    (
        "computer",
        "https://github.com/cryptic-resolver/cryptic_computer.git",
    ),
    (
        "common",
        "https://github.com/cryptic-resolver/cryptic_common.git",
    ),
    (
        "science",
        "https://github.com/cryptic-resolver/cryptic_science.git",
    ),
    (
        "economy",
        "https://github.com/cryptic-resolver/cryptic_economy.git",
    ),
    (
        "medicine",
        "https://github.com/cryptic-resolver/cryptic_medicine.git",
    ),
];

/// The default sheets, primary sheet first
pub fn default_catalog() -> Vec<SheetSource> {
    DEFAULT_SHEETS
        .iter()
        .map(|(name, url)| SheetSource::new(*name, *url))
        .collect()
}

/// Directory name `git clone` would pick for a repository URL
///
/// Takes the last path segment and strips a trailing `.git`. Works for
/// `https://host/org/repo.git`, `git@host:org/repo.git` and local paths.
pub fn sheet_dir_name(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let segment = trimmed.rsplit(['/', ':', '\\']).next()?;
    let name = segment.strip_suffix(".git").unwrap_or(segment);
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}
