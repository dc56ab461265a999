#![forbid(unsafe_code)]

//! Dictionary files and the entries they hold
//!
//! A dictionary is one `<bucket>.toml` file of one sheet. Every entry is
//! classified exactly once, when the file is parsed, into an [`Entry`].

use crate::types::Bucket;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or parsing a dictionary file
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A single meaning of a word
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Definition {
    #[serde(rename = "disp", default)]
    pub display_name: Option<String>,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(default)]
    pub full: Option<String>,
    #[serde(rename = "see", default)]
    pub see_also: Option<Vec<String>>,
}

/// One word's data in a dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A single `desc`-bearing definition
    Definition(Definition),
    /// Several meanings, in file order
    Meanings(Vec<(String, Definition)>),
    /// An alias of another word, possibly in another bucket
    Redirect(String),
    /// A value that fits none of the shapes above, with the reason
    Invalid(String),
}

impl Entry {
    /// Classifies a raw TOML value: `same` first, then `desc`, else meanings
    ///
    /// A badly shaped value becomes [`Entry::Invalid`] so the rest of the
    /// file stays usable.
    fn classify(value: toml::Value) -> Entry {
        let table = match value {
            toml::Value::Table(table) => table,
            other => {
                return Entry::Invalid(format!("expected a table, found {}", other.type_str()));
            }
        };

        if let Some(same) = table.get("same") {
            return match same.as_str() {
                Some(target) => Entry::Redirect(target.to_string()),
                None => Entry::Invalid("`same` must be a string".to_string()),
            };
        }

        if table.contains_key("desc") {
            return match toml::Value::Table(table).try_into::<Definition>() {
                Ok(definition) => Entry::Definition(definition),
                Err(e) => Entry::Invalid(e.to_string()),
            };
        }

        let mut meanings = Vec::with_capacity(table.len());
        for (key, value) in table {
            match value.try_into::<Definition>() {
                Ok(definition) => meanings.push((key, definition)),
                Err(e) => return Entry::Invalid(format!("meaning `{key}`: {e}")),
            }
        }
        Entry::Meanings(meanings)
    }
}

/// The parsed contents of one sheet's bucket file
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, Entry>,
}

impl Dictionary {
    /// Parses dictionary text; `path` is only used for error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, DictionaryError> {
        let table: toml::Table =
            toml::from_str(content).map_err(|source| DictionaryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let entries = table
            .into_iter()
            .map(|(word, value)| (word, Entry::classify(value)))
            .collect();
        Ok(Dictionary { entries })
    }

    /// Looks up a word; callers lower-case it first
    pub fn get(&self, word: &str) -> Option<&Entry> {
        self.entries.get(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source of dictionaries, keyed by sheet and bucket
///
/// `Ok(None)` means the sheet simply has no file for that bucket, which is
/// not an error.
pub trait DictionarySource {
    fn load(&self, sheet: &str, bucket: &Bucket) -> Result<Option<Dictionary>, DictionaryError>;
}

impl<T: DictionarySource + ?Sized> DictionarySource for &T {
    fn load(&self, sheet: &str, bucket: &Bucket) -> Result<Option<Dictionary>, DictionaryError> {
        (**self).load(sheet, bucket)
    }
}

/// Loads dictionaries from `<root>/<sheet>/<bucket>.toml`
///
/// Every call re-reads the file.
#[derive(Debug, Clone)]
pub struct SheetStore {
    root: PathBuf,
}

impl SheetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SheetStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `bucket` in `sheet`
    pub fn path_for(&self, sheet: &str, bucket: &Bucket) -> PathBuf {
        self.root.join(sheet).join(bucket.file_name())
    }
}

impl DictionarySource for SheetStore {
    fn load(&self, sheet: &str, bucket: &Bucket) -> Result<Option<Dictionary>, DictionaryError> {
        let path = self.path_for(sheet, bucket);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no dictionary file");
                return Ok(None);
            }
            Err(source) => return Err(DictionaryError::Read { path, source }),
        };

        tracing::debug!(path = %path.display(), "loading dictionary");
        Dictionary::parse(&content, &path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(content: &str) -> Dictionary {
        Dictionary::parse(content, Path::new("e.toml")).unwrap()
    }

    #[test]
    fn test_parse_definition() {
        let dict = parse(
            r#"
[emacs]
disp = "Emacs"
desc = "Editor MACroS"
full = "A feature-rich editor"
see = ["vim", "nano"]
"#,
        );

        let Some(Entry::Definition(def)) = dict.get("emacs") else {
            panic!("expected a definition");
        };
        assert_eq!(def.display_name.as_deref(), Some("Emacs"));
        assert_eq!(def.description, "Editor MACroS");
        assert_eq!(def.full.as_deref(), Some("A feature-rich editor"));
        assert_eq!(
            def.see_also.as_deref(),
            Some(&["vim".to_string(), "nano".to_string()][..])
        );
    }

    #[test]
    fn test_parse_definition_optional_fields() {
        let dict = parse("[emacs]\ndesc = \"Editor MACroS\"\n");

        let Some(Entry::Definition(def)) = dict.get("emacs") else {
            panic!("expected a definition");
        };
        assert!(def.display_name.is_none());
        assert!(def.full.is_none());
        assert!(def.see_also.is_none());
    }

    #[test]
    fn test_parse_redirect_wins_over_description() {
        let dict = parse("[gnu]\nsame = \"GNU's Not Unix\"\ndesc = \"ignored\"\n");
        assert_eq!(
            dict.get("gnu"),
            Some(&Entry::Redirect("GNU's Not Unix".to_string()))
        );
    }

    #[test]
    fn test_parse_meanings_keep_file_order() {
        let dict = parse(
            r#"
[jit.zeta]
desc = "last alphabetically, first in file"

[jit.alpha]
desc = "second"

[jit.mid]
desc = "third"
"#,
        );

        let Some(Entry::Meanings(meanings)) = dict.get("jit") else {
            panic!("expected meanings");
        };
        let keys: Vec<&str> = meanings.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_empty_entry_is_empty_meanings() {
        let dict = parse("[nothing]\n");
        assert_eq!(dict.get("nothing"), Some(&Entry::Meanings(vec![])));
    }

    fn reason(dict: &Dictionary, word: &str) -> String {
        match dict.get(word) {
            Some(Entry::Invalid(reason)) => reason.clone(),
            other => panic!("expected an invalid entry, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_non_table_entry_is_invalid() {
        let dict = parse("emacs = \"editor\"\n");
        assert_eq!(reason(&dict, "emacs"), "expected a table, found string");
    }

    #[test]
    fn test_parse_non_string_redirect_is_invalid() {
        let dict = parse("[gnu]\nsame = 1\n");
        assert!(reason(&dict, "gnu").contains("`same` must be a string"));
    }

    #[test]
    fn test_parse_meaning_without_description_is_invalid() {
        let dict = parse("[jit.a]\ndisp = \"JIT\"\n");
        assert!(reason(&dict, "jit").contains("meaning `a`"));
    }

    #[test]
    fn test_parse_invalid_entry_keeps_neighbours() {
        let dict = parse(
            r#"
[emacs]
desc = "Editor MACroS"

[eol]
disp = "EOL"
note = "no description"
"#,
        );

        assert_eq!(dict.len(), 2);
        assert!(matches!(dict.get("emacs"), Some(Entry::Definition(_))));
        assert!(reason(&dict, "eol").contains("meaning `disp`"));
    }

    #[test]
    fn test_parse_malformed_toml() {
        let err = Dictionary::parse("invalid [[ toml", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, DictionaryError::Parse { .. }));
        assert!(err.to_string().contains("x.toml"));
    }

    #[test]
    fn test_store_missing_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("cryptic_computer")).unwrap();
        let store = SheetStore::new(temp_dir.path());

        let bucket = Bucket::for_word("emacs").unwrap();
        assert!(store.load("cryptic_computer", &bucket).unwrap().is_none());
        assert!(store.load("missing_sheet", &bucket).unwrap().is_none());
    }

    #[test]
    fn test_store_loads_bucket_file() {
        let temp_dir = TempDir::new().unwrap();
        let sheet = temp_dir.path().join("cryptic_computer");
        fs::create_dir(&sheet).unwrap();
        fs::write(sheet.join("e.toml"), "[emacs]\ndesc = \"Editor MACroS\"\n").unwrap();

        let store = SheetStore::new(temp_dir.path());
        let bucket = Bucket::for_word("Emacs").unwrap();
        let dict = store.load("cryptic_computer", &bucket).unwrap().unwrap();
        assert_eq!(dict.len(), 1);
        assert!(dict.get("emacs").is_some());
    }

    #[test]
    fn test_store_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let sheet = temp_dir.path().join("broken");
        fs::create_dir(&sheet).unwrap();
        fs::write(sheet.join("e.toml"), "[emacs\n").unwrap();

        let store = SheetStore::new(temp_dir.path());
        let bucket = Bucket::for_word("emacs").unwrap();
        let err = store.load("broken", &bucket).unwrap_err();
        assert!(err.to_string().contains("e.toml"));
    }
}
