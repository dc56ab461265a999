#![forbid(unsafe_code)]

//! Core value types shared by the loader, resolver and search

use std::fmt;

/// File stem shared by every word that starts with a decimal digit
pub const DIGIT_BUCKET: &str = "0123456789";

/// The single-file partition of a sheet a word lives in
///
/// Derived from the lower-cased first character of a word. Every word that
/// starts with a digit shares the [`DIGIT_BUCKET`] file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bucket(String);

impl Bucket {
    /// Computes the bucket for a word
    ///
    /// `None` for an empty word or one starting with a path separator, which
    /// no bucket file can hold.
    pub fn for_word(word: &str) -> Option<Self> {
        let first = word.chars().next()?;
        if matches!(first, '/' | '\\') {
            return None;
        }
        if first.is_ascii_digit() {
            return Some(Bucket(DIGIT_BUCKET.to_string()));
        }
        Some(Bucket(first.to_lowercase().collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the dictionary file backing this bucket, e.g. `e.toml`
    pub fn file_name(&self) -> String {
        format!("{}.toml", self.0)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A lower-cased lookup key with an optional dotted meaning qualifier
///
/// `xdg.download` splits into the word `xdg` and the meaning `download`.
/// The unsplit form is kept so keys that legitimately contain a dot
/// (`node.js`) can still be matched literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    literal: String,
    word: String,
    meaning: Option<String>,
}

impl Query {
    pub fn parse(input: &str) -> Self {
        let literal = input.trim().to_lowercase();
        let (word, meaning) = match literal.split_once('.') {
            Some((word, meaning)) if !word.is_empty() && !meaning.is_empty() => {
                (word.to_string(), Some(meaning.to_string()))
            }
            _ => (literal.clone(), None),
        };
        Query {
            literal,
            word,
            meaning,
        }
    }

    /// The whole lower-cased input, dots included
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// The part before the first dot
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The part after the first dot, if any
    pub fn meaning(&self) -> Option<&str> {
        self.meaning.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.literal.is_empty()
    }

    /// Bucket of the query; the qualifier never changes the first character
    pub fn bucket(&self) -> Option<Bucket> {
        Bucket::for_word(&self.literal)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}
