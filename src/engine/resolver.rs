#![forbid(unsafe_code)]

//! Entry resolution and redirect following within one sheet
//!
//! Resolution is pure with respect to the terminal: it loads dictionaries
//! through a [`DictionarySource`] and returns a [`SheetLookup`] describing
//! what should be shown. Rendering is the job of the `output` module.

use crate::dictionary::{Definition, Dictionary, DictionaryError, DictionarySource, Entry};
use crate::types::{Bucket, Query};
use std::collections::HashSet;
use thiserror::Error;

/// Upper bound on redirects followed for a single lookup
pub const MAX_REDIRECT_HOPS: usize = 16;

/// Inconsistencies in sheet data that a sheet maintainer has to fix
///
/// These are reported to the user but never abort the search of other sheets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataWarning {
    #[error(
        "Synonym jumps to a wrong place at `{word}`. Please consider fixing this in `{file}` of the sheet `{sheet}`"
    )]
    MissingTarget {
        word: String,
        file: String,
        sheet: String,
    },

    #[error(
        "No meaning `{meaning}` under `{word}`. Please consider fixing this in `{file}` of the sheet `{sheet}`"
    )]
    MissingMeaning {
        word: String,
        meaning: String,
        file: String,
        sheet: String,
    },

    #[error(
        "Lack of everything of the given word `{word}`. Please consider fixing this in `{file}` of the sheet `{sheet}`"
    )]
    EmptyEntry {
        word: String,
        file: String,
        sheet: String,
    },

    #[error(
        "Malformed entry `{word}` ({reason}). Please consider fixing this in `{file}` of the sheet `{sheet}`"
    )]
    MalformedEntry {
        word: String,
        reason: String,
        file: String,
        sheet: String,
    },

    #[error(
        "Synonyms of `{word}` loop back on themselves. Please consider fixing this in the sheet `{sheet}`"
    )]
    RedirectCycle { word: String, sheet: String },

    #[error(
        "Synonyms of `{word}` redirect more than {limit} times. Please consider fixing this in the sheet `{sheet}`"
    )]
    TooManyRedirects {
        word: String,
        sheet: String,
        limit: usize,
    },
}

/// One followed alias, `from -> to`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectHop {
    pub from: String,
    pub to: String,
}

/// What a successful lookup shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Displayable {
    Definition(Definition),
    Meanings(Vec<(String, Definition)>),
}

/// Outcome of looking a word up in one sheet
#[derive(Debug)]
pub enum LookupOutcome {
    /// No dictionary for the bucket, or no entry for the word
    NotFound,
    Found(Displayable),
    /// The entry exists but the sheet data is broken
    Inconsistent(DataWarning),
    /// A dictionary file could not be read or parsed
    Unreadable(DictionaryError),
}

/// Result of resolving one query against one sheet
#[derive(Debug)]
pub struct SheetLookup {
    pub sheet: String,
    pub word: String,
    /// Redirects followed before reaching the outcome, in order
    pub redirects: Vec<RedirectHop>,
    pub outcome: LookupOutcome,
}

impl SheetLookup {
    fn new(sheet: &str, query: &Query) -> Self {
        SheetLookup {
            sheet: sheet.to_string(),
            word: query.literal().to_string(),
            redirects: Vec::new(),
            outcome: LookupOutcome::NotFound,
        }
    }

    fn finish(mut self, outcome: LookupOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// True when something was displayed for this sheet
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, LookupOutcome::Found(_))
    }

    /// True when this sheet contributes any output at all
    pub fn has_output(&self) -> bool {
        !matches!(self.outcome, LookupOutcome::NotFound)
    }
}

/// Finds the entry for a query: the literal key first, then `word` with
/// the dotted qualifier as a pending meaning.
fn find_entry<'d>(dict: &'d Dictionary, query: &'d Query) -> Option<(&'d Entry, Option<&'d str>)> {
    if let Some(entry) = dict.get(query.literal()) {
        return Some((entry, None));
    }
    let meaning = query.meaning()?;
    dict.get(query.word()).map(|entry| (entry, Some(meaning)))
}

/// Resolves `query` in `sheet`, following redirects across buckets
///
/// The loader is called once for the query's bucket and once more each time
/// a redirect crosses into a different bucket. Chains are bounded by
/// [`MAX_REDIRECT_HOPS`] and a visited set of (bucket, word) pairs.
pub fn resolve_in_sheet<S>(source: &S, sheet: &str, query: &Query) -> SheetLookup
where
    S: DictionarySource + ?Sized,
{
    let mut lookup = SheetLookup::new(sheet, query);

    let Some(mut bucket) = query.bucket() else {
        return lookup;
    };

    let mut dict = match source.load(sheet, &bucket) {
        Ok(Some(dict)) => dict,
        Ok(None) => return lookup,
        Err(e) => return lookup.finish(LookupOutcome::Unreadable(e)),
    };

    let (mut entry, mut meaning) = match find_entry(&dict, query) {
        Some((entry, meaning)) => (entry.clone(), meaning.map(str::to_string)),
        None => return lookup,
    };

    let mut current = query.clone();
    let mut visited: HashSet<(Bucket, String)> = HashSet::new();
    visited.insert((bucket.clone(), current.literal().to_string()));

    loop {
        let target = match entry {
            Entry::Redirect(target) => target,
            Entry::Definition(definition) => {
                let outcome = match meaning {
                    None => LookupOutcome::Found(Displayable::Definition(definition)),
                    Some(meaning) => LookupOutcome::Inconsistent(DataWarning::MissingMeaning {
                        word: current.word().to_string(),
                        meaning,
                        file: bucket.file_name(),
                        sheet: sheet.to_string(),
                    }),
                };
                return lookup.finish(outcome);
            }
            Entry::Meanings(meanings) => {
                let outcome = select_meaning(meanings, meaning, &current, &bucket, sheet);
                return lookup.finish(outcome);
            }
            Entry::Invalid(reason) => {
                return lookup.finish(LookupOutcome::Inconsistent(DataWarning::MalformedEntry {
                    word: current.word().to_string(),
                    reason,
                    file: bucket.file_name(),
                    sheet: sheet.to_string(),
                }));
            }
        };

        if lookup.redirects.len() >= MAX_REDIRECT_HOPS {
            return lookup.finish(LookupOutcome::Inconsistent(DataWarning::TooManyRedirects {
                word: query.literal().to_string(),
                sheet: sheet.to_string(),
                limit: MAX_REDIRECT_HOPS,
            }));
        }

        tracing::debug!(sheet, from = current.literal(), to = %target, "following redirect");
        lookup.redirects.push(RedirectHop {
            from: current.literal().to_string(),
            to: target.clone(),
        });

        let next = Query::parse(&target);
        let missing_target = |file: String| {
            LookupOutcome::Inconsistent(DataWarning::MissingTarget {
                word: target.clone(),
                file,
                sheet: sheet.to_string(),
            })
        };

        let Some(next_bucket) = next.bucket() else {
            return lookup.finish(missing_target(bucket.file_name()));
        };

        if !visited.insert((next_bucket.clone(), next.literal().to_string())) {
            return lookup.finish(LookupOutcome::Inconsistent(DataWarning::RedirectCycle {
                word: query.literal().to_string(),
                sheet: sheet.to_string(),
            }));
        }

        if next_bucket != bucket {
            dict = match source.load(sheet, &next_bucket) {
                Ok(Some(dict)) => dict,
                Ok(None) => return lookup.finish(missing_target(next_bucket.file_name())),
                Err(e) => return lookup.finish(LookupOutcome::Unreadable(e)),
            };
            bucket = next_bucket;
        }

        match find_entry(&dict, &next) {
            Some((next_entry, next_meaning)) => {
                entry = next_entry.clone();
                // A qualifier on the original query carries through plain aliases
                meaning = next_meaning.map(str::to_string).or(meaning);
            }
            None => return lookup.finish(missing_target(bucket.file_name())),
        }
        current = next;
    }
}

fn select_meaning(
    meanings: Vec<(String, Definition)>,
    meaning: Option<String>,
    current: &Query,
    bucket: &Bucket,
    sheet: &str,
) -> LookupOutcome {
    match meaning {
        Some(meaning) => match meanings.into_iter().find(|(key, _)| *key == meaning) {
            Some((_, definition)) => LookupOutcome::Found(Displayable::Definition(definition)),
            None => LookupOutcome::Inconsistent(DataWarning::MissingMeaning {
                word: current.word().to_string(),
                meaning,
                file: bucket.file_name(),
                sheet: sheet.to_string(),
            }),
        },
        None if meanings.is_empty() => LookupOutcome::Inconsistent(DataWarning::EmptyEntry {
            word: current.literal().to_string(),
            file: bucket.file_name(),
            sheet: sheet.to_string(),
        }),
        None => LookupOutcome::Found(Displayable::Meanings(meanings)),
    }
}
