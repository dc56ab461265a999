#![forbid(unsafe_code)]

//! Search across every installed sheet
//!
//! The primary sheet is always consulted first; the remaining sheets follow
//! in directory-listing order. Each sheet contributes one [`SheetLookup`] and
//! the report is "found" when at least one sheet displayed something.

use crate::dictionary::DictionarySource;
use crate::engine::resolver::{SheetLookup, resolve_in_sheet};
use crate::types::Query;

/// Aggregated result of searching all sheets for one query
#[derive(Debug)]
pub struct SearchReport {
    pub word: String,
    /// One lookup per searched sheet, in search order
    pub lookups: Vec<SheetLookup>,
}

impl SearchReport {
    /// True when any sheet displayed an entry
    ///
    /// Warnings and unreadable files do not count as found.
    pub fn found(&self) -> bool {
        self.lookups.iter().any(SheetLookup::is_found)
    }

    pub fn sheets_searched(&self) -> usize {
        self.lookups.len()
    }

    /// Lookups that produce output, in search order
    pub fn with_output(&self) -> impl Iterator<Item = &SheetLookup> {
        self.lookups.iter().filter(|lookup| lookup.has_output())
    }
}

/// Searches sheets through a dictionary source
pub struct SheetSearch<S> {
    source: S,
    primary: String,
}

impl<S: DictionarySource> SheetSearch<S> {
    /// Creates a search that gives `primary` precedence over other sheets
    pub fn new(source: S, primary: impl Into<String>) -> Self {
        SheetSearch {
            source,
            primary: primary.into(),
        }
    }

    /// Puts the primary sheet first, keeping listing order for the rest
    ///
    /// A primary sheet that is not installed is skipped.
    pub fn order_sheets(&self, listed: Vec<String>) -> Vec<String> {
        let mut ordered = Vec::with_capacity(listed.len());
        if listed.contains(&self.primary) {
            ordered.push(self.primary.clone());
        }
        ordered.extend(listed.into_iter().filter(|sheet| *sheet != self.primary));
        ordered
    }

    /// Resolves `query` in every sheet of `listed`
    pub fn search(&self, query: &Query, listed: Vec<String>) -> SearchReport {
        let lookups = self
            .order_sheets(listed)
            .iter()
            .map(|sheet| {
                let lookup = resolve_in_sheet(&self.source, sheet, query);
                tracing::info!(
                    sheet = sheet.as_str(),
                    word = query.literal(),
                    found = lookup.is_found(),
                    redirects = lookup.redirects.len(),
                    "searched sheet"
                );
                lookup
            })
            .collect();

        SearchReport {
            word: query.literal().to_string(),
            lookups,
        }
    }
}
