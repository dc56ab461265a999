#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in search order:
//! 1. One record per sheet that produced output (`entry`, `warning` or `error`)
//! 2. One status record

use crate::dictionary::Definition;
use crate::engine::{Displayable, LookupOutcome, RedirectHop, SearchReport, SheetLookup};
use serde::Serialize;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format the search report as JSONL
    pub fn format(&self, report: &SearchReport) -> String {
        let mut output = String::new();

        for lookup in report.with_output() {
            let line = match &lookup.outcome {
                LookupOutcome::NotFound => continue,
                LookupOutcome::Found(displayable) => {
                    serde_json::to_string(&EntryRecord::new(lookup, displayable))
                }
                LookupOutcome::Inconsistent(warning) => serde_json::to_string(
                    &MessageRecord::new("warning", lookup, warning.to_string()),
                ),
                LookupOutcome::Unreadable(error) => serde_json::to_string(&MessageRecord::new(
                    "error",
                    lookup,
                    error.to_string(),
                )),
            };
            if let Ok(json) = line {
                output.push_str(&json);
                output.push('\n');
            }
        }

        let status = StatusRecord {
            record_type: "status".to_string(),
            word: report.word.clone(),
            found: report.found(),
            sheets_searched: report.sheets_searched() as u64,
        };
        if let Ok(json) = serde_json::to_string(&status) {
            output.push_str(&json);
            output.push('\n');
        }

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct RedirectRecord {
    from: String,
    to: String,
}

impl From<&RedirectHop> for RedirectRecord {
    fn from(hop: &RedirectHop) -> Self {
        RedirectRecord {
            from: hop.from.clone(),
            to: hop.to.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MeaningRecord {
    key: Option<String>,
    display_name: Option<String>,
    description: String,
    full: Option<String>,
    see_also: Vec<String>,
}

impl MeaningRecord {
    fn new(key: Option<&str>, definition: &Definition) -> Self {
        MeaningRecord {
            key: key.map(str::to_string),
            display_name: definition.display_name.clone(),
            description: definition.description.clone(),
            full: definition.full.clone(),
            see_also: definition.see_also.clone().unwrap_or_default(),
        }
    }
}

/// Entry record for JSONL output
#[derive(Debug, Serialize)]
struct EntryRecord {
    #[serde(rename = "type")]
    record_type: String,
    sheet: String,
    word: String,
    redirects: Vec<RedirectRecord>,
    meanings: Vec<MeaningRecord>,
}

impl EntryRecord {
    fn new(lookup: &SheetLookup, displayable: &Displayable) -> Self {
        let meanings = match displayable {
            Displayable::Definition(definition) => vec![MeaningRecord::new(None, definition)],
            Displayable::Meanings(meanings) => meanings
                .iter()
                .map(|(key, definition)| MeaningRecord::new(Some(key), definition))
                .collect(),
        };
        EntryRecord {
            record_type: "entry".to_string(),
            sheet: lookup.sheet.clone(),
            word: lookup.word.clone(),
            redirects: lookup.redirects.iter().map(RedirectRecord::from).collect(),
            meanings,
        }
    }
}

/// Warning or error record for JSONL output
#[derive(Debug, Serialize)]
struct MessageRecord {
    #[serde(rename = "type")]
    record_type: String,
    sheet: String,
    word: String,
    redirects: Vec<RedirectRecord>,
    message: String,
}

impl MessageRecord {
    fn new(record_type: &str, lookup: &SheetLookup, message: String) -> Self {
        MessageRecord {
            record_type: record_type.to_string(),
            sheet: lookup.sheet.clone(),
            word: lookup.word.clone(),
            redirects: lookup.redirects.iter().map(RedirectRecord::from).collect(),
            message,
        }
    }
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: String,
    word: String,
    found: bool,
    sheets_searched: u64,
}
