#![forbid(unsafe_code)]

//! `cr WORD`

use super::args::{ColorChoice, OutputFormat};
use crate::config::Config;
use crate::dictionary::SheetStore;
use crate::engine::{SearchReport, SheetSearch};
use crate::error::Result;
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::sheets::{SheetManager, VersionControl};
use crate::types::Query;
use std::io::{self, Write};

/// Looks `word` up in every installed sheet and prints the result
///
/// Default sheets are cloned first when none are installed. Clone failures
/// there are already reported and do not stop the lookup. In JSONL mode the
/// progress lines go to stderr so stdout holds only records.
pub fn run<V: VersionControl>(
    config: &Config,
    manager: &SheetManager<V>,
    word: &str,
    format: OutputFormat,
    color: ColorChoice,
) -> Result<()> {
    match format {
        OutputFormat::Human => manager.ensure_bootstrapped(&mut io::stdout().lock())?,
        OutputFormat::Jsonl => manager.ensure_bootstrapped(&mut io::stderr().lock())?,
    };

    let report = search(config, manager, word)?;
    match format {
        OutputFormat::Human => {
            HumanFormatter::new(color.resolve(), &config.catalog).write_to_stdout(&report)?;
        }
        OutputFormat::Jsonl => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(JsonlFormatter::new().format(&report).as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Searches the installed sheets without printing anything
pub fn search<V: VersionControl>(
    config: &Config,
    manager: &SheetManager<V>,
    word: &str,
) -> Result<SearchReport> {
    let query = Query::parse(word);
    let sheets = manager.list_sheet_names()?;
    tracing::info!(word = query.literal(), sheets = sheets.len(), "searching");

    let search = SheetSearch::new(SheetStore::new(&config.home), config.primary_sheet.clone());
    Ok(search.search(&query, sheets))
}
