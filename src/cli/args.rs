#![forbid(unsafe_code)]

//! Command line arguments

use clap::{ArgAction, Parser, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// cr: Cryptic Resolver
///
/// Explains cryptic commands and acronyms using dictionary sheets cloned
/// under the storage root.
#[derive(Debug, Parser)]
#[command(
    name = "cr",
    version,
    about = "Explain cryptic commands and acronyms",
    after_help = "Examples:\n  cr emacs           => Edit macros: a feature-rich editor\n  cr xdg.download    => one meaning of a multi-meaning word\n  cr -u              => update all sheets\n  cr -u URL          => add a sheet from a git repository"
)]
pub struct Cli {
    /// Word or acronym to look up; `word.meaning` selects one meaning
    #[arg(value_name = "WORD")]
    pub word: Option<String>,

    /// Update all sheets, or add the sheet cloned from URL
    #[arg(
        short = 'u',
        long = "update",
        value_name = "URL",
        num_args = 0..=1,
        conflicts_with = "word"
    )]
    pub update: Option<Option<String>>,

    /// Storage root holding the sheets [env: CRYPTIC_RESOLVER_HOME]
    #[arg(long, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Output format for lookups
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Log diagnostics to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// No word and no flag: show help and make sure sheets exist
    Help,
    /// Pull every sheet, or clone a new one when a URL is given
    Update { url: Option<String> },
    Lookup { word: String },
}

impl Cli {
    pub fn to_command(&self) -> Command {
        if let Some(url) = &self.update {
            return Command::Update { url: url.clone() };
        }
        match &self.word {
            Some(word) => Command::Lookup { word: word.clone() },
            None => Command::Help,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolves `auto` against `NO_COLOR` and whether stdout is a terminal
    pub fn resolve(self) -> termcolor::ColorChoice {
        match self {
            ColorChoice::Always => termcolor::ColorChoice::Always,
            ColorChoice::Never => termcolor::ColorChoice::Never,
            ColorChoice::Auto => {
                if std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
                    termcolor::ColorChoice::Never
                } else {
                    termcolor::ColorChoice::Auto
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Jsonl,
}
