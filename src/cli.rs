//! CLI argument parsing and command dispatch

pub mod args;
pub mod lookup;
pub mod update;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};

use crate::config::Config;
use crate::error::Result;
use crate::sheets::{GitCli, SheetManager};
use clap::CommandFactory;
use std::io::{self, Write};

/// Runs one invocation of `cr`
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.home.as_deref())?;
    let manager = SheetManager::new(&config, GitCli::from_env());

    match cli.to_command() {
        Command::Help => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", Cli::command().render_help())?;
            // Help still leaves the user with usable sheets
            manager.ensure_bootstrapped(&mut stdout)?;
            Ok(())
        }
        Command::Update { url } => update::run(&manager, url.as_deref()),
        Command::Lookup { word } => lookup::run(&config, &manager, &word, cli.format, cli.color),
    }
}
