#![forbid(unsafe_code)]

//! Human-readable output formatter with colorization support

use crate::config::SheetSource;
use crate::dictionary::Definition;
use crate::engine::{Displayable, LookupOutcome, SearchReport, SheetLookup};
use std::io::{self, Write};
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Human-readable output formatter
///
/// Renders a search report the way the terminal shows it: a `From:` header
/// per sheet, followed redirects, definitions and an `OR` line between
/// meanings. When nothing is found anywhere, the default sheet catalog is
/// listed instead.
pub struct HumanFormatter<'a> {
    color_choice: ColorChoice,
    catalog: &'a [SheetSource],
}

impl<'a> HumanFormatter<'a> {
    /// Creates a new HumanFormatter with the specified color choice
    pub fn new(color_choice: ColorChoice, catalog: &'a [SheetSource]) -> Self {
        HumanFormatter {
            color_choice,
            catalog,
        }
    }

    /// Format the report as plain text without any ANSI codes
    pub fn format(&self, report: &SearchReport) -> String {
        let mut buffer = Buffer::no_color();
        let _ = self.write_report(&mut buffer, report);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    /// Write the report to stdout with colors
    pub fn write_to_stdout(&self, report: &SearchReport) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color_choice);
        self.write_report(&mut stdout, report)?;
        stdout.flush()
    }

    /// Write the report to any color-capable writer
    pub fn write_report<W: WriteColor>(&self, out: &mut W, report: &SearchReport) -> io::Result<()> {
        for lookup in report.with_output() {
            self.write_lookup(out, lookup)?;
        }

        if !report.found() {
            self.write_not_found(out)?;
        }
        Ok(())
    }

    fn write_lookup<W: WriteColor>(&self, out: &mut W, lookup: &SheetLookup) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "From: {}", lookup.sheet)?;
        out.reset()?;
        writeln!(out)?;

        for hop in &lookup.redirects {
            write_emphasis(out, &hop.from)?;
            write!(out, " redirects to ")?;
            write_emphasis(out, &hop.to)?;
            writeln!(out)?;
        }

        match &lookup.outcome {
            LookupOutcome::NotFound => {}
            LookupOutcome::Found(Displayable::Definition(definition)) => {
                write_definition(out, definition)?;
            }
            LookupOutcome::Found(Displayable::Meanings(meanings)) => {
                for (i, (_, definition)) in meanings.iter().enumerate() {
                    write_definition(out, definition)?;
                    // last meaning gets no separator
                    if i + 1 < meanings.len() {
                        write_emphasis(out, "OR")?;
                        writeln!(out)?;
                    }
                }
            }
            LookupOutcome::Inconsistent(warning) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                write!(out, "WARN: {warning}")?;
                out.reset()?;
                writeln!(out)?;
                writeln!(out)?;
            }
            LookupOutcome::Unreadable(error) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                write!(out, "ERROR: {error}")?;
                out.reset()?;
                writeln!(out)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn write_not_found<W: WriteColor>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "cr: Not found anything.")?;
        writeln!(out)?;
        writeln!(out, "You may use `cr -u` to update the sheets.")?;
        writeln!(out, "Or you could contribute to our sheets: Thanks!")?;
        writeln!(out)?;
        for (i, source) in self.catalog.iter().enumerate() {
            let label = format!("{}:", source.name);
            writeln!(out, "    {}. {:<12}{}", i + 1, label, source.url)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

fn write_emphasis<W: WriteColor>(out: &mut W, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
    write!(out, "{text}")?;
    out.reset()
}

fn write_definition<W: WriteColor>(out: &mut W, definition: &Definition) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "  ")?;
    match &definition.display_name {
        Some(name) => write!(out, "{name}")?,
        None => {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(out, "No name!")?;
            out.reset()?;
        }
    }
    writeln!(out, ": {}", definition.description)?;

    if let Some(full) = &definition.full {
        writeln!(out)?;
        writeln!(out, "  {}", full.trim_end())?;
    }

    if let Some(see_also) = definition.see_also.as_ref().filter(|s| !s.is_empty()) {
        writeln!(out)?;
        write!(out, "  ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "SEE ALSO")?;
        out.reset()?;
        for term in see_also {
            write!(out, " ")?;
            out.set_color(ColorSpec::new().set_underline(true))?;
            write!(out, "{term}")?;
            out.reset()?;
            write!(out, " ")?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    Ok(())
}
