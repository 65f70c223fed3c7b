//! Viewer session: language and selection carried across evaluation cycles.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use mak_filter::{Evaluation, FilterEngine, Outcome};
use mak_ingest::{RowSource, SourceError};
use mak_model::{Choice, Dimension, LabelMap, Language, Selection};
use mak_output::{ExportFormat, export_to_path};
use tracing::{error, info_span};

use crate::render::{render_cycle, render_help};

/// Result of one fetch → reconcile → filter cycle.
#[derive(Debug)]
pub enum Cycle {
    /// The Row Source failed; filters and results are not shown.
    Failed(SourceError),
    /// The source returned no rows.
    NoData,
    Ready(View),
}

/// Everything needed to draw the filters and the result table.
#[derive(Debug, Clone)]
pub struct View {
    pub language: Language,
    pub labels: LabelMap,
    pub evaluation: Evaluation,
}

/// Explicit UI state. Each cycle reads it and writes back the reconciled
/// selection.
pub struct Session<S> {
    source: S,
    engine: FilterEngine,
    title: String,
    language: Language,
    selection: Selection,
}

impl<S: RowSource> Session<S> {
    pub fn new(source: S, engine: FilterEngine, language: Language, title: impl Into<String>) -> Self {
        Self {
            source,
            engine,
            title: title.into(),
            language,
            selection: Selection::all(),
        }
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set(&mut self, dimension: Dimension, choice: Choice) {
        self.selection.set(dimension, choice);
    }

    pub fn clear(&mut self, dimension: Dimension) {
        self.selection.clear(dimension);
    }

    /// Clear every filter. The language stays as it is.
    pub fn reset(&mut self) {
        self.selection.reset();
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Run one evaluation cycle and keep the reconciled selection.
    pub fn cycle(&mut self) -> Cycle {
        let span = info_span!("cycle", language = %self.language);
        let _guard = span.enter();
        let catalog = match self.source.fetch(self.language) {
            Ok(catalog) => catalog,
            Err(source_error) => {
                error!(error = %source_error, "data source failed");
                return Cycle::Failed(source_error);
            }
        };
        match self.engine.evaluate(&catalog.rows, &self.selection) {
            Outcome::NoData => Cycle::NoData,
            Outcome::Ready(evaluation) => {
                self.selection = evaluation.selection.clone();
                Cycle::Ready(View {
                    language: catalog.language,
                    labels: catalog.labels,
                    evaluation,
                })
            }
        }
    }

    /// Run a cycle and write its filtered rows to `path`.
    pub fn export(&mut self, format: ExportFormat, path: &Path) -> Result<usize> {
        match self.cycle() {
            Cycle::Failed(source_error) => Err(source_error).context("fetch catalogue"),
            Cycle::NoData => bail!("no data to export"),
            Cycle::Ready(view) => export_to_path(
                format,
                path,
                &view.evaluation.rows,
                &view.labels,
                &self.title,
            )
            .with_context(|| format!("export {}", path.display())),
        }
    }
}

/// A line typed into the interactive browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Set(Dimension, Choice),
    Clear(Dimension),
    Reset,
    Language(Language),
    Show,
    Export(ExportFormat, PathBuf),
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));
        let command = match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let Some((dimension, value)) = rest.split_once(char::is_whitespace) else {
                    bail!("usage: set <dimension> <value>");
                };
                SessionCommand::Set(dimension.parse()?, Choice::parse(value))
            }
            "clear" => SessionCommand::Clear(rest.parse()?),
            "reset" => SessionCommand::Reset,
            "lang" | "language" => SessionCommand::Language(rest.parse()?),
            "show" | "" => SessionCommand::Show,
            "export" => {
                let Some((format, path)) = rest.split_once(char::is_whitespace) else {
                    bail!("usage: export <csv|pdf> <path>");
                };
                let format = match format.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "pdf" => ExportFormat::Pdf,
                    other => bail!("unknown export format: {other}"),
                };
                SessionCommand::Export(format, PathBuf::from(path.trim()))
            }
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            other => bail!("unknown command: {other} (type 'help')"),
        };
        Ok(command)
    }
}

/// Read commands until `quit` or end of input, printing a fresh view after
/// every state change.
pub fn run_browser<S, R, W>(session: &mut Session<S>, input: R, output: &mut W) -> Result<()>
where
    S: RowSource,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", render_cycle(&session.cycle()))?;
    write!(output, "> ")?;
    output.flush()?;
    for line in input.lines() {
        let line = line.context("read command")?;
        match SessionCommand::parse(&line) {
            Ok(SessionCommand::Quit) => break,
            Ok(SessionCommand::Help) => writeln!(output, "{}", render_help())?,
            Ok(SessionCommand::Export(format, path)) => match session.export(format, &path) {
                Ok(bytes) => writeln!(output, "Wrote {} ({bytes} bytes)", path.display())?,
                Err(export_error) => writeln!(output, "error: {export_error:#}")?,
            },
            Ok(command) => {
                match command {
                    SessionCommand::Set(dimension, choice) => session.set(dimension, choice),
                    SessionCommand::Clear(dimension) => session.clear(dimension),
                    SessionCommand::Reset => session.reset(),
                    SessionCommand::Language(language) => session.set_language(language),
                    _ => {}
                }
                writeln!(output, "{}", render_cycle(&session.cycle()))?;
            }
            Err(parse_error) => writeln!(output, "error: {parse_error}")?,
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_set_with_spaces_in_value() {
        let command = SessionCommand::parse("set operation Attach sleeve").expect("parse");
        assert_eq!(
            command,
            SessionCommand::Set(
                Dimension::Operation,
                Choice::Value("Attach sleeve".to_string())
            )
        );
    }

    #[test]
    fn set_to_all_clears() {
        let command = SessionCommand::parse("SET garment All").expect("parse");
        assert_eq!(command, SessionCommand::Set(Dimension::Garment, Choice::All));
    }

    #[test]
    fn parses_export_and_language() {
        assert_eq!(
            SessionCommand::parse("export pdf out/catalogue.pdf").expect("parse"),
            SessionCommand::Export(ExportFormat::Pdf, PathBuf::from("out/catalogue.pdf"))
        );
        assert_eq!(
            SessionCommand::parse("lang es").expect("parse"),
            SessionCommand::Language(Language::Spanish)
        );
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(SessionCommand::parse("set colour red").is_err());
        assert!(SessionCommand::parse("export xls out.xls").is_err());
        assert!(SessionCommand::parse("dance").is_err());
        assert!(SessionCommand::parse("set garment").is_err());
    }

    #[test]
    fn blank_line_shows() {
        assert_eq!(SessionCommand::parse("   ").expect("parse"), SessionCommand::Show);
    }
}
