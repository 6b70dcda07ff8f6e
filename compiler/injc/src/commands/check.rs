//! The `check` command: validate every configuration in a set of files.

use std::io::Write;
use std::str::FromStr;

use inj_diagnostic::emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use inj_diagnostic::Diagnostic;
use inj_types::Program;
use inj_validate::{convert_to_diagnostics, validate, ValidatorConfig};

use super::{collect_sources, CliError};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(CliError::InvalidFlag {
                flag: "--format",
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub format: OutputFormat,
    pub color: ColorMode,
    pub verbose: bool,
}

/// Split `check` arguments into options and paths. No paths means `.`.
pub fn parse_check_args(args: &[String]) -> Result<(CheckOptions, Vec<String>), CliError> {
    let mut options = CheckOptions::default();
    let mut paths = Vec::new();
    for arg in args {
        if let Some(format) = arg.strip_prefix("--format=") {
            options.format = format.parse()?;
        } else if let Some(color) = arg.strip_prefix("--color=") {
            options.color = match color {
                "auto" => ColorMode::Auto,
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                _ => {
                    return Err(CliError::InvalidFlag {
                        flag: "--color",
                        value: color.to_owned(),
                    })
                }
            };
        } else if arg == "--verbose" || arg == "-v" {
            options.verbose = true;
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownOption(arg.clone()));
        } else {
            paths.push(arg.clone());
        }
    }
    if paths.is_empty() {
        paths.push(".".to_owned());
    }
    Ok((options, paths))
}

/// Everything one check produced.
#[derive(Clone, Debug, Default)]
pub struct CheckReport {
    pub files: usize,
    /// Source problems first, then configuration errors.
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Check in-memory `(path, content)` sources.
#[tracing::instrument(level = "debug", skip_all, fields(files = sources.len()))]
pub fn check_sources(sources: Vec<(String, String)>, options: &CheckOptions) -> CheckReport {
    let files = sources.len();
    let program = Program::from_sources(sources);
    let errors = validate(
        &program,
        &ValidatorConfig {
            verbose: options.verbose,
        },
    );
    if options.verbose {
        tracing::info!(files, problems = errors.len(), "checked");
    }

    let mut diagnostics = program.diagnostics().to_vec();
    diagnostics.extend(convert_to_diagnostics(&errors, &program));
    CheckReport { files, diagnostics }
}

/// Read and check files and directories.
pub fn check_paths(paths: &[String], options: &CheckOptions) -> Result<CheckReport, CliError> {
    let sources = collect_sources(paths)?;
    tracing::debug!(files = sources.len(), "collected sources");
    Ok(check_sources(sources, options))
}

/// Write a report in the requested format.
pub fn emit_report<W: Write>(report: &CheckReport, options: &CheckOptions, writer: W, is_tty: bool) {
    match options.format {
        OutputFormat::Text => {
            let mut emitter = TerminalEmitter::with_color_mode(writer, options.color, is_tty);
            emitter.emit_all(&report.diagnostics);
            emitter.emit_summary(report.error_count(), report.warning_count());
            emitter.flush();
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(writer);
            emitter.begin();
            emitter.emit_all(&report.diagnostics);
            emitter.end();
            emitter.flush();
        }
    }
}
