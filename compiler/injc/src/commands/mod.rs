//! Command handlers for the `inj` CLI.
//!
//! Shared pieces (errors, reading sources) live here; each command has its
//! own submodule.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

mod check;
mod explain;

pub use check::{
    check_paths, check_sources, emit_report, parse_check_args, CheckOptions, CheckReport,
    OutputFormat,
};
pub use explain::explain_error;

/// Failures of the CLI itself, as opposed to problems in checked sources.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot find '{path}'")]
    NotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },
    #[error("error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("no .ts files found in {0}")]
    NoSources(String),
    #[error("invalid value '{value}' for {flag}")]
    InvalidFlag { flag: &'static str, value: String },
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unknown error code '{0}'")]
    UnknownCode(String),
    #[error("no documentation available for {0}")]
    NoDocs(String),
}

impl CliError {
    fn from_io(path: &str, err: io::Error) -> Self {
        let path = path.to_owned();
        match err.kind() {
            io::ErrorKind::NotFound => CliError::NotFound { path },
            io::ErrorKind::PermissionDenied => CliError::PermissionDenied { path },
            io::ErrorKind::InvalidData => CliError::InvalidUtf8 { path },
            _ => CliError::Io { path, source: err },
        }
    }
}

/// Read a source file.
pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::from_io(path, e))
}

/// `(path, content)` of every `.ts` file named by `paths`, walking
/// directories in sorted order. A file reached more than once is read once,
/// at its first occurrence. Paths use `/` separators.
pub(crate) fn collect_sources(paths: &[String]) -> Result<Vec<(String, String)>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        let before = files.len();
        collect_path(Path::new(path), &mut files)?;
        if files.len() == before && Path::new(path).is_dir() {
            return Err(CliError::NoSources(path.clone()));
        }
    }
    let mut seen: HashSet<PathBuf> = HashSet::new();
    files.retain(|path| {
        let key = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));
        seen.insert(key)
    });
    files
        .into_iter()
        .map(|path| {
            let content = read_file(&path)?;
            Ok((path, content))
        })
        .collect()
}

fn collect_path(path: &Path, files: &mut Vec<String>) -> Result<(), CliError> {
    let display = path.to_string_lossy().replace('\\', "/");
    let metadata = std::fs::metadata(path).map_err(|e| CliError::from_io(&display, e))?;
    if metadata.is_file() {
        files.push(display);
        return Ok(());
    }

    let mut entries: Vec<_> = std::fs::read_dir(path)
        .map_err(|e| CliError::from_io(&display, e))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect();
    entries.sort();
    for entry in entries {
        let name = entry
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.starts_with('.') || name == "node_modules" {
            continue;
        }
        if entry.is_dir() {
            collect_path(&entry, files)?;
        } else if is_source(&name) {
            files.push(entry.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(())
}

fn is_source(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ts"))
        && !name.ends_with(".d.ts")
}

#[cfg(test)]
mod tests;
