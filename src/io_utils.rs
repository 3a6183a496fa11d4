use std::fmt;
use std::io;
use std::path::Path;

use crate::SorensenError;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Format a user friendly I/O error message with suggestions.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "Check permissions or run as a different user.",
        UnexpectedEof => "File appears truncated or corrupted.",
        WriteZero => "Disk may be full. Free up space and try again.",
        Other if err.raw_os_error() == Some(28) => "Disk may be full. Free up space and try again.",
        _ => "Check permissions or free up disk space.",
    };
    format!(
        "Error {} '{}': {}. {}",
        operation,
        path.display(),
        err,
        suggestion
    )
}

/// Convert an I/O error into a CLI error with context.
pub fn io_cli_error(operation: &str, path: &Path, err: io::Error) -> CliError {
    CliError {
        msg: format_io_error(operation, path, &err),
        source: Some(Box::new(err)),
    }
}

/// Simple CLI error from string.
pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_string(),
        source: None,
    }
}

/// Convert a library error into a CLI error with a hint.
pub fn sorensen_cli_error(context: &str, err: SorensenError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for an error variant.
pub fn cli_hint(err: &SorensenError) -> String {
    use SorensenError::*;
    match err {
        Io(io) => format!("{io}"),
        Format(msg) => format!("{msg}. Verify the file is intact."),
        Length(len) => format!("bit sequence of length {len} is not byte aligned. This is a bug."),
        NotFound { .. } => format!("{err}. The descriptor is corrupt or was written by an incompatible encoder."),
        Cancelled { examined } => format!("cancelled after {examined} candidates. No output was written."),
        LimitExceeded { limit } => format!("gave up after {limit} candidates. Raise --limit to search further."),
        Resource { .. } => format!("{err}. The descriptor is corrupt or describes more data than this machine can hold."),
        Config(msg) => format!("{msg}. Invalid configuration."),
    }
}
