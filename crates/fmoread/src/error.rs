use std::io;

use fmo_lexer::{Interrupted, UnknownFormat};

/// Everything that makes the CLI exit with status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{}", describe_read(.path, .source))]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormat),

    #[error("{0}")]
    Usage(String),

    #[error("tokenizing '{path}' stopped: time limit exceeded")]
    Interrupted {
        path: String,
        #[source]
        source: Interrupted,
    },

    #[error("cannot write output: {0}")]
    Write(#[from] io::Error),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Whether the usage text should follow the message.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_) | Self::UnknownFormat(_))
    }
}

fn describe_read(path: &str, err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        _ => format!("error reading '{path}': {err}"),
    }
}
