//! Error taxonomy for a run.
//!
//! Every variant here is fatal: it bubbles to the top of the run and stops
//! further writes. Recoverable conditions (a template placeholder that cannot
//! be named, a key collision) never become an `Error`; the node is left as-is
//! and a `tracing` warning is emitted instead.

use std::path::{Path, PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required configuration is missing or invalid, or an entry path does not exist.
    #[error("configuration error: {0}")]
    Config(String),

    /// A source file is not valid for its dialect.
    #[error("failed to parse {}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// Rewritten output no longer parses in the file's dialect.
    #[error("failed to format {}: {message}", path.display())]
    Format { path: PathBuf, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The operating system random source could not be read.
    #[error("failed to read random bytes: {0}")]
    Entropy(#[from] getrandom::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
