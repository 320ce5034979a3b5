//! Error types for godecls.
//!
//! Every error belongs to the source unit that produced it. Its `Display` form is the
//! self-contained line written to the error stream.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors recorded while processing one source unit.
#[derive(Debug, Error)]
pub enum Error {
    /// The path does not exist or cannot be stat'ed.
    #[error("stat {}: {source}", path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file or stream could not be read to completion.
    #[error("read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    /// The source text does not parse.
    #[error("{name}:{line}:{column}: {message}")]
    Syntax {
        name: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// A parsed node could not be rendered back into source text.
    #[error("{name}:{line}:{column}: internal error: cannot render {kind} ({reason})")]
    Render {
        name: String,
        line: usize,
        column: usize,
        kind: &'static str,
        reason: &'static str,
    },

    /// An output stream rejected a write.
    #[error("write: {0}")]
    Write(#[from] io::Error),
}

impl Error {
    /// Convert a walk failure from the directory walker into a path error.
    ///
    /// The error names the failing entry when the walker knows it, and `dir`
    /// otherwise.
    pub fn from_walk(dir: PathBuf, err: ignore::Error) -> Self {
        let path = walk_error_path(&err).map_or(dir, Path::to_path_buf);
        let message = err.to_string();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
        Error::Path { path, source }
    }
}

fn walk_error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        _ => None,
    }
}

/// Aggregate outcome of a run, merged from per-unit results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Success,
    Failure,
}

impl Status {
    /// Keep the worse of two outcomes.
    #[must_use]
    pub fn merge(self, other: Status) -> Status {
        match (self, other) {
            (Status::Success, Status::Success) => Status::Success,
            _ => Status::Failure,
        }
    }

    /// Process exit code: 0 when nothing failed, 2 otherwise.
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Success => 0,
            Status::Failure => 2,
        }
    }
}
