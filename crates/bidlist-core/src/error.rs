//! Error taxonomy for the CSV engine
//!
//! Provides typed errors for file access, line-level parsing, and
//! out-of-range access. A search or removal miss is not an error and is
//! reported as `Option`/`bool` by the store itself.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening, reading, or writing a CSV file
#[derive(Error, Debug)]
pub enum FileError {
    /// File not found (when expected to exist)
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Document has no originating file to save back to
    #[error("Document was not loaded from a file; save it with an explicit path")]
    NoBackingFile,
}

impl FileError {
    /// Classify an I/O error from a read with path context
    pub fn reading(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FileError::NotFound { path },
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied {
                path,
                source: error,
            },
            _ => FileError::Read {
                path,
                source: error,
            },
        }
    }

    /// Classify an I/O error from a write with path context
    pub fn writing(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied {
                path,
                source: error,
            },
            _ => FileError::Write {
                path,
                source: error,
            },
        }
    }

    /// Path the error refers to, when it has one
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            FileError::NotFound { path }
            | FileError::PermissionDenied { path, .. }
            | FileError::Read { path, .. }
            | FileError::Write { path, .. } => Some(path),
            FileError::Rename { to, .. } => Some(to),
            FileError::NoBackingFile => None,
        }
    }
}

/// A malformed line, reported with its position and raw text
///
/// The only malformation the tokenizer can hit is a line that ends while
/// a quoted field is still open.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Line {line}: unterminated quoted field in '{text}'")]
pub struct ParseError {
    /// 1-based line number within the source file
    pub line: usize,
    /// The raw line as read, before tokenizing
    pub text: String,
}

/// Out-of-range row or column access
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    #[error("Row index {index} out of range (document has {len} rows)")]
    Row { index: usize, len: usize },

    #[error("Column index {index} out of range (row has {len} columns)")]
    Column { index: usize, len: usize },
}

/// Umbrella error for document operations
///
/// Callers get one error type from `CsvDocument` while still being able
/// to match each taxonomy case explicitly.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;
