//! Delimited document model
//!
//! `CsvDocument` owns the parsed header and data rows of one delimited
//! file and can mutate and re-serialize that data. Loading is
//! all-or-nothing: a malformed line fails the whole load and no document
//! value is produced, so a caller can never observe a half-parsed model.
//!
//! Saving uses atomic writes (write to temp file, then rename) so the
//! original file is untouched when a save fails partway.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DocumentResult, FileError, IndexError};
use crate::tokenizer::tokenize;

/// Reported when an appended row does not match the header width.
///
/// The row is stored exactly as given; the mismatch is surfaced so the
/// caller can warn instead of the table silently padding or truncating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMismatch {
    /// Header width
    pub expected: usize,
    /// Width of the appended row
    pub found: usize,
}

/// In-memory table of one delimited file: a header row plus data rows
#[derive(Debug, Clone, PartialEq)]
pub struct CsvDocument {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    delimiter: char,
    /// Path the document was loaded from, used by `save_in_place`
    path: Option<PathBuf>,
}

impl CsvDocument {
    /// Create an empty document with the given header
    pub fn new(header: Vec<String>, delimiter: char) -> Self {
        Self {
            header,
            rows: Vec::new(),
            delimiter,
            path: None,
        }
    }

    /// Load a document from a file.
    ///
    /// The first line is the header; remaining lines become data rows,
    /// skipping lines that are fully blank. Fails with a `FileError` if
    /// the path cannot be read and with a `ParseError` naming the
    /// offending line if any line is malformed.
    pub fn load(path: impl AsRef<Path>, delimiter: char) -> DocumentResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| FileError::reading(e, path.to_path_buf()))?;

        let mut lines = content.lines().enumerate();
        let header = match lines.next() {
            Some((_, line)) => tokenize(line, 1, delimiter)?,
            None => Vec::new(),
        };

        let mut rows = Vec::new();
        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            rows.push(tokenize(line, idx + 1, delimiter)?);
        }

        debug!(path = %path.display(), rows = rows.len(), "loaded document");

        Ok(Self {
            header,
            rows,
            delimiter,
            path: Some(path.to_path_buf()),
        })
    }

    /// Number of data rows. O(1).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns. O(1).
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// The field delimiter this document was parsed with
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Column names from the header row
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Path the document was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Bounds-checked cell access.
    ///
    /// Columns are checked against the actual row, not the header, since
    /// appended rows may be ragged.
    pub fn cell(&self, row: usize, col: usize) -> Result<&str, IndexError> {
        let fields = self.rows.get(row).ok_or(IndexError::Row {
            index: row,
            len: self.rows.len(),
        })?;
        fields.get(col).map(String::as_str).ok_or(IndexError::Column {
            index: col,
            len: fields.len(),
        })
    }

    /// Append a row to the table.
    ///
    /// A width mismatch against the header is allowed but reported back
    /// so the caller can flag it.
    pub fn append_row(&mut self, fields: Vec<String>) -> Option<ShapeMismatch> {
        let mismatch = (fields.len() != self.header.len()).then_some(ShapeMismatch {
            expected: self.header.len(),
            found: fields.len(),
        });
        self.rows.push(fields);
        mismatch
    }

    /// Remove and return the row at `index`
    pub fn delete_row(&mut self, index: usize) -> Result<Vec<String>, IndexError> {
        if index >= self.rows.len() {
            return Err(IndexError::Row {
                index,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(index))
    }

    /// Render the document back to delimited text.
    ///
    /// Any field containing the delimiter, a quote, or a newline is
    /// quoted, with internal quotes doubled. Every line ends with '\n',
    /// whatever the source file used.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        write_line(&mut out, &self.header, self.delimiter);
        for row in &self.rows {
            write_line(&mut out, row, self.delimiter);
        }
        out
    }

    /// Write the document to `path` atomically (temp file, then rename)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        let path = path.as_ref();
        atomic_write(path, self.serialize().as_bytes())?;
        debug!(path = %path.display(), rows = self.rows.len(), "saved document");
        Ok(())
    }

    /// Write the document back to the file it was loaded from
    pub fn save_in_place(&self) -> Result<(), FileError> {
        match &self.path {
            Some(path) => {
                atomic_write(path, self.serialize().as_bytes())?;
                debug!(path = %path.display(), "saved document in place");
                Ok(())
            }
            None => Err(FileError::NoBackingFile),
        }
    }
}

fn write_line(out: &mut String, fields: &[String], delimiter: char) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        if needs_quoting(field, delimiter) {
            out.push('"');
            for ch in field.chars() {
                if ch == '"' {
                    out.push('"');
                }
                out.push(ch);
            }
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

fn needs_quoting(field: &str, delimiter: char) -> bool {
    field.contains(delimiter)
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
}

/// Write data to a file atomically.
///
/// Writes to a temporary file in the same directory, syncs it, then
/// renames over the target, so the target is never left partially
/// written and is untouched when any step fails.
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), FileError> {
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| FileError::writing(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| FileError::writing(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| FileError::writing(e, temp_path.clone()))?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| FileError::Rename {
        from: temp_path,
        to: path.to_path_buf(),
        source: e,
    })
}
