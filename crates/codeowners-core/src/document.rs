// Text buffers the merger writes into

use crate::model::NEWLINE;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Document is read-only: {0}")]
    ReadOnly(String),

    #[error("Offset {offset} is outside the document (length {length}) or not on a character boundary")]
    InvalidOffset { offset: usize, length: usize },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Mutable view of a rules document.
///
/// Offsets are byte offsets into [`Document::text`]. Lines are 0-based.
pub trait Document {
    fn text(&self) -> &str;

    fn text_length(&self) -> usize {
        self.text().len()
    }

    fn insert_string(&mut self, offset: usize, text: &str) -> Result<(), DocumentError>;

    /// Offset of the first character of `line`; lines past the end map to the document end
    fn line_start_offset(&self, line: usize) -> usize {
        line_start_offset(self.text(), line)
    }

    fn ends_with_separator(&self) -> bool {
        self.text().ends_with(NEWLINE)
    }

    /// Flush pending changes so other readers observe them
    fn commit(&mut self) -> Result<(), DocumentError>;
}

/// Source of the caret position of an editor showing the document
pub trait CursorProvider {
    fn primary_selection_start_line(&self) -> Option<usize>;
}

/// Cursor pinned to a fixed 0-based line
#[derive(Debug, Clone, Copy)]
pub struct FixedCursor(pub usize);

impl CursorProvider for FixedCursor {
    fn primary_selection_start_line(&self) -> Option<usize> {
        Some(self.0)
    }
}

pub fn line_start_offset(text: &str, line: usize) -> usize {
    if line == 0 {
        return 0;
    }
    text.match_indices(NEWLINE)
        .nth(line - 1)
        .map(|(idx, sep)| idx + sep.len())
        .unwrap_or(text.len())
}

fn check_offset(text: &str, offset: usize) -> Result<(), DocumentError> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return Err(DocumentError::InvalidOffset { offset, length: text.len() });
    }
    Ok(())
}

/// In-memory document
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    text: String,
    read_only: bool,
    commits: usize,
}

impl TextDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), read_only: false, commits: 0 }
    }

    pub fn read_only(text: impl Into<String>) -> Self {
        Self { text: text.into(), read_only: true, commits: 0 }
    }

    /// Number of times [`Document::commit`] has been called
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl Document for TextDocument {
    fn text(&self) -> &str {
        &self.text
    }

    fn insert_string(&mut self, offset: usize, text: &str) -> Result<(), DocumentError> {
        if self.read_only {
            return Err(DocumentError::ReadOnly("in-memory document".to_string()));
        }
        check_offset(&self.text, offset)?;
        self.text.insert_str(offset, text);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DocumentError> {
        self.commits += 1;
        Ok(())
    }
}

/// Document loaded from disk; [`Document::commit`] writes it back
#[derive(Debug)]
pub struct FileDocument {
    path: PathBuf,
    text: String,
    read_only: bool,
    dirty: bool,
}

impl FileDocument {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref().to_path_buf();
        let io_err = |source| DocumentError::Io { path: path.clone(), source };

        let text = fs::read_to_string(&path).map_err(io_err)?;
        let read_only = fs::metadata(&path).map_err(io_err)?.permissions().readonly();

        Ok(Self { path, text, read_only, dirty: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}

impl Document for FileDocument {
    fn text(&self) -> &str {
        &self.text
    }

    fn insert_string(&mut self, offset: usize, text: &str) -> Result<(), DocumentError> {
        if self.read_only {
            return Err(DocumentError::ReadOnly(self.path.display().to_string()));
        }
        check_offset(&self.text, offset)?;
        self.text.insert_str(offset, text);
        self.dirty = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DocumentError> {
        if !self.dirty {
            return Ok(());
        }
        fs::write(&self.path, &self.text)
            .map_err(|source| DocumentError::Io { path: self.path.clone(), source })?;
        self.dirty = false;
        Ok(())
    }
}
