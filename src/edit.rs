use crate::tree::{Node, Span};
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

/// The edit primitive: remove a byte range, then optionally insert text at
/// its start.
///
/// Every higher-level operation (delete, replace, insert) reduces to this.
/// `byte_start == byte_end` is a pure insertion point; `new_text == None` is a
/// pure deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Edit does nothing until passed to apply_edits()"]
pub struct Edit {
    /// Starting byte offset (inclusive)
    pub byte_start: usize,
    /// Ending byte offset (exclusive)
    pub byte_end: usize,
    /// Text inserted at `byte_start` after the range is removed
    pub new_text: Option<String>,
    /// What we expect to find at [byte_start, byte_end) before applying
    pub expected_before: EditVerification,
}

/// Verification strategy for edit safety.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditVerification {
    /// Exact text match required
    ExactMatch(String),
    /// xxh3 hash of expected text (faster for large spans)
    Hash(u64),
}

impl EditVerification {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            EditVerification::ExactMatch(expected) => text == expected,
            EditVerification::Hash(expected_hash) => xxh3_64(text.as_bytes()) == *expected_hash,
        }
    }

    /// Create verification from text, using hash for text over 1KB.
    pub fn from_text(text: &str) -> Self {
        if text.len() > 1024 {
            EditVerification::Hash(xxh3_64(text.as_bytes()))
        } else {
            EditVerification::ExactMatch(text.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum EditError {
    #[error("before-text verification failed at [{byte_start}, {byte_end}): expected {expected}, found {found:?}")]
    BeforeTextMismatch {
        byte_start: usize,
        byte_end: usize,
        expected: String,
        found: String,
    },

    #[error("invalid byte range [{byte_start}, {byte_end}) in document of length {len}")]
    InvalidByteRange {
        byte_start: usize,
        byte_end: usize,
        len: usize,
    },

    #[error("byte offset {offset} is not on a UTF-8 character boundary")]
    NotCharBoundary { offset: usize },

    #[error("overlapping edits: [{first_start}, {first_end}) and [{second_start}, {second_end})")]
    Overlap {
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Edit {
    /// Create a new edit with automatic verification generation.
    pub fn new(
        byte_start: usize,
        byte_end: usize,
        new_text: Option<String>,
        expected_before: impl AsRef<str>,
    ) -> Self {
        Self {
            byte_start,
            byte_end,
            new_text,
            expected_before: EditVerification::from_text(expected_before.as_ref()),
        }
    }

    /// Edit covering exactly `node`, verified against its current text.
    pub fn for_node(node: Node<'_>, new_text: Option<String>) -> Self {
        let span = node.span();
        Self::new(span.start, span.end, new_text, node.text())
    }

    /// Zero-width insertion at `offset`.
    pub fn insertion(offset: usize, text: impl Into<String>) -> Self {
        Self::new(offset, offset, Some(text.into()), "")
    }

    pub fn span(&self) -> Span {
        Span::new(self.byte_start, self.byte_end)
    }

    pub fn is_insertion(&self) -> bool {
        self.byte_start == self.byte_end
    }

    pub fn is_deletion(&self) -> bool {
        self.new_text.is_none()
    }

    /// Check the edit against `source`, returning the text it will remove.
    pub fn validate<'a>(&self, source: &'a str) -> Result<&'a str, EditError> {
        if self.byte_start > self.byte_end || self.byte_end > source.len() {
            return Err(EditError::InvalidByteRange {
                byte_start: self.byte_start,
                byte_end: self.byte_end,
                len: source.len(),
            });
        }

        for offset in [self.byte_start, self.byte_end] {
            if !source.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }

        let current = &source[self.byte_start..self.byte_end];
        if !self.expected_before.matches(current) {
            return Err(EditError::BeforeTextMismatch {
                byte_start: self.byte_start,
                byte_end: self.byte_end,
                expected: format!("{:?}", self.expected_before),
                found: current.to_string(),
            });
        }

        Ok(current)
    }
}

/// A pure function from a matched node to the edit it should produce.
///
/// [`EditOp`] covers delete, replace, and insert. Any
/// `Fn(Node<'_>) -> Edit` works too, for edits that depend on the node's
/// content.
pub trait EditFactory {
    fn make(&self, node: Node<'_>) -> Edit;
}

impl<F> EditFactory for F
where
    F: Fn(Node<'_>) -> Edit,
{
    fn make(&self, node: Node<'_>) -> Edit {
        self(node)
    }
}

/// The built-in edit operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Remove the node's text.
    Delete,
    /// Swap the node's text for new text.
    Replace(String),
    /// Insert text immediately after (or before) the node without removing
    /// anything.
    Insert { text: String, after: bool },
}

impl EditOp {
    pub fn delete() -> Self {
        EditOp::Delete
    }

    pub fn replace(text: impl Into<String>) -> Self {
        EditOp::Replace(text.into())
    }

    pub fn insert(text: impl Into<String>, after: bool) -> Self {
        EditOp::Insert {
            text: text.into(),
            after,
        }
    }

    pub fn insert_after(text: impl Into<String>) -> Self {
        Self::insert(text, true)
    }

    pub fn insert_before(text: impl Into<String>) -> Self {
        Self::insert(text, false)
    }
}

impl EditFactory for EditOp {
    fn make(&self, node: Node<'_>) -> Edit {
        match self {
            EditOp::Delete => Edit::for_node(node, None),
            EditOp::Replace(text) => Edit::for_node(node, Some(text.clone())),
            EditOp::Insert { text, after } => {
                let span = node.span();
                let offset = if *after { span.end } else { span.start };
                Edit::insertion(offset, text.clone())
            }
        }
    }
}

/// Apply a batch of edits to `source` and return the new text.
///
/// Edits are stable-sorted by start offset, with zero-width inserts ahead of
/// ranged edits that share their start. Inserts at the same offset keep their
/// relative order. Every edit is validated and any two that intersect fail the
/// whole batch. The output is then built in one pass,
/// matching what applying the edits back-to-front would produce.
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EditError> {
    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|edit| (edit.byte_start, !edit.is_insertion()));

    for edit in &ordered {
        edit.validate(source)?;
    }

    // For non-overlapping regions: earlier edit's end <= later edit's start
    for window in ordered.windows(2) {
        let (earlier, later) = (window[0], window[1]);
        if earlier.byte_end > later.byte_start {
            return Err(EditError::Overlap {
                first_start: earlier.byte_start,
                first_end: earlier.byte_end,
                second_start: later.byte_start,
                second_end: later.byte_end,
            });
        }
    }

    let inserted: usize = ordered
        .iter()
        .filter_map(|e| e.new_text.as_ref())
        .map(String::len)
        .sum();
    let mut output = String::with_capacity(source.len() + inserted);
    let mut cursor = 0;
    for edit in ordered {
        output.push_str(&source[cursor..edit.byte_start]);
        if let Some(text) = &edit.new_text {
            output.push_str(text);
        }
        cursor = edit.byte_end;
    }
    output.push_str(&source[cursor..]);

    Ok(output)
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write succeeds or the file is left untouched.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), EditError> {
    // Same directory keeps the rename on one filesystem
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => {
            return Err(EditError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no parent directory",
            )))
        }
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
