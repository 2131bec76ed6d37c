//! Parse errors.
//!
//! Unlike the HTML parsing algorithm, which recovers from every error, an
//! XHTML document must be well-formed. Every error here is fatal to the
//! parse and no partial tree is handed out.

use std::fmt;

/// A 1-based line/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number in characters, starting at 1.
    pub column: usize,
}

impl Position {
    /// The first character of the input.
    pub const START: Self = Self { line: 1, column: 1 };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Why a document could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Input ended inside a tag, comment, CDATA section, DOCTYPE or
    /// processing instruction.
    #[error("{position}: unexpected end of input in {context}")]
    UnexpectedEof {
        /// The construct that was left open.
        context: &'static str,
        /// Where that construct started.
        position: Position,
    },

    /// Tag syntax the tokenizer cannot make sense of.
    #[error("{position}: malformed markup: {reason}")]
    MalformedTag {
        /// Short description of the problem.
        reason: &'static str,
        /// Location of the offending character.
        position: Position,
    },

    /// An end tag that does not close the current element.
    #[error("{position}: end tag </{found}> does not match open element <{expected}>")]
    MismatchedEndTag {
        /// Name of the element that is currently open.
        expected: String,
        /// Name found in the end tag.
        found: String,
        /// Location of the end tag.
        position: Position,
    },

    /// An end tag with no element left to close.
    #[error("{position}: end tag </{name}> has no matching start tag")]
    UnexpectedEndTag {
        /// Name found in the end tag.
        name: String,
        /// Location of the end tag.
        position: Position,
    },

    /// An element still open when the input ended.
    #[error("element <{name}> opened at {position} is never closed")]
    UnclosedElement {
        /// Name of the innermost unclosed element.
        name: String,
        /// Location of its start tag.
        position: Position,
    },
}

impl ParseError {
    /// Location the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedEof { position, .. }
            | Self::MalformedTag { position, .. }
            | Self::MismatchedEndTag { position, .. }
            | Self::UnexpectedEndTag { position, .. }
            | Self::UnclosedElement { position, .. } => *position,
        }
    }
}
