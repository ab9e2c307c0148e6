//! Error types for usage and options parsing.
//!
//! [`ParseFailure`] is a positioned failure produced by the line scanner.
//! [`Error`] is the crate-level error returned by the help compiler, covering
//! lexical failures, structural grammar errors, and documents without a
//! usage section.

use std::fmt;

use docopt_grammar_core::GrammarError;
use thiserror::Error;

/// Marker inserted into the rendered line at the failure column.
pub const CURSOR_SIGN: &str = "→";

/// Category of a [`ParseFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailureKind {
    /// No token recognized at the current position.
    Lexical,
    /// Empty group, empty alternative, or repeat marker with nothing to repeat.
    Emptiness,
    /// Usage section without a line establishing the program name.
    MissingBinaryName,
    /// Option definition followed by neither an alias nor a description.
    MalformedOption,
}

/// A parse failure positioned within one source line.
///
/// The `Display` output is presentational: the line is quoted with a
/// [`CURSOR_SIGN`] inserted where matching stopped. Use [`column`](Self::column)
/// and the public fields for programmatic handling.
///
/// # Examples
///
/// ```
/// use docopt_grammar_parser::{ParseFailure, ParseFailureKind};
///
/// let failure = ParseFailure {
///     kind: ParseFailureKind::Emptiness,
///     message: "empty groups not allowed".into(),
///     line: "blah ()".into(),
///     tail: ")".into(),
///     line_number: 1,
/// };
/// assert_eq!(failure.column(), 6);
/// assert_eq!(
///     failure.to_string(),
///     "line 1: empty groups not allowed: \"blah (→)\""
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub kind: ParseFailureKind,
    pub message: String,
    /// Full text of the offending line.
    pub line: String,
    /// Unconsumed suffix of `line` at the point of failure.
    pub tail: String,
    /// 1-based line number within the parsed section; `0` when no line was read.
    pub line_number: usize,
}

impl ParseFailure {
    /// Byte column where matching stopped.
    pub fn column(&self) -> usize {
        self.line.len().saturating_sub(self.tail.len())
    }

    /// The offending line with [`CURSOR_SIGN`] inserted at the failure column.
    pub fn marked_line(&self) -> String {
        let column = self.column();
        match (self.line.get(..column), self.line.get(column..)) {
            (Some(head), Some(rest)) => format!("{head}{CURSOR_SIGN}{rest}"),
            _ => format!("{}{CURSOR_SIGN}", self.line),
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line_number > 0 {
            write!(f, "line {}: ", self.line_number)?;
        }
        write!(f, "{}: {:?}", self.message, self.marked_line())
    }
}

impl std::error::Error for ParseFailure {}

/// Errors returned while compiling a help document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Lexical or emptiness failure inside the usage or options section.
    #[error(transparent)]
    Parse(#[from] ParseFailure),

    /// Bracket structure of one usage line is invalid.
    #[error("usage variant {variant}: {source}")]
    Grammar {
        /// 0-based index of the invocation line within the usage section.
        variant: usize,
        #[source]
        source: GrammarError,
    },

    /// The document has no `usage:` header.
    #[error("\"usage:\" (case-insensitive) not found in help text")]
    MissingUsageSection,
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
