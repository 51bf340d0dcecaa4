//! Error types shared by the tokenizer, the text views and the numeric parser.
//!
//! Nothing in this crate retries. Every failure aborts the parse call that hit
//! it; consumer calls already made for earlier rows stay observable.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by a parse call.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying source failed to produce bytes.
    #[error("I/O failure while reading input: {0}")]
    Io(#[from] std::io::Error),

    /// A cell bound to a numeric consumer could not be interpreted.
    #[error("malformed numeric cell at row {row}, column {column}: {source}")]
    MalformedNumericLiteral {
        row: usize,
        column: usize,
        #[source]
        source: NumberFormatError,
    },

    /// More consumers were bound than the row provides columns for.
    #[error("row {row} has {columns} column(s) but {consumers} consumer(s) are bound")]
    ColumnConsumerMismatch {
        row: usize,
        columns: usize,
        consumers: usize,
    },

    /// A text view was read before being pointed anywhere, or out of range.
    #[error("invalid window access: {0}")]
    InvalidWindowAccess(#[from] WindowFault),

    /// Tokenizer settings that cannot describe a well-formed input.
    #[error("invalid tokenizer configuration: {0}")]
    InvalidConfig(String),
}

/// Why a read through a text view was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowFault {
    #[error("window read before its first reset")]
    Unset,
    #[error("index {index} outside window of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("window end {end} exceeds underlying sequence length {source_len}")]
    Detached { end: usize, source_len: usize },
    #[error("sub-range {from}..{to} invalid for length {len}")]
    BadRange { from: usize, to: usize, len: usize },
}

/// A literal the numeric parser refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {literal:?}: {reason}")]
pub struct NumberFormatError {
    pub literal: String,
    pub reason: &'static str,
}

impl NumberFormatError {
    pub(crate) fn new(literal: String, reason: &'static str) -> Self {
        Self { literal, reason }
    }
}

/// Failure of a standalone numeric parse.
///
/// A bad literal and an unreadable view are different problems: the first is
/// an input error, the second a misuse of the view. Inside a tokenizer run
/// they become [`Error::MalformedNumericLiteral`] and
/// [`Error::InvalidWindowAccess`] respectively.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error(transparent)]
    Format(#[from] NumberFormatError),
    #[error(transparent)]
    Window(#[from] WindowFault),
}

impl NumericError {
    /// The parser's reason, when the literal itself was at fault.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            NumericError::Format(e) => Some(e.reason),
            NumericError::Window(_) => None,
        }
    }

    /// Attach cell coordinates, producing the tokenizer-level error.
    pub fn at_cell(self, row: usize, column: usize) -> Error {
        match self {
            NumericError::Format(source) => Error::MalformedNumericLiteral {
                row,
                column,
                source,
            },
            NumericError::Window(fault) => Error::InvalidWindowAccess(fault),
        }
    }
}
