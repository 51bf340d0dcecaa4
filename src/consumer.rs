//! Per-column cell sinks.
//!
//! A [`CellConsumer`] is bound to one column position and receives
//! `(row_index, value)` for every cell in that column. The set of value kinds
//! is closed, so the tokenizer matches on the variant instead of going through
//! an open trait.
//!
//! Consumers may borrow and mutate caller state (`FnMut + 'c`). The tokenizer
//! calls them from one thread, in row then column order. None of them ever
//! sees the text view itself; text consumers get a `&str` that is only valid
//! for the duration of the call.

use crate::error::{NumericError, Result};
use crate::numeric::{parse_double, parse_float, parse_int, parse_long};
use crate::text::CharSeq;
use std::fmt;

type Sink<'c, T> = Box<dyn FnMut(usize, T) + 'c>;

/// Value kind a consumer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Text,
    Int,
    Long,
    Double,
    Float,
    Skip,
}

/// Callback bound to one column.
pub enum CellConsumer<'c> {
    Text(Box<dyn FnMut(usize, &str) + 'c>),
    Int(Sink<'c, i32>),
    Long(Sink<'c, i64>),
    Double(Sink<'c, f64>),
    /// `f64` parse narrowed to `f32`.
    Float(Sink<'c, f32>),
    /// Occupies the column without dispatching anything.
    Skip,
}

impl<'c> CellConsumer<'c> {
    /// Receive each cell as text.
    ///
    /// The `&str` is borrowed from the current chunk, so copy it out if it has
    /// to outlive the call.
    pub fn text(f: impl FnMut(usize, &str) + 'c) -> Self {
        CellConsumer::Text(Box::new(f))
    }

    /// Receive each cell parsed as a 32-bit signed integer.
    pub fn int(f: impl FnMut(usize, i32) + 'c) -> Self {
        CellConsumer::Int(Box::new(f))
    }

    /// Receive each cell parsed as a 64-bit signed integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use cellstream::{CellConsumer, Tokenizer};
    ///
    /// let mut ids = Vec::new();
    /// Tokenizer::default()
    ///     .column(CellConsumer::long(|_, v| ids.push(v)))
    ///     .parse_str("7\n-3\n")
    ///     .unwrap();
    /// assert_eq!(ids, [7, -3]);
    /// ```
    pub fn long(f: impl FnMut(usize, i64) + 'c) -> Self {
        CellConsumer::Long(Box::new(f))
    }

    /// Receive each cell parsed as the nearest `f64`.
    pub fn double(f: impl FnMut(usize, f64) + 'c) -> Self {
        CellConsumer::Double(Box::new(f))
    }

    /// Receive each cell as `f32`, narrowed from the `f64` parse.
    pub fn float(f: impl FnMut(usize, f32) + 'c) -> Self {
        CellConsumer::Float(Box::new(f))
    }

    /// Occupy a column and ignore its contents.
    pub fn skip() -> Self {
        CellConsumer::Skip
    }

    /// The value kind this consumer is bound to.
    pub fn kind(&self) -> CellKind {
        match self {
            CellConsumer::Text(_) => CellKind::Text,
            CellConsumer::Int(_) => CellKind::Int,
            CellConsumer::Long(_) => CellKind::Long,
            CellConsumer::Double(_) => CellKind::Double,
            CellConsumer::Float(_) => CellKind::Float,
            CellConsumer::Skip => CellKind::Skip,
        }
    }

    /// Convert `cell` to this consumer's kind and hand it over.
    ///
    /// # Errors
    /// [`MalformedNumericLiteral`](crate::Error::MalformedNumericLiteral)
    /// tagged with `row` and `column` when a numeric cell does not parse.
    /// [`InvalidWindowAccess`](crate::Error::InvalidWindowAccess) when `cell`
    /// cannot be read at all.
    pub fn accept<S: CharSeq + ?Sized>(&mut self, row: usize, column: usize, cell: &S) -> Result<()> {
        let tag = |e: NumericError| e.at_cell(row, column);
        match self {
            CellConsumer::Text(f) => {
                let text = cell.to_text()?;
                f(row, &*text)
            }
            CellConsumer::Int(f) => f(row, parse_int(cell).map_err(tag)?),
            CellConsumer::Long(f) => f(row, parse_long(cell).map_err(tag)?),
            CellConsumer::Double(f) => f(row, parse_double(cell).map_err(tag)?),
            CellConsumer::Float(f) => f(row, parse_float(cell).map_err(tag)?),
            CellConsumer::Skip => {}
        }
        Ok(())
    }
}

impl fmt::Debug for CellConsumer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellConsumer").field(&self.kind()).finish()
    }
}
