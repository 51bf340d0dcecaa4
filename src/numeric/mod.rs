//! Numeric parsing straight from text views.
//!
//! - [`parse_int`] / [`parse_long`]: signed decimal integers with overflow checks
//! - [`parse_double`] / [`parse_float`]: decimal literals with optional fraction
//!   and exponent, scaled through a shared power-of-ten table
//! - [`pow10`]: the table itself, built once per process
//!
//! All parsers read through [`CharSeq`], so a cell split across two buffer
//! reads parses exactly like one that arrived whole. A view that cannot be
//! read fails with [`NumericError::Window`] before any digit is examined.

mod float;
mod int;
pub mod pow10;

pub use float::{parse_double, parse_float};
pub use int::{parse_int, parse_long};
pub use pow10::pow10;

use crate::error::{NumberFormatError, NumericError, WindowFault};
use crate::text::CharSeq;

/// Why a parser stopped, before the literal text is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reject {
    Malformed(&'static str),
    Window(WindowFault),
}

impl From<&'static str> for Reject {
    fn from(reason: &'static str) -> Self {
        Reject::Malformed(reason)
    }
}

impl From<WindowFault> for Reject {
    fn from(fault: WindowFault) -> Self {
        Reject::Window(fault)
    }
}

#[inline]
pub(crate) fn at<S: CharSeq + ?Sized>(s: &S, index: usize) -> Result<u8, Reject> {
    Ok(s.byte_at(index)?)
}

/// Attach the offending literal to a rejection.
pub(crate) fn fail<S: CharSeq + ?Sized>(s: &S, reject: Reject) -> NumericError {
    match reject {
        Reject::Malformed(reason) => NumberFormatError::new(literal_of(s), reason).into(),
        Reject::Window(fault) => fault.into(),
    }
}

fn literal_of<S: CharSeq + ?Sized>(s: &S) -> String {
    match s.to_text() {
        Ok(text) => text.into_owned(),
        Err(_) => String::from("<unreadable>"),
    }
}
