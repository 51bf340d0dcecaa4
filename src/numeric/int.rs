//! Integer literal reader used for cells.

use super::{Reject, at, fail};
use crate::error::NumericError;
use crate::text::CharSeq;

/// Parse `[from, to)` of `s` as a signed decimal integer.
///
/// Accumulates negatively so `i64::MIN` is reachable without overflow.
fn read_i64<S: CharSeq + ?Sized>(s: &S, from: usize, to: usize) -> Result<i64, Reject> {
    if from >= to {
        return Err("empty literal".into());
    }
    let (negative, mut i) = match at(s, from)? {
        b'-' => (true, from + 1),
        b'+' => (false, from + 1),
        _ => (false, from),
    };
    if i == to {
        return Err("sign without digits".into());
    }
    let mut acc: i64 = 0;
    while i < to {
        let b = at(s, i)?;
        if !b.is_ascii_digit() {
            let reason = if b == b'+' || b == b'-' {
                "misplaced sign"
            } else {
                "unexpected character"
            };
            return Err(reason.into());
        }
        acc = acc
            .checked_mul(10)
            .and_then(|a| a.checked_sub(i64::from(b - b'0')))
            .ok_or("out of range")?;
        i += 1;
    }
    if negative {
        Ok(acc)
    } else {
        Ok(acc.checked_neg().ok_or("out of range")?)
    }
}

fn read_whole<S: CharSeq + ?Sized>(s: &S) -> Result<i64, Reject> {
    s.ensure_readable()?;
    read_i64(s, 0, s.len())
}

/// Parse a whole sequence as an `i64`.
///
/// An optional `+` or `-` followed by at least one ASCII digit.
///
/// # Errors
/// [`NumericError::Window`] when `s` cannot be read, otherwise
/// [`NumericError::Format`] for anything but an in-range integer literal.
///
/// # Examples
///
/// ```
/// use cellstream::parse_long;
///
/// assert_eq!(parse_long("-9223372036854775808").unwrap(), i64::MIN);
/// assert!(parse_long("12a").is_err());
/// ```
pub fn parse_long<S: CharSeq + ?Sized>(s: &S) -> Result<i64, NumericError> {
    read_whole(s).map_err(|reject| fail(s, reject))
}

/// Parse a whole sequence as an `i32`.
///
/// # Errors
/// As [`parse_long`], plus `out of range` for values outside `i32`.
pub fn parse_int<S: CharSeq + ?Sized>(s: &S) -> Result<i32, NumericError> {
    read_whole(s)
        .and_then(|v| i32::try_from(v).map_err(|_| Reject::Malformed("out of range")))
        .map_err(|reject| fail(s, reject))
}
