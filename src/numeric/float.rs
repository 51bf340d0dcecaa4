//! Decimal literal to `f64` without intermediate strings.
//!
//! The digits on both sides of the decimal point are read as one run through a
//! [`ConcatView`] and accumulated into an integer mantissa `m` with a decimal
//! exponent `e`. When `m` and `10^e` are both exact in `f64`, a single multiply
//! or divide by a power-of-ten table entry is already correctly rounded.
//! Anything else is written as a short `<m>e<e>` literal into a stack buffer
//! and converted by `fast_float` (Eisel-Lemire with an exact fallback), so the
//! result is the nearest `f64` across the whole range.

use super::pow10::{self, MAX_EXACT_EXP};
use super::{Reject, at, fail};
use crate::error::NumericError;
use crate::text::{CharSeq, ConcatView};
use std::io::Write;

/// Digit runs shorter than this fit the 32-bit accumulator.
const U32_DIGITS: usize = 9;
/// Significant digits kept; anything past this is below `f64` resolution.
const MAX_DIGITS: usize = 17;
/// Every integer up to and including this one is exact in `f64`.
const MAX_EXACT_MANTISSA: u64 = 1 << 53;
/// Exponents beyond this cannot produce anything but zero or infinity.
const EXP_LIMIT: i64 = 100_000;
/// Room for a 20-digit mantissa, `e`, a sign and the exponent.
const SCRATCH_LEN: usize = 48;

/// Integer mantissa read from a digit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mantissa {
    value: u64,
    /// Trailing digits dropped past [`MAX_DIGITS`].
    dropped: usize,
}

impl Mantissa {
    fn read<S: CharSeq + ?Sized>(run: &S) -> Result<Self, Reject> {
        let len = run.len();
        let mut lead = 0;
        while lead < len && digit(at(run, lead)?)? == 0 {
            lead += 1;
        }
        let significant = len - lead;
        if significant < U32_DIGITS {
            let mut acc: u32 = 0;
            for i in lead..len {
                acc = acc * 10 + u32::from(digit(at(run, i)?)?);
            }
            return Ok(Self {
                value: u64::from(acc),
                dropped: 0,
            });
        }
        let kept = significant.min(MAX_DIGITS);
        let mut acc: u64 = 0;
        for i in lead..lead + kept {
            acc = acc * 10 + u64::from(digit(at(run, i)?)?);
        }
        // Dropped digits still have to be digits.
        for i in lead + kept..len {
            digit(at(run, i)?)?;
        }
        Ok(Self {
            value: acc,
            dropped: significant - kept,
        })
    }
}

#[inline]
fn digit(b: u8) -> Result<u8, &'static str> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'+' | b'-' => Err("misplaced sign"),
        b'.' => Err("more than one decimal point"),
        _ => Err("unexpected character"),
    }
}

fn position<S: CharSeq + ?Sized>(
    s: &S,
    from: usize,
    to: usize,
    pred: impl Fn(u8) -> bool,
) -> Result<Option<usize>, Reject> {
    for i in from..to {
        if pred(at(s, i)?) {
            return Ok(Some(i));
        }
    }
    Ok(None)
}

fn is_nan<S: CharSeq + ?Sized>(s: &S) -> bool {
    s.len() == 3
        && matches!(
            (s.byte_at(0), s.byte_at(1), s.byte_at(2)),
            (Ok(b'N'), Ok(b'a'), Ok(b'N'))
        )
}

/// The exponent in `[from, to)`, saturated at `±EXP_LIMIT`.
fn read_exponent<S: CharSeq + ?Sized>(s: &S, from: usize, to: usize) -> Result<i64, Reject> {
    if from >= to {
        return Err("missing exponent digits".into());
    }
    let (negative, mut i) = match at(s, from)? {
        b'-' => (true, from + 1),
        b'+' => (false, from + 1),
        _ => (false, from),
    };
    if i == to {
        return Err("missing exponent digits".into());
    }
    let mut exp: i64 = 0;
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
        exp = (exp * 10 + i64::from(b - b'0')).min(EXP_LIMIT);
        i += 1;
    }
    Ok(if negative { -exp } else { exp })
}

/// `mantissa * 10^exp`, correctly rounded.
fn scale(mantissa: u64, exp: i64) -> Result<f64, Reject> {
    if mantissa <= MAX_EXACT_MANTISSA {
        if (0..=MAX_EXACT_EXP).contains(&exp) {
            return Ok(mantissa as f64 * pow10::pow10(exp));
        }
        if (-MAX_EXACT_EXP..0).contains(&exp) {
            return Ok(mantissa as f64 / pow10::pow10(-exp));
        }
        // A short mantissa can absorb the part of the exponent past 22 and stay exact.
        if exp > MAX_EXACT_EXP && exp - MAX_EXACT_EXP < 16 {
            let lifted = mantissa.checked_mul(10u64.pow((exp - MAX_EXACT_EXP) as u32));
            if let Some(m) = lifted.filter(|&m| m <= MAX_EXACT_MANTISSA) {
                return Ok(m as f64 * pow10::pow10(MAX_EXACT_EXP));
            }
        }
    }
    nearest(mantissa, exp)
}

/// Slow path: hand the normalized literal to an exact converter.
fn nearest(mantissa: u64, exp: i64) -> Result<f64, Reject> {
    let mut scratch = [0u8; SCRATCH_LEN];
    let mut rest: &mut [u8] = &mut scratch;
    write!(rest, "{mantissa}e{exp}").map_err(|_| "unreadable literal")?;
    let len = SCRATCH_LEN - rest.len();
    fast_float::parse::<f64, _>(&scratch[..len]).map_err(|_| Reject::Malformed("unreadable literal"))
}

fn parse_f64<S: CharSeq + ?Sized>(s: &S) -> Result<f64, Reject> {
    s.ensure_readable()?;
    let len = s.len();
    if len == 0 {
        return Err("empty literal".into());
    }
    if is_nan(s) {
        return Ok(f64::NAN);
    }

    let mut start = 0;
    let plus = at(s, 0)? == b'+';
    if plus {
        start = 1;
    }
    let negative = start < len && at(s, start)? == b'-';
    if negative {
        if plus {
            return Err("misplaced sign".into());
        }
        start += 1;
    }

    let (mant_end, exponent) = match position(s, start, len, |b| b == b'e' || b == b'E')? {
        Some(e) => (e, read_exponent(s, e + 1, len)?),
        None => (len, 0),
    };

    let (int_end, frac_start) = match position(s, start, mant_end, |b| b == b'.')? {
        Some(dot) => (dot, dot + 1),
        None => (mant_end, mant_end),
    };
    let int_digits = int_end - start;
    let frac_digits = mant_end - frac_start;
    if int_digits + frac_digits == 0 {
        return Err("no digits".into());
    }

    let run = ConcatView::new(
        s.sub_range(start, int_end)?,
        s.sub_range(frac_start, mant_end)?,
    );
    let mantissa = Mantissa::read(&run)?;

    // Exponent of the first digit of the run, as in d.ddd x 10^point_exp.
    let point_exp = exponent + int_digits as i64 - 1;
    let exp = point_exp - (run.len() as i64 - 1) + mantissa.dropped as i64;

    let magnitude = if mantissa.value == 0 {
        0.0
    } else {
        scale(mantissa.value, exp)?
    };
    Ok(if negative { -magnitude } else { magnitude })
}

/// Parse a decimal literal into the nearest `f64`.
///
/// Accepts an optional leading `+` or `-`, an optional decimal point and an
/// optional `e`/`E` exponent with its own sign. The exact string `NaN` yields
/// not-a-number; no other special tokens are recognised. Exponents too large
/// to matter saturate to infinity or zero.
///
/// Significant digits past the seventeenth are dropped, which is below the
/// resolution of `f64`. With at most seventeen, the result is the correctly
/// rounded value.
///
/// # Errors
/// [`NumericError::Window`] when `s` cannot be read, otherwise
/// [`NumericError::Format`] naming what is wrong with the literal.
///
/// # Examples
///
/// ```
/// use cellstream::parse_double;
///
/// assert_eq!(parse_double("9999999999999.999").unwrap(), 9999999999999.999);
/// assert_eq!(parse_double("-1.5e3").unwrap(), -1500.0);
/// assert!(parse_double("1.5e").is_err());
/// ```
pub fn parse_double<S: CharSeq + ?Sized>(s: &S) -> Result<f64, NumericError> {
    parse_f64(s).map_err(|reject| fail(s, reject))
}

/// Parse a decimal literal as `f32` by narrowing the `f64` result.
///
/// Narrowing rounds twice, so a handful of literals land one `f32` ULP away
/// from a dedicated single-precision conversion.
///
/// # Errors
/// As [`parse_double`].
pub fn parse_float<S: CharSeq + ?Sized>(s: &S) -> Result<f32, NumericError> {
    parse_double(s).map(|v| v as f32)
}
