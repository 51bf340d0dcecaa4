//! Process-wide table of decimal magnitudes.

use std::sync::OnceLock;

/// Smallest exponent whose power of ten is a non-zero `f64` (subnormal).
pub const MIN_EXP: i64 = -323;
/// Largest exponent whose power of ten is finite.
pub const MAX_EXP: i64 = 308;
/// Powers of ten up to this exponent are exact in `f64`.
pub const MAX_EXACT_EXP: i64 = 22;

static TABLE: OnceLock<Box<[f64]>> = OnceLock::new();

fn build() -> Box<[f64]> {
    // Each entry is the correctly rounded value of its literal, so exact
    // powers stay exact and the rest carry at most half an ULP of error.
    (MIN_EXP..=MAX_EXP)
        .map(|e| {
            format!("1e{e}")
                .parse::<f64>()
                .expect("decimal power literal is well-formed")
        })
        .collect()
}

#[inline]
fn table() -> &'static [f64] {
    TABLE.get_or_init(build)
}

/// Build the table now instead of on first use.
pub fn init() {
    table();
}

/// `10^exp` as the nearest `f64`.
///
/// Exponents below the table saturate to `0.0`, above it to infinity.
#[inline]
pub fn pow10(exp: i64) -> f64 {
    if exp < MIN_EXP {
        0.0
    } else if exp > MAX_EXP {
        f64::INFINITY
    } else {
        table()[(exp - MIN_EXP) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_range_matches_integer_powers() {
        let mut p = 1u128;
        for e in 0..=MAX_EXACT_EXP {
            assert_eq!(pow10(e), p as f64, "10^{e}");
            p *= 10;
        }
    }

    #[test]
    fn bounds_saturate() {
        assert_eq!(pow10(MIN_EXP - 1), 0.0);
        assert!(pow10(MIN_EXP) > 0.0);
        assert!(pow10(MAX_EXP).is_finite());
        assert!(pow10(MAX_EXP + 1).is_infinite());
    }
}
