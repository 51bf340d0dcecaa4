//! Consumers that record what they receive.
//!
//! Each helper borrows a caller-owned `Vec` and returns a [`CellConsumer`]
//! appending `(row, value)` to it, so a test can bind columns and inspect the
//! vectors once the tokenizer is dropped.
//!
//! ```
//! use cellstream::Tokenizer;
//! use cellstream::testing::{record_int, record_text};
//!
//! let (mut names, mut counts) = (Vec::new(), Vec::new());
//! Tokenizer::default()
//!     .column(record_text(&mut names))
//!     .column(record_int(&mut counts))
//!     .parse_str("A,1\nB,2\n")
//!     .unwrap();
//! assert_eq!(names, [(0, "A".to_string()), (1, "B".to_string())]);
//! assert_eq!(counts, [(0, 1), (1, 2)]);
//! ```

use crate::consumer::CellConsumer;

pub fn record_text(out: &mut Vec<(usize, String)>) -> CellConsumer<'_> {
    CellConsumer::text(move |row, s| out.push((row, s.to_string())))
}

pub fn record_int(out: &mut Vec<(usize, i32)>) -> CellConsumer<'_> {
    CellConsumer::int(move |row, v| out.push((row, v)))
}

pub fn record_long(out: &mut Vec<(usize, i64)>) -> CellConsumer<'_> {
    CellConsumer::long(move |row, v| out.push((row, v)))
}

pub fn record_double(out: &mut Vec<(usize, f64)>) -> CellConsumer<'_> {
    CellConsumer::double(move |row, v| out.push((row, v)))
}

pub fn record_float(out: &mut Vec<(usize, f32)>) -> CellConsumer<'_> {
    CellConsumer::float(move |row, v| out.push((row, v)))
}

/// Strip row indexes, keeping values in dispatch order.
#[must_use]
pub fn values<T: Clone>(recorded: &[(usize, T)]) -> Vec<T> {
    recorded.iter().map(|(_, v)| v.clone()).collect()
}
