//! # cellstream
//!
//! A **zero-copy delimited-text ingestion engine**. Character data is read in
//! chunks, split on a separator and row terminators, and every cell is handed
//! to the consumer bound to its column as raw text, `i32`, `i64`, `f64` or
//! `f32`, without allocating a string per cell.
//!
//! ## Key Features
//!
//! - **Windowed views** - cells are re-pointable ranges over the read buffer
//! - **Split-safe** - a cell cut by a buffer reload is presented as one
//!   logical sequence over both buffers
//! - **Fast numeric parsing** - integer and decimal literals are parsed
//!   straight from the view using a shared power-of-ten table
//! - **Typed column binding** - a closed set of consumer kinds, matched
//!   exhaustively
//! - **Bounded batching** - a sequential and a rayon-parallel batch helper for
//!   downstream stages slower than ingestion
//! - **Compressed files** - gzip, zstd, bzip2 and xz sources (feature flags)
//!
//! ## Quick Start
//!
//! ```
//! use cellstream::*;
//!
//! # fn main() -> cellstream::Result<()> {
//! let mut labels = Vec::new();
//! let mut sum = 0.0;
//! let summary = Tokenizer::with_separator(',')
//!     .column(CellConsumer::text(|_, s| labels.push(s.to_string())))
//!     .column(CellConsumer::double(|_, v| sum += v))
//!     .parse_str("a,1.5\nb,2.25\n")?;
//! assert_eq!(summary.rows, 2);
//! assert_eq!(labels, ["a", "b"]);
//! assert_eq!(sum, 3.75);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`text`] - `CharSeq`, `TextWindow`, `ConcatView`
//! - [`numeric`] - `parse_int`, `parse_long`, `parse_double`, `parse_float`
//! - [`consumer`] - the `CellConsumer` sum type
//! - [`tokenizer`] - the row engine and its configuration
//! - [`source`] - file sources with transparent decompression
//! - [`partition`] - bounded batch consumption
//! - [`testing`] - recorders, mock readers and fixtures for tests
//!
//! ## Feature Flags
//!
//! - `compression-gzip`, `compression-zstd`, `compression-bzip2`,
//!   `compression-xz` - decoders for [`Tokenizer::parse_path`] (all on by default)

pub mod consumer;
pub mod error;
pub mod numeric;
pub mod partition;
pub mod source;
pub mod testing;
pub mod text;
pub mod tokenizer;

pub use consumer::{CellConsumer, CellKind};
pub use error::{Error, NumberFormatError, NumericError, Result, WindowFault};
pub use numeric::{parse_double, parse_float, parse_int, parse_long};
pub use partition::{BoundedQueue, Partitioner};
pub use text::{CharSeq, ConcatView, SubSeq, TextWindow};
pub use tokenizer::{tokenize, ParseSummary, Tokenizer, TokenizerConfig};
