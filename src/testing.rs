//! Testing utilities for tokenizer users.
//!
//! This module provides:
//!
//! - **Recorders**: consumers that append `(row, value)` pairs to a `Vec`
//! - **Mock I/O**: readers that deliver data in tiny pieces, fail on demand or
//!   get interrupted, plus temporary files for path-based parsing
//! - **Fixtures**: small sample inputs with their expected values
//!
//! # Quick Start
//!
//! ```
//! use cellstream::Tokenizer;
//! use cellstream::testing::*;
//!
//! let mut ids = Vec::new();
//! let reader = ChunkedReader::new(generated_rows(50), 3);
//! let summary = Tokenizer::default()
//!     .column(record_long(&mut ids))
//!     .parse(reader)
//!     .unwrap();
//! assert_eq!(summary.rows, 50);
//! assert_eq!(values(&ids), (0..50).collect::<Vec<i64>>());
//! ```

pub mod fixtures;
pub mod mock_io;
pub mod recorders;

pub use fixtures::*;
pub use mock_io::*;
pub use recorders::*;
