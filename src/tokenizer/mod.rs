//! Row engine: splits delimited text into cells and dispatches them.
//!
//! A [`Tokenizer`] is configured once with a [`TokenizerConfig`] and an ordered
//! list of [`CellConsumer`]s, one per leading column. Parsing reads the source
//! in chunks of `chunk_capacity` bytes into two alternating buffers and feeds
//! each chunk to a small state machine (`BeforeField`, `InField`, `InQuoted`,
//! `AfterField`).
//!
//! # Rules
//! - `\n`, `\r\n` and a lone `\r` all end a row; blank lines produce no row.
//! - Columns beyond the bound consumers are ignored. A row with fewer columns
//!   than consumers fails with [`Error::ColumnConsumerMismatch`].
//! - A quoted field runs to the matching quote and may contain separators and
//!   terminators. The quotes are not part of the cell. Doubled quotes are not
//!   unescaped.
//! - A final row without a terminator is still dispatched.
//! - The first failure aborts the parse. Cells dispatched before it stay
//!   dispatched.

mod config;
mod engine;

pub use config::{TokenizerConfig, DEFAULT_CHUNK_CAPACITY};

use crate::consumer::CellConsumer;
use crate::error::{Error, Result};
use crate::source;
use anyhow::Context;
use engine::Engine;
use log::{debug, trace};
use serde::Serialize;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// What a completed parse saw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    /// Data rows dispatched (header excluded).
    pub rows: usize,
    /// Cells handed to non-skip consumers.
    pub cells: usize,
    /// Bytes read from the source.
    pub bytes: u64,
    /// Reads that returned data.
    pub chunks: usize,
    /// Column names, when `has_headers` is set.
    pub headers: Vec<String>,
}

/// Streaming tokenizer bound to a set of column consumers.
///
/// ```
/// use cellstream::{CellConsumer, Tokenizer};
///
/// let mut names = Vec::new();
/// let mut total = 0i64;
/// let summary = Tokenizer::default()
///     .column(CellConsumer::text(|_, s| names.push(s.to_string())))
///     .column(CellConsumer::long(|_, v| total += v))
///     .parse_str("a,1\nb,2\n")
///     .unwrap();
/// assert_eq!(summary.rows, 2);
/// assert_eq!(names, ["a", "b"]);
/// assert_eq!(total, 3);
/// ```
#[derive(Default)]
pub struct Tokenizer<'c> {
    config: TokenizerConfig,
    consumers: Vec<CellConsumer<'c>>,
    on_row: Option<Box<dyn FnMut(usize) + 'c>>,
}

impl<'c> Tokenizer<'c> {
    /// A tokenizer with no consumers bound yet.
    ///
    /// `config` is validated when parsing starts, not here.
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            config,
            consumers: Vec::new(),
            on_row: None,
        }
    }

    /// A default-configured tokenizer splitting on `separator`.
    pub fn with_separator(separator: char) -> Self {
        Self::new(TokenizerConfig {
            separator,
            ..Default::default()
        })
    }

    /// The configuration the next parse will use.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Adjust the configuration between parses.
    pub fn config_mut(&mut self) -> &mut TokenizerConfig {
        &mut self.config
    }

    /// Bind the consumer for the next column position.
    pub fn column(mut self, consumer: CellConsumer<'c>) -> Self {
        self.consumers.push(consumer);
        self
    }

    /// Bind consumers for the next column positions, in order.
    pub fn columns(mut self, consumers: impl IntoIterator<Item = CellConsumer<'c>>) -> Self {
        self.consumers.extend(consumers);
        self
    }

    /// Called with the row index after every dispatched row.
    pub fn on_row(mut self, hook: impl FnMut(usize) + 'c) -> Self {
        self.on_row = Some(Box::new(hook));
        self
    }

    /// Bytes requested per read. Zero is rejected as
    /// [`Error::InvalidConfig`] once parsing starts.
    pub fn chunk_capacity(mut self, capacity: usize) -> Self {
        self.config.chunk_capacity = capacity;
        self
    }

    /// Treat the first row as column names instead of data.
    ///
    /// The names end up in [`ParseSummary::headers`] and no consumer sees them.
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.config.has_headers = yes;
        self
    }

    /// The quote character, or `None` to read quotes as ordinary bytes.
    pub fn quote(mut self, quote: Option<char>) -> Self {
        self.config.quote = quote;
        self
    }

    /// Tokenize everything `reader` produces.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] before reading anything; otherwise the first
    /// I/O, numeric or column-count failure encountered.
    pub fn parse<R: Read>(&mut self, mut reader: R) -> Result<ParseSummary> {
        self.config.validate()?;
        let capacity = self.config.chunk_capacity;
        debug!(
            "tokenizing: separator {:?}, {} consumer(s), chunk capacity {}",
            self.config.separator,
            self.consumers.len(),
            capacity
        );

        let mut engine = Engine::new(
            self.config.separator_byte(),
            self.config.quote_byte(),
            self.config.has_headers,
            &mut self.consumers,
            self.on_row.as_deref_mut(),
        );
        let mut bufs = [vec![0u8; capacity], vec![0u8; capacity]];
        let mut spill = Vec::new();
        let mut chunks = 0usize;
        let mut cur = 0usize;

        loop {
            let (buf, prev) = split_pair(&mut bufs, cur);
            let n = read_chunk(&mut reader, buf)?;
            if n == 0 {
                engine.finish(prev, &spill)?;
                break;
            }
            chunks += 1;
            trace!("chunk #{chunks}: {n} byte(s) at offset {}", engine.cursor.offset);
            engine.feed(&buf[..n], prev, &mut spill)?;
            cur ^= 1;
        }

        let summary = ParseSummary {
            rows: engine.cursor.row,
            cells: engine.cells,
            bytes: engine.cursor.offset,
            chunks,
            headers: std::mem::take(&mut engine.headers),
        };
        debug!(
            "tokenized {} row(s), {} cell(s), {} byte(s) in {} chunk(s)",
            summary.rows, summary.cells, summary.bytes, summary.chunks
        );
        Ok(summary)
    }

    /// Tokenize in-memory text.
    pub fn parse_str(&mut self, text: &str) -> Result<ParseSummary> {
        self.parse(text.as_bytes())
    }

    /// Tokenize a file, decompressing it when its name or leading bytes say so.
    pub fn parse_path(&mut self, path: impl AsRef<Path>) -> anyhow::Result<ParseSummary> {
        let path = path.as_ref();
        let reader = source::open_path(path)?;
        self.parse(reader)
            .with_context(|| format!("tokenize {}", path.display()))
    }
}

/// Tokenize `reader` with `separator` and the given column consumers.
pub fn tokenize<'c, R: Read>(
    reader: R,
    separator: char,
    consumers: impl IntoIterator<Item = CellConsumer<'c>>,
) -> Result<ParseSummary> {
    Tokenizer::with_separator(separator)
        .columns(consumers)
        .parse(reader)
}

/// The buffer to read into next, and the one read before it.
fn split_pair(bufs: &mut [Vec<u8>; 2], cur: usize) -> (&mut Vec<u8>, &[u8]) {
    let [a, b] = bufs;
    if cur == 0 { (a, b.as_slice()) } else { (b, a.as_slice()) }
}

fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            other => return other.map_err(Error::Io),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_pair_alternates() {
        let mut bufs = [vec![1u8], vec![2u8]];
        {
            let (cur, prev) = split_pair(&mut bufs, 0);
            assert_eq!(cur[0], 1);
            assert_eq!(prev[0], 2);
        }
        let (cur, prev) = split_pair(&mut bufs, 1);
        assert_eq!(cur[0], 2);
        assert_eq!(prev[0], 1);
    }

    #[test]
    fn invalid_config_fails_before_reading() {
        let mut t = Tokenizer::with_separator('\n');
        assert!(matches!(t.parse_str("a\n"), Err(Error::InvalidConfig(_))));
    }
}
