//! Readers and files that reproduce awkward input conditions.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Delivers its data at most `piece` bytes per `read` call.
///
/// Use it to force fields across chunk boundaries regardless of the
/// tokenizer's own chunk capacity.
#[derive(Debug, Clone)]
pub struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    piece: usize,
}

impl ChunkedReader {
    pub fn new(data: impl Into<Vec<u8>>, piece: usize) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            piece: piece.max(1),
        }
    }

    /// Number of `read` calls that will return data.
    pub fn pieces(&self) -> usize {
        self.data.len().div_ceil(self.piece)
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self
            .piece
            .min(buf.len())
            .min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Yields `data`, then fails every later read.
#[derive(Debug, Clone)]
pub struct FailingReader {
    data: Vec<u8>,
    pos: usize,
    kind: io::ErrorKind,
}

impl FailingReader {
    pub fn new(data: impl Into<Vec<u8>>, kind: io::ErrorKind) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            kind,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.data.len() {
            return Err(io::Error::new(self.kind, "injected read failure"));
        }
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Returns `Interrupted` before every successful read.
#[derive(Debug, Clone)]
pub struct InterruptingReader<R> {
    inner: R,
    interrupt_next: bool,
}

impl<R: Read> InterruptingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            interrupt_next: true,
        }
    }
}

impl<R: Read> Read for InterruptingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if std::mem::replace(&mut self.interrupt_next, false) {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        self.interrupt_next = true;
        self.inner.read(buf)
    }
}

/// A temporary file holding delimited text, removed on drop.
pub struct TempTextFile {
    #[allow(dead_code)]
    temp_file: NamedTempFile,
    path: PathBuf,
}

impl TempTextFile {
    /// Write `text` to a fresh file whose name ends in `suffix` (e.g. `".csv"`).
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn with_contents(suffix: &str, text: &str) -> io::Result<Self> {
        Self::with_bytes(suffix, text.as_bytes())
    }

    /// Write raw `bytes`, for instance an already-compressed payload.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn with_bytes(suffix: &str, bytes: &[u8]) -> io::Result<Self> {
        let mut temp_file = tempfile::Builder::new().suffix(suffix).tempfile()?;
        temp_file.write_all(bytes)?;
        temp_file.flush()?;
        let path = temp_file.path().to_path_buf();
        Ok(Self { temp_file, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
