use super::CharSeq;
use crate::error::WindowFault;
use log::warn;
use std::fmt;

/// A re-pointable view over a range of a borrowed byte buffer.
///
/// A window starts out *unset*: it is bound to a buffer but has no bounds, and
/// every read fails with [`WindowFault::Unset`]. [`reset_window`](Self::reset_window)
/// records a new `[start, end)` range in O(1) without touching the buffer, so a
/// single window can visit every cell of a chunk in turn.
///
/// `end == start` is an empty value, not an unset window.
///
/// Windows deliberately implement neither `PartialEq` nor `Hash`: the same
/// window means different text after every reset, so it is never a key.
#[derive(Clone, Copy)]
pub struct TextWindow<'s> {
    source: &'s [u8],
    bounds: Option<(usize, usize)>,
}

impl<'s> TextWindow<'s> {
    /// An unset window over `source`.
    pub fn new(source: &'s [u8]) -> Self {
        Self {
            source,
            bounds: None,
        }
    }

    /// A window spanning all of `source`.
    pub fn over(source: &'s [u8]) -> Self {
        Self {
            source,
            bounds: Some((0, source.len())),
        }
    }

    /// Point the window at `[start, end)` of its buffer.
    ///
    /// Only the bounds are recorded; a range past the end of the buffer is
    /// reported on the next read.
    #[inline]
    pub fn reset_window(&mut self, start: usize, end: usize) {
        debug_assert!(end >= start, "window end {end} before start {start}");
        self.bounds = Some((start, end));
    }

    /// Point the window at `[start, end)` of a different buffer.
    #[inline]
    pub fn repoint(&mut self, source: &'s [u8], start: usize, end: usize) {
        self.source = source;
        self.reset_window(start, end);
    }

    /// Whether the window has been given bounds since it was created.
    pub fn is_set(&self) -> bool {
        self.bounds.is_some()
    }

    /// Offset of the first byte in the buffer, or `None` while unset.
    pub fn start(&self) -> Option<usize> {
        self.bounds.map(|(s, _)| s)
    }

    /// Offset one past the last byte. Not checked against the buffer until a read.
    pub fn end(&self) -> Option<usize> {
        self.bounds.map(|(_, e)| e)
    }

    /// A new window over `[from, to)` of this one, sharing the same buffer.
    pub fn sub_sequence(&self, from: usize, to: usize) -> Result<TextWindow<'s>, WindowFault> {
        let (start, _) = self.bounds.ok_or(WindowFault::Unset)?;
        let len = self.len();
        if from > to || to > len {
            return Err(WindowFault::BadRange { from, to, len });
        }
        Ok(TextWindow {
            source: self.source,
            bounds: Some((start + from, start + to)),
        })
    }

    fn checked_bounds(&self) -> Result<(usize, usize), WindowFault> {
        let (start, end) = self.bounds.ok_or(WindowFault::Unset)?;
        if end > self.source.len() {
            return Err(WindowFault::Detached {
                end,
                source_len: self.source.len(),
            });
        }
        Ok((start, end))
    }
}

impl CharSeq for TextWindow<'_> {
    #[inline]
    fn len(&self) -> usize {
        match self.bounds {
            Some((start, end)) => end.saturating_sub(start),
            None => 0,
        }
    }

    #[inline]
    fn byte_at(&self, index: usize) -> Result<u8, WindowFault> {
        let (start, end) = self.bounds.ok_or(WindowFault::Unset)?;
        let len = end.saturating_sub(start);
        if index >= len {
            return Err(WindowFault::OutOfRange { index, len });
        }
        let abs = start + index;
        self.source.get(abs).copied().ok_or(WindowFault::Detached {
            end: abs + 1,
            source_len: self.source.len(),
        })
    }

    fn ensure_readable(&self) -> Result<(), WindowFault> {
        self.checked_bounds().map(|_| ())
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        let (start, end) = self.checked_bounds().ok()?;
        self.source.get(start..end)
    }

    fn append_to(&self, out: &mut Vec<u8>) -> Result<(), WindowFault> {
        let (start, end) = self.checked_bounds()?;
        out.extend_from_slice(&self.source[start..end]);
        Ok(())
    }
}

impl fmt::Display for TextWindow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Ok(text) => f.write_str(&text),
            Err(fault) => {
                warn!("rendering unusable text window as empty: {fault}");
                Ok(())
            }
        }
    }
}

impl fmt::Debug for TextWindow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextWindow")
            .field("bounds", &self.bounds)
            .field("source_len", &self.source.len())
            .finish()
    }
}
