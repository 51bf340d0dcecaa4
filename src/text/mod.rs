//! Non-owning text views used to hand cells to consumers without allocating.
//!
//! This module provides:
//! - [`CharSeq`]: the read contract shared by every view (length, indexed
//!   access, copy-on-demand text)
//! - [`TextWindow`]: a re-pointable `[start, end)` range over a borrowed buffer
//! - [`ConcatView`]: two sequences presented as one, used for cells that
//!   straddle a buffer reload
//! - [`SubSeq`]: a clipped range over any other sequence
//!
//! # Design notes
//! - Views are transient visitors, not values. None of them implement
//!   `PartialEq` or `Hash`, so they cannot end up as map keys by accident.
//! - Sequences are bytes of UTF-8 text. Separators and terminators are ASCII,
//!   and UTF-8 continuation bytes never collide with ASCII, so indexing by
//!   byte is exact for tokenization.

mod concat;
mod window;

pub use concat::ConcatView;
pub use window::TextWindow;

use crate::error::WindowFault;
use std::borrow::Cow;

/// Read access to a logical sequence of text bytes.
pub trait CharSeq {
    /// Number of bytes in the sequence.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at `index`, or a [`WindowFault`] when the read is not backed by data.
    fn byte_at(&self, index: usize) -> Result<u8, WindowFault>;

    /// Fail unless every index in `0..len()` is backed by data.
    ///
    /// Lets a reader tell an unusable view apart from an empty one before
    /// looking at any byte.
    fn ensure_readable(&self) -> Result<(), WindowFault> {
        Ok(())
    }

    /// The whole sequence as one slice, when it is stored contiguously.
    fn as_contiguous(&self) -> Option<&[u8]> {
        None
    }

    /// Append every byte of the sequence to `out`.
    fn append_to(&self, out: &mut Vec<u8>) -> Result<(), WindowFault> {
        if let Some(bytes) = self.as_contiguous() {
            out.extend_from_slice(bytes);
            return Ok(());
        }
        out.reserve(self.len());
        for i in 0..self.len() {
            out.push(self.byte_at(i)?);
        }
        Ok(())
    }

    /// Decode the sequence as text.
    ///
    /// Borrows when the sequence is contiguous and valid UTF-8; otherwise the
    /// bytes are copied once. Invalid UTF-8 is replaced with U+FFFD.
    fn to_text(&self) -> Result<Cow<'_, str>, WindowFault> {
        if let Some(bytes) = self.as_contiguous() {
            return Ok(String::from_utf8_lossy(bytes));
        }
        let mut buf = Vec::with_capacity(self.len());
        self.append_to(&mut buf)?;
        Ok(Cow::Owned(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Clip `[from, to)` out of this sequence without copying.
    fn sub_range(&self, from: usize, to: usize) -> Result<SubSeq<'_, Self>, WindowFault> {
        SubSeq::new(self, from, to)
    }
}

impl CharSeq for [u8] {
    #[inline]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    #[inline]
    fn byte_at(&self, index: usize) -> Result<u8, WindowFault> {
        self.get(index).copied().ok_or(WindowFault::OutOfRange {
            index,
            len: <[u8]>::len(self),
        })
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl CharSeq for str {
    #[inline]
    fn len(&self) -> usize {
        str::len(self)
    }

    #[inline]
    fn byte_at(&self, index: usize) -> Result<u8, WindowFault> {
        self.as_bytes().byte_at(index)
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

/// A `[start, end)` range of another sequence.
///
/// Produced by [`CharSeq::sub_range`]; indexes are relative to `start`.
pub struct SubSeq<'a, S: ?Sized> {
    seq: &'a S,
    start: usize,
    end: usize,
}

impl<'a, S: CharSeq + ?Sized> SubSeq<'a, S> {
    pub fn new(seq: &'a S, from: usize, to: usize) -> Result<Self, WindowFault> {
        let len = seq.len();
        if from > to || to > len {
            return Err(WindowFault::BadRange { from, to, len });
        }
        Ok(Self {
            seq,
            start: from,
            end: to,
        })
    }
}

impl<S: CharSeq + ?Sized> CharSeq for SubSeq<'_, S> {
    #[inline]
    fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    fn byte_at(&self, index: usize) -> Result<u8, WindowFault> {
        if index >= self.len() {
            return Err(WindowFault::OutOfRange {
                index,
                len: self.len(),
            });
        }
        self.seq.byte_at(self.start + index)
    }

    fn ensure_readable(&self) -> Result<(), WindowFault> {
        self.seq.ensure_readable()
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        self.seq
            .as_contiguous()
            .and_then(|bytes| bytes.get(self.start..self.end))
    }
}

impl<S: CharSeq + ?Sized> std::fmt::Debug for SubSeq<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubSeq")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}
