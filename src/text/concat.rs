use super::{CharSeq, SubSeq};
use crate::error::WindowFault;
use std::fmt;

/// Two sequences presented as one.
///
/// Indexing goes to `left` while `index < left.len()`, then to `right` at
/// `index - left.len()`. Nothing is copied; the tokenizer uses this for a cell
/// whose bytes arrived in two separate reads.
pub struct ConcatView<L, R> {
    left: L,
    right: R,
}

impl<L: CharSeq, R: CharSeq> ConcatView<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }

    /// `[from, to)` of the combined sequence, again as a concatenation.
    ///
    /// When the range lies entirely on one side, the other side of the result
    /// is empty.
    pub fn sub_sequence(
        &self,
        from: usize,
        to: usize,
    ) -> Result<ConcatView<SubSeq<'_, L>, SubSeq<'_, R>>, WindowFault> {
        let len = self.len();
        if from > to || to > len {
            return Err(WindowFault::BadRange { from, to, len });
        }
        let split = self.left.len();
        let left = self.left.sub_range(from.min(split), to.min(split))?;
        let right = self
            .right
            .sub_range(from.saturating_sub(split), to.saturating_sub(split))?;
        Ok(ConcatView::new(left, right))
    }
}

impl<L: CharSeq, R: CharSeq> CharSeq for ConcatView<L, R> {
    #[inline]
    fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    #[inline]
    fn byte_at(&self, index: usize) -> Result<u8, WindowFault> {
        let split = self.left.len();
        if index < split {
            return self.left.byte_at(index);
        }
        if index >= self.len() {
            return Err(WindowFault::OutOfRange {
                index,
                len: self.len(),
            });
        }
        self.right.byte_at(index - split)
    }

    fn ensure_readable(&self) -> Result<(), WindowFault> {
        self.left.ensure_readable()?;
        self.right.ensure_readable()
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        if self.left.is_empty() {
            self.right.as_contiguous()
        } else if self.right.is_empty() {
            self.left.as_contiguous()
        } else {
            None
        }
    }

    fn append_to(&self, out: &mut Vec<u8>) -> Result<(), WindowFault> {
        self.left.append_to(out)?;
        self.right.append_to(out)
    }
}

impl<L: CharSeq, R: CharSeq> fmt::Debug for ConcatView<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcatView")
            .field("left_len", &self.left.len())
            .field("right_len", &self.right.len())
            .finish()
    }
}
