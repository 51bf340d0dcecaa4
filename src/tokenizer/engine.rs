//! Byte-level state machine behind [`Tokenizer`](super::Tokenizer).
//!
//! The engine never owns input. Each call to [`Engine::feed`] gets the chunk
//! just read plus the chunk before it; a field cut by the end of a chunk is
//! remembered as a range of that chunk and joined with the rest of the field
//! through a [`ConcatView`] once its end shows up. Only a field spanning three
//! or more chunks is copied, into the spill buffer.

use crate::consumer::{CellConsumer, CellKind};
use crate::error::{Error, Result};
use crate::text::{CharSeq, ConcatView, TextWindow};
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    BeforeField,
    InField,
    InQuoted,
    /// Closing quote seen; bytes up to the separator are ignored.
    AfterField,
}

/// Where the already-read head of the open field lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Carry {
    Empty,
    /// `[start, end)` of the previous chunk.
    Prev { start: usize, end: usize },
    /// The whole spill buffer.
    Spill,
}

/// Position of the tokenizer within the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RowCursor {
    /// Zero-based index of the row being filled.
    pub(crate) row: usize,
    /// Zero-based index of the next field within the row.
    pub(crate) column: usize,
    /// Bytes consumed from the source so far.
    pub(crate) offset: u64,
}

pub(crate) struct Engine<'a, 'c> {
    separator: u8,
    quote: Option<u8>,
    state: FieldState,
    pending_cr: bool,
    field_start: usize,
    quote_end: usize,
    carry: Carry,
    pub(crate) cursor: RowCursor,
    pub(crate) cells: usize,
    in_header: bool,
    pub(crate) headers: Vec<String>,
    consumers: &'a mut [CellConsumer<'c>],
    on_row: Option<&'a mut (dyn FnMut(usize) + 'c)>,
}

#[inline]
fn is_terminator(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

impl<'a, 'c> Engine<'a, 'c> {
    pub(crate) fn new(
        separator: u8,
        quote: Option<u8>,
        has_headers: bool,
        consumers: &'a mut [CellConsumer<'c>],
        on_row: Option<&'a mut (dyn FnMut(usize) + 'c)>,
    ) -> Self {
        Self {
            separator,
            quote,
            state: FieldState::BeforeField,
            pending_cr: false,
            field_start: 0,
            quote_end: 0,
            carry: Carry::Empty,
            cursor: RowCursor::default(),
            cells: 0,
            in_header: has_headers,
            headers: Vec::new(),
            consumers,
            on_row,
        }
    }

    /// Run the state machine over one chunk.
    ///
    /// `prev` must be the chunk passed to the previous call, untouched.
    pub(crate) fn feed(&mut self, data: &[u8], prev: &[u8], spill: &mut Vec<u8>) -> Result<()> {
        // A field continuing from the previous chunk starts at 0 here.
        self.field_start = 0;
        self.quote_end = 0;

        for (i, &b) in data.iter().enumerate() {
            if std::mem::take(&mut self.pending_cr) && b == b'\n' {
                continue;
            }
            match self.state {
                FieldState::BeforeField => {
                    if Some(b) == self.quote {
                        self.state = FieldState::InQuoted;
                        self.field_start = i + 1;
                    } else if b == self.separator {
                        self.field_start = i;
                        self.close_field(data, prev, spill, i)?;
                    } else if is_terminator(b) {
                        // A bare terminator at column 0 is a blank line.
                        if self.cursor.column > 0 {
                            self.field_start = i;
                            self.close_field(data, prev, spill, i)?;
                            self.end_row()?;
                        }
                        self.pending_cr = b == b'\r';
                    } else {
                        self.state = FieldState::InField;
                        self.field_start = i;
                    }
                }
                FieldState::InField => {
                    if b == self.separator {
                        self.close_field(data, prev, spill, i)?;
                        self.state = FieldState::BeforeField;
                    } else if is_terminator(b) {
                        self.close_field(data, prev, spill, i)?;
                        self.end_row()?;
                        self.state = FieldState::BeforeField;
                        self.pending_cr = b == b'\r';
                    }
                }
                FieldState::InQuoted => {
                    if Some(b) == self.quote {
                        self.quote_end = i;
                        self.state = FieldState::AfterField;
                    }
                }
                FieldState::AfterField => {
                    if b == self.separator {
                        self.close_field(data, prev, spill, self.quote_end)?;
                        self.state = FieldState::BeforeField;
                    } else if is_terminator(b) {
                        self.close_field(data, prev, spill, self.quote_end)?;
                        self.end_row()?;
                        self.state = FieldState::BeforeField;
                        self.pending_cr = b == b'\r';
                    }
                }
            }
        }
        self.cursor.offset += data.len() as u64;

        let partial_end = match self.state {
            FieldState::BeforeField => return Ok(()),
            FieldState::InField | FieldState::InQuoted => data.len(),
            FieldState::AfterField => self.quote_end,
        };
        self.stash(data, prev, spill, partial_end);
        Ok(())
    }

    /// Close whatever is open once the source is exhausted.
    ///
    /// `prev` is the last chunk handed to [`feed`](Self::feed).
    pub(crate) fn finish(&mut self, prev: &[u8], spill: &[u8]) -> Result<()> {
        match self.state {
            FieldState::BeforeField if self.cursor.column == 0 => return Ok(()),
            FieldState::InQuoted => warn!(
                "input ended inside a quoted field at row {}, column {}",
                self.cursor.row, self.cursor.column
            ),
            _ => {}
        }
        self.field_start = 0;
        self.close_field(&[], prev, spill, 0)?;
        self.state = FieldState::BeforeField;
        self.end_row()
    }

    /// Remember `[field_start, end)` of `data` as the head of the open field.
    fn stash(&mut self, data: &[u8], prev: &[u8], spill: &mut Vec<u8>, end: usize) {
        let part = &data[self.field_start..end];
        self.carry = match self.carry {
            Carry::Empty => Carry::Prev {
                start: self.field_start,
                end,
            },
            Carry::Prev {
                start,
                end: prev_end,
            } => {
                // The next read reuses the previous chunk's buffer.
                spill.clear();
                spill.extend_from_slice(&prev[start..prev_end]);
                spill.extend_from_slice(part);
                Carry::Spill
            }
            Carry::Spill => {
                spill.extend_from_slice(part);
                Carry::Spill
            }
        };
    }

    fn close_field(&mut self, data: &[u8], prev: &[u8], spill: &[u8], end: usize) -> Result<()> {
        let mut window = TextWindow::new(data);
        window.reset_window(self.field_start, end);
        match std::mem::replace(&mut self.carry, Carry::Empty) {
            Carry::Empty => self.emit(&window),
            Carry::Prev {
                start,
                end: prev_end,
            } => {
                let mut head = TextWindow::new(prev);
                head.reset_window(start, prev_end);
                self.emit(&ConcatView::new(head, window))
            }
            Carry::Spill => self.emit(&ConcatView::new(TextWindow::over(spill), window)),
        }
    }

    fn emit<S: CharSeq + ?Sized>(&mut self, cell: &S) -> Result<()> {
        let column = self.cursor.column;
        self.cursor.column += 1;
        if self.in_header {
            self.headers.push(cell.to_text()?.into_owned());
            return Ok(());
        }
        if let Some(consumer) = self.consumers.get_mut(column) {
            consumer.accept(self.cursor.row, column, cell)?;
            if consumer.kind() != CellKind::Skip {
                self.cells += 1;
            }
        }
        Ok(())
    }

    fn end_row(&mut self) -> Result<()> {
        let columns = std::mem::take(&mut self.cursor.column);
        if self.in_header {
            self.in_header = false;
            return Ok(());
        }
        if columns < self.consumers.len() {
            return Err(Error::ColumnConsumerMismatch {
                row: self.cursor.row,
                columns,
                consumers: self.consumers.len(),
            });
        }
        if let Some(hook) = self.on_row.as_mut() {
            hook(self.cursor.row);
        }
        self.cursor.row += 1;
        Ok(())
    }
}
