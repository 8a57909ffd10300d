//! Line-oriented cursor over a borrowed byte range.
//!
//! Both tokenizers scan the same way: jump to the next line terminator,
//! count whole lines, or slice a fixed number of columns out of the
//! current line. The cursor owns that bookkeeping so the per-format state
//! machines only decide *how far* to move.
//!
//! # Bounds
//!
//! Every operation clamps at the end of the range. A degenerate request
//! (`eat_lines(usize::MAX)`, `advance_n` past the end) stops at
//! [`len()`](Cursor::len) instead of reading further.
//!
//! # Line Terminators
//!
//! `\n`, `\r` and `\r\n` each end a line. A `\r\n` pair is a single
//! terminator.

/// Cursor over one immutable byte range.
///
/// The cursor is [`Copy`], so taking a snapshot before a speculative scan is
/// a plain copy and rolling back is an assignment.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    /// Current read position, `0..=buf.len()`.
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at offset 0 of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the byte at the current position, or `None` at the end.
    #[inline]
    pub fn current(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Advance by one byte (no-op at the end).
    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.buf.len() {
            self.pos += 1;
        }
    }

    /// Advance by up to `n` bytes, stopping at the end.
    #[inline]
    pub fn advance_n(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.buf.len());
    }

    /// Returns `true` once every byte has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Current byte offset from the start of the range.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Length of the range.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Move to the end of the range.
    pub fn seek_end(&mut self) {
        self.pos = self.buf.len();
    }

    /// Borrow `start..end` from the range.
    ///
    /// Both bounds are clamped to the range, and `start` to `end`, so the
    /// result is always a valid (possibly empty) sub-slice.
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        let end = end.min(self.buf.len());
        let start = start.min(end);
        &self.buf[start..end]
    }

    /// Offset of the next `\r` or `\n` at or after the cursor, or the end
    /// of the range when the line is unterminated.
    #[inline]
    pub fn line_end(&self) -> usize {
        let remaining = &self.buf[self.pos..];
        match memchr::memchr2(b'\r', b'\n', remaining) {
            Some(offset) => self.pos + offset,
            None => self.buf.len(),
        }
    }

    /// Move past the current line and its terminator.
    ///
    /// Returns the offset where the line content ends (the terminator's
    /// position, or the end of the range).
    pub fn eat_line(&mut self) -> usize {
        let content_end = self.line_end();
        self.pos = content_end;
        self.eat_line_break();
        content_end
    }

    /// Consume up to `n` whole lines, stopping early at the end of the range.
    ///
    /// Returns the number of lines actually consumed.
    pub fn eat_lines(&mut self, n: usize) -> usize {
        let mut eaten = 0;
        while eaten < n && !self.is_eof() {
            self.eat_line();
            eaten += 1;
        }
        eaten
    }

    /// Peek at the next line and consume it only if `keep` accepts its
    /// content (terminator excluded).
    ///
    /// On rejection the cursor is left exactly where it was, at the start
    /// of the rejected line. Returns whether the line was consumed.
    pub fn eat_line_if(&mut self, keep: impl FnOnce(&'a [u8]) -> bool) -> bool {
        let snapshot = *self;
        let start = self.pos;
        let content_end = self.eat_line();
        if keep(&self.buf[start..content_end]) {
            true
        } else {
            *self = snapshot;
            false
        }
    }

    /// Advance by up to `n` bytes without crossing the current line's
    /// terminator. Returns the new position.
    pub fn eat_within_line(&mut self, n: usize) -> usize {
        let limit = self.line_end();
        self.pos = self.pos.saturating_add(n).min(limit);
        self.pos
    }

    /// Consume one line terminator (`\r\n`, `\r` or `\n`) if the cursor is
    /// on one. Returns whether anything was consumed.
    pub fn eat_line_break(&mut self) -> bool {
        match self.current() {
            Some(b'\r') => {
                self.pos += 1;
                if self.current() == Some(b'\n') {
                    self.pos += 1;
                }
                true
            }
            Some(b'\n') => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Jump to the next occurrence of `byte`, or to the end of the range.
    ///
    /// Uses `memchr` so long runs of uninteresting text are skipped without
    /// a per-byte loop.
    #[inline]
    pub fn skip_to(&mut self, byte: u8) {
        let remaining = &self.buf[self.pos..];
        match memchr::memchr(byte, remaining) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.buf.len(),
        }
    }

    /// Jump to the next `\r` or `\n`, or to the end of the range.
    #[inline]
    pub fn skip_to_line_break(&mut self) {
        self.pos = self.line_end();
    }
}

/// Returns `true` for `\r` and `\n`.
#[inline]
pub fn is_line_break(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}
