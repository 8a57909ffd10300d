//! Field tokens handed to the column-binding layer.
//!
//! A [`Token`] is a view: byte offsets into the range passed to
//! [`Tokenizer::reset`](crate::Tokenizer::reset), the borrowed bytes
//! themselves, the table coordinates, and a [`TokenKind`] tag. Nothing is
//! copied or converted here; turning the bytes into a typed value is the
//! consumer's job.

use std::fmt;

use crate::grid::Position;

/// Byte range `start..end`, relative to the start of the scanned range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span. `start` is clamped to `end`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end,
        }
    }

    /// Zero-length span at `pos`.
    #[inline]
    pub fn point(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// What a token carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A field with at least one byte.
    Field,
    /// A zero-length field.
    Empty,
    /// A field whose bytes equal one of the configured NA sentinels.
    Missing,
    /// End of input. Every call after the last field returns this.
    Eof,
}

/// One lexical unit: a borrowed byte range plus its table coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub span: Span,
    pub row: usize,
    pub col: usize,
    bytes: &'a [u8],
}

impl<'a> Token<'a> {
    /// Build a field token over `bytes` (which must be the contents of
    /// `span`), flagging it [`TokenKind::Missing`] when `na` matches.
    pub fn field(span: Span, bytes: &'a [u8], at: Position, na: &NaValues) -> Self {
        debug_assert_eq!(span.len(), bytes.len(), "span and bytes disagree");
        let kind = if na.matches(bytes) {
            TokenKind::Missing
        } else if bytes.is_empty() {
            TokenKind::Empty
        } else {
            TokenKind::Field
        };
        Self {
            kind,
            span,
            row: at.row,
            col: at.col,
            bytes,
        }
    }

    /// The end-of-input token, positioned at `offset`.
    pub fn eof(offset: usize, at: Position) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::point(offset),
            row: at.row,
            col: at.col,
            bytes: &[],
        }
    }

    /// The field bytes. Empty for [`TokenKind::Eof`].
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The field as UTF-8, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.bytes).ok()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    #[inline]
    pub fn is_na(&self) -> bool {
        self.kind == TokenKind::Missing
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position {
            row: self.row,
            col: self.col,
        }
    }
}

/// Exact-match set of strings that stand in for a missing value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NaValues {
    values: Vec<Box<[u8]>>,
}

impl NaValues {
    /// Build a sentinel set from any list of strings or byte strings.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        Self {
            values: values
                .into_iter()
                .map(|v| Box::<[u8]>::from(v.as_ref()))
                .collect(),
        }
    }

    /// A set that never matches.
    pub fn none() -> Self {
        Self { values: Vec::new() }
    }

    /// Returns `true` if `bytes` equals one of the sentinels exactly.
    #[inline]
    pub fn matches(&self, bytes: &[u8]) -> bool {
        self.values.iter().any(|v| v.as_ref() == bytes)
    }
}

impl Default for NaValues {
    /// ABINIT-MP writes `-` for values it did not compute.
    fn default() -> Self {
        Self::new(["-"])
    }
}
