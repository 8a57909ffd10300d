//! The pull-based contract shared by every format tokenizer.

use crate::interrupt::Interrupted;
use crate::token::Token;

/// How much of the range a tokenizer has consumed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Progress {
    /// `consumed / len`, in `0.0..=1.0`.
    pub fraction: f64,
    /// Bytes consumed so far.
    pub consumed: usize,
}

impl Progress {
    /// Progress after consuming `consumed` of `len` bytes.
    ///
    /// An empty range has nothing to report until it has been fully
    /// tokenized (`done`), at which point it reports 1.0.
    #[allow(
        clippy::cast_precision_loss,
        reason = "a UI fraction does not need more than 52 bits"
    )]
    pub fn new(consumed: usize, len: usize, done: bool) -> Self {
        let fraction = if len == 0 {
            if done {
                1.0
            } else {
                0.0
            }
        } else {
            consumed as f64 / len as f64
        };
        Self { fraction, consumed }
    }
}

/// A stateful tokenizer over one borrowed byte range at a time.
///
/// # Protocol
///
/// 1. [`reset`](Self::reset) with the whole file.
/// 2. Call [`next_token`](Self::next_token) until it returns a token with
///    [`TokenKind::Eof`](crate::TokenKind::Eof); every later call returns
///    EOF again.
/// 3. [`progress`](Self::progress) may be polled at any point.
///
/// `Err(Interrupted)` means the cancellation hook fired. The session is then
/// dead: further calls return `Err(Interrupted)` until the next `reset`.
pub trait Tokenizer<'a> {
    /// Start a new session over `source`. No state survives from the
    /// previous session.
    fn reset(&mut self, source: &'a [u8]);

    /// Produce the next field token, or EOF.
    fn next_token(&mut self) -> Result<Token<'a>, Interrupted>;

    /// Consumption so far. `(0.0, 0)` before the first `next_token`.
    fn progress(&self) -> Progress;
}
