//! Low-level building blocks for the ABINIT-MP output tokenizers.
//!
//! This crate is standalone: it knows nothing about the CPF or LOG layouts.
//! It provides the pieces every format tokenizer shares:
//!
//! - [`Cursor`]: byte position over a borrowed range, with line-level moves
//!   and a peek/commit primitive
//! - [`Grid`]: row/column counters and the cancellation cadence
//! - [`Token`], [`TokenKind`], [`Span`], [`NaValues`]: the output view
//! - [`Tokenizer`], [`Progress`]: the pull-based contract
//! - [`Interrupt`], [`Interrupted`]: cooperative cancellation
//! - [`parse_int_or_zero`]: the lenient count parser
//!
//! # Ownership
//!
//! Tokens borrow from the range passed to [`Tokenizer::reset`]. The buffer
//! cannot be mutated or dropped while any token from the session is alive.

mod cursor;
mod grid;
mod interrupt;
mod parse_helpers;
mod token;
mod tokenizer;

pub use cursor::{is_line_break, Cursor};
pub use grid::{Grid, Position, DEFAULT_POLL_INTERVAL};
pub use interrupt::{CancelFlag, Interrupt, Interrupted, NeverInterrupt};
pub use parse_helpers::{parse_count_or_zero, parse_int_or_zero};
pub use token::{NaValues, Span, Token, TokenKind};
pub use tokenizer::{Progress, Tokenizer};
