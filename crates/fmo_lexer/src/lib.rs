//! Tokenizers for ABINIT-MP output files.
//!
//! Two formats are supported:
//!
//! - [`CpfTokenizer`]: the positional CPF report, one field per section
//! - [`LogTokenizer`]: the free-text LOG transcript, split into a title,
//!   section names and section bodies
//!
//! Both implement [`Tokenizer`] and are driven one field at a time. Use
//! [`SourceFormat`] to pick one at runtime and [`tokenize`] to iterate.
//!
//! ```text
//! let mut tokenizer = CpfTokenizer::new();
//! for token in tokenize(&mut tokenizer, bytes) {
//!     let token = token?;
//!     println!("{} {:?}", token.col, token.as_str());
//! }
//! ```

mod config;
pub mod cpf;
pub mod format;
pub mod log;
mod tokens;

pub use config::ScanConfig;
pub use cpf::{CpfState, CpfTokenizer};
pub use format::{AnyTokenizer, SourceFormat, UnknownFormat};
pub use log::{LogState, LogTokenizer};
pub use tokens::{tokenize, Tokens};

pub use fmo_lexer_core::{
    CancelFlag, Interrupt, Interrupted, NaValues, NeverInterrupt, Position, Progress, Span, Token,
    TokenKind, Tokenizer,
};
