//! Iterator adapter over a [`Tokenizer`].

use std::marker::PhantomData;

use fmo_lexer_core::{Interrupted, Token, Tokenizer};

/// Drives `next_token()` until EOF.
///
/// Yields every field token; the EOF token itself is not yielded. An
/// `Err(Interrupted)` is yielded once and ends the iteration.
pub struct Tokens<'t, 'a, T> {
    tokenizer: &'t mut T,
    done: bool,
    source: PhantomData<&'a [u8]>,
}

impl<'t, 'a, T: Tokenizer<'a>> Tokens<'t, 'a, T> {
    /// Iterate a tokenizer that has already been reset.
    pub fn new(tokenizer: &'t mut T) -> Self {
        Self {
            tokenizer,
            done: false,
            source: PhantomData,
        }
    }
}

impl<'a, T: Tokenizer<'a>> Iterator for Tokens<'_, 'a, T> {
    type Item = Result<Token<'a>, Interrupted>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.tokenizer.next_token() {
            Ok(token) if token.is_eof() => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Reset `tokenizer` over `source` and iterate its fields.
pub fn tokenize<'t, 'a, T: Tokenizer<'a>>(
    tokenizer: &'t mut T,
    source: &'a [u8],
) -> Tokens<'t, 'a, T> {
    tokenizer.reset(source);
    Tokens::new(tokenizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CpfTokenizer;
    use fmo_lexer_core::{Progress, Span, TokenKind};

    /// Yields one field, then fails on every later call.
    struct FailAfterOne {
        calls: usize,
    }

    impl<'a> Tokenizer<'a> for FailAfterOne {
        fn reset(&mut self, _source: &'a [u8]) {
            self.calls = 0;
        }

        fn next_token(&mut self) -> Result<Token<'a>, Interrupted> {
            self.calls += 1;
            if self.calls == 1 {
                Ok(Token::field(
                    Span::point(0),
                    b"",
                    fmo_lexer_core::Position::default(),
                    &fmo_lexer_core::NaValues::none(),
                ))
            } else {
                Err(Interrupted)
            }
        }

        fn progress(&self) -> Progress {
            Progress::default()
        }
    }

    #[test]
    fn eof_is_not_yielded() {
        let mut tokenizer = CpfTokenizer::new();
        let tokens: Vec<_> = tokenize(&mut tokenizer, b"CPF\n").collect();
        assert!(tokens.iter().all(Result::is_ok));
        assert!(tokens
            .iter()
            .flatten()
            .all(|t| t.kind != TokenKind::Eof));
        // The tokenizer itself is now at EOF.
        assert!(matches!(tokenizer.next_token(), Ok(t) if t.is_eof()));
    }

    #[test]
    fn error_ends_iteration() {
        let mut tokenizer = FailAfterOne { calls: 0 };
        let items: Vec<_> = tokenize(&mut tokenizer, b"").collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert_eq!(items[1], Err(Interrupted));
    }

    #[test]
    fn empty_source_yields_one_empty_field() {
        let mut tokenizer = CpfTokenizer::new();
        let items: Vec<_> = tokenize(&mut tokenizer, b"").collect();
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Ok(t) if t.kind == TokenKind::Empty));
    }
}
