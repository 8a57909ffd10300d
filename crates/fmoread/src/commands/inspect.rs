//! Inspection commands: `lex` and `fields`.

use std::io::Write;
use std::path::Path;

use fmo_lexer::{SourceFormat, Token, TokenKind, Tokenizer};
use tracing::debug;

use super::{read_file, ScanOptions};
use crate::CliError;

/// Tokenize a file and list every token with its span and grid position.
pub fn lex_file(path: &str, options: &ScanOptions, out: &mut impl Write) -> Result<(), CliError> {
    scan(
        path,
        options,
        out,
        |out, format| writeln!(out, "Tokens for '{path}' ({format}):"),
        |out, token| {
            writeln!(
                out,
                "  {:?} {} @ {}:{}",
                token.kind, token.span, token.row, token.col
            )
        },
    )
}

/// Tokenize a file and print `row<TAB>col<TAB>text` per field.
///
/// Field text is escaped so multi-line sections stay on one line; NA
/// fields print as `NA`.
pub fn fields_file(
    path: &str,
    options: &ScanOptions,
    out: &mut impl Write,
) -> Result<(), CliError> {
    scan(
        path,
        options,
        out,
        |out, _| writeln!(out, "row\tcol\ttext"),
        |out, token| match token.kind {
            TokenKind::Eof => Ok(()),
            TokenKind::Missing => writeln!(out, "{}\t{}\tNA", token.row, token.col),
            TokenKind::Field | TokenKind::Empty => writeln!(
                out,
                "{}\t{}\t{}",
                token.row,
                token.col,
                token.as_bytes().escape_ascii()
            ),
        },
    )
}

/// Read `path`, print a header, then hand every token (EOF included) to
/// `line`.
fn scan<W: Write>(
    path: &str,
    options: &ScanOptions,
    out: &mut W,
    header: impl FnOnce(&mut W, SourceFormat) -> std::io::Result<()>,
    mut line: impl FnMut(&mut W, &Token<'_>) -> std::io::Result<()>,
) -> Result<(), CliError> {
    let source = read_file(path)?;
    let format = options.resolve_format(Path::new(path), &source);
    debug!(path, %format, bytes = source.len(), "tokenizing");

    let mut tokenizer = options.tokenizer(format);
    tokenizer.reset(&source);

    header(out, format)?;
    let mut fields = 0_usize;
    loop {
        let token = tokenizer
            .next_token()
            .map_err(|source| CliError::Interrupted {
                path: path.to_string(),
                source,
            })?;
        line(out, &token)?;
        if token.is_eof() {
            break;
        }
        fields += 1;
    }

    let progress = tokenizer.progress();
    debug!(
        fields,
        consumed = progress.consumed,
        fraction = progress.fraction,
        "done"
    );
    Ok(())
}
