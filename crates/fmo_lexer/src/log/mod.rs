//! Tokenizer for ABINIT-MP LOG transcripts.
//!
//! A LOG file is free text. The tokenizer only recognises three things:
//!
//! - the **title**: the first line that is not blank or a dash banner;
//! - a **rule**: two or more `=` followed (after more `=`, blanks or line
//!   breaks) by `#`;
//! - a **section name**: the rest of the line after the `#` marker.
//!
//! The output alternates body text and section names:
//!
//! ```text
//! (0,0) title   (0,1) body before the first rule
//! (1,0) name 1  (1,1) body of section 1
//! (2,0) name 2  (2,1) body of section 2 ...
//! ```
//!
//! Each section name opens a new row. The body of the last section is
//! flushed when the input ends.
//!
//! Every slot of the layout is emitted, empty or not. A title followed
//! directly by a rule gives an empty `(0,1)` body, and a last section with
//! nothing after its name gives an empty body from the end-of-input flush:
//!
//! ```text
//! "Title line\n===#SectionOne\nbody\n===#SectionTwo\n"
//! (0,0) "Title line"  (0,1) ""
//! (1,0) "SectionOne"  (1,1) "body"
//! (2,0) "SectionTwo"  (2,1) ""
//! ```

use fmo_lexer_core::{
    is_line_break, Cursor, Grid, Interrupt, Interrupted, NeverInterrupt, Progress, Span, Token,
    Tokenizer,
};
use tracing::trace;

use crate::config::ScanConfig;

/// Scanner state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogState {
    /// Skipping blanks, dashes and line breaks before the title.
    TitleLead,
    /// Inside the title line.
    Title,
    /// Skipping blanks, dashes and line breaks after the title.
    TitleTail,
    /// Inside body text, looking for `=`.
    Body,
    /// One `=` seen.
    BodyEquals,
    /// A rule of two or more `=`; waiting for `#`.
    Rule,
    /// Skipping `#` and blanks before the section name.
    Hash,
    /// Inside the section-name line.
    Section,
    /// Skipping blanks, `=` and line breaks after the section name.
    SectionTail,
    /// The last field has been emitted; only EOF remains.
    Finished,
}

impl LogState {
    /// Whether the state is inside a field whose text would be lost if the
    /// input ended here.
    fn is_collecting(self) -> bool {
        matches!(
            self,
            Self::Title | Self::Body | Self::BodyEquals | Self::Rule | Self::Section
        )
    }
}

fn is_title_filler(byte: u8) -> bool {
    matches!(byte, b' ' | b'-' | b'\r' | b'\n')
}

fn is_rule_filler(byte: u8) -> bool {
    matches!(byte, b' ' | b'=' | b'\r' | b'\n')
}

/// Tokenizer for LOG transcripts.
pub struct LogTokenizer<'a, I = NeverInterrupt> {
    cursor: Cursor<'a>,
    grid: Grid,
    state: LogState,
    interrupted: bool,
    config: ScanConfig,
    interrupt: I,
}

impl LogTokenizer<'_> {
    /// Tokenizer with default settings and no cancellation.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default(), NeverInterrupt)
    }
}

impl Default for LogTokenizer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, I: Interrupt> LogTokenizer<'a, I> {
    /// Tokenizer with explicit settings and cancellation hook. Call
    /// [`reset`](Tokenizer::reset) before the first `next_token`.
    pub fn with_config(config: ScanConfig, interrupt: I) -> Self {
        Self {
            cursor: Cursor::new(&[]),
            grid: Grid::new(config.interrupt_interval),
            state: LogState::TitleLead,
            interrupted: false,
            config,
            interrupt,
        }
    }

    /// State the scanner is in between calls.
    pub fn state(&self) -> LogState {
        self.state
    }

    fn poll(&mut self) -> Result<(), Interrupted> {
        if let Err(e) = self.interrupt.check() {
            self.interrupted = true;
            return Err(e);
        }
        Ok(())
    }

    fn emit(&self, start: usize, end: usize) -> Token<'a> {
        let span = Span::new(start, end);
        let bytes = self.cursor.slice(span.start, span.end);
        Token::field(span, bytes, self.grid.position(), &self.config.na)
    }

    /// `end` pulled back over trailing ASCII whitespace, never before `start`.
    fn trim_end(&self, start: usize, end: usize) -> usize {
        let text = self.cursor.slice(start, end);
        text.iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(start, |last| start + last + 1)
    }

    fn eof(&self) -> Token<'a> {
        Token::eof(self.cursor.len(), self.grid.position())
    }
}

impl<'a, I: Interrupt> Tokenizer<'a> for LogTokenizer<'a, I> {
    fn reset(&mut self, source: &'a [u8]) {
        self.cursor = Cursor::new(source);
        self.grid = Grid::new(self.config.interrupt_interval);
        self.state = LogState::TitleLead;
        self.interrupted = false;
    }

    fn next_token(&mut self) -> Result<Token<'a>, Interrupted> {
        if self.interrupted {
            return Err(Interrupted);
        }
        if self.state == LogState::Finished {
            return Ok(self.eof());
        }

        let mut start = self.cursor.pos();
        let mut rule_start = start;

        // Arms that hand the current byte to the next state `continue`
        // without advancing, so the new state sees it too.
        while let Some(byte) = self.cursor.current() {
            if self.grid.poll_due() {
                self.poll()?;
            }

            match self.state {
                LogState::TitleLead => {
                    if !is_title_filler(byte) {
                        start = self.cursor.pos();
                        self.state = LogState::Title;
                        continue;
                    }
                }
                LogState::Title => {
                    if is_line_break(byte) {
                        self.state = LogState::TitleTail;
                        let token = self.emit(start, self.cursor.pos());
                        trace!(span = %token.span, "LOG title");
                        return Ok(token);
                    }
                    self.cursor.skip_to_line_break();
                    continue;
                }
                LogState::TitleTail | LogState::SectionTail => {
                    let filler = if self.state == LogState::TitleTail {
                        is_title_filler(byte)
                    } else {
                        is_rule_filler(byte)
                    };
                    if !filler {
                        start = self.cursor.pos();
                        rule_start = start;
                        self.state = LogState::Body;
                        continue;
                    }
                }
                LogState::Body => {
                    if byte != b'=' {
                        self.cursor.skip_to(b'=');
                        continue;
                    }
                    rule_start = self.cursor.pos();
                    self.state = LogState::BodyEquals;
                }
                LogState::BodyEquals => {
                    self.state = if byte == b'=' {
                        LogState::Rule
                    } else {
                        LogState::Body
                    };
                }
                LogState::Rule => match byte {
                    b'#' => {
                        self.cursor.advance();
                        self.state = LogState::Hash;
                        self.grid.new_field();
                        let end = self.trim_end(start, rule_start);
                        return Ok(self.emit(start, end));
                    }
                    b if is_rule_filler(b) => {}
                    _ => self.state = LogState::Body,
                },
                LogState::Hash => {
                    if byte != b'#' && byte != b' ' {
                        start = self.cursor.pos();
                        self.state = LogState::Section;
                        continue;
                    }
                }
                LogState::Section => {
                    if is_line_break(byte) {
                        self.state = LogState::SectionTail;
                        self.grid.new_record();
                        let token = self.emit(start, self.cursor.pos());
                        trace!(row = token.row, span = %token.span, "LOG section");
                        return Ok(token);
                    }
                    self.cursor.skip_to_line_break();
                    continue;
                }
                LogState::Finished => return Ok(self.eof()),
            }
            self.cursor.advance();
        }

        // End of input: flush whatever field was open. A title or section
        // name cut short keeps the slot it would have had.
        let end = self.cursor.len();
        let start = if self.state.is_collecting() { start } else { end };
        match self.state {
            LogState::TitleLead | LogState::Title => {}
            LogState::Hash | LogState::Section => self.grid.new_record(),
            _ => self.grid.new_field(),
        }
        self.state = LogState::Finished;
        let end = self.trim_end(start, end);
        let token = self.emit(start, end);
        trace!(row = token.row, col = token.col, span = %token.span, "LOG flush");
        Ok(token)
    }

    fn progress(&self) -> Progress {
        Progress::new(
            self.cursor.pos(),
            self.cursor.len(),
            self.state == LogState::Finished,
        )
    }
}
