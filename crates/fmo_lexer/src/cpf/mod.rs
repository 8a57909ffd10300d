//! Tokenizer for ABINIT-MP CPF reports.
//!
//! A CPF file is one record laid out positionally. After the version line
//! and the count line, every section's length in lines is derived from two
//! integers read from the count line itself:
//!
//! ```text
//! VERSION                  1 line
//! N_ATOM | N_FRAG          1 line: columns [0,5) and the rest of the line
//! ATOM_INFO                n_atom lines
//! N_ELEC                   ceil(n_frag / 16) lines
//! FRAG_CHARGE              ceil(n_frag / 16) lines
//! BINDING                  up to n_atom lines of <= 12 bytes
//! DISTANCE                 n_frag * (n_frag - 1) / 2 lines
//! DIPOLE                   n_frag lines
//! BASIS, STATE, METHOD     1 line each
//! PARAM_*                  1 line: columns [0,22), [23,41), [42,eol)
//! NUC/ELEC/TOTAL_ENERGY    1 line each
//! MONOMER                  n_frag lines
//! IFIE                     n_frag * (n_frag - 1) / 2 lines
//! MULTI_BODY               everything that is left
//! ```
//!
//! Multi-line sections include their line terminators; single-line fields
//! do not. All fields share row 0; `col` is the field index.

use fmo_lexer_core::{
    parse_count_or_zero, Cursor, Grid, Interrupt, Interrupted, NeverInterrupt, Progress, Span,
    Token, Tokenizer,
};
use tracing::{debug, trace};

use crate::config::ScanConfig;

/// Width of the atom count at the start of the count line.
const N_ATOM_WIDTH: usize = 5;
/// Fragments per line in the N_ELEC and FRAG_CHARGE blocks.
const FRAGS_PER_LINE: usize = 16;
/// BINDING lines are at most this long; the first longer line belongs to
/// DISTANCE.
const MAX_BINDING_LINE: usize = 12;

// Column layout of the approximation-parameter line.
const AO_POP_END: usize = 22;
const POINT_CHARGE_START: usize = 23;
const POINT_CHARGE_END: usize = 41;
const DIMER_ES_START: usize = 42;

/// Scanner state: the section the next call will produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CpfState {
    Version,
    NAtom,
    NFrag,
    AtomInfo,
    NElec,
    FragCharge,
    Binding,
    Distance,
    Dipole,
    Basis,
    State,
    Method,
    ParamAoPopAprx,
    ParamPointChargeAprx,
    ParamDimerEsAprx,
    NucEnergy,
    ElecEnergy,
    TotalEnergy,
    Monomer,
    Ifie,
    MultiBody,
    /// The last field has been emitted; only EOF remains.
    Finished,
}

impl CpfState {
    /// Successor in the fixed section order.
    pub const fn next(self) -> Self {
        match self {
            Self::Version => Self::NAtom,
            Self::NAtom => Self::NFrag,
            Self::NFrag => Self::AtomInfo,
            Self::AtomInfo => Self::NElec,
            Self::NElec => Self::FragCharge,
            Self::FragCharge => Self::Binding,
            Self::Binding => Self::Distance,
            Self::Distance => Self::Dipole,
            Self::Dipole => Self::Basis,
            Self::Basis => Self::State,
            Self::State => Self::Method,
            Self::Method => Self::ParamAoPopAprx,
            Self::ParamAoPopAprx => Self::ParamPointChargeAprx,
            Self::ParamPointChargeAprx => Self::ParamDimerEsAprx,
            Self::ParamDimerEsAprx => Self::NucEnergy,
            Self::NucEnergy => Self::ElecEnergy,
            Self::ElecEnergy => Self::TotalEnergy,
            Self::TotalEnergy => Self::Monomer,
            Self::Monomer => Self::Ifie,
            Self::Ifie => Self::MultiBody,
            Self::MultiBody | Self::Finished => Self::Finished,
        }
    }
}

/// Number of fragment pairs, `n * (n - 1) / 2`, saturating.
fn pair_count(n_frag: usize) -> usize {
    let pairs = n_frag.saturating_mul(n_frag.saturating_sub(1));
    pairs / 2
}

/// Tokenizer for CPF reports.
///
/// The atom and fragment counts are parsed once per session from the count
/// line and never change afterwards. Malformed counts parse as 0, and every
/// line skip stops at the end of the range, so arbitrary input terminates
/// in at most one call per state plus the EOF call.
pub struct CpfTokenizer<'a, I = NeverInterrupt> {
    cursor: Cursor<'a>,
    grid: Grid,
    state: CpfState,
    n_atom: usize,
    n_frag: usize,
    /// Offset of the parameter line; the PARAM_* fields are column slices
    /// of it.
    param_line: usize,
    interrupted: bool,
    config: ScanConfig,
    interrupt: I,
}

impl CpfTokenizer<'_> {
    /// Tokenizer with default settings and no cancellation.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default(), NeverInterrupt)
    }
}

impl Default for CpfTokenizer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, I: Interrupt> CpfTokenizer<'a, I> {
    /// Tokenizer with explicit settings and cancellation hook. Call
    /// [`reset`](Tokenizer::reset) before the first `next_token`.
    pub fn with_config(config: ScanConfig, interrupt: I) -> Self {
        Self {
            cursor: Cursor::new(&[]),
            grid: Grid::new(config.interrupt_interval),
            state: CpfState::Version,
            n_atom: 0,
            n_frag: 0,
            param_line: 0,
            interrupted: false,
            config,
            interrupt,
        }
    }

    /// Section the next call will produce.
    pub fn state(&self) -> CpfState {
        self.state
    }

    /// Atom count parsed from the count line (0 until it has been read).
    pub fn atom_count(&self) -> usize {
        self.n_atom
    }

    /// Fragment count parsed from the count line (0 until it has been read).
    pub fn fragment_count(&self) -> usize {
        self.n_frag
    }

    fn poll(&mut self) -> Result<(), Interrupted> {
        if let Err(e) = self.interrupt.check() {
            self.interrupted = true;
            return Err(e);
        }
        Ok(())
    }

    fn emit(&mut self, start: usize, end: usize) -> Token<'a> {
        let span = Span::new(start, end);
        let bytes = self.cursor.slice(span.start, span.end);
        let token = Token::field(span, bytes, self.grid.position(), &self.config.na);
        self.grid.new_field();
        token
    }

    /// Field covering the rest of the current line, terminator excluded.
    fn rest_of_line(&mut self) -> Token<'a> {
        let start = self.cursor.pos();
        let end = self.cursor.eat_line();
        self.emit(start, end)
    }

    /// Field covering `n` whole lines, terminators included.
    fn lines(&mut self, n: usize) -> Token<'a> {
        let start = self.cursor.pos();
        self.cursor.eat_lines(n);
        let end = self.cursor.pos();
        self.emit(start, end)
    }

    /// Field covering columns `from..to` of the parameter line, clamped to
    /// the line. `None` runs to the end of the line and consumes the
    /// terminator.
    fn columns(&mut self, from: usize, to: Option<usize>) -> Token<'a> {
        let target = self.param_line.saturating_add(from);
        let pos = self.cursor.pos();
        if pos < target {
            self.cursor.eat_within_line(target - pos);
        }
        let start = self.cursor.pos();
        let end = match to {
            Some(to) => {
                let limit = self.param_line.saturating_add(to);
                self.cursor.eat_within_line(limit.saturating_sub(start))
            }
            None => self.cursor.eat_line(),
        };
        self.emit(start, end)
    }

    /// Consume BINDING lines until one is longer than [`MAX_BINDING_LINE`].
    ///
    /// The long line is left unconsumed and the lines before it become the
    /// field. If no long line shows up within `n_atom` lines there is no
    /// field: the lines are skipped and DISTANCE starts where they end.
    fn binding(&mut self) -> Option<Token<'a>> {
        let start = self.cursor.pos();
        for _ in 0..self.n_atom {
            if self.cursor.is_eof() {
                break;
            }
            if !self.cursor.eat_line_if(|line| line.len() <= MAX_BINDING_LINE) {
                let end = self.cursor.pos();
                return Some(self.emit(start, end));
            }
        }
        trace!(
            skipped = self.cursor.pos() - start,
            "no long line within BINDING bound, continuing with DISTANCE"
        );
        None
    }

    /// Emit everything from `start` to the end of the range as the last
    /// field.
    fn finish(&mut self, start: usize) -> Token<'a> {
        self.state = CpfState::Finished;
        self.cursor.seek_end();
        let end = self.cursor.len();
        self.emit(start, end)
    }

    fn eof(&self) -> Token<'a> {
        Token::eof(self.cursor.len(), self.grid.position())
    }
}

impl<'a, I: Interrupt> Tokenizer<'a> for CpfTokenizer<'a, I> {
    fn reset(&mut self, source: &'a [u8]) {
        self.cursor = Cursor::new(source);
        self.grid = Grid::new(self.config.interrupt_interval);
        self.state = CpfState::Version;
        self.n_atom = 0;
        self.n_frag = 0;
        self.param_line = 0;
        self.interrupted = false;
    }

    fn next_token(&mut self) -> Result<Token<'a>, Interrupted> {
        if self.interrupted {
            return Err(Interrupted);
        }

        loop {
            if self.state == CpfState::Finished {
                return Ok(self.eof());
            }
            if self.cursor.is_eof() {
                // Range exhausted before the layout was: flush an empty field.
                let pos = self.cursor.pos();
                let token = self.finish(pos);
                trace!(span = %token.span, "CPF input ended early");
                return Ok(token);
            }

            // Once per state, and again whenever the grid cadence is due.
            self.poll()?;
            if self.grid.poll_due() {
                self.poll()?;
            }

            let state = self.state;
            self.state = state.next();
            let token = match state {
                CpfState::Version
                | CpfState::Basis
                | CpfState::State
                | CpfState::Method
                | CpfState::NucEnergy
                | CpfState::ElecEnergy
                | CpfState::TotalEnergy => Some(self.rest_of_line()),
                CpfState::NAtom => {
                    let start = self.cursor.pos();
                    let end = self.cursor.eat_within_line(N_ATOM_WIDTH);
                    let token = self.emit(start, end);
                    self.n_atom = parse_count_or_zero(token.as_bytes());
                    Some(token)
                }
                CpfState::NFrag => {
                    // Rest of the count line; a blank remainder counts as 0.
                    let token = self.rest_of_line();
                    self.n_frag = parse_count_or_zero(token.as_bytes());
                    debug!(
                        atoms = self.n_atom,
                        fragments = self.n_frag,
                        "parsed CPF counts"
                    );
                    Some(token)
                }
                CpfState::AtomInfo => Some(self.lines(self.n_atom)),
                CpfState::NElec | CpfState::FragCharge => {
                    Some(self.lines(self.n_frag.div_ceil(FRAGS_PER_LINE)))
                }
                CpfState::Binding => self.binding(),
                CpfState::Distance | CpfState::Ifie => Some(self.lines(pair_count(self.n_frag))),
                CpfState::Dipole | CpfState::Monomer => Some(self.lines(self.n_frag)),
                CpfState::ParamAoPopAprx => {
                    self.param_line = self.cursor.pos();
                    Some(self.columns(0, Some(AO_POP_END)))
                }
                CpfState::ParamPointChargeAprx => {
                    Some(self.columns(POINT_CHARGE_START, Some(POINT_CHARGE_END)))
                }
                CpfState::ParamDimerEsAprx => Some(self.columns(DIMER_ES_START, None)),
                CpfState::MultiBody => {
                    let pos = self.cursor.pos();
                    Some(self.finish(pos))
                }
                CpfState::Finished => Some(self.eof()),
            };

            if let Some(token) = token {
                trace!(state = ?state, span = %token.span, col = token.col, "CPF field");
                return Ok(token);
            }
        }
    }

    fn progress(&self) -> Progress {
        Progress::new(
            self.cursor.pos(),
            self.cursor.len(),
            self.state == CpfState::Finished,
        )
    }
}
