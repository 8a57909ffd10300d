//! Picking a tokenizer at runtime.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use fmo_lexer_core::{Interrupt, Interrupted, Progress, Token, Tokenizer};

use crate::config::ScanConfig;
use crate::cpf::CpfTokenizer;
use crate::log::LogTokenizer;

/// The two ABINIT-MP output layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Cpf,
    Log,
}

impl SourceFormat {
    /// Format implied by a file extension (`.cpf` / `.log`, any case).
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Guess from content: CPF files open with a `CPF` version line,
    /// anything else is treated as a LOG transcript.
    pub fn sniff(source: &[u8]) -> Self {
        let first = source
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .map_or(&[][..], |i| &source[i..]);
        if first.len() >= 3 && first[..3].eq_ignore_ascii_case(b"CPF") {
            Self::Cpf
        } else {
            Self::Log
        }
    }

    /// Build the matching tokenizer.
    pub fn tokenizer<'a, I: Interrupt>(
        self,
        config: ScanConfig,
        interrupt: I,
    ) -> AnyTokenizer<'a, I> {
        match self {
            Self::Cpf => AnyTokenizer::Cpf(CpfTokenizer::with_config(config, interrupt)),
            Self::Log => AnyTokenizer::Log(LogTokenizer::with_config(config, interrupt)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Cpf => "cpf",
            Self::Log => "log",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a format name that is neither `cpf` nor `log`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown format '{0}' (expected 'cpf' or 'log')")]
pub struct UnknownFormat(pub String);

impl FromStr for SourceFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("cpf") {
            Ok(Self::Cpf)
        } else if s.eq_ignore_ascii_case("log") {
            Ok(Self::Log)
        } else {
            Err(UnknownFormat(s.to_string()))
        }
    }
}

/// Either tokenizer behind one type, dispatched with a `match` rather than
/// a trait object.
pub enum AnyTokenizer<'a, I> {
    Cpf(CpfTokenizer<'a, I>),
    Log(LogTokenizer<'a, I>),
}

impl<I> AnyTokenizer<'_, I> {
    pub fn format(&self) -> SourceFormat {
        match self {
            Self::Cpf(_) => SourceFormat::Cpf,
            Self::Log(_) => SourceFormat::Log,
        }
    }
}

impl<'a, I: Interrupt> Tokenizer<'a> for AnyTokenizer<'a, I> {
    fn reset(&mut self, source: &'a [u8]) {
        match self {
            Self::Cpf(t) => t.reset(source),
            Self::Log(t) => t.reset(source),
        }
    }

    fn next_token(&mut self) -> Result<Token<'a>, Interrupted> {
        match self {
            Self::Cpf(t) => t.next_token(),
            Self::Log(t) => t.next_token(),
        }
    }

    fn progress(&self) -> Progress {
        match self {
            Self::Cpf(t) => t.progress(),
            Self::Log(t) => t.progress(),
        }
    }
}
