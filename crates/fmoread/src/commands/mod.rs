//! Command handlers for the `fmoread` CLI.
//!
//! Each submodule implements one command. Argument parsing, file reading
//! and tokenizer construction are shared and live here in the module root.

use std::path::Path;
use std::time::{Duration, Instant};

use fmo_lexer::{AnyTokenizer, Interrupt, Interrupted, NaValues, ScanConfig, SourceFormat};

use crate::CliError;

mod inspect;

pub use inspect::{fields_file, lex_file};

/// Options shared by `lex` and `fields`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Forced format. `None` means: by extension, then by content.
    pub format: Option<SourceFormat>,
    /// Replacement NA sentinels.
    pub na: Option<NaValues>,
    /// Give up once tokenizing has taken this long.
    pub time_limit: Option<Duration>,
    /// Cancellation cadence passed to the tokenizer.
    pub poll_interval: Option<usize>,
}

impl ScanOptions {
    /// Split command arguments into the input path and the options.
    ///
    /// Accepts `--format=<cpf|log>`, `--na=<a,b,...>` (empty for none),
    /// `--time-limit=<ms>` and `--poll-interval=<n>` in any position.
    pub fn parse(args: &[String]) -> Result<(String, Self), CliError> {
        let mut options = Self::default();
        let mut path = None;

        for arg in args {
            if let Some(format) = arg.strip_prefix("--format=") {
                options.format = Some(format.parse()?);
            } else if let Some(list) = arg.strip_prefix("--na=") {
                options.na = Some(if list.is_empty() {
                    NaValues::none()
                } else {
                    NaValues::new(list.split(','))
                });
            } else if let Some(ms) = arg.strip_prefix("--time-limit=") {
                let ms = parse_number(ms, "--time-limit")?;
                options.time_limit = Some(Duration::from_millis(ms));
            } else if let Some(n) = arg.strip_prefix("--poll-interval=") {
                let n = parse_number(n, "--poll-interval")?;
                options.poll_interval = Some(usize::try_from(n).unwrap_or(usize::MAX));
            } else if arg.starts_with('-') {
                return Err(CliError::usage(format!("unknown option '{arg}'")));
            } else if path.is_none() {
                path = Some(arg.clone());
            } else {
                return Err(CliError::usage(format!("unexpected argument '{arg}'")));
            }
        }

        let path = path.ok_or_else(|| CliError::usage("missing file path"))?;
        Ok((path, options))
    }

    /// The forced format, else the extension's, else a guess from content.
    pub fn resolve_format(&self, path: &Path, source: &[u8]) -> SourceFormat {
        self.format
            .or_else(|| SourceFormat::from_path(path))
            .unwrap_or_else(|| SourceFormat::sniff(source))
    }

    pub fn config(&self) -> ScanConfig {
        let mut config = ScanConfig::default();
        if let Some(na) = &self.na {
            config = config.with_na_values(na.clone());
        }
        if let Some(n) = self.poll_interval {
            config = config.with_interrupt_interval(n);
        }
        config
    }

    /// A tokenizer for `format`, its clock started now.
    pub fn tokenizer<'a>(&self, format: SourceFormat) -> AnyTokenizer<'a, Deadline> {
        format.tokenizer(self.config(), Deadline::new(self.time_limit))
    }
}

fn parse_number(text: &str, option: &str) -> Result<u64, CliError> {
    text.parse()
        .map_err(|_| CliError::usage(format!("{option} expects a number, got '{text}'")))
}

/// Interrupts a scan once a wall-clock budget is spent.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// `None` never expires.
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            at: limit.and_then(|limit| Instant::now().checked_add(limit)),
        }
    }
}

impl Interrupt for Deadline {
    fn check(&mut self) -> Result<(), Interrupted> {
        match self.at {
            Some(at) if Instant::now() >= at => Err(Interrupted),
            _ => Ok(()),
        }
    }
}

/// Read a whole input file.
pub fn read_file(path: &str) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests;
