//! Per-tokenizer settings.

use fmo_lexer_core::{NaValues, DEFAULT_POLL_INTERVAL};

/// Settings shared by both tokenizers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Field contents that mean "missing".
    pub na: NaValues,
    /// Cancellation cadence, see [`Grid`](fmo_lexer_core::Grid).
    pub interrupt_interval: usize,
}

impl ScanConfig {
    #[must_use]
    pub fn with_na_values(mut self, na: NaValues) -> Self {
        self.na = na;
        self
    }

    /// Set the poll cadence. 0 is treated as 1 (poll at every position).
    #[must_use]
    pub fn with_interrupt_interval(mut self, interval: usize) -> Self {
        self.interrupt_interval = interval.max(1);
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            na: NaValues::default(),
            interrupt_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}
