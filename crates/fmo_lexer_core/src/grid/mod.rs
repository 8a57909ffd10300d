//! Row/column bookkeeping for emitted fields.
//!
//! The tokenizers describe *where a field lands in the output table*, not
//! where it sits in the file: `col` counts fields within a record and `row`
//! counts records. The byte position lives in [`Cursor`](crate::Cursor).

/// Table coordinates of a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// Default cadence for the cooperative cancellation poll.
pub const DEFAULT_POLL_INTERVAL: usize = 100_000;

/// Row/column counters plus the cancellation cadence derived from them.
///
/// A poll is due whenever `row + 1` or `col + 1` is a multiple of the
/// interval. The flag is recomputed on every counter change so the byte
/// loops only test a `bool`.
#[derive(Clone, Copy, Debug)]
pub struct Grid {
    row: usize,
    col: usize,
    interval: usize,
    poll_due: bool,
}

impl Grid {
    /// Create a grid at (0, 0). An interval of 0 is treated as 1.
    pub fn new(interval: usize) -> Self {
        let mut grid = Self {
            row: 0,
            col: 0,
            interval: interval.max(1),
            poll_due: false,
        };
        grid.refresh();
        grid
    }

    /// Current coordinates.
    #[inline]
    pub fn position(&self) -> Position {
        Position {
            row: self.row,
            col: self.col,
        }
    }

    /// Move to the next field of the current record.
    #[inline]
    pub fn new_field(&mut self) {
        self.col = self.col.saturating_add(1);
        self.refresh();
    }

    /// Start a new record at column 0.
    #[inline]
    pub fn new_record(&mut self) {
        self.row = self.row.saturating_add(1);
        self.col = 0;
        self.refresh();
    }

    /// Whether the cancellation hook should be polled at this position.
    #[inline]
    pub fn poll_due(&self) -> bool {
        self.poll_due
    }

    fn refresh(&mut self) {
        let interval = self.interval;
        let on_cadence = |n: usize| n.wrapping_add(1) % interval == 0;
        self.poll_due = on_cadence(self.row) || on_cadence(self.col);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}
