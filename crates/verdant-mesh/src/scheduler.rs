//! Wall-clock time slicing for incremental work.

use std::time::{Duration, Instant};

/// How a slice ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceOutcome {
    /// Budget reached with work remaining (or possibly just finished).
    Yielded { rows: u32 },
    /// The iterator ran out during this slice.
    Exhausted { rows: u32 },
}

impl SliceOutcome {
    /// Items processed during the slice.
    pub fn rows(self) -> u32 {
        match self {
            SliceOutcome::Yielded { rows } | SliceOutcome::Exhausted { rows } => rows,
        }
    }
}

/// Pulls items from a fallible iterator until a time budget is spent.
///
/// The clock is checked after each item, so a slice always makes progress
/// and overruns the budget by at most one item. A zero budget processes
/// exactly one item per slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceScheduler {
    budget: Duration,
}

impl SliceScheduler {
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Run one slice. The first error ends the slice and is returned.
    pub fn drive<I, T, E>(&self, work: &mut I) -> Result<SliceOutcome, E>
    where
        I: Iterator<Item = Result<T, E>>,
    {
        let start = Instant::now();
        let mut rows = 0;
        loop {
            match work.next() {
                None => return Ok(SliceOutcome::Exhausted { rows }),
                Some(Err(e)) => return Err(e),
                Some(Ok(_)) => {
                    rows += 1;
                    if start.elapsed() >= self.budget {
                        return Ok(SliceOutcome::Yielded { rows });
                    }
                }
            }
        }
    }
}
