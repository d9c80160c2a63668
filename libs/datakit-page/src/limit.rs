//! Bounded result windows without page semantics.

use crate::errors::Error;

/// A cap on returned results, optionally offset to a 1-based starting row.
///
/// Unlike a page request, a limit carries no navigation state; it simply
/// bounds a single query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limit {
    max_results: u64,
    start_at: u64,
}

impl Limit {
    /// At most `max_results` rows, starting at the first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`] when `max_results` is 0.
    pub fn of(max_results: u64) -> Result<Self, Error> {
        if max_results == 0 {
            return Err(Error::InvalidLimit);
        }
        Ok(Self {
            max_results,
            start_at: 1,
        })
    }

    /// The rows from `start_at` through `end_at`, both 1-based and
    /// inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`] when either bound is 0 or the range
    /// is reversed.
    pub fn range(start_at: u64, end_at: u64) -> Result<Self, Error> {
        if start_at == 0 || end_at < start_at {
            return Err(Error::InvalidLimit);
        }
        Ok(Self {
            max_results: end_at - start_at + 1,
            start_at,
        })
    }

    #[must_use]
    pub fn max_results(&self) -> u64 {
        self.max_results
    }

    /// The 1-based first row of the window.
    #[must_use]
    pub fn start_at(&self) -> u64 {
        self.start_at
    }
}
