use crate::error::{Result, SubcueError};
use crate::format::Standard;
use crate::time::TimeCode;

use std::time::Duration;

/// The interval a cue is shown for. `start` never comes after `end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: TimeCode,
    end: TimeCode,
}

impl TimeRange {
    pub fn new(start: TimeCode, end: TimeCode) -> Result<Self> {
        if start > end {
            return Err(SubcueError::InvalidRange {
                start: start.as_duration(),
                end: end.as_duration(),
            });
        }
        Ok(TimeRange { start, end })
    }

    pub fn start(&self) -> TimeCode {
        self.start
    }

    pub fn end(&self) -> TimeCode {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end.as_duration() - self.start.as_duration()
    }

    /// Rounds both ends onto `standard`'s grid. Rounding is monotonic, so
    /// the ordering of the ends is kept.
    pub fn quantize(&self, standard: Standard) -> TimeRange {
        TimeRange {
            start: standard.quantize(self.start),
            end: standard.quantize(self.end),
        }
    }
}
