use crate::error::{Result, SubcueError};
use crate::parser::{self, RawTime};
use crate::serialiser::{write_srt_ts, write_ssa_ts};
use crate::time::{Precision, TimeCode};

use std::fmt;

/// A subtitle text standard, each with its own time pattern and line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Standard {
    /// SubStation Alpha / Advanced SubStation Alpha `Dialogue:` lines.
    Ssa,
    /// SubRip cue blocks.
    Srt,
}

impl Standard {
    pub fn name(self) -> &'static str {
        match self {
            Standard::Ssa => "SSA/ASS",
            Standard::Srt => "SRT",
        }
    }

    pub fn time_pattern(self) -> &'static str {
        match self {
            Standard::Ssa => "H:MM:SS.cc",
            Standard::Srt => "HH:MM:SS,mmm",
        }
    }

    pub fn precision(self) -> Precision {
        match self {
            Standard::Ssa => Precision::Centis,
            Standard::Srt => Precision::Millis,
        }
    }

    /// How a break between two text lines is written in this standard.
    pub fn line_break(self) -> &'static str {
        match self {
            Standard::Ssa => "\\N",
            Standard::Srt => "\n",
        }
    }

    /// Rounds `time` to the nearest value this standard can represent.
    pub fn quantize(self, time: TimeCode) -> TimeCode {
        self.precision().quantize(time)
    }

    /// Splits `text` at this standard's line breaks. SRT accepts both `\n`
    /// and `\r\n`.
    pub fn split_lines(self, text: &str) -> Vec<&str> {
        match self {
            Standard::Ssa => text.split(self.line_break()).collect(),
            Standard::Srt => text.lines().collect(),
        }
    }

    pub fn format_time(self, time: TimeCode) -> String {
        Timestamp(self, time).to_string()
    }

    pub fn parse_time(self, input: &str) -> Result<TimeCode> {
        let parsed = match self {
            Standard::Ssa => parser::complete(parser::ssa_timestamp, input),
            Standard::Srt => parser::complete(parser::srt_timestamp, input),
        };
        let raw = parsed.map_err(|_| {
            SubcueError::malformed_time(input, format!("expected {}", self.time_pattern()))
        })?;
        self.time_from_raw(raw, input)
    }

    pub(crate) fn time_from_raw(self, raw: RawTime, input: &str) -> Result<TimeCode> {
        if raw.minutes >= 60 {
            return Err(SubcueError::malformed_time(input, "minutes out of range"));
        }
        if raw.seconds >= 60 {
            return Err(SubcueError::malformed_time(input, "seconds out of range"));
        }
        let total_secs = raw
            .hours
            .checked_mul(3600)
            .and_then(|secs| secs.checked_add(raw.minutes * 60 + raw.seconds))
            .ok_or_else(|| SubcueError::malformed_time(input, "hours out of range"))?;
        Ok(self.precision().time_of(total_secs, raw.fraction))
    }
}

/// A time code rendered in a standard's pattern.
struct Timestamp(Standard, TimeCode);

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Standard::Ssa => write_ssa_ts(f, self.1),
            Standard::Srt => write_srt_ts(f, self.1),
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
