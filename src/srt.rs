use crate::cue::{Cue, DEFAULT_STYLE};
use crate::error::{Result, SubcueError};
use crate::format::Standard;
use crate::parser::{self, RawBlock};
use crate::range::TimeRange;
use crate::timeline;

use anyhow::Context;
use log::debug;

pub const DELIMITER: &str = " --> ";

/// `start --> end`, both in `HH:MM:SS,mmm`.
pub fn format_time_range(range: &TimeRange) -> String {
    format!(
        "{}{}{}",
        Standard::Srt.format_time(range.start()),
        DELIMITER,
        Standard::Srt.format_time(range.end())
    )
}

pub fn parse_time_range(line: &str) -> Result<TimeRange> {
    let (start, end) = parser::complete(parser::srt_time_range, line).map_err(|_| {
        SubcueError::malformed_time(line, "expected HH:MM:SS,mmm --> HH:MM:SS,mmm")
    })?;
    TimeRange::new(
        Standard::Srt.time_from_raw(start, line)?,
        Standard::Srt.time_from_raw(end, line)?,
    )
}

/// Writes and reads single SRT cue blocks. The blank line separating blocks
/// belongs to whoever assembles the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtSerialiser;

impl SrtSerialiser {
    pub fn new() -> Self {
        Self {}
    }

    /// Renders `cue` as a block numbered `sequence_number`, without a trailing
    /// newline. Fields SRT cannot carry are ignored.
    pub fn serialise(&self, cue: &Cue, sequence_number: usize) -> Result<String> {
        if sequence_number == 0 {
            return Err(SubcueError::field_encoding("Index", "0"));
        }
        if cue.text.is_empty() {
            return Err(SubcueError::field_encoding("Text", ""));
        }
        // A blank line would end the block early.
        if let Some(line) = cue
            .text
            .iter()
            .find(|l| l.trim().is_empty() || l.contains(|c: char| c == '\n' || c == '\r'))
        {
            return Err(SubcueError::field_encoding("Text", line));
        }

        let mut lines = Vec::with_capacity(cue.text.len() + 2);
        lines.push(sequence_number.to_string());
        lines.push(format_time_range(cue.range()));
        lines.extend(cue.text.iter().cloned());
        Ok(lines.join(Standard::Srt.line_break()))
    }

    /// Reads one block, returning its sequence number and the cue. Fields SRT
    /// does not carry take their defaults.
    pub fn parse(&self, block: &str) -> Result<(usize, Cue)> {
        let raw = parser::complete(parser::srt_block, block.trim_end())
            .map_err(SubcueError::Parse)?;
        block_to_cue(raw)
    }
}

fn block_to_cue(raw: RawBlock) -> Result<(usize, Cue)> {
    let range = TimeRange::new(
        Standard::Srt.time_from_raw(raw.start, raw.timing)?,
        Standard::Srt.time_from_raw(raw.end, raw.timing)?,
    )?;
    let text = raw.text.into_iter().map(String::from).collect();
    Ok((raw.sequence_number, Cue::new(DEFAULT_STYLE, range, text)))
}

/// Reads a whole SRT body into cues in timeline order.
pub struct SrtReader;
impl SrtReader {
    pub fn new() -> Self {
        Self {}
    }

    pub fn read(&self, input: &str) -> anyhow::Result<Vec<Cue>> {
        let blocks = parser::complete(parser::srt_file, input)
            .map_err(SubcueError::Parse)
            .context("Failed to parse SRT body")?;

        let mut cues = Vec::with_capacity(blocks.len());
        for block in blocks {
            let sequence_number = block.sequence_number;
            let (_, cue) = block_to_cue(block)
                .with_context(|| format!("Invalid timing in SRT block {}", sequence_number))?;
            cues.push(cue);
        }
        debug!("Read {} SRT blocks", cues.len());
        timeline::sort(&mut cues);
        Ok(cues)
    }
}

impl Default for SrtReader {
    fn default() -> Self {
        Self::new()
    }
}
