use nom::bytes::complete::{tag, take_while1, take_while_m_n};
use nom::character::complete::{char, digit1, line_ending, multispace0, space0, space1};
use nom::combinator::{consumed, map_res, opt, verify};
use nom::error::{convert_error, ErrorKind, VerboseError};
use nom::multi::many_till;
use nom::sequence::{pair, terminated};
use nom::{branch::alt, error_position, Err, IResult};

type ParseResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Clock components exactly as written, before range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub fraction: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawBlock<'a> {
    pub sequence_number: usize,
    /// The time range line as written, for error reports.
    pub timing: &'a str,
    pub start: RawTime,
    pub end: RawTime,
    pub text: Vec<&'a str>,
}

/// Runs `parser` against the whole of `input`, rendering failures as text.
pub(crate) fn complete<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, String>
where
    F: FnMut(&'a str) -> ParseResult<'a, T>,
{
    match parser(input) {
        Ok((rest, _)) if !rest.is_empty() => Err(format!("unexpected trailing input: {:?}", rest)),
        Ok((_, value)) => Ok(value),
        Err(Err::Error(err)) | Err(Err::Failure(err)) => Err(convert_error(input, err)),
        Err(Err::Incomplete(_)) => {
            unreachable!("Incomplete data received by non-streaming parser.")
        }
    }
}

fn fixed_digits<'a>(count: usize) -> impl FnMut(&'a str) -> ParseResult<'a, u64> {
    map_res(
        take_while_m_n(count, count, |c: char| c.is_ascii_digit()),
        |s: &str| s.parse(),
    )
}

/// `H:MM:SS.cc`, with any number of hour digits.
pub(crate) fn ssa_timestamp(input: &str) -> ParseResult<RawTime> {
    let (input, hours): (_, u64) = map_res(digit1, |s: &str| s.parse())(input)?;
    let (input, _) = char(':')(input)?;
    let (input, minutes) = fixed_digits(2)(input)?;
    let (input, _) = char(':')(input)?;
    let (input, seconds) = fixed_digits(2)(input)?;
    let (input, _) = char('.')(input)?;
    let (input, fraction) = fixed_digits(2)(input)?;

    Ok((
        input,
        RawTime {
            hours,
            minutes,
            seconds,
            fraction,
        },
    ))
}

/// `HH:MM:SS,mmm`. Hours take at least two digits so that long media
/// (100 hours and up) still round-trips.
pub(crate) fn srt_timestamp(input: &str) -> ParseResult<RawTime> {
    let (input, hours): (_, u64) = map_res(verify(digit1, |s: &str| s.len() >= 2), |s: &str| {
        s.parse()
    })(input)?;
    let (input, _) = char(':')(input)?;
    let (input, minutes) = fixed_digits(2)(input)?;
    let (input, _) = char(':')(input)?;
    let (input, seconds) = fixed_digits(2)(input)?;
    let (input, _) = char(',')(input)?;
    let (input, fraction) = fixed_digits(3)(input)?;

    Ok((
        input,
        RawTime {
            hours,
            minutes,
            seconds,
            fraction,
        },
    ))
}

pub(crate) fn srt_time_range(input: &str) -> ParseResult<(RawTime, RawTime)> {
    let (input, start) = srt_timestamp(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("-->")(input)?;
    let (input, _) = space1(input)?;
    let (input, end) = srt_timestamp(input)?;
    let (input, _) = space0(input)?;

    Ok((input, (start, end)))
}

fn optional_bom(input: &str) -> ParseResult<Option<&str>> {
    opt(tag("\u{FEFF}"))(input)
}

pub(crate) fn srt_file(input: &str) -> ParseResult<Vec<RawBlock>> {
    let (input, _) = optional_bom(input)?;
    let (input, blocks) = all_blocks(input)?;
    let (input, _) = end_of_file(input)?;
    Ok((input, blocks))
}

fn all_blocks(input: &str) -> ParseResult<Vec<RawBlock>> {
    let mut parsed_blocks = Vec::new();
    let mut input = input;
    loop {
        match srt_block(input) {
            Ok((rem_input, block)) => {
                parsed_blocks.push(block);
                let (rem_input, _) = multispace0(rem_input)?;
                input = rem_input;
            }
            Err(err) => {
                if input.is_empty() {
                    return Ok((input, parsed_blocks));
                } else {
                    return Err(err);
                }
            }
        }
    }
}

pub(crate) fn srt_block(input: &str) -> ParseResult<RawBlock> {
    let (input, _) = multispace0(input)?;
    let (input, sequence_number) = terminated(seq_num, pair(space0, line_ending))(input)?;
    let (input, (timing, (start, end))) =
        terminated(consumed(srt_time_range), line_ending)(input)?;
    let (input, text) = sub_text(input)?;

    Ok((
        input,
        RawBlock {
            sequence_number,
            timing: timing.trim_end(),
            start,
            end,
            text,
        },
    ))
}

fn end_of_file(input: &str) -> ParseResult<&str> {
    if input.is_empty() {
        Ok((input, input))
    } else {
        std::result::Result::Err(Err::Error(error_position!(input, ErrorKind::Eof)))
    }
}

fn sub_text(input: &str) -> ParseResult<Vec<&str>> {
    let line = terminated(
        take_while1(|c: char| c != '\n' && c != '\r'),
        alt((line_ending, end_of_file)),
    );

    let (input, (lines, _)) = many_till(line, alt((line_ending, end_of_file)))(input)?;

    Ok((input, lines))
}

fn seq_num(input: &str) -> ParseResult<usize> {
    map_res(digit1, |s: &str| s.parse())(input)
}

/// Strips a `Dialogue:` key, returning the comma separated remainder.
pub(crate) fn dialogue_line(input: &str) -> ParseResult<&str> {
    let (input, _) = tag("Dialogue:")(input)?;
    let (input, _) = space0(input)?;
    Ok(("", input))
}

/// Strips an optional `Format:` key, returning the field list.
pub(crate) fn format_line(input: &str) -> ParseResult<&str> {
    let (input, _) = space0(input)?;
    let (input, _) = opt(tag("Format:"))(input)?;
    let (input, _) = space0(input)?;
    Ok(("", input))
}
