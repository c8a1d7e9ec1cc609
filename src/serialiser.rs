use crate::time::{Precision, TimeCode};

use std::fmt::{self, Write};

pub(crate) fn write_ssa_ts<W: Write>(buf: &mut W, timestamp: TimeCode) -> fmt::Result {
    let ts = Precision::Centis.split(timestamp);
    write!(
        buf,
        "{}:{:02}:{:02}.{:02}",
        ts.hours, ts.minutes, ts.seconds, ts.fraction
    )
}

pub(crate) fn write_srt_ts<W: Write>(buf: &mut W, timestamp: TimeCode) -> fmt::Result {
    let ts = Precision::Millis.split(timestamp);
    write!(
        buf,
        "{:02}:{:02}:{:02},{:03}",
        ts.hours, ts.minutes, ts.seconds, ts.fraction
    )
}
