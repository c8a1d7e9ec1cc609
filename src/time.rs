use std::ops::Add;
use std::time::Duration;

/// A point in time, measured from the start of the media.
///
/// Equality and ordering follow the elapsed duration, so the way a value was
/// split into hours, minutes and seconds when it was built does not matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeCode(Duration);

impl TimeCode {
    pub const ZERO: TimeCode = TimeCode(Duration::from_secs(0));

    pub fn from_duration(elapsed: Duration) -> Self {
        TimeCode(elapsed)
    }

    pub fn from_millis(millis: u64) -> Self {
        TimeCode(Duration::from_millis(millis))
    }

    /// Components do not need to be normalised: `from_hms(0, 0, 90, 0)` equals
    /// `from_hms(0, 1, 30, 0)`.
    ///
    /// # Panics
    ///
    /// Panics if the total does not fit in a `Duration`; use
    /// [`TimeCode::checked_from_hms`] for untrusted components.
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Self {
        match TimeCode::checked_from_hms(hours, minutes, seconds, millis) {
            Some(time) => time,
            None => panic!(
                "overflow building time code from {}h {}m {}s {}ms",
                hours, minutes, seconds, millis
            ),
        }
    }

    pub fn checked_from_hms(
        hours: u64,
        minutes: u64,
        seconds: u64,
        millis: u64,
    ) -> Option<Self> {
        let secs = hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(seconds)?;
        Duration::from_secs(secs)
            .checked_add(Duration::from_millis(millis))
            .map(TimeCode)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Elapsed time since `earlier`, or `None` if `earlier` is later than `self`.
    pub fn duration_since(&self, earlier: TimeCode) -> Option<Duration> {
        self.0.checked_sub(earlier.0)
    }
}

impl Add<Duration> for TimeCode {
    type Output = TimeCode;

    fn add(self, rhs: Duration) -> TimeCode {
        TimeCode(self.0 + rhs)
    }
}

impl From<Duration> for TimeCode {
    fn from(elapsed: Duration) -> Self {
        TimeCode(elapsed)
    }
}

/// Sub-second resolution of a time pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Centis,
    Millis,
}

/// Clock components of a time code at some precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Components {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub fraction: u64,
}

impl Precision {
    /// Number of digits used for the fraction.
    pub fn digits(self) -> usize {
        match self {
            Precision::Centis => 2,
            Precision::Millis => 3,
        }
    }

    pub fn units_per_second(self) -> u64 {
        match self {
            Precision::Centis => 100,
            Precision::Millis => 1000,
        }
    }

    fn unit_nanos(self) -> u32 {
        match self {
            Precision::Centis => 10_000_000,
            Precision::Millis => 1_000_000,
        }
    }

    /// Whole seconds and fraction units of `time`, with the fraction rounded to
    /// the nearest unit, ties away from zero. A rounded-up fraction carries into
    /// the seconds; on the very last representable second it rounds down instead.
    fn round_parts(self, time: TimeCode) -> (u64, u64) {
        let unit = self.unit_nanos();
        let secs = time.0.as_secs();
        let fraction = u64::from((time.0.subsec_nanos() + unit / 2) / unit);
        if fraction < self.units_per_second() {
            return (secs, fraction);
        }
        match secs.checked_add(1) {
            Some(secs) => (secs, 0),
            None => (secs, self.units_per_second() - 1),
        }
    }

    /// Whole units in `time`, rounded to the nearest unit with ties away from
    /// zero, or `None` if the count does not fit in a `u64`.
    pub fn round(self, time: TimeCode) -> Option<u64> {
        let (secs, fraction) = self.round_parts(time);
        secs.checked_mul(self.units_per_second())?
            .checked_add(fraction)
    }

    /// The time `secs` seconds and `fraction` units in. `fraction` must be
    /// below [`Precision::units_per_second`].
    pub(crate) fn time_of(self, secs: u64, fraction: u64) -> TimeCode {
        debug_assert!(fraction < self.units_per_second());
        TimeCode(Duration::new(secs, fraction as u32 * self.unit_nanos()))
    }

    /// Rounds `time` onto this precision's grid.
    pub fn quantize(self, time: TimeCode) -> TimeCode {
        let (secs, fraction) = self.round_parts(time);
        self.time_of(secs, fraction)
    }

    /// Splits `time` into clock components after rounding, so a carry out of
    /// the fraction propagates into seconds, minutes and hours.
    pub fn split(self, time: TimeCode) -> Components {
        let (total_secs, fraction) = self.round_parts(time);
        Components {
            hours: total_secs / 3600,
            minutes: (total_secs % 3600) / 60,
            seconds: total_secs % 60,
            fraction,
        }
    }
}
