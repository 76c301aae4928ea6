//! Offsets since local midnight, as used by pump schedules.
//!
//! Schedules are configured as `HH:MM` strings and stored on the pump as
//! half-hour indices. A [`TimeOfDay`] keeps nanosecond precision internally
//! but formats at minute precision.

use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use chrono::Timelike;

use crate::FormatError;

const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;
const NANOS_PER_DAY: u64 = 24 * NANOS_PER_HOUR;
const HALF_HOUR: Duration = Duration::from_secs(30 * 60);

/// Duration of `n` schedule half-hour units.
pub const fn half_hours(n: u8) -> Duration {
    Duration::from_secs(n as u64 * HALF_HOUR.as_secs())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u64);

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self(0);

    /// Returns `None` unless `d` is less than 24 hours.
    pub fn from_duration(d: Duration) -> Option<Self> {
        let nanos = u64::try_from(d.as_nanos()).ok()?;
        (nanos < NANOS_PER_DAY).then_some(Self(nanos))
    }

    /// Returns `None` past the 48th half hour of the day.
    pub fn from_half_hours(n: u8) -> Option<Self> {
        Self::from_duration(half_hours(n))
    }

    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self(
            hour as u64 * NANOS_PER_HOUR + minute as u64 * NANOS_PER_MINUTE,
        ))
    }

    /// Wall-clock time elapsed since midnight of the same local day.
    ///
    /// Computed from the clock fields of `t`, not from instant arithmetic, so a
    /// fall-back wall time maps to the same value whichever UTC instant it
    /// denotes, and the day's transitions do not shift later times.
    pub fn since_midnight<T: Timelike>(t: &T) -> Self {
        // chrono represents a leap second as nanosecond >= 1e9.
        let nanos = u64::from(t.nanosecond()).min(NANOS_PER_SECOND - 1);
        Self(
            u64::from(t.hour()) * NANOS_PER_HOUR
                + u64::from(t.minute()) * NANOS_PER_MINUTE
                + u64::from(t.second()) * NANOS_PER_SECOND
                + nanos,
        )
    }

    pub fn parse(s: &str) -> Result<Self, FormatError> {
        let b = s.as_bytes();
        if b.len() != 5 {
            return Err(FormatError::Length(b.len()));
        }
        if b[2] != b':' {
            return Err(FormatError::Separator);
        }
        let hour = two_digits(b[0], b[1])?;
        let minute = two_digits(b[3], b[4])?;
        if hour > 23 {
            return Err(FormatError::HourRange(hour));
        }
        if minute > 59 {
            return Err(FormatError::MinuteRange(minute));
        }
        Ok(Self(
            u64::from(hour) * NANOS_PER_HOUR + u64::from(minute) * NANOS_PER_MINUTE,
        ))
    }

    pub const fn hour(self) -> u8 {
        (self.0 / NANOS_PER_HOUR) as u8
    }

    pub const fn minute(self) -> u8 {
        (self.0 % NANOS_PER_HOUR / NANOS_PER_MINUTE) as u8
    }

    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    pub const fn as_duration(self) -> Duration {
        Duration::from_nanos(self.0)
    }

    /// The half-hour index, when this time falls exactly on one.
    pub fn half_hours(self) -> Option<u8> {
        let unit = HALF_HOUR.as_secs() * NANOS_PER_SECOND;
        if self.0 % unit != 0 {
            return None;
        }
        u8::try_from(self.0 / unit).ok()
    }
}

fn two_digits(hi: u8, lo: u8) -> Result<u8, FormatError> {
    if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
        return Err(FormatError::Digit);
    }
    Ok((hi - b'0') * 10 + (lo - b'0'))
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
