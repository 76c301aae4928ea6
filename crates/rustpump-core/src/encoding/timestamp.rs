//! Decoders for the pump's packed timestamp formats.
//!
//! The pump has no century field: every year is `2000 + offset` where the
//! offset is a 7-bit value limited to 0..=99. Flag bits sharing a byte with a
//! field are masked off and ignored.
//!
//! | Format | Width | Granularity |
//! |--------|-------|-------------|
//! | [`PackedFormat::Full`] | 5 | second |
//! | [`PackedFormat::Date`] | 2 | day |
//! | [`PackedFormat::Cgm`]  | 4 | minute |

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::encoding::field::{Bits, FieldSpec};
use crate::encoding::reader::Reader;
use crate::error::Field;
use crate::DecodeError;

pub const EPOCH_YEAR: i32 = 2000;
pub const MAX_YEAR_OFFSET: u8 = 99;

pub const FULL_LEN: usize = 5;
pub const DATE_LEN: usize = 2;
pub const CGM_LEN: usize = 4;

/// Field table of one packed format. Absent time fields decode as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub second: Option<FieldSpec>,
    pub minute: Option<FieldSpec>,
    pub hour: Option<FieldSpec>,
    pub day: FieldSpec,
    pub month: FieldSpec,
    pub year: FieldSpec,
}

const fn second(parts: &'static [Bits]) -> FieldSpec {
    FieldSpec {
        field: Field::Second,
        parts,
        min: 0,
        max: 59,
    }
}

const fn minute(parts: &'static [Bits]) -> FieldSpec {
    FieldSpec {
        field: Field::Minute,
        parts,
        min: 0,
        max: 59,
    }
}

const fn hour(parts: &'static [Bits]) -> FieldSpec {
    FieldSpec {
        field: Field::Hour,
        parts,
        min: 0,
        max: 23,
    }
}

const fn day(parts: &'static [Bits]) -> FieldSpec {
    FieldSpec {
        field: Field::Day,
        parts,
        min: 1,
        max: 31,
    }
}

const fn month(parts: &'static [Bits]) -> FieldSpec {
    FieldSpec {
        field: Field::Month,
        parts,
        min: 1,
        max: 12,
    }
}

const fn year(parts: &'static [Bits]) -> FieldSpec {
    FieldSpec {
        field: Field::Year,
        parts,
        min: 0,
        max: MAX_YEAR_OFFSET,
    }
}

const SECOND_B0: &[Bits] = &[Bits::low(0, 0x3F)];
const MINUTE_B1: &[Bits] = &[Bits::low(1, 0x3F)];
const HOUR_B0: &[Bits] = &[Bits::low(0, 0x1F)];
const HOUR_B2: &[Bits] = &[Bits::low(2, 0x1F)];
const DAY_B0: &[Bits] = &[Bits::low(0, 0x1F)];
const DAY_B2: &[Bits] = &[Bits::low(2, 0x1F)];
const DAY_B3: &[Bits] = &[Bits::low(3, 0x1F)];
const YEAR_B1: &[Bits] = &[Bits::low(1, 0x7F)];
const YEAR_B3: &[Bits] = &[Bits::low(3, 0x7F)];
const YEAR_B4: &[Bits] = &[Bits::low(4, 0x7F)];

// Month high bits ride in the top of byte 0, low bits in the top of byte 1.
const MONTH_SPLIT_2_2: &[Bits] = &[Bits::new(0, 6, 0x03, 2), Bits::new(1, 6, 0x03, 0)];
const MONTH_SPLIT_3_1: &[Bits] = &[Bits::new(0, 5, 0x07, 1), Bits::new(1, 7, 0x01, 0)];

pub const FULL_LAYOUT: Layout = Layout {
    second: Some(second(SECOND_B0)),
    minute: Some(minute(MINUTE_B1)),
    hour: Some(hour(HOUR_B2)),
    day: day(DAY_B3),
    month: month(MONTH_SPLIT_2_2),
    year: year(YEAR_B4),
};

pub const DATE_LAYOUT: Layout = Layout {
    second: None,
    minute: None,
    hour: None,
    day: day(DAY_B0),
    month: month(MONTH_SPLIT_3_1),
    year: year(YEAR_B1),
};

pub const CGM_LAYOUT: Layout = Layout {
    second: None,
    minute: Some(minute(MINUTE_B1)),
    hour: Some(hour(HOUR_B0)),
    day: day(DAY_B2),
    month: month(MONTH_SPLIT_2_2),
    year: year(YEAR_B3),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackedFormat {
    Full,
    Date,
    Cgm,
}

impl PackedFormat {
    pub const ALL: [Self; 3] = [Self::Full, Self::Date, Self::Cgm];

    pub const fn width(self) -> usize {
        match self {
            Self::Full => FULL_LEN,
            Self::Date => DATE_LEN,
            Self::Cgm => CGM_LEN,
        }
    }

    pub const fn layout(self) -> &'static Layout {
        match self {
            Self::Full => &FULL_LAYOUT,
            Self::Date => &DATE_LAYOUT,
            Self::Cgm => &CGM_LAYOUT,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Date => "date",
            Self::Cgm => "cgm",
        }
    }

    pub fn decode(self, buf: &[u8]) -> Result<NaiveDateTime, DecodeError> {
        match self {
            Self::Full => decode_time(buf),
            Self::Date => decode_date(buf),
            Self::Cgm => decode_cgm_time(buf),
        }
    }
}

/// Decodes the 5-byte, second-granularity timestamp used by history records.
pub fn decode_time(buf: &[u8]) -> Result<NaiveDateTime, DecodeError> {
    let bytes: [u8; FULL_LEN] = Reader::exact(buf, FULL_LEN)?.read_array()?;
    decode_layout(&FULL_LAYOUT, &bytes)
}

/// Decodes the 2-byte date; the result is at local midnight.
pub fn decode_date(buf: &[u8]) -> Result<NaiveDateTime, DecodeError> {
    let bytes: [u8; DATE_LEN] = Reader::exact(buf, DATE_LEN)?.read_array()?;
    decode_layout(&DATE_LAYOUT, &bytes)
}

/// Decodes the 4-byte, minute-granularity timestamp of the CGM subsystem.
pub fn decode_cgm_time(buf: &[u8]) -> Result<NaiveDateTime, DecodeError> {
    let bytes: [u8; CGM_LEN] = Reader::exact(buf, CGM_LEN)?.read_array()?;
    decode_layout(&CGM_LAYOUT, &bytes)
}

fn optional(spec: &Option<FieldSpec>, bytes: &[u8]) -> Result<u8, DecodeError> {
    match spec {
        Some(spec) => spec.decode(bytes),
        None => Ok(0),
    }
}

fn decode_layout(layout: &Layout, bytes: &[u8]) -> Result<NaiveDateTime, DecodeError> {
    let year = layout.year.decode(bytes)?;
    let month = layout.month.decode(bytes)?;
    let day = layout.day.decode(bytes)?;
    let hour = optional(&layout.hour, bytes)?;
    let minute = optional(&layout.minute, bytes)?;
    let second = optional(&layout.second, bytes)?;

    let date = NaiveDate::from_ymd_opt(EPOCH_YEAR + i32::from(year), month.into(), day.into())
        .ok_or(DecodeError::MalformedField {
            field: Field::Day,
            value: day,
        })?;
    let time = NaiveTime::from_hms_opt(hour.into(), minute.into(), second.into()).ok_or(
        DecodeError::MalformedField {
            field: Field::Hour,
            value: hour,
        },
    )?;
    Ok(date.and_time(time))
}

/// Resolves a decoded civil timestamp in `tz`.
///
/// A wall time repeated by a fall-back transition resolves to its earlier
/// instant. A wall time skipped by a spring-forward transition is rejected.
pub fn localize<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Result<DateTime<Tz>, DecodeError> {
    tz.from_local_datetime(naive)
        .earliest()
        .ok_or(DecodeError::NonexistentLocalTime)
}
