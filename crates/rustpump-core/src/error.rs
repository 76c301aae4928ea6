use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    BufferTooSmall,
    /// A stroke count does not fit the payload width of its generation.
    StrokeOverflow {
        strokes: u32,
        width: usize,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => f.write_str("buffer too small"),
            Self::StrokeOverflow { strokes, width } => {
                write!(f, "{strokes} strokes do not fit in {width} byte(s)")
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// A subfield of a packed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl Field {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year offset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    UnexpectedEof,
    InvalidLength { expected: usize, actual: usize },
    MalformedField { field: Field, value: u8 },
    NonexistentLocalTime,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length {actual}, expected {expected}")
            }
            Self::MalformedField { field, value } => {
                write!(f, "{} {value} out of range", field.name())
            }
            Self::NonexistentLocalTime => f.write_str("local time does not exist in time zone"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Rejection reasons for an `HH:MM` time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("time of day must be exactly 5 bytes (HH:MM), got {0}")]
    Length(usize),
    #[error("time of day must separate hours and minutes with ':'")]
    Separator,
    #[error("time of day fields must be two decimal digits")]
    Digit,
    #[error("hour {0} out of range")]
    HourRange(u8),
    #[error("minute {0} out of range")]
    MinuteRange(u8),
}
