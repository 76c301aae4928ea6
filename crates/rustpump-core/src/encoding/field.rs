//! Mask/shift tables for the pump's packed fields.
//!
//! A packed field is assembled from one or more bit runs, each taken from a
//! single byte: `((bytes[byte] >> shift) & mask) << place`. The runs of a
//! field are OR'd together and the result is range checked.

use crate::error::Field;
use crate::DecodeError;

/// One run of bits contributing to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bits {
    pub byte: usize,
    pub shift: u8,
    pub mask: u8,
    pub place: u8,
}

impl Bits {
    /// The low-order bits of `byte` selected by `mask`.
    pub const fn low(byte: usize, mask: u8) -> Self {
        Self {
            byte,
            shift: 0,
            mask,
            place: 0,
        }
    }

    pub const fn new(byte: usize, shift: u8, mask: u8, place: u8) -> Self {
        Self {
            byte,
            shift,
            mask,
            place,
        }
    }

    fn extract(&self, bytes: &[u8]) -> Result<u8, DecodeError> {
        let b = bytes.get(self.byte).ok_or(DecodeError::UnexpectedEof)?;
        Ok(((b >> self.shift) & self.mask) << self.place)
    }
}

/// A named field with its bit runs and inclusive valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub parts: &'static [Bits],
    pub min: u8,
    pub max: u8,
}

impl FieldSpec {
    pub fn extract(&self, bytes: &[u8]) -> Result<u8, DecodeError> {
        let mut value = 0u8;
        for part in self.parts {
            value |= part.extract(bytes)?;
        }
        Ok(value)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<u8, DecodeError> {
        let value = self.extract(bytes)?;
        if value < self.min || value > self.max {
            log::debug!("rejecting {} {value} in {:02X?}", self.field.name(), bytes);
            return Err(DecodeError::MalformedField {
                field: self.field,
                value,
            });
        }
        Ok(value)
    }
}
