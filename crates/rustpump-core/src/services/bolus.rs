//! Bolus dosage quantization and payload encoding.
//!
//! A requested amount in milliunits is rounded down to a whole number of
//! pump strokes and written as the stroke count the bolus command carries:
//! one byte for [`Generation::Legacy`] pumps, two little-endian bytes for
//! [`Generation::Current`] ones. The pump is never asked for more insulin than
//! requested.

use core::fmt;
use core::ops::Deref;

use thiserror::Error;

use crate::encoding::writer::Writer;
use crate::types::{DeviceFamily, Generation, Insulin, StrokeTable, MAX_BOLUS};
use crate::EncodeError;

/// Command code the dispatch layer sends a bolus payload under.
pub const COMMAND_BOLUS: u8 = 0x42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BolusViolation {
    #[error("bolus amount ({0}) is negative")]
    Negative(Insulin),
    #[error("bolus amount ({0}) is too large")]
    TooLarge(Insulin),
}

/// Every bound a request violated, in check order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(Vec<BolusViolation>);

impl Violations {
    pub fn iter(&self) -> impl Iterator<Item = &BolusViolation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, violation: &BolusViolation) -> bool {
        self.0.contains(violation)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BolusError {
    #[error("{0}")]
    Invalid(Violations),
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}

impl BolusError {
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Invalid(v) => Some(v),
            Self::Encode(_) => None,
        }
    }
}

/// Checks every bound on `amount` and reports all that fail.
pub fn validate(amount: Insulin) -> Result<(), Violations> {
    let mut found = Vec::new();
    if amount.is_negative() {
        found.push(BolusViolation::Negative(amount));
    }
    if amount > MAX_BOLUS {
        found.push(BolusViolation::TooLarge(amount));
    }
    if found.is_empty() {
        Ok(())
    } else {
        Err(Violations(found))
    }
}

/// Result of rounding a request to whole strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantized {
    pub family: DeviceFamily,
    pub strokes: u32,
    pub requested: Insulin,
    /// Amount the strokes deliver; never above `requested`.
    pub actual: Insulin,
}

impl Quantized {
    pub fn is_lossy(&self) -> bool {
        self.actual != self.requested
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        encode_strokes(w, self.strokes, self.family.generation())
    }

    pub fn payload(&self) -> Result<Payload, EncodeError> {
        let mut payload = Payload::default();
        let mut w = Writer::new(&mut payload.buf);
        self.encode(&mut w)?;
        payload.len = w.position();
        Ok(payload)
    }
}

/// Rounds `amount` down to whole strokes of `family`.
///
/// Bound violations are all collected before anything is computed; a request
/// with any violation yields no stroke count.
pub fn quantize(
    amount: Insulin,
    family: DeviceFamily,
    table: &StrokeTable,
) -> Result<Quantized, BolusError> {
    validate(amount).map_err(BolusError::Invalid)?;
    let unit = i32::from(table.milli_units_per_stroke(family));
    let strokes = amount.milli_units() / unit;
    let actual = Insulin(strokes * unit);
    if actual != amount {
        log::info!("rounding bolus from {amount} to {actual}");
    }
    Ok(Quantized {
        family,
        // non-negative once validated
        strokes: strokes.unsigned_abs(),
        requested: amount,
        actual,
    })
}

/// Writes a stroke count at the width `generation` uses.
pub fn encode_strokes(
    w: &mut Writer<'_>,
    strokes: u32,
    generation: Generation,
) -> Result<(), EncodeError> {
    if strokes > generation.max_strokes() {
        let width = generation.stroke_width();
        log::error!("{strokes} strokes overflow {width}-byte {generation:?} payload");
        return Err(EncodeError::StrokeOverflow { strokes, width });
    }
    match generation {
        Generation::Legacy => w.write_u8(strokes as u8),
        Generation::Current => w.write_le_u16(strokes as u16),
    }
}

/// An encoded stroke count, one or two bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Payload {
    buf: [u8; 2],
    len: usize,
}

impl Payload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Deref for Payload {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BolusRequest {
    pub amount: Insulin,
    pub family: DeviceFamily,
}

impl BolusRequest {
    pub const fn new(amount: Insulin, family: DeviceFamily) -> Self {
        Self { amount, family }
    }

    pub fn quantize(&self, table: &StrokeTable) -> Result<Quantized, BolusError> {
        quantize(self.amount, self.family, table)
    }

    pub fn encode(&self, table: &StrokeTable, w: &mut Writer<'_>) -> Result<Quantized, BolusError> {
        let q = self.quantize(table)?;
        q.encode(w)?;
        Ok(q)
    }

    pub fn payload(&self, table: &StrokeTable) -> Result<Payload, BolusError> {
        Ok(self.quantize(table)?.payload()?)
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_strokes, quantize, validate, BolusError, BolusRequest, BolusViolation};
    use crate::encoding::writer::Writer;
    use crate::types::{DeviceFamily, Generation, Insulin, StrokeTable};
    use crate::EncodeError;
    use proptest::prelude::*;

    fn fifty() -> StrokeTable {
        StrokeTable::new(50, 50).unwrap()
    }

    #[test]
    fn exact_amount_is_not_lossy() {
        let q = quantize(Insulin(1000), DeviceFamily(23), &fifty()).unwrap();
        assert_eq!(q.strokes, 20);
        assert_eq!(q.actual, Insulin(1000));
        assert!(!q.is_lossy());
    }

    #[test]
    fn partial_stroke_rounds_down() {
        let q = quantize(Insulin(1025), DeviceFamily(23), &fifty()).unwrap();
        assert_eq!(q.strokes, 20);
        assert_eq!(q.actual, Insulin(1000));
        assert_eq!(q.requested, Insulin(1025));
        assert!(q.is_lossy());
    }

    #[test]
    fn bounds_are_enforced() {
        let table = StrokeTable::default();
        let err = quantize(Insulin(-1), DeviceFamily(22), &table).unwrap_err();
        let v = err.violations().unwrap();
        assert_eq!(v.len(), 1);
        assert!(v.contains(&BolusViolation::Negative(Insulin(-1))));

        let err = quantize(Insulin(25_001), DeviceFamily(22), &table).unwrap_err();
        assert!(err
            .violations()
            .unwrap()
            .contains(&BolusViolation::TooLarge(Insulin(25_001))));
        assert_eq!(err.to_string(), "bolus amount (25.001) is too large");

        assert!(quantize(Insulin(25_000), DeviceFamily(22), &table).is_ok());
        assert!(quantize(Insulin(0), DeviceFamily(22), &table).is_ok());
    }

    #[test]
    fn validate_passes_in_range() {
        assert!(validate(Insulin(0)).is_ok());
        assert!(validate(Insulin(12_345)).is_ok());
        assert_eq!(validate(Insulin(i32::MIN)).unwrap_err().len(), 1);
    }

    #[test]
    fn invalid_request_writes_nothing() {
        let mut buf = [0u8; 2];
        let mut w = Writer::new(&mut buf);
        let req = BolusRequest::new(Insulin(-100), DeviceFamily(23));
        assert!(matches!(
            req.encode(&StrokeTable::default(), &mut w),
            Err(BolusError::Invalid(_))
        ));
        assert!(w.as_written().is_empty());
    }

    #[test]
    fn payload_width_follows_generation() {
        let table = fifty();
        let legacy = BolusRequest::new(Insulin(1000), DeviceFamily(22))
            .payload(&table)
            .unwrap();
        assert_eq!(legacy.as_bytes(), &[20]);

        let current = BolusRequest::new(Insulin(1000), DeviceFamily(23))
            .payload(&table)
            .unwrap();
        assert_eq!(&*current, &[20, 0]);
    }

    #[test]
    fn default_table_payloads() {
        let table = StrokeTable::default();
        // 2.5 U at 0.1 U/stroke
        let p = BolusRequest::new(Insulin(2500), DeviceFamily(15))
            .payload(&table)
            .unwrap();
        assert_eq!(p.as_bytes(), &[25]);
        // 25 U at 0.025 U/stroke = 1000 strokes
        let p = BolusRequest::new(Insulin(25_000), DeviceFamily(54))
            .payload(&table)
            .unwrap();
        assert_eq!(p.as_bytes(), &[0xE8, 0x03]);
        assert_eq!(u16::from_le_bytes([p[0], p[1]]), 1000);
    }

    #[test]
    fn legacy_overflow_fails() {
        // 25 U at 0.05 U/stroke is 500 strokes, too many for one byte.
        let err = BolusRequest::new(Insulin(25_000), DeviceFamily(22))
            .payload(&fifty())
            .unwrap_err();
        assert_eq!(
            err,
            BolusError::Encode(EncodeError::StrokeOverflow {
                strokes: 500,
                width: 1
            })
        );
    }

    #[test]
    fn overflow_reports_actual_stroke_count() {
        // One milliunit per stroke: 25 U is 25000 strokes.
        let table = StrokeTable::new(1, 1).unwrap();
        let q = quantize(Insulin(25_000), DeviceFamily(22), &table).unwrap();
        assert_eq!(q.strokes, 25_000);
        assert_eq!(
            q.payload().unwrap_err(),
            EncodeError::StrokeOverflow {
                strokes: 25_000,
                width: 1
            }
        );
        let q = quantize(Insulin(25_000), DeviceFamily(23), &table).unwrap();
        assert_eq!(q.payload().unwrap().as_bytes(), &[0xA8, 0x61]);
    }

    #[test]
    fn encode_strokes_rejects_wide_counts() {
        let mut buf = [0u8; 4];
        let mut w = Writer::new(&mut buf);
        assert_eq!(
            encode_strokes(&mut w, 70_000, Generation::Current).unwrap_err(),
            EncodeError::StrokeOverflow {
                strokes: 70_000,
                width: 2
            }
        );
        assert!(w.as_written().is_empty());
    }

    #[test]
    fn encode_strokes_needs_room() {
        let mut buf = [0u8; 1];
        let mut w = Writer::new(&mut buf);
        assert_eq!(
            encode_strokes(&mut w, 300, Generation::Current).unwrap_err(),
            EncodeError::BufferTooSmall
        );
    }

    proptest! {
        #[test]
        fn never_over_delivers(amount in 0i32..=25_000, unit in 1u16..=200, family in 0u8..=60) {
            let table = StrokeTable::new(unit, unit).unwrap();
            let q = quantize(Insulin(amount), DeviceFamily(family), &table).unwrap();
            prop_assert!(q.actual <= q.requested);
            let shortfall = q.requested.milli_units() - q.actual.milli_units();
            prop_assert!(shortfall < i32::from(unit));
            prop_assert_eq!(
                i64::from(q.actual.milli_units()),
                i64::from(q.strokes) * i64::from(unit)
            );
        }
    }
}
