//! Stroke size lookup keyed by pump family.
//!
//! A stroke is the smallest increment the pump can deliver. Its size is fixed
//! per hardware era; the table is built once at start-up and shared read-only.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::{DeviceFamily, Generation};

/// 0.1 U per stroke.
pub const LEGACY_MILLI_UNITS_PER_STROKE: u16 = 100;
/// 0.025 U per stroke.
pub const CURRENT_MILLI_UNITS_PER_STROKE: u16 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StrokeTableError {
    #[error("stroke size for {0:?} pumps must be positive")]
    ZeroGeneration(Generation),
    #[error("stroke size for family {0} must be positive")]
    ZeroFamily(DeviceFamily),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawStrokeTable"))]
pub struct StrokeTable {
    legacy: u16,
    current: u16,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "BTreeMap::is_empty"))]
    families: BTreeMap<DeviceFamily, u16>,
}

impl Default for StrokeTable {
    fn default() -> Self {
        Self {
            legacy: LEGACY_MILLI_UNITS_PER_STROKE,
            current: CURRENT_MILLI_UNITS_PER_STROKE,
            families: BTreeMap::new(),
        }
    }
}

impl StrokeTable {
    pub fn new(legacy: u16, current: u16) -> Result<Self, StrokeTableError> {
        if legacy == 0 {
            return Err(StrokeTableError::ZeroGeneration(Generation::Legacy));
        }
        if current == 0 {
            return Err(StrokeTableError::ZeroGeneration(Generation::Current));
        }
        Ok(Self {
            legacy,
            current,
            families: BTreeMap::new(),
        })
    }

    /// Overrides the stroke size of a single family.
    pub fn with_family(
        mut self,
        family: DeviceFamily,
        milli_units: u16,
    ) -> Result<Self, StrokeTableError> {
        if milli_units == 0 {
            return Err(StrokeTableError::ZeroFamily(family));
        }
        self.families.insert(family, milli_units);
        Ok(self)
    }

    pub fn milli_units_per_stroke(&self, family: DeviceFamily) -> u16 {
        if let Some(&m) = self.families.get(&family) {
            return m;
        }
        match family.generation() {
            Generation::Legacy => self.legacy,
            Generation::Current => self.current,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawStrokeTable {
    #[serde(default = "default_legacy")]
    legacy: u16,
    #[serde(default = "default_current")]
    current: u16,
    #[serde(default)]
    families: BTreeMap<DeviceFamily, u16>,
}

#[cfg(feature = "serde")]
fn default_legacy() -> u16 {
    LEGACY_MILLI_UNITS_PER_STROKE
}

#[cfg(feature = "serde")]
fn default_current() -> u16 {
    CURRENT_MILLI_UNITS_PER_STROKE
}

#[cfg(feature = "serde")]
impl TryFrom<RawStrokeTable> for StrokeTable {
    type Error = StrokeTableError;

    fn try_from(raw: RawStrokeTable) -> Result<Self, Self::Error> {
        raw.families
            .into_iter()
            .try_fold(Self::new(raw.legacy, raw.current)?, |table, (family, m)| {
                table.with_family(family, m)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{StrokeTable, StrokeTableError};
    use crate::types::{DeviceFamily, Generation};

    #[test]
    fn default_follows_generation() {
        let table = StrokeTable::default();
        assert_eq!(table.milli_units_per_stroke(DeviceFamily(15)), 100);
        assert_eq!(table.milli_units_per_stroke(DeviceFamily(22)), 100);
        assert_eq!(table.milli_units_per_stroke(DeviceFamily(23)), 25);
        assert_eq!(table.milli_units_per_stroke(DeviceFamily(54)), 25);
    }

    #[test]
    fn family_override_wins() {
        let table = StrokeTable::default()
            .with_family(DeviceFamily(23), 50)
            .unwrap();
        assert_eq!(table.milli_units_per_stroke(DeviceFamily(23)), 50);
        assert_eq!(table.milli_units_per_stroke(DeviceFamily(54)), 25);
    }

    #[test]
    fn zero_stroke_size_is_rejected() {
        assert_eq!(
            StrokeTable::new(0, 25).unwrap_err(),
            StrokeTableError::ZeroGeneration(Generation::Legacy)
        );
        assert_eq!(
            StrokeTable::default()
                .with_family(DeviceFamily(30), 0)
                .unwrap_err(),
            StrokeTableError::ZeroFamily(DeviceFamily(30))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_from_json() {
        let table: StrokeTable =
            serde_json::from_str(r#"{"current": 50, "families": {"54": 20}}"#).unwrap();
        assert_eq!(table.milli_units_per_stroke(DeviceFamily(22)), 100);
        assert_eq!(table.milli_units_per_stroke(DeviceFamily(23)), 50);
        assert_eq!(table.milli_units_per_stroke(DeviceFamily(54)), 20);
        assert!(serde_json::from_str::<StrokeTable>(r#"{"legacy": 0}"#).is_err());
    }
}
