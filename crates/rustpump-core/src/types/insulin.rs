use core::fmt;

/// Largest bolus the pump accepts, in milliunits.
pub const MAX_BOLUS: Insulin = Insulin(25_000);

/// A quantity of insulin in milliunits (1/1000 of a unit).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Insulin(pub i32);

impl Insulin {
    pub const fn milli_units(self) -> i32 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl From<i32> for Insulin {
    fn from(milli_units: i32) -> Self {
        Self(milli_units)
    }
}

/// Formats as units with three decimals, e.g. `1.025`.
impl fmt::Display for Insulin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:03}", abs / 1000, abs % 1000)
    }
}
