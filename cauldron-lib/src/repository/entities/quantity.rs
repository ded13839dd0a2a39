use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use strum::{EnumIter, IntoEnumIterator};

use crate::repository::entities::Error;

/// How many of an ingredient to buy.
///
/// The option set is closed: raw values outside 1..=5 are rejected, not
/// clamped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter, ValueEnum)]
#[repr(u64)]
pub enum Quantity {
    #[default]
    #[value(name = "1")]
    One = 1,
    #[value(name = "2")]
    Two = 2,
    #[value(name = "3")]
    Three = 3,
    #[value(name = "4")]
    Four = 4,
    #[value(name = "5")]
    Five = 5,
}

impl Quantity {
    /// The full option set a picker should offer, smallest first.
    pub fn options() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl From<Quantity> for u64 {
    fn from(quantity: Quantity) -> Self {
        quantity as u64
    }
}

impl TryFrom<u64> for Quantity {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            other => Err(Error::InvalidQuantity(other)),
        }
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u64::from(*self))
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::from(*self))
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        Self::try_from(raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_options_are_one_through_five() {
        let raw: Vec<u64> = Quantity::options().map(u64::from).collect();

        assert_eq!(raw, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            Quantity::try_from(0),
            Err(Error::InvalidQuantity(0))
        ));
        assert!(matches!(
            Quantity::try_from(6),
            Err(Error::InvalidQuantity(6))
        ));
    }

    #[test]
    fn test_roundtrip() {
        for quantity in Quantity::options() {
            assert_eq!(Quantity::try_from(u64::from(quantity)).unwrap(), quantity);
        }
    }
}
