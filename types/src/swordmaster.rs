use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// What a player paid to recruit the swordmaster.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SwordmasterCost {
    Six,
    Eight,
}

impl SwordmasterCost {
    pub fn value(self) -> u8 {
        match self {
            SwordmasterCost::Six => 6,
            SwordmasterCost::Eight => 8,
        }
    }
}

impl TryFrom<u8> for SwordmasterCost {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(SwordmasterCost::Six),
            8 => Ok(SwordmasterCost::Eight),
            other => Err(format!("swordmaster cost must be 6 or 8, got {other}")),
        }
    }
}

impl TryFrom<i64> for SwordmasterCost {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| format!("swordmaster cost must be 6 or 8, got {value}"))
            .and_then(SwordmasterCost::try_from)
    }
}

impl From<SwordmasterCost> for u8 {
    fn from(cost: SwordmasterCost) -> Self {
        cost.value()
    }
}

impl Display for SwordmasterCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_six_and_eight() {
        assert_eq!(SwordmasterCost::try_from(6u8), Ok(SwordmasterCost::Six));
        assert_eq!(SwordmasterCost::try_from(8u8), Ok(SwordmasterCost::Eight));
        for bad in [0u8, 5, 7, 9, 255] {
            assert!(SwordmasterCost::try_from(bad).is_err());
        }
    }

    #[test]
    fn test_from_stored_integer() {
        assert_eq!(SwordmasterCost::try_from(8i64), Ok(SwordmasterCost::Eight));
        assert!(SwordmasterCost::try_from(-6i64).is_err());
        assert!(SwordmasterCost::try_from(262i64).is_err());
    }
}
