//! Territorial scope of cover
//!
//! The scope fixes the per-mille base rate applied to the sum insured and
//! the base of the minimum premium floor.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RatingError;

/// Geographic coverage tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerritorialScope {
    /// Domestic transport only
    Poland,
    /// Transport within Europe
    Europe,
    /// Worldwide transport
    World,
}

impl TerritorialScope {
    /// All scopes, cheapest first
    pub const ALL: [TerritorialScope; 3] = [
        TerritorialScope::Poland,
        TerritorialScope::Europe,
        TerritorialScope::World,
    ];

    /// Base rate in per mille of the sum insured
    pub fn base_rate_per_mille(&self) -> Decimal {
        match self {
            TerritorialScope::Poland => dec!(0.8),
            TerritorialScope::Europe => dec!(1.2),
            TerritorialScope::World => dec!(1.8),
        }
    }

    /// Minimum premium before the per-clause surcharge
    pub fn base_minimum_premium(&self) -> Decimal {
        match self {
            TerritorialScope::Poland => dec!(1500),
            TerritorialScope::Europe => dec!(2500),
            TerritorialScope::World => dec!(4000),
        }
    }

    /// Wire identifier
    pub fn code(&self) -> &'static str {
        match self {
            TerritorialScope::Poland => "POLAND",
            TerritorialScope::Europe => "EUROPE",
            TerritorialScope::World => "WORLD",
        }
    }
}

impl fmt::Display for TerritorialScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TerritorialScope {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerritorialScope::ALL
            .into_iter()
            .find(|scope| scope.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RatingError::UnknownTerritorialScope(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_rates_grow_with_scope() {
        let poland = TerritorialScope::Poland.base_rate_per_mille();
        let europe = TerritorialScope::Europe.base_rate_per_mille();
        let world = TerritorialScope::World.base_rate_per_mille();
        assert!(poland < europe);
        assert!(europe < world);
    }

    #[test]
    fn test_parse_scope() {
        assert_eq!("europe".parse::<TerritorialScope>().unwrap(), TerritorialScope::Europe);
        assert!(matches!(
            "MARS".parse::<TerritorialScope>(),
            Err(RatingError::UnknownTerritorialScope(_))
        ));
    }
}
