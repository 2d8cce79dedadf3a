//! Optional coverage clauses
//!
//! Each clause extends the base OCPD cover and is priced as a percentage of
//! the adjusted base premium. The clause table is built once and shared
//! read-only by every calculation.

use core_kernel::{Money, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::RatingError;

/// Identifier of an optional coverage clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseType {
    /// Cover for losses caused by the carrier's gross negligence
    GrossNegligence,
    /// Theft from unguarded parking
    Parking,
    /// Liability for subcontracted carriers
    Subcontractors,
    /// Refrigerated / temperature-controlled cargo
    TemperatureControlled,
    /// Dangerous goods carried under ADR
    Adr,
    /// Electronics, pharmaceuticals and other high-value cargo
    HighValueGoods,
    /// Damage during loading and unloading
    LoadingUnloading,
    /// Cabotage runs inside foreign countries
    Cabotage,
}

impl ClauseType {
    /// Every clause type, in table order
    pub const ALL: [ClauseType; 8] = [
        ClauseType::GrossNegligence,
        ClauseType::Parking,
        ClauseType::Subcontractors,
        ClauseType::TemperatureControlled,
        ClauseType::Adr,
        ClauseType::HighValueGoods,
        ClauseType::LoadingUnloading,
        ClauseType::Cabotage,
    ];

    /// Wire identifier
    pub fn code(&self) -> &'static str {
        match self {
            ClauseType::GrossNegligence => "GROSS_NEGLIGENCE",
            ClauseType::Parking => "PARKING",
            ClauseType::Subcontractors => "SUBCONTRACTORS",
            ClauseType::TemperatureControlled => "TEMPERATURE_CONTROLLED",
            ClauseType::Adr => "ADR",
            ClauseType::HighValueGoods => "HIGH_VALUE_GOODS",
            ClauseType::LoadingUnloading => "LOADING_UNLOADING",
            ClauseType::Cabotage => "CABOTAGE",
        }
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ClauseType {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClauseType::ALL
            .into_iter()
            .find(|clause| clause.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RatingError::UnknownClause(s.to_string()))
    }
}

/// Underwriting risk category of a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseRiskCategory {
    Standard,
    Elevated,
    High,
}

/// Immutable pricing definition of one clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseDefinition {
    /// Clause this definition prices
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    /// Display name shown on quotes
    pub name: String,
    /// Premium rate as a percentage of the adjusted base premium
    pub base_premium_rate: Decimal,
    /// Default payout cap as a percentage of the sum insured
    pub default_sublimit_percentage: Decimal,
    /// Underwriting risk category
    pub risk_category: ClauseRiskCategory,
}

impl ClauseDefinition {
    fn new(
        clause_type: ClauseType,
        name: &str,
        base_premium_rate: Decimal,
        default_sublimit_percentage: Decimal,
        risk_category: ClauseRiskCategory,
    ) -> Self {
        Self {
            clause_type,
            name: name.to_string(),
            base_premium_rate,
            default_sublimit_percentage,
            risk_category,
        }
    }

    /// Premium rate as a [`Rate`]
    pub fn premium_rate(&self) -> Rate {
        Rate::from_percentage(self.base_premium_rate)
    }

    /// Default sublimit share as a [`Rate`]
    pub fn sublimit_rate(&self) -> Rate {
        Rate::from_percentage(self.default_sublimit_percentage)
    }
}

/// Registry of clause definitions keyed by clause type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClauseTable {
    definitions: BTreeMap<ClauseType, ClauseDefinition>,
}

impl ClauseTable {
    /// Builds a table from definitions; later duplicates replace earlier ones
    pub fn from_definitions(definitions: impl IntoIterator<Item = ClauseDefinition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|d| (d.clause_type, d))
                .collect(),
        }
    }

    /// The production clause table
    pub fn standard() -> Self {
        use ClauseRiskCategory::*;
        use ClauseType::*;

        // (clause, name, premium rate %, sublimit %, category)
        let rows = [
            (GrossNegligence, "Rażące niedbalstwo", dec!(12), dec!(100), Standard),
            (Parking, "Parkingi niestrzeżone", dec!(16), dec!(50), Elevated),
            (Subcontractors, "Podwykonawcy", dec!(10), dec!(100), Standard),
            (
                TemperatureControlled,
                "Transport w temperaturze kontrolowanej",
                dec!(15),
                dec!(50),
                Elevated,
            ),
            (Adr, "Towary niebezpieczne (ADR)", dec!(20), dec!(30), High),
            (HighValueGoods, "Towary o wysokiej wartości", dec!(18), dec!(25), High),
            (LoadingUnloading, "Załadunek i rozładunek", dec!(6), dec!(50), Standard),
            (Cabotage, "Kabotaż", dec!(5), dec!(100), Standard),
        ];

        Self::from_definitions(rows.into_iter().map(
            |(clause, name, rate, sublimit, category)| {
                ClauseDefinition::new(clause, name, rate, sublimit, category)
            },
        ))
    }

    /// Looks up a clause definition
    ///
    /// # Errors
    ///
    /// Returns `MissingClauseDefinition` when the table has no entry for `clause_type`.
    pub fn get(&self, clause_type: ClauseType) -> Result<&ClauseDefinition, RatingError> {
        self.definitions
            .get(&clause_type)
            .ok_or_else(|| RatingError::MissingClauseDefinition(clause_type.to_string()))
    }

    /// Iterates over all definitions in clause order
    pub fn iter(&self) -> impl Iterator<Item = &ClauseDefinition> {
        self.definitions.values()
    }

    /// Number of defined clauses
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if no clause is defined
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Premium for one clause: `adjusted_base_premium × rate`
    ///
    /// The result is unrounded; callers round when reporting.
    ///
    /// # Errors
    ///
    /// Returns `MissingClauseDefinition` for a clause absent from the table.
    /// There is no silent zero fallback.
    pub fn calculate_clause_premium(
        &self,
        clause_type: ClauseType,
        adjusted_base_premium: Decimal,
    ) -> Result<Decimal, RatingError> {
        let definition = self.get(clause_type)?;
        Ok(definition.premium_rate().apply_to(adjusted_base_premium))
    }

    /// Default payout cap for a clause given the policy's sum insured
    pub fn default_sublimit(
        &self,
        clause_type: ClauseType,
        sum_insured: &Money,
    ) -> Result<Money, RatingError> {
        let definition = self.get(clause_type)?;
        Ok(definition.sublimit_rate().apply(sum_insured).round_to_currency())
    }
}

impl Default for ClauseTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_covers_every_clause() {
        let table = ClauseTable::standard();
        for clause in ClauseType::ALL {
            assert!(table.get(clause).is_ok(), "missing {clause}");
        }
        assert_eq!(table.len(), ClauseType::ALL.len());
    }

    #[test]
    fn test_clause_premium_is_percentage_of_adjusted_base() {
        let table = ClauseTable::standard();
        let premium = table
            .calculate_clause_premium(ClauseType::GrossNegligence, dec!(1000))
            .unwrap();
        assert_eq!(premium, dec!(120));
    }

    #[test]
    fn test_missing_definition_is_an_error() {
        let table = ClauseTable::from_definitions(vec![]);
        assert!(matches!(
            table.calculate_clause_premium(ClauseType::Parking, dec!(1000)),
            Err(RatingError::MissingClauseDefinition(_))
        ));
    }

    #[test]
    fn test_default_sublimit() {
        let table = ClauseTable::standard();
        let sublimit = table
            .default_sublimit(ClauseType::Parking, &Money::pln(dec!(300000)))
            .unwrap();
        assert_eq!(sublimit.amount(), dec!(150000));
    }

    #[test]
    fn test_parse_clause_type() {
        assert_eq!("parking".parse::<ClauseType>().unwrap(), ClauseType::Parking);
        assert!(matches!("WAR".parse::<ClauseType>(), Err(RatingError::UnknownClause(_))));
    }
}
