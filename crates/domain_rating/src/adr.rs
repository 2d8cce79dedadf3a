//! ADR dangerous-goods classes
//!
//! The 13 UN/ADR hazard classes with their pricing multiplier and the two
//! underwriting flags: declined (never insured) and referral (needs an
//! underwriter). The queries here never block a calculation; callers decide
//! what to do with a declined class before rating.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::RatingError;

/// Surcharge per additional hazard class carried alongside the riskiest one
pub const MULTI_CLASS_SURCHARGE: Decimal = dec!(0.05);

/// UN/ADR hazard class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdrClass {
    #[serde(rename = "1")]
    Explosives,
    #[serde(rename = "2")]
    Gases,
    #[serde(rename = "3")]
    FlammableLiquids,
    #[serde(rename = "4.1")]
    FlammableSolids,
    #[serde(rename = "4.2")]
    SpontaneouslyCombustible,
    #[serde(rename = "4.3")]
    DangerousWhenWet,
    #[serde(rename = "5.1")]
    OxidizingSubstances,
    #[serde(rename = "5.2")]
    OrganicPeroxides,
    #[serde(rename = "6.1")]
    ToxicSubstances,
    #[serde(rename = "6.2")]
    InfectiousSubstances,
    #[serde(rename = "7")]
    Radioactive,
    #[serde(rename = "8")]
    Corrosives,
    #[serde(rename = "9")]
    Miscellaneous,
}

impl AdrClass {
    /// All 13 classes in UN numbering order
    pub const ALL: [AdrClass; 13] = [
        AdrClass::Explosives,
        AdrClass::Gases,
        AdrClass::FlammableLiquids,
        AdrClass::FlammableSolids,
        AdrClass::SpontaneouslyCombustible,
        AdrClass::DangerousWhenWet,
        AdrClass::OxidizingSubstances,
        AdrClass::OrganicPeroxides,
        AdrClass::ToxicSubstances,
        AdrClass::InfectiousSubstances,
        AdrClass::Radioactive,
        AdrClass::Corrosives,
        AdrClass::Miscellaneous,
    ];

    /// UN class number, e.g. `"4.1"`
    pub fn id(&self) -> &'static str {
        match self {
            AdrClass::Explosives => "1",
            AdrClass::Gases => "2",
            AdrClass::FlammableLiquids => "3",
            AdrClass::FlammableSolids => "4.1",
            AdrClass::SpontaneouslyCombustible => "4.2",
            AdrClass::DangerousWhenWet => "4.3",
            AdrClass::OxidizingSubstances => "5.1",
            AdrClass::OrganicPeroxides => "5.2",
            AdrClass::ToxicSubstances => "6.1",
            AdrClass::InfectiousSubstances => "6.2",
            AdrClass::Radioactive => "7",
            AdrClass::Corrosives => "8",
            AdrClass::Miscellaneous => "9",
        }
    }
}

impl fmt::Display for AdrClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AdrClass {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdrClass::ALL
            .into_iter()
            .find(|class| class.id() == s.trim())
            .ok_or_else(|| RatingError::UnknownAdrClass(s.to_string()))
    }
}

/// Underwriting definition of one ADR class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdrClassDefinition {
    pub class_id: AdrClass,
    pub name: String,
    /// Pricing multiplier, never below 1.0
    pub risk_multiplier: Decimal,
    pub is_declined: bool,
    pub requires_referral: bool,
}

impl AdrClassDefinition {
    fn new(
        class_id: AdrClass,
        name: &str,
        risk_multiplier: Decimal,
        is_declined: bool,
        requires_referral: bool,
    ) -> Self {
        Self {
            class_id,
            name: name.to_string(),
            risk_multiplier,
            is_declined,
            requires_referral,
        }
    }
}

/// Registry of ADR class definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdrTable {
    classes: BTreeMap<AdrClass, AdrClassDefinition>,
}

impl AdrTable {
    /// Builds a table from definitions; later duplicates replace earlier ones
    pub fn from_definitions(definitions: impl IntoIterator<Item = AdrClassDefinition>) -> Self {
        Self {
            classes: definitions.into_iter().map(|d| (d.class_id, d)).collect(),
        }
    }

    /// The production ADR table
    pub fn standard() -> Self {
        use AdrClass::*;

        // (class, name, multiplier, declined, referral)
        let rows = [
            (Explosives, "Materiały wybuchowe", dec!(2.00), true, true),
            (Gases, "Gazy", dec!(1.50), false, true),
            (FlammableLiquids, "Materiały ciekłe zapalne", dec!(1.30), false, false),
            (FlammableSolids, "Materiały stałe zapalne", dec!(1.25), false, false),
            (SpontaneouslyCombustible, "Materiały samozapalne", dec!(1.40), false, true),
            (
                DangerousWhenWet,
                "Materiały wytwarzające w zetknięciu z wodą gazy zapalne",
                dec!(1.40),
                false,
                true,
            ),
            (OxidizingSubstances, "Materiały utleniające", dec!(1.30), false, false),
            (OrganicPeroxides, "Nadtlenki organiczne", dec!(1.50), false, true),
            (ToxicSubstances, "Materiały trujące", dec!(1.50), false, true),
            (InfectiousSubstances, "Materiały zakaźne", dec!(1.60), false, true),
            (Radioactive, "Materiały promieniotwórcze", dec!(2.00), true, true),
            (Corrosives, "Materiały żrące", dec!(1.25), false, false),
            (
                Miscellaneous,
                "Różne materiały i przedmioty niebezpieczne",
                dec!(1.10),
                false,
                false,
            ),
        ];

        Self::from_definitions(rows.into_iter().map(
            |(class, name, multiplier, declined, referral)| {
                AdrClassDefinition::new(class, name, multiplier, declined, referral)
            },
        ))
    }

    /// Looks up a class definition
    pub fn get(&self, class: AdrClass) -> Result<&AdrClassDefinition, RatingError> {
        self.classes
            .get(&class)
            .ok_or_else(|| RatingError::UnknownAdrClass(class.to_string()))
    }

    /// Iterates over all definitions in UN order
    pub fn iter(&self) -> impl Iterator<Item = &AdrClassDefinition> {
        self.classes.values()
    }

    /// Number of defined classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no class is defined
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Combined pricing multiplier for a selection of classes
    ///
    /// Empty selection gives `1.0`. Otherwise the riskiest class sets the
    /// base and every further class adds [`MULTI_CLASS_SURCHARGE`]. The
    /// result is rounded to 2 decimal places.
    pub fn calculate_adr_multiplier(
        &self,
        selected: &BTreeSet<AdrClass>,
    ) -> Result<Decimal, RatingError> {
        if selected.is_empty() {
            return Ok(dec!(1.0));
        }

        let mut max_multiplier = dec!(1.0);
        for class in selected {
            max_multiplier = max_multiplier.max(self.get(*class)?.risk_multiplier);
        }

        let surcharge = MULTI_CLASS_SURCHARGE * Decimal::from(selected.len() - 1);
        Ok((max_multiplier + surcharge)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Selected classes that are never insured (query only)
    pub fn declined_classes(
        &self,
        selected: &BTreeSet<AdrClass>,
    ) -> Result<Vec<AdrClass>, RatingError> {
        let mut declined = Vec::new();
        for class in selected {
            if self.get(*class)?.is_declined {
                declined.push(*class);
            }
        }
        Ok(declined)
    }

    /// Returns true if any selected class has to be seen by an underwriter
    pub fn requires_adr_referral(
        &self,
        selected: &BTreeSet<AdrClass>,
    ) -> Result<bool, RatingError> {
        for class in selected {
            if self.get(*class)?.requires_referral {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Default for AdrTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(classes: &[AdrClass]) -> BTreeSet<AdrClass> {
        classes.iter().copied().collect()
    }

    #[test]
    fn test_empty_selection_is_neutral() {
        let table = AdrTable::standard();
        assert_eq!(table.calculate_adr_multiplier(&BTreeSet::new()).unwrap(), dec!(1.0));
    }

    #[test]
    fn test_single_class_uses_its_multiplier() {
        let table = AdrTable::standard();
        let multiplier = table
            .calculate_adr_multiplier(&set(&[AdrClass::Miscellaneous]))
            .unwrap();
        assert_eq!(multiplier, dec!(1.10));
    }

    #[test]
    fn test_second_class_adds_surcharge_to_max() {
        let table = AdrTable::standard();
        let multiplier = table
            .calculate_adr_multiplier(&set(&[AdrClass::Miscellaneous, AdrClass::Corrosives]))
            .unwrap();
        assert_eq!(multiplier, dec!(1.30));
    }

    #[test]
    fn test_declined_classes_are_explosives_and_radioactive() {
        let table = AdrTable::standard();
        let declined = table.declined_classes(&set(&AdrClass::ALL)).unwrap();
        assert_eq!(declined, vec![AdrClass::Explosives, AdrClass::Radioactive]);
    }

    #[test]
    fn test_referral_flag() {
        let table = AdrTable::standard();
        assert!(!table.requires_adr_referral(&set(&[AdrClass::FlammableLiquids])).unwrap());
        assert!(table
            .requires_adr_referral(&set(&[AdrClass::FlammableLiquids, AdrClass::Gases]))
            .unwrap());
    }

    #[test]
    fn test_class_ids_round_trip() {
        for class in AdrClass::ALL {
            assert_eq!(class.id().parse::<AdrClass>().unwrap(), class);
        }
        assert!(matches!("4.4".parse::<AdrClass>(), Err(RatingError::UnknownAdrClass(_))));
    }
}
