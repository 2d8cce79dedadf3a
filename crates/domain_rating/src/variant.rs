//! Coverage variants
//!
//! Named bundles of clauses sold with a bundle discount. Variant
//! resolution happens before rating; the engine only ever sees the
//! resolved clause set.

use core_kernel::Rate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::clause::ClauseType;
use crate::error::RatingError;

/// Named coverage bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageVariantType {
    /// Base OCPD cover without clauses
    Basic,
    Standard,
    Extended,
    Premium,
    /// Broker-picked clause set, no bundle discount
    Custom,
}

impl CoverageVariantType {
    pub const ALL: [CoverageVariantType; 5] = [
        CoverageVariantType::Basic,
        CoverageVariantType::Standard,
        CoverageVariantType::Extended,
        CoverageVariantType::Premium,
        CoverageVariantType::Custom,
    ];

    /// Wire identifier
    pub fn code(&self) -> &'static str {
        match self {
            CoverageVariantType::Basic => "BASIC",
            CoverageVariantType::Standard => "STANDARD",
            CoverageVariantType::Extended => "EXTENDED",
            CoverageVariantType::Premium => "PREMIUM",
            CoverageVariantType::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for CoverageVariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CoverageVariantType {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoverageVariantType::ALL
            .into_iter()
            .find(|variant| variant.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RatingError::UnknownVariant(s.to_string()))
    }
}

/// Immutable definition of a coverage bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageVariant {
    #[serde(rename = "type")]
    pub variant_type: CoverageVariantType,
    pub name: String,
    /// Fixed clause set; `None` only for CUSTOM
    pub included_clauses: Option<BTreeSet<ClauseType>>,
    /// Bundle discount as a percentage of the premium
    pub bundle_discount: Decimal,
}

impl CoverageVariant {
    fn fixed(
        variant_type: CoverageVariantType,
        name: &str,
        clauses: &[ClauseType],
        bundle_discount: Decimal,
    ) -> Self {
        Self {
            variant_type,
            name: name.to_string(),
            included_clauses: Some(clauses.iter().copied().collect()),
            bundle_discount,
        }
    }

    /// Bundle discount as a [`Rate`]
    pub fn discount_rate(&self) -> Rate {
        Rate::from_percentage(self.bundle_discount)
    }

    /// Returns true for the sentinel variant without a fixed clause set
    pub fn is_custom(&self) -> bool {
        self.included_clauses.is_none()
    }
}

/// Registry of coverage variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantTable {
    variants: BTreeMap<CoverageVariantType, CoverageVariant>,
}

impl VariantTable {
    /// Builds a table from definitions; later duplicates replace earlier ones
    pub fn from_definitions(variants: impl IntoIterator<Item = CoverageVariant>) -> Self {
        Self {
            variants: variants.into_iter().map(|v| (v.variant_type, v)).collect(),
        }
    }

    /// The production variant table
    pub fn standard() -> Self {
        use ClauseType::*;
        use CoverageVariantType::*;

        let standard = [GrossNegligence, Subcontractors, LoadingUnloading];
        let extended = [GrossNegligence, Subcontractors, LoadingUnloading, Parking, Cabotage];
        let premium = [
            GrossNegligence,
            Subcontractors,
            LoadingUnloading,
            Parking,
            Cabotage,
            TemperatureControlled,
            HighValueGoods,
        ];

        Self::from_definitions([
            CoverageVariant::fixed(Basic, "Podstawowy", &[], dec!(0)),
            CoverageVariant::fixed(Standard, "Standard", &standard, dec!(5)),
            CoverageVariant::fixed(Extended, "Rozszerzony", &extended, dec!(10)),
            CoverageVariant::fixed(Premium, "Premium", &premium, dec!(15)),
            CoverageVariant {
                variant_type: Custom,
                name: "Indywidualny".to_string(),
                included_clauses: None,
                bundle_discount: dec!(0),
            },
        ])
    }

    /// Looks up a variant
    pub fn get(&self, variant: CoverageVariantType) -> Result<&CoverageVariant, RatingError> {
        self.variants
            .get(&variant)
            .ok_or_else(|| RatingError::UnknownVariant(variant.to_string()))
    }

    /// Iterates over all variants
    pub fn iter(&self) -> impl Iterator<Item = &CoverageVariant> {
        self.variants.values()
    }

    /// Number of defined variants
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Returns true if no variant is defined
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Expands a variant into the clause set to rate
    ///
    /// Fixed variants return exactly their bundle and ignore `custom_clauses`.
    /// CUSTOM returns `custom_clauses`, which must not be empty.
    pub fn resolve(
        &self,
        variant: CoverageVariantType,
        custom_clauses: &BTreeSet<ClauseType>,
    ) -> Result<BTreeSet<ClauseType>, RatingError> {
        match &self.get(variant)?.included_clauses {
            Some(clauses) => Ok(clauses.clone()),
            None if custom_clauses.is_empty() => Err(RatingError::EmptyCustomVariant),
            None => Ok(custom_clauses.clone()),
        }
    }
}

impl Default for VariantTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_variant_ignores_custom_clauses() {
        let table = VariantTable::standard();
        let extra: BTreeSet<_> = [ClauseType::Adr].into_iter().collect();
        let clauses = table.resolve(CoverageVariantType::Standard, &extra).unwrap();
        assert_eq!(clauses.len(), 3);
        assert!(!clauses.contains(&ClauseType::Adr));
    }

    #[test]
    fn test_custom_variant_uses_given_clauses() {
        let table = VariantTable::standard();
        let picked: BTreeSet<_> = [ClauseType::Adr, ClauseType::Parking].into_iter().collect();
        assert_eq!(table.resolve(CoverageVariantType::Custom, &picked).unwrap(), picked);
        assert!(table.get(CoverageVariantType::Custom).unwrap().is_custom());
    }

    #[test]
    fn test_empty_custom_variant_is_rejected() {
        let table = VariantTable::standard();
        assert!(matches!(
            table.resolve(CoverageVariantType::Custom, &BTreeSet::new()),
            Err(RatingError::EmptyCustomVariant)
        ));
    }

    #[test]
    fn test_bundle_discount_grows_with_bundle() {
        let table = VariantTable::standard();
        let standard = table.get(CoverageVariantType::Standard).unwrap().bundle_discount;
        let premium = table.get(CoverageVariantType::Premium).unwrap().bundle_discount;
        assert!(premium > standard);
    }
}
