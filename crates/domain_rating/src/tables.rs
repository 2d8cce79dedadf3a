//! Rule table set
//!
//! Bundles the clause, ADR and variant tables the engine and quote service
//! read from. The standard set is built once per process and shared by
//! reference; an alternative set can be loaded from a JSON document and is
//! validated before use.

use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::adr::{AdrClass, AdrTable};
use crate::clause::{ClauseTable, ClauseType};
use crate::error::RatingError;
use crate::variant::{CoverageVariantType, VariantTable};

static STANDARD_TABLES: Lazy<RatingTables> = Lazy::new(RatingTables::standard);

/// The complete set of rule tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingTables {
    pub clauses: ClauseTable,
    pub adr_classes: AdrTable,
    pub variants: VariantTable,
}

impl RatingTables {
    /// Builds the production tables
    pub fn standard() -> Self {
        Self {
            clauses: ClauseTable::standard(),
            adr_classes: AdrTable::standard(),
            variants: VariantTable::standard(),
        }
    }

    /// Process-wide standard tables, built on first use
    pub fn shared() -> &'static RatingTables {
        &STANDARD_TABLES
    }

    /// Parses and validates tables from a JSON document
    ///
    /// # Errors
    ///
    /// Returns `TableLoad` if the document does not parse or fails
    /// [`RatingTables::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, RatingError> {
        let tables: RatingTables = serde_json::from_str(json)
            .map_err(|e| RatingError::table_load(format!("invalid rule tables: {}", e)))?;
        tables.validate()?;
        Ok(tables)
    }

    /// Reads, parses and validates tables from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, RatingError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RatingError::table_load(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "Loading rule tables");
        Self::from_json_str(&content)
    }

    /// Checks the tables are complete and internally consistent
    ///
    /// - every clause type has a definition keyed by its own type, with
    ///   non-negative rates
    /// - all 13 ADR classes are present under their own id, with
    ///   multipliers of at least 1.0
    /// - every variant exists under its own type and only references
    ///   defined clauses
    ///
    /// Every failure is reported as `TableLoad`.
    pub fn validate(&self) -> Result<(), RatingError> {
        for clause in ClauseType::ALL {
            let definition = self.clauses.get(clause).map_err(missing)?;
            if definition.clause_type != clause {
                return Err(RatingError::table_load(format!(
                    "clause entry {} is defined as {}",
                    clause, definition.clause_type
                )));
            }
            if definition.base_premium_rate < dec!(0)
                || definition.default_sublimit_percentage < dec!(0)
            {
                return Err(RatingError::table_load(format!(
                    "clause {} has a negative rate",
                    clause
                )));
            }
        }

        for class in AdrClass::ALL {
            let definition = self.adr_classes.get(class).map_err(missing)?;
            if definition.class_id != class {
                return Err(RatingError::table_load(format!(
                    "ADR entry {} is defined as class {}",
                    class, definition.class_id
                )));
            }
            if definition.risk_multiplier < dec!(1.0) {
                return Err(RatingError::table_load(format!(
                    "ADR class {} multiplier {} is below 1.0",
                    class, definition.risk_multiplier
                )));
            }
        }

        for variant_type in CoverageVariantType::ALL {
            let variant = self.variants.get(variant_type).map_err(missing)?;
            if variant.variant_type != variant_type {
                return Err(RatingError::table_load(format!(
                    "variant entry {} is defined as {}",
                    variant_type, variant.variant_type
                )));
            }
            if variant.bundle_discount < dec!(0) || variant.bundle_discount >= dec!(100) {
                return Err(RatingError::table_load(format!(
                    "variant {} bundle discount {} is outside [0, 100)",
                    variant_type, variant.bundle_discount
                )));
            }
            match (&variant.included_clauses, variant_type) {
                (None, CoverageVariantType::Custom) => {}
                (None, _) => {
                    return Err(RatingError::table_load(format!(
                        "variant {} has no clause set",
                        variant_type
                    )))
                }
                (Some(_), CoverageVariantType::Custom) => {
                    return Err(RatingError::table_load(
                        "CUSTOM variant must not fix a clause set",
                    ))
                }
                (Some(clauses), _) => {
                    for clause in clauses {
                        self.clauses.get(*clause).map_err(missing)?;
                    }
                }
            }
        }

        Ok(())
    }
}

/// Reports an absent table entry as a load failure
fn missing(err: RatingError) -> RatingError {
    RatingError::table_load(format!("incomplete rule tables: {}", err))
}

impl Default for RatingTables {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tables_validate() {
        assert!(RatingTables::standard().validate().is_ok());
    }

    #[test]
    fn test_shared_tables_are_standard() {
        assert_eq!(RatingTables::shared(), &RatingTables::standard());
    }

    #[test]
    fn test_json_round_trip_preserves_tables() {
        let json = serde_json::to_string(&RatingTables::standard()).unwrap();
        let loaded = RatingTables::from_json_str(&json).unwrap();
        assert_eq!(loaded, RatingTables::standard());
    }

    #[test]
    fn test_invalid_json_is_a_table_error() {
        assert!(matches!(
            RatingTables::from_json_str("{\"clauses\": 3}"),
            Err(RatingError::TableLoad(_))
        ));
    }

    #[test]
    fn test_incomplete_clause_table_fails_validation() {
        let mut tables = RatingTables::standard();
        tables.clauses = ClauseTable::from_definitions(
            tables
                .clauses
                .iter()
                .filter(|d| d.clause_type != ClauseType::Cabotage)
                .cloned()
                .collect::<Vec<_>>(),
        );
        assert!(matches!(tables.validate(), Err(RatingError::TableLoad(_))));
    }

    #[test]
    fn test_missing_adr_class_is_a_table_error() {
        let mut json: serde_json::Value =
            serde_json::to_value(RatingTables::standard()).unwrap();
        json["adr_classes"]
            .as_object_mut()
            .unwrap()
            .remove("9");

        match RatingTables::from_json_str(&json.to_string()) {
            Err(RatingError::TableLoad(message)) => assert!(message.contains('9')),
            other => panic!("Expected table error, got {:?}", other),
        }
    }

    #[test]
    fn test_clause_defined_under_another_key_is_rejected() {
        let mut json: serde_json::Value =
            serde_json::to_value(RatingTables::standard()).unwrap();
        json["clauses"]["PARKING"]["type"] = serde_json::json!("ADR");
        json["clauses"]["PARKING"]["basePremiumRate"] = serde_json::json!("90");

        assert!(matches!(
            RatingTables::from_json_str(&json.to_string()),
            Err(RatingError::TableLoad(_))
        ));
    }

    #[test]
    fn test_adr_class_defined_under_another_key_is_rejected() {
        let mut json: serde_json::Value =
            serde_json::to_value(RatingTables::standard()).unwrap();
        json["adr_classes"]["3"]["classId"] = serde_json::json!("9");

        assert!(matches!(
            RatingTables::from_json_str(&json.to_string()),
            Err(RatingError::TableLoad(_))
        ));
    }

    #[test]
    fn test_variant_defined_under_another_key_is_rejected() {
        let mut json: serde_json::Value =
            serde_json::to_value(RatingTables::standard()).unwrap();
        json["variants"]["BASIC"]["type"] = serde_json::json!("STANDARD");

        assert!(matches!(
            RatingTables::from_json_str(&json.to_string()),
            Err(RatingError::TableLoad(_))
        ));
    }
}
