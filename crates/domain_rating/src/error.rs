//! Rating domain errors
//!
//! Every error here is a caller contract violation: the engine has no
//! recoverable states, and referrals are reported as data, never as errors.

use thiserror::Error;

use crate::adr::AdrClass;

/// Errors that can occur in the rating domain
#[derive(Debug, Error)]
pub enum RatingError {
    /// Sum insured must be strictly positive
    #[error("Invalid sum insured: {0} (must be greater than zero)")]
    InvalidSumInsured(String),

    /// Fleet size must be at least one vehicle
    #[error("Invalid fleet size: {0} (must be at least 1)")]
    InvalidFleetSize(u32),

    /// Clause identifier does not name a known clause
    #[error("Unknown clause type: {0}")]
    UnknownClause(String),

    /// Clause type is valid but the active clause table has no definition for it
    #[error("No clause definition for {0} in the active clause table")]
    MissingClauseDefinition(String),

    /// ADR class identifier does not name one of the 13 UN classes
    #[error("Unknown ADR class: {0}")]
    UnknownAdrClass(String),

    /// Territorial scope identifier is not supported
    #[error("Unknown territorial scope: {0}")]
    UnknownTerritorialScope(String),

    /// Coverage variant identifier is not supported
    #[error("Unknown coverage variant: {0}")]
    UnknownVariant(String),

    /// Selection contains ADR classes that are never insured
    #[error("Declined ADR classes selected: {}", format_classes(.0))]
    DeclinedAdrClasses(Vec<AdrClass>),

    /// CUSTOM variant requested without any clauses
    #[error("Custom coverage variant requires at least one clause")]
    EmptyCustomVariant,

    /// Rule tables could not be loaded or failed validation
    #[error("Rule table error: {0}")]
    TableLoad(String),
}

impl RatingError {
    /// Creates a rule table error
    pub fn table_load(message: impl Into<String>) -> Self {
        RatingError::TableLoad(message.into())
    }
}

fn format_classes(classes: &[AdrClass]) -> String {
    classes
        .iter()
        .map(|c| c.id())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declined_classes_message_lists_ids() {
        let err =
            RatingError::DeclinedAdrClasses(vec![AdrClass::Explosives, AdrClass::Radioactive]);
        assert_eq!(err.to_string(), "Declined ADR classes selected: 1, 7");
    }
}
