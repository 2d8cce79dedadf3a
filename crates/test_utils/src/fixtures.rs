//! Pre-built Test Fixtures
//!
//! Ready-made needs-analysis profiles and clause selections. Each profile
//! documents the risk score it produces so tests can rely on it.

use std::collections::BTreeSet;

use domain_rating::{AdrClass, ApkData, ClauseType};
use rust_decimal_macros::dec;

/// Fixture for needs-analysis (APK) data
pub struct ApkFixtures;

impl ApkFixtures {
    /// Nothing declared: score 0, LOW, claims ratio 0 with default shipments
    pub fn empty() -> ApkData {
        ApkData::default()
    }

    /// Domestic general cargo, clean record: score 0, LOW
    pub fn domestic_general_cargo() -> ApkData {
        ApkData {
            main_cargo_types: Some(vec!["drobnica".to_string(), "palety".to_string()]),
            average_cargo_value: Some(dec!(40000)),
            max_single_shipment_value: Some(dec!(150000)),
            monthly_shipments: Some(30),
            claims_last_3_years: Some(0),
            high_value_goods: Some(false),
            dangerous_goods: Some(false),
            temperature_controlled: Some(false),
            international_transport: Some(false),
        }
    }

    /// International reefer carrier: score 3, MEDIUM
    pub fn international_reefer() -> ApkData {
        ApkData {
            main_cargo_types: Some(vec!["żywność".to_string()]),
            average_cargo_value: Some(dec!(90000)),
            max_single_shipment_value: Some(dec!(300000)),
            monthly_shipments: Some(60),
            claims_last_3_years: Some(2),
            temperature_controlled: Some(true),
            international_transport: Some(true),
            ..Default::default()
        }
    }

    /// Electronics over 1 mln per load: score 5, MEDIUM
    pub fn high_value_electronics() -> ApkData {
        ApkData {
            main_cargo_types: Some(vec!["elektronika".to_string()]),
            average_cargo_value: Some(dec!(600000)),
            max_single_shipment_value: Some(dec!(1200000)),
            monthly_shipments: Some(20),
            claims_last_3_years: Some(1),
            high_value_goods: Some(true),
            ..Default::default()
        }
    }

    /// Dangerous goods, international, frequent claims: score 6, HIGH
    pub fn adr_tanker() -> ApkData {
        ApkData {
            main_cargo_types: Some(vec!["paliwa".to_string()]),
            average_cargo_value: Some(dec!(120000)),
            max_single_shipment_value: Some(dec!(400000)),
            monthly_shipments: Some(40),
            claims_last_3_years: Some(6),
            dangerous_goods: Some(true),
            international_transport: Some(true),
            ..Default::default()
        }
    }

    /// Every risk factor at its maximum: score 15, VERY_HIGH, bonus-malus 1.50
    pub fn worst_case() -> ApkData {
        ApkData {
            main_cargo_types: Some(vec!["chemikalia".to_string()]),
            average_cargo_value: Some(dec!(800000)),
            max_single_shipment_value: Some(dec!(2500000)),
            monthly_shipments: Some(10),
            claims_last_3_years: Some(12),
            high_value_goods: Some(true),
            dangerous_goods: Some(true),
            temperature_controlled: Some(true),
            international_transport: Some(true),
        }
    }
}

/// Fixture for clause and ADR selections
pub struct SelectionFixtures;

impl SelectionFixtures {
    /// No clauses
    pub fn no_clauses() -> BTreeSet<ClauseType> {
        BTreeSet::new()
    }

    /// Gross negligence and parking, rated at 12% and 16%
    pub fn negligence_and_parking() -> BTreeSet<ClauseType> {
        [ClauseType::GrossNegligence, ClauseType::Parking].into_iter().collect()
    }

    /// Every clause in the standard table
    pub fn all_clauses() -> BTreeSet<ClauseType> {
        ClauseType::ALL.into_iter().collect()
    }

    /// ADR classes that are accepted without referral
    pub fn routine_adr_classes() -> BTreeSet<AdrClass> {
        [AdrClass::FlammableLiquids, AdrClass::Corrosives].into_iter().collect()
    }

    /// ADR classes that need an underwriter
    pub fn referral_adr_classes() -> BTreeSet<AdrClass> {
        [AdrClass::Gases, AdrClass::ToxicSubstances].into_iter().collect()
    }
}
