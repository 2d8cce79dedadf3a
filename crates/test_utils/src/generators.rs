//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating rating inputs that satisfy
//! the engine's input contract.

use std::collections::BTreeSet;

use domain_rating::{ApkData, CalculationInput, ClauseType, TerritorialScope};
use proptest::prelude::*;
use proptest::sample::subsequence;
use rust_decimal::Decimal;

/// Strategy for territorial scopes
pub fn scope_strategy() -> impl Strategy<Value = TerritorialScope> {
    prop_oneof![
        Just(TerritorialScope::Poland),
        Just(TerritorialScope::Europe),
        Just(TerritorialScope::World),
    ]
}

/// Strategy for clause selections (any subset of the standard clauses)
pub fn clause_set_strategy() -> impl Strategy<Value = BTreeSet<ClauseType>> {
    subsequence(ClauseType::ALL.to_vec(), 0..=ClauseType::ALL.len())
        .prop_map(|clauses| clauses.into_iter().collect())
}

/// Strategy for positive sums insured, 1 PLN to 10 mln PLN in whole grosze
pub fn sum_insured_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for partially filled needs analyses
pub fn apk_strategy() -> impl Strategy<Value = ApkData> {
    (
        proptest::option::of(0i64..3_000_000i64),
        proptest::option::of(0u32..500u32),
        proptest::option::of(0u32..30u32),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(max_value, shipments, claims, high_value, dangerous, temp, international)| {
            ApkData {
                main_cargo_types: None,
                average_cargo_value: None,
                max_single_shipment_value: max_value.map(Decimal::from),
                monthly_shipments: shipments,
                claims_last_3_years: claims,
                high_value_goods: high_value,
                dangerous_goods: dangerous,
                temperature_controlled: temp,
                international_transport: international,
            }
        })
}

/// Strategy for complete, valid calculation inputs
pub fn calculation_input_strategy() -> impl Strategy<Value = CalculationInput> {
    (
        sum_insured_strategy(),
        scope_strategy(),
        clause_set_strategy(),
        apk_strategy(),
        0u32..40u32,
        1u32..200u32,
    )
        .prop_map(|(sum_insured, territorial_scope, selected_clauses, apk_data, years, fleet)| {
            CalculationInput {
                sum_insured,
                territorial_scope,
                selected_clauses,
                apk_data,
                years_in_business: years,
                fleet_size: fleet,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn sum_insured_is_always_positive(sum in sum_insured_strategy()) {
            prop_assert!(sum > Decimal::ZERO);
        }

        #[test]
        fn generated_inputs_have_a_fleet(input in calculation_input_strategy()) {
            prop_assert!(input.fleet_size >= 1);
            prop_assert!(input.selected_clauses.len() <= ClauseType::ALL.len());
        }
    }
}
