//! Property-based tests for the rating engine and rule tables

use std::collections::BTreeSet;

use domain_rating::{
    assess_risk, AdrClass, AdrTable, ApkData, RatingEngine, RatingSettings,
};
use proptest::prelude::*;
use proptest::sample::select;
use rust_decimal_macros::dec;
use test_utils::{apk_strategy, assert_floor_holds, assert_non_negative, calculation_input_strategy};

fn adr_class_strategy() -> impl Strategy<Value = AdrClass> {
    select(AdrClass::ALL.to_vec())
}

/// Sets one boolean risk factor on an APK profile
fn with_factor(mut apk: ApkData, factor: usize) -> ApkData {
    match factor {
        0 => apk.high_value_goods = Some(true),
        1 => apk.dangerous_goods = Some(true),
        2 => apk.temperature_controlled = Some(true),
        _ => apk.international_transport = Some(true),
    }
    apk
}

proptest! {
    #[test]
    fn total_premium_never_below_floor(input in calculation_input_strategy()) {
        let result = RatingEngine::standard().calculate_premium(&input).unwrap();
        assert_floor_holds(&result);
    }

    #[test]
    fn monetary_fields_are_non_negative(input in calculation_input_strategy()) {
        let result = RatingEngine::standard().calculate_premium(&input).unwrap();
        assert_non_negative(&result);
    }

    #[test]
    fn calculation_is_idempotent(input in calculation_input_strategy()) {
        let engine = RatingEngine::standard();
        let first = engine.calculate_premium(&input).unwrap();
        let second = engine.calculate_premium(&input).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn auto_approval_iff_no_reasons(input in calculation_input_strategy()) {
        let result = RatingEngine::standard().calculate_premium(&input).unwrap();
        prop_assert_eq!(result.is_auto_approved, result.referral_reasons.is_empty());
    }

    #[test]
    fn adding_a_risk_factor_never_lowers_risk(apk in apk_strategy(), factor in 0usize..4) {
        let settings = RatingSettings::default();
        let before = assess_risk(&apk.resolve(&settings));
        let after = assess_risk(&with_factor(apk, factor).resolve(&settings));

        prop_assert!(after.score >= before.score);
        prop_assert!(after.level >= before.level);
    }

    #[test]
    fn more_claims_never_lower_risk(apk in apk_strategy(), extra in 1u32..20) {
        let settings = RatingSettings::default();
        let before = assess_risk(&apk.resolve(&settings));

        let mut worse = apk;
        worse.claims_last_3_years = Some(worse.claims_last_3_years.unwrap_or(0) + extra);
        let after = assess_risk(&worse.resolve(&settings));

        prop_assert!(after.level >= before.level);
    }

    #[test]
    fn single_adr_class_uses_table_multiplier(class in adr_class_strategy()) {
        let table = AdrTable::standard();
        let selected: BTreeSet<AdrClass> = [class].into_iter().collect();

        prop_assert_eq!(
            table.calculate_adr_multiplier(&selected).unwrap(),
            table.get(class).unwrap().risk_multiplier
        );
    }

    #[test]
    fn second_adr_class_adds_five_hundredths(
        first in adr_class_strategy(),
        second in adr_class_strategy(),
    ) {
        prop_assume!(first != second);
        let table = AdrTable::standard();
        let selected: BTreeSet<AdrClass> = [first, second].into_iter().collect();

        let baseline = table
            .get(first)
            .unwrap()
            .risk_multiplier
            .max(table.get(second).unwrap().risk_multiplier);

        prop_assert_eq!(
            table.calculate_adr_multiplier(&selected).unwrap(),
            baseline + dec!(0.05)
        );
    }
}
