//! Custom Test Assertions
//!
//! Assertion helpers for rating results that print the whole breakdown on
//! failure instead of a bare `false`.

use domain_rating::{CalculationResult, ReferralRule};

/// Asserts the minimum premium floor holds
pub fn assert_floor_holds(result: &CalculationResult) {
    assert!(
        result.breakdown.total_premium.amount() >= result.minimum_premium.amount(),
        "Total premium {} is below minimum premium {}: {:#?}",
        result.breakdown.total_premium,
        result.minimum_premium,
        result.breakdown
    );
}

/// Asserts no monetary field of the breakdown is negative
pub fn assert_non_negative(result: &CalculationResult) {
    let breakdown = &result.breakdown;
    assert!(!breakdown.base_premium.is_negative(), "negative base premium: {:#?}", breakdown);
    assert!(!breakdown.total_premium.is_negative(), "negative total premium: {:#?}", breakdown);
    for (clause, premium) in &breakdown.clauses_premium {
        assert!(!premium.is_negative(), "negative premium for {}: {:#?}", clause, breakdown);
    }
}

/// Asserts the quote is auto-approved
pub fn assert_auto_approved(result: &CalculationResult) {
    assert!(
        result.is_auto_approved && result.referral_reasons.is_empty(),
        "Expected auto-approval, got referrals: {:?}",
        result.referral_messages()
    );
}

/// Asserts the quote is referred and `rule` is among the reasons
pub fn assert_referred_for(result: &CalculationResult, rule: ReferralRule) {
    assert!(!result.is_auto_approved, "Expected referral, quote was auto-approved");
    assert!(
        result.is_referred_for(rule),
        "Expected referral for {:?}, got {:?}",
        rule,
        result.referral_reasons
    );
}
