//! Unit tests for the Money and Rate types
//!
//! Tests cover creation, the half-away-from-zero rounding used for
//! premiums, the premium floor comparison and rate application.

use core_kernel::{Currency, Money, Rate};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_pln_is_the_default_currency() {
        assert_eq!(Currency::default(), Currency::PLN);
        assert_eq!(Money::pln(dec!(1)).currency(), Currency::PLN);
    }

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::pln(dec!(100.123456789));
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_negative_amount() {
        assert!(Money::pln(dec!(-0.01)).is_negative());
        assert!(!Money::pln(dec!(0)).is_negative());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_max_keeps_the_floor() {
        let computed = Money::pln(dec!(331));
        let minimum = Money::pln(dec!(2100));
        assert_eq!(computed.max(minimum).amount(), dec!(2100));
    }

    #[test]
    fn test_multiply_by_scalar() {
        let m = Money::pln(dec!(360)).multiply(dec!(0.85));
        assert_eq!(m.amount(), dec!(306));
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round_to_currency_half_away_from_zero() {
        assert_eq!(Money::pln(dec!(220.925)).round_to_currency().amount(), dec!(220.93));
        assert_eq!(Money::pln(dec!(-220.925)).round_to_currency().amount(), dec!(-220.93));
    }
}

mod display {
    use super::*;

    #[test]
    fn test_money_display_uses_symbol_and_two_places() {
        assert_eq!(Money::pln(dec!(2500)).to_string(), "2500.00 zł");
        assert_eq!(Money::pln(dec!(9.5)).to_string(), "9.50 zł");
    }

    #[test]
    fn test_currency_display_is_iso_code() {
        assert_eq!(Currency::PLN.to_string(), "PLN");
    }

    #[test]
    fn test_money_serializes_amount_and_currency() {
        let json = serde_json::to_string(&Money::pln(dec!(105.00))).unwrap();
        assert_eq!(json, r#"{"amount":"105.00","currency":"PLN"}"#);
    }
}

mod rate {
    use super::*;

    #[test]
    fn test_rate_from_percentage() {
        let rate = Rate::from_percentage(dec!(15));
        assert_eq!(rate.as_percentage(), dec!(15));
        assert_eq!(rate.complement(), dec!(0.85));
    }

    #[test]
    fn test_rate_apply_to_decimal() {
        assert_eq!(Rate::from_percentage(dec!(6)).apply_to(dec!(1000)), dec!(60));
    }

    #[test]
    fn test_zero_discount_leaves_full_premium() {
        let rate = Rate::from_percentage(dec!(0));
        assert_eq!(rate.complement(), dec!(1));
        assert_eq!(rate.to_string(), "0%");
    }

    #[test]
    fn test_rate_deserializes_from_plain_decimal() {
        let rate: Rate = serde_json::from_str("\"0.2\"").unwrap();
        assert_eq!(rate, Rate::from_percentage(dec!(20)));
    }
}
