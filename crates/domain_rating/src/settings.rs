//! Engine settings
//!
//! Tunable defaults and referral thresholds. Everything has a production
//! default so an empty configuration source yields the standard engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Monthly shipment count assumed when the needs analysis leaves it blank
pub const DEFAULT_MONTHLY_SHIPMENTS: u32 = 50;

/// Rating engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RatingSettings {
    /// Shipments per month used for the claims ratio when not declared
    pub default_monthly_shipments: u32,
    /// Sums insured above this limit are referred
    pub referral_sum_insured_limit: Decimal,
    /// More claims than this in three years are referred
    pub referral_claims_count: u32,
    /// Bonus-malus modifiers above this value are referred
    pub referral_bonus_malus_limit: Decimal,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            default_monthly_shipments: DEFAULT_MONTHLY_SHIPMENTS,
            referral_sum_insured_limit: dec!(2000000),
            referral_claims_count: 5,
            referral_bonus_malus_limit: dec!(1.3),
        }
    }
}
