//! Risk assessment
//!
//! Turns the needs-analysis declarations into one of four risk levels via
//! an additive point score. Each contributing declaration is recorded as a
//! [`RiskFactor`] so underwriters can see where the score came from.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::apk::ResolvedApk;

/// Risk classification levels, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Classifies a risk score
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=2 => RiskLevel::Low,
            3..=5 => RiskLevel::Medium,
            6..=8 => RiskLevel::High,
            _ => RiskLevel::VeryHigh,
        }
    }

    /// Premium multiplier for this level
    pub fn modifier(&self) -> Decimal {
        match self {
            RiskLevel::Low => dec!(0.85),
            RiskLevel::Medium => dec!(1.0),
            RiskLevel::High => dec!(1.25),
            RiskLevel::VeryHigh => dec!(1.6),
        }
    }
}

/// A declaration that added points to the risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    HighValueGoods,
    /// Largest single shipment above 500 000
    LargeSingleShipment,
    /// Largest single shipment above 1 000 000, on top of `LargeSingleShipment`
    VeryLargeSingleShipment,
    DangerousGoods,
    TemperatureControlled,
    /// More than 5 claims in three years
    FrequentClaims,
    /// More than 10 claims in three years, on top of `FrequentClaims`
    VeryFrequentClaims,
    InternationalTransport,
}

impl RiskFactor {
    /// Points this factor adds to the score
    pub fn points(&self) -> u32 {
        match self {
            RiskFactor::HighValueGoods => 2,
            RiskFactor::LargeSingleShipment => 2,
            RiskFactor::VeryLargeSingleShipment => 1,
            RiskFactor::DangerousGoods => 3,
            RiskFactor::TemperatureControlled => 2,
            RiskFactor::FrequentClaims => 2,
            RiskFactor::VeryFrequentClaims => 2,
            RiskFactor::InternationalTransport => 1,
        }
    }
}

/// Outcome of a risk assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub score: u32,
    pub level: RiskLevel,
    pub factors: Vec<RiskFactor>,
}

/// Scores a resolved needs analysis
pub fn assess_risk(apk: &ResolvedApk) -> RiskAssessment {
    let mut factors = Vec::new();

    if apk.high_value_goods {
        factors.push(RiskFactor::HighValueGoods);
    }
    if apk.max_single_shipment_value > dec!(500000) {
        factors.push(RiskFactor::LargeSingleShipment);
    }
    if apk.max_single_shipment_value > dec!(1000000) {
        factors.push(RiskFactor::VeryLargeSingleShipment);
    }
    if apk.dangerous_goods {
        factors.push(RiskFactor::DangerousGoods);
    }
    if apk.temperature_controlled {
        factors.push(RiskFactor::TemperatureControlled);
    }
    if apk.claims_last_3_years > 5 {
        factors.push(RiskFactor::FrequentClaims);
    }
    if apk.claims_last_3_years > 10 {
        factors.push(RiskFactor::VeryFrequentClaims);
    }
    if apk.international_transport {
        factors.push(RiskFactor::InternationalTransport);
    }

    let score = factors.iter().map(RiskFactor::points).sum();

    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
        factors,
    }
}
