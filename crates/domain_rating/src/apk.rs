//! Needs-analysis (APK) declarations
//!
//! Brokers fill the needs analysis partially; [`ApkData`] mirrors that with
//! every field optional. The engine resolves it into [`ResolvedApk`] once,
//! at the start of a calculation, so no fallback logic leaks into the
//! rating steps.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::settings::RatingSettings;

/// Client shipment profile as declared in the needs analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApkData {
    pub main_cargo_types: Option<Vec<String>>,
    pub average_cargo_value: Option<Decimal>,
    pub max_single_shipment_value: Option<Decimal>,
    pub monthly_shipments: Option<u32>,
    pub claims_last_3_years: Option<u32>,
    pub high_value_goods: Option<bool>,
    pub dangerous_goods: Option<bool>,
    pub temperature_controlled: Option<bool>,
    pub international_transport: Option<bool>,
}

impl ApkData {
    /// Fills every missing declaration with its default
    pub fn resolve(&self, settings: &RatingSettings) -> ResolvedApk {
        ResolvedApk {
            main_cargo_types: self.main_cargo_types.clone().unwrap_or_default(),
            average_cargo_value: self.average_cargo_value.unwrap_or(Decimal::ZERO),
            max_single_shipment_value: self.max_single_shipment_value.unwrap_or(Decimal::ZERO),
            monthly_shipments: self
                .monthly_shipments
                .unwrap_or(settings.default_monthly_shipments),
            claims_last_3_years: self.claims_last_3_years.unwrap_or(0),
            high_value_goods: self.high_value_goods.unwrap_or(false),
            dangerous_goods: self.dangerous_goods.unwrap_or(false),
            temperature_controlled: self.temperature_controlled.unwrap_or(false),
            international_transport: self.international_transport.unwrap_or(false),
        }
    }
}

/// Needs analysis with every field populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedApk {
    pub main_cargo_types: Vec<String>,
    pub average_cargo_value: Decimal,
    pub max_single_shipment_value: Decimal,
    pub monthly_shipments: u32,
    pub claims_last_3_years: u32,
    pub high_value_goods: bool,
    pub dangerous_goods: bool,
    pub temperature_controlled: bool,
    pub international_transport: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_apk_resolves_to_defaults() {
        let resolved = ApkData::default().resolve(&RatingSettings::default());
        assert_eq!(resolved.monthly_shipments, 50);
        assert_eq!(resolved.claims_last_3_years, 0);
        assert_eq!(resolved.max_single_shipment_value, dec!(0));
        assert!(!resolved.dangerous_goods);
    }

    #[test]
    fn test_declared_values_win_over_defaults() {
        let apk = ApkData {
            monthly_shipments: Some(0),
            dangerous_goods: Some(true),
            ..Default::default()
        };
        let resolved = apk.resolve(&RatingSettings::default());
        assert_eq!(resolved.monthly_shipments, 0);
        assert!(resolved.dangerous_goods);
    }

    #[test]
    fn test_deserializes_partial_camel_case_json() {
        let apk: ApkData =
            serde_json::from_str(r#"{"claimsLast3Years": 3, "highValueGoods": true}"#).unwrap();
        assert_eq!(apk.claims_last_3_years, Some(3));
        assert_eq!(apk.high_value_goods, Some(true));
        assert_eq!(apk.monthly_shipments, None);
    }
}
