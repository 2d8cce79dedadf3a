//! Quote preparation
//!
//! The caller-side flow around the rating engine: blocks declined ADR
//! classes, expands the coverage variant, prices the resolved clause set
//! and then applies the ADR multiplier and bundle discount to produce the
//! premium offered to the client.

use core_kernel::Money;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument, warn};

use crate::adr::AdrClass;
use crate::apk::ApkData;
use crate::clause::ClauseType;
use crate::engine::{
    CalculationInput, CalculationResult, RatingEngine, ReferralReason, ReferralRule,
};
use crate::error::RatingError;
use crate::scope::TerritorialScope;
use crate::variant::CoverageVariantType;

/// A broker's quote request, before variant resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub sum_insured: Decimal,
    pub territorial_scope: TerritorialScope,
    pub variant: CoverageVariantType,
    /// Clause picks, only read for the CUSTOM variant
    #[serde(default)]
    pub clauses: BTreeSet<ClauseType>,
    #[serde(default)]
    pub adr_classes: BTreeSet<AdrClass>,
    #[serde(default)]
    pub apk_data: ApkData,
    #[serde(default)]
    pub years_in_business: u32,
    pub fleet_size: u32,
}

/// Priced quote ready to present to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub variant: CoverageVariantType,
    pub clauses: BTreeSet<ClauseType>,
    pub calculation: CalculationResult,
    pub adr_multiplier: Decimal,
    /// Bundle discount in percent
    pub bundle_discount: Decimal,
    pub bundle_discount_amount: Money,
    /// Default payout cap per clause
    pub sublimits: BTreeMap<ClauseType, Money>,
    /// Premium after ADR loading and bundle discount, never below the minimum premium
    pub offered_premium: Money,
    pub is_auto_approved: bool,
    pub referral_reasons: Vec<ReferralReason>,
}

/// Prepares quotes on top of a rating engine
#[derive(Debug, Clone)]
pub struct QuoteService<'a> {
    engine: RatingEngine<'a>,
}

impl QuoteService<'static> {
    /// Service over the standard engine
    pub fn standard() -> Self {
        Self::new(RatingEngine::standard())
    }
}

impl<'a> QuoteService<'a> {
    /// Creates a service around `engine`
    pub fn new(engine: RatingEngine<'a>) -> Self {
        Self { engine }
    }

    /// The underlying engine
    pub fn engine(&self) -> &RatingEngine<'a> {
        &self.engine
    }

    /// Resolves, prices and finalises a quote request
    ///
    /// This method:
    /// 1. Rejects declined ADR classes
    /// 2. Resolves the variant into a clause set
    /// 3. Marks the profile as carrying dangerous goods when ADR classes are selected
    /// 4. Runs the rating engine
    /// 5. Applies ADR loading and bundle discount, keeping the minimum premium floor
    /// 6. Adds the ADR referral when a selected class needs an underwriter
    ///
    /// # Errors
    ///
    /// - `DeclinedAdrClasses` if class 1 or 7 is selected
    /// - `EmptyCustomVariant` for a CUSTOM request without clauses
    /// - any error from [`RatingEngine::calculate_premium`]
    #[instrument(
        skip(self, request),
        fields(variant = %request.variant, scope = %request.territorial_scope)
    )]
    pub fn prepare_quote(&self, request: &QuoteRequest) -> Result<QuoteSummary, RatingError> {
        let tables = self.engine.tables();

        let declined = tables.adr_classes.declined_classes(&request.adr_classes)?;
        if !declined.is_empty() {
            warn!(?declined, "Quote blocked by declined ADR classes");
            return Err(RatingError::DeclinedAdrClasses(declined));
        }

        let variant = tables.variants.get(request.variant)?;
        let clauses = tables.variants.resolve(request.variant, &request.clauses)?;

        let mut apk_data = request.apk_data.clone();
        if !request.adr_classes.is_empty() {
            apk_data.dangerous_goods = Some(true);
        }

        let input = CalculationInput {
            sum_insured: request.sum_insured,
            territorial_scope: request.territorial_scope,
            selected_clauses: clauses.clone(),
            apk_data,
            years_in_business: request.years_in_business,
            fleet_size: request.fleet_size,
        };
        let calculation = self.engine.calculate_premium(&input)?;

        let adr_multiplier = tables.adr_classes.calculate_adr_multiplier(&request.adr_classes)?;
        let discount = variant.discount_rate();

        let loaded = calculation.breakdown.total_premium.amount() * adr_multiplier;
        let discount_amount = discount.apply_to(loaded);
        let offered = pln_whole(loaded * discount.complement()).max(calculation.minimum_premium);

        let mut referral_reasons = calculation.referral_reasons.clone();
        if tables.adr_classes.requires_adr_referral(&request.adr_classes)? {
            let mut referred = Vec::new();
            for class in &request.adr_classes {
                if tables.adr_classes.get(*class)?.requires_referral {
                    referred.push(class.id());
                }
            }
            referral_reasons.push(ReferralReason::new(
                ReferralRule::AdrClass,
                format!("Klasy ADR wymagające oceny underwritera: {}", referred.join(", ")),
            ));
        }
        let is_auto_approved = referral_reasons.is_empty();

        let sum_insured = Money::pln(request.sum_insured);
        let mut sublimits = BTreeMap::new();
        for clause in &clauses {
            sublimits.insert(*clause, tables.clauses.default_sublimit(*clause, &sum_insured)?);
        }

        info!(
            %offered,
            %adr_multiplier,
            bundle_discount = %variant.bundle_discount,
            is_auto_approved,
            "Quote prepared"
        );

        Ok(QuoteSummary {
            variant: request.variant,
            clauses,
            calculation,
            adr_multiplier,
            bundle_discount: variant.bundle_discount,
            bundle_discount_amount: Money::pln(discount_amount).round_to_currency(),
            sublimits,
            offered_premium: offered,
            is_auto_approved,
            referral_reasons,
        })
    }
}

fn pln_whole(amount: Decimal) -> Money {
    Money::pln(amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(variant: CoverageVariantType) -> QuoteRequest {
        QuoteRequest {
            sum_insured: dec!(500000),
            territorial_scope: TerritorialScope::Poland,
            variant,
            clauses: BTreeSet::new(),
            adr_classes: BTreeSet::new(),
            apk_data: ApkData::default(),
            years_in_business: 5,
            fleet_size: 5,
        }
    }

    #[test]
    fn test_declined_class_blocks_before_rating() {
        let mut req = request(CoverageVariantType::Standard);
        req.adr_classes.insert(AdrClass::Radioactive);

        let result = QuoteService::standard().prepare_quote(&req);
        assert!(matches!(
            result,
            Err(RatingError::DeclinedAdrClasses(ref classes))
                if classes == &vec![AdrClass::Radioactive]
        ));
    }

    #[test]
    fn test_adr_selection_marks_dangerous_goods() {
        let mut req = request(CoverageVariantType::Basic);
        req.adr_classes.insert(AdrClass::Miscellaneous);

        let summary = QuoteService::standard().prepare_quote(&req).unwrap();
        assert!(summary.calculation.is_referred_for(ReferralRule::DangerousGoods));
        assert!(!summary.calculation.is_referred_for(ReferralRule::AdrClass));
        assert_eq!(summary.adr_multiplier, dec!(1.10));
    }

    #[test]
    fn test_sublimits_follow_resolved_clauses() {
        let summary = QuoteService::standard()
            .prepare_quote(&request(CoverageVariantType::Standard))
            .unwrap();
        assert_eq!(summary.sublimits.len(), 3);
        assert_eq!(
            summary.sublimits[&ClauseType::LoadingUnloading].amount(),
            dec!(250000)
        );
    }
}
