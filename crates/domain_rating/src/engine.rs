//! Premium rating engine
//!
//! Composes the OCPD premium from the sum insured and the client profile:
//!
//! ```text
//! base      = sum_insured / 1000 × base_rate[scope]
//! adjusted  = base × risk × experience × bonus_malus × fleet
//! total     = adjusted + Σ clause_rate × adjusted
//! premium   = max(round(total), minimum[scope] + 200 × clauses)
//! ```
//!
//! The engine is pure: it reads the rule tables by reference, performs no
//! I/O and keeps no state between calls. Referrals are part of the result,
//! never errors.
//!
//! Declined ADR classes are not checked here. Callers must run
//! [`AdrTable::declined_classes`](crate::adr::AdrTable::declined_classes)
//! (or go through [`QuoteService`](crate::quote::QuoteService)) before
//! treating a result as bindable.

use core_kernel::{Currency, Money};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, instrument, warn};

use crate::apk::{ApkData, ResolvedApk};
use crate::clause::ClauseType;
use crate::error::RatingError;
use crate::risk::{assess_risk, RiskAssessment, RiskLevel};
use crate::scope::TerritorialScope;
use crate::settings::RatingSettings;
use crate::tables::RatingTables;

/// Minimum premium surcharge per selected clause
pub const MINIMUM_PREMIUM_PER_CLAUSE: Decimal = dec!(200);

/// Months in the three-year claims window
const CLAIMS_WINDOW_MONTHS: u32 = 36;

/// Years-in-business thresholds and their loading, ascending
const EXPERIENCE_BANDS: [(u32, Decimal); 7] = [
    (0, dec!(1.15)),
    (1, dec!(1.10)),
    (2, dec!(1.05)),
    (3, dec!(1.0)),
    (5, dec!(0.95)),
    (10, dec!(0.90)),
    (15, dec!(0.85)),
];

/// Loading for a business younger than every band
const NEW_BUSINESS_MODIFIER: Decimal = dec!(1.15);

/// Input to a premium calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Sum insured in PLN, must be positive
    pub sum_insured: Decimal,
    pub territorial_scope: TerritorialScope,
    #[serde(default)]
    pub selected_clauses: BTreeSet<ClauseType>,
    #[serde(default)]
    pub apk_data: ApkData,
    #[serde(default)]
    pub years_in_business: u32,
    /// Number of vehicles, at least 1
    pub fleet_size: u32,
}

/// Itemised premium
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumBreakdown {
    /// Sum insured × scope rate, whole PLN
    pub base_premium: Money,
    /// Per-mille base rate of the territorial scope
    pub scope_modifier: Decimal,
    pub risk_modifier: Decimal,
    pub experience_modifier: Decimal,
    pub bonus_malus_modifier: Decimal,
    pub fleet_discount: Decimal,
    /// Base premium after all multiplicative modifiers
    pub adjusted_base_premium: Money,
    pub clauses_premium: BTreeMap<ClauseType, Money>,
    pub total_clauses_premium: Money,
    /// Final premium, whole PLN, never below the minimum premium
    pub total_premium: Money,
}

/// Business rule that sends a quote to an underwriter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralRule {
    SumInsuredLimit,
    VeryHighRisk,
    DangerousGoods,
    ClaimsHistory,
    ClaimsRatio,
    AdrClass,
}

/// Why a quote was not auto-approved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralReason {
    pub rule: ReferralRule,
    pub message: String,
}

impl ReferralReason {
    pub fn new(rule: ReferralRule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for ReferralReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Priced, risk-classified quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub breakdown: PremiumBreakdown,
    pub risk_level: RiskLevel,
    pub risk_assessment: RiskAssessment,
    pub is_auto_approved: bool,
    /// In evaluation order; empty when auto-approved
    pub referral_reasons: Vec<ReferralReason>,
    pub minimum_premium: Money,
}

impl CalculationResult {
    /// Referral reasons as plain messages
    pub fn referral_messages(&self) -> Vec<&str> {
        self.referral_reasons.iter().map(|r| r.message.as_str()).collect()
    }

    /// Returns true if `rule` fired
    pub fn is_referred_for(&self, rule: ReferralRule) -> bool {
        self.referral_reasons.iter().any(|r| r.rule == rule)
    }
}

/// Loading for years in business: the highest band not exceeding `years`
pub fn experience_modifier(years_in_business: u32) -> Decimal {
    EXPERIENCE_BANDS
        .iter()
        .rev()
        .find(|(threshold, _)| *threshold <= years_in_business)
        .map(|(_, modifier)| *modifier)
        .unwrap_or(NEW_BUSINESS_MODIFIER)
}

/// Claims-ratio adjustment over the last three years
///
/// `claims / (monthly_shipments × 36)`; zero shipments gives a neutral 1.0.
pub fn bonus_malus_modifier(claims_last_3_years: u32, monthly_shipments: u32) -> Decimal {
    let shipments = u64::from(monthly_shipments) * u64::from(CLAIMS_WINDOW_MONTHS);
    if shipments == 0 {
        return dec!(1.0);
    }

    let ratio = Decimal::from(claims_last_3_years) / Decimal::from(shipments);
    if ratio.is_zero() {
        dec!(0.80)
    } else if ratio < dec!(0.001) {
        dec!(0.90)
    } else if ratio < dec!(0.005) {
        dec!(1.0)
    } else if ratio < dec!(0.01) {
        dec!(1.15)
    } else if ratio < dec!(0.02) {
        dec!(1.30)
    } else {
        dec!(1.50)
    }
}

/// Discount for larger fleets
pub fn fleet_discount(fleet_size: u32) -> Decimal {
    match fleet_size {
        50.. => dec!(0.85),
        20..=49 => dec!(0.90),
        10..=19 => dec!(0.95),
        _ => dec!(1.0),
    }
}

/// Premium floor for a scope and number of selected clauses
pub fn minimum_premium(scope: TerritorialScope, clause_count: usize) -> Decimal {
    scope.base_minimum_premium() + MINIMUM_PREMIUM_PER_CLAUSE * Decimal::from(clause_count)
}

/// The rating engine, bound to a rule table set and settings
#[derive(Debug, Clone)]
pub struct RatingEngine<'a> {
    tables: &'a RatingTables,
    settings: RatingSettings,
}

impl RatingEngine<'static> {
    /// Engine over the process-wide standard tables and default settings
    pub fn standard() -> Self {
        Self::new(RatingTables::shared())
    }
}

impl<'a> RatingEngine<'a> {
    /// Creates an engine over `tables` with default settings
    pub fn new(tables: &'a RatingTables) -> Self {
        Self {
            tables,
            settings: RatingSettings::default(),
        }
    }

    /// Replaces the engine settings
    pub fn with_settings(mut self, settings: RatingSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The rule tables this engine reads
    pub fn tables(&self) -> &'a RatingTables {
        self.tables
    }

    /// The active settings
    pub fn settings(&self) -> &RatingSettings {
        &self.settings
    }

    /// Prices a quote and decides between auto-approval and referral
    ///
    /// # Errors
    ///
    /// - `InvalidSumInsured` if the sum insured is zero or negative
    /// - `InvalidFleetSize` if the fleet is empty
    /// - `MissingClauseDefinition` if a selected clause is absent from the tables
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let engine = RatingEngine::standard();
    /// let result = engine.calculate_premium(&input)?;
    /// if !result.is_auto_approved {
    ///     for reason in &result.referral_reasons {
    ///         println!("{}", reason);
    ///     }
    /// }
    /// ```
    #[instrument(
        skip(self, input),
        fields(scope = %input.territorial_scope, sum_insured = %input.sum_insured)
    )]
    pub fn calculate_premium(
        &self,
        input: &CalculationInput,
    ) -> Result<CalculationResult, RatingError> {
        self.validate_input(input)?;

        let apk = input.apk_data.resolve(&self.settings);

        let scope_modifier = input.territorial_scope.base_rate_per_mille();
        let base_premium = input.sum_insured / dec!(1000) * scope_modifier;

        let risk_assessment = assess_risk(&apk);
        let risk_level = risk_assessment.level;
        let risk_modifier = risk_level.modifier();
        let experience = experience_modifier(input.years_in_business);
        let bonus_malus = bonus_malus_modifier(apk.claims_last_3_years, apk.monthly_shipments);
        let fleet = fleet_discount(input.fleet_size);

        let adjusted_base_premium = base_premium * risk_modifier * experience * bonus_malus * fleet;

        debug!(
            %base_premium,
            risk_score = risk_assessment.score,
            ?risk_level,
            %experience,
            %bonus_malus,
            %fleet,
            %adjusted_base_premium,
            "Applied premium modifiers"
        );

        let mut clauses_premium = BTreeMap::new();
        let mut total_clauses_premium = Decimal::ZERO;
        for clause in &input.selected_clauses {
            let premium = self
                .tables
                .clauses
                .calculate_clause_premium(*clause, adjusted_base_premium)?;
            total_clauses_premium += premium;
            clauses_premium.insert(*clause, pln_rounded(premium, 2));
        }

        let minimum = Money::pln(minimum_premium(
            input.territorial_scope,
            input.selected_clauses.len(),
        ));
        let computed_total = pln_rounded(adjusted_base_premium + total_clauses_premium, 0);
        let total_premium = computed_total.max(minimum);

        let referral_reasons = self.referral_reasons(input, &apk, risk_level, bonus_malus);
        let is_auto_approved = referral_reasons.is_empty();

        if is_auto_approved {
            info!(%total_premium, ?risk_level, "Quote auto-approved");
        } else {
            warn!(
                %total_premium,
                ?risk_level,
                reasons = referral_reasons.len(),
                "Quote referred to underwriting"
            );
        }

        Ok(CalculationResult {
            breakdown: PremiumBreakdown {
                base_premium: pln_rounded(base_premium, 0),
                scope_modifier,
                risk_modifier,
                experience_modifier: experience,
                bonus_malus_modifier: bonus_malus,
                fleet_discount: fleet,
                adjusted_base_premium: pln_rounded(adjusted_base_premium, 2),
                clauses_premium,
                total_clauses_premium: pln_rounded(total_clauses_premium, 2),
                total_premium,
            },
            risk_level,
            risk_assessment,
            is_auto_approved,
            referral_reasons,
            minimum_premium: minimum,
        })
    }

    fn validate_input(&self, input: &CalculationInput) -> Result<(), RatingError> {
        if input.sum_insured <= Decimal::ZERO {
            return Err(RatingError::InvalidSumInsured(input.sum_insured.to_string()));
        }
        if input.fleet_size == 0 {
            return Err(RatingError::InvalidFleetSize(input.fleet_size));
        }
        Ok(())
    }

    /// Every referral rule is evaluated; none short-circuits the others.
    fn referral_reasons(
        &self,
        input: &CalculationInput,
        apk: &ResolvedApk,
        risk_level: RiskLevel,
        bonus_malus: Decimal,
    ) -> Vec<ReferralReason> {
        let settings = &self.settings;
        let mut reasons = Vec::new();

        if input.sum_insured > settings.referral_sum_insured_limit {
            reasons.push(ReferralReason::new(
                ReferralRule::SumInsuredLimit,
                format!(
                    "Suma ubezpieczenia przekracza {}",
                    format_pln_limit(settings.referral_sum_insured_limit)
                ),
            ));
        }
        if risk_level == RiskLevel::VeryHigh {
            reasons.push(ReferralReason::new(
                ReferralRule::VeryHighRisk,
                "Bardzo wysoki poziom ryzyka",
            ));
        }
        if apk.dangerous_goods {
            reasons.push(ReferralReason::new(
                ReferralRule::DangerousGoods,
                "Przewóz towarów niebezpiecznych (ADR)",
            ));
        }
        if apk.claims_last_3_years > settings.referral_claims_count {
            reasons.push(ReferralReason::new(
                ReferralRule::ClaimsHistory,
                format!(
                    "Ponad {} szkód w ciągu ostatnich 3 lat",
                    settings.referral_claims_count
                ),
            ));
        }
        if bonus_malus > settings.referral_bonus_malus_limit {
            reasons.push(ReferralReason::new(
                ReferralRule::ClaimsRatio,
                format!("Wysoki wskaźnik szkodowości (bonus-malus {})", bonus_malus),
            ));
        }

        reasons
    }
}

/// Prices `input` with the standard tables and default settings
pub fn calculate_premium(input: &CalculationInput) -> Result<CalculationResult, RatingError> {
    RatingEngine::standard().calculate_premium(input)
}

/// Rounds a full-precision amount once, half away from zero, into PLN
fn pln_rounded(amount: Decimal, dp: u32) -> Money {
    Money::pln(amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}

/// Formats a PLN limit, using "mln" for whole millions
fn format_pln_limit(limit: Decimal) -> String {
    let million = dec!(1000000);
    if limit >= million && (limit % million).is_zero() {
        format!("{} mln {}", (limit / million).normalize(), Currency::PLN)
    } else {
        format!("{} {}", limit.normalize(), Currency::PLN)
    }
}
