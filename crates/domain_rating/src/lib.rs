//! OCPD Rating Domain
//!
//! This crate implements underwriting and premium rating for road-carrier
//! third-party liability (OCPD) insurance. It is infrastructure-agnostic:
//! no persistence, no HTTP, no I/O beyond optionally reading a rule table
//! file.
//!
//! # Architecture
//!
//! - **Rule tables**: clauses, ADR dangerous-goods classes and coverage
//!   variants, immutable and shared by reference
//! - **Risk assessment**: additive point score over the needs analysis (APK)
//! - **Rating engine**: base rate, multiplicative modifiers, clause add-ons,
//!   minimum premium floor and referral decision
//! - **Quote service**: variant resolution, ADR checks and bundle discount
//!   around the engine
//!
//! # Rating flow
//!
//! ```text
//! QuoteRequest -> [ADR decline check] -> [variant -> clauses]
//!              -> CalculationInput -> RatingEngine -> CalculationResult
//!              -> [ADR loading, bundle discount] -> QuoteSummary
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_rating::{CalculationInput, RatingEngine, TerritorialScope};
//!
//! let engine = RatingEngine::standard();
//! let result = engine.calculate_premium(&CalculationInput {
//!     sum_insured: dec!(300000),
//!     territorial_scope: TerritorialScope::Europe,
//!     selected_clauses: BTreeSet::new(),
//!     apk_data: ApkData::default(),
//!     years_in_business: 5,
//!     fleet_size: 10,
//! })?;
//!
//! assert!(result.breakdown.total_premium.amount() >= result.minimum_premium.amount());
//! ```

pub mod adr;
pub mod apk;
pub mod clause;
pub mod engine;
pub mod error;
pub mod quote;
pub mod risk;
pub mod scope;
pub mod settings;
pub mod tables;
pub mod variant;

pub use adr::{AdrClass, AdrClassDefinition, AdrTable};
pub use apk::{ApkData, ResolvedApk};
pub use clause::{ClauseDefinition, ClauseRiskCategory, ClauseTable, ClauseType};
pub use engine::{
    calculate_premium, CalculationInput, CalculationResult, PremiumBreakdown, RatingEngine,
    ReferralReason, ReferralRule,
};
pub use error::RatingError;
pub use quote::{QuoteRequest, QuoteService, QuoteSummary};
pub use risk::{assess_risk, RiskAssessment, RiskFactor, RiskLevel};
pub use scope::TerritorialScope;
pub use settings::{RatingSettings, DEFAULT_MONTHLY_SHIPMENTS};
pub use tables::RatingTables;
pub use variant::{CoverageVariant, CoverageVariantType, VariantTable};
