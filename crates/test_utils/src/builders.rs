//! Test Data Builders
//!
//! Builder patterns for constructing rating inputs with sensible defaults.
//! Tests set only the fields they care about.

use std::collections::BTreeSet;

use domain_rating::{
    AdrClass, ApkData, CalculationInput, ClauseType, CoverageVariantType, QuoteRequest,
    TerritorialScope,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for [`CalculationInput`]
///
/// Defaults: 300 000 PLN, EUROPE, no clauses, empty APK, 5 years, 10 vehicles.
pub struct CalculationInputBuilder {
    sum_insured: Decimal,
    territorial_scope: TerritorialScope,
    selected_clauses: BTreeSet<ClauseType>,
    apk_data: ApkData,
    years_in_business: u32,
    fleet_size: u32,
}

impl Default for CalculationInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculationInputBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            sum_insured: dec!(300000),
            territorial_scope: TerritorialScope::Europe,
            selected_clauses: BTreeSet::new(),
            apk_data: ApkData::default(),
            years_in_business: 5,
            fleet_size: 10,
        }
    }

    /// Sets the sum insured
    pub fn with_sum_insured(mut self, sum_insured: Decimal) -> Self {
        self.sum_insured = sum_insured;
        self
    }

    /// Sets the territorial scope
    pub fn with_scope(mut self, scope: TerritorialScope) -> Self {
        self.territorial_scope = scope;
        self
    }

    /// Adds a clause to the selection
    pub fn with_clause(mut self, clause: ClauseType) -> Self {
        self.selected_clauses.insert(clause);
        self
    }

    /// Replaces the clause selection
    pub fn with_clauses(mut self, clauses: impl IntoIterator<Item = ClauseType>) -> Self {
        self.selected_clauses = clauses.into_iter().collect();
        self
    }

    /// Sets the needs-analysis data
    pub fn with_apk(mut self, apk: ApkData) -> Self {
        self.apk_data = apk;
        self
    }

    /// Sets years in business
    pub fn with_years_in_business(mut self, years: u32) -> Self {
        self.years_in_business = years;
        self
    }

    /// Sets the fleet size
    pub fn with_fleet_size(mut self, fleet_size: u32) -> Self {
        self.fleet_size = fleet_size;
        self
    }

    /// Builds the input
    pub fn build(self) -> CalculationInput {
        CalculationInput {
            sum_insured: self.sum_insured,
            territorial_scope: self.territorial_scope,
            selected_clauses: self.selected_clauses,
            apk_data: self.apk_data,
            years_in_business: self.years_in_business,
            fleet_size: self.fleet_size,
        }
    }
}

/// Builder for [`QuoteRequest`]
///
/// Defaults: 500 000 PLN, POLAND, STANDARD variant, no ADR, empty APK,
/// 5 years, 5 vehicles.
pub struct QuoteRequestBuilder {
    sum_insured: Decimal,
    territorial_scope: TerritorialScope,
    variant: CoverageVariantType,
    clauses: BTreeSet<ClauseType>,
    adr_classes: BTreeSet<AdrClass>,
    apk_data: ApkData,
    years_in_business: u32,
    fleet_size: u32,
}

impl Default for QuoteRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteRequestBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            sum_insured: dec!(500000),
            territorial_scope: TerritorialScope::Poland,
            variant: CoverageVariantType::Standard,
            clauses: BTreeSet::new(),
            adr_classes: BTreeSet::new(),
            apk_data: ApkData::default(),
            years_in_business: 5,
            fleet_size: 5,
        }
    }

    /// Sets the sum insured
    pub fn with_sum_insured(mut self, sum_insured: Decimal) -> Self {
        self.sum_insured = sum_insured;
        self
    }

    /// Sets the territorial scope
    pub fn with_scope(mut self, scope: TerritorialScope) -> Self {
        self.territorial_scope = scope;
        self
    }

    /// Sets the coverage variant
    pub fn with_variant(mut self, variant: CoverageVariantType) -> Self {
        self.variant = variant;
        self
    }

    /// Switches to CUSTOM with the given clauses
    pub fn custom(mut self, clauses: impl IntoIterator<Item = ClauseType>) -> Self {
        self.variant = CoverageVariantType::Custom;
        self.clauses = clauses.into_iter().collect();
        self
    }

    /// Replaces the ADR class selection
    pub fn with_adr_classes(mut self, classes: impl IntoIterator<Item = AdrClass>) -> Self {
        self.adr_classes = classes.into_iter().collect();
        self
    }

    /// Sets the needs-analysis data
    pub fn with_apk(mut self, apk: ApkData) -> Self {
        self.apk_data = apk;
        self
    }

    /// Sets years in business
    pub fn with_years_in_business(mut self, years: u32) -> Self {
        self.years_in_business = years;
        self
    }

    /// Sets the fleet size
    pub fn with_fleet_size(mut self, fleet_size: u32) -> Self {
        self.fleet_size = fleet_size;
        self
    }

    /// Builds the request
    pub fn build(self) -> QuoteRequest {
        QuoteRequest {
            sum_insured: self.sum_insured,
            territorial_scope: self.territorial_scope,
            variant: self.variant,
            clauses: self.clauses,
            adr_classes: self.adr_classes,
            apk_data: self.apk_data,
            years_in_business: self.years_in_business,
            fleet_size: self.fleet_size,
        }
    }
}
