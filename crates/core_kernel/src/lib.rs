//! Core Kernel - Foundational types for the OCPD rating workspace
//!
//! This crate provides the value types shared by the rating domain and its
//! entry points:
//! - Money with precise decimal arithmetic, tagged with a currency
//! - Rate for percentage-based charges (clause rates, discounts, sublimits)

pub mod money;

pub use money::{Currency, Money, Rate};
