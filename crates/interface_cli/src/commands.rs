//! Command handlers
//!
//! Each handler takes a JSON document and returns a serialisable result.
//! Reading inputs and printing outputs stays in the binary.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use domain_rating::{
    CalculationInput, CalculationResult, QuoteRequest, QuoteService, QuoteSummary, RatingEngine,
    RatingSettings, RatingTables,
};

use crate::config::CliConfig;

/// Which rule table to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableKind {
    Clauses,
    Adr,
    Variants,
}

/// Rule tables and settings shared by all commands of one invocation
#[derive(Debug, Clone)]
pub struct RatingContext {
    tables: RatingTables,
    settings: RatingSettings,
}

impl RatingContext {
    pub fn new(tables: RatingTables, settings: RatingSettings) -> Self {
        Self { tables, settings }
    }

    /// Builds the context from configuration
    ///
    /// `tables_override` wins over the configured tables path.
    pub fn from_config(config: &CliConfig, tables_override: Option<&Path>) -> Result<Self> {
        let tables = match tables_override.or(config.tables_path.as_deref()) {
            Some(path) => {
                info!(path = %path.display(), "Using custom rule tables");
                RatingTables::from_file(path)?
            }
            None => RatingTables::standard(),
        };
        Ok(Self::new(tables, config.to_settings()))
    }

    pub fn tables(&self) -> &RatingTables {
        &self.tables
    }

    fn engine(&self) -> RatingEngine<'_> {
        RatingEngine::new(&self.tables).with_settings(self.settings.clone())
    }

    /// Prices a `CalculationInput` document
    pub fn calculate(&self, input_json: &str) -> Result<CalculationResult> {
        let input: CalculationInput =
            serde_json::from_str(input_json).context("invalid calculation input")?;
        debug!(clauses = input.selected_clauses.len(), "Parsed calculation input");
        Ok(self.engine().calculate_premium(&input)?)
    }

    /// Prepares a quote from a `QuoteRequest` document
    pub fn quote(&self, request_json: &str) -> Result<QuoteSummary> {
        let request: QuoteRequest =
            serde_json::from_str(request_json).context("invalid quote request")?;
        Ok(QuoteService::new(self.engine()).prepare_quote(&request)?)
    }

    /// The active rule tables, or one of them
    pub fn table_json(&self, kind: Option<TableKind>) -> Result<serde_json::Value> {
        let value = match kind {
            None => serde_json::to_value(&self.tables)?,
            Some(TableKind::Clauses) => serde_json::to_value(&self.tables.clauses)?,
            Some(TableKind::Adr) => serde_json::to_value(&self.tables.adr_classes)?,
            Some(TableKind::Variants) => serde_json::to_value(&self.tables.variants)?,
        };
        Ok(value)
    }
}

/// Reads a document from a file, or from stdin when `source` is `-`
pub fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(source).with_context(|| format!("failed to read {}", source))
}

/// Serialises a command result, compact or indented
pub fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}
