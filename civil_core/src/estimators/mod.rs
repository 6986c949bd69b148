//! # Material Estimators
//!
//! Quantity and cost estimates for common construction materials. Each
//! estimator follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Estimate results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure function
//!
//! Unit changes (square feet to square meters, cubic feet to cubic meters)
//! and discounts go through the conversion evaluator, so the estimators use
//! exactly the factors the converter shows.
//!
//! ## Available Estimators
//!
//! - [`coverage`] - Bricks or tiles needed to cover a rectangular area
//! - [`concrete`] - Cement, sand and aggregate for a rectangular pour, with costs

pub mod concrete;
pub mod coverage;

use serde::{Deserialize, Serialize};

use crate::conversions::{convert, ConversionRequest};
use crate::errors::{CalcError, CalcResult};

pub use concrete::{ConcreteInput, ConcreteResult, MaterialPrices, MixRatio, VolumeSystem};
pub use coverage::{CoverageInput, CoverageMaterial, CoverageResult, LengthUnit};

/// Enum wrapper for all estimate types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EstimateItem {
    /// Brick or tile coverage
    Coverage(CoverageInput),
    /// Concrete pour
    Concrete(ConcreteInput),
}

/// Result of [`EstimateItem::calculate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EstimateResult {
    Coverage(CoverageResult),
    Concrete(ConcreteResult),
}

impl EstimateItem {
    /// Get the user-provided label for this estimate
    pub fn label(&self) -> &str {
        match self {
            EstimateItem::Coverage(c) => &c.label,
            EstimateItem::Concrete(c) => &c.label,
        }
    }

    /// Get the estimate type as a string
    pub fn estimate_type(&self) -> &'static str {
        match self {
            EstimateItem::Coverage(c) => c.material.display_name(),
            EstimateItem::Concrete(_) => "Concrete",
        }
    }

    pub fn calculate(&self) -> CalcResult<EstimateResult> {
        match self {
            EstimateItem::Coverage(input) => coverage::calculate(input).map(EstimateResult::Coverage),
            EstimateItem::Concrete(input) => concrete::calculate(input).map(EstimateResult::Concrete),
        }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be zero or greater"));
    }
    Ok(())
}

fn require_percent(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be between 0 and 100"));
    }
    Ok(())
}

/// Convert through the built-in registry and return the bare value.
fn convert_value(category: &str, from_unit: &str, to_unit: &str, value: f64) -> CalcResult<f64> {
    Ok(convert(&ConversionRequest::new(category, from_unit, to_unit, value))?.value)
}

/// Round to two decimals for display-level quantities.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
