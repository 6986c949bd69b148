//! # Concrete Estimate
//!
//! Cement, sand and aggregate quantities for a rectangular pour, and their
//! cost at the configured material prices.
//!
//! ## Method
//!
//! 1. Wet volume = length × width × height (imperial inputs converted
//!    `cubicFeet -> cubicMeter` through the `volume` converter)
//! 2. Dry volume = wet volume × 1.54
//! 3. Each component = dry volume × part / total parts × (100 + wastage) / 100
//! 4. Cement is ordered in 50 kg bags of 0.035 m³
//! 5. The discount is applied through the `discount` converter
//!
//! ## Example
//!
//! ```rust
//! use civil_core::estimators::concrete::{calculate, ConcreteInput};
//!
//! // 2 m × 1 m × 0.5 m slab, 1:2:4 mix, 10% wastage
//! let result = calculate(&ConcreteInput::new(2.0, 1.0, 0.5)).unwrap();
//! assert_eq!(result.volume_m3, 1.0);
//! assert!((result.sand_m3 - 0.484).abs() < 1e-9);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{convert_value, require_non_negative, require_percent, require_positive};
use crate::conversions::{convert, ConversionRequest};
use crate::errors::{CalcError, CalcResult};

/// Wet-to-dry volume factor for mixed concrete
pub const DRY_VOLUME_FACTOR: f64 = 1.54;

/// Volume of one 50 kg cement bag, m³
pub const CEMENT_BAG_VOLUME_M3: f64 = 0.035;

/// Default wastage allowance in percent
pub const DEFAULT_WASTAGE_PERCENT: f64 = 10.0;

/// Unit system of the pour dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VolumeSystem {
    /// Meters, volume in m³
    #[default]
    Metric,
    /// Feet, volume in ft³
    Imperial,
}

impl FromStr for VolumeSystem {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" | "meter" | "m" => Ok(VolumeSystem::Metric),
            "imperial" | "feet" | "ft" => Ok(VolumeSystem::Imperial),
            _ => Err(CalcError::invalid_input("unit", s, "Expected 'metric' or 'imperial'")),
        }
    }
}

/// Nominal cement : sand : aggregate mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MixRatio {
    /// 1:3:6
    #[serde(rename = "1:3:6")]
    M10,
    /// 1:2:4
    #[default]
    #[serde(rename = "1:2:4")]
    M15,
    /// 1:1.5:3
    #[serde(rename = "1:1.5:3")]
    M20,
}

impl MixRatio {
    pub const ALL: [MixRatio; 3] = [MixRatio::M15, MixRatio::M20, MixRatio::M10];

    /// (cement, sand, aggregate) parts
    pub fn parts(&self) -> (f64, f64, f64) {
        match self {
            MixRatio::M10 => (1.0, 3.0, 6.0),
            MixRatio::M15 => (1.0, 2.0, 4.0),
            MixRatio::M20 => (1.0, 1.5, 3.0),
        }
    }

    pub fn total_parts(&self) -> f64 {
        let (c, s, a) = self.parts();
        c + s + a
    }

    pub fn ratio(&self) -> &'static str {
        match self {
            MixRatio::M10 => "1:3:6",
            MixRatio::M15 => "1:2:4",
            MixRatio::M20 => "1:1.5:3",
        }
    }
}

impl fmt::Display for MixRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ratio())
    }
}

impl FromStr for MixRatio {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MixRatio::ALL
            .into_iter()
            .find(|mix| mix.ratio() == s || format!("{:?}", mix).eq_ignore_ascii_case(s))
            .ok_or_else(|| CalcError::invalid_input("mix", s, "Expected 1:2:4, 1:1.5:3 or 1:3:6"))
    }
}

/// Unit prices used for the cost estimate.
///
/// Defaults are local market prices in Nepalese rupees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialPrices {
    /// Per 50 kg bag
    pub cement_bag: f64,
    pub sand_per_cubic_meter: f64,
    pub aggregate_per_cubic_meter: f64,
}

impl Default for MaterialPrices {
    fn default() -> Self {
        Self {
            cement_bag: 850.0,
            sand_per_cubic_meter: 2500.0,
            aggregate_per_cubic_meter: 3000.0,
        }
    }
}

impl MaterialPrices {
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("cement_bag", self.cement_bag)?;
        require_non_negative("sand_per_cubic_meter", self.sand_per_cubic_meter)?;
        require_non_negative("aggregate_per_cubic_meter", self.aggregate_per_cubic_meter)?;
        Ok(())
    }
}

/// Input parameters for a concrete estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Footing F-1",
///   "length": 2.0,
///   "width": 1.0,
///   "height": 0.5,
///   "unit": "metric",
///   "mix": "1:2:4",
///   "wastage_percent": 10.0,
///   "discount_percent": 5.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcreteInput {
    #[serde(default)]
    pub label: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: VolumeSystem,
    #[serde(default)]
    pub mix: MixRatio,
    #[serde(default = "default_wastage")]
    pub wastage_percent: f64,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub prices: MaterialPrices,
}

fn default_wastage() -> f64 {
    DEFAULT_WASTAGE_PERCENT
}

impl ConcreteInput {
    /// Metric 1:2:4 pour with default wastage, no discount, default prices.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            label: String::new(),
            length,
            width,
            height,
            unit: VolumeSystem::Metric,
            mix: MixRatio::M15,
            wastage_percent: DEFAULT_WASTAGE_PERCENT,
            discount_percent: 0.0,
            prices: MaterialPrices::default(),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("length", self.length)?;
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        require_non_negative("wastage_percent", self.wastage_percent)?;
        require_percent("discount_percent", self.discount_percent)?;
        self.prices.validate()
    }
}

/// Concrete estimate results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConcreteResult {
    /// Wet volume, m³
    pub volume_m3: f64,
    pub dry_volume_m3: f64,
    /// Cement, 50 kg bags (fractional)
    pub cement_bags: f64,
    pub sand_m3: f64,
    pub aggregate_m3: f64,
    pub cement_cost: f64,
    pub sand_cost: f64,
    pub aggregate_cost: f64,
    /// Before discount
    pub total_cost: f64,
    pub discounted_cost: f64,
    pub savings: f64,
}

/// Estimate materials and cost for a pour.
///
/// # Errors
///
/// `InvalidInput` for non-positive dimensions, negative wastage or prices,
/// or a discount outside 0-100.
pub fn calculate(input: &ConcreteInput) -> CalcResult<ConcreteResult> {
    input.validate()?;

    let raw_volume = input.length * input.width * input.height;
    let volume_m3 = match input.unit {
        VolumeSystem::Metric => raw_volume,
        VolumeSystem::Imperial => convert_value("volume", "cubicFeet", "cubicMeter", raw_volume)?,
    };

    let (cement_parts, sand_parts, aggregate_parts) = input.mix.parts();
    let total_parts = input.mix.total_parts();
    let dry_volume_m3 = volume_m3 * DRY_VOLUME_FACTOR;
    let wastage_multiplier = (100.0 + input.wastage_percent) / 100.0;

    let cement_bags = ((dry_volume_m3 * cement_parts) / total_parts) * wastage_multiplier / CEMENT_BAG_VOLUME_M3;
    let sand_m3 = ((dry_volume_m3 * sand_parts) / total_parts) * wastage_multiplier;
    let aggregate_m3 = ((dry_volume_m3 * aggregate_parts) / total_parts) * wastage_multiplier;

    let cement_cost = cement_bags * input.prices.cement_bag;
    let sand_cost = sand_m3 * input.prices.sand_per_cubic_meter;
    let aggregate_cost = aggregate_m3 * input.prices.aggregate_per_cubic_meter;
    let total_cost = cement_cost + sand_cost + aggregate_cost;

    let discounted_cost = convert(
        &ConversionRequest::new("discount", "originalPrice", "discountedPrice", total_cost)
            .with_auxiliary(input.discount_percent),
    )?
    .value;
    let savings = convert(
        &ConversionRequest::new("discount", "originalPrice", "savingAmount", total_cost)
            .with_auxiliary(input.discount_percent),
    )?
    .value;

    tracing::debug!(volume_m3, mix = %input.mix, total_cost, "concrete estimate");

    Ok(ConcreteResult {
        volume_m3,
        dry_volume_m3,
        cement_bags,
        sand_m3,
        aggregate_m3,
        cement_cost,
        sand_cost,
        aggregate_cost,
        total_cost,
        discounted_cost,
        savings,
    })
}
