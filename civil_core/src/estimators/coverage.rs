//! # Coverage Estimate (Bricks and Tiles)
//!
//! Counts the pieces needed to cover a rectangular room or wall face.
//!
//! ```text
//! pieces = ceil(room_area / piece_area × (1 + waste / 100))
//! ```
//!
//! Room and piece dimensions share one length unit. Feet inputs are converted
//! to square meters through the `area` converter (`squareFeet -> squareMeter`).
//!
//! ## Example
//!
//! ```rust
//! use civil_core::estimators::coverage::{calculate, CoverageInput, CoverageMaterial};
//!
//! // 5 m × 3 m wall, 0.19 m × 0.09 m brick face, 10% waste
//! let input = CoverageInput::new(CoverageMaterial::Brick, 5.0, 3.0, 0.19, 0.09);
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.pieces, 965);
//! assert_eq!(result.area_m2, 15.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{convert_value, require_non_negative, require_positive, round2};
use crate::errors::{CalcError, CalcResult};

/// Default waste allowance in percent
pub const DEFAULT_WASTE_PERCENT: f64 = 10.0;

/// What is being laid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoverageMaterial {
    #[default]
    Brick,
    Tile,
}

impl CoverageMaterial {
    pub fn display_name(&self) -> &'static str {
        match self {
            CoverageMaterial::Brick => "Brick",
            CoverageMaterial::Tile => "Tile",
        }
    }
}

/// Length unit of all coverage dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    #[default]
    Meter,
    Feet,
}

impl LengthUnit {
    /// Matching unit key in the `area` converter
    pub fn area_unit(&self) -> &'static str {
        match self {
            LengthUnit::Meter => "squareMeter",
            LengthUnit::Feet => "squareFeet",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthUnit::Meter => write!(f, "meter"),
            LengthUnit::Feet => write!(f, "feet"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "meter" | "meters" | "m" => Ok(LengthUnit::Meter),
            "feet" | "foot" | "ft" => Ok(LengthUnit::Feet),
            _ => Err(CalcError::invalid_input("unit", s, "Expected 'meter' or 'feet'")),
        }
    }
}

/// Input parameters for a coverage estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Bathroom floor",
///   "material": "tile",
///   "room_length": 12.0,
///   "room_width": 8.0,
///   "piece_length": 1.0,
///   "piece_width": 1.0,
///   "unit": "feet",
///   "waste_percent": 10.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageInput {
    /// User label (e.g., "North wall")
    #[serde(default)]
    pub label: String,
    pub material: CoverageMaterial,
    pub room_length: f64,
    pub room_width: f64,
    pub piece_length: f64,
    pub piece_width: f64,
    #[serde(default)]
    pub unit: LengthUnit,
    #[serde(default = "default_waste")]
    pub waste_percent: f64,
}

fn default_waste() -> f64 {
    DEFAULT_WASTE_PERCENT
}

impl CoverageInput {
    /// Metric input with the default waste allowance.
    pub fn new(
        material: CoverageMaterial,
        room_length: f64,
        room_width: f64,
        piece_length: f64,
        piece_width: f64,
    ) -> Self {
        Self {
            label: String::new(),
            material,
            room_length,
            room_width,
            piece_length,
            piece_width,
            unit: LengthUnit::Meter,
            waste_percent: DEFAULT_WASTE_PERCENT,
        }
    }

    pub fn with_unit(mut self, unit: LengthUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_waste(mut self, waste_percent: f64) -> Self {
        self.waste_percent = waste_percent;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("room_length", self.room_length)?;
        require_positive("room_width", self.room_width)?;
        require_positive("piece_length", self.piece_length)?;
        require_positive("piece_width", self.piece_width)?;
        require_non_negative("waste_percent", self.waste_percent)?;
        Ok(())
    }
}

/// Coverage estimate results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageResult {
    /// Whole pieces to order, waste included
    pub pieces: u64,
    /// Room area in m², rounded to 2 decimals
    pub area_m2: f64,
    /// Single piece area in m²
    pub piece_area_m2: f64,
    /// `1 + waste / 100`
    pub waste_multiplier: f64,
}

/// Estimate the pieces needed.
///
/// # Errors
///
/// `InvalidInput` if a dimension is not positive or waste is negative.
pub fn calculate(input: &CoverageInput) -> CalcResult<CoverageResult> {
    input.validate()?;

    let from = input.unit.area_unit();
    let room_area_m2 = convert_value("area", from, "squareMeter", input.room_length * input.room_width)?;
    let piece_area_m2 = convert_value("area", from, "squareMeter", input.piece_length * input.piece_width)?;

    let waste_multiplier = 1.0 + input.waste_percent / 100.0;
    let pieces = ((room_area_m2 / piece_area_m2) * waste_multiplier).ceil();
    if !pieces.is_finite() {
        return Err(CalcError::invalid_input(
            "piece_length",
            input.piece_length.to_string(),
            "Piece is too small for the covered area",
        ));
    }

    tracing::debug!(
        material = input.material.display_name(),
        room_area_m2,
        pieces,
        "coverage estimate"
    );

    Ok(CoverageResult {
        pieces: pieces as u64,
        area_m2: round2(room_area_m2),
        piece_area_m2,
        waste_multiplier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_metric() {
        // 4 × 3 = 12 m², 0.25 m² tiles -> 48 × 1.1 = 52.8 -> 53
        let input = CoverageInput::new(CoverageMaterial::Tile, 4.0, 3.0, 0.5, 0.5);
        let result = calculate(&input).unwrap();
        assert_eq!(result.pieces, 53);
        assert_eq!(result.area_m2, 12.0);
    }

    #[test]
    fn test_feet_converted_through_area_converter() {
        // 10 × 10 ft = 100 ft² = 9.2903 m², 1 ft² tiles, no waste -> 100
        let input = CoverageInput::new(CoverageMaterial::Tile, 10.0, 10.0, 1.0, 1.0)
            .with_unit(LengthUnit::Feet)
            .with_waste(0.0);
        let result = calculate(&input).unwrap();
        assert_eq!(result.area_m2, 9.29);
        assert_eq!(result.pieces, 100);
    }

    #[test]
    fn test_zero_waste() {
        let input = CoverageInput::new(CoverageMaterial::Brick, 2.0, 2.0, 1.0, 1.0).with_waste(0.0);
        assert_eq!(calculate(&input).unwrap().pieces, 4);
    }

    #[test]
    fn test_invalid_dimensions() {
        let input = CoverageInput::new(CoverageMaterial::Brick, -1.0, 3.0, 0.2, 0.1);
        let err = calculate(&input).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "room_length"));

        let input = CoverageInput::new(CoverageMaterial::Brick, 1.0, 3.0, 0.2, 0.0);
        assert!(calculate(&input).is_err());

        let input = CoverageInput::new(CoverageMaterial::Brick, 1.0, 3.0, 0.2, 0.1).with_waste(-5.0);
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_length_unit_parse() {
        assert_eq!("Feet".parse::<LengthUnit>().unwrap(), LengthUnit::Feet);
        assert_eq!("m".parse::<LengthUnit>().unwrap(), LengthUnit::Meter);
        assert!("cubit".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_serialization_defaults() {
        let json = r#"{"material":"tile","room_length":4.0,"room_width":3.0,"piece_length":0.5,"piece_width":0.5}"#;
        let input: CoverageInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.unit, LengthUnit::Meter);
        assert_eq!(input.waste_percent, DEFAULT_WASTE_PERCENT);
    }
}
