//! Conversion operations.
//!
//! An edge in the registry stores one [`Operation`]. The variants are
//! dispatched explicitly; there is no runtime inspection of what kind of
//! value was stored.

use serde::{Deserialize, Serialize};

/// How a declared edge turns an input value into an output value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    /// `result = value × factor`
    Scalar { factor: f64 },
    /// Affine shift used by temperature scales
    Affine(AffineTransform),
    /// Percentage-based derived price; reads the auxiliary parameter
    Percent { function: PercentFn },
}

impl Operation {
    /// Shorthand for a scalar edge
    pub const fn scalar(factor: f64) -> Self {
        Operation::Scalar { factor }
    }

    /// Shorthand for a percentage edge
    pub const fn percent(function: PercentFn) -> Self {
        Operation::Percent { function }
    }

    /// Whether this operation reads the auxiliary parameter.
    pub fn uses_auxiliary(&self) -> bool {
        matches!(self, Operation::Percent { .. })
    }

    /// Apply the operation.
    ///
    /// `auxiliary` is ignored by operations that do not use it. Percentage
    /// operations fall back to [`PercentFn::DEFAULT_PERCENT`] when it is absent.
    pub fn apply(&self, value: f64, auxiliary: Option<f64>) -> f64 {
        match self {
            Operation::Scalar { factor } => value * factor,
            Operation::Affine(transform) => transform.apply(value),
            Operation::Percent { function } => {
                function.apply(value, auxiliary.unwrap_or(PercentFn::DEFAULT_PERCENT))
            }
        }
    }

    /// Plain-text formula in terms of `x` (and `p` for the percentage).
    pub fn formula(&self) -> String {
        match self {
            Operation::Scalar { factor } => format!("x × {}", factor),
            Operation::Affine(transform) => transform.formula(),
            Operation::Percent { function } => function.formula().to_string(),
        }
    }
}

/// `result = ((value + shift_before) × numerator) / denominator + shift_after`
///
/// Numerator and denominator are kept apart so `9/5` and `5/9` are applied
/// as a multiply then a divide instead of through a rounded ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub shift_before: f64,
    pub numerator: f64,
    pub denominator: f64,
    pub shift_after: f64,
}

impl AffineTransform {
    pub const fn new(shift_before: f64, numerator: f64, denominator: f64, shift_after: f64) -> Self {
        Self {
            shift_before,
            numerator,
            denominator,
            shift_after,
        }
    }

    /// Pure offset, `value + shift`
    pub const fn offset(shift: f64) -> Self {
        Self::new(0.0, 1.0, 1.0, shift)
    }

    pub fn apply(&self, value: f64) -> f64 {
        ((value + self.shift_before) * self.numerator) / self.denominator + self.shift_after
    }

    fn formula(&self) -> String {
        let mut out = if self.shift_before == 0.0 {
            "x".to_string()
        } else if self.shift_before > 0.0 {
            format!("(x + {})", self.shift_before)
        } else {
            format!("(x - {})", -self.shift_before)
        };
        if self.numerator != 1.0 || self.denominator != 1.0 {
            out = format!("{} × {}/{}", out, self.numerator, self.denominator);
        }
        if self.shift_after > 0.0 {
            out = format!("{} + {}", out, self.shift_after);
        } else if self.shift_after < 0.0 {
            out = format!("{} - {}", out, -self.shift_after);
        }
        out
    }
}

/// Named percentage functions. `value` is a price, the auxiliary parameter
/// is the discount percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentFn {
    /// `price × (1 − pct/100)`
    DiscountedPrice,
    /// `price × (pct/100)`
    SavingAmount,
}

impl PercentFn {
    /// A missing percentage means "no discount".
    pub const DEFAULT_PERCENT: f64 = 0.0;

    pub fn apply(&self, price: f64, percent: f64) -> f64 {
        match self {
            PercentFn::DiscountedPrice => price * (1.0 - percent / 100.0),
            PercentFn::SavingAmount => price * (percent / 100.0),
        }
    }

    pub fn formula(&self) -> &'static str {
        match self {
            PercentFn::DiscountedPrice => "x × (1 − p/100)",
            PercentFn::SavingAmount => "x × (p/100)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_apply() {
        let op = Operation::scalar(3.28084);
        assert!((op.apply(2.0, None) - 6.56168).abs() < 1e-12);
        // auxiliary ignored
        assert_eq!(op.apply(2.0, Some(50.0)), op.apply(2.0, None));
    }

    #[test]
    fn test_affine_celsius_to_fahrenheit() {
        let c_to_f = AffineTransform::new(0.0, 9.0, 5.0, 32.0);
        assert_eq!(c_to_f.apply(0.0), 32.0);
        assert_eq!(c_to_f.apply(100.0), 212.0);
        assert_eq!(c_to_f.apply(-40.0), -40.0);
    }

    #[test]
    fn test_percent_functions() {
        assert_eq!(PercentFn::DiscountedPrice.apply(200.0, 25.0), 150.0);
        assert_eq!(PercentFn::SavingAmount.apply(200.0, 25.0), 50.0);
    }

    #[test]
    fn test_percent_default() {
        let op = Operation::percent(PercentFn::DiscountedPrice);
        assert_eq!(op.apply(100.0, None), 100.0);
        let op = Operation::percent(PercentFn::SavingAmount);
        assert_eq!(op.apply(100.0, None), 0.0);
    }

    #[test]
    fn test_formula_text() {
        assert_eq!(Operation::scalar(12.0).formula(), "x × 12");
        let f_to_c = Operation::Affine(AffineTransform::new(-32.0, 5.0, 9.0, 0.0));
        assert_eq!(f_to_c.formula(), "(x - 32) × 5/9");
        let c_to_k = Operation::Affine(AffineTransform::offset(273.15));
        assert_eq!(c_to_k.formula(), "x + 273.15");
    }

    #[test]
    fn test_serialization_tagged() {
        let json = serde_json::to_string(&Operation::scalar(0.5)).unwrap();
        assert_eq!(json, r#"{"kind":"scalar","factor":0.5}"#);
        let op = Operation::percent(PercentFn::SavingAmount);
        let back: Operation = serde_json::from_str(&serde_json::to_string(&op).unwrap()).unwrap();
        assert_eq!(op, back);
    }
}
