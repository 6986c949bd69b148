//! # Conversion Evaluator
//!
//! Turns a [`ConversionRequest`] into a [`ConversionResult`].
//!
//! Evaluation order:
//!
//! 1. `value` must be finite, otherwise `InvalidInput`
//! 2. the category and both units must be declared
//! 3. `from_unit == to_unit` returns `value` unchanged, before any edge lookup
//! 4. otherwise the declared edge is applied
//!
//! The result is not rounded; formatting to a fixed number of digits is up
//! to the host.
//!
//! ## Example
//!
//! ```rust
//! use civil_core::conversions::{convert, ConversionRequest};
//!
//! let result = convert(&ConversionRequest::new("temperature", "celsius", "fahrenheit", 100.0)).unwrap();
//! assert_eq!(result.value, 212.0);
//!
//! let request = ConversionRequest::new("discount", "originalPrice", "discountedPrice", 200.0)
//!     .with_auxiliary(25.0);
//! assert_eq!(convert(&request).unwrap().value, 150.0);
//! ```

use serde::{Deserialize, Serialize};

use super::registry::{registry, ConversionRegistry};
use crate::errors::{CalcError, CalcResult};

/// A single conversion request.
///
/// ## JSON Example
///
/// ```json
/// {
///   "category": "discount",
///   "from_unit": "originalPrice",
///   "to_unit": "savingAmount",
///   "value": 200.0,
///   "auxiliary": 25.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub category: String,
    pub from_unit: String,
    pub to_unit: String,
    pub value: f64,
    /// Secondary input, only read by operations that need one (discount
    /// percentage). Ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<f64>,
}

impl ConversionRequest {
    pub fn new(
        category: impl Into<String>,
        from_unit: impl Into<String>,
        to_unit: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            category: category.into(),
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
            value,
            auxiliary: None,
        }
    }

    pub fn with_auxiliary(mut self, auxiliary: f64) -> Self {
        self.auxiliary = Some(auxiliary);
        self
    }
}

/// Converted value. The caller already knows the target unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub value: f64,
}

impl ConversionRegistry {
    /// Evaluate a request against this registry.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - `value` (or a used `auxiliary`) is not finite, or
    ///   the result overflows
    /// * `UnknownCategory`, `UnknownUnit`, `NoDirectConversion` - from the lookup
    pub fn convert(&self, request: &ConversionRequest) -> CalcResult<ConversionResult> {
        if !request.value.is_finite() {
            return Err(CalcError::invalid_input(
                "value",
                request.value.to_string(),
                "Value must be a finite number",
            ));
        }

        let category = self.category(&request.category)?;
        let from = category.resolve_unit(&request.from_unit)?;
        let to = category.resolve_unit(&request.to_unit)?;
        if from == to {
            return Ok(ConversionResult {
                value: request.value,
            });
        }

        let operation = category
            .edge(from, to)
            .ok_or_else(|| CalcError::no_direct_conversion(category.key, from, to))?;

        if operation.uses_auxiliary() {
            if let Some(aux) = request.auxiliary {
                if !aux.is_finite() {
                    return Err(CalcError::invalid_input(
                        "auxiliary",
                        aux.to_string(),
                        "Auxiliary value must be a finite number",
                    ));
                }
            }
        }

        let value = operation.apply(request.value, request.auxiliary);
        if !value.is_finite() {
            return Err(CalcError::invalid_input(
                "value",
                request.value.to_string(),
                "Result is not a finite number",
            ));
        }

        tracing::debug!(
            category = %request.category,
            from = %request.from_unit,
            to = %request.to_unit,
            input = request.value,
            output = value,
            "converted"
        );

        Ok(ConversionResult { value })
    }
}

/// Evaluate a request against the built-in registry.
pub fn convert(request: &ConversionRequest) -> CalcResult<ConversionResult> {
    registry().convert(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversions::registry::{CategoryBuilder, CategoryKind};

    fn value_of(category: &str, from: &str, to: &str, value: f64) -> f64 {
        convert(&ConversionRequest::new(category, from, to, value))
            .unwrap()
            .value
    }

    #[test]
    fn test_scalar_conversion() {
        assert!((value_of("length", "meter", "feet", 10.0) - 32.8084).abs() < 1e-9);
        assert_eq!(value_of("weight", "ton", "kilogram", 2.5), 2500.0);
    }

    #[test]
    fn test_temperature_exactness() {
        assert_eq!(value_of("temperature", "celsius", "fahrenheit", 0.0), 32.0);
        assert_eq!(value_of("temperature", "celsius", "kelvin", 0.0), 273.15);
        assert_eq!(value_of("temperature", "fahrenheit", "celsius", 32.0), 0.0);
        assert_eq!(value_of("temperature", "kelvin", "celsius", 273.15), 0.0);
    }

    #[test]
    fn test_temperature_fahrenheit_kelvin() {
        assert!((value_of("temperature", "fahrenheit", "kelvin", 212.0) - 373.15).abs() < 1e-9);
        assert!((value_of("temperature", "kelvin", "fahrenheit", 373.15) - 212.0).abs() < 1e-9);
    }

    #[test]
    fn test_discount_default_auxiliary() {
        assert_eq!(value_of("discount", "originalPrice", "discountedPrice", 100.0), 100.0);
        assert_eq!(value_of("discount", "originalPrice", "savingAmount", 100.0), 0.0);
    }

    #[test]
    fn test_discount_with_auxiliary() {
        let discounted = ConversionRequest::new("discount", "originalPrice", "discountedPrice", 200.0)
            .with_auxiliary(25.0);
        assert_eq!(convert(&discounted).unwrap().value, 150.0);

        let saving = ConversionRequest::new("discount", "originalPrice", "savingAmount", 200.0)
            .with_auxiliary(25.0);
        assert_eq!(convert(&saving).unwrap().value, 50.0);
    }

    #[test]
    fn test_auxiliary_ignored_for_scalar() {
        let request = ConversionRequest::new("length", "feet", "inch", 2.0).with_auxiliary(f64::NAN);
        assert_eq!(convert(&request).unwrap().value, 24.0);
    }

    #[test]
    fn test_non_finite_auxiliary_rejected_when_used() {
        let request = ConversionRequest::new("discount", "originalPrice", "discountedPrice", 100.0)
            .with_auxiliary(f64::INFINITY);
        let err = convert(&request).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "auxiliary"));
    }

    #[test]
    fn test_identity_short_circuit() {
        assert_eq!(value_of("temperature", "celsius", "celsius", -12.5), -12.5);
        assert_eq!(value_of("discount", "savingAmount", "savingAmount", 42.0), 42.0);
    }

    #[test]
    fn test_invalid_input() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = convert(&ConversionRequest::new("length", "meter", "feet", bad)).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_identity_still_checks_category() {
        let err = convert(&ConversionRequest::new("bogus", "x", "x", 5.0)).unwrap_err();
        assert_eq!(err, CalcError::unknown_category("bogus"));
    }

    #[test]
    fn test_identity_still_checks_unit() {
        // `kilogram` belongs to `weight`
        let err = convert(&ConversionRequest::new("length", "kilogram", "kilogram", 5.0)).unwrap_err();
        assert_eq!(err, CalcError::unknown_unit("length", "kilogram"));
    }

    #[test]
    fn test_invalid_input_checked_before_identity() {
        let err = convert(&ConversionRequest::new("length", "meter", "meter", f64::NAN)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_overflow_is_invalid_input() {
        let err = convert(&ConversionRequest::new("weight", "ton", "gram", f64::MAX)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_missing_edge_is_error_not_nan() {
        let err = convert(&ConversionRequest::new("discount", "savingAmount", "discountedPrice", 10.0))
            .unwrap_err();
        assert_eq!(err.error_code(), "NO_DIRECT_CONVERSION");
    }

    #[test]
    fn test_unknown_category() {
        let err = convert(&ConversionRequest::new("pressure", "psi", "kpa", 1.0)).unwrap_err();
        assert_eq!(err, CalcError::unknown_category("pressure"));
    }

    #[test]
    fn test_custom_registry() {
        let reg = ConversionRegistry::new(vec![CategoryBuilder::new("force", "Force", CategoryKind::Measurement)
            .unit("kip", "Kip")
            .unit("pound", "Pound")
            .scalars("kip", &[("pound", 1000.0)])
            .build()]);
        let result = reg.convert(&ConversionRequest::new("force", "kip", "pound", 1.5)).unwrap();
        assert_eq!(result.value, 1500.0);
        assert!(reg.convert(&ConversionRequest::new("force", "pound", "kip", 1.0)).is_err());
    }

    #[test]
    fn test_request_serialization() {
        let json = r#"{"category":"length","from_unit":"feet","to_unit":"inch","value":3.0}"#;
        let request: ConversionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.auxiliary, None);
        assert_eq!(convert(&request).unwrap().value, 36.0);
        assert_eq!(serde_json::to_string(&request).unwrap(), json);
    }
}
