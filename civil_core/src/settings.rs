//! # Settings
//!
//! User preferences shared by every host: result formatting, the quick
//! search threshold, and estimator defaults. Settings serialize to a small
//! JSON file (see [`crate::file_io`]).
//!
//! ## Structure
//!
//! ```text
//! SettingsFile
//! ├── meta: SettingsMetadata (schema version, last modified)
//! └── settings: Settings
//!     ├── display_precision
//!     ├── search_threshold
//!     ├── default_waste_percent
//!     └── material_prices: MaterialPrices
//! ```
//!
//! ## Example
//!
//! ```rust
//! use civil_core::settings::Settings;
//!
//! let settings = Settings::default();
//! assert_eq!(settings.format_value(3.280_84), "3.2808");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::estimators::MaterialPrices;
use crate::search::{SearchOptions, DEFAULT_THRESHOLD};

/// Current schema version for settings files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Largest accepted `display_precision`
pub const MAX_DISPLAY_PRECISION: usize = 12;

/// User preferences. Every field has a default, so partial files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fractional digits when a host formats a converted value
    pub display_precision: usize,
    /// Search scores must be strictly above this
    pub search_threshold: f64,
    /// Waste/wastage percent used when an estimate does not give one
    pub default_waste_percent: f64,
    /// Concrete cost inputs
    pub material_prices: MaterialPrices,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_precision: 4,
            search_threshold: DEFAULT_THRESHOLD,
            default_waste_percent: 10.0,
            material_prices: MaterialPrices::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> CalcResult<()> {
        if self.display_precision > MAX_DISPLAY_PRECISION {
            return Err(CalcError::invalid_input(
                "display_precision",
                self.display_precision.to_string(),
                format!("Must be at most {}", MAX_DISPLAY_PRECISION),
            ));
        }
        if !self.search_threshold.is_finite() || !(0.0..1.0).contains(&self.search_threshold) {
            return Err(CalcError::invalid_input(
                "search_threshold",
                self.search_threshold.to_string(),
                "Must be in [0, 1)",
            ));
        }
        if !self.default_waste_percent.is_finite() || self.default_waste_percent < 0.0 {
            return Err(CalcError::invalid_input(
                "default_waste_percent",
                self.default_waste_percent.to_string(),
                "Must be zero or greater",
            ));
        }
        self.material_prices.validate()
    }

    /// Search options derived from these settings
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            threshold: self.search_threshold,
        }
    }

    /// Format a value with `display_precision` fractional digits
    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*}", self.display_precision, value)
    }
}

/// Metadata stored alongside settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsMetadata {
    /// Schema version, for compatibility checks on load
    pub version: String,
    /// Last modification time (UTC)
    pub modified: DateTime<Utc>,
}

/// Root of a settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsFile {
    pub meta: SettingsMetadata,
    pub settings: Settings,
}

impl SettingsFile {
    pub fn new(settings: Settings) -> Self {
        Self {
            meta: SettingsMetadata {
                version: SCHEMA_VERSION.to_string(),
                modified: Utc::now(),
            },
            settings,
        }
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
