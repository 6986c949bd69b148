//! # civil_core - Conversion and Quick Search Engine
//!
//! `civil_core` is the computational heart of Civil Pro: a unit-conversion
//! engine over an immutable table of directly declared edges, an
//! approximate-match ranker for jumping to a tool by a loose query, and the
//! material estimators built on top of the converter. All inputs and outputs
//! are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over data loaded once at startup
//! - **Checked lookups**: Unknown categories, units and edges are typed errors
//! - **No inference**: Only declared unit pairs convert; nothing is chained
//! - **JSON-First**: All request/result types implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use civil_core::{convert, search, ConversionRequest};
//!
//! let result = convert(&ConversionRequest::new("length", "feet", "meter", 10.0)).unwrap();
//! assert!((result.value - 3.048).abs() < 1e-9);
//!
//! let matches = search("tile", civil_core::search::catalog());
//! assert_eq!(matches[0].entry.path, "/calculator/estimator/tile");
//! ```
//!
//! ## Modules
//!
//! - [`conversions`] - Conversion registry and evaluator
//! - [`search`] - Fuzzy match ranker and built-in catalog
//! - [`estimators`] - Brick, tile and concrete estimators
//! - [`settings`] - User preferences
//! - [`file_io`] - Atomic settings persistence
//! - [`errors`] - Structured error types

pub mod conversions;
pub mod errors;
pub mod estimators;
pub mod file_io;
pub mod search;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use conversions::{convert, registry, ConversionRequest, ConversionResult, Operation};
pub use errors::{CalcError, CalcResult, ConversionError};
pub use file_io::{load_settings, save_settings};
pub use search::{search, similarity, RankedMatch, SearchEntry};
pub use settings::{Settings, SettingsFile};
