//! # Unit Conversions
//!
//! Category → unit → neighbor-unit conversion definitions and the evaluator
//! that executes a single request.
//!
//! ## Modules
//!
//! - [`operation`] - The tagged `Operation` union (scalar, affine, percentage)
//! - [`registry`] - Immutable category/unit/edge table and the built-in data
//! - [`evaluator`] - `ConversionRequest` → `ConversionResult`
//!
//! ## Auxiliary defaults
//!
//! | Category | Auxiliary | Default when omitted |
//! |----------|-----------|----------------------|
//! | `discount` | discount percentage | `0` (no discount) |
//! | all others | ignored | - |

pub mod evaluator;
pub mod operation;
pub mod registry;
mod tables;

pub use evaluator::{convert, ConversionRequest, ConversionResult};
pub use operation::{AffineTransform, Operation, PercentFn};
pub use registry::{
    registry, AuxiliaryParam, Category, CategoryBuilder, CategoryKind, ConversionRegistry, Edge,
    MissingEdge, UnitDef, REGISTRY,
};
