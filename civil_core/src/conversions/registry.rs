//! # Conversion Registry
//!
//! Immutable table of categories, their units, and the directed edges
//! between units. Lookups are checked: an unknown category, an undeclared
//! unit or a missing edge is an error, never a silent default.
//!
//! The registry performs no path-finding. `feet -> mile` works because a
//! `feet -> mile` edge is declared, not because `feet -> meter -> mile`
//! could be chained.
//!
//! ## Usage
//!
//! ```rust
//! use civil_core::conversions::{registry, Operation};
//!
//! let op = registry().lookup_edge("length", "meter", "feet").unwrap();
//! assert_eq!(op, Operation::scalar(3.28084));
//!
//! let units: Vec<_> = registry().list_units("weight").unwrap().iter().map(|u| u.key).collect();
//! assert_eq!(units, ["kilogram", "pound", "gram", "ton"]);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::operation::{AffineTransform, Operation, PercentFn};
use super::tables;
use crate::errors::{CalcError, CalcResult};

/// The built-in registry, loaded on first use and read-only afterwards.
pub static REGISTRY: Lazy<ConversionRegistry> = Lazy::new(ConversionRegistry::builtin);

/// Shorthand for `&*REGISTRY`.
pub fn registry() -> &'static ConversionRegistry {
    &REGISTRY
}

// ============================================================================
// Categories and Units
// ============================================================================

/// Broad nature of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Physical units with reciprocal factors
    Measurement,
    /// Exchange rates, quoted independently per direction
    Currency,
    /// Price-derived values computed from a percentage
    Pricing,
}

/// A member of exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitDef {
    /// Lookup key, e.g. `squareFeet`
    pub key: &'static str,
    /// Display label, e.g. `Square Feet`
    pub label: &'static str,
}

/// Secondary numeric input read by some operations in a category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AuxiliaryParam {
    pub name: &'static str,
    pub label: &'static str,
    /// Value used when a request omits the auxiliary
    pub default: f64,
}

/// A directed edge as reported by [`Category::edges`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub from: &'static str,
    pub to: &'static str,
    pub operation: Operation,
}

/// A named domain of commensurable units.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub kind: CategoryKind,
    pub auxiliary: Option<AuxiliaryParam>,
    units: Vec<UnitDef>,
    #[serde(skip)]
    edges: HashMap<(&'static str, &'static str), Operation>,
    /// Declaration order of edges, for stable listings
    #[serde(skip)]
    edge_order: Vec<(&'static str, &'static str)>,
}

impl Category {
    /// Units in declaration order
    pub fn units(&self) -> &[UnitDef] {
        &self.units
    }

    /// Find a declared unit by key
    pub fn unit(&self, key: &str) -> Option<&UnitDef> {
        self.units.iter().find(|u| u.key == key)
    }

    pub(crate) fn resolve_unit(&self, key: &str) -> CalcResult<&'static str> {
        self.unit(key)
            .map(|u| u.key)
            .ok_or_else(|| CalcError::unknown_unit(self.key, key))
    }

    /// Declared edges in declaration order
    pub fn edges(&self) -> Vec<Edge> {
        self.edge_order
            .iter()
            .filter_map(|key| {
                self.edges.get(key).map(|operation| Edge {
                    from: key.0,
                    to: key.1,
                    operation: *operation,
                })
            })
            .collect()
    }

    /// Direct edge between two declared unit keys, if any
    pub fn edge(&self, from: &'static str, to: &'static str) -> Option<Operation> {
        self.edges.get(&(from, to)).copied()
    }

    /// Directed pairs of distinct units that have no edge.
    pub fn missing_edges(&self) -> Vec<(&'static str, &'static str)> {
        let mut missing = Vec::new();
        for from in &self.units {
            for to in &self.units {
                if from.key != to.key && !self.edges.contains_key(&(from.key, to.key)) {
                    missing.push((from.key, to.key));
                }
            }
        }
        missing
    }
}

/// Builder used to declare a category's units and edges.
#[derive(Debug)]
pub struct CategoryBuilder {
    category: Category,
}

impl CategoryBuilder {
    pub fn new(key: &'static str, label: &'static str, kind: CategoryKind) -> Self {
        Self {
            category: Category {
                key,
                label,
                description: "",
                kind,
                auxiliary: None,
                units: Vec::new(),
                edges: HashMap::new(),
                edge_order: Vec::new(),
            },
        }
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.category.description = description;
        self
    }

    pub fn auxiliary(mut self, name: &'static str, label: &'static str, default: f64) -> Self {
        self.category.auxiliary = Some(AuxiliaryParam { name, label, default });
        self
    }

    pub fn unit(mut self, key: &'static str, label: &'static str) -> Self {
        if self.category.unit(key).is_none() {
            self.category.units.push(UnitDef { key, label });
        }
        self
    }

    /// Declare one directed edge. A later declaration of the same pair
    /// replaces the earlier one. Both units must already be declared with
    /// [`CategoryBuilder::unit`]; an edge to an undeclared unit is dropped.
    pub fn edge(mut self, from: &'static str, to: &'static str, operation: Operation) -> Self {
        if let Some(undeclared) = [from, to].into_iter().find(|key| self.category.unit(key).is_none()) {
            tracing::warn!(
                category = self.category.key,
                from,
                to,
                unit = undeclared,
                "edge references an undeclared unit, ignored"
            );
            return self;
        }
        if self.category.edges.insert((from, to), operation).is_none() {
            self.category.edge_order.push((from, to));
        }
        self
    }

    /// Declare all scalar edges leaving `from`.
    pub fn scalars(mut self, from: &'static str, factors: &[(&'static str, f64)]) -> Self {
        for &(to, factor) in factors {
            self = self.edge(from, to, Operation::scalar(factor));
        }
        self
    }

    pub fn affine(self, from: &'static str, to: &'static str, transform: AffineTransform) -> Self {
        self.edge(from, to, Operation::Affine(transform))
    }

    pub fn percent(self, from: &'static str, to: &'static str, function: PercentFn) -> Self {
        self.edge(from, to, Operation::percent(function))
    }

    pub fn build(self) -> Category {
        self.category
    }
}

// ============================================================================
// Registry
// ============================================================================

/// A directed edge missing from a category's pairwise graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingEdge {
    pub category: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}

/// All categories, in declaration order, with a key index.
#[derive(Debug, Clone)]
pub struct ConversionRegistry {
    categories: Vec<Category>,
    index: HashMap<&'static str, usize>,
}

impl ConversionRegistry {
    /// Build a registry from categories. A repeated key keeps the first
    /// declaration.
    pub fn new(categories: Vec<Category>) -> Self {
        let mut kept: Vec<Category> = Vec::with_capacity(categories.len());
        let mut index = HashMap::new();
        for category in categories {
            if index.contains_key(category.key) {
                tracing::warn!(category = category.key, "duplicate category declaration ignored");
                continue;
            }
            index.insert(category.key, kept.len());
            kept.push(category);
        }
        Self {
            categories: kept,
            index,
        }
    }

    /// The built-in tables.
    pub fn builtin() -> Self {
        let registry = Self::new(tables::builtin_categories());
        for gap in registry.audit_missing_edges() {
            let intentional = registry
                .category(gap.category)
                .map(|c| c.kind == CategoryKind::Pricing)
                .unwrap_or(false);
            if intentional {
                tracing::trace!(category = gap.category, from = gap.from, to = gap.to, "one-directional edge");
            } else {
                tracing::warn!(category = gap.category, from = gap.from, to = gap.to, "missing direct edge");
            }
        }
        tracing::debug!(categories = registry.categories.len(), "conversion registry loaded");
        registry
    }

    /// Categories in declaration order.
    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by key.
    pub fn category(&self, key: &str) -> CalcResult<&Category> {
        self.index
            .get(key)
            .map(|&i| &self.categories[i])
            .ok_or_else(|| CalcError::unknown_category(key))
    }

    /// Units of a category in declaration order.
    pub fn list_units(&self, category: &str) -> CalcResult<&[UnitDef]> {
        Ok(self.category(category)?.units())
    }

    /// Resolve the operation for `from -> to` within `category`.
    ///
    /// Equal, declared units resolve to the identity (`× 1`) whether or
    /// not a self-edge exists.
    ///
    /// # Errors
    ///
    /// * `UnknownCategory` - category absent
    /// * `UnknownUnit` - either unit not declared in the category
    /// * `NoDirectConversion` - distinct units with no declared edge
    pub fn lookup_edge(&self, category: &str, from_unit: &str, to_unit: &str) -> CalcResult<Operation> {
        let cat = self.category(category)?;
        let from = cat.resolve_unit(from_unit)?;
        let to = cat.resolve_unit(to_unit)?;
        if from == to {
            return Ok(Operation::scalar(1.0));
        }
        cat.edge(from, to)
            .ok_or_else(|| CalcError::no_direct_conversion(cat.key, from, to))
    }

    /// Every directed pair of distinct units, across all categories, that
    /// has no declared edge.
    pub fn audit_missing_edges(&self) -> Vec<MissingEdge> {
        self.categories
            .iter()
            .flat_map(|c| {
                c.missing_edges()
                    .into_iter()
                    .map(move |(from, to)| MissingEdge {
                        category: c.key,
                        from,
                        to,
                    })
            })
            .collect()
    }

    /// Render the registry as a markdown reference.
    pub fn generate_markdown(&self) -> String {
        let mut output = String::with_capacity(16_000);

        output.push_str(
            r#"# Civil Pro Conversion Tables

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-tables`

Every conversion is a directly declared edge. Converting a unit to itself
always returns the input unchanged. No conversion is chained through a
third unit.

---

"#,
        );

        for category in &self.categories {
            output.push_str(&format!("## {} (`{}`)\n\n", category.label, category.key));
            if !category.description.is_empty() {
                output.push_str(&format!("{}\n\n", category.description));
            }

            output.push_str("**Units:** ");
            let units: Vec<String> = category
                .units
                .iter()
                .map(|u| format!("{} (`{}`)", u.label, u.key))
                .collect();
            output.push_str(&units.join(", "));
            output.push_str("\n\n");

            if let Some(aux) = &category.auxiliary {
                output.push_str(&format!(
                    "**Auxiliary:** `{}` ({}), default {} when omitted\n\n",
                    aux.name, aux.label, aux.default
                ));
            }

            output.push_str("| From | To | Formula |\n");
            output.push_str("|------|----|---------|\n");
            for edge in category.edges() {
                output.push_str(&format!(
                    "| {} | {} | `{}` |\n",
                    edge.from,
                    edge.to,
                    edge.operation.formula()
                ));
            }
            output.push('\n');

            let missing = category.missing_edges();
            if !missing.is_empty() {
                output.push_str("**Not convertible (no direct edge):** ");
                let pairs: Vec<String> = missing
                    .iter()
                    .map(|(from, to)| format!("{} → {}", from, to))
                    .collect();
                output.push_str(&pairs.join(", "));
                output.push_str("\n\n");
            }
        }

        output
    }
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
