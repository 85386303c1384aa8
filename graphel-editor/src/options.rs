//! Editor configuration
//!
//! `EditorOptions` is built once per editing session and threaded into tree
//! construction as explicit immutable context; nothing here is ambient or
//! static, so multiple sessions never interfere.

use crate::error::{EditorError, Result};
use graphel_core::{Datatype, Iri};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Per-predicate constraints
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyConstraint {
    /// The constrained predicate
    pub predicate: Iri,
    /// Show this property as an empty field even with no current values
    #[serde(default = "default_true")]
    pub show_always: bool,
    /// Reject batches that newly drop the value count below this bound
    #[serde(default)]
    pub min_cardinality: Option<u32>,
    /// Reject batches that newly push the value count above this bound
    #[serde(default)]
    pub max_cardinality: Option<u32>,
    /// Datatypes accepted for new values; empty means "derive from schema"
    #[serde(default)]
    pub accepted_types: Vec<Datatype>,
}

fn default_true() -> bool {
    true
}

impl PropertyConstraint {
    /// Unconstrained entry for a predicate (show-always only)
    pub fn new(predicate: Iri) -> Self {
        Self {
            predicate,
            show_always: true,
            min_cardinality: None,
            max_cardinality: None,
            accepted_types: Vec::new(),
        }
    }

    /// Set the minimum cardinality
    pub fn with_min(mut self, min: u32) -> Self {
        self.min_cardinality = Some(min);
        self
    }

    /// Set the maximum cardinality
    pub fn with_max(mut self, max: u32) -> Self {
        self.max_cardinality = Some(max);
        self
    }

    /// Set the accepted datatypes
    pub fn with_accepted_types(mut self, types: Vec<Datatype>) -> Self {
        self.accepted_types = types;
        self
    }

    /// Set whether the property is shown when empty
    pub fn with_show_always(mut self, show: bool) -> Self {
        self.show_always = show;
        self
    }

    /// Check whether a cardinality bound is configured
    pub fn has_cardinality_bounds(&self) -> bool {
        self.min_cardinality.is_some() || self.max_cardinality.is_some()
    }
}

/// Options for building an editor tree
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditorOptions {
    /// Number of values materialized initially per property
    pub initial_page_size: usize,
    /// Number of additional values fetched per expansion request
    pub page_increment: usize,
    /// Group properties by their domain/range clusters
    pub cluster_by_domain: bool,
    /// Include incoming (inverse) properties
    pub show_inverse_properties: bool,
    /// Only show properties present in the constraint list
    pub limit_to_configured: bool,
    /// Inject placeholder properties suggested by schema lookup
    pub show_suggested: bool,
    /// Per-predicate constraints, in display order
    pub constraints: Vec<PropertyConstraint>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            initial_page_size: 3,
            page_increment: 100,
            cluster_by_domain: true,
            show_inverse_properties: true,
            limit_to_configured: false,
            show_suggested: false,
            constraints: Vec::new(),
        }
    }
}

impl EditorOptions {
    /// Build the per-predicate lookup maps, validating the configuration.
    ///
    /// Fails with a configuration error if a predicate appears more than
    /// once in the constraint list.
    pub fn constraint_map(&self) -> Result<ConstraintMap> {
        let mut entries = FxHashMap::default();
        let mut order = FxHashMap::default();
        for (idx, constraint) in self.constraints.iter().enumerate() {
            if entries
                .insert(constraint.predicate.clone(), constraint.clone())
                .is_some()
            {
                return Err(EditorError::config(format!(
                    "property {} configured more than once",
                    constraint.predicate
                )));
            }
            order.insert(constraint.predicate.clone(), idx);
        }
        Ok(ConstraintMap { entries, order })
    }
}

/// Validated per-predicate lookup built from [`EditorOptions::constraints`]
#[derive(Clone, Debug, Default)]
pub struct ConstraintMap {
    entries: FxHashMap<Iri, PropertyConstraint>,
    order: FxHashMap<Iri, usize>,
}

impl ConstraintMap {
    /// Constraint entry for a predicate, if configured
    pub fn get(&self, predicate: &Iri) -> Option<&PropertyConstraint> {
        self.entries.get(predicate)
    }

    /// Check whether a predicate is configured at all
    pub fn contains(&self, predicate: &Iri) -> bool {
        self.entries.contains_key(predicate)
    }

    /// Configured sort positions, used by the property comparator
    pub fn sort_order(&self) -> &FxHashMap<Iri, usize> {
        &self.order
    }

    /// Predicates configured as always shown
    pub fn show_always_predicates(&self) -> impl Iterator<Item = &Iri> {
        self.entries
            .iter()
            .filter(|(_, c)| c.show_always)
            .map(|(p, _)| p)
    }
}
