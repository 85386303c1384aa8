//! Cardinality checker - per-predicate bounds tracking for a pending batch
//!
//! Created lazily, only for predicates with an explicit minimum or maximum
//! configured, and seeded with the count observed before the batch. The
//! checker flags *newly introduced* violations only: a count that was
//! already below the minimum (or above the maximum) before the batch is
//! tolerated as long as the batch does not move it further in the wrong
//! direction.

use crate::error::{CardinalityBound, EditorError};
use graphel_core::Iri;

/// Net-effect counter for one constrained predicate
#[derive(Debug, Clone)]
pub struct CardinalityChecker {
    predicate: Iri,
    min: Option<u32>,
    max: Option<u32>,
    baseline: i64,
    running: i64,
}

impl CardinalityChecker {
    /// Create a checker seeded with the pre-batch statement count
    pub fn new(predicate: Iri, min: Option<u32>, max: Option<u32>, baseline: usize) -> Self {
        let baseline = baseline as i64;
        Self {
            predicate,
            min,
            max,
            baseline,
            running: baseline,
        }
    }

    /// The constrained predicate
    pub fn predicate(&self) -> &Iri {
        &self.predicate
    }

    /// Record one queued addition
    pub fn record_add(&mut self) {
        self.running += 1;
    }

    /// Record one queued removal
    pub fn record_remove(&mut self) {
        self.running -= 1;
    }

    /// Validate the running count against the configured bounds.
    ///
    /// Rejects only newly introduced inconsistencies: below-minimum is an
    /// error only when the running count is also below the baseline,
    /// above-maximum only when it is also above the baseline.
    pub fn validate(&self) -> Result<(), EditorError> {
        if let Some(min) = self.min {
            if self.running < i64::from(min) && self.running < self.baseline {
                return Err(EditorError::Cardinality {
                    predicate: self.predicate.clone(),
                    bound: CardinalityBound::Min(min),
                });
            }
        }
        if let Some(max) = self.max {
            if self.running > i64::from(max) && self.running > self.baseline {
                return Err(EditorError::Cardinality {
                    predicate: self.predicate.clone(),
                    bound: CardinalityBound::Max(max),
                });
            }
        }
        Ok(())
    }
}
