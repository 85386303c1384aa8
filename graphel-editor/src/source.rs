//! Triple source - the read boundary the tree is built from
//!
//! A `TripleSource` is already scoped to one subject; the editor never passes
//! the subject back in. Evaluation failures surface as
//! [`EditorError::Query`](crate::error::EditorError::Query) and abort tree
//! construction or expansion.

use crate::error::Result;
use graphel_core::{EditorStatement, PropertyInfo};

/// Sentinel limit requesting every remaining statement of a property
pub const ALL_STATEMENTS: usize = usize::MAX;

/// Read access to a subject's statements
pub trait TripleSource {
    /// All property descriptors of the subject, outgoing and incoming
    fn property_infos(&self) -> Result<Vec<PropertyInfo>>;

    /// Initial bounded statement list: at most `limit` statements per
    /// property. The tree requests one more than its page size so a surplus
    /// entry signals that further pages exist.
    fn statement_preview(&self, limit: usize) -> Result<Vec<EditorStatement>>;

    /// The next page of statements for one property. `limit` may be
    /// [`ALL_STATEMENTS`] to request the complete remainder.
    fn statements_for_property(
        &self,
        property: &PropertyInfo,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<EditorStatement>>;
}
