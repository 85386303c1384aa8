//! Deterministic ordering for clusters and properties
//!
//! Applied whenever the tree or a cluster is (re)built:
//!
//! - Clusters: reserved outgoing default bucket first, then the reserved
//!   incoming default bucket, then all remaining buckets alphabetically by
//!   displayed text.
//! - Properties within a cluster: rdf:type first, then rdfs:label, then
//!   manually configured predicates in configured order, then the remainder
//!   alphabetically by displayed label.
//!
//! Both comparators are total orders (full-text tie-breaks) so that building
//! the tree twice from the same snapshot yields identical ordering.

use graphel_core::{Iri, PropertyInfo, Term};
use graphel_vocab::{buckets, rdf, rdfs};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// Reserved bucket for outgoing statements without a usable domain
pub static OUTGOING_DEFAULT_BUCKET: Lazy<Term> =
    Lazy::new(|| Term::literal(buckets::OUTGOING_DEFAULT));

/// Reserved bucket for incoming statements to a resource
pub static INCOMING_DEFAULT_BUCKET: Lazy<Term> =
    Lazy::new(|| Term::literal(buckets::INCOMING_DEFAULT));

/// Reserved bucket for incoming statements to a literal subject
pub static INCOMING_LITERAL_BUCKET: Lazy<Term> =
    Lazy::new(|| Term::literal(buckets::INCOMING_LITERAL));

fn cluster_rank(value: &Term) -> u8 {
    if value == &*OUTGOING_DEFAULT_BUCKET {
        0
    } else if value == &*INCOMING_DEFAULT_BUCKET {
        1
    } else {
        2
    }
}

/// Total order over cluster bucket values
pub fn cluster_cmp(a: &Term, b: &Term) -> Ordering {
    cluster_rank(a)
        .cmp(&cluster_rank(b))
        .then_with(|| a.display_text().cmp(b.display_text()))
        .then_with(|| a.cmp(b))
}

fn property_rank(predicate: &Iri) -> u8 {
    if predicate.as_str() == rdf::TYPE {
        0
    } else if predicate.as_str() == rdfs::LABEL {
        1
    } else {
        2
    }
}

/// Total order over properties within a cluster.
///
/// `configured` maps predicates to their position in the manual property
/// configuration. Precedence: rdf:type, rdfs:label, configured predicates in
/// configured order, then the alphabetical remainder.
pub fn property_cmp(
    a: &PropertyInfo,
    b: &PropertyInfo,
    configured: &FxHashMap<Iri, usize>,
) -> Ordering {
    let rank_a = property_rank(&a.predicate);
    let rank_b = property_rank(&b.predicate);
    if rank_a != rank_b || rank_a < 2 {
        return rank_a
            .cmp(&rank_b)
            .then_with(|| a.direction.cmp(&b.direction));
    }
    match (configured.get(&a.predicate), configured.get(&b.predicate)) {
        (Some(ia), Some(ib)) => return ia.cmp(ib).then_with(|| a.direction.cmp(&b.direction)),
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => {}
    }
    a.predicate
        .local_name()
        .cmp(b.predicate.local_name())
        .then_with(|| a.predicate.cmp(&b.predicate))
        .then_with(|| a.direction.cmp(&b.direction))
}
