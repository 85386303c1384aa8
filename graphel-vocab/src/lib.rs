//! RDF Vocabulary Constants for Graphel
//!
//! This crate provides a centralized location for the vocabulary IRIs and
//! reserved labels used throughout the Graphel entity-editor core.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `owl` - OWL vocabulary (http://www.w3.org/2002/07/owl#)
//! - `buckets` - reserved cluster bucket labels used by the editor tree

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:XMLLiteral IRI
    pub const XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// rdfs:comment IRI
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

    /// rdfs:domain IRI
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";

    /// rdfs:range IRI
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

    /// rdfs:subClassOf IRI
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

    /// rdfs:subPropertyOf IRI
    pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";

    /// rdfs:member IRI
    pub const MEMBER: &str = "http://www.w3.org/2000/01/rdf-schema#member";

    /// rdfs:isDefinedBy IRI
    pub const IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";

    /// rdfs:seeAlso IRI
    pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";

    /// rdfs:Literal IRI
    pub const LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";

    /// rdfs:Resource IRI
    pub const RESOURCE: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";
}

/// XSD vocabulary constants
pub mod xsd {
    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:duration IRI
    pub const DURATION: &str = "http://www.w3.org/2001/XMLSchema#duration";

    /// xsd:anyURI IRI
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
}

/// OWL vocabulary constants
pub mod owl {
    /// owl:ObjectProperty IRI
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";

    /// owl:DatatypeProperty IRI
    pub const DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
}

/// Reserved cluster bucket labels used by the editor tree.
///
/// Buckets are plain literal values; two of them are reserved and always sort
/// before the alphabetical remainder (see the editor's cluster comparator).
pub mod buckets {
    /// Default bucket for outgoing statements whose property has no usable domain
    pub const OUTGOING_DEFAULT: &str = "Resource";

    /// Default bucket for incoming statements to a resource
    pub const INCOMING_DEFAULT: &str = "Resource (Incoming Links)";

    /// Default bucket for incoming statements to a literal subject
    pub const INCOMING_LITERAL: &str = "Resources Pointing to This Literal";

    /// Label suffix marking an incoming-direction bucket
    pub const INCOMING_SUFFIX: &str = " (Incoming Links)";

    /// Bucket label for a predicate newly added through the editor
    pub fn new_property(display_name: &str) -> String {
        format!("Newly Added Property {display_name}")
    }

    /// Bucket label for incoming statements clustered under a typed bucket
    pub fn incoming(display_name: &str) -> String {
        format!("{display_name}{INCOMING_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_labels() {
        assert_eq!(buckets::incoming("Person"), "Person (Incoming Links)");
        assert_eq!(
            buckets::new_property("ex:knows"),
            "Newly Added Property ex:knows"
        );
        assert_ne!(buckets::OUTGOING_DEFAULT, buckets::INCOMING_DEFAULT);
    }
}
