//! Datatypes accepted by edit fields
//!
//! The editor validates user input against the set of datatypes a property
//! accepts before a statement candidate is ever created. The set comes from
//! explicit configuration or is derived from the property's declared ranges.
//!
//! Validation is lexical: each datatype checks the input's lexical form and,
//! on success, produces the corresponding [`Term`].

use crate::iri::Iri;
use crate::term::Term;
use chrono::{DateTime as ChronoDateTime, NaiveDate, NaiveDateTime};
use graphel_vocab::{rdfs, xsd};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Datatypes the editor understands for input validation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Datatype {
    /// Any named resource (rdfs:Resource)
    Resource,
    /// Any literal, untyped (rdfs:Literal)
    UntypedLiteral,
    /// xsd:string
    String,
    /// xsd:integer
    Integer,
    /// xsd:decimal
    Decimal,
    /// xsd:double (also covers xsd:float input)
    Double,
    /// xsd:boolean
    Boolean,
    /// xsd:date
    Date,
    /// xsd:dateTime
    DateTime,
    /// xsd:duration
    Duration,
    /// xsd:anyURI
    AnyUri,
}

impl Datatype {
    /// The type IRI this datatype corresponds to
    pub fn type_iri(self) -> Iri {
        let text = match self {
            Datatype::Resource => rdfs::RESOURCE,
            Datatype::UntypedLiteral => rdfs::LITERAL,
            Datatype::String => xsd::STRING,
            Datatype::Integer => xsd::INTEGER,
            Datatype::Decimal => xsd::DECIMAL,
            Datatype::Double => xsd::DOUBLE,
            Datatype::Boolean => xsd::BOOLEAN,
            Datatype::Date => xsd::DATE,
            Datatype::DateTime => xsd::DATE_TIME,
            Datatype::Duration => xsd::DURATION,
            Datatype::AnyUri => xsd::ANY_URI,
        };
        Iri::new(text)
    }

    /// Map a range type IRI to a datatype, if it is one we understand
    pub fn from_type_iri(iri: &Iri) -> Option<Datatype> {
        match iri.as_str() {
            rdfs::RESOURCE => Some(Datatype::Resource),
            rdfs::LITERAL | graphel_vocab::rdf::XML_LITERAL => Some(Datatype::UntypedLiteral),
            xsd::STRING => Some(Datatype::String),
            xsd::INTEGER => Some(Datatype::Integer),
            xsd::DECIMAL => Some(Datatype::Decimal),
            // float and double unify as generalized floating numbers
            xsd::DOUBLE | xsd::FLOAT => Some(Datatype::Double),
            xsd::BOOLEAN => Some(Datatype::Boolean),
            xsd::DATE => Some(Datatype::Date),
            xsd::DATE_TIME => Some(Datatype::DateTime),
            xsd::DURATION => Some(Datatype::Duration),
            // anyURI/QName semantics differ slightly from RDF, interpreted
            // as enforcing a resource
            xsd::ANY_URI => Some(Datatype::AnyUri),
            _ => None,
        }
    }

    /// Check if this datatype produces a literal (rather than a resource)
    pub fn is_literal(self) -> bool {
        !matches!(self, Datatype::Resource | Datatype::AnyUri)
    }

    /// Check whether the input conforms to this datatype's lexical space
    pub fn validate(self, input: &str) -> bool {
        self.parse(input).is_some()
    }

    /// Parse input into a term of this datatype, or `None` if it does not conform
    pub fn parse(self, input: &str) -> Option<Term> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        match self {
            Datatype::Resource | Datatype::AnyUri => {
                Iri::parse(input).ok().map(Term::Iri)
            }
            Datatype::UntypedLiteral => Some(Term::literal(input)),
            Datatype::String => Some(Term::typed_literal(input, self.type_iri())),
            Datatype::Integer => {
                // arbitrary length integers allowed; check sign + digits
                let body = input.strip_prefix(['+', '-']).unwrap_or(input);
                if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) {
                    Some(Term::typed_literal(input, self.type_iri()))
                } else {
                    None
                }
            }
            Datatype::Decimal | Datatype::Double => {
                if input.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
                    Some(Term::typed_literal(input, self.type_iri()))
                } else {
                    None
                }
            }
            Datatype::Boolean => match input {
                "true" | "false" | "0" | "1" => {
                    Some(Term::typed_literal(input, self.type_iri()))
                }
                _ => None,
            },
            Datatype::Date => NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(|_| Term::typed_literal(input, self.type_iri())),
            Datatype::DateTime => {
                let ok = ChronoDateTime::parse_from_rfc3339(input).is_ok()
                    || NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S").is_ok();
                ok.then(|| Term::typed_literal(input, self.type_iri()))
            }
            Datatype::Duration => {
                if is_iso8601_duration(input) {
                    Some(Term::typed_literal(input, self.type_iri()))
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_iri().local_name())
    }
}

/// Parse input against a list of accepted datatypes, first match wins.
///
/// An empty accepted list means both resources and untyped literals are
/// legitimate: input that parses as an IRI becomes a resource, anything else
/// a plain literal.
pub fn parse_accepted(input: &str, accepted: &[Datatype]) -> Option<Term> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if accepted.is_empty() {
        return Iri::parse(input)
            .map(Term::Iri)
            .ok()
            .or_else(|| Some(Term::literal(input)));
    }
    accepted.iter().find_map(|dt| dt.parse(input))
}

/// Lexical check for xsd:duration (e.g. "P2Y6M", "-P1DT12H30M", "PT5S")
fn is_iso8601_duration(input: &str) -> bool {
    let body = input.strip_prefix('-').unwrap_or(input);
    let Some(body) = body.strip_prefix('P') else {
        return false;
    };
    if body.is_empty() {
        return false;
    }
    let mut saw_component = false;
    let mut in_time = false;
    let mut digits = String::new();
    for c in body.chars() {
        match c {
            'T' if !in_time => {
                if !digits.is_empty() {
                    return false;
                }
                in_time = true;
            }
            '0'..='9' | '.' => digits.push(c),
            'Y' | 'M' | 'D' | 'H' | 'S' => {
                if digits.is_empty() {
                    return false;
                }
                if (c == 'Y' || c == 'D') && in_time {
                    return false;
                }
                if (c == 'H' || c == 'S') && !in_time {
                    return false;
                }
                digits.clear();
                saw_component = true;
            }
            _ => return false,
        }
    }
    saw_component && digits.is_empty()
}
