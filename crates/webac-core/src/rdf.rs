//! RDF terms and triples.
//!
//! Graphs are exposed as flat, ordered sequences of [`Triple`]s; consumers
//! filter and group them without relying on any index structure.
//!
//! Terms have a compact text form used in datasets and on the command line:
//!
//! | Form | Term |
//! |---|---|
//! | `<http://ex.org/a>` or `http://ex.org/a` | IRI |
//! | `_:b0` | blank node |
//! | `"text"` | plain literal |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Term {
    /// An IRI reference.
    Iri(String),
    /// A blank node label (without the `_:` prefix).
    Blank(String),
    /// A plain literal value.
    Literal(String),
}

impl Term {
    /// Create an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Iri(iri.into())
    }

    /// Create a blank node term.
    pub fn blank(label: impl Into<String>) -> Self {
        Self::Blank(label.into())
    }

    /// Create a literal term.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// The IRI, if this term is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns `true` if this term is the given IRI.
    pub fn is_iri(&self, iri: &str) -> bool {
        self.as_iri() == Some(iri)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::Blank(label) => write!(f, "_:{label}"),
            Self::Literal(value) => write!(f, "\"{}\"", value.replace('"', "\\\"")),
        }
    }
}

impl FromStr for Term {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidTerm(s.to_string()));
        }

        if let Some(label) = s.strip_prefix("_:") {
            if label.is_empty() {
                return Err(Error::InvalidTerm(s.to_string()));
            }
            return Ok(Self::Blank(label.to_string()));
        }

        if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
            let inner = &s[1..s.len() - 1];
            return Ok(Self::Literal(inner.replace("\\\"", "\"")));
        }

        if let Some(inner) = s.strip_prefix('<') {
            return match inner.strip_suffix('>') {
                Some(iri) if !iri.is_empty() => Ok(Self::Iri(iri.to_string())),
                _ => Err(Error::InvalidTerm(s.to_string())),
            };
        }

        if s.contains(char::is_whitespace) || s.starts_with('"') {
            return Err(Error::InvalidTerm(s.to_string()));
        }
        Ok(Self::Iri(s.to_string()))
    }
}

impl TryFrom<String> for Term {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Term> for String {
    fn from(term: Term) -> Self {
        term.to_string()
    }
}

/// A single RDF statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// Subject (IRI or blank node).
    pub subject: Term,
    /// Predicate IRI.
    pub predicate: String,
    /// Object term.
    pub object: Term,
}

impl Triple {
    /// Create a triple.
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    /// Create a triple whose subject and object are IRIs.
    pub fn iris(subject: &str, predicate: &str, object: &str) -> Self {
        Self::new(Term::iri(subject), predicate, Term::iri(object))
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}
