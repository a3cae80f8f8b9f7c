//! File-based descriptions of a resource tree.
//!
//! A dataset lists resources, their containers and their statements.
//! Statements are `[subject, predicate, object]` rows in compact term
//! syntax: `<iri>` or a bare IRI, `_:label` for blank nodes and `"text"`
//! for literals. Names of the form `prefix:local` are expanded using the
//! built-in `acl`, `foaf`, `vcard` and `rdf` prefixes plus any declared in
//! `[prefixes]`. The predicate `a` abbreviates `rdf:type`.
//!
//! ```toml
//! [prefixes]
//! ex = "http://example.org/"
//!
//! [[resource]]
//! id = "ex:"
//!
//! [[resource]]
//! id = "ex:doc"
//! container = "ex:"
//!
//! [[resource]]
//! id = "http://example.org/?ext=acl"
//! triples = [
//!     ["_:public", "a", "acl:Authorization"],
//!     ["_:public", "acl:default", "ex:"],
//!     ["_:public", "acl:mode", "acl:Read"],
//!     ["_:public", "acl:agentClass", "foaf:Agent"],
//! ]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use webac_core::vocab;
use webac_core::{ResourceRef, ResourceSnapshot, Term, Triple};

use crate::error::{Error, Result};

/// One `[subject, predicate, object]` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement(pub String, pub String, pub String);

/// One resource in a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Resource identifier (may use a prefix).
    pub id: String,

    /// Parent container, absent for a partition root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    /// Statements held by the resource.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triples: Vec<Statement>,
}

/// A resource tree loaded from TOML or JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Additional prefix declarations.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub prefixes: BTreeMap<String, String>,

    /// Resources in the tree.
    #[serde(default, rename = "resource")]
    pub resources: Vec<ResourceEntry>,
}

impl Dataset {
    /// Read a dataset from a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has another extension,
    /// or does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parse a TOML dataset.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON dataset.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Expand a possibly-prefixed name to a full IRI.
    pub fn expand(&self, name: &str) -> String {
        let name = name.trim();
        if let Some((prefix, local)) = name.split_once(':') {
            if let Some(ns) = self.namespace(prefix) {
                return format!("{ns}{local}");
            }
        }
        name.to_string()
    }

    fn namespace(&self, prefix: &str) -> Option<&str> {
        if let Some(ns) = self.prefixes.get(prefix) {
            return Some(ns);
        }
        match prefix {
            "acl" => Some(vocab::acl::NS),
            "foaf" => Some("http://xmlns.com/foaf/0.1/"),
            "vcard" => Some("http://www.w3.org/2006/vcard/ns#"),
            "rdf" => Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
            _ => None,
        }
    }

    fn term(&self, text: &str) -> Result<Term> {
        Ok(match text.parse::<Term>()? {
            Term::Iri(iri) => Term::Iri(self.expand(&iri)),
            other => other,
        })
    }

    fn predicate(&self, text: &str) -> String {
        match text.trim() {
            "a" => vocab::rdf::TYPE.to_string(),
            other => {
                let other = other
                    .strip_prefix('<')
                    .and_then(|s| s.strip_suffix('>'))
                    .unwrap_or(other);
                self.expand(other)
            }
        }
    }

    /// Convert every entry into a [`ResourceSnapshot`].
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid term or a resource defined twice.
    pub fn snapshots(&self) -> Result<Vec<ResourceSnapshot>> {
        let mut seen = HashSet::new();
        let mut snapshots = Vec::with_capacity(self.resources.len());

        for entry in &self.resources {
            let id = ResourceRef::new(self.expand(&entry.id));
            if !seen.insert(id.clone()) {
                return Err(Error::DuplicateResource(id.to_string()));
            }

            let triples = entry
                .triples
                .iter()
                .map(|Statement(s, p, o)| {
                    Ok(Triple::new(self.term(s)?, self.predicate(p), self.term(o)?))
                })
                .collect::<Result<Vec<_>>>()?;

            let mut snapshot = ResourceSnapshot::new(id).with_triples(triples);
            if let Some(container) = &entry.container {
                snapshot = snapshot.with_container(self.expand(container));
            }
            snapshots.push(snapshot);
        }
        Ok(snapshots)
    }
}
