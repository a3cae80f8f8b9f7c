//! WebAC Core: shared types, traits, errors, and vocabulary.
//!
//! This crate provides the foundational types used across all WebAC crates.
//! It has no internal WebAC dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`rdf`]: RDF terms and triples as flat sequences
//! - [`resource`]: Resource and agent identifiers
//! - [`accessor`]: The storage capability consumed by authorization
//! - [`vocab`]: IRI constants for the ACL, FOAF, vCard and RDF vocabularies

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod accessor;
pub mod error;
pub mod rdf;
pub mod resource;
pub mod vocab;

// Re-export key types at crate root for convenience
pub use accessor::{AclChanged, ResourceAccessor, ResourceSnapshot};
pub use error::{Error, Result};
pub use rdf::{Term, Triple};
pub use resource::{AgentRef, ResourceRef, ACL_EXTENSION};
