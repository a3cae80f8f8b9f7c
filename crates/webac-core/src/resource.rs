//! Resource and agent identifiers.
//!
//! [`ResourceRef`] is an opaque IRI compared by identity only. The one piece
//! of structure the authorization layer relies on is the ACL naming
//! convention: the ACL governing `R` lives at `R?ext=acl`.
//!
//! ```
//! use webac_core::ResourceRef;
//!
//! let doc = ResourceRef::new("http://example.org/repo/doc");
//! let acl = doc.acl();
//! assert_eq!(acl.as_str(), "http://example.org/repo/doc?ext=acl");
//! assert!(acl.is_acl());
//! assert_eq!(acl.governed(), doc);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::vocab::ANONYMOUS_AGENT;

/// Suffix appended to a resource IRI to address its ACL.
pub const ACL_EXTENSION: &str = "?ext=acl";

/// Identifier (IRI) of an LDP resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRef(String);

impl ResourceRef {
    /// Create a resource reference from an IRI.
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// The IRI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this identifier addresses an ACL resource.
    pub fn is_acl(&self) -> bool {
        self.0.ends_with(ACL_EXTENSION)
    }

    /// The ACL resource governing this resource.
    ///
    /// Calling this on an ACL identifier returns it unchanged; ACLs are not
    /// themselves governed by nested ACLs.
    pub fn acl(&self) -> ResourceRef {
        if self.is_acl() {
            self.clone()
        } else {
            Self(format!("{}{ACL_EXTENSION}", self.0))
        }
    }

    /// The resource an ACL identifier governs, or `self` for ordinary resources.
    pub fn governed(&self) -> ResourceRef {
        match self.0.strip_suffix(ACL_EXTENSION) {
            Some(base) => Self(base.to_string()),
            None => self.clone(),
        }
    }

    /// The identifier with any `#fragment` removed (the containing document).
    pub fn document(&self) -> ResourceRef {
        match self.0.split_once('#') {
            Some((doc, _)) => Self(doc.to_string()),
            None => self.clone(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceRef {
    fn from(iri: &str) -> Self {
        Self::new(iri)
    }
}

impl From<String> for ResourceRef {
    fn from(iri: String) -> Self {
        Self(iri)
    }
}

impl AsRef<str> for ResourceRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// AgentRef
// ============================================================================

/// Identifier of the principal a request acts for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum AgentRef {
    /// The unauthenticated agent.
    Anonymous,
    /// An authenticated agent, identified by its WebID.
    WebId(String),
}

impl AgentRef {
    /// Create an agent reference for a WebID.
    ///
    /// The anonymous-agent IRI (and the literal `anonymous`) map to
    /// [`AgentRef::Anonymous`].
    pub fn web_id(iri: impl Into<String>) -> Self {
        let iri = iri.into();
        if iri == ANONYMOUS_AGENT || iri == "anonymous" {
            Self::Anonymous
        } else {
            Self::WebId(iri)
        }
    }

    /// Returns `true` for the unauthenticated agent.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// The agent's IRI; the anonymous agent has a well-known IRI.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Anonymous => ANONYMOUS_AGENT,
            Self::WebId(iri) => iri,
        }
    }
}

impl fmt::Display for AgentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AgentRef {
    fn from(iri: String) -> Self {
        Self::web_id(iri)
    }
}

impl From<&str> for AgentRef {
    fn from(iri: &str) -> Self {
        Self::web_id(iri)
    }
}

impl From<AgentRef> for String {
    fn from(agent: AgentRef) -> Self {
        agent.as_str().to_string()
    }
}

impl FromStr for AgentRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::web_id(s.trim()))
    }
}
