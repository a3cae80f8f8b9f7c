//! Vocabulary IRIs used when reading ACL graphs.

/// W3C Web Access Control vocabulary (`http://www.w3.org/ns/auth/acl#`).
pub mod acl {
    /// Namespace prefix.
    pub const NS: &str = "http://www.w3.org/ns/auth/acl#";

    /// `acl:Authorization` class.
    pub const AUTHORIZATION: &str = "http://www.w3.org/ns/auth/acl#Authorization";
    /// `acl:accessTo` predicate.
    pub const ACCESS_TO: &str = "http://www.w3.org/ns/auth/acl#accessTo";
    /// `acl:accessToClass` predicate. Recognised only so it can be skipped.
    pub const ACCESS_TO_CLASS: &str = "http://www.w3.org/ns/auth/acl#accessToClass";
    /// `acl:default` predicate.
    pub const DEFAULT: &str = "http://www.w3.org/ns/auth/acl#default";
    /// `acl:defaultForNew` predicate (older spelling of `acl:default`).
    pub const DEFAULT_FOR_NEW: &str = "http://www.w3.org/ns/auth/acl#defaultForNew";
    /// `acl:mode` predicate.
    pub const MODE: &str = "http://www.w3.org/ns/auth/acl#mode";
    /// `acl:agent` predicate.
    pub const AGENT: &str = "http://www.w3.org/ns/auth/acl#agent";
    /// `acl:agentClass` predicate.
    pub const AGENT_CLASS: &str = "http://www.w3.org/ns/auth/acl#agentClass";
    /// `acl:agentGroup` predicate.
    pub const AGENT_GROUP: &str = "http://www.w3.org/ns/auth/acl#agentGroup";
    /// `acl:AuthenticatedAgent` class.
    pub const AUTHENTICATED_AGENT: &str = "http://www.w3.org/ns/auth/acl#AuthenticatedAgent";

    /// `acl:Read` mode.
    pub const READ: &str = "http://www.w3.org/ns/auth/acl#Read";
    /// `acl:Write` mode.
    pub const WRITE: &str = "http://www.w3.org/ns/auth/acl#Write";
    /// `acl:Append` mode.
    pub const APPEND: &str = "http://www.w3.org/ns/auth/acl#Append";
    /// `acl:Control` mode.
    pub const CONTROL: &str = "http://www.w3.org/ns/auth/acl#Control";
}

/// Friend-of-a-friend vocabulary.
pub mod foaf {
    /// `foaf:Agent`: the class of all agents, used for public grants.
    pub const AGENT: &str = "http://xmlns.com/foaf/0.1/Agent";
}

/// vCard vocabulary, used for group documents.
pub mod vcard {
    /// `vcard:hasMember` predicate.
    pub const HAS_MEMBER: &str = "http://www.w3.org/2006/vcard/ns#hasMember";
}

/// RDF core vocabulary.
pub mod rdf {
    /// `rdf:type` predicate.
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// IRI denoting the unauthenticated agent.
pub const ANONYMOUS_AGENT: &str = "urn:webac:agent:anonymous";
