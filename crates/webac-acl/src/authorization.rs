//! Access modes, agent classes, and parsed authorizations.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use webac_core::vocab::{acl, foaf};
use webac_core::{AgentRef, ResourceRef, Term};

// ============================================================================
// Mode
// ============================================================================

/// A WebAC access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read the resource.
    Read,
    /// Modify or delete the resource.
    Write,
    /// Add to the resource without removing anything.
    Append,
    /// Read and modify the resource's ACL.
    Control,
}

impl Mode {
    /// All modes, in declaration order.
    pub const ALL: [Mode; 4] = [Mode::Read, Mode::Write, Mode::Append, Mode::Control];

    /// The mode named by an `acl:` mode IRI. Unknown IRIs yield `None`.
    pub fn from_iri(iri: &str) -> Option<Self> {
        match iri {
            acl::READ => Some(Mode::Read),
            acl::WRITE => Some(Mode::Write),
            acl::APPEND => Some(Mode::Append),
            acl::CONTROL => Some(Mode::Control),
            _ => None,
        }
    }

    /// The `acl:` IRI of this mode.
    pub fn iri(self) -> &'static str {
        match self {
            Mode::Read => acl::READ,
            Mode::Write => acl::WRITE,
            Mode::Append => acl::APPEND,
            Mode::Control => acl::CONTROL,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Mode::Read => 0b0001,
            Mode::Write => 0b0010,
            Mode::Append => 0b0100,
            Mode::Control => 0b1000,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Read => "read",
            Mode::Write => "write",
            Mode::Append => "append",
            Mode::Control => "control",
        };
        f.write_str(name)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(mode) = Mode::from_iri(s) {
            return Ok(mode);
        }
        match s.to_ascii_lowercase().as_str() {
            "read" => Ok(Mode::Read),
            "write" => Ok(Mode::Write),
            "append" => Ok(Mode::Append),
            "control" => Ok(Mode::Control),
            _ => Err(format!("unknown access mode '{s}'")),
        }
    }
}

// ============================================================================
// ModeSet
// ============================================================================

/// A set of [`Mode`]s. Cheap to copy.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Mode>", into = "Vec<Mode>")]
pub struct ModeSet(u8);

impl ModeSet {
    /// The empty set.
    pub const EMPTY: ModeSet = ModeSet(0);
    /// Every mode.
    pub const ALL: ModeSet = ModeSet(0b1111);
    /// Only [`Mode::Control`].
    pub const CONTROL: ModeSet = ModeSet(0b1000);

    /// Create an empty set.
    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Add a mode.
    pub fn insert(&mut self, mode: Mode) {
        self.0 |= mode.bit();
    }

    /// Returns a copy with `mode` added.
    pub fn with(mut self, mode: Mode) -> Self {
        self.insert(mode);
        self
    }

    /// Returns `true` if `mode` is in the set.
    pub fn contains(self, mode: Mode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// Returns `true` if every mode of `self` is in `other`.
    pub fn is_subset(self, other: ModeSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Set union.
    pub fn union(self, other: ModeSet) -> Self {
        Self(self.0 | other.0)
    }

    /// Set intersection.
    pub fn intersection(self, other: ModeSet) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns `true` if no mode is present.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of modes in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate modes in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Mode> {
        Mode::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl fmt::Debug for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|m| m.to_string()).collect();
        f.write_str(&names.join(","))
    }
}

impl FromIterator<Mode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = Mode>>(iter: I) -> Self {
        let mut set = ModeSet::new();
        for mode in iter {
            set.insert(mode);
        }
        set
    }
}

impl From<Mode> for ModeSet {
    fn from(mode: Mode) -> Self {
        ModeSet::new().with(mode)
    }
}

impl<const N: usize> From<[Mode; N]> for ModeSet {
    fn from(modes: [Mode; N]) -> Self {
        modes.into_iter().collect()
    }
}

impl From<Vec<Mode>> for ModeSet {
    fn from(modes: Vec<Mode>) -> Self {
        modes.into_iter().collect()
    }
}

impl From<ModeSet> for Vec<Mode> {
    fn from(set: ModeSet) -> Self {
        set.iter().collect()
    }
}

impl FromStr for ModeSet {
    type Err = String;

    /// Parse a comma-separated list such as `read,write`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Mode::from_str)
            .collect()
    }
}

// ============================================================================
// AgentClass
// ============================================================================

/// A class-based grant target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentClass {
    /// Any agent, including the anonymous one (`foaf:Agent`).
    Public,
    /// Any agent that is not anonymous (`acl:AuthenticatedAgent`).
    AuthenticatedAgent,
}

impl AgentClass {
    /// The agent class named by an IRI. Unsupported classes yield `None`.
    pub fn from_iri(iri: &str) -> Option<Self> {
        match iri {
            foaf::AGENT => Some(AgentClass::Public),
            acl::AUTHENTICATED_AGENT => Some(AgentClass::AuthenticatedAgent),
            _ => None,
        }
    }
}

// ============================================================================
// Authorization
// ============================================================================

/// A grant parsed from one `acl:Authorization` subject.
#[derive(Debug, Clone, PartialEq)]
pub struct Authorization {
    /// The authorization's subject in the ACL graph.
    pub subject: Term,
    /// Resources governed directly (`acl:accessTo`).
    pub access_to: BTreeSet<ResourceRef>,
    /// Whether the grant is inherited by descendants (`acl:default`).
    pub inheritable: bool,
    /// Granted modes.
    pub modes: ModeSet,
    /// Explicit agents (`acl:agent`).
    pub agents: BTreeSet<AgentRef>,
    /// Agent classes (`acl:agentClass`).
    pub agent_classes: BTreeSet<AgentClass>,
    /// Groups whose members are granted (`acl:agentGroup`).
    pub agent_groups: BTreeSet<ResourceRef>,
}

impl Authorization {
    /// Create an authorization with no scope, modes or agents.
    pub fn new(subject: Term) -> Self {
        Self {
            subject,
            access_to: BTreeSet::new(),
            inheritable: false,
            modes: ModeSet::EMPTY,
            agents: BTreeSet::new(),
            agent_classes: BTreeSet::new(),
            agent_groups: BTreeSet::new(),
        }
    }

    /// Returns `true` if the authorization names at least one agent, class or group.
    pub fn has_grantee(&self) -> bool {
        !self.agents.is_empty() || !self.agent_classes.is_empty() || !self.agent_groups.is_empty()
    }

    /// Returns `true` if the authorization grants something to someone.
    pub fn is_well_formed(&self) -> bool {
        !self.modes.is_empty() && self.has_grantee()
    }
}
