//! ACL graph parsing.
//!
//! Turns the flat triple sequence of an ACL resource into [`Authorization`]
//! records. The parser is deliberately forgiving: anything it does not
//! understand is skipped, and authorizations missing modes or grantees are
//! dropped rather than reported. A single bad entry never invalidates the
//! rest of the ACL.
//!
//! Unsupported statements (`acl:accessToClass`, regex agent patterns,
//! `acl:origin`, owner statements) are ignored.

use std::collections::HashMap;

use webac_core::vocab::{acl, rdf};
use webac_core::{AgentRef, ResourceRef, Term, Triple};

use crate::authorization::{AgentClass, Authorization, Mode};
use crate::error::{Error, Result};

/// Extract the well-formed authorizations from an ACL graph.
///
/// Only subjects typed `acl:Authorization` are considered. The order of the
/// result follows the first appearance of each subject but carries no
/// meaning: all matching authorizations are combined by union.
pub fn parse_authorizations(triples: &[Triple]) -> Vec<Authorization> {
    let mut order: Vec<&Term> = Vec::new();
    let mut by_subject: HashMap<&Term, Vec<&Triple>> = HashMap::new();

    for triple in triples {
        let statements = by_subject.entry(&triple.subject).or_insert_with(|| {
            order.push(&triple.subject);
            Vec::new()
        });
        statements.push(triple);
    }

    order
        .into_iter()
        .filter_map(|subject| {
            let statements = by_subject.get(subject)?;
            if !is_authorization(statements) {
                return None;
            }
            match build_authorization(subject, statements) {
                Ok(auth) => Some(auth),
                Err(e) => {
                    log::debug!("Skipping ACL entry: {e}");
                    None
                }
            }
        })
        .collect()
}

fn is_authorization(statements: &[&Triple]) -> bool {
    statements
        .iter()
        .any(|t| t.predicate == rdf::TYPE && t.object.is_iri(acl::AUTHORIZATION))
}

fn build_authorization(subject: &Term, statements: &[&Triple]) -> Result<Authorization> {
    let mut auth = Authorization::new(subject.clone());

    for triple in statements {
        // Literal objects never name modes, resources or agents.
        let Some(object) = triple.object.as_iri() else {
            continue;
        };

        match triple.predicate.as_str() {
            acl::MODE => {
                if let Some(mode) = Mode::from_iri(object) {
                    auth.modes.insert(mode);
                }
            }
            acl::ACCESS_TO => {
                auth.access_to.insert(ResourceRef::new(object));
            }
            acl::DEFAULT | acl::DEFAULT_FOR_NEW => {
                auth.inheritable = true;
            }
            acl::AGENT => {
                auth.agents.insert(AgentRef::web_id(object));
            }
            acl::AGENT_CLASS => {
                if let Some(class) = AgentClass::from_iri(object) {
                    auth.agent_classes.insert(class);
                }
            }
            acl::AGENT_GROUP => {
                auth.agent_groups.insert(ResourceRef::new(object));
            }
            _ => {}
        }
    }

    if auth.modes.is_empty() {
        return Err(Error::MalformedAuthorization {
            subject: subject.clone(),
            reason: "no recognised acl:mode",
        });
    }
    if !auth.has_grantee() {
        return Err(Error::MalformedAuthorization {
            subject: subject.clone(),
            reason: "no acl:agent, acl:agentClass or acl:agentGroup",
        });
    }
    Ok(auth)
}
