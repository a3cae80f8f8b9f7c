//! `check` and `modes` command implementations.

use std::io::Write;
use std::path::Path;

use webac_acl::{AclOutcome, Authorizer, Decision, Resolution};
use webac_core::ResourceRef;
use webac_storage::{Dataset, MemoryStore, TimeoutAccessor};

use crate::cli::{CheckArgs, QueryArgs};
use crate::config::WebacConfig;
use crate::error::{Error, Result};

/// Authorizer over a dataset loaded into memory.
pub type DatasetAuthorizer = Authorizer<TimeoutAccessor<MemoryStore>>;

/// Build an authorizer over `dataset`, or the configured dataset if `None`.
///
/// # Errors
///
/// Returns an error if no dataset is given or configured, or it fails to load.
pub fn build_authorizer(config: &WebacConfig, dataset: Option<&Path>) -> Result<DatasetAuthorizer> {
    let path = dataset.or(config.dataset.as_deref()).ok_or_else(|| {
        Error::config("No dataset given; pass --dataset or set `dataset` in the config file")
    })?;

    let dataset = Dataset::from_path(path)?;
    let store = MemoryStore::from_dataset(&dataset)?;
    log::debug!("Loaded {} resources from {}", store.len(), path.display());

    Ok(Authorizer::new(
        TimeoutAccessor::new(store, config.lookup_timeout()),
        config.authorizer.clone(),
    ))
}

/// Run `webac check`, writing the decision to `out`.
pub async fn cmd_check(
    config: &WebacConfig,
    args: &CheckArgs,
    out: &mut dyn Write,
) -> Result<Decision> {
    let query = &args.query;
    let authorizer = build_authorizer(config, query.dataset.as_deref())?;
    let target = ResourceRef::new(query.target.as_str());

    let decision = authorizer.authorize(&query.agent, &target, args.mode).await;

    let line = if query.json {
        serde_json::json!({
            "agent": query.agent,
            "target": target,
            "requested": args.mode,
            "decision": decision.to_string(),
        })
        .to_string()
    } else {
        decision.to_string()
    };
    writeln!(out, "{line}").map_err(|e| Error::io_with_path(e, "<stdout>"))?;
    Ok(decision)
}

/// Run `webac modes`, writing the effective modes to `out`.
///
/// Unlike `check`, resolution failures are reported as errors rather than
/// collapsed into an empty set.
pub async fn cmd_modes(
    config: &WebacConfig,
    args: &QueryArgs,
    out: &mut dyn Write,
) -> Result<Resolution> {
    let authorizer = build_authorizer(config, args.dataset.as_deref())?;
    let target = ResourceRef::new(args.target.as_str());

    let resolution = authorizer.try_effective_modes(&args.agent, &target).await?;

    let text = if args.json {
        serde_json::json!({
            "agent": args.agent,
            "target": target,
            "modes": resolution.modes,
            "source": source_json(&resolution.outcome),
        })
        .to_string()
    } else {
        render_resolution(&resolution)
    };
    writeln!(out, "{text}").map_err(|e| Error::io_with_path(e, "<stdout>"))?;
    Ok(resolution)
}

/// Two-line text rendering: the modes, then where they came from.
pub fn render_resolution(resolution: &Resolution) -> String {
    let modes = if resolution.modes.is_empty() {
        "(none)".to_string()
    } else {
        resolution.modes.to_string()
    };
    let source = match &resolution.outcome {
        AclOutcome::Governed { acl, depth: 0 } => format!("governed by {acl}"),
        AclOutcome::Governed { acl, depth } => {
            format!("inherited from {acl} (depth {depth})")
        }
        AclOutcome::NoApplicableAcl => "no applicable ACL; default policy applied".to_string(),
    };
    format!("modes: {modes}\nsource: {source}")
}

fn source_json(outcome: &AclOutcome) -> serde_json::Value {
    match outcome {
        AclOutcome::Governed { acl, depth } => serde_json::json!({ "acl": acl, "depth": depth }),
        AclOutcome::NoApplicableAcl => serde_json::Value::Null,
    }
}
