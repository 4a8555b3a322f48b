use crate::k8s::{policy::UpstreamSettingsPolicy, Resource, ResourceExt};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, trace};

/// Reads the `UpstreamSettingsPolicy` documents from a YAML manifest file.
pub(crate) fn load(path: &Path) -> Result<Vec<UpstreamSettingsPolicy>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parses a multi-document YAML manifest, keeping `UpstreamSettingsPolicy`
/// resources in document order and skipping resources of any other kind.
pub(crate) fn parse(contents: &str) -> Result<Vec<UpstreamSettingsPolicy>> {
    let mut policies = Vec::new();
    for (idx, document) in serde_yaml::Deserializer::from_str(contents).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .with_context(|| format!("invalid YAML in document {idx}"))?;
        if value.is_null() {
            continue;
        }

        if !is_kind::<UpstreamSettingsPolicy>(&value) {
            debug!(document = idx, "Skipping unsupported resource");
            continue;
        }

        let policy = serde_yaml::from_value::<UpstreamSettingsPolicy>(value)
            .with_context(|| format!("invalid UpstreamSettingsPolicy in document {idx}"))?;
        trace!(ns = ?policy.namespace(), name = %policy.name_any(), "Loaded policy");
        policies.push(policy);
    }
    Ok(policies)
}

fn is_kind<T>(value: &serde_yaml::Value) -> bool
where
    T: Resource,
    T::DynamicType: Default,
{
    let dt = Default::default();
    value.get("apiVersion").and_then(serde_yaml::Value::as_str) == Some(&*T::api_version(&dt))
        && value.get("kind").and_then(serde_yaml::Value::as_str) == Some(&*T::kind(&dt))
}
