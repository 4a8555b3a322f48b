use crate::k8s::{
    policy::{Duration, Size, UpstreamKeepAlive, UpstreamSettingsPolicySpec},
    Service,
};
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

const SIZE_REGEX: &str = r"^[0-9]{1,4}(k|m|g)?$";
const DURATION_REGEX: &str = r"^[0-9]{1,4}(ms|s|m|h)?$";

static SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(SIZE_REGEX).expect("should compile"));
static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DURATION_REGEX).expect("should compile"));

#[derive(Debug, Error, PartialEq, Clone)]
pub enum FormatError {
    #[error("invalid size {0:?}: must match the regex {regex}", regex = SIZE_REGEX)]
    Size(String),

    #[error("invalid duration {0:?}: must match the regex {regex}", regex = DURATION_REGEX)]
    Duration(String),
}

pub(crate) fn validate_size(size: &Size) -> Result<(), FormatError> {
    if !SIZE.is_match(size.as_str()) {
        return Err(FormatError::Size(size.to_string()));
    }
    Ok(())
}

pub(crate) fn validate_duration(duration: &Duration) -> Result<(), FormatError> {
    if !DURATION.is_match(duration.as_str()) {
        return Err(FormatError::Duration(duration.to_string()));
    }
    Ok(())
}

/// Checks an `UpstreamSettingsPolicy` spec before it is handed to the
/// processor, which copies values without inspecting them.
pub(crate) fn validate_policy(spec: &UpstreamSettingsPolicySpec) -> Result<()> {
    if spec.target_refs.is_empty() {
        bail!("targetRefs must not be empty");
    }

    for target_ref in &spec.target_refs {
        if !target_ref.targets_kind::<Service>() {
            bail!("invalid targetRef kind: {}", target_ref.canonical_kind());
        }
    }

    if let Some(size) = &spec.zone_size {
        validate_size(size).context("zoneSize")?;
    }

    if let Some(keep_alive) = &spec.keep_alive {
        validate_keep_alive(keep_alive)?;
    }

    Ok(())
}

fn validate_keep_alive(keep_alive: &UpstreamKeepAlive) -> Result<()> {
    if let Some(connections) = keep_alive.connections {
        if connections < 1 {
            bail!("keepAlive.connections must be greater than 0");
        }
    }

    if let Some(requests) = keep_alive.requests {
        if requests < 0 {
            bail!("keepAlive.requests must not be negative");
        }
    }

    if let Some(time) = &keep_alive.time {
        validate_duration(time).context("keepAlive.time")?;
    }

    if let Some(timeout) = &keep_alive.timeout {
        validate_duration(timeout).context("keepAlive.timeout")?;
    }

    Ok(())
}
