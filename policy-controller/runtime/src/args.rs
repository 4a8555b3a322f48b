use crate::{
    core::{Processor, UpstreamSettings},
    k8s::{policy::UpstreamSettingsPolicy, ResourceExt},
    manifest, validation,
};
use anyhow::Result;
use clap::Parser;
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

#[derive(Debug, Parser)]
#[clap(
    name = "upstream-settings",
    about = "Merges UpstreamSettingsPolicy resources into upstream settings"
)]
pub struct Args {
    #[clap(
        long,
        default_value = "upstream_settings=info,warn",
        env = "UPSTREAM_SETTINGS_LOG"
    )]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain")]
    log_format: kubert::LogFormat,

    /// Fails instead of skipping policies that do not pass validation.
    #[clap(long)]
    strict: bool,

    /// Manifests to read policies from.
    ///
    /// Policies take precedence in the order they are read: earlier files
    /// before later ones, and earlier documents before later ones.
    #[clap(required = true)]
    manifests: Vec<PathBuf>,
}

impl Args {
    #[inline]
    pub fn parse_and_run() -> Result<()> {
        Self::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let Self {
            log_level,
            log_format,
            strict,
            manifests,
        } = self;

        log_format.try_init(log_level)?;

        let settings = merge(load_all(&manifests)?, strict)?;
        info!(?settings, "Resolved upstream settings");

        write_settings(std::io::stdout().lock(), &settings)
    }
}

/// Reads policies from each manifest, preserving file then document order.
fn load_all(manifests: &[impl AsRef<Path>]) -> Result<Vec<UpstreamSettingsPolicy>> {
    let mut policies = Vec::new();
    for path in manifests {
        let path = path.as_ref();
        let loaded = manifest::load(path)?;
        debug!(path = %path.display(), policies = loaded.len(), "Loaded manifest");
        policies.extend(loaded);
    }
    Ok(policies)
}

fn write_settings(mut out: impl Write, settings: &UpstreamSettings) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, settings)?;
    writeln!(out)?;
    Ok(())
}

/// Validates the policies and merges those that pass.
///
/// Invalid policies are dropped with a warning unless `strict` is set, in
/// which case the first invalid policy fails the merge.
fn merge(policies: Vec<UpstreamSettingsPolicy>, strict: bool) -> Result<UpstreamSettings> {
    let mut valid = Vec::with_capacity(policies.len());
    for policy in policies {
        let ns = policy.namespace().unwrap_or_default();
        let name = policy.name_any();
        if let Err(error) = validation::validate_policy(&policy.spec) {
            if strict {
                return Err(error.context(format!("invalid UpstreamSettingsPolicy {ns}/{name}")));
            }
            warn!(%ns, %name, ?error, "Ignoring invalid policy");
            continue;
        }
        valid.push(policy);
    }

    Ok(Processor::new().process(&valid))
}
