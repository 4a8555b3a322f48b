use std::sync::Arc;
use upstream_settings_k8s_api::policy::{
    Duration, Size, UpstreamSettingsPolicy, UpstreamSettingsPolicySpec,
};

/// Upstream connection-pool settings resolved from a set of policies.
///
/// A zero value (`""` or `0`) means that no policy set the attribute and that
/// it should be left out of the generated configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamSettings {
    pub zone_size: String,
    pub keep_alive_connections: i32,
    pub keep_alive_requests: i32,
    pub keep_alive_time: String,
    pub keep_alive_timeout: String,
}

/// A policy that may configure upstream settings.
///
/// Each accessor returns `None` when the policy leaves the attribute unset.
pub trait Policy {
    fn zone_size(&self) -> Option<&Size>;

    fn keep_alive_connections(&self) -> Option<i32>;

    fn keep_alive_requests(&self) -> Option<i32>;

    fn keep_alive_time(&self) -> Option<&Duration>;

    fn keep_alive_timeout(&self) -> Option<&Duration>;
}

/// Merges policies into a single [`UpstreamSettings`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Processor(());

// === impl UpstreamSettings ===

impl UpstreamSettings {
    /// Returns true if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// === impl Processor ===

impl Processor {
    pub fn new() -> Self {
        Self(())
    }

    /// Resolves each attribute independently from the given policies.
    ///
    /// Policies are ordered by precedence: for every attribute, the first
    /// policy that sets it wins and later policies are not consulted for that
    /// attribute. The result may therefore combine values from several
    /// policies. Values are copied verbatim; they are expected to have been
    /// validated already.
    pub fn process<P: Policy>(&self, policies: &[P]) -> UpstreamSettings {
        UpstreamSettings {
            zone_size: resolve(policies, "zoneSize", |p| {
                p.zone_size().map(ToString::to_string)
            })
            .unwrap_or_default(),
            keep_alive_connections: resolve(policies, "keepAlive.connections", |p| {
                p.keep_alive_connections()
            })
            .unwrap_or_default(),
            keep_alive_requests: resolve(policies, "keepAlive.requests", |p| {
                p.keep_alive_requests()
            })
            .unwrap_or_default(),
            keep_alive_time: resolve(policies, "keepAlive.time", |p| {
                p.keep_alive_time().map(ToString::to_string)
            })
            .unwrap_or_default(),
            keep_alive_timeout: resolve(policies, "keepAlive.timeout", |p| {
                p.keep_alive_timeout().map(ToString::to_string)
            })
            .unwrap_or_default(),
        }
    }
}

/// Returns the value of the first policy that sets an attribute.
fn resolve<P, T>(
    policies: &[P],
    attribute: &'static str,
    get: impl Fn(&P) -> Option<T>,
) -> Option<T> {
    policies.iter().enumerate().find_map(|(idx, policy)| {
        let value = get(policy)?;
        tracing::trace!(attribute, policy = idx, "Resolved upstream setting");
        Some(value)
    })
}

// === impl Policy ===

impl Policy for UpstreamSettingsPolicySpec {
    fn zone_size(&self) -> Option<&Size> {
        self.zone_size.as_ref()
    }

    fn keep_alive_connections(&self) -> Option<i32> {
        self.keep_alive.as_ref()?.connections
    }

    fn keep_alive_requests(&self) -> Option<i32> {
        self.keep_alive.as_ref()?.requests
    }

    fn keep_alive_time(&self) -> Option<&Duration> {
        self.keep_alive.as_ref()?.time.as_ref()
    }

    fn keep_alive_timeout(&self) -> Option<&Duration> {
        self.keep_alive.as_ref()?.timeout.as_ref()
    }
}

impl Policy for UpstreamSettingsPolicy {
    fn zone_size(&self) -> Option<&Size> {
        self.spec.zone_size()
    }

    fn keep_alive_connections(&self) -> Option<i32> {
        self.spec.keep_alive_connections()
    }

    fn keep_alive_requests(&self) -> Option<i32> {
        self.spec.keep_alive_requests()
    }

    fn keep_alive_time(&self) -> Option<&Duration> {
        self.spec.keep_alive_time()
    }

    fn keep_alive_timeout(&self) -> Option<&Duration> {
        self.spec.keep_alive_timeout()
    }
}

macro_rules! forward_policy {
    ($($ptr:ty),+) => {
        $(
            impl<P: Policy + ?Sized> Policy for $ptr {
                #[inline]
                fn zone_size(&self) -> Option<&Size> {
                    (**self).zone_size()
                }

                #[inline]
                fn keep_alive_connections(&self) -> Option<i32> {
                    (**self).keep_alive_connections()
                }

                #[inline]
                fn keep_alive_requests(&self) -> Option<i32> {
                    (**self).keep_alive_requests()
                }

                #[inline]
                fn keep_alive_time(&self) -> Option<&Duration> {
                    (**self).keep_alive_time()
                }

                #[inline]
                fn keep_alive_timeout(&self) -> Option<&Duration> {
                    (**self).keep_alive_timeout()
                }
            }
        )+
    };
}

forward_policy!(&P, Box<P>, Arc<P>);
