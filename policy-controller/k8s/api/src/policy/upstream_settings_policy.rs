use super::LocalTargetRef;
use std::fmt;

/// Configures the upstream connection pool of the Services it targets.
///
/// Every field is optional; a policy may set any subset of them.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    kube::CustomResource,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
)]
#[kube(
    group = "gateway.nginx.org",
    version = "v1alpha1",
    kind = "UpstreamSettingsPolicy",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamSettingsPolicySpec {
    pub target_refs: Vec<LocalTargetRef>,

    /// Size of the shared memory zone for the upstream, e.g. `512k` or `2m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_size: Option<Size>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<UpstreamKeepAlive>,
}

/// Keep-alive tuning for connections to upstream servers.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamKeepAlive {
    /// Maximum number of idle keep-alive connections cached per worker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<i32>,

    /// Maximum number of requests served through one keep-alive connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<i32>,

    /// Maximum time a keep-alive connection may handle requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Duration>,

    /// Idle timeout for a keep-alive connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

/// A size in the data plane's notation: a count optionally suffixed with
/// `k`, `m` or `g`.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
)]
#[serde(transparent)]
pub struct Size(String);

/// A duration in the data plane's notation: a count optionally suffixed with
/// `ms`, `s`, `m` or `h`.
///
/// Unlike a Go-style duration this is never composite (`1h30m` is not a
/// valid `Duration`).
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
)]
#[serde(transparent)]
pub struct Duration(String);

// === impl Size ===

impl Size {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Size {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Size {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// === impl Duration ===

impl Duration {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Duration {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Duration {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceExt;

    #[test]
    fn deserializes_all_fields() {
        let policy: UpstreamSettingsPolicy = serde_json::from_value(serde_json::json!({
            "apiVersion": "gateway.nginx.org/v1alpha1",
            "kind": "UpstreamSettingsPolicy",
            "metadata": {
                "name": "usp",
                "namespace": "test",
            },
            "spec": {
                "targetRefs": [{
                    "group": "",
                    "kind": "Service",
                    "name": "backend",
                }],
                "zoneSize": "2m",
                "keepAlive": {
                    "connections": 1,
                    "requests": 1,
                    "time": "5s",
                    "timeout": "10s",
                },
            },
        }))
        .expect("policy must deserialize");

        assert_eq!(policy.name_any(), "usp");
        assert_eq!(policy.namespace().as_deref(), Some("test"));
        assert_eq!(
            policy.spec,
            UpstreamSettingsPolicySpec {
                target_refs: vec![LocalTargetRef {
                    group: Some("".to_string()),
                    kind: "Service".to_string(),
                    name: "backend".to_string(),
                }],
                zone_size: Some("2m".into()),
                keep_alive: Some(UpstreamKeepAlive {
                    connections: Some(1),
                    requests: Some(1),
                    time: Some("5s".into()),
                    timeout: Some("10s".into()),
                }),
            }
        );
    }

    #[test]
    fn absent_fields_stay_absent() {
        let spec: UpstreamSettingsPolicySpec = serde_json::from_value(serde_json::json!({
            "targetRefs": [],
            "keepAlive": {
                "requests": 0,
            },
        }))
        .expect("spec must deserialize");

        assert_eq!(spec.zone_size, None);
        assert_eq!(
            spec.keep_alive,
            Some(UpstreamKeepAlive {
                requests: Some(0),
                ..UpstreamKeepAlive::default()
            })
        );
    }

    #[test]
    fn serializes_without_absent_fields() {
        let spec = UpstreamSettingsPolicySpec {
            zone_size: Some("512k".into()),
            ..UpstreamSettingsPolicySpec::default()
        };
        assert_eq!(
            serde_json::to_value(&spec).expect("spec must serialize"),
            serde_json::json!({
                "targetRefs": [],
                "zoneSize": "512k",
            })
        );
    }

    #[test]
    fn crd_metadata() {
        use crate::CustomResourceExt;

        let crd = UpstreamSettingsPolicy::crd();
        assert_eq!(
            crd.metadata.name.as_deref(),
            Some("upstreamsettingspolicies.gateway.nginx.org")
        );
        assert_eq!(crd.spec.scope, "Namespaced");
    }
}
